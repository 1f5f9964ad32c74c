use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{Account, NewProfile, Profile};
use super::store::{AccountStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    accounts: HashMap<String, Account>, // keyed by email
    profiles: Vec<Profile>,
}

/// Account store backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    tables: RwLock<Tables>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn account_count(&self) -> usize {
        self.tables.read().await.accounts.len()
    }

    pub async fn profiles_for(&self, account_id: Uuid) -> Vec<Profile> {
        self.tables
            .read()
            .await
            .profiles
            .iter()
            .filter(|p| p.user_id == account_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create_account_and_profile(
        &self,
        email: &str,
        password_hash: &str,
        profile: &NewProfile,
    ) -> Result<Account, StoreError> {
        // Check and both inserts happen under one write guard.
        let mut tables = self.tables.write().await;
        if tables.accounts.contains_key(email) {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }

        let now = OffsetDateTime::now_utc();
        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
        };
        tables.profiles.push(Profile {
            id: Uuid::new_v4(),
            user_id: account.id,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            phone_number: profile.phone_number.clone(),
            qualification: profile.qualification.clone(),
            gender: profile.gender.clone(),
            country: profile.country.clone(),
            created_at: now,
        });
        tables.accounts.insert(account.email.clone(), account.clone());
        Ok(account)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.tables.read().await.accounts.get(email).cloned())
    }

    async fn find_profile_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<Profile>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.user_id == account_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> NewProfile {
        NewProfile {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            phone_number: "+100000000".into(),
            qualification: "MSc".into(),
            gender: "female".into(),
            country: "NZ".into(),
        }
    }

    #[tokio::test]
    async fn creates_linked_account_and_profile() {
        let store = InMemoryAccountStore::new();
        let account = store
            .create_account_and_profile("a@x.com", "hash", &profile())
            .await
            .unwrap();

        assert_eq!(store.account_count().await, 1);
        let profiles = store.profiles_for(account.id).await;
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].first_name, "Ann");

        let found = store.find_account_by_email("a@x.com").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(account.id));
    }

    #[tokio::test]
    async fn rejects_duplicate_email_without_side_effects() {
        let store = InMemoryAccountStore::new();
        store
            .create_account_and_profile("a@x.com", "hash", &profile())
            .await
            .unwrap();
        let err = store
            .create_account_and_profile("a@x.com", "other", &profile())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateEmail(ref e) if e == "a@x.com"));
        assert_eq!(store.account_count().await, 1);
        assert_eq!(store.tables.read().await.profiles.len(), 1);
    }

    #[tokio::test]
    async fn lookup_is_exact_match() {
        let store = InMemoryAccountStore::new();
        store
            .create_account_and_profile("a@x.com", "hash", &profile())
            .await
            .unwrap();
        assert!(store.find_account_by_email("A@x.com").await.unwrap().is_none());
        assert!(store
            .find_profile_by_account(Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }
}
