use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Account, NewProfile, Profile};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Durable storage for accounts and their profiles.
///
/// Emails are compared exactly; callers normalize them first.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts the account and its profile as one unit. Either both rows
    /// exist afterwards or neither does.
    async fn create_account_and_profile(
        &self,
        email: &str,
        password_hash: &str,
        profile: &NewProfile,
    ) -> Result<Account, StoreError>;

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Returns the oldest profile attached to `account_id`.
    async fn find_profile_by_account(&self, account_id: Uuid)
        -> Result<Option<Profile>, StoreError>;
}
