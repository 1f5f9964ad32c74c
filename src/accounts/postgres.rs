use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::model::{Account, NewProfile, Profile};
use super::store::{AccountStore, StoreError};

#[derive(Debug, Clone)]
pub struct PgAccountStore {
    db: PgPool,
}

impl PgAccountStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create_account_and_profile(
        &self,
        email: &str,
        password_hash: &str,
        profile: &NewProfile,
    ) -> Result<Account, StoreError> {
        // Dropping `tx` on any early return rolls both inserts back.
        let mut tx = self.db.begin().await?;

        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, email))?;

        sqlx::query(
            r#"
            INSERT INTO user_profiles
                (id, user_id, first_name, last_name, phone_number, qualification, gender, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(account.id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.phone_number)
        .bind(&profile.qualification)
        .bind(&profile.gender)
        .bind(&profile.country)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(user_id = %account.id, "account and profile committed");
        Ok(account)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(account)
    }

    async fn find_profile_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<Profile>, StoreError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, first_name, last_name, phone_number,
                   qualification, gender, country, created_at
              FROM user_profiles
             WHERE user_id = $1
             ORDER BY created_at ASC
             LIMIT 1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(profile)
    }
}

/// A unique violation on `users` can only come from the email constraint.
fn map_insert_error(err: sqlx::Error, email: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::DuplicateEmail(email.to_string())
        }
        _ => StoreError::Database(err),
    }
}
