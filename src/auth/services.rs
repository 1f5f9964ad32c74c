use axum::extract::FromRef;
use lazy_static::lazy_static;
use tracing::{info, warn};

use super::{
    error::AuthError,
    jwt::JwtKeys,
    password::{hash_password, hash_password_blocking, verify_password_blocking},
};
use crate::{
    accounts::{Account, NewProfile, Profile},
    state::AppState,
};

pub const TOKEN_TYPE: &str = "bearer";

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Emails are stored and looked up trimmed and lowercased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

lazy_static! {
    /// Stand-in hash verified when no account matches, so a miss costs
    /// the same argon2 work as a wrong password.
    static ref DUMMY_HASH: Option<String> = hash_password("signup-auth-dummy-password").ok();
}

/// Hash to verify against: the stored one, or the dummy on a miss.
fn candidate_hash(stored: Option<&str>) -> Option<&str> {
    stored.or(DUMMY_HASH.as_deref())
}

/// Runs argon2 verification whether or not an account was found.
/// Only a found account with a matching hash yields `true`.
pub(crate) async fn check_credentials(
    password: &str,
    stored: Option<&str>,
) -> anyhow::Result<bool> {
    let Some(hash) = candidate_hash(stored) else {
        return Ok(false);
    };
    let hash = hash.to_owned();
    let ok = verify_password_blocking(password.to_owned(), hash).await?;
    Ok(ok && stored.is_some())
}

/// Hashes the password and stores the account with its profile.
pub async fn register(
    st: &AppState,
    email: &str,
    password: &str,
    profile: &NewProfile,
) -> Result<Account, AuthError> {
    let email = normalize_email(email);
    let hash = hash_password_blocking(password.to_owned()).await?;

    let account = st
        .accounts
        .create_account_and_profile(&email, &hash, profile)
        .await
        .map_err(|e| {
            warn!(email = %email, error = %e, "signup rejected");
            AuthError::from(e)
        })?;

    info!(user_id = %account.id, email = %account.email, "user registered");
    Ok(account)
}

/// Verifies the credentials and issues a bearer token for the account.
pub async fn authenticate(
    st: &AppState,
    email: &str,
    password: &str,
) -> Result<IssuedToken, AuthError> {
    let email = normalize_email(email);

    let account = st.accounts.find_account_by_email(&email).await?;
    let stored = account.as_ref().map(|a| a.password_hash.as_str());
    let ok = check_credentials(password, stored).await?;

    let account = match account {
        Some(account) if ok => account,
        Some(account) => {
            warn!(email = %email, user_id = %account.id, "login invalid password");
            return Err(AuthError::InvalidCredentials);
        }
        None => {
            warn!(email = %email, "login unknown email");
            return Err(AuthError::InvalidCredentials);
        }
    };

    let access_token = JwtKeys::from_ref(st).sign(&account.email)?;

    info!(user_id = %account.id, email = %account.email, "user logged in");
    Ok(IssuedToken {
        access_token,
        token_type: TOKEN_TYPE,
    })
}

/// Loads the account named by a verified token subject.
pub async fn current_account(
    st: &AppState,
    email: &str,
) -> Result<(Account, Option<Profile>), AuthError> {
    let account = st
        .accounts
        .find_account_by_email(email)
        .await?
        .ok_or(AuthError::Unauthorized("User not found"))?;
    let profile = st.accounts.find_profile_by_account(account.id).await?;
    Ok((account, profile))
}
