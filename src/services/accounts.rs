//! Signup and signin persistence
//!
//! [`AccountStore`] is the seam between the HTTP layer and wherever accounts
//! live. [`PgAccountStore`] is used when a database is configured and
//! [`InMemoryAccountStore`] otherwise.

use chrono::Utc;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Account;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("An account with email {0} already exists")]
    DuplicateEmail(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Registers a new account. Emails are unique across accounts.
    async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AccountError>;

    /// Returns the account matching `username` and `password`
    async fn verify_credentials(&self, username: &str, password: &str)
        -> Result<Account, AccountError>;
}

/// Salted SHA-256 digest of a password, hex encoded
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    salt: String,
    password_hash: String,
}

/// Process-local account store
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<Vec<StoredAccount>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if accounts.iter().any(|a| a.account.email.eq_ignore_ascii_case(email)) {
            return Err(AccountError::DuplicateEmail(email.to_string()));
        }

        let salt = Uuid::new_v4().to_string();
        let stored = StoredAccount {
            account: Account {
                id: Uuid::new_v4(),
                username: username.to_string(),
                email: email.to_string(),
                created_at: Utc::now(),
            },
            password_hash: hash_password(&salt, password),
            salt,
        };

        let account = stored.account.clone();
        accounts.push(stored);
        Ok(account)
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let accounts = self.accounts.read().await;
        accounts
            .iter()
            .filter(|a| a.account.username == username)
            .find(|a| hash_password(&a.salt, password) == a.password_hash)
            .map(|a| a.account.clone())
            .ok_or(AccountError::InvalidCredentials)
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    email: String,
    created_at: chrono::DateTime<Utc>,
    salt: String,
    password_hash: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            username: row.username,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

/// Postgres-backed account store
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AccountStore for PgAccountStore {
    async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let salt = Uuid::new_v4().to_string();
        let password_hash = hash_password(&salt, password);

        let result = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, username, email, salt, password_hash, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, username, email, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(email)
        .bind(&salt)
        .bind(&password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(account) => Ok(account),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AccountError::DuplicateEmail(email.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT id, username, email, created_at, salt, password_hash \
             FROM accounts WHERE username = $1 ORDER BY created_at",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .find(|row| hash_password(&row.salt, password) == row.password_hash)
            .map(Account::from)
            .ok_or(AccountError::InvalidCredentials)
    }
}
