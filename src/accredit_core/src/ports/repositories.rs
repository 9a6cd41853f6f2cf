use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountId, NewAccount, VerifiedTransition},
    email::Email,
    item::{Item, NewItem},
    password::Password,
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("An account with this email already exists")]
    EmailTaken,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::AccountNotFound, Self::AccountNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account, hashing the password on the way in. The email
    /// uniqueness check is case-insensitive; a storage-level unique violation
    /// is reported as [`AccountStoreError::EmailTaken`], never propagated raw.
    async fn add_account(&self, new_account: NewAccount) -> Result<Account, AccountStoreError>;
    async fn get_by_email(&self, email: &Email) -> Result<Account, AccountStoreError>;
    async fn get_by_id(&self, id: AccountId) -> Result<Account, AccountStoreError>;
    /// Whether any account row exists at all (bootstrap guard).
    async fn any_account_exists(&self) -> Result<bool, AccountStoreError>;
    /// Check a plaintext candidate against the stored hash. Takes the raw
    /// secret rather than [`Password`]: stored passwords may predate the
    /// current policy and must still authenticate.
    async fn verify_credentials(
        &self,
        email: &Email,
        password: &Secret<String>,
    ) -> Result<Account, AccountStoreError>;
    async fn set_password(
        &self,
        id: AccountId,
        new_password: Password,
    ) -> Result<(), AccountStoreError>;
    /// Atomically flip `email_verified` from false to true. Must be a
    /// compare-and-set on the row so concurrent callers observe at most one
    /// transition.
    async fn mark_email_verified(
        &self,
        id: AccountId,
    ) -> Result<VerifiedTransition, AccountStoreError>;
}

// TokenBlacklist port trait and errors
#[derive(Debug, Error)]
pub enum TokenBlacklistError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Append-only record of consumed verification tokens. Entries are never
/// removed; token expiry alone makes stale entries moot.
#[async_trait]
pub trait TokenBlacklist: Send + Sync {
    async fn add_token(&self, token: String) -> Result<(), TokenBlacklistError>;
    async fn contains_token(&self, token: &str) -> Result<bool, TokenBlacklistError>;
}

// ItemStore port trait and errors
#[derive(Debug, Error)]
pub enum ItemStoreError {
    #[error("Item not found")]
    ItemNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for ItemStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ItemNotFound, Self::ItemNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn add_item(&self, new_item: NewItem) -> Result<Item, ItemStoreError>;
    async fn get_item(&self, id: i64) -> Result<Item, ItemStoreError>;
    async fn list_items(&self) -> Result<Vec<Item>, ItemStoreError>;
}
