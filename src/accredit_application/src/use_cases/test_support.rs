use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

use accredit_core::{
    Account, AccountId, AccountStore, AccountStoreError, Email, NewAccount, Password,
    TokenBlacklist, TokenBlacklistError, VerifiedTransition,
};

// Mock stores shared by the use case tests. The "hash" is a marker prefix,
// not a real digest; hashing strength is an adapter concern.

#[derive(Clone)]
struct StoredAccount {
    account: Account,
    password_hash: String,
}

#[derive(Clone, Default)]
pub struct MockAccountStore {
    accounts: Arc<RwLock<HashMap<String, StoredAccount>>>,
    next_id: Arc<AtomicI64>,
}

impl MockAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stored_password_hash(&self, email: &Email) -> Option<String> {
        let accounts = self.accounts.read().await;
        accounts
            .get(&email.normalized_key())
            .map(|stored| stored.password_hash.clone())
    }
}

fn mock_hash(plaintext: &str) -> String {
    format!("mock-hash:{}", plaintext)
}

#[async_trait::async_trait]
impl AccountStore for MockAccountStore {
    async fn add_account(&self, new_account: NewAccount) -> Result<Account, AccountStoreError> {
        let key = new_account.email().normalized_key();
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(AccountStoreError::EmailTaken);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let account = Account::new(
            id,
            new_account.email().clone(),
            new_account.first_name().clone(),
            new_account.last_name().clone(),
            new_account.email_verified(),
            new_account.roles().is_staff,
            new_account.roles().is_superuser,
            true,
            Utc::now(),
            None,
        );
        accounts.insert(
            key,
            StoredAccount {
                account: account.clone(),
                password_hash: mock_hash(new_account.password().as_ref().expose_secret()),
            },
        );
        Ok(account)
    }

    async fn get_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .get(&email.normalized_key())
            .map(|stored| stored.account.clone())
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn get_by_id(&self, id: AccountId) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|stored| stored.account.id() == id)
            .map(|stored| stored.account.clone())
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn any_account_exists(&self) -> Result<bool, AccountStoreError> {
        Ok(!self.accounts.read().await.is_empty())
    }

    async fn verify_credentials(
        &self,
        email: &Email,
        password: &Secret<String>,
    ) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        let stored = accounts
            .get(&email.normalized_key())
            .ok_or(AccountStoreError::AccountNotFound)?;

        if stored.password_hash != mock_hash(password.expose_secret()) {
            return Err(AccountStoreError::IncorrectPassword);
        }
        Ok(stored.account.clone())
    }

    async fn set_password(
        &self,
        id: AccountId,
        new_password: Password,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .values_mut()
            .find(|stored| stored.account.id() == id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        stored.password_hash = mock_hash(new_password.as_ref().expose_secret());
        Ok(())
    }

    async fn mark_email_verified(
        &self,
        id: AccountId,
    ) -> Result<VerifiedTransition, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .values_mut()
            .find(|stored| stored.account.id() == id)
            .ok_or(AccountStoreError::AccountNotFound)?;

        if stored.account.email_verified() {
            return Ok(VerifiedTransition::AlreadyVerified);
        }

        stored.account = Account::new(
            stored.account.id(),
            stored.account.email().clone(),
            stored.account.first_name().clone(),
            stored.account.last_name().clone(),
            true,
            stored.account.is_staff(),
            stored.account.is_superuser(),
            stored.account.is_active(),
            stored.account.date_joined(),
            stored.account.last_login(),
        );
        Ok(VerifiedTransition::Transitioned)
    }
}

#[derive(Clone, Default)]
pub struct MockTokenBlacklist {
    tokens: Arc<RwLock<HashSet<String>>>,
}

impl MockTokenBlacklist {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TokenBlacklist for MockTokenBlacklist {
    async fn add_token(&self, token: String) -> Result<(), TokenBlacklistError> {
        self.tokens.write().await.insert(token);
        Ok(())
    }

    async fn contains_token(&self, token: &str) -> Result<bool, TokenBlacklistError> {
        Ok(self.tokens.read().await.contains(token))
    }
}
