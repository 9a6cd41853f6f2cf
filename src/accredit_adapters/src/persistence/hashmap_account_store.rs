use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use chrono::Utc;
use secrecy::{ExposeSecret, Secret};

use accredit_core::{
    Account, AccountId, AccountStore, AccountStoreError, Email, NewAccount, Password,
    VerifiedTransition,
};

use super::password_hash::{compute_password_hash, verify_password_hash};

#[derive(Clone)]
struct StoredAccount {
    account: Account,
    password_hash: Secret<String>,
}

/// In-memory account store for tests and local development. Hashes passwords
/// with the same argon2 parameters as the Postgres store so the
/// no-plaintext-at-rest invariant holds here too.
#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<String, StoredAccount>>>,
    next_id: Arc<RwLock<AccountId>>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored hash for a given email, exposed for assertions in tests.
    pub async fn password_hash_of(&self, email: &Email) -> Option<String> {
        let accounts = self.accounts.read().await;
        accounts
            .get(&email.normalized_key())
            .map(|stored| stored.password_hash.expose_secret().clone())
    }
}

#[async_trait::async_trait]
impl AccountStore for HashMapAccountStore {
    async fn add_account(&self, new_account: NewAccount) -> Result<Account, AccountStoreError> {
        let password_hash = compute_password_hash(new_account.password().as_ref().clone())
            .await
            .map_err(AccountStoreError::UnexpectedError)?;

        let key = new_account.email().normalized_key();
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(AccountStoreError::EmailTaken);
        }

        let mut next_id = self.next_id.write().await;
        *next_id += 1;

        let account = Account::new(
            *next_id,
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
                password_hash,
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
        let stored = {
            let accounts = self.accounts.read().await;
            accounts
                .get(&email.normalized_key())
                .cloned()
                .ok_or(AccountStoreError::AccountNotFound)?
        };

        verify_password_hash(stored.password_hash, password.clone())
            .await
            .map_err(|_| AccountStoreError::IncorrectPassword)?;

        Ok(stored.account)
    }

    async fn set_password(
        &self,
        id: AccountId,
        new_password: Password,
    ) -> Result<(), AccountStoreError> {
        let password_hash = compute_password_hash(new_password.as_ref().clone())
            .await
            .map_err(AccountStoreError::UnexpectedError)?;

        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .values_mut()
            .find(|stored| stored.account.id() == id)
            .ok_or(AccountStoreError::AccountNotFound)?;

        stored.password_hash = password_hash;
        Ok(())
    }

    async fn mark_email_verified(
        &self,
        id: AccountId,
    ) -> Result<VerifiedTransition, AccountStoreError> {
        // The write lock is the in-memory stand-in for the database's
        // single-row atomicity.
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

#[cfg(test)]
mod tests {
    use super::*;
    use accredit_core::{PersonName, RoleDefaults};
    use fake::Fake;
    use fake::faker::internet::en::SafeEmail;

    fn new_account(email: &str) -> NewAccount {
        NewAccount::registration(
            Email::try_from(Secret::from(email.to_string())).unwrap(),
            PersonName::parse("first_name", "John".to_string()).unwrap(),
            PersonName::parse("last_name", "Doe".to_string()).unwrap(),
            Password::try_from(Secret::from("NewPassword@2022".to_string())).unwrap(),
            RoleDefaults::default(),
        )
    }

    #[tokio::test]
    async fn test_add_and_get_account() {
        let store = HashMapAccountStore::new();
        let address: String = SafeEmail().fake();

        let created = store.add_account(new_account(&address)).await.unwrap();
        let fetched = store.get_by_id(created.id()).await.unwrap();

        assert_eq!(fetched.email(), created.email());
        assert!(!fetched.email_verified());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = HashMapAccountStore::new();

        store
            .add_account(new_account("johndoe@gmail.com"))
            .await
            .unwrap();
        let result = store.add_account(new_account("johndoe@GMAIL.com")).await;

        assert_eq!(result.unwrap_err(), AccountStoreError::EmailTaken);
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let store = HashMapAccountStore::new();
        let created = store
            .add_account(new_account("johndoe@gmail.com"))
            .await
            .unwrap();

        let hash = store.password_hash_of(created.email()).await.unwrap();
        assert_ne!(hash, "NewPassword@2022");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let store = HashMapAccountStore::new();
        let created = store
            .add_account(new_account("johndoe@gmail.com"))
            .await
            .unwrap();

        assert!(
            store
                .verify_credentials(
                    created.email(),
                    &Secret::from("NewPassword@2022".to_string())
                )
                .await
                .is_ok()
        );
        assert_eq!(
            store
                .verify_credentials(created.email(), &Secret::from("wrong".to_string()))
                .await
                .unwrap_err(),
            AccountStoreError::IncorrectPassword
        );
    }

    #[tokio::test]
    async fn test_mark_email_verified_transitions_once() {
        let store = HashMapAccountStore::new();
        let created = store
            .add_account(new_account("johndoe@gmail.com"))
            .await
            .unwrap();

        assert_eq!(
            store.mark_email_verified(created.id()).await.unwrap(),
            VerifiedTransition::Transitioned
        );
        assert_eq!(
            store.mark_email_verified(created.id()).await.unwrap(),
            VerifiedTransition::AlreadyVerified
        );
    }
}
