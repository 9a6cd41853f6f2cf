use secrecy::Secret;

use accredit_core::{
    Account, AccountStore, AccountStoreError, Email, EmailError, NewAccount, Password,
    PersonName, PersonNameError, PolicyViolation, RoleDefaults, SuperuserError,
};

/// Error types for account provisioning
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProvisionAccountError {
    #[error("{0}")]
    InvalidEmail(#[from] EmailError),
    #[error("{0}")]
    InvalidName(#[from] PersonNameError),
    #[error("{0}")]
    WeakPassword(#[from] PolicyViolation),
    #[error("{0}")]
    InvalidRoles(#[from] SuperuserError),
    #[error("An account with this email already exists")]
    EmailTaken,
    #[error("An account already exists")]
    BootstrapForbidden,
    #[error("Account store error: {0}")]
    StoreError(AccountStoreError),
}

impl From<AccountStoreError> for ProvisionAccountError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::EmailTaken => ProvisionAccountError::EmailTaken,
            other => ProvisionAccountError::StoreError(other),
        }
    }
}

/// Raw registration fields, validated in a fixed order: email, first name,
/// last name, password policy, then uniqueness at the store.
pub struct ProvisionAccountRequest {
    pub email: Secret<String>,
    pub first_name: String,
    pub last_name: String,
    pub password: Secret<String>,
    pub roles: Option<RoleDefaults>,
}

/// Account provisioning use case - the only path that creates account rows
pub struct ProvisionAccountUseCase<'a, A>
where
    A: AccountStore,
{
    account_store: &'a A,
}

impl<'a, A> ProvisionAccountUseCase<'a, A>
where
    A: AccountStore,
{
    pub fn new(account_store: &'a A) -> Self {
        Self { account_store }
    }

    /// Provision an ordinary account. Role flags default to false and the
    /// email starts unverified.
    #[tracing::instrument(name = "ProvisionAccountUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        request: ProvisionAccountRequest,
    ) -> Result<Account, ProvisionAccountError> {
        let (email, first_name, last_name, password) = Self::parse_fields(&request)?;

        let new_account = NewAccount::registration(
            email,
            first_name,
            last_name,
            password,
            request.roles.unwrap_or_default(),
        );

        Ok(self.account_store.add_account(new_account).await?)
    }

    /// Provision the first superuser. The bootstrap guard is always enforced:
    /// once any account exists this path is closed.
    #[tracing::instrument(name = "ProvisionAccountUseCase::execute_superuser", skip_all)]
    pub async fn execute_superuser(
        &self,
        request: ProvisionAccountRequest,
    ) -> Result<Account, ProvisionAccountError> {
        if self.account_store.any_account_exists().await? {
            return Err(ProvisionAccountError::BootstrapForbidden);
        }

        let (email, first_name, last_name, password) = Self::parse_fields(&request)?;

        let new_account =
            NewAccount::superuser(email, first_name, last_name, password, request.roles)?;

        Ok(self.account_store.add_account(new_account).await?)
    }

    fn parse_fields(
        request: &ProvisionAccountRequest,
    ) -> Result<(Email, PersonName, PersonName, Password), ProvisionAccountError> {
        let email = Email::try_from(request.email.clone())?;
        let first_name = PersonName::parse("first_name", request.first_name.clone())?;
        let last_name = PersonName::parse("last_name", request.last_name.clone())?;
        let password = Password::try_from(request.password.clone())?;
        Ok((email, first_name, last_name, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockAccountStore;
    use secrecy::ExposeSecret;

    fn request(email: &str) -> ProvisionAccountRequest {
        ProvisionAccountRequest {
            email: Secret::from(email.to_string()),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            password: Secret::from("NewPassword@2022".to_string()),
            roles: None,
        }
    }

    #[tokio::test]
    async fn test_provision_account_defaults() {
        let store = MockAccountStore::new();
        let use_case = ProvisionAccountUseCase::new(&store);

        let account = use_case.execute(request("johndoe@gmail.com")).await.unwrap();

        assert_eq!(
            account.email().as_ref().expose_secret(),
            "johndoe@gmail.com"
        );
        assert_eq!(account.first_name().as_str(), "John");
        assert_eq!(account.last_name().as_str(), "Doe");
        assert!(!account.email_verified());
        assert!(!account.is_staff());
        assert!(!account.is_superuser());
        assert!(account.is_active());
    }

    #[tokio::test]
    async fn test_plaintext_password_is_never_stored() {
        let store = MockAccountStore::new();
        let use_case = ProvisionAccountUseCase::new(&store);

        let account = use_case.execute(request("johndoe@gmail.com")).await.unwrap();

        let hash = store
            .stored_password_hash(account.email())
            .await
            .expect("account must be stored");
        assert_ne!(hash, "NewPassword@2022");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_case_insensitively() {
        let store = MockAccountStore::new();
        let use_case = ProvisionAccountUseCase::new(&store);

        use_case.execute(request("johndoe@gmail.com")).await.unwrap();
        let result = use_case.execute(request("JohnDoe@Gmail.com")).await;

        assert_eq!(result.unwrap_err(), ProvisionAccountError::EmailTaken);
    }

    #[tokio::test]
    async fn test_missing_email_reported_first() {
        let store = MockAccountStore::new();
        let use_case = ProvisionAccountUseCase::new(&store);

        let mut bad = request("");
        bad.first_name = String::new();
        let result = use_case.execute(bad).await;

        assert_eq!(
            result.unwrap_err(),
            ProvisionAccountError::InvalidEmail(EmailError::Empty)
        );
    }

    #[tokio::test]
    async fn test_missing_first_name() {
        let store = MockAccountStore::new();
        let use_case = ProvisionAccountUseCase::new(&store);

        let mut bad = request("johndoe@gmail.com");
        bad.first_name = String::new();
        let result = use_case.execute(bad).await;

        assert_eq!(
            result.unwrap_err(),
            ProvisionAccountError::InvalidName(PersonNameError::Empty("first_name"))
        );
    }

    #[tokio::test]
    async fn test_missing_last_name() {
        let store = MockAccountStore::new();
        let use_case = ProvisionAccountUseCase::new(&store);

        let mut bad = request("johndoe@gmail.com");
        bad.last_name = String::new();
        let result = use_case.execute(bad).await;

        assert_eq!(
            result.unwrap_err(),
            ProvisionAccountError::InvalidName(PersonNameError::Empty("last_name"))
        );
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let store = MockAccountStore::new();
        let use_case = ProvisionAccountUseCase::new(&store);

        let mut bad = request("johndoe@gmail.com");
        bad.password = Secret::from("password".to_string());
        let result = use_case.execute(bad).await;

        assert!(matches!(
            result,
            Err(ProvisionAccountError::WeakPassword(_))
        ));
    }

    #[tokio::test]
    async fn test_superuser_bootstrap() {
        let store = MockAccountStore::new();
        let use_case = ProvisionAccountUseCase::new(&store);

        let account = use_case
            .execute_superuser(request("admin@gmail.com"))
            .await
            .unwrap();

        assert!(account.is_staff());
        assert!(account.is_superuser());
        assert!(account.email_verified());
    }

    #[tokio::test]
    async fn test_superuser_guard_enforced() {
        let store = MockAccountStore::new();
        let use_case = ProvisionAccountUseCase::new(&store);

        use_case.execute(request("johndoe@gmail.com")).await.unwrap();
        let result = use_case.execute_superuser(request("admin@gmail.com")).await;

        assert_eq!(
            result.unwrap_err(),
            ProvisionAccountError::BootstrapForbidden
        );
    }
}
