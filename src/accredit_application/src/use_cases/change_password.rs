use secrecy::{ExposeSecret, Secret};

use accredit_core::{
    AccountStore, AccountStoreError, Email, Password, PolicyViolation,
};

/// Error types for change password use case
#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("New password must be different from old password")]
    SamePassword,
    #[error("{0}")]
    WeakPassword(#[from] PolicyViolation),
    #[error("Incorrect old password")]
    IncorrectOldPassword,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Account store error: {0}")]
    StoreError(AccountStoreError),
}

/// Change password use case - verifies the old password, then stores a new
/// hash. Distinct from the email-verification token flow; no tokens here.
pub struct ChangePasswordUseCase<'a, A>
where
    A: AccountStore,
{
    account_store: &'a A,
}

impl<'a, A> ChangePasswordUseCase<'a, A>
where
    A: AccountStore,
{
    pub fn new(account_store: &'a A) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: &Email,
        old_password: Secret<String>,
        new_password: Secret<String>,
    ) -> Result<(), ChangePasswordError> {
        if old_password.expose_secret() == new_password.expose_secret() {
            return Err(ChangePasswordError::SamePassword);
        }

        let new_password = Password::try_from(new_password)?;

        let account = self
            .account_store
            .verify_credentials(email, &old_password)
            .await
            .map_err(|e| match e {
                AccountStoreError::AccountNotFound => ChangePasswordError::AccountNotFound,
                AccountStoreError::IncorrectPassword => ChangePasswordError::IncorrectOldPassword,
                other => ChangePasswordError::StoreError(other),
            })?;

        self.account_store
            .set_password(account.id(), new_password)
            .await
            .map_err(ChangePasswordError::StoreError)
    }
}
