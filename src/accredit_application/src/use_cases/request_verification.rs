use accredit_core::{Account, AccountStore, AccountStoreError, Email};

/// Error types for requesting a fresh verification token
#[derive(Debug, thiserror::Error)]
pub enum RequestVerificationError {
    #[error("Account not found")]
    AccountNotFound,
    #[error("Email is already verified")]
    AlreadyVerified,
    #[error("Account store error: {0}")]
    StoreError(AccountStoreError),
}

/// Request verification use case - resolves the account a token should be
/// issued for. Token signing and email delivery stay in the adapter layer.
pub struct RequestVerificationUseCase<'a, A>
where
    A: AccountStore,
{
    account_store: &'a A,
}

impl<'a, A> RequestVerificationUseCase<'a, A>
where
    A: AccountStore,
{
    pub fn new(account_store: &'a A) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "RequestVerificationUseCase::execute", skip_all)]
    pub async fn execute(&self, email: &Email) -> Result<Account, RequestVerificationError> {
        let account = self
            .account_store
            .get_by_email(email)
            .await
            .map_err(|e| match e {
                AccountStoreError::AccountNotFound => RequestVerificationError::AccountNotFound,
                other => RequestVerificationError::StoreError(other),
            })?;

        if account.email_verified() {
            return Err(RequestVerificationError::AlreadyVerified);
        }

        Ok(account)
    }
}
