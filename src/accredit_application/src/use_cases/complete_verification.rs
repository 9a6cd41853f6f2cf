use accredit_core::{
    Account, AccountId, AccountStore, AccountStoreError, TokenBlacklist, TokenBlacklistError,
    VerifiedTransition,
};

/// Error types for completing email verification
#[derive(Debug, thiserror::Error)]
pub enum CompleteVerificationError {
    #[error("Account not found")]
    AccountNotFound,
    #[error("Account store error: {0}")]
    StoreError(AccountStoreError),
    #[error("Token blacklist error: {0}")]
    BlacklistError(#[from] TokenBlacklistError),
}

/// Result of consuming a verification token whose claims already passed
/// signature, scope, and expiry checks.
#[derive(Debug)]
pub enum VerificationOutcome {
    /// This call performed the unverified -> verified transition and
    /// blacklisted the token.
    Verified(Account),
    /// Another request won the race; nothing was changed.
    AlreadyVerified,
}

/// Complete verification use case - flips the verified flag exactly once
///
/// The store's compare-and-set serializes racing requests: only the caller
/// that observes the transition registers the token in the blacklist.
pub struct CompleteVerificationUseCase<'a, A, B>
where
    A: AccountStore,
    B: TokenBlacklist,
{
    account_store: &'a A,
    token_blacklist: &'a B,
}

impl<'a, A, B> CompleteVerificationUseCase<'a, A, B>
where
    A: AccountStore,
    B: TokenBlacklist,
{
    pub fn new(account_store: &'a A, token_blacklist: &'a B) -> Self {
        Self {
            account_store,
            token_blacklist,
        }
    }

    #[tracing::instrument(name = "CompleteVerificationUseCase::execute", skip(self, token))]
    pub async fn execute(
        &self,
        account_id: AccountId,
        token: &str,
    ) -> Result<VerificationOutcome, CompleteVerificationError> {
        let transition = self
            .account_store
            .mark_email_verified(account_id)
            .await
            .map_err(|e| match e {
                AccountStoreError::AccountNotFound => CompleteVerificationError::AccountNotFound,
                other => CompleteVerificationError::StoreError(other),
            })?;

        match transition {
            VerifiedTransition::Transitioned => {
                self.token_blacklist.add_token(token.to_string()).await?;
                let account = self
                    .account_store
                    .get_by_id(account_id)
                    .await
                    .map_err(CompleteVerificationError::StoreError)?;
                Ok(VerificationOutcome::Verified(account))
            }
            VerifiedTransition::AlreadyVerified => Ok(VerificationOutcome::AlreadyVerified),
        }
    }
}
