pub mod routes;

use std::sync::Arc;

use accredit_core::{Account, AccountStore, EmailClient, ItemStore, TokenBlacklist};

use crate::tokens::VerificationTokenConfig;

/// Shared state for the HTTP routes. Stores are behind `Arc` so the state
/// clones cheaply per request.
pub struct AppState<A, B, I, E>
where
    A: AccountStore,
    B: TokenBlacklist,
    I: ItemStore,
    E: EmailClient,
{
    pub account_store: Arc<A>,
    pub token_blacklist: Arc<B>,
    pub item_store: Arc<I>,
    pub email_client: Arc<E>,
    pub token_config: VerificationTokenConfig,
    pub frontend_url: String,
    pub project_name: String,
}

impl<A, B, I, E> Clone for AppState<A, B, I, E>
where
    A: AccountStore,
    B: TokenBlacklist,
    I: ItemStore,
    E: EmailClient,
{
    fn clone(&self) -> Self {
        Self {
            account_store: Arc::clone(&self.account_store),
            token_blacklist: Arc::clone(&self.token_blacklist),
            item_store: Arc::clone(&self.item_store),
            email_client: Arc::clone(&self.email_client),
            token_config: self.token_config.clone(),
            frontend_url: self.frontend_url.clone(),
            project_name: self.project_name.clone(),
        }
    }
}

/// Fire-and-forget delivery of the verification email, mirroring the
/// out-of-band transport in the token lifecycle: a failed send never fails
/// the request that triggered it.
pub(crate) fn dispatch_verification_email<E>(
    email_client: Arc<E>,
    account: &Account,
    token: String,
    frontend_url: &str,
    project_name: &str,
) where
    E: EmailClient + 'static,
{
    let recipient = account.email().clone();
    let subject = format!("Verify Your {} Account", project_name);
    let content = format!(
        "Hi {},\n\nFollow the link to verify your email address:\n{}/auth/verify-email/{}\n",
        account.short_name(),
        frontend_url,
        token
    );

    tokio::spawn(async move {
        if let Err(e) = email_client.send_email(&recipient, &subject, &content).await {
            tracing::error!("Failed to send verification email: {}", e);
        }
    });
}
