use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use accredit_application::RequestVerificationUseCase;
use accredit_core::{AccountStore, Email, EmailClient, ItemStore, TokenBlacklist};

use crate::http::{AppState, dispatch_verification_email};
use crate::tokens::generate_verification_token;

use super::error::ApiError;
use super::health::MessageResponse;

#[derive(Deserialize)]
pub struct ResendVerificationRequest {
    pub email: Secret<String>,
}

/// Issue a fresh verification token for an unverified account and re-send
/// the verification email. Previously issued tokens stay valid until they
/// expire or are consumed.
#[tracing::instrument(name = "Resend Verification", skip_all)]
pub async fn resend_verification<A, B, I, E>(
    State(state): State<AppState<A, B, I, E>>,
    Json(request): Json<ResendVerificationRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + 'static,
    B: TokenBlacklist + 'static,
    I: ItemStore + 'static,
    E: EmailClient + 'static,
{
    let email = Email::try_from(request.email)?;

    let use_case = RequestVerificationUseCase::new(state.account_store.as_ref());
    let account = use_case.execute(&email).await?;

    let token = generate_verification_token(&account, &state.token_config)?;
    dispatch_verification_email(
        state.email_client,
        &account,
        token,
        &state.frontend_url,
        &state.project_name,
    );

    Ok(Json(MessageResponse {
        message: "Verification email sent".to_string(),
    }))
}
