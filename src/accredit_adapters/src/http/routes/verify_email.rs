use axum::{Json, extract::State, response::IntoResponse, response::Response};
use serde::Deserialize;

use accredit_application::{CompleteVerificationUseCase, VerificationOutcome};
use accredit_core::{AccountStore, EmailClient, ItemStore, TokenBlacklist};

use crate::http::AppState;
use crate::tokens::validate_verification_token;

use super::error::ApiError;
use super::health::MessageResponse;
use super::register::AccountResponse;

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// Consume a verification token. The token is checked (blacklist, signature,
/// expiry, scope) before the verified flag is flipped; the call that performs
/// the flip also blacklists the token, so a second submission of the same
/// token comes back 401.
#[tracing::instrument(name = "Verify Email", skip_all)]
pub async fn verify_email<A, B, I, E>(
    State(state): State<AppState<A, B, I, E>>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<Response, ApiError>
where
    A: AccountStore + 'static,
    B: TokenBlacklist + 'static,
    I: ItemStore + 'static,
    E: EmailClient + 'static,
{
    let claims = validate_verification_token(
        &request.token,
        state.token_blacklist.as_ref(),
        &state.token_config,
    )
    .await?;

    let use_case = CompleteVerificationUseCase::new(
        state.account_store.as_ref(),
        state.token_blacklist.as_ref(),
    );
    let outcome = use_case.execute(claims.user_id, &request.token).await?;

    match outcome {
        VerificationOutcome::Verified(account) => {
            Ok(Json(AccountResponse::from(&account)).into_response())
        }
        VerificationOutcome::AlreadyVerified => Ok(Json(MessageResponse {
            message: "Email already verified".to_string(),
        })
        .into_response()),
    }
}
