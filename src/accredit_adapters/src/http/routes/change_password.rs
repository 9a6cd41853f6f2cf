use axum::{Json, extract::State, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use accredit_application::ChangePasswordUseCase;
use accredit_core::{AccountStore, Email, EmailClient, ItemStore, TokenBlacklist};

use crate::http::AppState;

use super::error::ApiError;
use super::health::MessageResponse;

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub email: Secret<String>,
    pub old_password: Secret<String>,
    pub new_password: Secret<String>,
    pub new_password2: Secret<String>,
}

#[tracing::instrument(name = "Change Password", skip_all)]
pub async fn change_password<A, B, I, E>(
    State(state): State<AppState<A, B, I, E>>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + 'static,
    B: TokenBlacklist + 'static,
    I: ItemStore + 'static,
    E: EmailClient + 'static,
{
    if request.new_password.expose_secret() != request.new_password2.expose_secret() {
        return Err(ApiError::InvalidInput(
            "The two password fields didn't match.".to_string(),
        ));
    }

    let email = Email::try_from(request.email)?;

    let use_case = ChangePasswordUseCase::new(state.account_store.as_ref());
    use_case
        .execute(&email, request.old_password, request.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password changed".to_string(),
    }))
}
