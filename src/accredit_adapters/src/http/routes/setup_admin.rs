use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use accredit_application::{ProvisionAccountRequest, ProvisionAccountUseCase};
use accredit_core::{AccountStore, EmailClient, ItemStore, TokenBlacklist};

use crate::http::AppState;

use super::error::ApiError;
use super::register::AccountResponse;

#[derive(Deserialize)]
pub struct SetupAdminRequest {
    pub email: Secret<String>,
    pub first_name: String,
    pub last_name: String,
    pub password: Secret<String>,
    pub password2: Secret<String>,
}

/// Provision the first superuser. Closed with 403 as soon as any account
/// exists. The account comes out verified, so no email is dispatched.
#[tracing::instrument(name = "Setup Admin", skip_all)]
pub async fn setup_admin<A, B, I, E>(
    State(state): State<AppState<A, B, I, E>>,
    Json(request): Json<SetupAdminRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + 'static,
    B: TokenBlacklist + 'static,
    I: ItemStore + 'static,
    E: EmailClient + 'static,
{
    if request.password.expose_secret() != request.password2.expose_secret() {
        return Err(ApiError::InvalidInput(
            "The two password fields didn't match.".to_string(),
        ));
    }

    let use_case = ProvisionAccountUseCase::new(state.account_store.as_ref());
    let account = use_case
        .execute_superuser(ProvisionAccountRequest {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
            roles: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}
