use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use accredit_application::{ProvisionAccountRequest, ProvisionAccountUseCase};
use accredit_core::{Account, AccountStore, EmailClient, ItemStore, TokenBlacklist};

use crate::http::{AppState, dispatch_verification_email};
use crate::tokens::generate_verification_token;

use super::error::ApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub first_name: String,
    pub last_name: String,
    pub password: Secret<String>,
    pub password2: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub email_verified: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            email: account.email().as_ref().expose_secret().clone(),
            first_name: account.first_name().as_str().to_string(),
            last_name: account.last_name().as_str().to_string(),
            email_verified: account.email_verified(),
            is_staff: account.is_staff(),
            is_superuser: account.is_superuser(),
            is_active: account.is_active(),
        }
    }
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<A, B, I, E>(
    State(state): State<AppState<A, B, I, E>>,
    Json(request): Json<RegisterRequest>,
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
        .execute(ProvisionAccountRequest {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
            roles: None,
        })
        .await?;

    let token = generate_verification_token(&account, &state.token_config)?;
    dispatch_verification_email(
        state.email_client,
        &account,
        token,
        &state.frontend_url,
        &state.project_name,
    );

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}
