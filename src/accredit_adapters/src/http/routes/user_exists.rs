use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};

use accredit_core::{AccountStore, EmailClient, ItemStore, TokenBlacklist};

use crate::http::AppState;

use super::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct UserExistsResponse {
    pub message: String,
    pub user_exists: bool,
}

/// Reports whether any account exists, so a fresh install can decide to show
/// the admin-setup screen.
#[tracing::instrument(name = "User Exists", skip_all)]
pub async fn user_exists<A, B, I, E>(
    State(state): State<AppState<A, B, I, E>>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + 'static,
    B: TokenBlacklist + 'static,
    I: ItemStore + 'static,
    E: EmailClient + 'static,
{
    let exists = state.account_store.any_account_exists().await?;

    let message = if exists { "User exists" } else { "No user exists" };

    Ok(Json(UserExistsResponse {
        message: message.to_string(),
        user_exists: exists,
    }))
}
