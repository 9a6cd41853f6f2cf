use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use accredit_core::{AccountStore, EmailClient, Item, ItemStore, NewItem, TokenBlacklist};

use crate::http::AppState;

use super::error::ApiError;

#[derive(Deserialize)]
pub struct CreateItemRequest {
    pub title: String,
    pub description: Option<String>,
    pub price_cents: i64,
}

#[tracing::instrument(name = "List Items", skip_all)]
pub async fn list_items<A, B, I, E>(
    State(state): State<AppState<A, B, I, E>>,
) -> Result<Json<Vec<Item>>, ApiError>
where
    A: AccountStore + 'static,
    B: TokenBlacklist + 'static,
    I: ItemStore + 'static,
    E: EmailClient + 'static,
{
    let items = state.item_store.list_items().await?;
    Ok(Json(items))
}

#[tracing::instrument(name = "Create Item", skip_all)]
pub async fn create_item<A, B, I, E>(
    State(state): State<AppState<A, B, I, E>>,
    Json(request): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + 'static,
    B: TokenBlacklist + 'static,
    I: ItemStore + 'static,
    E: EmailClient + 'static,
{
    let new_item = NewItem::parse(request.title, request.description, request.price_cents)?;
    let item = state.item_store.add_item(new_item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}
