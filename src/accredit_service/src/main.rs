use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as HttpClient;
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgPoolOptions;

use accredit_adapters::{
    config::Settings,
    email::PostmarkEmailClient,
    http::AppState,
    persistence::{PostgresAccountStore, PostgresItemStore, PostgresTokenBlacklist},
    tokens::VerificationTokenConfig,
};
use accredit_core::Email;
use accredit_service::{AccountService, tracing::init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install()?;
    init_tracing()?;

    dotenvy::dotenv().ok();
    let settings = Settings::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(settings.postgres.url.expose_secret())
        .await?;

    sqlx::migrate!("../../migrations").run(&pg_pool).await?;

    let account_store = Arc::new(PostgresAccountStore::new(pg_pool.clone()));
    let token_blacklist = Arc::new(PostgresTokenBlacklist::new(pg_pool.clone()));
    let item_store = Arc::new(PostgresItemStore::new(pg_pool));

    let http_client = HttpClient::builder()
        .timeout(Duration::from_millis(settings.email_client.timeout_in_millis))
        .build()?;

    let email_client = Arc::new(PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::try_from(Secret::new(settings.email_client.sender.clone()))?,
        settings.email_client.auth_token.clone(),
        http_client,
    ));

    let state = AppState {
        account_store,
        token_blacklist,
        item_store,
        email_client,
        token_config: VerificationTokenConfig {
            secret: settings.verification.secret.clone(),
            token_ttl_in_seconds: settings.verification.time_to_live,
        },
        frontend_url: settings.application.frontend_url.clone(),
        project_name: settings.application.project_name.clone(),
    };

    let listener = tokio::net::TcpListener::bind(&settings.application.address).await?;

    AccountService::new(state).run(listener, None).await?;

    Ok(())
}
