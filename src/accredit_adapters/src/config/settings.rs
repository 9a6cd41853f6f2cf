use secrecy::Secret;
use serde::Deserialize;

use super::constants::prod;

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub address: String,
    pub frontend_url: String,
    pub project_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VerificationSettings {
    pub secret: Secret<String>,
    /// Verification-token lifetime in seconds.
    pub time_to_live: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

/// Service configuration: a `config.json` file (optional) layered under
/// `ACCREDIT__`-prefixed environment variables, e.g.
/// `ACCREDIT__POSTGRES__URL` or `ACCREDIT__VERIFICATION__SECRET`.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub postgres: PostgresSettings,
    pub verification: VerificationSettings,
    pub email_client: EmailClientSettings,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("application.address", prod::APP_ADDRESS)?
            .set_default("application.frontend_url", "http://localhost:5173")?
            .set_default("application.project_name", "Accredit")?
            .set_default("verification.time_to_live", 24 * 60 * 60)?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default(
                "email_client.timeout_in_millis",
                prod::email_client::TIMEOUT.as_millis() as u64,
            )?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("ACCREDIT").separator("__"))
            .build()?
            .try_deserialize()
    }
}
