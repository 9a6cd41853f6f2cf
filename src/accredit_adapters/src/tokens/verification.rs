use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, ser::SerializeStruct};
use thiserror::Error;

use accredit_core::{Account, AccountId, TokenBlacklist};

/// Scope claim restricting a token to completing email verification. Tokens
/// carrying any other scope (e.g. a password-reset token) are rejected.
pub const EMAIL_VERIFICATION_SCOPE: &str = "email_verification";

#[derive(Clone)]
pub struct VerificationTokenConfig {
    pub secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl VerificationTokenConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

/// Internal token failure reasons. Callers outside this module collapse all
/// of these into one opaque "invalid token" so no token state leaks.
#[derive(Debug, Error)]
pub enum VerificationTokenError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Token is blacklisted")]
    TokenIsBlacklisted,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct VerificationClaims {
    pub user_id: AccountId,
    pub email: Secret<String>,
    pub scope: String,
    pub exp: usize,
}

impl Serialize for VerificationClaims {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("VerificationClaims", 4)?;
        state.serialize_field("user_id", &self.user_id)?;
        state.serialize_field("email", &self.email.expose_secret())?;
        state.serialize_field("scope", &self.scope)?;
        state.serialize_field("exp", &self.exp)?;
        state.end()
    }
}

/// Create a signed, time-limited verification token for `account`.
///
/// Stateless: nothing is recorded until the token is consumed.
pub fn generate_verification_token(
    account: &Account,
    config: &VerificationTokenConfig,
) -> Result<String, VerificationTokenError> {
    let delta = chrono::Duration::try_seconds(config.token_ttl_in_seconds).ok_or(
        VerificationTokenError::UnexpectedError(
            "Failed to create token duration".to_string(),
        ),
    )?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(VerificationTokenError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    let exp: usize = exp.try_into().map_err(|_| {
        VerificationTokenError::UnexpectedError("Failed to cast i64 to usize".to_string())
    })?;

    let claims = VerificationClaims {
        user_id: account.id(),
        email: account.email().as_ref().clone(),
        scope: EMAIL_VERIFICATION_SCOPE.to_string(),
        exp,
    };

    create_token(&claims, config.as_bytes())
}

/// Check a verification token: blacklist first, then signature and expiry,
/// then scope. Reads the blacklist but never writes it; consumption is the
/// caller's responsibility once the verified flag has been set.
pub async fn validate_verification_token(
    token: &str,
    token_blacklist: &dyn TokenBlacklist,
    config: &VerificationTokenConfig,
) -> Result<VerificationClaims, VerificationTokenError> {
    let is_blacklisted = token_blacklist
        .contains_token(token)
        .await
        .map_err(|e| VerificationTokenError::UnexpectedError(e.to_string()))?;

    if is_blacklisted {
        return Err(VerificationTokenError::TokenIsBlacklisted);
    }

    let claims = decode::<VerificationClaims>(
        token,
        &DecodingKey::from_secret(config.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(VerificationTokenError::TokenError)?;

    if claims.scope != EMAIL_VERIFICATION_SCOPE {
        return Err(VerificationTokenError::InvalidToken);
    }

    Ok(claims)
}

// Sign claims with the shared secret (HS256)
fn create_token(
    claims: &VerificationClaims,
    secret: &[u8],
) -> Result<String, VerificationTokenError> {
    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(VerificationTokenError::TokenError)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use secrecy::{ExposeSecret, Secret};

    use accredit_core::{Account, Email, PersonName};

    use crate::persistence::hashset_token_blacklist::HashSetTokenBlacklist;

    use super::*;

    fn token_config() -> VerificationTokenConfig {
        VerificationTokenConfig {
            secret: Secret::from("secret".to_owned()),
            token_ttl_in_seconds: 600,
        }
    }

    fn account() -> Account {
        Account::new(
            7,
            Email::try_from(Secret::from("test@example.com".to_owned())).unwrap(),
            PersonName::parse("first_name", "John".to_string()).unwrap(),
            PersonName::parse("last_name", "Doe".to_string()).unwrap(),
            false,
            false,
            false,
            true,
            Utc::now(),
            None,
        )
    }

    #[tokio::test]
    async fn test_generate_verification_token() {
        let config = token_config();
        let token = generate_verification_token(&account(), &config).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[tokio::test]
    async fn test_round_trip_returns_account_claims() {
        let config = token_config();
        let blacklist = HashSetTokenBlacklist::default();
        let token = generate_verification_token(&account(), &config).unwrap();

        let claims = validate_verification_token(&token, &blacklist, &config)
            .await
            .unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email.expose_secret(), "test@example.com");
        assert_eq!(claims.scope, EMAIL_VERIFICATION_SCOPE);
        assert!(claims.exp > Utc::now().timestamp() as usize);
    }

    #[tokio::test]
    async fn test_malformed_token_is_rejected() {
        let config = token_config();
        let blacklist = HashSetTokenBlacklist::default();
        let result = validate_verification_token("invalid_token", &blacklist, &config).await;
        assert!(matches!(
            result,
            Err(VerificationTokenError::TokenError(_))
        ));
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_rejected() {
        let config = token_config();
        let other = VerificationTokenConfig {
            secret: Secret::from("other_secret".to_owned()),
            token_ttl_in_seconds: 600,
        };
        let blacklist = HashSetTokenBlacklist::default();
        let token = generate_verification_token(&account(), &other).unwrap();

        let result = validate_verification_token(&token, &blacklist, &config).await;
        assert!(matches!(
            result,
            Err(VerificationTokenError::TokenError(_))
        ));
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let config = VerificationTokenConfig {
            secret: Secret::from("secret".to_owned()),
            // Large enough negative TTL to defeat the default decode leeway.
            token_ttl_in_seconds: -120,
        };
        let blacklist = HashSetTokenBlacklist::default();
        let token = generate_verification_token(&account(), &config).unwrap();

        let result = validate_verification_token(&token, &blacklist, &config).await;
        assert!(matches!(
            result,
            Err(VerificationTokenError::TokenError(_))
        ));
    }

    #[tokio::test]
    async fn test_foreign_scope_is_rejected() {
        let config = token_config();
        let blacklist = HashSetTokenBlacklist::default();

        let claims = VerificationClaims {
            user_id: 7,
            email: Secret::from("test@example.com".to_owned()),
            scope: "password_reset".to_string(),
            exp: (Utc::now().timestamp() + 600) as usize,
        };
        let token = create_token(&claims, config.as_bytes()).unwrap();

        let result = validate_verification_token(&token, &blacklist, &config).await;
        assert!(matches!(result, Err(VerificationTokenError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_blacklisted_token_is_rejected_before_decoding() {
        let config = token_config();
        let blacklist = HashSetTokenBlacklist::default();
        let token = generate_verification_token(&account(), &config).unwrap();

        blacklist.add_token(token.clone()).await.unwrap();

        let result = validate_verification_token(&token, &blacklist, &config).await;
        assert!(matches!(
            result,
            Err(VerificationTokenError::TokenIsBlacklisted)
        ));
    }
}
