use sqlx::{PgPool, Row};

use accredit_core::{TokenBlacklist, TokenBlacklistError};

/// Append-only blacklist table. The unique index on the token text makes the
/// insert idempotent, so racing consumers can both call `add_token` safely.
#[derive(Clone)]
pub struct PostgresTokenBlacklist {
    pool: PgPool,
}

impl PostgresTokenBlacklist {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl TokenBlacklist for PostgresTokenBlacklist {
    #[tracing::instrument(name = "Blacklisting token in PostgreSQL", skip_all)]
    async fn add_token(&self, token: String) -> Result<(), TokenBlacklistError> {
        sqlx::query(
            r#"
                INSERT INTO blacklisted_tokens (token)
                VALUES ($1)
                ON CONFLICT (token) DO NOTHING
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| TokenBlacklistError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "Checking token blacklist in PostgreSQL", skip_all)]
    async fn contains_token(&self, token: &str) -> Result<bool, TokenBlacklistError> {
        let row = sqlx::query(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM blacklisted_tokens WHERE token = $1
                ) AS present
            "#,
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TokenBlacklistError::DatabaseError(e.to_string()))?;

        row.try_get("present")
            .map_err(|e| TokenBlacklistError::DatabaseError(e.to_string()))
    }
}
