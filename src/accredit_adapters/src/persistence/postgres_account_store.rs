use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use accredit_core::{
    Account, AccountId, AccountStore, AccountStoreError, Email, NewAccount, Password, PersonName,
    VerifiedTransition,
};

use super::password_hash::{compute_password_hash, verify_password_hash};

pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresAccountStore { pool }
    }
}

const ACCOUNT_COLUMNS: &str = "id, email, first_name, last_name, email_verified, \
                               is_staff, is_superuser, is_active, date_joined, last_login";

fn account_from_row(row: &PgRow) -> Result<Account, AccountStoreError> {
    let email: String = row
        .try_get("email")
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
    let email = Email::try_from(Secret::from(email))
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

    let first_name: String = row
        .try_get("first_name")
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
    let last_name: String = row
        .try_get("last_name")
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

    let first_name = PersonName::parse("first_name", first_name)
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
    let last_name = PersonName::parse("last_name", last_name)
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

    let read = |e: sqlx::Error| AccountStoreError::UnexpectedError(e.to_string());

    Ok(Account::new(
        row.try_get("id").map_err(read)?,
        email,
        first_name,
        last_name,
        row.try_get("email_verified").map_err(read)?,
        row.try_get("is_staff").map_err(read)?,
        row.try_get("is_superuser").map_err(read)?,
        row.try_get("is_active").map_err(read)?,
        row.try_get("date_joined").map_err(read)?,
        row.try_get("last_login").map_err(read)?,
    ))
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn add_account(&self, new_account: NewAccount) -> Result<Account, AccountStoreError> {
        let password = new_account.password().as_ref().clone();
        let password_hash = compute_password_hash(password)
            .await
            .map_err(AccountStoreError::UnexpectedError)?;

        let row = sqlx::query(&format!(
            r#"
                INSERT INTO accounts
                    (email, first_name, last_name, password_hash,
                     email_verified, is_staff, is_superuser)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(new_account.email().as_ref().expose_secret())
        .bind(new_account.first_name().as_str())
        .bind(new_account.last_name().as_str())
        .bind(password_hash.expose_secret())
        .bind(new_account.email_verified())
        .bind(new_account.roles().is_staff)
        .bind(new_account.roles().is_superuser)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The unique index on LOWER(email) enforces case-insensitive
            // uniqueness; surface it as a field-level error, not a raw
            // constraint failure.
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint().is_some() {
                    return AccountStoreError::EmailTaken;
                }
            }
            AccountStoreError::UnexpectedError(e.to_string())
        })?;

        account_from_row(&row)
    }

    #[tracing::instrument(name = "Retrieving account by email from PostgreSQL", skip_all)]
    async fn get_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let row = sqlx::query(&format!(
            r#"
                SELECT {ACCOUNT_COLUMNS}
                FROM accounts
                WHERE LOWER(email) = LOWER($1)
            "#
        ))
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(AccountStoreError::AccountNotFound);
        };

        account_from_row(&row)
    }

    #[tracing::instrument(name = "Retrieving account by id from PostgreSQL", skip_all)]
    async fn get_by_id(&self, id: AccountId) -> Result<Account, AccountStoreError> {
        let row = sqlx::query(&format!(
            r#"
                SELECT {ACCOUNT_COLUMNS}
                FROM accounts
                WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(AccountStoreError::AccountNotFound);
        };

        account_from_row(&row)
    }

    #[tracing::instrument(name = "Checking for existing accounts in PostgreSQL", skip_all)]
    async fn any_account_exists(&self) -> Result<bool, AccountStoreError> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM accounts) AS present")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        row.try_get("present")
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "Validating credentials in PostgreSQL", skip_all)]
    async fn verify_credentials(
        &self,
        email: &Email,
        password: &Secret<String>,
    ) -> Result<Account, AccountStoreError> {
        let row = sqlx::query(&format!(
            r#"
                SELECT {ACCOUNT_COLUMNS}, password_hash
                FROM accounts
                WHERE LOWER(email) = LOWER($1)
            "#
        ))
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(AccountStoreError::AccountNotFound);
        };

        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        verify_password_hash(Secret::from(password_hash), password.clone())
            .await
            .map_err(|_| AccountStoreError::IncorrectPassword)?;

        account_from_row(&row)
    }

    #[tracing::instrument(name = "Setting new password in PostgreSQL", skip_all)]
    async fn set_password(
        &self,
        id: AccountId,
        new_password: Password,
    ) -> Result<(), AccountStoreError> {
        let password_hash = compute_password_hash(new_password.as_ref().clone())
            .await
            .map_err(AccountStoreError::UnexpectedError)?;

        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET password_hash = $1
                WHERE id = $2
            "#,
        )
        .bind(password_hash.expose_secret())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Marking email verified in PostgreSQL", skip_all)]
    async fn mark_email_verified(
        &self,
        id: AccountId,
    ) -> Result<VerifiedTransition, AccountStoreError> {
        // Single-row compare-and-set: of two racing requests, only one sees
        // rows_affected == 1.
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET email_verified = TRUE
                WHERE id = $1 AND email_verified = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 1 {
            return Ok(VerifiedTransition::Transitioned);
        }

        // No row changed: either the flag was already set or the id is gone.
        let account = self.get_by_id(id).await?;
        if account.email_verified() {
            Ok(VerifiedTransition::AlreadyVerified)
        } else {
            Err(AccountStoreError::UnexpectedError(
                "email_verified CAS made no progress".to_string(),
            ))
        }
    }
}
