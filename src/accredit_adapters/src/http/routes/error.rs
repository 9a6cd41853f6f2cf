use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use accredit_application::{
    ChangePasswordError, CompleteVerificationError, ProvisionAccountError,
    RequestVerificationError,
};
use accredit_core::{AccountStoreError, EmailError, ItemError, ItemStoreError, TokenBlacklistError};

use crate::tokens::VerificationTokenError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Item not found")]
    ItemNotFound,

    #[error("Email is already verified")]
    AlreadyVerified,

    #[error("Incorrect old password")]
    IncorrectOldPassword,

    // One opaque message for expired, blacklisted, tampered, and malformed
    // tokens alike; callers learn nothing about token state.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Forbidden")]
    Forbidden,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            ApiError::InvalidInput(_)
            | ApiError::AlreadyVerified
            | ApiError::IncorrectOldPassword => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::EmailTaken => (StatusCode::CONFLICT, self.to_string()),

            ApiError::AccountNotFound | ApiError::ItemNotFound => {
                (StatusCode::NOT_FOUND, self.to_string())
            }

            ApiError::InvalidToken => (StatusCode::UNAUTHORIZED, self.to_string()),

            ApiError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),

            ApiError::UnexpectedError(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<EmailError> for ApiError {
    fn from(error: EmailError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<ItemError> for ApiError {
    fn from(error: ItemError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<AccountStoreError> for ApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::EmailTaken => ApiError::EmailTaken,
            AccountStoreError::AccountNotFound => ApiError::AccountNotFound,
            AccountStoreError::IncorrectPassword => ApiError::IncorrectOldPassword,
            AccountStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<ItemStoreError> for ApiError {
    fn from(error: ItemStoreError) -> Self {
        match error {
            ItemStoreError::ItemNotFound => ApiError::ItemNotFound,
            ItemStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<TokenBlacklistError> for ApiError {
    fn from(error: TokenBlacklistError) -> Self {
        ApiError::UnexpectedError(error.to_string())
    }
}

impl From<ProvisionAccountError> for ApiError {
    fn from(error: ProvisionAccountError) -> Self {
        match error {
            ProvisionAccountError::InvalidEmail(e) => ApiError::InvalidInput(e.to_string()),
            ProvisionAccountError::InvalidName(e) => ApiError::InvalidInput(e.to_string()),
            ProvisionAccountError::WeakPassword(e) => ApiError::InvalidInput(e.to_string()),
            ProvisionAccountError::InvalidRoles(e) => ApiError::InvalidInput(e.to_string()),
            ProvisionAccountError::EmailTaken => ApiError::EmailTaken,
            ProvisionAccountError::BootstrapForbidden => ApiError::Forbidden,
            ProvisionAccountError::StoreError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<RequestVerificationError> for ApiError {
    fn from(error: RequestVerificationError) -> Self {
        match error {
            RequestVerificationError::AccountNotFound => ApiError::AccountNotFound,
            RequestVerificationError::AlreadyVerified => ApiError::AlreadyVerified,
            RequestVerificationError::StoreError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<CompleteVerificationError> for ApiError {
    fn from(error: CompleteVerificationError) -> Self {
        match error {
            // A well-formed token pointing at a missing account is just an
            // invalid token to the caller.
            CompleteVerificationError::AccountNotFound => ApiError::InvalidToken,
            CompleteVerificationError::StoreError(e) => ApiError::UnexpectedError(e.to_string()),
            CompleteVerificationError::BlacklistError(e) => {
                ApiError::UnexpectedError(e.to_string())
            }
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::SamePassword => ApiError::InvalidInput(error.to_string()),
            ChangePasswordError::WeakPassword(e) => ApiError::InvalidInput(e.to_string()),
            ChangePasswordError::IncorrectOldPassword => ApiError::IncorrectOldPassword,
            ChangePasswordError::AccountNotFound => ApiError::AccountNotFound,
            ChangePasswordError::StoreError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<VerificationTokenError> for ApiError {
    fn from(error: VerificationTokenError) -> Self {
        match error {
            VerificationTokenError::InvalidToken
            | VerificationTokenError::TokenError(_)
            | VerificationTokenError::TokenIsBlacklisted => ApiError::InvalidToken,
            VerificationTokenError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}
