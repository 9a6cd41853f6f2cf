//! # Accredit - Account Provisioning & Email Verification Library
//!
//! This is a facade crate that re-exports all public APIs from the accredit
//! service components. Use this crate to get access to account management,
//! email verification, and the trivial inventory model in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `PersonName`, `Account`, `Item`
//! - **Repository traits**: `AccountStore`, `TokenBlacklist`, `ItemStore`
//! - **Use cases**: `ProvisionAccountUseCase`, `CompleteVerificationUseCase`, etc.
//! - **Adapters**: `PostgresAccountStore`, `PostgresTokenBlacklist`,
//!   `PostmarkEmailClient`, the verification-token module, etc.
//! - **Service**: `AccountService` - The main entry point for the HTTP service

/// Core domain types and value objects
pub mod core {
    pub use accredit_core::*;
}

// Re-export most commonly used core types at the root level
pub use accredit_core::{
    Account, AccountId, Email, EmailError, Item, NewAccount, NewItem, PersonName, PersonNameError,
    Password, PasswordRule, PolicyViolation, RoleDefaults, VerifiedTransition,
};

/// Repository trait definitions
pub mod repositories {
    pub use accredit_core::{
        AccountStore, AccountStoreError, ItemStore, ItemStoreError, TokenBlacklist,
        TokenBlacklistError,
    };
}

pub use accredit_core::{
    AccountStore, AccountStoreError, EmailClient, ItemStore, ItemStoreError, TokenBlacklist,
    TokenBlacklistError,
};

/// Application use cases
pub mod use_cases {
    pub use accredit_application::*;
}

pub use accredit_application::{
    ChangePasswordUseCase, CompleteVerificationUseCase, ProvisionAccountUseCase,
    RequestVerificationUseCase, VerificationOutcome,
};

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use accredit_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use accredit_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use accredit_adapters::email::*;
    }

    /// Verification token utilities
    pub mod tokens {
        pub use accredit_adapters::tokens::*;
    }

    /// Configuration
    pub mod config {
        pub use accredit_adapters::config::*;
    }
}

pub use accredit_adapters::{
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{
        HashMapAccountStore, HashMapItemStore, HashSetTokenBlacklist, PostgresAccountStore,
        PostgresItemStore, PostgresTokenBlacklist,
    },
    tokens::{
        EMAIL_VERIFICATION_SCOPE, VerificationClaims, VerificationTokenConfig,
        generate_verification_token, validate_verification_token,
    },
};

/// Main account service
pub use accredit_service::AccountService;

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
