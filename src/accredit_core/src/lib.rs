pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountId, NewAccount, RoleDefaults, SuperuserError, VerifiedTransition},
    email::{Email, EmailError},
    item::{Item, ItemError, NewItem},
    password::{Password, PasswordRule, PolicyViolation},
    person_name::{PersonName, PersonNameError},
};

pub use ports::{
    repositories::{
        AccountStore, AccountStoreError, ItemStore, ItemStoreError, TokenBlacklist,
        TokenBlacklistError,
    },
    services::EmailClient,
};
