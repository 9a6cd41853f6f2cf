use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{email::Email, password::Password, person_name::PersonName};

pub type AccountId = i64;

/// Role flags applied when provisioning an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleDefaults {
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl RoleDefaults {
    pub fn superuser() -> Self {
        Self {
            is_staff: true,
            is_superuser: true,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SuperuserError {
    #[error("Superuser must have is_staff=True")]
    NotStaff,
    #[error("Superuser must have is_superuser=True")]
    NotSuperuser,
}

/// Outcome of the email-verified compare-and-set.
///
/// Exactly one of two racing verification requests observes `Transitioned`;
/// the other sees `AlreadyVerified` and must not repeat the state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifiedTransition {
    Transitioned,
    AlreadyVerified,
}

/// Account that has not been persisted yet.
///
/// Only [`AccountStore::add_account`](crate::AccountStore::add_account) may
/// turn this into an [`Account`] identity. The password travels as plaintext
/// only up to the store, which hashes it before persistence.
#[derive(Debug, Clone)]
pub struct NewAccount {
    email: Email,
    first_name: PersonName,
    last_name: PersonName,
    password: Password,
    roles: RoleDefaults,
    email_verified: bool,
}

impl NewAccount {
    /// Ordinary registration: role flags default to false, email unverified.
    pub fn registration(
        email: Email,
        first_name: PersonName,
        last_name: PersonName,
        password: Password,
        roles: RoleDefaults,
    ) -> Self {
        Self {
            email,
            first_name,
            last_name,
            password,
            roles,
            email_verified: false,
        }
    }

    /// Administrator bootstrap: staff and superuser flags default to true and
    /// the email is considered verified up front. Fails if either flag would
    /// end up false after defaulting.
    pub fn superuser(
        email: Email,
        first_name: PersonName,
        last_name: PersonName,
        password: Password,
        roles: Option<RoleDefaults>,
    ) -> Result<Self, SuperuserError> {
        let roles = roles.unwrap_or_else(RoleDefaults::superuser);

        if !roles.is_staff {
            return Err(SuperuserError::NotStaff);
        }
        if !roles.is_superuser {
            return Err(SuperuserError::NotSuperuser);
        }

        Ok(Self {
            email,
            first_name,
            last_name,
            password,
            roles,
            email_verified: true,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn roles(&self) -> RoleDefaults {
        self.roles
    }

    pub fn email_verified(&self) -> bool {
        self.email_verified
    }
}

/// Persisted account row. The password hash never leaves the store layer.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    email: Email,
    first_name: PersonName,
    last_name: PersonName,
    email_verified: bool,
    is_staff: bool,
    is_superuser: bool,
    is_active: bool,
    date_joined: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl Account {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AccountId,
        email: Email,
        first_name: PersonName,
        last_name: PersonName,
        email_verified: bool,
        is_staff: bool,
        is_superuser: bool,
        is_active: bool,
        date_joined: DateTime<Utc>,
        last_login: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            email,
            first_name,
            last_name,
            email_verified,
            is_staff,
            is_superuser,
            is_active,
            date_joined,
            last_login,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn short_name(&self) -> &str {
        self.first_name.as_str()
    }

    pub fn email_verified(&self) -> bool {
        self.email_verified
    }

    pub fn is_staff(&self) -> bool {
        self.is_staff
    }

    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn date_joined(&self) -> DateTime<Utc> {
        self.date_joined
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn fields() -> (Email, PersonName, PersonName, Password) {
        (
            Email::try_from(Secret::from("johndoe@gmail.com".to_string())).unwrap(),
            PersonName::parse("first_name", "John".to_string()).unwrap(),
            PersonName::parse("last_name", "Doe".to_string()).unwrap(),
            Password::try_from(Secret::from("NewPassword@2022".to_string())).unwrap(),
        )
    }

    #[test]
    fn test_registration_defaults() {
        let (email, first, last, password) = fields();
        let new_account =
            NewAccount::registration(email, first, last, password, RoleDefaults::default());

        assert!(!new_account.email_verified());
        assert!(!new_account.roles().is_staff);
        assert!(!new_account.roles().is_superuser);
    }

    #[test]
    fn test_superuser_defaults() {
        let (email, first, last, password) = fields();
        let new_account = NewAccount::superuser(email, first, last, password, None).unwrap();

        assert!(new_account.email_verified());
        assert!(new_account.roles().is_staff);
        assert!(new_account.roles().is_superuser);
    }

    #[test]
    fn test_superuser_rejects_non_staff_roles() {
        let (email, first, last, password) = fields();
        let result = NewAccount::superuser(
            email,
            first,
            last,
            password,
            Some(RoleDefaults {
                is_staff: false,
                is_superuser: true,
            }),
        );

        assert_eq!(result.unwrap_err(), SuperuserError::NotStaff);
    }

    #[test]
    fn test_superuser_rejects_non_superuser_roles() {
        let (email, first, last, password) = fields();
        let result = NewAccount::superuser(
            email,
            first,
            last,
            password,
            Some(RoleDefaults {
                is_staff: true,
                is_superuser: false,
            }),
        );

        assert_eq!(result.unwrap_err(), SuperuserError::NotSuperuser);
    }
}
