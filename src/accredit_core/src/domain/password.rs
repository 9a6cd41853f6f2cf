use secrecy::{ExposeSecret, Secret};

/// Individual password-strength rules, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    Digit,
    Letter,
    Uppercase,
    Lowercase,
}

impl PasswordRule {
    pub fn message(&self) -> &'static str {
        match self {
            PasswordRule::MinLength => "Password must be at least 8 characters long.",
            PasswordRule::Digit => "Password must contain at least 1 digit.",
            PasswordRule::Letter => "Password must contain at least 1 letter.",
            PasswordRule::Uppercase => "Password must contain at least 1 uppercase letter.",
            PasswordRule::Lowercase => "Password must contain at least 1 lowercase letter.",
        }
    }
}

/// Every unmet password rule, in deterministic rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyViolation {
    violations: Vec<PasswordRule>,
}

impl std::error::Error for PolicyViolation {}

impl PolicyViolation {
    pub fn violations(&self) -> &[PasswordRule] {
        &self.violations
    }
}

impl std::fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages = self
            .violations
            .iter()
            .map(PasswordRule::message)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}", messages)
    }
}

/// Password that satisfies the strength policy.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn as_ref(&self) -> &Secret<String> {
        &self.0
    }

    pub fn help_text() -> &'static str {
        "Your password must be at least 8 characters long and contain at least 1 digit and 1 letter."
    }

    /// Run every rule against `candidate` and return the unmet ones.
    ///
    /// All checks run independently so every violation is reported at once.
    pub fn check_rules(candidate: &str) -> Vec<PasswordRule> {
        let mut violations = Vec::new();

        if candidate.chars().count() < 8 {
            violations.push(PasswordRule::MinLength);
        }
        if !candidate.chars().any(|c| c.is_ascii_digit()) {
            violations.push(PasswordRule::Digit);
        }
        if !candidate.chars().any(|c| c.is_alphabetic()) {
            violations.push(PasswordRule::Letter);
        }
        if !candidate.chars().any(|c| c.is_uppercase()) {
            violations.push(PasswordRule::Uppercase);
        }
        if !candidate.chars().any(|c| c.is_lowercase()) {
            violations.push(PasswordRule::Lowercase);
        }

        violations
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = PolicyViolation;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let violations = Self::check_rules(value.expose_secret());

        if violations.is_empty() {
            Ok(Self(value))
        } else {
            Err(PolicyViolation { violations })
        }
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Password {}
