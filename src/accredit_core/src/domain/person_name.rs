use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PersonNameError {
    #[error("The {0} value must be set")]
    Empty(&'static str),
}

/// Non-empty name component (first or last name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Parse a name, reporting the violated field by name on failure.
    pub fn parse(field: &'static str, value: String) -> Result<Self, PersonNameError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(PersonNameError::Empty(field));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
