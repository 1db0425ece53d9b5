use std::fmt;

use crate::flag::errors::FlagError;
use crate::flag::errors::FlagIdError;

/// Named flag owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub id: FlagId,
    pub value: String,
}

impl Flag {
    /// Build a flag from raw input.
    ///
    /// # Errors
    /// * `InvalidFlag` - Id or value is empty
    pub fn new(id: String, value: String) -> Result<Self, FlagError> {
        if value.is_empty() {
            return Err(FlagError::InvalidFlag);
        }
        let id = FlagId::new(id).map_err(|_| FlagError::InvalidFlag)?;
        Ok(Self { id, value })
    }
}

/// Flag identifier, unique per owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlagId(String);

impl FlagId {
    pub fn new(id: String) -> Result<Self, FlagIdError> {
        if id.is_empty() {
            return Err(FlagIdError::Empty);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_requires_id_and_value() {
        assert!(matches!(
            Flag::new("".to_string(), "true".to_string()),
            Err(FlagError::InvalidFlag)
        ));
        assert!(matches!(
            Flag::new("dark-mode".to_string(), "".to_string()),
            Err(FlagError::InvalidFlag)
        ));

        let flag = Flag::new("dark-mode".to_string(), "true".to_string()).unwrap();
        assert_eq!(flag.id.as_str(), "dark-mode");
        assert_eq!(flag.value, "true");
    }

    #[test]
    fn test_flag_id_rejects_empty() {
        assert_eq!(FlagId::new(String::new()).unwrap_err(), FlagIdError::Empty);
    }
}
