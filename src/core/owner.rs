//! Authenticated owner context.
//!
//! Every record carries an owner id and every core operation takes an
//! [`OwnerId`]. Construction is the authentication check: an empty id means
//! there is no authenticated party and fails with `Error::Authentication`.

use crate::errors::{Error, Result};
use std::fmt;

/// Identifier of the authenticated party that owns a set of records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    /// Builds an owner context from a raw id.
    ///
    /// # Errors
    /// Returns `Error::Authentication` if the id is empty or whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::Authentication {
                message: "no authenticated owner".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The raw id as stored in `owner_id` columns.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_owner_id_trims() {
        let owner = OwnerId::new("  user-1 ").unwrap();
        assert_eq!(owner.as_str(), "user-1");
    }

    #[test]
    fn test_empty_owner_is_authentication_error() {
        assert!(matches!(
            OwnerId::new("   "),
            Err(Error::Authentication { .. })
        ));
        assert!(matches!(OwnerId::new(""), Err(Error::Authentication { .. })));
    }
}
