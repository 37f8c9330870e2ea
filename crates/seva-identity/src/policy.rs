//! ---
//! seva_section: "06-identity-access"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Identity, sessions, and role-view policy."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Strength rules applied to self-service registrations.
///
/// Deserialises from a partial table; omitted rules stay enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Require at least one ASCII upper-case letter.
    pub require_uppercase: bool,
    /// Require at least one ASCII digit.
    pub require_digit: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            require_uppercase: true,
            require_digit: true,
        }
    }
}

impl PasswordPolicy {
    /// Accept or reject a candidate password.
    pub fn check(&self, password: &str) -> Result<(), AuthError> {
        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        if (self.require_uppercase && !has_upper) || (self.require_digit && !has_digit) {
            return Err(AuthError::WeakPassword);
        }
        Ok(())
    }
}
