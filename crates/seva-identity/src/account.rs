//! ---
//! seva_section: "06-identity-access"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Identity, sessions, and role-view policy."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Portal role. Also used as the lens ("role view") the UI is rendered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Full access, may view as any role.
    Admin,
    /// Reviews certificate requests and manages resources.
    Staff,
    /// Community member; requests certificates and books resources.
    User,
}

impl Role {
    /// Every role, most privileged first.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Staff, Role::User];

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A registered identity.
///
/// The password is kept in plaintext because credential checks are a local
/// mock; it is never serialised and never logged.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Name shown in greetings and used as certificate applicant.
    pub display_name: String,
    /// Email as entered at registration. Unique ignoring case.
    pub email: String,
    #[serde(skip_serializing)]
    password: String,
    /// Actual role of the account.
    pub role: Role,
}

impl Account {
    /// Construct an account.
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            password: password.into(),
            role,
        }
    }

    /// Email comparison ignoring case.
    pub fn matches_email(&self, email: &str) -> bool {
        normalize_email(&self.email) == normalize_email(email)
    }

    /// Exact, case-sensitive password comparison.
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Reject a required field that is empty or whitespace only.
pub fn require_field(field: &'static str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingField { field });
    }
    Ok(())
}

/// `local@domain` with both parts non-empty and no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Case-folded form of an email used as the registry key.
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_ignoring_case() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("staff".parse::<Role>().unwrap(), Role::Staff);
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn email_match_ignores_case_but_password_does_not() {
        let account = Account::new("Admin User", "Admin@Test.com", "password", Role::Admin);
        assert!(account.matches_email("admin@test.COM"));
        assert!(account.verify_password("password"));
        assert!(!account.verify_password("Password"));
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(
            require_field("name", "   "),
            Err(AuthError::MissingField { field: "name" })
        );
        assert!(require_field("name", "Priya").is_ok());
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("priya@test.com"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("priya"));
        assert!(!is_valid_email("@test.com"));
        assert!(!is_valid_email("priya@"));
        assert!(!is_valid_email("pri ya@test.com"));
        assert!(!is_valid_email("a@b@c"));
    }

    #[test]
    fn password_is_neither_serialised_nor_debug_printed() {
        let account = Account::new("Staff User", "staff@test.com", "s3cretPass", Role::Staff);
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("s3cretPass"));
        assert!(!format!("{:?}", account).contains("s3cretPass"));
    }
}
