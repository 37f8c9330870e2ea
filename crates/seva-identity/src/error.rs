//! ---
//! seva_section: "06-identity-access"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Identity, sessions, and role-view policy."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use thiserror::Error;

use crate::account::Role;

/// Errors returned by the identity subsystem. Messages are shown to the end user as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// A required form field was left blank.
    #[error("Please fill in the {field} field.")]
    MissingField {
        /// Label of the blank field.
        field: &'static str,
    },
    /// Email is not shaped like `name@domain`.
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    /// No account matched the email/password pair.
    #[error("Invalid email or password. Please try again or create an account.")]
    InvalidCredentials,
    /// An account with the same email (ignoring case) already exists.
    #[error("An account with email {0} already exists.")]
    DuplicateEmail(String),
    /// Password does not satisfy the password policy.
    #[error("Password must contain at least one capital letter and one number.")]
    WeakPassword,
    /// No account is registered under the email.
    #[error("No account found with this email address.")]
    UnknownEmail,
    /// The requested role view is outside the session's allowed set.
    #[error("role view {requested} is not permitted for this session")]
    RoleNotPermitted {
        /// View the caller asked for.
        requested: Role,
    },
}
