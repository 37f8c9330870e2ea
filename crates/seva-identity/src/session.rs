//! ---
//! seva_section: "06-identity-access"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Identity, sessions, and role-view policy."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::account::Account;

/// The currently authenticated account.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Random identifier, only used to correlate log lines.
    pub id: Uuid,
    /// Snapshot of the account taken at sign-in.
    pub account: Account,
    /// When the session was established.
    pub established_at: DateTime<Utc>,
}

impl Session {
    /// Open a session for `account`.
    pub fn open(account: Account) -> Self {
        Self {
            id: Uuid::new_v4(),
            account,
            established_at: Utc::now(),
        }
    }
}
