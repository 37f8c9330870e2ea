//! ---
//! seva_section: "06-identity-access"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Identity, sessions, and role-view policy."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use crate::account::Account;
use crate::error::AuthError;

/// Append-only list of known accounts, in registration order.
#[derive(Debug, Default, Clone)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an account by email, ignoring case.
    pub fn find(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.matches_email(email))
    }

    /// Whether an account with this email exists.
    pub fn contains(&self, email: &str) -> bool {
        self.find(email).is_some()
    }

    /// Find the account matching both email (ignoring case) and password (exactly).
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.matches_email(email) && account.verify_password(password))
    }

    /// Append an account. There is no update or delete path.
    pub fn append(&mut self, account: Account) -> Result<(), AuthError> {
        if self.contains(&account.email) {
            return Err(AuthError::DuplicateEmail(account.email));
        }
        self.accounts.push(account);
        Ok(())
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the registry holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Iterate accounts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }
}
