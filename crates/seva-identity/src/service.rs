//! ---
//! seva_section: "06-identity-access"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Identity, sessions, and role-view policy."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use std::sync::Arc;

use parking_lot::RwLock;
use seva_logging::{log_auth_event, seva_debug, seva_info, AuthOutcome, LogContext};
use serde::{Deserialize, Serialize};

use crate::account::{is_valid_email, require_field, Account, Role};
use crate::error::AuthError;
use crate::metrics::AuthMetrics;
use crate::policy::PasswordPolicy;
use crate::registry::AccountRegistry;
use crate::role_view::{allowed_views, is_view_permitted, DEFAULT_ROLE_VIEW};
use crate::session::Session;

/// Acknowledgment of a password reset request. No reset actually happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetAck {
    /// Email of the matched account, as registered.
    pub email: String,
    /// User-facing confirmation.
    pub message: String,
}

#[derive(Debug)]
struct IdentityState {
    registry: AccountRegistry,
    session: Option<Session>,
    active_view: Role,
    metrics: Option<AuthMetrics>,
}

impl Default for IdentityState {
    fn default() -> Self {
        Self {
            registry: AccountRegistry::new(),
            session: None,
            active_view: DEFAULT_ROLE_VIEW,
            metrics: None,
        }
    }
}

/// In-memory identity service: account registry, current session and active role view.
///
/// Clones share state, attached metrics included, so one instance can be
/// built at start-up and injected into every consumer.
#[derive(Debug, Clone, Default)]
pub struct IdentityService {
    state: Arc<RwLock<IdentityState>>,
    policy: PasswordPolicy,
}

impl IdentityService {
    /// Create a service with an empty registry and the default password policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service enforcing `policy` on registrations.
    pub fn with_policy(policy: PasswordPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Attach Prometheus counters. Existing clones start counting too.
    pub fn with_metrics(self, metrics: AuthMetrics) -> Self {
        self.state.write().metrics = Some(metrics);
        self
    }

    /// Password policy applied by [`IdentityService::register`].
    pub fn policy(&self) -> PasswordPolicy {
        self.policy
    }

    /// Add a pre-provisioned account of any role, bypassing the password policy.
    pub fn seed_account(&self, account: Account) -> Result<(), AuthError> {
        let email = account.email.clone();
        let role = account.role;
        self.state.write().registry.append(account)?;
        seva_debug!(
            context = LogContext::new().with_account(&email),
            "provisioned {} account",
            role
        );
        Ok(())
    }

    /// Sign in with an email (any case) and the exact password.
    pub fn login(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        if let Some(metrics) = self.metrics() {
            metrics.inc_login_attempt();
        }
        let found = self.state.read().registry.authenticate(email, password).cloned();
        match found {
            Some(account) => Ok(self.establish(account, "auth.login")),
            None => {
                if let Some(metrics) = self.metrics() {
                    metrics.inc_login_failure();
                }
                log_auth_event(
                    Some(&LogContext::new().with_account(email)),
                    "auth.login",
                    "credentials rejected",
                    AuthOutcome::Denied,
                );
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Create a `User` account and sign it in.
    ///
    /// Checks run in form order: required fields, email shape, password
    /// strength, then duplicate email.
    pub fn register(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AuthError> {
        let ctx = LogContext::new().with_account(email);
        let account = Account::new(display_name, email, password, Role::User);
        let outcome = Self::check_form(display_name, email, password)
            .and_then(|()| self.policy.check(password))
            .and_then(|()| self.state.write().registry.append(account.clone()));
        if let Err(err) = outcome {
            log_auth_event(Some(&ctx), "auth.register", &err.to_string(), AuthOutcome::Denied);
            return Err(err);
        }
        if let Some(metrics) = self.metrics() {
            metrics.inc_registration();
        }
        Ok(self.establish(account, "auth.register"))
    }

    /// Acknowledge a reset request for a registered email. Nothing is mutated or sent.
    pub fn request_password_reset(&self, email: &str) -> Result<ResetAck, AuthError> {
        let registered = self
            .state
            .read()
            .registry
            .find(email)
            .map(|account| account.email.clone());
        let ctx = LogContext::new().with_account(email);
        match registered {
            Some(email) => {
                log_auth_event(
                    Some(&ctx),
                    "auth.password_reset",
                    "reset acknowledged",
                    AuthOutcome::Granted,
                );
                Ok(ResetAck {
                    email,
                    message: "Password reset instructions have been sent to your email.".into(),
                })
            }
            None => {
                log_auth_event(
                    Some(&ctx),
                    "auth.password_reset",
                    "unknown email",
                    AuthOutcome::Denied,
                );
                Err(AuthError::UnknownEmail)
            }
        }
    }

    /// Clear the session and restore the default role view.
    pub fn logout(&self) {
        let previous = {
            let mut state = self.state.write();
            state.active_view = DEFAULT_ROLE_VIEW;
            state.session.take()
        };
        if let Some(session) = previous {
            let session_id = session.id.to_string();
            seva_info!(
                context = LogContext::new()
                    .with_account(&session.account.email)
                    .with_session(&session_id),
                "session closed"
            );
        }
    }

    /// Switch the lens the portal is viewed through.
    pub fn set_active_role_view(&self, view: Role) -> Result<(), AuthError> {
        let mut state = self.state.write();
        let permitted = state
            .session
            .as_ref()
            .map(|session| is_view_permitted(session.account.role, view))
            .unwrap_or(false);
        if !permitted {
            let account = state.session.as_ref().map(|s| s.account.email.clone());
            let metrics = state.metrics.clone();
            drop(state);
            if let Some(metrics) = metrics {
                metrics.inc_role_view_denial();
            }
            let label = view.to_string();
            let mut ctx = LogContext::new().with_role_view(&label);
            if let Some(account) = account.as_deref() {
                ctx = ctx.with_account(account);
            }
            log_auth_event(Some(&ctx), "auth.role_view", "view not permitted", AuthOutcome::Denied);
            return Err(AuthError::RoleNotPermitted { requested: view });
        }
        state.active_view = view;
        Ok(())
    }

    /// Role view currently applied.
    pub fn active_role_view(&self) -> Role {
        self.state.read().active_view
    }

    /// Views the signed-in account may switch to. Empty when logged out or for plain users.
    pub fn available_role_views(&self) -> Vec<Role> {
        self.state
            .read()
            .session
            .as_ref()
            .map(|session| allowed_views(session.account.role).to_vec())
            .unwrap_or_default()
    }

    /// Account of the current session.
    pub fn current_account(&self) -> Option<Account> {
        self.state
            .read()
            .session
            .as_ref()
            .map(|session| session.account.clone())
    }

    /// Current session, if any.
    pub fn session(&self) -> Option<Session> {
        self.state.read().session.clone()
    }

    /// Whether somebody is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().session.is_some()
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.state.read().registry.len()
    }

    /// Look up an account by email, ignoring case.
    pub fn find_account(&self, email: &str) -> Option<Account> {
        self.state.read().registry.find(email).cloned()
    }

    fn metrics(&self) -> Option<AuthMetrics> {
        self.state.read().metrics.clone()
    }

    fn check_form(display_name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        require_field("name", display_name)?;
        require_field("email", email)?;
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(AuthError::MissingField { field: "password" });
        }
        Ok(())
    }

    fn establish(&self, account: Account, event: &str) -> Account {
        let session = Session::open(account.clone());
        let session_id = session.id.to_string();
        {
            let mut state = self.state.write();
            state.active_view = account.role;
            state.session = Some(session);
        }
        let role = account.role.to_string();
        log_auth_event(
            Some(
                &LogContext::new()
                    .with_account(&account.email)
                    .with_role_view(&role)
                    .with_session(&session_id),
            ),
            event,
            "session established",
            AuthOutcome::Granted,
        );
        account
    }
}
