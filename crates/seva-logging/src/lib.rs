//! ---
//! seva_section: "03-logging"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Structured logging context, macros, and auth event helpers."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
#![warn(missing_docs)]

use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

pub mod macros;

/// Initialize a baseline tracing subscriber suitable for development and tests.
pub fn init() {
    let _ = Registry::default()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(subscriber_fmt::layer())
        .try_init();
}

/// Structured logging context propagated by the convenience macros.
///
/// Only identifying fields live here. Credentials never do.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Email of the account the event concerns.
    pub account: Option<&'a str>,
    /// Role view active when the event was emitted.
    pub role_view: Option<&'a str>,
    /// Session identifier, when a session exists.
    pub session: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an account email.
    pub fn with_account(mut self, account: &'a str) -> Self {
        self.account = Some(account);
        self
    }

    /// Attach the active role view.
    pub fn with_role_view(mut self, role_view: &'a str) -> Self {
        self.role_view = Some(role_view);
        self
    }

    /// Attach a session identifier.
    pub fn with_session(mut self, session: &'a str) -> Self {
        self.session = Some(session);
        self
    }
}

/// Outcome of an authentication or authorisation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The operation was allowed and completed.
    Granted,
    /// The operation was refused.
    Denied,
}

impl AuthOutcome {
    /// Stable lowercase label used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthOutcome::Granted => "granted",
            AuthOutcome::Denied => "denied",
        }
    }
}

/// Emit a standardized auth event. Denials log at WARN, grants at INFO.
pub fn log_auth_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: AuthOutcome,
) {
    let ctx = context.cloned().unwrap_or_default();
    match outcome {
        AuthOutcome::Granted => tracing::event!(
            Level::INFO,
            event = event,
            outcome = outcome.as_str(),
            account = ctx.account.unwrap_or(""),
            role_view = ctx.role_view.unwrap_or(""),
            session = ctx.session.unwrap_or(""),
            message = %message
        ),
        AuthOutcome::Denied => tracing::event!(
            Level::WARN,
            event = event,
            outcome = outcome.as_str(),
            account = ctx.account.unwrap_or(""),
            role_view = ctx.role_view.unwrap_or(""),
            session = ctx.session.unwrap_or(""),
            message = %message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macros_emit_without_panic() {
        init();
        let ctx = LogContext::new()
            .with_account("admin@test.com")
            .with_role_view("Admin");
        seva_info!(context = ctx.clone(), "session established");
        seva_debug!("debug message");
        seva_warn!(context = ctx, "denied view: {}", "Admin");
    }

    #[test]
    fn outcome_labels_are_stable() {
        assert_eq!(AuthOutcome::Granted.as_str(), "granted");
        assert_eq!(AuthOutcome::Denied.as_str(), "denied");
    }

    #[test]
    fn auth_event_helper_emits() {
        init();
        let ctx = LogContext::new().with_account("staff@test.com");
        log_auth_event(
            Some(&ctx),
            "auth.login",
            "login accepted",
            AuthOutcome::Granted,
        );
        log_auth_event(None, "auth.login", "login refused", AuthOutcome::Denied);
    }
}
