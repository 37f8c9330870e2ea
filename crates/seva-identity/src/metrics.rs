//! ---
//! seva_section: "06-identity-access"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Identity, sessions, and role-view policy."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use prometheus::{IntCounter, Registry};
use std::sync::Arc;

/// Identity counters exported via Prometheus.
#[derive(Clone)]
pub struct AuthMetrics {
    registry: Arc<Registry>,
    login_attempts_total: IntCounter,
    login_failures_total: IntCounter,
    registrations_total: IntCounter,
    role_view_denials_total: IntCounter,
}

impl AuthMetrics {
    /// Register metrics with the provided registry.
    pub fn new(registry: Arc<Registry>) -> anyhow::Result<Self> {
        let login_attempts_total =
            IntCounter::new("seva_login_attempts_total", "Total login attempts")?;
        let login_failures_total =
            IntCounter::new("seva_login_failures_total", "Rejected login attempts")?;
        let registrations_total =
            IntCounter::new("seva_registrations_total", "Accounts created by self-registration")?;
        let role_view_denials_total = IntCounter::new(
            "seva_role_view_denials_total",
            "Role view switches refused by policy",
        )?;

        registry.register(Box::new(login_attempts_total.clone()))?;
        registry.register(Box::new(login_failures_total.clone()))?;
        registry.register(Box::new(registrations_total.clone()))?;
        registry.register(Box::new(role_view_denials_total.clone()))?;

        Ok(Self {
            registry,
            login_attempts_total,
            login_failures_total,
            registrations_total,
            role_view_denials_total,
        })
    }

    /// Access the underlying registry.
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub(crate) fn inc_login_attempt(&self) {
        self.login_attempts_total.inc();
    }

    pub(crate) fn inc_login_failure(&self) {
        self.login_failures_total.inc();
    }

    pub(crate) fn inc_registration(&self) {
        self.registrations_total.inc();
    }

    pub(crate) fn inc_role_view_denial(&self) {
        self.role_view_denials_total.inc();
    }

    /// Login attempts observed so far.
    pub fn login_attempts(&self) -> u64 {
        self.login_attempts_total.get()
    }

    /// Rejected logins observed so far.
    pub fn login_failures(&self) -> u64 {
        self.login_failures_total.get()
    }

    /// Successful self-registrations observed so far.
    pub fn registrations(&self) -> u64 {
        self.registrations_total.get()
    }

    /// Refused role view switches observed so far.
    pub fn role_view_denials(&self) -> u64 {
        self.role_view_denials_total.get()
    }
}

impl std::fmt::Debug for AuthMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthMetrics")
            .field("login_attempts", &self.login_attempts())
            .field("login_failures", &self.login_failures())
            .field("registrations", &self.registrations())
            .field("role_view_denials", &self.role_view_denials())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_register_and_increment() {
        let registry = Arc::new(Registry::new());
        let metrics = AuthMetrics::new(registry.clone()).unwrap();
        metrics.inc_login_attempt();
        metrics.inc_login_failure();
        metrics.inc_registration();
        metrics.inc_role_view_denial();
        assert_eq!(metrics.registry().gather().len(), 4);
        assert_eq!(metrics.login_attempts(), 1);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let registry = Arc::new(Registry::new());
        AuthMetrics::new(registry.clone()).unwrap();
        assert!(AuthMetrics::new(registry).is_err());
    }
}
