//! ---
//! seva_section: "15-testing-qa"
//! seva_subsection: "integration-tests"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Integration and validation tests for the Apki Seva stack."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use std::sync::Arc;

use prometheus::Registry;
use seva_common::PortalConfig;
use seva_identity::{AuthError, AuthMetrics, IdentityService, Role};
use seva_portal::{Capability, CertificateKind, CertificateStatus, Portal, PortalError};
use tempfile::tempdir;

const CONFIG: &str = r#"
[auth]
auth_latency_ms = 0

[[auth.accounts]]
display_name = "Seva Admin"
email = "Admin@Seva.org"
password = "Root42"
role = "Admin"

[[resources]]
name = "Community Van"
kind = "Vehicle"
capacity = 8
"#;

fn provision(config: &PortalConfig, registry: Arc<Registry>) -> Portal {
    let metrics = AuthMetrics::new(registry).unwrap();
    let identity = IdentityService::with_policy(config.auth.password_policy).with_metrics(metrics);
    for seed in &config.auth.accounts {
        identity.seed_account(seed.to_account()).unwrap();
    }
    let mut portal = Portal::new(identity);
    for seed in &config.resources {
        portal.add_resource(&seed.name, seed.kind, seed.capacity, seed.status);
    }
    portal
}

#[test]
fn end_to_end_access_control_flow() {
    seva_logging::init();

    let dir = tempdir().unwrap();
    let path = dir.path().join("seva.toml");
    std::fs::write(&path, CONFIG).unwrap();
    let config = PortalConfig::from_path(&path).unwrap();

    let registry = Arc::new(Registry::new());
    let mut portal = provision(&config, registry.clone());
    let identity = portal.identity().clone();

    // Member signs up and files a request.
    assert_eq!(
        identity.register("Neha", "admin@seva.org", "Neha2024"),
        Err(AuthError::DuplicateEmail("admin@seva.org".into()))
    );
    identity.register("Neha", "neha@seva.org", "Neha2024").unwrap();
    assert!(portal.can(Capability::RequestCertificate));
    let request = portal
        .request_certificate(CertificateKind::Donation, "Winter Cloth Drive", 0)
        .unwrap();
    identity.logout();
    assert_eq!(identity.active_role_view(), Role::Admin);
    assert!(!portal.can(Capability::ReviewCertificates));

    // Admin reviews it, then looks at the portal as a member would.
    identity.login("ADMIN@seva.org", "Root42").unwrap();
    assert_eq!(identity.available_role_views(), Role::ALL.to_vec());
    assert_eq!(
        portal.approve(&request.id).unwrap().status,
        CertificateStatus::Approved
    );
    identity.set_active_role_view(Role::User).unwrap();
    assert!(matches!(
        portal.reject(&request.id),
        Err(PortalError::Forbidden {
            view: Role::User,
            ..
        })
    ));
    portal.book_resource(1).unwrap();

    let stats = portal.stats().unwrap();
    assert_eq!(stats.total_certificates, 1);
    assert_eq!(stats.pending_requests, 0);
    assert_eq!(stats.registered_accounts, 2);

    // Only the configured account exists besides the new member.
    assert!(identity.find_account("admin@test.com").is_none());
    assert_eq!(registry.gather().len(), 4);
}

#[test]
fn password_reset_is_an_acknowledgment_only() {
    let portal = provision(&PortalConfig::default(), Arc::new(Registry::new()));
    let identity = portal.identity();

    assert_eq!(
        identity.request_password_reset("ghost@test.com"),
        Err(AuthError::UnknownEmail)
    );
    let ack = identity.request_password_reset("Staff@Test.com").unwrap();
    assert_eq!(ack.email, "staff@test.com");
    assert!(!identity.is_authenticated());
    assert!(identity.login("staff@test.com", "password").is_ok());
}
