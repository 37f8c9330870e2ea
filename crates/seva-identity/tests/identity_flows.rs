//! ---
//! seva_section: "06-identity-access"
//! seva_subsection: "integration-tests"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Identity, sessions, and role-view policy."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use std::sync::Arc;

use prometheus::Registry;
use seva_identity::{Account, AuthError, AuthMetrics, IdentityService, Role};

fn portal_accounts() -> IdentityService {
    let service = IdentityService::new();
    service
        .seed_account(Account::new("Admin User", "admin@test.com", "password", Role::Admin))
        .unwrap();
    service
        .seed_account(Account::new("Staff User", "staff@test.com", "password", Role::Staff))
        .unwrap();
    service
}

#[test]
fn login_ignores_email_case() {
    let service = portal_accounts();
    let account = service.login("Admin@TEST.com", "password").unwrap();
    assert_eq!(account.email, "admin@test.com");
    assert_eq!(service.active_role_view(), Role::Admin);
}

#[test]
fn registration_enforces_password_strength() {
    let service = portal_accounts();
    assert_eq!(
        service.register("Rahul", "rahul@test.com", "abc123"),
        Err(AuthError::WeakPassword)
    );
    let account = service.register("Rahul", "rahul@test.com", "Abc123").unwrap();
    assert_eq!(account.role, Role::User);
    assert!(service.is_authenticated());
}

#[test]
fn second_registration_with_same_email_is_duplicate() {
    let service = portal_accounts();
    service.register("Sneha", "sneha@test.com", "Abc123").unwrap();
    service.logout();
    let err = service
        .register("Sneha Again", "SNEHA@test.com", "Xyz789")
        .unwrap_err();
    assert!(matches!(err, AuthError::DuplicateEmail(_)));
    assert!(!service.is_authenticated());
}

#[test]
fn registered_account_can_log_back_in() {
    let service = portal_accounts();
    service.register("Amit", "amit@test.com", "Abc123").unwrap();
    service.logout();
    let account = service.login("AMIT@test.com", "Abc123").unwrap();
    assert_eq!(account.display_name, "Amit");
}

#[test]
fn logout_clears_session_and_resets_view() {
    let service = portal_accounts();
    service.login("staff@test.com", "password").unwrap();
    service.set_active_role_view(Role::User).unwrap();
    service.logout();
    assert!(service.current_account().is_none());
    assert_eq!(service.active_role_view(), Role::Admin);
}

#[test]
fn staff_view_switching() {
    let service = portal_accounts();
    service.login("staff@test.com", "password").unwrap();
    assert_eq!(
        service.set_active_role_view(Role::Admin),
        Err(AuthError::RoleNotPermitted {
            requested: Role::Admin
        })
    );
    assert_eq!(service.active_role_view(), Role::Staff);
    service.set_active_role_view(Role::User).unwrap();
    assert_eq!(service.active_role_view(), Role::User);
}

#[test]
fn plain_user_has_no_switcher() {
    let service = portal_accounts();
    service.register("Priya", "priya@test.com", "Abc123").unwrap();
    assert!(service.available_role_views().is_empty());
    assert!(service.set_active_role_view(Role::User).is_err());
    assert_eq!(service.active_role_view(), Role::User);
}

#[test]
fn password_reset_acknowledges_without_mutation() {
    let service = portal_accounts();
    assert_eq!(
        service.request_password_reset("nobody@test.com"),
        Err(AuthError::UnknownEmail)
    );

    let before = service.find_account("staff@test.com").unwrap();
    let ack = service.request_password_reset("STAFF@test.com").unwrap();
    assert_eq!(ack.email, "staff@test.com");
    assert_eq!(service.find_account("staff@test.com").unwrap(), before);
    assert!(service.login("staff@test.com", "password").is_ok());
}

#[test]
fn metrics_track_auth_activity() {
    let registry = Arc::new(Registry::new());
    let metrics = AuthMetrics::new(registry.clone()).unwrap();
    let service = portal_accounts().with_metrics(metrics.clone());

    service.login("admin@test.com", "wrong").unwrap_err();
    service.login("staff@test.com", "password").unwrap();
    service.set_active_role_view(Role::Admin).unwrap_err();
    service.register("Neha", "neha@test.com", "Abc123").unwrap();

    assert_eq!(metrics.login_attempts(), 2);
    assert_eq!(metrics.login_failures(), 1);
    assert_eq!(metrics.role_view_denials(), 1);
    assert_eq!(metrics.registrations(), 1);
    assert_eq!(registry.gather().len(), 4);
}

#[test]
fn clones_taken_before_metrics_still_count() {
    let registry = Arc::new(Registry::new());
    let metrics = AuthMetrics::new(registry).unwrap();
    let service = portal_accounts();
    let early_clone = service.clone();
    let _service = service.with_metrics(metrics.clone());

    early_clone.login("staff@test.com", "wrong").unwrap_err();
    assert_eq!(metrics.login_attempts(), 1);
    assert_eq!(metrics.login_failures(), 1);
}

#[test]
fn blank_registration_cannot_create_a_loginable_account() {
    let service = portal_accounts();
    assert_eq!(
        service.register("", "", "Abc123"),
        Err(AuthError::MissingField { field: "name" })
    );
    assert_eq!(
        service.register("Rahul", "", "Abc123"),
        Err(AuthError::MissingField { field: "email" })
    );
    assert_eq!(
        service.register("Rahul", "rahul", "Abc123"),
        Err(AuthError::InvalidEmail)
    );
    assert_eq!(service.account_count(), 2);
    assert_eq!(service.login("", "Abc123"), Err(AuthError::InvalidCredentials));
}
