//! ---
//! seva_section: "06-identity-access"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Identity, sessions, and role-view policy."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use crate::account::Role;

/// View restored on logout. Carries no authority while nobody is signed in.
pub const DEFAULT_ROLE_VIEW: Role = Role::Admin;

/// Role views an account of `role` may switch between, most privileged first.
///
/// Plain users get no switcher at all.
pub fn allowed_views(role: Role) -> &'static [Role] {
    match role {
        Role::Admin => &[Role::Admin, Role::Staff, Role::User],
        Role::Staff => &[Role::Staff, Role::User],
        Role::User => &[],
    }
}

/// Whether an account of `role` may view the portal as `view`.
pub fn is_view_permitted(role: Role, view: Role) -> bool {
    allowed_views(role).contains(&view)
}
