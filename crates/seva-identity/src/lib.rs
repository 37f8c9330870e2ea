//! ---
//! seva_section: "06-identity-access"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Identity, sessions, and role-view policy."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
//! Identity & Access for the Apki Seva portal.
//!
//! [`IdentityService`] owns the account registry, the current session and
//! the active role view. Construct it once and hand clones to whatever
//! needs to consult it; all access goes through its operations.
#![warn(missing_docs)]

pub mod account;
pub mod error;
pub mod metrics;
pub mod policy;
pub mod registry;
pub mod role_view;
pub mod service;
pub mod session;

pub use account::{Account, Role};
pub use error::AuthError;
pub use metrics::AuthMetrics;
pub use policy::PasswordPolicy;
pub use registry::AccountRegistry;
pub use role_view::{allowed_views, is_view_permitted, DEFAULT_ROLE_VIEW};
pub use service::{IdentityService, ResetAck};
pub use session::Session;
