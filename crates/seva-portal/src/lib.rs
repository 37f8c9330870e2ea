//! ---
//! seva_section: "07-portal-services"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Certificate and resource services gated by role view."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
#![warn(missing_docs)]
//! Portal services layered over [`seva_identity::IdentityService`].

pub mod certificates;
pub mod dashboard;
pub mod error;
pub mod portal;
pub mod resources;

pub use certificates::{
    CertificateBook, CertificateId, CertificateKind, CertificateRequest, CertificateStatus,
    Decision,
};
pub use dashboard::DashboardStats;
pub use error::PortalError;
pub use portal::{Capability, Portal};
pub use resources::{Resource, ResourceBook, ResourceId, ResourceKind, ResourceStatus};
