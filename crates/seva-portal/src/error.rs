//! ---
//! seva_section: "07-portal-services"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Certificate and resource services gated by role view."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use seva_identity::{AuthError, Role};
use thiserror::Error;

use crate::certificates::CertificateStatus;
use crate::portal::Capability;
use crate::resources::{ResourceId, ResourceStatus};

/// Errors returned by portal actions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PortalError {
    /// Identity failure passed through unchanged.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The action needs a signed-in account.
    #[error("please sign in to continue")]
    NotAuthenticated,
    /// The active role view does not expose this control.
    #[error("{capability} is not available in the {view} view")]
    Forbidden {
        /// Active role view at the time of the call.
        view: Role,
        /// Control that was attempted.
        capability: Capability,
    },
    /// A required request field was left blank.
    #[error("please fill in the {field} field")]
    MissingField {
        /// Label of the blank field.
        field: &'static str,
    },
    /// No certificate request with this id.
    #[error("certificate {0} not found")]
    UnknownCertificate(String),
    /// Only pending requests can be decided.
    #[error("certificate {id} is already {status}")]
    InvalidTransition {
        /// Certificate id.
        id: String,
        /// Status the request is stuck in.
        status: CertificateStatus,
    },
    /// Every `CERT-NNNN` identifier is taken.
    #[error("no free certificate identifiers left")]
    CertificateIdsExhausted,
    /// No resource with this id.
    #[error("resource {0} not found")]
    UnknownResource(ResourceId),
    /// Resource is booked or under maintenance.
    #[error("resource {id} is {status} and cannot be booked")]
    ResourceUnavailable {
        /// Resource id.
        id: ResourceId,
        /// Current status.
        status: ResourceStatus,
    },
}
