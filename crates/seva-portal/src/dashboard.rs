//! ---
//! seva_section: "07-portal-services"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Certificate and resource services gated by role view."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};
use seva_identity::IdentityService;

use crate::certificates::CertificateBook;
use crate::resources::ResourceBook;

/// Headline counters for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Certificate requests ever filed.
    pub total_certificates: usize,
    /// Requests awaiting review.
    pub pending_requests: usize,
    /// Resources that can be booked right now.
    pub available_resources: usize,
    /// Resources in the inventory.
    pub total_resources: usize,
    /// Accounts in the registry.
    pub registered_accounts: usize,
}

impl DashboardStats {
    /// Snapshot the current counters.
    pub fn collect(
        certificates: &CertificateBook,
        resources: &ResourceBook,
        identity: &IdentityService,
    ) -> Self {
        Self {
            total_certificates: certificates.len(),
            pending_requests: certificates.pending(),
            available_resources: resources.available(),
            total_resources: resources.len(),
            registered_accounts: identity.account_count(),
        }
    }
}
