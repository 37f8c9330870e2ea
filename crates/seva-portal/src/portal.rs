//! ---
//! seva_section: "07-portal-services"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Certificate and resource services gated by role view."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use std::fmt;

use serde::{Deserialize, Serialize};
use seva_identity::{Account, IdentityService, Role};
use seva_logging::{log_auth_event, seva_info, AuthOutcome, LogContext};

use crate::certificates::{CertificateBook, CertificateKind, CertificateRequest, Decision};
use crate::dashboard::DashboardStats;
use crate::error::PortalError;
use crate::resources::{Resource, ResourceBook, ResourceId, ResourceKind, ResourceStatus};

/// Portal controls whose visibility depends on the active role view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// File a certificate request.
    RequestCertificate,
    /// Approve or reject pending requests.
    ReviewCertificates,
    /// Book an available resource.
    BookResource,
}

impl Capability {
    /// Role views exposing this control.
    pub fn views(self) -> &'static [Role] {
        match self {
            Capability::RequestCertificate => &[Role::User],
            Capability::ReviewCertificates => &[Role::Admin, Role::Staff],
            Capability::BookResource => &Role::ALL,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Capability::RequestCertificate => "requesting certificates",
            Capability::ReviewCertificates => "reviewing certificates",
            Capability::BookResource => "booking resources",
        };
        f.write_str(label)
    }
}

/// Certificate and resource services behind the identity gate.
#[derive(Debug, Clone)]
pub struct Portal {
    identity: IdentityService,
    certificates: CertificateBook,
    resources: ResourceBook,
}

impl Portal {
    /// Wrap an identity service with empty books.
    pub fn new(identity: IdentityService) -> Self {
        Self {
            identity,
            certificates: CertificateBook::new(),
            resources: ResourceBook::new(),
        }
    }

    /// Identity service this portal consults.
    pub fn identity(&self) -> &IdentityService {
        &self.identity
    }

    /// Stock the inventory. Not gated: used while provisioning.
    pub fn add_resource(
        &mut self,
        name: impl Into<String>,
        kind: ResourceKind,
        capacity: u32,
        status: ResourceStatus,
    ) -> ResourceId {
        self.resources.add(name, kind, capacity, status)
    }

    /// Whether the active view exposes `capability`. Always false when logged out.
    pub fn can(&self, capability: Capability) -> bool {
        self.identity.is_authenticated()
            && capability.views().contains(&self.identity.active_role_view())
    }

    /// File a certificate request in the signed-in account's name.
    pub fn request_certificate(
        &mut self,
        kind: CertificateKind,
        event: &str,
        hours: u32,
    ) -> Result<CertificateRequest, PortalError> {
        let account = self.authorize(Capability::RequestCertificate)?;
        let request = self
            .certificates
            .submit(account.display_name.clone(), kind, event, hours)?;
        seva_info!(
            context = LogContext::new().with_account(&account.email),
            "certificate {} requested for {}",
            request.id,
            request.event
        );
        Ok(request)
    }

    /// Approve a pending request.
    pub fn approve(&mut self, id: &str) -> Result<CertificateRequest, PortalError> {
        self.decide(id, Decision::Approve)
    }

    /// Reject a pending request.
    pub fn reject(&mut self, id: &str) -> Result<CertificateRequest, PortalError> {
        self.decide(id, Decision::Reject)
    }

    /// Book an available resource.
    pub fn book_resource(&mut self, id: ResourceId) -> Result<Resource, PortalError> {
        let account = self.authorize(Capability::BookResource)?;
        let resource = self.resources.book(id)?;
        seva_info!(
            context = LogContext::new().with_account(&account.email),
            "resource {} booked",
            resource.name
        );
        Ok(resource)
    }

    /// Certificate requests, newest first.
    pub fn certificates(&self) -> Result<&[CertificateRequest], PortalError> {
        self.require_session()?;
        Ok(self.certificates.list())
    }

    /// Resource inventory.
    pub fn resources(&self) -> Result<Vec<&Resource>, PortalError> {
        self.require_session()?;
        Ok(self.resources.list().collect())
    }

    /// Dashboard counters.
    pub fn stats(&self) -> Result<DashboardStats, PortalError> {
        self.require_session()?;
        Ok(DashboardStats::collect(
            &self.certificates,
            &self.resources,
            &self.identity,
        ))
    }

    fn decide(&mut self, id: &str, decision: Decision) -> Result<CertificateRequest, PortalError> {
        let account = self.authorize(Capability::ReviewCertificates)?;
        let request = self.certificates.decide(id, decision)?;
        seva_info!(
            context = LogContext::new().with_account(&account.email),
            "certificate {} marked {}",
            request.id,
            request.status
        );
        Ok(request)
    }

    fn require_session(&self) -> Result<Account, PortalError> {
        self.identity
            .current_account()
            .ok_or(PortalError::NotAuthenticated)
    }

    fn authorize(&self, capability: Capability) -> Result<Account, PortalError> {
        let account = self.require_session()?;
        let view = self.identity.active_role_view();
        if !capability.views().contains(&view) {
            let label = view.to_string();
            log_auth_event(
                Some(
                    &LogContext::new()
                        .with_account(&account.email)
                        .with_role_view(&label),
                ),
                "portal.authorize",
                &capability.to_string(),
                AuthOutcome::Denied,
            );
            return Err(PortalError::Forbidden { view, capability });
        }
        Ok(account)
    }
}
