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
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// Certificate identifier, formatted `CERT-NNNN`.
pub type CertificateId = String;

const ID_RANGE: std::ops::RangeInclusive<u16> = 1000..=9999;
const RANDOM_ID_ATTEMPTS: usize = 32;

/// Kind of service activity a certificate attests to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificateKind {
    /// Volunteering hours.
    Volunteering,
    /// Workshop attendance.
    Workshop,
    /// Internship.
    Internship,
    /// Donation drive.
    Donation,
}

impl fmt::Display for CertificateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CertificateKind::Volunteering => "Volunteering",
            CertificateKind::Workshop => "Workshop",
            CertificateKind::Internship => "Internship",
            CertificateKind::Donation => "Donation",
        };
        f.write_str(label)
    }
}

impl FromStr for CertificateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "volunteering" => Ok(CertificateKind::Volunteering),
            "workshop" => Ok(CertificateKind::Workshop),
            "internship" => Ok(CertificateKind::Internship),
            "donation" => Ok(CertificateKind::Donation),
            other => Err(format!("unknown certificate kind: {}", other)),
        }
    }
}

/// Review state of a certificate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificateStatus {
    /// Awaiting review.
    Pending,
    /// Issued.
    Approved,
    /// Declined.
    Rejected,
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CertificateStatus::Pending => "Pending",
            CertificateStatus::Approved => "Approved",
            CertificateStatus::Rejected => "Rejected",
        };
        f.write_str(label)
    }
}

/// Reviewer verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Move to [`CertificateStatus::Approved`].
    Approve,
    /// Move to [`CertificateStatus::Rejected`].
    Reject,
}

impl Decision {
    fn outcome(self) -> CertificateStatus {
        match self {
            Decision::Approve => CertificateStatus::Approved,
            Decision::Reject => CertificateStatus::Rejected,
        }
    }
}

/// A request for a service certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRequest {
    /// `CERT-NNNN` identifier.
    pub id: CertificateId,
    /// Display name of the requester.
    pub applicant: String,
    /// Activity kind.
    pub kind: CertificateKind,
    /// Event or programme name.
    pub event: String,
    /// Hours of service claimed.
    pub hours: u32,
    /// Submission date (UTC).
    pub date: NaiveDate,
    /// Review state.
    pub status: CertificateStatus,
}

/// Certificate requests, newest first.
#[derive(Debug, Default, Clone)]
pub struct CertificateBook {
    requests: Vec<CertificateRequest>,
}

impl CertificateBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// File a new pending request dated today. Applicant and event must not be blank.
    pub fn submit(
        &mut self,
        applicant: impl Into<String>,
        kind: CertificateKind,
        event: impl Into<String>,
        hours: u32,
    ) -> Result<CertificateRequest, PortalError> {
        let applicant = applicant.into();
        let event = event.into();
        if applicant.trim().is_empty() {
            return Err(PortalError::MissingField { field: "applicant" });
        }
        if event.trim().is_empty() {
            return Err(PortalError::MissingField { field: "event" });
        }
        let id = self.allocate_id()?;
        let request = CertificateRequest {
            id,
            applicant,
            kind,
            event,
            hours,
            date: Utc::now().date_naive(),
            status: CertificateStatus::Pending,
        };
        self.requests.insert(0, request.clone());
        Ok(request)
    }

    /// Approve or reject a pending request.
    pub fn decide(
        &mut self,
        id: &str,
        decision: Decision,
    ) -> Result<CertificateRequest, PortalError> {
        let request = self
            .requests
            .iter_mut()
            .find(|request| request.id == id)
            .ok_or_else(|| PortalError::UnknownCertificate(id.to_owned()))?;
        if request.status != CertificateStatus::Pending {
            return Err(PortalError::InvalidTransition {
                id: request.id.clone(),
                status: request.status,
            });
        }
        request.status = decision.outcome();
        Ok(request.clone())
    }

    /// Request by id.
    pub fn get(&self, id: &str) -> Option<&CertificateRequest> {
        self.requests.iter().find(|request| request.id == id)
    }

    /// All requests, newest first.
    pub fn list(&self) -> &[CertificateRequest] {
        &self.requests
    }

    /// Number of requests still awaiting review.
    pub fn pending(&self) -> usize {
        self.requests
            .iter()
            .filter(|request| request.status == CertificateStatus::Pending)
            .count()
    }

    /// Total number of requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether the book is empty.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn allocate_id(&self) -> Result<CertificateId, PortalError> {
        let mut rng = rand::thread_rng();
        for _ in 0..RANDOM_ID_ATTEMPTS {
            let candidate = format_id(rng.gen_range(ID_RANGE));
            if self.get(&candidate).is_none() {
                return Ok(candidate);
            }
        }
        // Dense book: fall back to the first free number.
        ID_RANGE
            .map(format_id)
            .find(|candidate| self.get(candidate).is_none())
            .ok_or(PortalError::CertificateIdsExhausted)
    }
}

fn format_id(number: u16) -> CertificateId {
    format!("CERT-{number}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_prepends_pending_request() {
        let mut book = CertificateBook::new();
        let first = book
            .submit("Rahul Sharma", CertificateKind::Volunteering, "Clean City Drive", 20)
            .unwrap();
        let second = book
            .submit("Priya Singh", CertificateKind::Workshop, "Digital Literacy", 5)
            .unwrap();
        assert_eq!(book.list()[0].id, second.id);
        assert_eq!(book.list()[1].id, first.id);
        assert_eq!(book.pending(), 2);
        assert!(first.id.starts_with("CERT-"));
        assert_eq!(first.id.len(), "CERT-1000".len());
    }

    #[test]
    fn decisions_only_apply_to_pending() {
        let mut book = CertificateBook::new();
        let request = book
            .submit("Amit Verma", CertificateKind::Internship, "NGO Support", 100)
            .unwrap();
        let decided = book.decide(&request.id, Decision::Reject).unwrap();
        assert_eq!(decided.status, CertificateStatus::Rejected);
        assert_eq!(
            book.decide(&request.id, Decision::Approve),
            Err(PortalError::InvalidTransition {
                id: request.id.clone(),
                status: CertificateStatus::Rejected,
            })
        );
        assert_eq!(book.pending(), 0);
    }

    #[test]
    fn unknown_id_is_reported() {
        let mut book = CertificateBook::new();
        assert_eq!(
            book.decide("CERT-0001", Decision::Approve),
            Err(PortalError::UnknownCertificate("CERT-0001".into()))
        );
    }

    #[test]
    fn ids_stay_unique() {
        let mut book = CertificateBook::new();
        for _ in 0..200 {
            book.submit("Sneha Gupta", CertificateKind::Donation, "Winter Cloth Drive", 0)
                .unwrap();
        }
        let mut ids: Vec<_> = book.list().iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn blank_event_or_applicant_is_refused() {
        let mut book = CertificateBook::new();
        assert_eq!(
            book.submit("Priya Singh", CertificateKind::Workshop, "  ", 5),
            Err(PortalError::MissingField { field: "event" })
        );
        assert_eq!(
            book.submit("", CertificateKind::Workshop, "Digital Literacy", 5),
            Err(PortalError::MissingField { field: "applicant" })
        );
        assert!(book.is_empty());
    }

    #[test]
    fn kind_parses_ignoring_case() {
        assert_eq!("WORKSHOP".parse::<CertificateKind>(), Ok(CertificateKind::Workshop));
        assert!("seminar".parse::<CertificateKind>().is_err());
    }
}
