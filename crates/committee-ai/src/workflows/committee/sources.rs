use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Candidate, CandidateId, OrgId, OrgRecord, Selection};
use super::validation::ValidationResult;

/// Stored record pairing a committee selection with its validation verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeRecord {
    pub organization: OrgId,
    pub selection: Selection,
    pub validation: ValidationResult,
    pub assembled_on: NaiveDate,
}

impl CommitteeRecord {
    pub fn status_view(&self) -> CommitteeStatusView {
        CommitteeStatusView {
            organization: self.organization.clone(),
            total_members: self.selection.total,
            overall_confidence: self.selection.overall_confidence,
            is_valid: self.validation.is_valid,
            overall_score: self.validation.metrics.overall_score,
            assembled_on: self.assembled_on,
        }
    }
}

/// Sanitized representation of a committee's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct CommitteeStatusView {
    pub organization: OrgId,
    pub total_members: usize,
    pub overall_confidence: f64,
    pub is_valid: bool,
    pub overall_score: f64,
    pub assembled_on: NaiveDate,
}

/// Read abstraction over the upstream contact provider so the service module
/// can be exercised in isolation.
pub trait CandidateDirectory: Send + Sync {
    fn fetch_organization(&self, org: &OrgId) -> Result<Option<OrgRecord>, DirectoryError>;
    fn fetch_candidates(&self, org: &OrgId) -> Result<Vec<Candidate>, DirectoryError>;
}

/// Error enumeration for directory failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("organization not found")]
    OrgNotFound,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for assembled committees.
pub trait CommitteeStore: Send + Sync {
    fn persist(&self, record: CommitteeRecord) -> Result<CommitteeRecord, StoreError>;
    fn fetch(&self, org: &OrgId) -> Result<Option<CommitteeRecord>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("committee not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a single contact-verification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactVerification {
    pub candidate: CandidateId,
    pub verified: bool,
    pub confidence: u8,
    pub details: BTreeMap<String, String>,
}

/// Outbound hook verifying contact details for flagged members (e.g. an
/// email-verification vendor adapter).
pub trait ContactVerifier: Send + Sync {
    fn verify(&self, candidate: &Candidate) -> Result<ContactVerification, VerifierError>;
}

/// Verification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    #[error("verification transport unavailable: {0}")]
    Transport(String),
}
