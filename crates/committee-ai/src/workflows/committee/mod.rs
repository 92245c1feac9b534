//! Buying-committee identification: weighted signal scoring, rule-ordered
//! role classification, quota-bounded selection, and accuracy validation.
//!
//! The pipeline is deterministic end to end: identical candidate pools and
//! organization records produce byte-identical selections and verdicts.

pub mod classifier;
pub mod domain;
pub mod router;
pub mod scoring;
pub mod selector;
pub mod service;
pub mod sources;
pub mod validation;

#[cfg(test)]
mod tests;

pub use classifier::{RoleBasedConsistency, RoleClassifier, RuleBasedRoleClassifier};
pub use domain::{
    Candidate, CandidateId, ClassifiedCandidate, CommitteeMember, ContactField, DealOutcome,
    EmploymentStint, EngagementCounters, OrgId, OrgRecord, ProductContext, Role, RoleAssignment,
    Selection, SelectionShortfall, SizeTier,
};
pub use router::committee_router;
pub use selector::{QuotaConfig, QuotaConfigError, QuotaRange, QuotaSelector};
pub use service::{AccountScoreReport, AssembleOptions, CommitteeService, CommitteeServiceError};
pub use sources::{
    CandidateDirectory, CommitteeRecord, CommitteeStatusView, CommitteeStore, ContactVerification,
    ContactVerifier, DirectoryError, StoreError, VerifierError,
};
pub use validation::{
    AccuracyMetrics, AccuracyValidator, ConfidenceLabel, IssueType, Severity, ValidationContext,
    ValidationIssue, ValidationResult, ValidatorConfig,
};
