use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::classifier::RoleClassifier;
use super::domain::{
    ClassifiedCandidate, DealOutcome, OrgId, OrgRecord, ProductContext, SizeTier,
};
use super::scoring::account::{account_components, AccountSignals};
use super::scoring::{account_engine, CompositeScore, ComponentScore, ScoringConfigError, ScoringError};
use super::selector::QuotaSelector;
use super::sources::{
    CandidateDirectory, CommitteeRecord, CommitteeStore, ContactVerifier, DirectoryError,
    StoreError, VerifierError,
};
use super::validation::{AccuracyValidator, ValidationContext};

/// Caller-supplied knobs for a single assembly run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssembleOptions {
    /// Product-fit profile; sharpens the relevance metric when present.
    pub product: Option<ProductContext>,
    /// Historical ground truth; switches accuracy metrics to F1 mode.
    pub outcome: Option<DealOutcome>,
}

/// Account-fit report returned by [`CommitteeService::score_account`].
#[derive(Debug, Clone, Serialize)]
pub struct AccountScoreReport {
    pub organization: OrgId,
    pub tier: SizeTier,
    pub components: Vec<ComponentScore>,
    pub composite: CompositeScore,
}

/// Service composing the directory, classifier, selector, verifier,
/// validator, and store into the assembly pipeline. All engine math stays
/// synchronous and side-effect-free; collaborators own the I/O.
pub struct CommitteeService<D, S> {
    directory: Arc<D>,
    store: Arc<S>,
    verifier: Arc<dyn ContactVerifier>,
    classifier: Arc<dyn RoleClassifier>,
    selector: QuotaSelector,
    validator: AccuracyValidator,
}

impl<D, S> CommitteeService<D, S>
where
    D: CandidateDirectory + 'static,
    S: CommitteeStore + 'static,
{
    pub fn new(
        directory: Arc<D>,
        store: Arc<S>,
        verifier: Arc<dyn ContactVerifier>,
        classifier: Arc<dyn RoleClassifier>,
        selector: QuotaSelector,
        validator: AccuracyValidator,
    ) -> Self {
        Self {
            directory,
            store,
            verifier,
            classifier,
            selector,
            validator,
        }
    }

    /// Assemble, validate, and persist a committee for `org`.
    ///
    /// Pipeline: fetch organization and pool, classify every candidate,
    /// select under quotas, verify contacts for full-profile members,
    /// validate, persist. Reassembly replaces the stored record; earlier
    /// validation verdicts are superseded, never mutated.
    pub fn assemble(
        &self,
        org: &OrgId,
        today: NaiveDate,
        options: AssembleOptions,
    ) -> Result<CommitteeRecord, CommitteeServiceError> {
        let record = self
            .directory
            .fetch_organization(org)?
            .ok_or(DirectoryError::OrgNotFound)?;
        let tier = record.size_tier();

        let pool = self.directory.fetch_candidates(org)?;
        info!(
            organization = %org.0,
            tier = tier.label(),
            pool = pool.len(),
            "assembling committee"
        );

        let classified: Vec<ClassifiedCandidate> = pool
            .into_iter()
            .map(|candidate| {
                let assignment = self.classifier.classify(&candidate);
                ClassifiedCandidate {
                    candidate,
                    assignment,
                }
            })
            .collect();

        let mut selection = self.selector.select(classified, tier);

        // Expensive verification is bounded to the members the selector
        // flagged, not the whole pool.
        for member in selection
            .members
            .iter_mut()
            .filter(|member| member.collect_full_profile)
        {
            match self.verifier.verify(&member.candidate) {
                Ok(verification) => {
                    if verification.verified {
                        if let Some(email) = member.candidate.email.as_mut() {
                            email.verified = true;
                            email.confidence = email.confidence.max(verification.confidence);
                        }
                        member
                            .evidence
                            .push("contact verification passed".to_string());
                    }
                }
                Err(error) => {
                    // Verification is advisory; a transport failure degrades
                    // evidence, it does not abort assembly.
                    warn!(
                        candidate = %member.candidate.id.0,
                        %error,
                        "contact verification unavailable"
                    );
                }
            }
        }

        let validation = self.validator.validate(
            &selection,
            tier,
            ValidationContext {
                today: Some(today),
                product: options.product.as_ref(),
                outcome: options.outcome.as_ref(),
            },
        );

        if !validation.is_valid {
            warn!(
                organization = %org.0,
                issues = validation.issues.len(),
                "assembled committee failed validation"
            );
        }

        let stored = self.store.persist(CommitteeRecord {
            organization: org.clone(),
            selection,
            validation,
            assembled_on: today,
        })?;
        Ok(stored)
    }

    /// Score an organization's account fit against a product profile.
    pub fn score_account(
        &self,
        org: &OrgId,
        product: &ProductContext,
        today: NaiveDate,
    ) -> Result<AccountScoreReport, CommitteeServiceError> {
        let record = self
            .directory
            .fetch_organization(org)?
            .ok_or(DirectoryError::OrgNotFound)?;
        self.score_account_record(&record, product, today)
    }

    /// Score an already-fetched organization record. Pure apart from the
    /// engine-construction check.
    pub fn score_account_record(
        &self,
        record: &OrgRecord,
        product: &ProductContext,
        today: NaiveDate,
    ) -> Result<AccountScoreReport, CommitteeServiceError> {
        let signals = AccountSignals::from_record(record, product, today);
        let components = account_components(&signals);
        let composite = account_engine()?.combine(&components)?;

        Ok(AccountScoreReport {
            organization: record.id.clone(),
            tier: record.size_tier(),
            components,
            composite,
        })
    }

    /// Fetch the persisted committee for API responses.
    pub fn get(&self, org: &OrgId) -> Result<CommitteeRecord, CommitteeServiceError> {
        let record = self.store.fetch(org)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the committee service.
#[derive(Debug, thiserror::Error)]
pub enum CommitteeServiceError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Verifier(#[from] VerifierError),
    #[error(transparent)]
    ScoringConfig(#[from] ScoringConfigError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
