use chrono::NaiveDate;
use committee_ai::workflows::apollo::ApolloImport;
use committee_ai::workflows::committee::{
    AccuracyValidator, Candidate, CandidateDirectory, CommitteeRecord, CommitteeService,
    CommitteeStore, ContactVerification, ContactVerifier, DirectoryError, OrgId, OrgRecord,
    QuotaConfig, QuotaSelector, RuleBasedRoleClassifier, StoreError, ValidatorConfig,
    VerifierError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Directory view over an imported Apollo export. Read-only after import.
#[derive(Debug, Clone, Default)]
pub(crate) struct ImportedDirectory {
    organization: Option<OrgRecord>,
    candidates: Vec<Candidate>,
}

impl ImportedDirectory {
    pub(crate) fn from_import(import: ApolloImport) -> Self {
        Self {
            organization: import.organization,
            candidates: import.candidates,
        }
    }

    pub(crate) fn org_id(&self) -> Option<OrgId> {
        self.organization.as_ref().map(|record| record.id.clone())
    }
}

impl CandidateDirectory for ImportedDirectory {
    fn fetch_organization(&self, org: &OrgId) -> Result<Option<OrgRecord>, DirectoryError> {
        Ok(self
            .organization
            .as_ref()
            .filter(|record| &record.id == org)
            .cloned())
    }

    fn fetch_candidates(&self, org: &OrgId) -> Result<Vec<Candidate>, DirectoryError> {
        if self.organization.as_ref().map(|record| &record.id) == Some(org) {
            Ok(self.candidates.clone())
        } else {
            Ok(Vec::new())
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCommitteeStore {
    records: Arc<Mutex<HashMap<OrgId, CommitteeRecord>>>,
}

impl CommitteeStore for InMemoryCommitteeStore {
    fn persist(&self, record: CommitteeRecord) -> Result<CommitteeRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(record.organization.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, org: &OrgId) -> Result<Option<CommitteeRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(org).cloned())
    }
}

/// Offline verifier: trusts provider-verified emails and treats a corporate
/// (non-freemail) domain as a weaker positive signal.
#[derive(Default, Clone)]
pub(crate) struct HeuristicContactVerifier;

const FREEMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

impl ContactVerifier for HeuristicContactVerifier {
    fn verify(&self, candidate: &Candidate) -> Result<ContactVerification, VerifierError> {
        let mut details = BTreeMap::new();
        let (verified, confidence) = match candidate.email.as_ref() {
            Some(email) if email.verified => {
                details.insert("signal".to_string(), "provider_verified".to_string());
                (true, email.confidence.max(90))
            }
            Some(email) => {
                let corporate = email
                    .value
                    .rsplit('@')
                    .next()
                    .map(|domain| !FREEMAIL_DOMAINS.contains(&domain.to_ascii_lowercase().as_str()))
                    .unwrap_or(false);
                details.insert(
                    "signal".to_string(),
                    if corporate { "corporate_domain" } else { "freemail_domain" }.to_string(),
                );
                (corporate, if corporate { 75 } else { 40 })
            }
            None => {
                details.insert("signal".to_string(), "no_email".to_string());
                (false, 0)
            }
        };

        Ok(ContactVerification {
            candidate: candidate.id.clone(),
            verified,
            confidence,
            details,
        })
    }
}

pub(crate) fn build_committee_service(
    directory: Arc<ImportedDirectory>,
    store: Arc<InMemoryCommitteeStore>,
    staleness_days: i64,
) -> CommitteeService<ImportedDirectory, InMemoryCommitteeStore> {
    CommitteeService::new(
        directory,
        store,
        Arc::new(HeuristicContactVerifier),
        Arc::new(RuleBasedRoleClassifier),
        QuotaSelector::new(QuotaConfig::standard()),
        AccuracyValidator::new(
            ValidatorConfig {
                staleness_days,
                ..ValidatorConfig::default()
            },
            QuotaConfig::standard(),
        ),
    )
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use committee_ai::workflows::committee::{CandidateId, ContactField, EngagementCounters};

    fn candidate(email: Option<(&str, bool)>) -> Candidate {
        Candidate {
            id: CandidateId("infra-test".to_string()),
            full_name: "Infra Test".to_string(),
            title: None,
            department: None,
            seniority: None,
            tenure_months: None,
            active_tenure: false,
            prior_employers: Vec::new(),
            engagement: EngagementCounters::default(),
            email: email.map(|(value, verified)| ContactField {
                value: value.to_string(),
                verified,
                confidence: 70,
            }),
            phone: None,
            profile_url: None,
            data_refreshed_on: None,
        }
    }

    #[test]
    fn heuristic_verifier_trusts_provider_verification() {
        let verification = HeuristicContactVerifier
            .verify(&candidate(Some(("a@corp.example", true))))
            .expect("verifier is infallible");
        assert!(verification.verified);
        assert!(verification.confidence >= 90);
    }

    #[test]
    fn heuristic_verifier_downgrades_freemail() {
        let verification = HeuristicContactVerifier
            .verify(&candidate(Some(("a@gmail.com", false))))
            .expect("verifier is infallible");
        assert!(!verification.verified);
        assert_eq!(verification.confidence, 40);
    }

    #[test]
    fn heuristic_verifier_handles_missing_email() {
        let verification = HeuristicContactVerifier
            .verify(&candidate(None))
            .expect("verifier is infallible");
        assert!(!verification.verified);
        assert_eq!(verification.confidence, 0);
    }
}
