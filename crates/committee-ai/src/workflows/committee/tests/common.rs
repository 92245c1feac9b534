use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::committee::domain::{
    Candidate, CandidateId, ContactField, EngagementCounters, OrgId, OrgRecord, ProductContext,
};
use crate::workflows::committee::selector::{QuotaConfig, QuotaSelector};
use crate::workflows::committee::sources::{
    CandidateDirectory, CommitteeRecord, CommitteeStore, ContactVerification, ContactVerifier,
    DirectoryError, StoreError, VerifierError,
};
use crate::workflows::committee::validation::{AccuracyValidator, ValidatorConfig};
use crate::workflows::committee::{CommitteeService, RuleBasedRoleClassifier};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date")
}

pub(super) fn org_id() -> OrgId {
    OrgId("harvest-robotics".to_string())
}

pub(super) fn org_record() -> OrgRecord {
    OrgRecord {
        id: org_id(),
        name: "Harvest Robotics".to_string(),
        headcount: Some(340),
        headcount_growth_pct: Some(32.0),
        last_funding_on: NaiveDate::from_ymd_opt(2026, 2, 10),
        industry: Some("Agricultural Technology".to_string()),
        technologies: vec!["Salesforce".to_string(), "Snowflake".to_string()],
        adoption_signals: Some(12),
    }
}

pub(super) fn product() -> ProductContext {
    ProductContext {
        target_departments: vec!["Sales".to_string(), "Revenue".to_string()],
        target_industries: vec!["technology".to_string()],
        complementary_technologies: vec!["salesforce".to_string()],
        keywords: vec!["revenue".to_string()],
    }
}

pub(super) fn person(
    id: &str,
    name: &str,
    title: &str,
    department: Option<&str>,
    seniority: Option<&str>,
) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        full_name: name.to_string(),
        title: Some(title.to_string()),
        department: department.map(str::to_string),
        seniority: seniority.map(str::to_string),
        tenure_months: Some(24),
        active_tenure: true,
        prior_employers: Vec::new(),
        engagement: EngagementCounters::default(),
        email: Some(ContactField {
            value: format!("{id}@harvestrobotics.com"),
            verified: false,
            confidence: 70,
        }),
        phone: None,
        profile_url: None,
        data_refreshed_on: NaiveDate::from_ymd_opt(2026, 7, 1),
    }
}

/// Mid-market pool with every role represented.
pub(super) fn candidate_pool() -> Vec<Candidate> {
    vec![
        person("p-01", "Maya Okafor", "Chief Executive Officer", Some("Executive"), Some("c_suite")),
        person("p-02", "Jonah Veld", "VP of Engineering", Some("Engineering"), Some("vp")),
        person("p-03", "Liam Reyes", "Director of Revenue Operations", Some("Revenue"), Some("director")),
        person("p-04", "Sana Idris", "Head of Growth", Some("Marketing"), Some("head")),
        person("p-05", "Avery Chen", "General Counsel", Some("Legal"), None),
        person("p-06", "Noor Haddad", "Procurement Manager", Some("Procurement"), Some("manager")),
        person("p-07", "Theo Brandt", "Senior Account Executive", Some("Sales"), Some("senior")),
        person("p-08", "Ines Duarte", "Customer Success Manager", Some("Customer Success"), Some("manager")),
        person("p-09", "Felix Marsh", "Staff Engineer", Some("Engineering"), Some("senior")),
        person("p-10", "Rhea Kapoor", "Data Analyst", Some("Data"), Some("entry")),
        person("p-11", "Owen Silva", "Product Designer", Some("Product"), Some("senior")),
        person("p-12", "Greta Lund", "Office Coordinator", Some("Operations"), Some("entry")),
    ]
}

pub(super) fn build_service() -> (
    CommitteeService<MemoryDirectory, MemoryStore>,
    Arc<MemoryDirectory>,
    Arc<MemoryStore>,
) {
    let directory = Arc::new(MemoryDirectory::with_fixture());
    let store = Arc::new(MemoryStore::default());
    let service = CommitteeService::new(
        directory.clone(),
        store.clone(),
        Arc::new(StaticVerifier::default()),
        Arc::new(RuleBasedRoleClassifier),
        QuotaSelector::new(QuotaConfig::standard()),
        AccuracyValidator::new(ValidatorConfig::default(), QuotaConfig::standard()),
    );
    (service, directory, store)
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    pub(super) organizations: Arc<Mutex<HashMap<OrgId, OrgRecord>>>,
    pub(super) candidates: Arc<Mutex<HashMap<OrgId, Vec<Candidate>>>>,
}

impl MemoryDirectory {
    pub(super) fn with_fixture() -> Self {
        let directory = Self::default();
        directory
            .organizations
            .lock()
            .expect("directory mutex poisoned")
            .insert(org_id(), org_record());
        directory
            .candidates
            .lock()
            .expect("directory mutex poisoned")
            .insert(org_id(), candidate_pool());
        directory
    }
}

impl CandidateDirectory for MemoryDirectory {
    fn fetch_organization(&self, org: &OrgId) -> Result<Option<OrgRecord>, DirectoryError> {
        let guard = self
            .organizations
            .lock()
            .expect("directory mutex poisoned");
        Ok(guard.get(org).cloned())
    }

    fn fetch_candidates(&self, org: &OrgId) -> Result<Vec<Candidate>, DirectoryError> {
        let guard = self.candidates.lock().expect("directory mutex poisoned");
        Ok(guard.get(org).cloned().unwrap_or_default())
    }
}

pub(super) struct UnavailableDirectory;

impl CandidateDirectory for UnavailableDirectory {
    fn fetch_organization(&self, _org: &OrgId) -> Result<Option<OrgRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("provider offline".to_string()))
    }

    fn fetch_candidates(&self, _org: &OrgId) -> Result<Vec<Candidate>, DirectoryError> {
        Err(DirectoryError::Unavailable("provider offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<HashMap<OrgId, CommitteeRecord>>>,
}

impl CommitteeStore for MemoryStore {
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

/// Verifier that confirms every contact and records what it was asked about.
#[derive(Default, Clone)]
pub(super) struct StaticVerifier {
    pub(super) checked: Arc<Mutex<Vec<CandidateId>>>,
}

impl ContactVerifier for StaticVerifier {
    fn verify(&self, candidate: &Candidate) -> Result<ContactVerification, VerifierError> {
        self.checked
            .lock()
            .expect("verifier mutex poisoned")
            .push(candidate.id.clone());
        Ok(ContactVerification {
            candidate: candidate.id.clone(),
            verified: true,
            confidence: 92,
            details: Default::default(),
        })
    }
}

pub(super) struct OfflineVerifier;

impl ContactVerifier for OfflineVerifier {
    fn verify(&self, _candidate: &Candidate) -> Result<ContactVerification, VerifierError> {
        Err(VerifierError::Transport("vendor timeout".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
