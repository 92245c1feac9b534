//! Selection quality measurement.
//!
//! Seven independently computed sub-metrics plus a size check roll up into a
//! weighted overall score; every breached threshold emits exactly one
//! severity-tagged issue with a remediation recommendation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::classifier::{RoleBasedConsistency, RoleClassifier, RuleBasedRoleClassifier};
use super::domain::{
    Candidate, CandidateId, DealOutcome, ProductContext, Role, Selection, SizeTier,
};
use super::selector::QuotaConfig;

/// Neutral relevance used when no product-fit profile is supplied.
const NEUTRAL_RELEVANCE: f64 = 0.7;

/// Member confidence a decision-maker must reach for the authority heuristic.
const AUTHORITY_CONFIDENCE_FLOOR: u8 = 60;

const CORE_ACCURACY_THRESHOLD: f64 = 0.7;
const ROLE_ACCURACY_THRESHOLD: f64 = 0.8;
const RELEVANCE_THRESHOLD: f64 = 0.6;
const DATA_QUALITY_THRESHOLD: f64 = 0.6;
const CONSISTENCY_THRESHOLD: f64 = 0.95;
const TIMELINESS_THRESHOLD: f64 = 0.5;

/// Weighted contribution of each sub-metric to the overall score.
const METRIC_WEIGHTS: [(MetricKind, f64); 7] = [
    (MetricKind::CoreMemberAccuracy, 0.25),
    (MetricKind::RoleAssignmentAccuracy, 0.20),
    (MetricKind::Relevance, 0.15),
    (MetricKind::DataQuality, 0.15),
    (MetricKind::Consistency, 0.10),
    (MetricKind::Completeness, 0.10),
    (MetricKind::Timeliness, 0.05),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetricKind {
    CoreMemberAccuracy,
    RoleAssignmentAccuracy,
    Relevance,
    DataQuality,
    Consistency,
    Completeness,
    Timeliness,
}

/// Weighting of the three contact checks inside the data-quality metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataQualityWeights {
    pub email: f64,
    pub phone: f64,
    pub profile: f64,
}

impl Default for DataQualityWeights {
    fn default() -> Self {
        Self {
            email: 0.4,
            phone: 0.3,
            profile: 0.3,
        }
    }
}

/// Validator configuration; the defaults carry the documented thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Member data older than this is considered stale.
    pub staleness_days: i64,
    pub data_quality: DataQualityWeights,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            staleness_days: 180,
            data_quality: DataQualityWeights::default(),
        }
    }
}

/// The seven sub-metrics, each in [0, 1], plus the weighted overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    pub core_member_accuracy: f64,
    pub role_assignment_accuracy: f64,
    pub relevance: f64,
    pub data_quality: f64,
    pub consistency: f64,
    pub completeness: f64,
    pub timeliness: f64,
    pub size_appropriate: bool,
    pub overall_score: f64,
}

/// Closed issue taxonomy for remediation routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    MissingRoles,
    LowCoreAccuracy,
    RoleMisassignment,
    LowRelevance,
    PoorDataQuality,
    InconsistentAssignments,
    StaleMemberData,
    SizeOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub issue_type: IssueType,
    pub severity: Severity,
    pub description: String,
    pub details: BTreeMap<String, String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
}

/// Immutable verdict for one validation call; superseded, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub confidence: ConfidenceLabel,
    pub metrics: AccuracyMetrics,
    pub issues: Vec<ValidationIssue>,
}

/// Caller-supplied context for a validation call.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext<'a> {
    pub today: Option<NaiveDate>,
    pub product: Option<&'a ProductContext>,
    pub outcome: Option<&'a DealOutcome>,
}

/// Stateless validator applying heuristics and, when ground truth is present,
/// F1 scoring against the historical outcome.
pub struct AccuracyValidator {
    config: ValidatorConfig,
    quotas: QuotaConfig,
    reference_classifier: RuleBasedRoleClassifier,
}

impl Default for AccuracyValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default(), QuotaConfig::standard())
    }
}

impl AccuracyValidator {
    pub fn new(config: ValidatorConfig, quotas: QuotaConfig) -> Self {
        Self {
            config,
            quotas,
            reference_classifier: RuleBasedRoleClassifier,
        }
    }

    pub fn validate(
        &self,
        selection: &Selection,
        tier: SizeTier,
        context: ValidationContext<'_>,
    ) -> ValidationResult {
        let today = context.today.unwrap_or_default();

        let (core_member_accuracy, role_assignment_accuracy) = match context.outcome {
            Some(outcome) => self.outcome_accuracy(selection, outcome),
            None => (
                self.heuristic_core_accuracy(selection),
                self.self_consistency_accuracy(selection),
            ),
        };

        let relevance = self.relevance(selection, context.product);
        let data_quality = self.data_quality(selection);
        let consistency = self.consistency(selection);
        let completeness = self.completeness(selection);
        let timeliness = self.timeliness(selection, today);

        let bounds = self.quotas.tier_bounds(tier);
        let size_appropriate = selection.total >= bounds.min && selection.total <= bounds.max;

        let overall_score = METRIC_WEIGHTS
            .iter()
            .map(|(kind, weight)| {
                let value = match kind {
                    MetricKind::CoreMemberAccuracy => core_member_accuracy,
                    MetricKind::RoleAssignmentAccuracy => role_assignment_accuracy,
                    MetricKind::Relevance => relevance,
                    MetricKind::DataQuality => data_quality,
                    MetricKind::Consistency => consistency,
                    MetricKind::Completeness => completeness,
                    MetricKind::Timeliness => timeliness,
                };
                value * weight
            })
            .sum::<f64>();

        let metrics = AccuracyMetrics {
            core_member_accuracy,
            role_assignment_accuracy,
            relevance,
            data_quality,
            consistency,
            completeness,
            timeliness,
            size_appropriate,
            overall_score,
        };

        let issues = self.issues(selection, &metrics, bounds.min, bounds.max);
        let high_issues = issues
            .iter()
            .filter(|issue| issue.severity == Severity::High)
            .count();

        let is_valid = high_issues == 0;
        let confidence = if metrics.overall_score >= 0.9 && high_issues == 0 {
            ConfidenceLabel::High
        } else if metrics.overall_score >= 0.7 && high_issues <= 1 {
            ConfidenceLabel::Medium
        } else {
            ConfidenceLabel::Low
        };

        ValidationResult {
            is_valid,
            confidence,
            metrics,
            issues,
        }
    }

    /// Fraction of decision-makers whose title/seniority/confidence jointly
    /// satisfy the authority heuristic. No decision-makers means zero.
    fn heuristic_core_accuracy(&self, selection: &Selection) -> f64 {
        let decision_makers: Vec<_> = selection
            .members
            .iter()
            .filter(|member| member.role == Role::DecisionMaker)
            .collect();

        if decision_makers.is_empty() {
            return 0.0;
        }

        let authoritative = decision_makers
            .iter()
            .filter(|member| {
                member.confidence >= AUTHORITY_CONFIDENCE_FLOOR
                    && self
                        .reference_classifier
                        .classify(&member.candidate)
                        .role
                        == Role::DecisionMaker
            })
            .count();

        authoritative as f64 / decision_makers.len() as f64
    }

    /// Fraction of members whose assigned role matches the reference rule
    /// table; a self-consistency check against drifted upstream classifiers.
    fn self_consistency_accuracy(&self, selection: &Selection) -> f64 {
        if selection.members.is_empty() {
            return 0.0;
        }

        let agreeing = selection
            .members
            .iter()
            .filter(|member| {
                self.reference_classifier.classify(&member.candidate).role == member.role
            })
            .count();

        agreeing as f64 / selection.members.len() as f64
    }

    /// F1 between predicted and actually-involved contact sets. Takes
    /// precedence over the heuristics whenever outcome data exists.
    fn outcome_accuracy(&self, selection: &Selection, outcome: &DealOutcome) -> (f64, f64) {
        let predicted_core: BTreeSet<&CandidateId> = selection
            .members
            .iter()
            .filter(|member| member.role == Role::DecisionMaker)
            .map(|member| &member.candidate.id)
            .collect();
        let actual_core: BTreeSet<&CandidateId> = outcome.decision_makers.iter().collect();

        let predicted_all: BTreeSet<&CandidateId> = selection
            .members
            .iter()
            .map(|member| &member.candidate.id)
            .collect();
        let actual_all: BTreeSet<&CandidateId> = outcome.involved_contacts.iter().collect();

        (
            f1_score(&predicted_core, &actual_core),
            f1_score(&predicted_all, &actual_all),
        )
    }

    fn relevance(&self, selection: &Selection, product: Option<&ProductContext>) -> f64 {
        let Some(product) = product else {
            return NEUTRAL_RELEVANCE;
        };
        if selection.members.is_empty() {
            return 0.0;
        }

        let total: f64 = selection
            .members
            .iter()
            .map(|member| member_relevance(&member.candidate, product))
            .sum();
        total / selection.members.len() as f64
    }

    fn data_quality(&self, selection: &Selection) -> f64 {
        if selection.members.is_empty() {
            return 0.0;
        }

        let weights = self.config.data_quality;
        let total: f64 = selection
            .members
            .iter()
            .map(|member| {
                let candidate = &member.candidate;
                let mut score = 0.0;
                if candidate
                    .email
                    .as_ref()
                    .is_some_and(|field| valid_email(&field.value))
                {
                    score += weights.email;
                }
                if candidate
                    .phone
                    .as_ref()
                    .is_some_and(|field| valid_phone(&field.value))
                {
                    score += weights.phone;
                }
                if candidate
                    .profile_url
                    .as_ref()
                    .is_some_and(|field| valid_profile_url(&field.value))
                {
                    score += weights.profile;
                }
                score
            })
            .sum();

        total / selection.members.len() as f64
    }

    /// Agreement between two reference-classifier passes over the selection.
    /// The rule table is pure, so a deterministic pipeline measures 1.0;
    /// AI-backed classifiers are checked through [`RoleBasedConsistency`].
    fn consistency(&self, selection: &Selection) -> f64 {
        if selection.members.is_empty() {
            return 1.0;
        }

        RoleBasedConsistency::two_pass_agreement(
            &self.reference_classifier,
            selection.members.iter().map(|member| &member.candidate),
        )
    }

    fn completeness(&self, selection: &Selection) -> f64 {
        let covered = Role::ordered()
            .into_iter()
            .filter(|role| selection.has_role(*role))
            .count();
        covered as f64 / Role::ordered().len() as f64
    }

    fn timeliness(&self, selection: &Selection, today: NaiveDate) -> f64 {
        if selection.members.is_empty() {
            return 0.0;
        }

        let fresh = selection
            .members
            .iter()
            .filter(|member| {
                member
                    .candidate
                    .data_refreshed_on
                    .is_some_and(|refreshed| {
                        (today - refreshed).num_days() <= self.config.staleness_days
                    })
            })
            .count();

        fresh as f64 / selection.members.len() as f64
    }

    fn issues(
        &self,
        selection: &Selection,
        metrics: &AccuracyMetrics,
        tier_min: usize,
        tier_max: usize,
    ) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        let missing_required: Vec<Role> = self
            .quotas
            .required_roles()
            .into_iter()
            .filter(|role| !selection.has_role(*role))
            .collect();
        if !missing_required.is_empty() {
            let mut details = BTreeMap::new();
            details.insert(
                "missing_roles".to_string(),
                missing_required
                    .iter()
                    .map(|role| role.label())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            details.insert(
                "completeness".to_string(),
                format!("{:.2}", metrics.completeness),
            );
            issues.push(ValidationIssue {
                issue_type: IssueType::MissingRoles,
                severity: Severity::High,
                description: "required committee roles are unrepresented".to_string(),
                details,
                recommendation:
                    "widen the candidate pool or relax department filters to surface the missing roles"
                        .to_string(),
            });
        }

        if metrics.core_member_accuracy < CORE_ACCURACY_THRESHOLD {
            issues.push(metric_issue(
                IssueType::LowCoreAccuracy,
                Severity::High,
                "decision-maker members fail the authority heuristic",
                "core_member_accuracy",
                metrics.core_member_accuracy,
                CORE_ACCURACY_THRESHOLD,
                "re-verify titles and seniority for flagged decision-makers",
            ));
        }

        if metrics.role_assignment_accuracy < ROLE_ACCURACY_THRESHOLD {
            issues.push(metric_issue(
                IssueType::RoleMisassignment,
                Severity::High,
                "assigned roles disagree with the reference rule table",
                "role_assignment_accuracy",
                metrics.role_assignment_accuracy,
                ROLE_ACCURACY_THRESHOLD,
                "re-run classification with refreshed titles and departments",
            ));
        }

        if !metrics.size_appropriate {
            let mut details = BTreeMap::new();
            details.insert("total".to_string(), selection.total.to_string());
            details.insert("expected_min".to_string(), tier_min.to_string());
            details.insert("expected_max".to_string(), tier_max.to_string());
            issues.push(ValidationIssue {
                issue_type: IssueType::SizeOutOfRange,
                severity: Severity::High,
                description: "selection size falls outside the tier bounds".to_string(),
                details,
                recommendation: "adjust quotas or source additional candidates for this tier"
                    .to_string(),
            });
        }

        if metrics.relevance < RELEVANCE_THRESHOLD {
            issues.push(metric_issue(
                IssueType::LowRelevance,
                Severity::Medium,
                "members show weak alignment with the product profile",
                "relevance",
                metrics.relevance,
                RELEVANCE_THRESHOLD,
                "bias sourcing toward the product's target departments",
            ));
        }

        if metrics.data_quality < DATA_QUALITY_THRESHOLD {
            issues.push(metric_issue(
                IssueType::PoorDataQuality,
                Severity::Medium,
                "contact data is incomplete or malformed across members",
                "data_quality",
                metrics.data_quality,
                DATA_QUALITY_THRESHOLD,
                "run contact verification for members missing email or phone",
            ));
        }

        if metrics.consistency < CONSISTENCY_THRESHOLD {
            issues.push(metric_issue(
                IssueType::InconsistentAssignments,
                Severity::Medium,
                "repeated classification passes disagree",
                "consistency",
                metrics.consistency,
                CONSISTENCY_THRESHOLD,
                "pin the classifier variant or review AI-backed scorer drift",
            ));
        }

        if metrics.timeliness < TIMELINESS_THRESHOLD {
            issues.push(metric_issue(
                IssueType::StaleMemberData,
                Severity::Low,
                "member records exceed the staleness window",
                "timeliness",
                metrics.timeliness,
                TIMELINESS_THRESHOLD,
                "refresh member profiles from the directory source",
            ));
        }

        issues
    }
}

fn metric_issue(
    issue_type: IssueType,
    severity: Severity,
    description: &str,
    metric: &str,
    value: f64,
    threshold: f64,
    recommendation: &str,
) -> ValidationIssue {
    let mut details = BTreeMap::new();
    details.insert(metric.to_string(), format!("{value:.2}"));
    details.insert("threshold".to_string(), format!("{threshold:.2}"));
    ValidationIssue {
        issue_type,
        severity,
        description: description.to_string(),
        details,
        recommendation: recommendation.to_string(),
    }
}

fn f1_score(predicted: &BTreeSet<&CandidateId>, actual: &BTreeSet<&CandidateId>) -> f64 {
    if predicted.is_empty() && actual.is_empty() {
        return 1.0;
    }
    if predicted.is_empty() || actual.is_empty() {
        return 0.0;
    }

    let true_positives = predicted.intersection(actual).count() as f64;
    if true_positives == 0.0 {
        return 0.0;
    }

    let precision = true_positives / predicted.len() as f64;
    let recall = true_positives / actual.len() as f64;
    2.0 * precision * recall / (precision + recall)
}

fn member_relevance(candidate: &Candidate, product: &ProductContext) -> f64 {
    let mut score: f64 = 0.4;

    if let Some(department) = candidate.department.as_deref() {
        let department = department.to_ascii_lowercase();
        if product
            .target_departments
            .iter()
            .any(|target| department.contains(&target.to_ascii_lowercase()))
        {
            score += 0.4;
        }
    }

    if let Some(title) = candidate.title.as_deref() {
        let title = title.to_ascii_lowercase();
        if product
            .keywords
            .iter()
            .any(|keyword| title.contains(&keyword.to_ascii_lowercase()))
        {
            score += 0.2;
        }
    }

    score.min(1.0)
}

fn valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn valid_phone(value: &str) -> bool {
    value.chars().filter(|ch| ch.is_ascii_digit()).count() >= 7
}

fn valid_profile_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
