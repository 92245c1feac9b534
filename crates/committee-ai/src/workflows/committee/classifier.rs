//! Rule-ordered role classification.
//!
//! Rules are evaluated in a fixed priority order so a candidate matching
//! several patterns (a VP of Legal, say) resolves deterministically to the
//! higher-priority rule. The first matching rule wins and sets the base
//! confidence for its tier; auxiliary signals add small capped bonuses.

use super::domain::{Candidate, Role, RoleAssignment};

/// Maps one candidate to a role with confidence and evidence. Implementations
/// must be pure: identical input yields an identical assignment. The shipped
/// implementation is [`RuleBasedRoleClassifier`]; an AI-backed variant can be
/// plugged in behind this trait at construction time.
pub trait RoleClassifier: Send + Sync {
    fn classify(&self, candidate: &Candidate) -> RoleAssignment;
}

const VERIFIED_CONTACT_BONUS: u8 = 5;
const ACTIVE_TENURE_BONUS: u8 = 5;

const SENIOR_TITLE_KEYWORDS: &[&str] = &[
    "chief", "ceo", "cto", "cfo", "coo", "cio", "ciso", "cro", "cmo", "founder",
    "co-founder", "president", "owner", "vp", "vice president", "svp", "evp",
    "general manager", "managing director",
];

const TOP_SENIORITY_LABELS: &[&str] = &[
    "c_suite", "c-suite", "c level", "c-level", "founder", "owner", "partner", "vp",
    "executive",
];

const MID_SENIOR_TITLE_KEYWORDS: &[&str] = &[
    "director", "head of", "lead", "principal", "senior manager", "manager",
];

const REVENUE_DEPARTMENTS: &[&str] = &[
    "sales", "marketing", "revenue", "growth", "business development", "product",
    "demand generation",
];

const BLOCKER_KEYWORDS: &[&str] = &[
    "legal", "compliance", "security", "procurement", "privacy", "risk", "counsel",
    "purchasing", "vendor management", "infosec",
];

const INTRODUCER_DEPARTMENTS: &[&str] = &[
    "sales", "business development", "partnerships", "customer success",
    "account management", "alliances",
];

const INTRODUCER_TITLE_KEYWORDS: &[&str] = &[
    "account executive", "account manager", "customer success", "sales development",
    "business development", "partner manager", "solutions consultant",
];

struct ClassificationRule {
    role: Role,
    base_confidence: u8,
    matches: fn(&Candidate) -> bool,
    evidence: fn(&Candidate) -> String,
}

/// Ordered rule table. Decision-maker signals are tested first, stakeholder is
/// the unconditional fallback at the end.
const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        role: Role::DecisionMaker,
        base_confidence: 90,
        matches: |candidate| {
            has_keyword(candidate.title.as_deref(), SENIOR_TITLE_KEYWORDS)
                && top_level_seniority(candidate)
        },
        evidence: |candidate| {
            format!(
                "senior title '{}' with top-level seniority",
                candidate.title.as_deref().unwrap_or("unknown")
            )
        },
    },
    ClassificationRule {
        role: Role::Champion,
        base_confidence: 80,
        matches: |candidate| {
            has_keyword(candidate.title.as_deref(), MID_SENIOR_TITLE_KEYWORDS)
                && has_keyword(candidate.department.as_deref(), REVENUE_DEPARTMENTS)
        },
        evidence: |candidate| {
            format!(
                "mid-senior title '{}' in revenue-adjacent department '{}'",
                candidate.title.as_deref().unwrap_or("unknown"),
                candidate.department.as_deref().unwrap_or("unknown")
            )
        },
    },
    ClassificationRule {
        role: Role::Blocker,
        base_confidence: 75,
        matches: |candidate| {
            has_keyword(candidate.department.as_deref(), BLOCKER_KEYWORDS)
                || has_keyword(candidate.title.as_deref(), BLOCKER_KEYWORDS)
        },
        evidence: |candidate| {
            format!(
                "legal/compliance/security/procurement signal in '{}'",
                candidate
                    .department
                    .as_deref()
                    .or(candidate.title.as_deref())
                    .unwrap_or("unknown")
            )
        },
    },
    ClassificationRule {
        role: Role::Introducer,
        base_confidence: 65,
        matches: |candidate| {
            has_keyword(candidate.department.as_deref(), INTRODUCER_DEPARTMENTS)
                || has_keyword(candidate.title.as_deref(), INTRODUCER_TITLE_KEYWORDS)
        },
        evidence: |candidate| {
            format!(
                "customer-facing position '{}'",
                candidate
                    .title
                    .as_deref()
                    .or(candidate.department.as_deref())
                    .unwrap_or("unknown")
            )
        },
    },
    ClassificationRule {
        role: Role::Stakeholder,
        base_confidence: 50,
        matches: |_| true,
        evidence: |_| "no higher-priority pattern matched; default stakeholder".to_string(),
    },
];

fn has_keyword(value: Option<&str>, keywords: &[&str]) -> bool {
    let Some(value) = value else {
        return false;
    };
    let value = value.to_ascii_lowercase();
    keywords.iter().any(|keyword| {
        // Short acronyms ("coo", "vp") must match a whole token; "coordinator"
        // is not a COO.
        if keyword.len() <= 4 && !keyword.contains(' ') {
            value
                .split(|ch: char| !ch.is_ascii_alphanumeric())
                .any(|token| token == *keyword)
        } else {
            value.contains(keyword)
        }
    })
}

/// Top-level seniority check. When the provider omitted a seniority label the
/// title itself decides, so a bare "CEO" record still classifies correctly.
fn top_level_seniority(candidate: &Candidate) -> bool {
    match candidate.seniority.as_deref() {
        Some(label) => has_keyword(Some(label), TOP_SENIORITY_LABELS),
        None => has_keyword(candidate.title.as_deref(), SENIOR_TITLE_KEYWORDS),
    }
}

/// Deterministic, rule-table-backed classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedRoleClassifier;

impl RoleClassifier for RuleBasedRoleClassifier {
    fn classify(&self, candidate: &Candidate) -> RoleAssignment {
        let rule = CLASSIFICATION_RULES
            .iter()
            .find(|rule| (rule.matches)(candidate))
            .unwrap_or_else(|| {
                // The stakeholder fallback matches unconditionally.
                CLASSIFICATION_RULES
                    .last()
                    .expect("rule table is non-empty")
            });

        let mut confidence = rule.base_confidence;
        let mut evidence = vec![(rule.evidence)(candidate)];

        if candidate.has_verified_contact() {
            confidence = confidence.saturating_add(VERIFIED_CONTACT_BONUS).min(100);
            evidence.push("verified contact information on file".to_string());
        }
        if candidate.active_tenure {
            confidence = confidence.saturating_add(ACTIVE_TENURE_BONUS).min(100);
            evidence.push("currently employed at the target organization".to_string());
        }

        RoleAssignment {
            role: rule.role,
            confidence,
            evidence,
        }
    }
}

/// Stability probe for classifier implementations. Runs the classifier twice
/// over the same candidates and reports the fraction of agreeing assignments.
/// A pure rule table always measures 1.0; AI-backed variants may not.
pub struct RoleBasedConsistency;

impl RoleBasedConsistency {
    pub fn two_pass_agreement<'a, C, I>(classifier: &C, candidates: I) -> f64
    where
        C: RoleClassifier + ?Sized,
        I: IntoIterator<Item = &'a Candidate>,
    {
        let mut total = 0usize;
        let mut agreeing = 0usize;
        for candidate in candidates {
            total += 1;
            if classifier.classify(candidate).role == classifier.classify(candidate).role {
                agreeing += 1;
            }
        }
        if total == 0 {
            1.0
        } else {
            agreeing as f64 / total as f64
        }
    }
}
