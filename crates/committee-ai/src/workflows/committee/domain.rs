use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidate records supplied by a directory source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Identifier wrapper for a target organization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrgId(pub String);

/// Contact detail with the verification state reported by the upstream provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactField {
    pub value: String,
    pub verified: bool,
    /// Provider-reported confidence as a percentage in [0, 100].
    pub confidence: u8,
}

/// One prior employment entry, newest first in `Candidate::prior_employers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentStint {
    pub employer: String,
    pub title: String,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

/// Social engagement counters exported by people-data providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementCounters {
    pub connections: Option<u32>,
    pub followers: Option<u32>,
}

/// A person under consideration for a committee role.
///
/// Every field beyond the identifier and display name is optional by design:
/// heterogeneous directory sources map their native shapes onto this struct and
/// frequently deliver partial records. Scoring degrades rather than failing on
/// gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub full_name: String,
    pub title: Option<String>,
    pub department: Option<String>,
    pub seniority: Option<String>,
    pub tenure_months: Option<u32>,
    /// Whether the person is currently employed at the target organization.
    pub active_tenure: bool,
    pub prior_employers: Vec<EmploymentStint>,
    pub engagement: EngagementCounters,
    pub email: Option<ContactField>,
    pub phone: Option<ContactField>,
    pub profile_url: Option<ContactField>,
    /// When the backing record was last refreshed by the provider.
    pub data_refreshed_on: Option<NaiveDate>,
}

impl Candidate {
    /// True when any contact field carries a provider verification.
    pub fn has_verified_contact(&self) -> bool {
        [&self.email, &self.phone, &self.profile_url]
            .into_iter()
            .flatten()
            .any(|field| field.verified)
    }
}

/// Closed taxonomy of functional committee roles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    DecisionMaker,
    Champion,
    Stakeholder,
    Blocker,
    Introducer,
}

impl Role {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::DecisionMaker,
            Self::Champion,
            Self::Stakeholder,
            Self::Blocker,
            Self::Introducer,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DecisionMaker => "decision_maker",
            Self::Champion => "champion",
            Self::Stakeholder => "stakeholder",
            Self::Blocker => "blocker",
            Self::Introducer => "introducer",
        }
    }

    /// Coarse importance used by the selector's admission order.
    pub const fn priority(self) -> u8 {
        match self {
            Self::DecisionMaker => 5,
            Self::Champion => 4,
            Self::Blocker => 3,
            Self::Introducer => 2,
            Self::Stakeholder => 1,
        }
    }
}

/// Role decision for a single candidate with the rule evidence that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub role: Role,
    /// Confidence in [0, 100].
    pub confidence: u8,
    pub evidence: Vec<String>,
}

/// Candidate plus its role assignment, the selector's input shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedCandidate {
    pub candidate: Candidate,
    pub assignment: RoleAssignment,
}

/// A candidate admitted into the final selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMember {
    pub candidate: Candidate,
    pub role: Role,
    pub confidence: u8,
    pub evidence: Vec<String>,
    /// Set by the selector when the member warrants the expensive full-profile
    /// collection performed by an external collaborator.
    pub collect_full_profile: bool,
}

/// Unmet minimums surfaced as data instead of fabricated members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SelectionShortfall {
    Role {
        role: Role,
        required: usize,
        admitted: usize,
        available: usize,
    },
    GroupSize {
        required: usize,
        admitted: usize,
        pool: usize,
    },
}

/// Final role-tagged subset produced by the quota selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub members: Vec<CommitteeMember>,
    pub role_counts: BTreeMap<Role, usize>,
    pub total: usize,
    /// Mean member confidence, or [`Selection::EMPTY_CONFIDENCE`] when empty.
    pub overall_confidence: f64,
    pub shortfalls: Vec<SelectionShortfall>,
}

impl Selection {
    /// Declared default confidence for an empty selection.
    pub const EMPTY_CONFIDENCE: f64 = 0.0;

    pub fn count_for(&self, role: Role) -> usize {
        self.role_counts.get(&role).copied().unwrap_or(0)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.count_for(role) > 0
    }
}

/// Organization-size bucket that determines total selection bounds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SizeTier {
    Micro,
    Small,
    MidMarket,
    Large,
    Enterprise,
}

impl SizeTier {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Micro,
            Self::Small,
            Self::MidMarket,
            Self::Large,
            Self::Enterprise,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Micro => "micro",
            Self::Small => "small",
            Self::MidMarket => "mid_market",
            Self::Large => "large",
            Self::Enterprise => "enterprise",
        }
    }

    /// Bucket a headcount into a tier; unknown headcount resolves to micro.
    pub fn from_headcount(headcount: Option<u32>) -> Self {
        match headcount {
            Some(count) if count >= 5_000 => Self::Enterprise,
            Some(count) if count >= 1_000 => Self::Large,
            Some(count) if count >= 100 => Self::MidMarket,
            Some(count) if count >= 20 => Self::Small,
            _ => Self::Micro,
        }
    }
}

/// Organization record supplied by a directory source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgRecord {
    pub id: OrgId,
    pub name: String,
    pub headcount: Option<u32>,
    /// Trailing twelve-month headcount growth as a percentage.
    pub headcount_growth_pct: Option<f64>,
    pub last_funding_on: Option<NaiveDate>,
    pub industry: Option<String>,
    pub technologies: Vec<String>,
    /// Observed product-adoption signals (trial signups, community members).
    pub adoption_signals: Option<u32>,
}

impl OrgRecord {
    pub fn size_tier(&self) -> SizeTier {
        SizeTier::from_headcount(self.headcount)
    }
}

/// Product-fit profile an integrating caller may supply to sharpen relevance
/// and technology scoring. Absent profiles fall back to neutral defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductContext {
    pub target_departments: Vec<String>,
    pub target_industries: Vec<String>,
    pub complementary_technologies: Vec<String>,
    pub keywords: Vec<String>,
}

/// Historical ground truth for a closed deal, enabling F1-based validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealOutcome {
    /// Contacts that actually participated in the buying process.
    pub involved_contacts: Vec<CandidateId>,
    /// Subset of `involved_contacts` who held final authority.
    pub decision_makers: Vec<CandidateId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_tier_buckets_headcount() {
        assert_eq!(SizeTier::from_headcount(None), SizeTier::Micro);
        assert_eq!(SizeTier::from_headcount(Some(8)), SizeTier::Micro);
        assert_eq!(SizeTier::from_headcount(Some(20)), SizeTier::Small);
        assert_eq!(SizeTier::from_headcount(Some(450)), SizeTier::MidMarket);
        assert_eq!(SizeTier::from_headcount(Some(1_000)), SizeTier::Large);
        assert_eq!(SizeTier::from_headcount(Some(12_000)), SizeTier::Enterprise);
    }

    #[test]
    fn role_priorities_put_decision_makers_first() {
        let mut roles = Role::ordered().to_vec();
        roles.sort_by_key(|role| std::cmp::Reverse(role.priority()));
        assert_eq!(roles[0], Role::DecisionMaker);
        assert_eq!(roles[1], Role::Champion);
        assert_eq!(*roles.last().expect("five roles"), Role::Stakeholder);
    }

    #[test]
    fn verified_contact_checks_any_field() {
        let mut candidate = Candidate {
            id: CandidateId("c-1".to_string()),
            full_name: "Dana Reyes".to_string(),
            title: None,
            department: None,
            seniority: None,
            tenure_months: None,
            active_tenure: true,
            prior_employers: Vec::new(),
            engagement: EngagementCounters::default(),
            email: None,
            phone: None,
            profile_url: None,
            data_refreshed_on: None,
        };
        assert!(!candidate.has_verified_contact());

        candidate.phone = Some(ContactField {
            value: "+1 515 555 0100".to_string(),
            verified: true,
            confidence: 88,
        });
        assert!(candidate.has_verified_contact());
    }
}
