//! Quota-bounded greedy selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{
    ClassifiedCandidate, CommitteeMember, Role, Selection, SelectionShortfall, SizeTier,
};

/// Members at or above this role priority warrant full-profile collection by
/// the downstream verification collaborator.
const FULL_PROFILE_PRIORITY_CUTOFF: u8 = 3;

/// Inclusive [min, max] bound on a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaRange {
    pub min: usize,
    pub max: usize,
}

impl QuotaRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

/// Fatal quota-configuration problems, surfaced at load time.
#[derive(Debug, thiserror::Error)]
pub enum QuotaConfigError {
    #[error("no quota declared for role '{}'", role.label())]
    MissingRoleQuota { role: Role },
    #[error("quota for '{context}' has min {min} greater than max {max}")]
    InvertedRange {
        context: &'static str,
        min: usize,
        max: usize,
    },
}

/// Per-role quotas plus the size-tier table bounding the group total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaConfig {
    role_quotas: BTreeMap<Role, QuotaRange>,
    tier_bounds: BTreeMap<SizeTier, QuotaRange>,
}

impl QuotaConfig {
    /// Validates that every role and tier carries a sane range. Violations are
    /// configuration errors and never surface mid-selection.
    pub fn new(
        role_quotas: BTreeMap<Role, QuotaRange>,
        tier_bounds: BTreeMap<SizeTier, QuotaRange>,
    ) -> Result<Self, QuotaConfigError> {
        for role in Role::ordered() {
            let range = role_quotas
                .get(&role)
                .ok_or(QuotaConfigError::MissingRoleQuota { role })?;
            if range.min > range.max {
                return Err(QuotaConfigError::InvertedRange {
                    context: role.label(),
                    min: range.min,
                    max: range.max,
                });
            }
        }

        for tier in SizeTier::ordered() {
            let range = tier_bounds.get(&tier).copied().unwrap_or_else(|| {
                // Tiers default to the widest declared neighbor rather than
                // failing; roles have no such fallback.
                QuotaRange::new(2, 16)
            });
            if range.min > range.max {
                return Err(QuotaConfigError::InvertedRange {
                    context: tier.label(),
                    min: range.min,
                    max: range.max,
                });
            }
        }

        Ok(Self {
            role_quotas,
            tier_bounds,
        })
    }

    /// Declared defaults for the committee use case.
    pub fn standard() -> Self {
        let role_quotas = BTreeMap::from([
            (Role::DecisionMaker, QuotaRange::new(1, 3)),
            (Role::Champion, QuotaRange::new(1, 2)),
            (Role::Stakeholder, QuotaRange::new(0, 6)),
            (Role::Blocker, QuotaRange::new(0, 2)),
            (Role::Introducer, QuotaRange::new(0, 3)),
        ]);
        let tier_bounds = BTreeMap::from([
            (SizeTier::Micro, QuotaRange::new(2, 4)),
            (SizeTier::Small, QuotaRange::new(4, 8)),
            (SizeTier::MidMarket, QuotaRange::new(6, 12)),
            (SizeTier::Large, QuotaRange::new(8, 15)),
            (SizeTier::Enterprise, QuotaRange::new(10, 16)),
        ]);

        Self::new(role_quotas, tier_bounds).expect("declared defaults are valid")
    }

    pub fn role_quota(&self, role: Role) -> QuotaRange {
        self.role_quotas
            .get(&role)
            .copied()
            .expect("constructor guarantees every role has a quota")
    }

    pub fn tier_bounds(&self, tier: SizeTier) -> QuotaRange {
        self.tier_bounds
            .get(&tier)
            .copied()
            .unwrap_or(QuotaRange::new(2, 16))
    }

    /// Roles whose quota minimum is at least one; these must be represented
    /// for a selection to be considered complete.
    pub fn required_roles(&self) -> Vec<Role> {
        Role::ordered()
            .into_iter()
            .filter(|role| self.role_quota(*role).min >= 1)
            .collect()
    }
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Greedy selector honoring per-role and tier-total quotas.
#[derive(Debug, Clone, Default)]
pub struct QuotaSelector {
    config: QuotaConfig,
}

impl QuotaSelector {
    pub fn new(config: QuotaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QuotaConfig {
        &self.config
    }

    /// Produce the final selection for `tier` from a classified pool.
    ///
    /// Admission order is a total order — priority descending, confidence
    /// descending, candidate id ascending — so two runs over identical input
    /// produce byte-identical selections regardless of upstream arrival order.
    /// Unmet minimums are reported as shortfalls, never fabricated away.
    pub fn select(&self, mut pool: Vec<ClassifiedCandidate>, tier: SizeTier) -> Selection {
        pool.sort_by(|a, b| {
            b.assignment
                .role
                .priority()
                .cmp(&a.assignment.role.priority())
                .then(b.assignment.confidence.cmp(&a.assignment.confidence))
                .then(a.candidate.id.cmp(&b.candidate.id))
        });

        let tier_bounds = self.config.tier_bounds(tier);
        let mut available: BTreeMap<Role, usize> = BTreeMap::new();
        for entry in &pool {
            *available.entry(entry.assignment.role).or_insert(0) += 1;
        }

        let mut members: Vec<CommitteeMember> = Vec::new();
        let mut role_counts: BTreeMap<Role, usize> = BTreeMap::new();

        for entry in &pool {
            if members.len() >= tier_bounds.max {
                break;
            }

            let role = entry.assignment.role;
            let admitted = role_counts.get(&role).copied().unwrap_or(0);
            if admitted >= self.config.role_quota(role).max {
                continue;
            }

            *role_counts.entry(role).or_insert(0) += 1;
            members.push(CommitteeMember {
                candidate: entry.candidate.clone(),
                role,
                confidence: entry.assignment.confidence,
                evidence: entry.assignment.evidence.clone(),
                collect_full_profile: role.priority() >= FULL_PROFILE_PRIORITY_CUTOFF,
            });
        }

        let mut shortfalls = Vec::new();
        for role in Role::ordered() {
            let quota = self.config.role_quota(role);
            let admitted = role_counts.get(&role).copied().unwrap_or(0);
            if admitted < quota.min {
                shortfalls.push(SelectionShortfall::Role {
                    role,
                    required: quota.min,
                    admitted,
                    available: available.get(&role).copied().unwrap_or(0),
                });
            }
        }

        if members.len() < tier_bounds.min {
            shortfalls.push(SelectionShortfall::GroupSize {
                required: tier_bounds.min,
                admitted: members.len(),
                pool: pool.len(),
            });
        }

        let total = members.len();
        let overall_confidence = if members.is_empty() {
            Selection::EMPTY_CONFIDENCE
        } else {
            members
                .iter()
                .map(|member| member.confidence as f64)
                .sum::<f64>()
                / total as f64
        };

        Selection {
            members,
            role_counts,
            total,
            overall_confidence,
            shortfalls,
        }
    }
}
