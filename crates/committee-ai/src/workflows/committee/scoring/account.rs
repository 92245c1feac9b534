//! Account-fit component scorers used to bucket an organization into an
//! actionability tier.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{apply_rules, ComponentScore, ComponentScorer, SignalRule};
use crate::workflows::committee::domain::{OrgRecord, ProductContext};

/// Raw account signals, assembled from an [`OrgRecord`] plus the caller's
/// product context so contextual fit is resolved before any threshold fires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSignals {
    pub headcount: Option<u32>,
    pub industry_match: Option<bool>,
    pub growth_pct: Option<f64>,
    pub months_since_funding: Option<i64>,
    pub technology_overlap: usize,
    pub technologies_known: bool,
    pub adoption_signals: Option<u32>,
}

impl AccountSignals {
    pub fn from_record(record: &OrgRecord, product: &ProductContext, today: NaiveDate) -> Self {
        let industry_match = record.industry.as_deref().map(|industry| {
            let industry = industry.to_ascii_lowercase();
            product
                .target_industries
                .iter()
                .any(|target| industry.contains(&target.to_ascii_lowercase()))
        });

        let technology_overlap = record
            .technologies
            .iter()
            .filter(|tech| {
                let tech = tech.to_ascii_lowercase();
                product
                    .complementary_technologies
                    .iter()
                    .any(|wanted| tech.contains(&wanted.to_ascii_lowercase()))
            })
            .count();

        let months_since_funding = record
            .last_funding_on
            .map(|funded| (today - funded).num_days() / 30);

        Self {
            headcount: record.headcount,
            industry_match,
            growth_pct: record.headcount_growth_pct,
            months_since_funding,
            technology_overlap,
            technologies_known: !record.technologies.is_empty(),
            adoption_signals: record.adoption_signals,
        }
    }
}

const FIRMOGRAPHIC_RULES: &[SignalRule<AccountSignals>] = &[
    SignalRule {
        delta: 20.0,
        applies: |signals| {
            signals
                .headcount
                .is_some_and(|count| (100..2_000).contains(&count))
        },
        evidence: |signals| {
            format!(
                "headcount {} sits in the serviceable sweet spot",
                signals.headcount.unwrap_or(0)
            )
        },
    },
    SignalRule {
        delta: 10.0,
        applies: |signals| {
            signals
                .headcount
                .is_some_and(|count| (20..100).contains(&count) || (2_000..5_000).contains(&count))
        },
        evidence: |_| "headcount is adjacent to the core segment".to_string(),
    },
    SignalRule {
        delta: -20.0,
        applies: |signals| signals.headcount.is_some_and(|count| count < 10),
        evidence: |_| "organization is too small to carry a committee".to_string(),
    },
    SignalRule {
        delta: 20.0,
        applies: |signals| signals.industry_match == Some(true),
        evidence: |_| "industry is on the target list".to_string(),
    },
    SignalRule {
        delta: -5.0,
        applies: |signals| signals.industry_match == Some(false),
        evidence: |_| "industry falls outside the target list".to_string(),
    },
];

const ACCOUNT_GROWTH_RULES: &[SignalRule<AccountSignals>] = &[
    SignalRule {
        delta: 10.0,
        applies: |signals| signals.growth_pct.is_some_and(|pct| pct >= 10.0),
        evidence: |signals| {
            format!(
                "headcount growth of {:.0}% signals expanding budgets",
                signals.growth_pct.unwrap_or(0.0)
            )
        },
    },
    SignalRule {
        delta: 15.0,
        applies: |signals| signals.growth_pct.is_some_and(|pct| pct >= 25.0),
        evidence: |_| "growth above 25% correlates with new tooling spend".to_string(),
    },
    SignalRule {
        delta: -15.0,
        applies: |signals| signals.growth_pct.is_some_and(|pct| pct < 0.0),
        evidence: |_| "contracting headcount tightens discretionary budgets".to_string(),
    },
    SignalRule {
        delta: 15.0,
        applies: |signals| {
            signals
                .months_since_funding
                .is_some_and(|months| months <= 12)
        },
        evidence: |signals| {
            format!(
                "raised within the last {} month(s)",
                signals.months_since_funding.unwrap_or(0).max(0)
            )
        },
    },
    SignalRule {
        delta: 5.0,
        applies: |signals| {
            signals
                .months_since_funding
                .is_some_and(|months| (13..=24).contains(&months))
        },
        evidence: |_| "funding round within the last two years".to_string(),
    },
];

const TECHNOLOGY_RULES: &[SignalRule<AccountSignals>] = &[
    SignalRule {
        delta: 15.0,
        applies: |signals| signals.technology_overlap >= 1,
        evidence: |signals| {
            format!(
                "{} complementary technology match(es) in the stack",
                signals.technology_overlap
            )
        },
    },
    SignalRule {
        delta: 15.0,
        applies: |signals| signals.technology_overlap >= 3,
        evidence: |_| "stack overlap is broad enough to anchor integration talk".to_string(),
    },
    SignalRule {
        delta: -10.0,
        applies: |signals| signals.technologies_known && signals.technology_overlap == 0,
        evidence: |_| "known stack shares nothing with the product".to_string(),
    },
];

const ADOPTION_RULES: &[SignalRule<AccountSignals>] = &[
    SignalRule {
        delta: 10.0,
        applies: |signals| signals.adoption_signals.is_some_and(|count| count >= 1),
        evidence: |signals| {
            format!(
                "{} product-adoption signal(s) observed",
                signals.adoption_signals.unwrap_or(0)
            )
        },
    },
    SignalRule {
        delta: 15.0,
        applies: |signals| signals.adoption_signals.is_some_and(|count| count >= 10),
        evidence: |_| "double-digit adoption signals indicate grassroots pull".to_string(),
    },
    SignalRule {
        delta: 10.0,
        applies: |signals| signals.adoption_signals.is_some_and(|count| count >= 50),
        evidence: |_| "adoption is already organization-wide".to_string(),
    },
    SignalRule {
        delta: -10.0,
        applies: |signals| signals.adoption_signals == Some(0),
        evidence: |_| "no adoption signals recorded".to_string(),
    },
];

fn account_implication(score: f64) -> String {
    if score >= 70.0 {
        "strong fit signal; weight this account up".to_string()
    } else if score >= 45.0 {
        "mixed signal; gather more data before committing effort".to_string()
    } else {
        "weak fit; deprioritize unless other signals compensate".to_string()
    }
}

pub struct FirmographicScorer;

impl ComponentScorer<AccountSignals> for FirmographicScorer {
    fn name(&self) -> &'static str {
        "firmographic"
    }

    fn score(&self, signals: &AccountSignals) -> ComponentScore {
        apply_rules(self.name(), signals, FIRMOGRAPHIC_RULES, account_implication)
    }
}

pub struct AccountGrowthScorer;

impl ComponentScorer<AccountSignals> for AccountGrowthScorer {
    fn name(&self) -> &'static str {
        "growth"
    }

    fn score(&self, signals: &AccountSignals) -> ComponentScore {
        apply_rules(self.name(), signals, ACCOUNT_GROWTH_RULES, account_implication)
    }
}

pub struct TechnologyScorer;

impl ComponentScorer<AccountSignals> for TechnologyScorer {
    fn name(&self) -> &'static str {
        "technology"
    }

    fn score(&self, signals: &AccountSignals) -> ComponentScore {
        apply_rules(self.name(), signals, TECHNOLOGY_RULES, account_implication)
    }
}

pub struct AdoptionScorer;

impl ComponentScorer<AccountSignals> for AdoptionScorer {
    fn name(&self) -> &'static str {
        "adoption"
    }

    fn score(&self, signals: &AccountSignals) -> ComponentScore {
        apply_rules(self.name(), signals, ADOPTION_RULES, account_implication)
    }
}

/// Run the full account-fit family in weight-declaration order.
pub fn account_components(signals: &AccountSignals) -> Vec<ComponentScore> {
    let scorers: [&dyn ComponentScorer<AccountSignals>; 4] = [
        &FirmographicScorer,
        &AccountGrowthScorer,
        &TechnologyScorer,
        &AdoptionScorer,
    ];
    scorers.iter().map(|scorer| scorer.score(signals)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::committee::domain::OrgId;
    use crate::workflows::committee::scoring::BASELINE_SCORE;

    fn record() -> OrgRecord {
        OrgRecord {
            id: OrgId("acct-77".to_string()),
            name: "Harvest Robotics".to_string(),
            headcount: Some(340),
            headcount_growth_pct: Some(32.0),
            last_funding_on: NaiveDate::from_ymd_opt(2026, 2, 10),
            industry: Some("Agricultural Technology".to_string()),
            technologies: vec!["Salesforce".to_string(), "Snowflake".to_string()],
            adoption_signals: Some(12),
        }
    }

    fn product() -> ProductContext {
        ProductContext {
            target_departments: vec!["sales".to_string()],
            target_industries: vec!["technology".to_string()],
            complementary_technologies: vec!["salesforce".to_string()],
            keywords: vec!["revenue".to_string()],
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date")
    }

    #[test]
    fn signals_resolve_context_before_scoring() {
        let signals = AccountSignals::from_record(&record(), &product(), today());
        assert_eq!(signals.industry_match, Some(true));
        assert_eq!(signals.technology_overlap, 1);
        assert_eq!(signals.months_since_funding, Some(5));
    }

    #[test]
    fn firmographic_rewards_sweet_spot_and_industry() {
        let signals = AccountSignals::from_record(&record(), &product(), today());
        let component = FirmographicScorer.score(&signals);
        assert_eq!(component.score, 90.0);
    }

    #[test]
    fn sparse_record_degrades_to_baseline_with_gap_note() {
        let empty = AccountSignals::default();
        for component in account_components(&empty) {
            assert_eq!(component.score, BASELINE_SCORE, "{}", component.name);
        }
    }

    #[test]
    fn known_stack_without_overlap_scores_below_baseline() {
        let mut signals = AccountSignals::from_record(&record(), &product(), today());
        signals.technology_overlap = 0;
        let component = TechnologyScorer.score(&signals);
        assert_eq!(component.score, 40.0);
    }
}
