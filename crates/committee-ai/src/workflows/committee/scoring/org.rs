//! Organizational-tension component scorers.
//!
//! Each scorer owns an ordered rule table over a small derived view of the raw
//! signals. Deltas stack additively from the baseline and are clamped on every
//! write; sparse input degrades to baseline with a gap note instead of failing.

use serde::{Deserialize, Serialize};

use super::{apply_rules, ComponentScore, ComponentScorer, SignalRule};

/// Raw organizational signals as delivered by directory collaborators. Every
/// field is optional; scorers tolerate any subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrgSignals {
    pub headcount: Option<u32>,
    pub manager_count: Option<u32>,
    pub individual_contributors: Option<u32>,
    pub leadership_openings: Option<u32>,
    pub open_requisitions: Option<u32>,
    pub attrition_pct: Option<f64>,
    pub headcount_growth_pct: Option<f64>,
    pub reporting_layers: Option<u32>,
    pub industry: Option<String>,
}

/// Healthy span-of-control benchmark for an industry. The contextual
/// adjustment happens here, before any threshold in the rule table is applied.
fn span_benchmark(industry: Option<&str>) -> f64 {
    match industry.map(str::to_ascii_lowercase).as_deref() {
        Some(label) if label.contains("software") || label.contains("technology") => 8.0,
        Some(label) if label.contains("retail") || label.contains("hospitality") => 10.0,
        Some(label) if label.contains("manufactur") => 5.0,
        Some(label) if label.contains("health") => 6.0,
        Some(label) if label.contains("financ") => 6.0,
        _ => 6.5,
    }
}

struct RatioView {
    /// Individual contributors per manager, minus the industry benchmark.
    deviation: Option<f64>,
    span: f64,
    benchmark: f64,
}

impl RatioView {
    fn build(signals: &OrgSignals) -> Self {
        let benchmark = span_benchmark(signals.industry.as_deref());
        let span = match (signals.individual_contributors, signals.manager_count) {
            (Some(ics), Some(managers)) if managers > 0 => {
                Some(ics as f64 / managers as f64)
            }
            _ => None,
        };

        Self {
            deviation: span.map(|span| span - benchmark),
            span: span.unwrap_or(0.0),
            benchmark,
        }
    }
}

const RATIO_RULES: &[SignalRule<RatioView>] = &[
    SignalRule {
        delta: 20.0,
        applies: |view| view.deviation.is_some_and(|dev| dev >= 2.0),
        evidence: |view| {
            format!(
                "span of control {:.1} runs above the industry benchmark {:.1}",
                view.span, view.benchmark
            )
        },
    },
    SignalRule {
        delta: 15.0,
        applies: |view| view.deviation.is_some_and(|dev| dev >= 4.0),
        evidence: |view| {
            format!(
                "managers carry {:.1} reports each, {:.1} over benchmark",
                view.span,
                view.span - view.benchmark
            )
        },
    },
    SignalRule {
        delta: -15.0,
        applies: |view| view.deviation.is_some_and(|dev| dev <= -2.0),
        evidence: |view| {
            format!(
                "span of control {:.1} sits comfortably under the {:.1} benchmark",
                view.span, view.benchmark
            )
        },
    },
];

struct LeadershipView {
    openings: Option<u32>,
}

const LEADERSHIP_RULES: &[SignalRule<LeadershipView>] = &[
    SignalRule {
        delta: 10.0,
        applies: |view| view.openings.is_some_and(|count| count >= 1),
        evidence: |view| {
            format!(
                "{} open leadership role(s) signal a management gap",
                view.openings.unwrap_or(0)
            )
        },
    },
    SignalRule {
        delta: 15.0,
        applies: |view| view.openings.is_some_and(|count| count >= 3),
        evidence: |_| "three or more leadership searches running concurrently".to_string(),
    },
    SignalRule {
        delta: 10.0,
        applies: |view| view.openings.is_some_and(|count| count >= 5),
        evidence: |_| "leadership hiring at this volume suggests reorganization".to_string(),
    },
    SignalRule {
        delta: -10.0,
        applies: |view| view.openings == Some(0),
        evidence: |_| "no open leadership roles".to_string(),
    },
];

struct GrowthView {
    growth_pct: Option<f64>,
}

const GROWTH_RULES: &[SignalRule<GrowthView>] = &[
    SignalRule {
        delta: 10.0,
        applies: |view| view.growth_pct.is_some_and(|pct| pct >= 10.0),
        evidence: |view| {
            format!(
                "headcount grew {:.0}% over the trailing year",
                view.growth_pct.unwrap_or(0.0)
            )
        },
    },
    SignalRule {
        delta: 15.0,
        applies: |view| view.growth_pct.is_some_and(|pct| pct >= 25.0),
        evidence: |_| "growth above 25% typically outpaces management capacity".to_string(),
    },
    SignalRule {
        delta: 15.0,
        applies: |view| view.growth_pct.is_some_and(|pct| pct >= 50.0),
        evidence: |_| "hypergrowth pace strains every people process".to_string(),
    },
    SignalRule {
        delta: -15.0,
        applies: |view| view.growth_pct.is_some_and(|pct| pct < 0.0),
        evidence: |view| {
            format!(
                "headcount contracted {:.0}%",
                view.growth_pct.unwrap_or(0.0).abs()
            )
        },
    },
];

struct ResourceView {
    reqs_per_hundred: Option<f64>,
    attrition_pct: Option<f64>,
}

impl ResourceView {
    fn build(signals: &OrgSignals) -> Self {
        let reqs_per_hundred = match (signals.open_requisitions, signals.headcount) {
            (Some(reqs), Some(headcount)) if headcount > 0 => {
                Some(reqs as f64 * 100.0 / headcount as f64)
            }
            _ => None,
        };

        Self {
            reqs_per_hundred,
            attrition_pct: signals.attrition_pct,
        }
    }
}

const RESOURCE_RULES: &[SignalRule<ResourceView>] = &[
    SignalRule {
        delta: 15.0,
        applies: |view| view.reqs_per_hundred.is_some_and(|rate| rate >= 5.0),
        evidence: |view| {
            format!(
                "{:.1} open requisitions per 100 employees",
                view.reqs_per_hundred.unwrap_or(0.0)
            )
        },
    },
    SignalRule {
        delta: 10.0,
        applies: |view| view.reqs_per_hundred.is_some_and(|rate| rate >= 10.0),
        evidence: |_| "hiring backlog exceeds one req per ten employees".to_string(),
    },
    SignalRule {
        delta: 15.0,
        applies: |view| view.attrition_pct.is_some_and(|pct| pct >= 15.0),
        evidence: |view| {
            format!(
                "attrition at {:.0}% annualized",
                view.attrition_pct.unwrap_or(0.0)
            )
        },
    },
    SignalRule {
        delta: 10.0,
        applies: |view| view.attrition_pct.is_some_and(|pct| pct >= 25.0),
        evidence: |_| "attrition above 25% indicates systemic churn".to_string(),
    },
    SignalRule {
        delta: -10.0,
        applies: |view| view.attrition_pct.is_some_and(|pct| pct <= 5.0),
        evidence: |_| "attrition is low and stable".to_string(),
    },
];

struct ReportingView {
    layers: Option<u32>,
}

const REPORTING_RULES: &[SignalRule<ReportingView>] = &[
    SignalRule {
        delta: 15.0,
        applies: |view| view.layers.is_some_and(|layers| layers >= 5),
        evidence: |view| {
            format!(
                "{} reporting layers between ICs and the CEO",
                view.layers.unwrap_or(0)
            )
        },
    },
    SignalRule {
        delta: 15.0,
        applies: |view| view.layers.is_some_and(|layers| layers >= 7),
        evidence: |_| "seven or more layers slows every decision".to_string(),
    },
    SignalRule {
        delta: -10.0,
        applies: |view| view.layers.is_some_and(|layers| layers <= 3),
        evidence: |_| "reporting structure is flat".to_string(),
    },
];

fn tension_implication(score: f64) -> String {
    if score >= 70.0 {
        "organizational strain is acute; leadership likely feels it daily".to_string()
    } else if score >= 55.0 {
        "tension is building and worth probing in discovery".to_string()
    } else {
        "no strong tension signal in this category".to_string()
    }
}

pub struct RatioScorer;

impl ComponentScorer<OrgSignals> for RatioScorer {
    fn name(&self) -> &'static str {
        "ratio"
    }

    fn score(&self, signals: &OrgSignals) -> ComponentScore {
        let view = RatioView::build(signals);
        apply_rules(self.name(), &view, RATIO_RULES, tension_implication)
    }
}

pub struct LeadershipScorer;

impl ComponentScorer<OrgSignals> for LeadershipScorer {
    fn name(&self) -> &'static str {
        "leadership"
    }

    fn score(&self, signals: &OrgSignals) -> ComponentScore {
        let view = LeadershipView {
            openings: signals.leadership_openings,
        };
        apply_rules(self.name(), &view, LEADERSHIP_RULES, tension_implication)
    }
}

pub struct GrowthScorer;

impl ComponentScorer<OrgSignals> for GrowthScorer {
    fn name(&self) -> &'static str {
        "growth"
    }

    fn score(&self, signals: &OrgSignals) -> ComponentScore {
        let view = GrowthView {
            growth_pct: signals.headcount_growth_pct,
        };
        apply_rules(self.name(), &view, GROWTH_RULES, tension_implication)
    }
}

pub struct ResourceScorer;

impl ComponentScorer<OrgSignals> for ResourceScorer {
    fn name(&self) -> &'static str {
        "resource"
    }

    fn score(&self, signals: &OrgSignals) -> ComponentScore {
        let view = ResourceView::build(signals);
        apply_rules(self.name(), &view, RESOURCE_RULES, tension_implication)
    }
}

pub struct ReportingScorer;

impl ComponentScorer<OrgSignals> for ReportingScorer {
    fn name(&self) -> &'static str {
        "reporting"
    }

    fn score(&self, signals: &OrgSignals) -> ComponentScore {
        let view = ReportingView {
            layers: signals.reporting_layers,
        };
        apply_rules(self.name(), &view, REPORTING_RULES, tension_implication)
    }
}

/// Run the full tension family in weight-declaration order.
pub fn tension_components(signals: &OrgSignals) -> Vec<ComponentScore> {
    let scorers: [&dyn ComponentScorer<OrgSignals>; 5] = [
        &RatioScorer,
        &LeadershipScorer,
        &GrowthScorer,
        &ResourceScorer,
        &ReportingScorer,
    ];
    scorers.iter().map(|scorer| scorer.score(signals)).collect()
}
