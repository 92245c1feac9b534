//! Weighted signal scoring: component scorers feed a composite engine that
//! buckets the weighted sum into an ordered classification band table.

pub mod account;
mod config;
pub mod org;

pub use config::{
    account_engine, tension_engine, Band, ScoringConfigError, WeightTable,
    ACCOUNT_COMPONENTS, TENSION_COMPONENTS,
};

use serde::{Deserialize, Serialize};

/// Score baseline every component scorer starts from.
pub const BASELINE_SCORE: f64 = 50.0;

/// How many contributing components a composite reports.
const TOP_CONTRIBUTOR_COUNT: usize = 3;

/// A single named sub-signal rated on the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub name: &'static str,
    pub score: f64,
    pub evidence: Vec<String>,
    pub implication: String,
}

/// One entry in the ranked contributor list of a composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: &'static str,
    pub score: f64,
    pub weighted: f64,
}

/// Weighted sum of component scores with its classification label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub score: f64,
    pub classification: &'static str,
    pub top_contributors: Vec<Contributor>,
}

/// Input-contract violations raised by a composite call. Configuration
/// problems surface earlier, at engine construction.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("component '{name}' is declared in the weight table but was not supplied")]
    MissingComponent { name: &'static str },
}

/// Interface every concrete scorer satisfies so an AI-backed variant can be
/// substituted at construction time without touching the scoring pipeline.
pub trait ComponentScorer<S>: Send + Sync {
    fn name(&self) -> &'static str;
    fn score(&self, signals: &S) -> ComponentScore;
}

/// One rule in an ordered scorer table: predicate, score delta, evidence.
///
/// Rules are evaluated in declaration order and their deltas accumulate from
/// [`BASELINE_SCORE`], clamped after every application so no single rule can
/// leave the 0-100 range.
pub(crate) struct SignalRule<S> {
    pub(crate) delta: f64,
    pub(crate) applies: fn(&S) -> bool,
    pub(crate) evidence: fn(&S) -> String,
}

pub(crate) fn apply_rules<S>(
    name: &'static str,
    signals: &S,
    rules: &[SignalRule<S>],
    implication: fn(f64) -> String,
) -> ComponentScore {
    let mut score = BASELINE_SCORE;
    let mut evidence = Vec::new();

    for rule in rules {
        if (rule.applies)(signals) {
            score = (score + rule.delta).clamp(0.0, 100.0);
            evidence.push((rule.evidence)(signals));
        }
    }

    if evidence.is_empty() {
        evidence.push(format!(
            "no usable {name} signals; holding at baseline {BASELINE_SCORE:.0}"
        ));
    }

    ComponentScore {
        name,
        score,
        evidence,
        implication: implication(score),
    }
}

/// Combines a declared set of component scores through a validated weight
/// table and buckets the result via the band table.
#[derive(Debug, Clone)]
pub struct CompositeEngine {
    weights: WeightTable,
    bands: Vec<Band>,
}

impl CompositeEngine {
    /// Build an engine, validating both tables. Violations are configuration
    /// errors and must be surfaced at startup, never mid-computation.
    pub fn new(weights: WeightTable, bands: Vec<Band>) -> Result<Self, ScoringConfigError> {
        weights.validate()?;
        config::validate_bands(&bands)?;
        Ok(Self { weights, bands })
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Weighted combination of `components`. Every name declared in the weight
    /// table must be present; a missing component fails the call rather than
    /// silently biasing the composite downward.
    pub fn combine(&self, components: &[ComponentScore]) -> Result<CompositeScore, ScoringError> {
        let mut total = 0.0;
        let mut contributors = Vec::with_capacity(self.weights.entries().len());

        for (name, weight) in self.weights.entries() {
            let component = components
                .iter()
                .find(|component| component.name == *name)
                .ok_or(ScoringError::MissingComponent { name })?;

            let weighted = component.score * weight;
            total += weighted;
            contributors.push(Contributor {
                name,
                score: component.score,
                weighted,
            });
        }

        let score = total.clamp(0.0, 100.0);

        // Stable sort keeps weight-declaration order for tied products.
        contributors.sort_by(|a, b| {
            b.weighted
                .partial_cmp(&a.weighted)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        contributors.truncate(TOP_CONTRIBUTOR_COUNT);

        Ok(CompositeScore {
            score,
            classification: self.classify(score),
            top_contributors: contributors,
        })
    }

    /// First band (highest floor first) whose floor is at or below `score`.
    pub fn classify(&self, score: f64) -> &'static str {
        self.bands
            .iter()
            .find(|band| score >= band.floor)
            .map(|band| band.label)
            .unwrap_or_else(|| {
                // Validation pins the last floor at zero, so this arm is
                // unreachable for scores already clamped to [0, 100].
                self.bands.last().map(|band| band.label).unwrap_or("unclassified")
            })
    }
}
