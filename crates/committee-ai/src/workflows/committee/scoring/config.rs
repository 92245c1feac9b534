use super::CompositeEngine;

/// Names of the organizational-tension components, in weight declaration order.
pub const TENSION_COMPONENTS: [&str; 5] =
    ["ratio", "leadership", "growth", "resource", "reporting"];

/// Names of the account-fit components, in weight declaration order.
pub const ACCOUNT_COMPONENTS: [&str; 4] = ["firmographic", "growth", "technology", "adoption"];

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Fatal configuration problems, raised at load time only.
#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("weights must sum to 1.0 (+/- {tolerance}), got {sum}")]
    WeightSum { sum: f64, tolerance: f64 },
    #[error("weight for component '{name}' must be positive, got {weight}")]
    NonPositiveWeight { name: &'static str, weight: f64 },
    #[error("duplicate weight entry for component '{name}'")]
    DuplicateComponent { name: &'static str },
    #[error("band table must contain at least one band")]
    EmptyBandTable,
    #[error("band floors must strictly decrease: '{label}' at {floor} breaks the order")]
    NonDecreasingBands { label: &'static str, floor: f64 },
    #[error("lowest band '{label}' must have floor 0 to keep bands contiguous, got {floor}")]
    OpenLowestBand { label: &'static str, floor: f64 },
}

/// Ordered weight map for one composite use case. Order is the declaration
/// order and doubles as the tie-break for contributor ranking.
#[derive(Debug, Clone)]
pub struct WeightTable {
    entries: Vec<(&'static str, f64)>,
}

impl WeightTable {
    pub fn new(entries: Vec<(&'static str, f64)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(&'static str, f64)] {
        &self.entries
    }

    pub(crate) fn validate(&self) -> Result<(), ScoringConfigError> {
        let mut sum = 0.0;
        for (index, (name, weight)) in self.entries.iter().enumerate() {
            if *weight <= 0.0 {
                return Err(ScoringConfigError::NonPositiveWeight {
                    name,
                    weight: *weight,
                });
            }
            if self.entries[..index].iter().any(|(seen, _)| seen == name) {
                return Err(ScoringConfigError::DuplicateComponent { name });
            }
            sum += weight;
        }

        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringConfigError::WeightSum {
                sum,
                tolerance: WEIGHT_SUM_TOLERANCE,
            });
        }

        Ok(())
    }
}

/// One classification band: the first band whose floor is at or below the
/// composite score wins. Tables iterate from highest floor to lowest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub floor: f64,
    pub label: &'static str,
}

pub(crate) fn validate_bands(bands: &[Band]) -> Result<(), ScoringConfigError> {
    let Some(last) = bands.last() else {
        return Err(ScoringConfigError::EmptyBandTable);
    };

    for window in bands.windows(2) {
        if window[1].floor >= window[0].floor {
            return Err(ScoringConfigError::NonDecreasingBands {
                label: window[1].label,
                floor: window[1].floor,
            });
        }
    }

    if last.floor != 0.0 {
        return Err(ScoringConfigError::OpenLowestBand {
            label: last.label,
            floor: last.floor,
        });
    }

    Ok(())
}

/// Declared engine for the organizational-tension use case.
pub fn tension_engine() -> Result<CompositeEngine, ScoringConfigError> {
    CompositeEngine::new(
        WeightTable::new(vec![
            ("ratio", 0.30),
            ("leadership", 0.20),
            ("growth", 0.20),
            ("resource", 0.20),
            ("reporting", 0.10),
        ]),
        vec![
            Band { floor: 80.0, label: "Critical" },
            Band { floor: 60.0, label: "High" },
            Band { floor: 40.0, label: "Moderate" },
            Band { floor: 0.0, label: "Low" },
        ],
    )
}

/// Declared engine for the account actionability use case.
pub fn account_engine() -> Result<CompositeEngine, ScoringConfigError> {
    CompositeEngine::new(
        WeightTable::new(vec![
            ("firmographic", 0.30),
            ("growth", 0.25),
            ("technology", 0.25),
            ("adoption", 0.20),
        ]),
        vec![
            Band { floor: 75.0, label: "Act Now" },
            Band { floor: 55.0, label: "Prioritize" },
            Band { floor: 30.0, label: "Nurture" },
            Band { floor: 0.0, label: "Monitor" },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_engines_pass_validation() {
        assert!(tension_engine().is_ok());
        assert!(account_engine().is_ok());
    }

    #[test]
    fn weight_sum_violation_fails_load() {
        let table = WeightTable::new(vec![("ratio", 0.5), ("growth", 0.4)]);
        match table.validate() {
            Err(ScoringConfigError::WeightSum { sum, .. }) => {
                assert!((sum - 0.9).abs() < 1e-9);
            }
            other => panic!("expected weight sum error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_component_fails_load() {
        let table = WeightTable::new(vec![("ratio", 0.5), ("ratio", 0.5)]);
        assert!(matches!(
            table.validate(),
            Err(ScoringConfigError::DuplicateComponent { name: "ratio" })
        ));
    }

    #[test]
    fn band_tables_reject_gaps_and_overlaps() {
        let overlapping = vec![
            Band { floor: 60.0, label: "High" },
            Band { floor: 60.0, label: "Moderate" },
            Band { floor: 0.0, label: "Low" },
        ];
        assert!(matches!(
            validate_bands(&overlapping),
            Err(ScoringConfigError::NonDecreasingBands { .. })
        ));

        let open_bottom = vec![
            Band { floor: 60.0, label: "High" },
            Band { floor: 20.0, label: "Low" },
        ];
        assert!(matches!(
            validate_bands(&open_bottom),
            Err(ScoringConfigError::OpenLowestBand { .. })
        ));

        assert!(matches!(
            validate_bands(&[]),
            Err(ScoringConfigError::EmptyBandTable)
        ));
    }
}
