use super::normalizer::normalize_label;
use std::collections::HashMap;
use std::sync::OnceLock;

static DEPARTMENT_MAP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();
static SENIORITY_MAP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

/// Canonical department label for a normalized Apollo department slug.
/// Unknown departments pass through untouched rather than being dropped.
pub(crate) fn canonical_department(raw: &str) -> Option<String> {
    let normalized = normalize_label(raw);
    // Apollo emits semicolon-separated department lists; the first entry is
    // the primary department.
    let primary = normalized.split(';').next().unwrap_or(&normalized).trim();
    if primary.is_empty() {
        return None;
    }

    Some(
        department_map()
            .get(primary)
            .map(|label| (*label).to_string())
            .unwrap_or_else(|| primary.to_string()),
    )
}

/// Canonical seniority label for a normalized Apollo seniority value.
pub(crate) fn canonical_seniority(raw: &str) -> Option<&'static str> {
    let normalized = normalize_label(raw);
    seniority_map().get(normalized.as_str()).copied()
}

fn department_map() -> &'static HashMap<String, &'static str> {
    DEPARTMENT_MAP.get_or_init(|| {
        const ENTRIES: &[(&str, &str)] = &[
            ("c suite", "Executive"),
            ("c_suite", "Executive"),
            ("executive", "Executive"),
            ("founder", "Executive"),
            ("master sales", "Sales"),
            ("sales", "Sales"),
            ("sales executive", "Sales"),
            ("business development", "Business Development"),
            ("master marketing", "Marketing"),
            ("marketing", "Marketing"),
            ("demand generation", "Marketing"),
            ("master engineering technical", "Engineering"),
            ("engineering", "Engineering"),
            ("engineering technical", "Engineering"),
            ("information technology", "Engineering"),
            ("master finance", "Finance"),
            ("finance", "Finance"),
            ("accounting", "Finance"),
            ("master legal", "Legal"),
            ("legal", "Legal"),
            ("compliance", "Compliance"),
            ("master operations", "Operations"),
            ("operations", "Operations"),
            ("master human resources", "Human Resources"),
            ("human resources", "Human Resources"),
            ("product management", "Product"),
            ("product", "Product"),
            ("customer service support", "Customer Success"),
            ("customer success", "Customer Success"),
            ("support", "Customer Success"),
            ("consulting", "Consulting"),
            ("data analytics", "Data"),
            ("security", "Security"),
            ("procurement", "Procurement"),
        ];

        ENTRIES
            .iter()
            .map(|(raw, label)| (normalize_label(raw), *label))
            .collect()
    })
}

fn seniority_map() -> &'static HashMap<String, &'static str> {
    SENIORITY_MAP.get_or_init(|| {
        const ENTRIES: &[(&str, &str)] = &[
            ("owner", "owner"),
            ("founder", "founder"),
            ("c suite", "c_suite"),
            ("c_suite", "c_suite"),
            ("csuite", "c_suite"),
            ("partner", "partner"),
            ("vp", "vp"),
            ("head", "head"),
            ("director", "director"),
            ("manager", "manager"),
            ("senior", "senior"),
            ("entry", "entry"),
            ("intern", "intern"),
        ];

        ENTRIES
            .iter()
            .map(|(raw, label)| (normalize_label(raw), *label))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn departments_collapse_to_canonical_labels() {
        assert_eq!(
            canonical_department("Master Sales; Business Development"),
            Some("Sales".to_string())
        );
        assert_eq!(canonical_department("C Suite"), Some("Executive".to_string()));
        assert_eq!(
            canonical_department("Underwater Basket Weaving"),
            Some("underwater basket weaving".to_string())
        );
        assert_eq!(canonical_department("   "), None);
    }

    #[test]
    fn seniority_maps_known_labels_only() {
        assert_eq!(canonical_seniority("C Suite"), Some("c_suite"));
        assert_eq!(canonical_seniority("VP"), Some("vp"));
        assert_eq!(canonical_seniority("galactic overlord"), None);
    }
}
