use chrono::NaiveDate;
use committee_ai::workflows::committee::scoring::account::{account_components, AccountSignals};
use committee_ai::workflows::committee::scoring::{account_engine, BASELINE_SCORE};
use committee_ai::workflows::committee::{OrgId, OrgRecord, ProductContext};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date")
}

fn strong_record() -> OrgRecord {
    OrgRecord {
        id: OrgId("harvest-robotics".to_string()),
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

#[test]
fn strong_fit_account_scores_act_now() {
    let signals = AccountSignals::from_record(&strong_record(), &product(), today());
    let components = account_components(&signals);
    let composite = account_engine()
        .expect("declared configuration is valid")
        .combine(&components)
        .expect("full component family supplied");

    assert!((composite.score - 80.75).abs() < 1e-9);
    assert_eq!(composite.classification, "Act Now");
    assert_eq!(composite.top_contributors[0].name, "firmographic");
}

#[test]
fn sparse_record_degrades_to_baseline_and_nurture() {
    let record = OrgRecord {
        id: OrgId("mystery-co".to_string()),
        name: "Mystery Co".to_string(),
        headcount: None,
        headcount_growth_pct: None,
        last_funding_on: None,
        industry: None,
        technologies: Vec::new(),
        adoption_signals: None,
    };

    let signals = AccountSignals::from_record(&record, &ProductContext::default(), today());
    let components = account_components(&signals);
    for component in &components {
        assert_eq!(component.score, BASELINE_SCORE, "{}", component.name);
        assert!(component
            .evidence
            .iter()
            .any(|line| line.contains("holding at baseline")));
    }

    let composite = account_engine()
        .expect("declared configuration is valid")
        .combine(&components)
        .expect("full component family supplied");
    assert_eq!(composite.classification, "Nurture");
}

#[test]
fn hostile_record_drops_well_below_baseline() {
    let record = OrgRecord {
        id: OrgId("tiny-shop".to_string()),
        name: "Tiny Shop".to_string(),
        headcount: Some(6),
        headcount_growth_pct: Some(-12.0),
        last_funding_on: None,
        industry: Some("Hospitality".to_string()),
        technologies: vec!["Excel".to_string()],
        adoption_signals: Some(0),
    };

    let signals = AccountSignals::from_record(&record, &product(), today());
    let composite = account_engine()
        .expect("declared configuration is valid")
        .combine(&account_components(&signals))
        .expect("full component family supplied");

    assert!(composite.score < BASELINE_SCORE);
    assert_eq!(composite.classification, "Nurture");
}

#[test]
fn funding_recency_windows_step_down() {
    let mut record = strong_record();
    record.headcount_growth_pct = None;

    // 400 days back lands in the 13-24 month window.
    record.last_funding_on = Some(today() - chrono::Duration::days(400));
    let signals = AccountSignals::from_record(&record, &product(), today());
    assert_eq!(signals.months_since_funding, Some(13));
    let growth = account_components(&signals)
        .into_iter()
        .find(|component| component.name == "growth")
        .expect("growth component present");
    assert_eq!(growth.score, 55.0);

    record.last_funding_on = Some(today() - chrono::Duration::days(90));
    let signals = AccountSignals::from_record(&record, &product(), today());
    let growth = account_components(&signals)
        .into_iter()
        .find(|component| component.name == "growth")
        .expect("growth component present");
    assert_eq!(growth.score, 65.0);
}

#[test]
fn classification_bands_have_exact_floors() {
    let engine = account_engine().expect("declared configuration is valid");
    assert_eq!(engine.classify(75.0), "Act Now");
    assert_eq!(engine.classify(74.9), "Prioritize");
    assert_eq!(engine.classify(55.0), "Prioritize");
    assert_eq!(engine.classify(30.0), "Nurture");
    assert_eq!(engine.classify(29.9), "Monitor");
    assert_eq!(engine.classify(0.0), "Monitor");
}
