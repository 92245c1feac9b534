use super::common::*;
use crate::workflows::committee::domain::Role;
use crate::workflows::committee::{RoleClassifier, RuleBasedRoleClassifier};

#[test]
fn fixture_pool_covers_every_role() {
    let classifier = RuleBasedRoleClassifier;
    let assignments: Vec<_> = candidate_pool()
        .iter()
        .map(|candidate| classifier.classify(candidate))
        .collect();

    for role in Role::ordered() {
        assert!(
            assignments.iter().any(|assignment| assignment.role == role),
            "pool is missing role {}",
            role.label()
        );
    }
}

#[test]
fn active_tenure_bonus_applies_across_the_pool() {
    let classifier = RuleBasedRoleClassifier;
    // Every fixture candidate is a current employee, so confidences sit five
    // points above the rule-tier base.
    let ceo = classifier.classify(&candidate_pool()[0]);
    assert_eq!(ceo.role, Role::DecisionMaker);
    assert_eq!(ceo.confidence, 95);

    let counsel = classifier.classify(&candidate_pool()[4]);
    assert_eq!(counsel.role, Role::Blocker);
    assert_eq!(counsel.confidence, 80);
}

#[test]
fn customer_facing_managers_are_introducers_not_champions() {
    let classifier = RuleBasedRoleClassifier;
    let csm = classifier.classify(&candidate_pool()[7]);
    assert_eq!(csm.role, Role::Introducer);
}

#[test]
fn head_of_growth_is_a_champion() {
    let classifier = RuleBasedRoleClassifier;
    let growth = classifier.classify(&candidate_pool()[3]);
    assert_eq!(growth.role, Role::Champion);
    assert!(growth
        .evidence
        .iter()
        .any(|line| line.contains("revenue-adjacent")));
}
