//! Built-in default rule tables.
//!
//! These cover a small set of common drugs and are meant as a starting
//! point; `scrip init` writes them to `rules.yaml` where they can be
//! extended or replaced.

use crate::rx::{AgeGroup, Gender};
use std::collections::BTreeMap;

use super::model::{DrugRule, MismatchRule};

/// Default per-drug rule table, keyed by lowercase drug name.
pub fn default_drugs() -> BTreeMap<String, DrugRule> {
    let mut drugs = BTreeMap::new();

    drugs.insert(
        "aspirin".to_string(),
        DrugRule {
            min_age: Some(12),
            restricted_groups: vec![AgeGroup::Child],
            interacts_with: vec!["warfarin".to_string(), "ibuprofen".to_string()],
            standard_dosages: vec![
                "75mg".to_string(),
                "100mg".to_string(),
                "325mg".to_string(),
            ],
            max_dose_mg: Some(4000.0),
            ..Default::default()
        },
    );

    drugs.insert(
        "warfarin".to_string(),
        DrugRule {
            interacts_with: vec![
                "aspirin".to_string(),
                "ibuprofen".to_string(),
                "vitamin k".to_string(),
            ],
            standard_dosages: vec![
                "1mg".to_string(),
                "2mg".to_string(),
                "2.5mg".to_string(),
                "5mg".to_string(),
            ],
            ..Default::default()
        },
    );

    drugs.insert(
        "ibuprofen".to_string(),
        DrugRule {
            min_age: Some(6),
            interacts_with: vec!["aspirin".to_string(), "warfarin".to_string()],
            standard_dosages: vec![
                "200mg".to_string(),
                "400mg".to_string(),
                "600mg".to_string(),
                "800mg".to_string(),
            ],
            max_dose_mg: Some(3200.0),
            ..Default::default()
        },
    );

    drugs.insert(
        "paracetamol".to_string(),
        DrugRule {
            standard_dosages: vec![
                "500mg".to_string(),
                "650mg".to_string(),
                "1000mg".to_string(),
            ],
            max_dose_mg: Some(4000.0),
            ..Default::default()
        },
    );

    drugs.insert(
        "metformin".to_string(),
        DrugRule {
            min_age: Some(18),
            interacts_with: vec!["alcohol".to_string()],
            standard_dosages: vec![
                "500mg".to_string(),
                "850mg".to_string(),
                "1000mg".to_string(),
            ],
            ..Default::default()
        },
    );

    drugs.insert(
        "amoxicillin".to_string(),
        DrugRule {
            min_age: Some(3),
            interacts_with: vec!["warfarin".to_string()],
            standard_dosages: vec!["250mg".to_string(), "500mg".to_string()],
            allergy_terms: vec!["penicillin".to_string()],
            ..Default::default()
        },
    );

    drugs.insert(
        "tetracycline".to_string(),
        DrugRule {
            restricted_groups: vec![AgeGroup::Child],
            ..Default::default()
        },
    );

    drugs.insert(
        "finasteride".to_string(),
        DrugRule {
            contraindicated_genders: vec![Gender::Female],
            ..Default::default()
        },
    );

    drugs.insert(
        "lisinopril".to_string(),
        DrugRule {
            interacts_with: vec!["potassium supplements".to_string()],
            ..Default::default()
        },
    );

    drugs
}

/// Default symptom/medicine mismatch heuristics.
pub fn default_mismatches() -> Vec<MismatchRule> {
    vec![MismatchRule {
        symptom_contains: "fever".to_string(),
        medicine_contains: "antacid".to_string(),
        message: "Antacids are typically not prescribed for fever. Please verify if this is intentional.".to_string(),
    }]
}

/// Default regex extracting the leading numeric magnitude from a dosage string.
pub fn default_dose_pattern() -> String {
    r"^\s*([0-9]+(?:\.[0-9]+)?)".to_string()
}
