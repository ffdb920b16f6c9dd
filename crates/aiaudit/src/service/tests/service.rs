use std::sync::Arc;

use super::common::*;
use crate::assessment::{Article, ModelProbabilities, RiskLevel};
use crate::intake::{IntakeForm, RiskCategory};
use crate::service::ServiceError;

fn intake_form(name: &str) -> IntakeForm {
    serde_json::from_value(intake_payload(name)).expect("intake form")
}

#[test]
fn remediation_uses_classifier_when_no_probabilities_supplied() {
    let (service, _) = build_service(Some(high_risk_classifier()));

    let report = service
        .assess_and_remediate(HIGH_RISK_TEXT, None, None)
        .expect("plan");

    assert_eq!(report.plan.risk_level, RiskLevel::High);
    assert_eq!(report.model_version, "static");
    assert_eq!(report.catalog_version, service.catalog().fingerprint());
    assert_eq!(report.plan.items[0].article, Article::RiskManagement);
    assert!(report.plan.items.len() <= 9);
}

#[test]
fn supplied_probabilities_take_precedence() {
    let (service, _) = build_service(Some(high_risk_classifier()));

    let report = service
        .assess_and_remediate(
            HIGH_RISK_TEXT,
            Some(2),
            Some(ModelProbabilities::new(0.1, 0.2, 0.7)),
        )
        .expect("plan");

    assert_eq!(report.plan.risk_level, RiskLevel::Low);
    assert_eq!(report.model_version, "caller-supplied");
    assert!(report.plan.items.len() <= 6);
}

#[test]
fn remediation_without_classifier_or_probabilities_is_unavailable() {
    let (service, _) = build_service(None);

    let err = service
        .assess_and_remediate(HIGH_RISK_TEXT, None, None)
        .expect_err("no model");

    assert!(matches!(err, ServiceError::ModelUnavailable));
}

#[test]
fn rejects_blank_text_and_out_of_range_top_k() {
    let (service, _) = build_service(Some(high_risk_classifier()));

    assert!(matches!(
        service.assess_and_remediate("   ", None, None),
        Err(ServiceError::InvalidRequest(_))
    ));
    assert!(matches!(
        service.assess_and_remediate(HIGH_RISK_TEXT, Some(0), None),
        Err(ServiceError::InvalidRequest(_))
    ));
    assert!(matches!(
        service.assess_and_remediate(HIGH_RISK_TEXT, Some(11), None),
        Err(ServiceError::InvalidRequest(_))
    ));
}

#[test]
fn rejects_supplied_probabilities_outside_unit_interval() {
    let (service, _) = build_service(None);

    for probabilities in [
        ModelProbabilities::new(-1.0, 0.0, 0.0),
        ModelProbabilities::new(0.5, 0.5, 1.2),
        ModelProbabilities::new(f64::NAN, 0.5, 0.5),
    ] {
        assert!(matches!(
            service.assess_and_remediate(HIGH_RISK_TEXT, None, Some(probabilities)),
            Err(ServiceError::InvalidRequest(_))
        ));
    }
}

#[test]
fn unloaded_classifier_maps_to_model_unavailable() {
    let (service, _) = build_service(Some(Arc::new(UnloadedClassifier)));

    assert!(matches!(
        service.predict("anything"),
        Err(ServiceError::ModelUnavailable)
    ));
}

#[test]
fn intake_blends_classifier_severity_when_requested() {
    let (service, _) = build_service(Some(high_risk_classifier()));
    let form = intake_form("Applicant Ranker");

    let rules_only = service.assess_intake(&form, false).expect("rules only");
    let blended = service.assess_intake(&form, true).expect("blended");

    assert_eq!(rules_only.risk_category, RiskCategory::MediumRisk);
    assert_eq!(blended.risk_category, RiskCategory::HighRisk);
    assert!((blended.risk_score - (0.4 * 0.875 + 0.6 * 0.565)).abs() < 0.001);
}

#[test]
fn intake_falls_back_to_rules_without_classifier() {
    let (service, _) = build_service(None);
    let form = intake_form("Applicant Ranker");

    let result = service.assess_intake(&form, true).expect("rules fallback");

    assert_eq!(result.risk_category, RiskCategory::MediumRisk);
    assert_eq!(result.risk_score, 0.565);
}

#[test]
fn intake_surfaces_classifier_failures() {
    let (service, snapshots) = build_service(Some(Arc::new(FailingClassifier)));
    let form = intake_form("Applicant Ranker");

    let err = service.assess_intake(&form, true).expect_err("classifier failed");

    assert!(matches!(err, ServiceError::Classifier(_)));
    assert!(snapshots.all_records().is_empty());
}

#[test]
fn intake_records_snapshots_with_changes() {
    let (service, _) = build_service(Some(high_risk_classifier()));
    let form = intake_form("Applicant Ranker");

    service.assess_intake(&form, false).expect("first");
    service.assess_intake(&form, true).expect("second");
    service
        .assess_intake(&intake_form("Other System"), false)
        .expect("other");

    let history = service.history("Applicant Ranker").expect("history");
    assert_eq!(history.len(), 2);
    assert!(history[0].key_changes.is_empty());
    assert!(history[1]
        .key_changes
        .iter()
        .any(|change| change == "Risk category changed from medium_risk to high_risk"));
    assert_eq!(service.snapshots().expect("all").len(), 3);
}

#[test]
fn intake_requires_a_system_name() {
    let (service, _) = build_service(None);
    let mut form = intake_form("placeholder");
    form.system_name = "  ".to_string();

    assert!(matches!(
        service.assess_intake(&form, false),
        Err(ServiceError::InvalidRequest(_))
    ));
}

#[test]
fn repository_failures_surface() {
    let service = build_service_with(None, UnavailableSnapshots);

    let err = service
        .assess_intake(&intake_form("Applicant Ranker"), false)
        .expect_err("repository down");

    assert!(matches!(err, ServiceError::Repository(_)));
}
