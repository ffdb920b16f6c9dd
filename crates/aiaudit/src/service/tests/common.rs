use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::assessment::{
    ClassifierError, ModelProbabilities, Prediction, RemediationCatalog, RiskClassifier,
    StaticClassifier,
};
use crate::config::AssessmentConfig;
use crate::intake::{RepositoryError, SnapshotBuilder, SnapshotRecord, SnapshotRepository};
use crate::service::AssessmentService;

pub(super) const HIGH_RISK_TEXT: &str = "This AI system uses biometric identification for \
    real-time remote surveillance in public spaces. It is deployed for law enforcement \
    purposes. Limited human oversight mechanisms are in place.";

#[derive(Default, Clone)]
pub(super) struct MemorySnapshots {
    records: Arc<Mutex<Vec<SnapshotRecord>>>,
}

impl MemorySnapshots {
    pub(super) fn all_records(&self) -> Vec<SnapshotRecord> {
        self.records.lock().expect("snapshot mutex poisoned").clone()
    }
}

impl SnapshotRepository for MemorySnapshots {
    fn append(
        &self,
        system_name: &str,
        build: &SnapshotBuilder<'_>,
    ) -> Result<SnapshotRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("snapshot mutex poisoned");
        let previous = guard
            .iter()
            .rev()
            .find(|record| record.system_name == system_name);
        let snapshot = build(previous);
        guard.push(snapshot.clone());
        Ok(snapshot)
    }

    fn history(&self, system_name: &str) -> Result<Vec<SnapshotRecord>, RepositoryError> {
        let guard = self.records.lock().expect("snapshot mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.system_name == system_name)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<SnapshotRecord>, RepositoryError> {
        Ok(self.records.lock().expect("snapshot mutex poisoned").clone())
    }
}

pub(super) struct UnavailableSnapshots;

impl SnapshotRepository for UnavailableSnapshots {
    fn append(
        &self,
        _system_name: &str,
        _build: &SnapshotBuilder<'_>,
    ) -> Result<SnapshotRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    fn history(&self, _system_name: &str) -> Result<Vec<SnapshotRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    fn all(&self) -> Result<Vec<SnapshotRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }
}

pub(super) struct FailingClassifier;

impl RiskClassifier for FailingClassifier {
    fn predict(&self, _text: &str) -> Result<Prediction, ClassifierError> {
        Err(ClassifierError::Failed("vectorizer not fitted".to_string()))
    }

    fn version(&self) -> &str {
        "broken"
    }
}

pub(super) struct UnloadedClassifier;

impl RiskClassifier for UnloadedClassifier {
    fn predict(&self, _text: &str) -> Result<Prediction, ClassifierError> {
        Err(ClassifierError::Unavailable)
    }

    fn version(&self) -> &str {
        "unloaded"
    }
}

pub(super) fn high_risk_classifier() -> Arc<dyn RiskClassifier> {
    Arc::new(StaticClassifier::new(ModelProbabilities::new(0.8, 0.15, 0.05)))
}

pub(super) fn build_service_with<S: SnapshotRepository + 'static>(
    classifier: Option<Arc<dyn RiskClassifier>>,
    snapshots: S,
) -> AssessmentService<S> {
    let catalog = RemediationCatalog::builtin().expect("builtin catalog");
    AssessmentService::new(
        Arc::new(catalog),
        classifier,
        Arc::new(snapshots),
        AssessmentConfig::default(),
    )
}

pub(super) fn build_service(
    classifier: Option<Arc<dyn RiskClassifier>>,
) -> (AssessmentService<MemorySnapshots>, MemorySnapshots) {
    let snapshots = MemorySnapshots::default();
    (build_service_with(classifier, snapshots.clone()), snapshots)
}

pub(super) fn intake_payload(name: &str) -> Value {
    json!({
        "system_name": name,
        "team_name": "People Ops",
        "project_owner": "people-ops@example.com",
        "sector": "hiring",
        "use_case_description": "Ranks applicants for interview based on historical hires.",
        "user_types": ["employees", "general_public"],
        "data_types": ["employment_data", "generic_pii"],
        "decision_impacts": ["employment_decisions"],
        "oversight_level": "human_in_the_loop",
        "documentation": { "data_sheet": "complete" }
    })
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
