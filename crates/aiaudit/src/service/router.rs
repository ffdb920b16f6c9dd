use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::assessor::{AssessmentService, RemediationReport};
use crate::assessment::{ModelProbabilities, Prediction};
use crate::error::AppError;
use crate::intake::{IntakeAssessmentResult, IntakeForm, SnapshotRecord, SnapshotRepository};

#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemediateRequest {
    pub text: String,
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub probabilities: Option<ModelProbabilities>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntakeRequest {
    #[serde(flatten)]
    pub form: IntakeForm,
    #[serde(default = "default_use_model")]
    pub use_model: bool,
}

fn default_use_model() -> bool {
    true
}

/// Router exposing prediction, remediation, intake and snapshot endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: SnapshotRepository + 'static,
{
    Router::new()
        .route("/predict", post(predict_handler::<S>))
        .route("/assess_and_remediate", post(remediate_handler::<S>))
        .route("/assess_intake", post(intake_handler::<S>))
        .route("/snapshots", get(snapshots_handler::<S>))
        .route("/snapshots/{system_name}", get(history_handler::<S>))
        .with_state(service)
}

pub(crate) async fn predict_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Prediction>, AppError>
where
    S: SnapshotRepository + 'static,
{
    let Json(request) = payload?;
    Ok(Json(service.predict(&request.text)?))
}

pub(crate) async fn remediate_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    payload: Result<Json<RemediateRequest>, JsonRejection>,
) -> Result<Json<RemediationReport>, AppError>
where
    S: SnapshotRepository + 'static,
{
    let Json(request) = payload?;
    let report =
        service.assess_and_remediate(&request.text, request.top_k, request.probabilities)?;
    Ok(Json(report))
}

pub(crate) async fn intake_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    payload: Result<Json<IntakeRequest>, JsonRejection>,
) -> Result<Json<IntakeAssessmentResult>, AppError>
where
    S: SnapshotRepository + 'static,
{
    let Json(request) = payload?;
    Ok(Json(service.assess_intake(&request.form, request.use_model)?))
}

pub(crate) async fn snapshots_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> Result<Json<Vec<SnapshotRecord>>, AppError>
where
    S: SnapshotRepository + 'static,
{
    Ok(Json(service.snapshots()?))
}

pub(crate) async fn history_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(system_name): Path<String>,
) -> Result<Json<Vec<SnapshotRecord>>, AppError>
where
    S: SnapshotRepository + 'static,
{
    let history = service.history(&system_name)?;
    if history.is_empty() {
        return Err(AppError::NotFound(format!(
            "no snapshots recorded for '{system_name}'"
        )));
    }
    Ok(Json(history))
}
