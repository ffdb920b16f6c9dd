use crate::infra::{ApiService, AppState};
use aiaudit::assessment_router;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) model_loaded: bool,
    pub(crate) templates_loaded: bool,
    pub(crate) catalog_version: String,
    pub(crate) version: &'static str,
}

pub(crate) fn with_service_routes(service: Arc<ApiService>) -> axum::Router {
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

/// Degraded when no classifier is loaded; rule-only paths keep working.
pub(crate) async fn healthcheck(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    let service = &state.service;
    let model_loaded = service.classifier_loaded();
    let templates_loaded = service.catalog_loaded();
    let status = if model_loaded && templates_loaded {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        model_loaded,
        templates_loaded,
        catalog_version: service.catalog().fingerprint().to_string(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        serde_json::json!({ "status": "ready" })
    } else {
        serde_json::json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemorySnapshotRepository;
    use aiaudit::assessment::{ModelProbabilities, RiskClassifier, StaticClassifier};
    use aiaudit::config::AssessmentConfig;
    use aiaudit::AssessmentService;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn state(classifier: Option<Arc<dyn RiskClassifier>>, ready: bool) -> AppState {
        let service = AssessmentService::from_config(
            AssessmentConfig::default(),
            classifier,
            Arc::new(InMemorySnapshotRepository::default()),
        )
        .expect("service builds");
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            service: Arc::new(service),
        }
    }

    fn app(state: AppState) -> axum::Router {
        with_service_routes(state.service.clone()).layer(Extension(state))
    }

    async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 1 << 16)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&body).expect("json payload"))
    }

    #[tokio::test]
    async fn health_is_degraded_without_classifier() {
        let (status, body) = get_json(app(state(None, true)), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["model_loaded"], false);
        assert_eq!(body["templates_loaded"], true);
    }

    #[tokio::test]
    async fn health_is_healthy_with_classifier() {
        let classifier: Arc<dyn RiskClassifier> =
            Arc::new(StaticClassifier::new(ModelProbabilities::new(0.2, 0.5, 0.3)));

        let (_, body) = get_json(app(state(Some(classifier), true)), "/health").await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["catalog_version"].as_str().map(str::len), Some(12));
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let (status, body) = get_json(app(state(None, false)), "/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");
    }

    async fn post_json(router: axum::Router, uri: &str, payload: &str) -> StatusCode {
        router
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response")
            .status()
    }

    #[tokio::test]
    async fn without_classifier_only_remediation_with_probabilities_succeeds() {
        let router = app(state(None, true));
        let text = "facial recognition at the border";

        let predict = post_json(
            router.clone(),
            "/predict",
            &format!(r#"{{"text":"{text}","probabilities":{{"high":0.7,"medium":0.2,"low":0.1}}}}"#),
        )
        .await;
        assert_eq!(predict, StatusCode::SERVICE_UNAVAILABLE);

        let remediate_without = post_json(
            router.clone(),
            "/assess_and_remediate",
            &format!(r#"{{"text":"{text}"}}"#),
        )
        .await;
        assert_eq!(remediate_without, StatusCode::SERVICE_UNAVAILABLE);

        let remediate_with = post_json(
            router,
            "/assess_and_remediate",
            &format!(r#"{{"text":"{text}","probabilities":{{"high":0.7,"medium":0.2,"low":0.1}}}}"#),
        )
        .await;
        assert_eq!(remediate_with, StatusCode::OK);
    }
}
