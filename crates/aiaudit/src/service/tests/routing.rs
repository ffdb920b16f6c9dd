use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::service::router::{remediate_handler, RemediateRequest};
use crate::service::assessment_router;

fn json_request(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
        .expect("request")
}

#[tokio::test]
async fn remediate_handler_returns_unavailable_without_model() {
    let (service, _) = build_service(None);

    let response = remediate_handler::<MemorySnapshots>(
        State(Arc::new(service)),
        Ok(axum::Json(RemediateRequest {
            text: HIGH_RISK_TEXT.to_string(),
            top_k: None,
            probabilities: None,
        })),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("no risk classifier"));
}

#[tokio::test]
async fn remediate_route_returns_ranked_plan() {
    let (service, _) = build_service(None);
    let router = assessment_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "/assess_and_remediate",
            &json!({
                "text": HIGH_RISK_TEXT,
                "top_k": 3,
                "probabilities": { "high": 0.8, "medium": 0.15, "low": 0.05 }
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["risk_level"], "high");
    assert_eq!(body["article_scores"]["Article_9"], 1.0);
    assert_eq!(body["items"][0]["article"], "Article_9");
    assert_eq!(body["items"][0]["priority"], 1);
    assert_eq!(body["model_version"], "caller-supplied");
    assert!(body["disclaimer"]
        .as_str()
        .expect("disclaimer")
        .contains("does not constitute legal advice"));
}

#[tokio::test]
async fn remediate_route_rejects_invalid_top_k() {
    let (service, _) = build_service(Some(high_risk_classifier()));
    let router = assessment_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "/assess_and_remediate",
            &json!({ "text": HIGH_RISK_TEXT, "top_k": 42 }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn remediate_route_rejects_out_of_range_probabilities() {
    let (service, _) = build_service(None);
    let router = assessment_router(Arc::new(service));

    for probabilities in [
        json!({ "high": -1.0, "medium": 0.0, "low": 0.0 }),
        json!({ "high": 0.2, "medium": 1.4, "low": 0.0 }),
    ] {
        let response = router
            .clone()
            .oneshot(json_request(
                "/assess_and_remediate",
                &json!({ "text": HIGH_RISK_TEXT, "probabilities": probabilities }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json_body(response).await;
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("between 0 and 1"));
    }
}

#[tokio::test]
async fn malformed_json_gets_json_error_body() {
    let (service, _) = build_service(Some(high_risk_classifier()));
    let router = assessment_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(
            Request::post("/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"text\": "))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .starts_with("invalid request body"));

    let missing_field = router
        .oneshot(json_request("/assess_and_remediate", &json!({ "top_k": 2 })))
        .await
        .expect("response");

    assert_eq!(missing_field.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(missing_field).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn predict_route_returns_distribution() {
    let (service, _) = build_service(Some(high_risk_classifier()));
    let router = assessment_router(Arc::new(service));

    let response = router
        .oneshot(json_request("/predict", &json!({ "text": HIGH_RISK_TEXT })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["risk_level"], "high");
    assert_eq!(body["probabilities"]["high"], 0.8);
}

#[tokio::test]
async fn intake_route_scores_and_records_snapshot() {
    let (service, snapshots) = build_service(None);
    let router = assessment_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(json_request("/assess_intake", &intake_payload("Applicant Ranker")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["risk_category"], "medium_risk");
    assert_eq!(body["risk_label"], "Medium Risk - Compliance Recommended");
    assert_eq!(body["model_version"], "1.0.0");
    assert_eq!(snapshots.all_records().len(), 1);

    let history = router
        .oneshot(
            Request::get("/snapshots/Applicant%20Ranker")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(history.status(), StatusCode::OK);
    let body = read_json_body(history).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["system_name"], "Applicant Ranker");
}

#[tokio::test]
async fn unknown_system_history_is_not_found() {
    let (service, _) = build_service(None);
    let router = assessment_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/snapshots/ghost")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("no snapshots recorded for 'ghost'"));
}

#[tokio::test]
async fn repository_outage_is_internal_error() {
    let service = build_service_with(None, UnavailableSnapshots);
    let router = assessment_router(Arc::new(service));

    let response = router
        .oneshot(Request::get("/snapshots").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
