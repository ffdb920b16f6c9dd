use crate::assessment::CatalogError;
use crate::config::ConfigError;
use crate::service::ServiceError;
use crate::telemetry::TelemetryError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Catalog(CatalogError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Assessment(ServiceError),
    Rejection(JsonRejection),
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Catalog(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "invalid json: {}", err),
            AppError::Assessment(err) => write!(f, "assessment error: {}", err),
            AppError::Rejection(err) => write!(f, "invalid request body: {}", err.body_text()),
            AppError::NotFound(what) => write!(f, "not found: {}", what),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Assessment(err) => Some(err),
            AppError::Rejection(err) => Some(err),
            AppError::NotFound(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Rejection(err) => err.status(),
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Assessment(ServiceError::InvalidRequest(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Assessment(ServiceError::ModelUnavailable) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Assessment(_)
            | AppError::Config(_)
            | AppError::Catalog(_)
            | AppError::Telemetry(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ServiceError> for AppError {
    fn from(value: ServiceError) -> Self {
        Self::Assessment(value)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::Rejection(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (
                AppError::Assessment(ServiceError::ModelUnavailable),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Assessment(ServiceError::InvalidRequest("empty".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::NotFound("ghost".into()), StatusCode::NOT_FOUND),
            (AppError::Config(ConfigError::InvalidTopK), StatusCode::INTERNAL_SERVER_ERROR),
            (
                AppError::Catalog(CatalogError::UnknownArticle("Article_5".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn catalog_errors_read_as_configuration_problems() {
        let error = AppError::from(CatalogError::DuplicateAction("A9-R1".into()));

        assert_eq!(
            error.to_string(),
            "configuration error: remediation id 'A9-R1' appears more than once"
        );
    }
}
