use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySnapshotRepository};
use crate::routes::with_service_routes;
use aiaudit::assessment::{RiskClassifier, StaticClassifier};
use aiaudit::config::AppConfig;
use aiaudit::error::AppError;
use aiaudit::telemetry;
use aiaudit::AssessmentService;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let classifier = args.fixed_distribution.map(|probabilities| {
        Arc::new(StaticClassifier::new(probabilities)) as Arc<dyn RiskClassifier>
    });
    if classifier.is_none() {
        warn!(
            "no classifier configured; /predict is unavailable and \
             /assess_and_remediate needs caller-supplied probabilities"
        );
    }

    let service = Arc::new(AssessmentService::from_config(
        config.assessment.clone(),
        classifier,
        Arc::new(InMemorySnapshotRepository::default()),
    )?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        service: service.clone(),
    };

    let app = with_service_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "ai act triage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
