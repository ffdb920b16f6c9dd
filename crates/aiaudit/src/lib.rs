//! EU AI Act risk triage: keyword rules fused with a model's risk distribution drive a
//! ranked remediation plan, and a structured intake questionnaire drives a risk tier with
//! obligations and documentation gaps.

pub mod assessment;
pub mod config;
pub mod error;
pub mod intake;
pub mod service;
pub mod telemetry;

pub use assessment::{
    build_remediation_plan, compute_rule_signal, fuse, select_remediations, ModelProbabilities,
    RemediationCatalog, RemediationPlan,
};
pub use config::AppConfig;
pub use error::AppError;
pub use intake::{assess_intake, assess_intake_at, IntakeAssessmentResult, IntakeForm};
pub use service::{assessment_router, AssessmentService};
