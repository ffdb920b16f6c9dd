//! Structured intake path: questionnaire answers to risk tier, obligations and gaps.

pub mod assessment;
pub mod domain;
pub mod history;
pub mod obligations;
pub(crate) mod report;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use assessment::{
    assess_intake, assess_intake_at, assessment_id, IntakeAssessmentResult, RiskCategory,
    INTAKE_MODEL_VERSION,
};
pub use domain::{
    DataType, DecisionImpact, DocumentationArtifacts, DocumentationStatus, IntakeForm,
    OversightLevel, Sector, UserType,
};
pub use history::{
    key_changes, RepositoryError, SnapshotBuilder, SnapshotRecord, SnapshotRepository,
};
pub use obligations::{
    documentation_gaps, generate_obligations, ComplianceObligation, ObligationPriority,
    ObligationStatus,
};
pub use scoring::{compute_base_risk, RiskFactor, RuleScore};
