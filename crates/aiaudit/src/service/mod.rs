//! Assessment context object and the HTTP routes built on it.

pub mod assessor;
pub mod router;

#[cfg(test)]
mod tests;

pub use assessor::{AssessmentService, RemediationReport, ServiceError};
pub use router::{assessment_router, IntakeRequest, PredictRequest, RemediateRequest};
