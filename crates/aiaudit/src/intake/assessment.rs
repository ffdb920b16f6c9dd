use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::domain::IntakeForm;
use super::obligations::{
    documentation_gaps, generate_obligations, ComplianceObligation, HIGH_RISK_THRESHOLD,
    MEDIUM_RISK_THRESHOLD,
};
use super::report::{executive_summary, key_recommendations};
use super::scoring::{compute_base_risk, RiskFactor};

pub const INTAKE_MODEL_VERSION: &str = "1.0.0";
const ML_BLEND_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    HighRisk,
    MediumRisk,
    LowRisk,
}

impl RiskCategory {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            Self::HighRisk
        } else if score >= MEDIUM_RISK_THRESHOLD {
            Self::MediumRisk
        } else {
            Self::LowRisk
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighRisk => "high_risk",
            Self::MediumRisk => "medium_risk",
            Self::LowRisk => "low_risk",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HighRisk => "High Risk - Mandatory Compliance Required",
            Self::MediumRisk => "Medium Risk - Compliance Recommended",
            Self::LowRisk => "Low Risk - Minimal Obligations",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeAssessmentResult {
    pub risk_score: f64,
    pub risk_category: RiskCategory,
    pub risk_label: String,
    pub risk_factors: Vec<RiskFactor>,
    pub obligations: Vec<ComplianceObligation>,
    pub documentation_gaps: Vec<String>,
    pub key_recommendations: Vec<String>,
    pub assessment_id: String,
    pub assessment_timestamp: DateTime<Utc>,
    pub model_version: String,
    pub executive_summary: String,
}

/// Assess an intake form now. `ml_score` is blended 40/60 with the rule score when present.
pub fn assess_intake(form: &IntakeForm, ml_score: Option<f64>) -> IntakeAssessmentResult {
    assess_intake_at(form, ml_score, Utc::now())
}

/// Same as [`assess_intake`] with an explicit timestamp, which fixes the assessment id.
pub fn assess_intake_at(
    form: &IntakeForm,
    ml_score: Option<f64>,
    timestamp: DateTime<Utc>,
) -> IntakeAssessmentResult {
    let rule = compute_base_risk(form);
    let score = match ml_score {
        Some(ml) => ML_BLEND_WEIGHT * ml + (1.0 - ML_BLEND_WEIGHT) * rule.score,
        None => rule.score,
    }
    .clamp(0.0, 1.0);

    let category = RiskCategory::from_score(score);
    let gaps = documentation_gaps(form);
    let obligations = generate_obligations(score, form);
    let recommendations = key_recommendations(score, &rule.factors, &gaps);
    let summary = executive_summary(form, category, &obligations, recommendations.len());

    IntakeAssessmentResult {
        risk_score: (score * 1000.0).round() / 1000.0,
        risk_category: category,
        risk_label: category.label().to_string(),
        risk_factors: rule.factors,
        obligations,
        documentation_gaps: gaps,
        key_recommendations: recommendations,
        assessment_id: assessment_id(form, timestamp),
        assessment_timestamp: timestamp,
        model_version: INTAKE_MODEL_VERSION.to_string(),
        executive_summary: summary,
    }
}

/// First 12 hex chars of SHA-256 over name, version and RFC 3339 timestamp.
pub fn assessment_id(form: &IntakeForm, timestamp: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(form.system_name.as_bytes());
    hasher.update(form.system_version.as_bytes());
    hasher.update(
        timestamp
            .to_rfc3339_opts(SecondsFormat::Micros, true)
            .as_bytes(),
    );
    hex::encode(hasher.finalize())[..12].to_string()
}
