use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{
    DataType, DecisionImpact, IntakeForm, OversightLevel, Sector, UserType, NEUTRAL_WEIGHT,
};

/// Largest reduction human oversight can apply to the base score.
const OVERSIGHT_REDUCTION_SCALE: f64 = 0.2;
const SAFEGUARD_REDUCTION: f64 = 0.05;
const PROHIBITED_COMBINATION_BOOST: f64 = 0.15;

/// One contributor to the intake score. Safeguards carry a negative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    pub weight: f64,
    pub description: String,
    pub article_reference: Option<String>,
}

impl RiskFactor {
    fn new(factor: &str, weight: f64, description: String, article_reference: &str) -> Self {
        Self {
            factor: factor.to_string(),
            weight,
            description,
            article_reference: Some(article_reference.to_string()),
        }
    }
}

/// Rule-only score with the factors that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleScore {
    pub score: f64,
    pub factors: Vec<RiskFactor>,
}

fn max_weight<T: Copy>(values: &[T], weight: impl Fn(T) -> f64) -> f64 {
    values
        .iter()
        .map(|value| weight(*value))
        .reduce(f64::max)
        .unwrap_or(NEUTRAL_WEIGHT)
}

fn joined<T: Copy>(values: &[T], label: impl Fn(T) -> &'static str) -> String {
    values
        .iter()
        .map(|value| label(*value))
        .collect::<Vec<_>>()
        .join(", ")
}

fn warn_unrecognized(form: &IntakeForm) {
    let mut fields = Vec::new();
    if form.sector == Sector::Unrecognized {
        fields.push("sector");
    }
    if form.user_types.contains(&UserType::Unrecognized) {
        fields.push("user_types");
    }
    if form.data_types.contains(&DataType::Unrecognized) {
        fields.push("data_types");
    }
    if form.decision_impacts.contains(&DecisionImpact::Unrecognized) {
        fields.push("decision_impacts");
    }
    if form.oversight_level == OversightLevel::Unrecognized {
        fields.push("oversight_level");
    }
    if !fields.is_empty() {
        warn!(
            system = %form.system_name,
            fields = ?fields,
            "unrecognized intake values scored with fallback weights"
        );
    }
}

/// Score the four risk dimensions, apply oversight and safeguards, and escalate the
/// biometrics plus law-enforcement combination. The result is clamped to [0, 1].
pub fn compute_base_risk(form: &IntakeForm) -> RuleScore {
    warn_unrecognized(form);

    let sector_weight = form.sector.risk_weight();
    let user_weight = max_weight(&form.user_types, UserType::risk_weight);
    let data_weight = max_weight(&form.data_types, DataType::risk_weight);
    let impact_weight = max_weight(&form.decision_impacts, DecisionImpact::risk_weight);
    let oversight_modifier = form.oversight_level.risk_modifier();

    let mut factors = vec![
        RiskFactor::new(
            "sector",
            sector_weight,
            format!("Sector '{}' risk level", form.sector.as_str()),
            "Article 6 - High-risk classification",
        ),
        RiskFactor::new(
            "user_types",
            user_weight,
            format!("Affects {}", joined(&form.user_types, UserType::as_str)),
            "Article 9 - Risk management for vulnerable groups",
        ),
        RiskFactor::new(
            "data_types",
            data_weight,
            format!("Processes {}", joined(&form.data_types, DataType::as_str)),
            "Article 10 - Data governance requirements",
        ),
        RiskFactor::new(
            "decision_impact",
            impact_weight,
            format!(
                "Influences {}",
                joined(&form.decision_impacts, DecisionImpact::as_str)
            ),
            "Article 6 - Annex III high-risk categories",
        ),
        RiskFactor::new(
            "oversight_level",
            oversight_modifier,
            format!("Human oversight: {}", form.oversight_level.as_str()),
            "Article 14 - Human oversight",
        ),
    ];

    let mut safeguard_reduction = 0.0;
    if form.can_users_opt_out {
        safeguard_reduction += SAFEGUARD_REDUCTION;
    }
    if form.appeal_mechanism {
        safeguard_reduction += SAFEGUARD_REDUCTION;
    }
    if safeguard_reduction > 0.0 {
        factors.push(RiskFactor::new(
            "safeguards",
            -safeguard_reduction,
            "Risk reduction from opt-out/appeal mechanisms".to_string(),
            "Article 14 - Human oversight safeguards",
        ));
    }

    let base = (sector_weight + user_weight + data_weight + impact_weight) / 4.0;
    let oversight_reduction = (1.0 - oversight_modifier) * OVERSIGHT_REDUCTION_SCALE;
    let mut score = (base - oversight_reduction - safeguard_reduction).max(0.0);

    if form.sector == Sector::LawEnforcement && form.processes(DataType::Biometrics) {
        score = (score + PROHIBITED_COMBINATION_BOOST).min(1.0);
        factors.push(RiskFactor::new(
            "prohibited_combination",
            PROHIBITED_COMBINATION_BOOST,
            "Biometric identification in law enforcement context".to_string(),
            "Article 5 - Prohibited AI practices",
        ));
    }

    RuleScore {
        score: score.clamp(0.0, 1.0),
        factors,
    }
}
