use super::assessment::RiskCategory;
use super::domain::IntakeForm;
use super::obligations::{ComplianceObligation, ObligationPriority};
use super::scoring::RiskFactor;

const MAX_RECOMMENDATIONS: usize = 5;
const GAPS_QUOTED: usize = 3;
const FACTORS_CONSIDERED: usize = 2;
const HIGH_FACTOR_WEIGHT: f64 = 0.7;

fn headline(score: f64) -> Option<&'static str> {
    if score >= 0.8 {
        Some("URGENT: This system likely falls into high-risk category. Initiate full compliance assessment immediately.")
    } else if score >= 0.6 {
        Some("HIGH PRIORITY: System requires comprehensive compliance documentation and risk management procedures.")
    } else if score >= 0.4 {
        Some("MODERATE: Review transparency requirements and consider implementing best practices.")
    } else {
        None
    }
}

/// At most five actions: tier headline, documentation call-out, then the heaviest factors.
pub fn key_recommendations(score: f64, factors: &[RiskFactor], gaps: &[String]) -> Vec<String> {
    let mut recommendations: Vec<String> = headline(score).map(str::to_string).into_iter().collect();

    if !gaps.is_empty() {
        let quoted: Vec<&str> = gaps.iter().take(GAPS_QUOTED).map(String::as_str).collect();
        recommendations.push(format!(
            "Complete missing documentation: {}",
            quoted.join(", ")
        ));
    }

    let mut ranked: Vec<&RiskFactor> = factors.iter().collect();
    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    recommendations.extend(
        ranked
            .into_iter()
            .take(FACTORS_CONSIDERED)
            .filter(|factor| factor.weight >= HIGH_FACTOR_WEIGHT)
            .map(|factor| format!("Address high-risk factor: {}", factor.description)),
    );

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

pub fn executive_summary(
    form: &IntakeForm,
    category: RiskCategory,
    obligations: &[ComplianceObligation],
    recommendation_count: usize,
) -> String {
    match category {
        RiskCategory::HighRisk => {
            let high_priority = obligations
                .iter()
                .filter(|obligation| obligation.priority == ObligationPriority::High)
                .count();
            let affected: Vec<&str> = form
                .user_types
                .iter()
                .take(2)
                .map(|user| user.as_str())
                .collect();
            format!(
                "**{}** has been assessed as HIGH RISK under EU AI Act criteria. \
                 The system's use of {} applications affecting {} triggers mandatory compliance requirements. \
                 There are {} high-priority obligations requiring immediate attention. \
                 Recommend initiating formal compliance review and engaging legal counsel.",
                form.system_name,
                form.sector.as_str(),
                affected.join(", "),
                high_priority
            )
        }
        RiskCategory::MediumRisk => format!(
            "**{}** has been assessed as MEDIUM RISK. \
             While not classified as high-risk under Annex III, the system should implement \
             transparency measures and documentation best practices. \
             There are {} compliance obligations and {} recommended actions to improve compliance posture.",
            form.system_name,
            obligations.len(),
            recommendation_count
        ),
        RiskCategory::LowRisk => format!(
            "**{}** has been assessed as LOW RISK. \
             Minimal regulatory obligations apply, but consider adopting voluntary \
             codes of conduct and maintaining basic documentation for good governance. \
             There are {} suggested improvements.",
            form.system_name, recommendation_count
        ),
    }
}
