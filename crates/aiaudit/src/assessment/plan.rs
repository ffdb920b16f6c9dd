use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::articles::ArticleScores;
use super::catalog::RemediationCatalog;
use super::fusion::{fuse, ModelProbabilities, RiskLevel};
use super::selector::{round3, RemediationItem, RemediationSelector};
use super::signal::compute_rule_signal;

pub const DISCLAIMER: &str = "This remediation plan provides heuristic guidance based on automated \
analysis. It does not constitute legal advice and should not replace consultation with qualified \
legal and compliance professionals. The EU AI Act requirements may vary based on specific use case \
details not captured in this assessment.";

/// Maximum number of keywords quoted in the plan summary.
const SUMMARY_KEYWORDS: usize = 5;

/// Text-path assessment output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationPlan {
    pub summary: String,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub matched_keywords: Vec<String>,
    pub article_scores: ArticleScores,
    pub items: Vec<RemediationItem>,
    pub disclaimer: String,
}

/// Run the full text path: rule signal, fusion with the model distribution, selection.
pub fn build_remediation_plan(
    text: &str,
    probabilities: &ModelProbabilities,
    catalog: &RemediationCatalog,
    alpha: f64,
    selector: &RemediationSelector,
) -> RemediationPlan {
    let signal = compute_rule_signal(text);
    let fused = fuse(probabilities, &signal.scores, alpha);
    let items = selector.select(&fused, catalog);
    let (risk_level, confidence) = probabilities.most_likely();

    RemediationPlan {
        summary: plan_summary(risk_level, confidence, items.len(), &signal.matched_keywords),
        risk_level,
        confidence: round3(confidence),
        matched_keywords: signal
            .matched_keywords
            .iter()
            .map(|keyword| keyword.to_string())
            .collect(),
        article_scores: fused
            .into_iter()
            .map(|(article, score)| (article, round3(score)))
            .collect(),
        items,
        disclaimer: DISCLAIMER.to_string(),
    }
}

fn risk_description(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "significant compliance gaps requiring immediate attention",
        RiskLevel::Medium => "moderate compliance considerations requiring review",
        RiskLevel::Low => {
            "generally aligned with requirements, with minor improvements suggested"
        }
    }
}

fn plan_summary(
    level: RiskLevel,
    confidence: f64,
    item_count: usize,
    keywords: &BTreeSet<&'static str>,
) -> String {
    let mut summary = format!(
        "Assessment indicates {} risk level (confidence: {:.0}%) with {}. Generated {} prioritized remediation actions.",
        level.label().to_uppercase(),
        confidence * 100.0,
        risk_description(level),
        item_count
    );

    if !keywords.is_empty() {
        let quoted: Vec<&str> = keywords.iter().take(SUMMARY_KEYWORDS).copied().collect();
        summary.push_str(&format!(" Key areas identified: {}.", quoted.join(", ")));
    }

    summary
}
