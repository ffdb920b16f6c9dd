use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use super::articles::Article;

/// A dictionary phrase and the articles it contributes to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordRule {
    pub phrase: &'static str,
    pub contributions: &'static [(Article, f64)],
}

const fn rule(phrase: &'static str, contributions: &'static [(Article, f64)]) -> KeywordRule {
    KeywordRule {
        phrase,
        contributions,
    }
}

use Article::{
    AccuracyRobustness as A15, DataGovernance as A10, HumanOversight as A14,
    RecordKeeping as A12, RiskManagement as A9,
};

/// Lowercase phrase dictionary. Weights lie in (0, 1].
pub const KEYWORD_RULES: &[KeywordRule] = &[
    // risk management
    rule("risk management", &[(A9, 1.0)]),
    rule("risk assessment", &[(A9, 0.9)]),
    rule("risk mitigation", &[(A9, 0.9)]),
    rule("residual risk", &[(A9, 0.8)]),
    rule("risk monitoring", &[(A9, 0.8)]),
    rule("hazard", &[(A9, 0.6)]),
    rule("safety", &[(A9, 0.5)]),
    // data governance
    rule("training data", &[(A10, 1.0)]),
    rule("data governance", &[(A10, 1.0)]),
    rule("data quality", &[(A10, 0.9)]),
    rule("bias", &[(A10, 0.9), (A9, 0.5)]),
    rule("fairness", &[(A10, 0.8), (A9, 0.4)]),
    rule("representative", &[(A10, 0.8)]),
    rule("dataset", &[(A10, 0.7)]),
    rule("annotation", &[(A10, 0.6)]),
    rule("labeling", &[(A10, 0.6)]),
    rule("data collection", &[(A10, 0.7)]),
    rule("consent", &[(A10, 0.5)]),
    // record keeping
    rule("logging", &[(A12, 1.0)]),
    rule("audit trail", &[(A12, 1.0)]),
    rule("traceability", &[(A12, 0.9)]),
    rule("record keeping", &[(A12, 1.0)]),
    rule("log retention", &[(A12, 0.9)]),
    rule("audit", &[(A12, 0.7)]),
    rule("documentation", &[(A12, 0.6)]),
    rule("versioning", &[(A12, 0.5)]),
    // human oversight
    rule("human oversight", &[(A14, 1.0)]),
    rule("human-in-the-loop", &[(A14, 1.0)]),
    rule("human review", &[(A14, 0.9)]),
    rule("manual review", &[(A14, 0.8)]),
    rule("override", &[(A14, 0.8)]),
    rule("intervention", &[(A14, 0.7)]),
    rule("supervision", &[(A14, 0.7)]),
    rule("escalation", &[(A14, 0.6)]),
    rule("approval", &[(A14, 0.5)]),
    rule("operator", &[(A14, 0.4)]),
    // accuracy, robustness, cybersecurity
    rule("accuracy", &[(A15, 0.9)]),
    rule("robustness", &[(A15, 1.0)]),
    rule("cybersecurity", &[(A15, 1.0)]),
    rule("security", &[(A15, 0.8)]),
    rule("adversarial", &[(A15, 0.9)]),
    rule("attack", &[(A15, 0.7)]),
    rule("vulnerability", &[(A15, 0.8)]),
    rule("encryption", &[(A15, 0.6)]),
    rule("integrity", &[(A15, 0.7)]),
    rule("availability", &[(A15, 0.5)]),
    rule("reliability", &[(A15, 0.6)]),
    rule("testing", &[(A15, 0.5), (A9, 0.4)]),
    // high-risk indicators
    rule("biometric", &[(A9, 0.8), (A10, 0.6)]),
    rule("facial recognition", &[(A9, 0.9), (A10, 0.7)]),
    rule("law enforcement", &[(A9, 0.9)]),
    rule("critical infrastructure", &[(A9, 0.8)]),
    rule("employment", &[(A9, 0.7), (A10, 0.6)]),
    rule("credit scoring", &[(A9, 0.8), (A10, 0.6)]),
    rule("healthcare", &[(A9, 0.7), (A15, 0.6)]),
    rule("education", &[(A9, 0.6), (A10, 0.5)]),
    rule("migration", &[(A9, 0.7)]),
    rule("autonomous", &[(A14, 0.7), (A15, 0.6)]),
];

fn compiled_rules() -> &'static [(KeywordRule, Regex)] {
    static COMPILED: OnceLock<Vec<(KeywordRule, Regex)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        KEYWORD_RULES
            .iter()
            .filter_map(|rule| {
                let pattern = format!(r"\b{}\b", regex::escape(rule.phrase));
                match Regex::new(&pattern) {
                    Ok(regex) => Some((*rule, regex)),
                    Err(err) => {
                        warn!(phrase = rule.phrase, %err, "skipping keyword with invalid pattern");
                        None
                    }
                }
            })
            .collect()
    })
}

/// Dictionary phrases present in `text`, matched case-insensitively on word boundaries.
pub fn extract_keywords(text: &str) -> BTreeSet<&'static str> {
    let lowered = text.to_lowercase();
    compiled_rules()
        .iter()
        .filter(|(_, regex)| regex.is_match(&lowered))
        .map(|(rule, _)| rule.phrase)
        .collect()
}

/// Phrases contributing to `article`, in dictionary order.
pub fn article_keywords(article: Article) -> Vec<&'static str> {
    KEYWORD_RULES
        .iter()
        .filter(|rule| rule.contributions.iter().any(|(target, _)| *target == article))
        .map(|rule| rule.phrase)
        .collect()
}

pub(crate) fn rule_for(phrase: &str) -> Option<&'static KeywordRule> {
    KEYWORD_RULES.iter().find(|rule| rule.phrase == phrase)
}
