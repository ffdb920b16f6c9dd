use std::collections::BTreeSet;

use serde::Serialize;

use super::articles::{zeroed_scores, ArticleScores};
use super::keywords::{extract_keywords, rule_for};

/// Summed keyword weight at which an article's rule score saturates at 1.0.
pub const SATURATION_DIVISOR: f64 = 3.0;

/// Rule-only relevance derived from keyword matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSignal {
    pub matched_keywords: BTreeSet<&'static str>,
    pub scores: ArticleScores,
}

/// Match the keyword dictionary against `text` and aggregate per-article scores in [0, 1].
///
/// Each phrase counts once regardless of how often it occurs.
pub fn compute_rule_signal(text: &str) -> RuleSignal {
    let matched_keywords = extract_keywords(text);
    let mut totals = zeroed_scores();

    for phrase in &matched_keywords {
        let Some(rule) = rule_for(phrase) else {
            continue;
        };
        for (article, weight) in rule.contributions {
            *totals.entry(*article).or_insert(0.0) += weight;
        }
    }

    let scores = totals
        .into_iter()
        .map(|(article, total)| (article, (total / SATURATION_DIVISOR).min(1.0)))
        .collect();

    RuleSignal {
        matched_keywords,
        scores,
    }
}
