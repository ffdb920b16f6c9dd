use std::fmt;

use serde::{Deserialize, Serialize};

use super::articles::{Article, ArticleScores};

/// Default blend weight given to the model contribution.
pub const DEFAULT_ALPHA: f64 = 0.6;

/// Risk levels emitted by the external text classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Probability triple over risk levels. Values are expected to lie in [0, 1] and to sum to
/// roughly one; `is_within_bounds` checks the former, the sum is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelProbabilities {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl ModelProbabilities {
    pub const fn new(high: f64, medium: f64, low: f64) -> Self {
        Self { high, medium, low }
    }

    pub fn get(&self, level: RiskLevel) -> f64 {
        match level {
            RiskLevel::High => self.high,
            RiskLevel::Medium => self.medium,
            RiskLevel::Low => self.low,
        }
    }

    /// Every entry is finite and within [0, 1].
    pub fn is_within_bounds(&self) -> bool {
        [self.high, self.medium, self.low]
            .iter()
            .all(|p| p.is_finite() && (0.0..=1.0).contains(p))
    }

    /// Collapse the distribution into a single severity scalar: P(high) + 0.5 * P(medium).
    pub fn risk_multiplier(&self) -> f64 {
        self.high + 0.5 * self.medium
    }

    /// Arg-max level and its probability. Ties resolve toward the more severe level.
    pub fn most_likely(&self) -> (RiskLevel, f64) {
        [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low]
            .into_iter()
            .map(|level| (level, self.get(level)))
            .fold((RiskLevel::High, self.high), |best, candidate| {
                if candidate.1 > best.1 {
                    candidate
                } else {
                    best
                }
            })
    }
}

/// Blend the classifier's severity with per-article rule relevance.
///
/// For each article the model contribution is `multiplier * (0.5 + 0.5 * rule)`, blended as
/// `alpha * model + (1 - alpha) * rule`, after which the vector is divided by its maximum.
/// An all-zero vector is returned unchanged. Articles absent from `rule_scores` count as 0.
pub fn fuse(probabilities: &ModelProbabilities, rule_scores: &ArticleScores, alpha: f64) -> ArticleScores {
    let multiplier = probabilities.risk_multiplier();

    let fused: ArticleScores = Article::ALL
        .into_iter()
        .map(|article| {
            let rule = rule_scores.get(&article).copied().unwrap_or(0.0);
            let model_contribution = multiplier * (0.5 + 0.5 * rule);
            (article, alpha * model_contribution + (1.0 - alpha) * rule)
        })
        .collect();

    let max = fused.values().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return fused;
    }

    fused
        .into_iter()
        .map(|(article, score)| (article, score / max))
        .collect()
}

/// Up to `top_k` articles scoring at least `threshold`, highest first. Equal scores keep
/// canonical article order.
pub fn top_articles(fused: &ArticleScores, top_k: usize, threshold: f64) -> Vec<(Article, f64)> {
    let mut ranked: Vec<(Article, f64)> = fused
        .iter()
        .filter(|(_, score)| **score >= threshold)
        .map(|(article, score)| (*article, *score))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(top_k);
    ranked
}
