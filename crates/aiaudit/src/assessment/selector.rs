use serde::{Deserialize, Serialize};

use super::articles::{Article, ArticleScores};
use super::catalog::{RemediationAction, RemediationCatalog, Urgency};
use super::fusion::top_articles;

/// Fused scores below this are not considered relevant.
pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 0.05;

/// Default per-article action budget.
pub const DEFAULT_TOP_K: usize = 3;

/// Selected action annotated with its article context and global rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationItem {
    pub article: Article,
    pub article_name: String,
    pub article_score: f64,
    pub remediation_id: String,
    pub title: String,
    pub description: String,
    pub urgency: Urgency,
    pub estimated_effort: String,
    /// 1-based rank across the whole plan.
    pub priority: usize,
}

impl RemediationItem {
    fn new(article: Article, article_name: &str, score: f64, action: &RemediationAction, priority: usize) -> Self {
        Self {
            article,
            article_name: article_name.to_string(),
            article_score: round3(score),
            remediation_id: action.id.clone(),
            title: action.title.clone(),
            description: action.description.trim().to_string(),
            urgency: action.urgency,
            estimated_effort: action.estimated_effort.clone(),
            priority,
        }
    }
}

/// Ranks catalog actions against fused article scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemediationSelector {
    top_k: usize,
    relevance_threshold: f64,
}

impl Default for RemediationSelector {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl RemediationSelector {
    pub fn new(top_k: usize) -> Self {
        Self {
            top_k,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, relevance_threshold: f64) -> Self {
        self.relevance_threshold = relevance_threshold;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Upper bound on the number of items a plan may contain.
    pub fn cap(&self) -> usize {
        self.top_k.saturating_mul(3)
    }

    /// Select and rank actions.
    ///
    /// Articles at or above the threshold are visited by descending score (ties keep canonical
    /// article order). Each contributes `max(1, floor(score * top_k))` actions, most urgent
    /// first, and the flattened list never exceeds `3 * top_k` entries.
    pub fn select(&self, fused: &ArticleScores, catalog: &RemediationCatalog) -> Vec<RemediationItem> {
        let cap = self.cap();
        let mut items = Vec::new();
        if cap == 0 {
            return items;
        }

        let ranked = top_articles(fused, Article::ALL.len(), self.relevance_threshold);

        'articles: for (article, score) in ranked {
            let Some(template) = catalog.template(article) else {
                continue;
            };

            let mut actions: Vec<&RemediationAction> = template.remediations.iter().collect();
            actions.sort_by_key(|action| action.urgency.rank());

            let wanted = ((score * self.top_k as f64).floor() as usize).max(1);
            for action in actions.into_iter().take(wanted) {
                let priority = items.len() + 1;
                items.push(RemediationItem::new(article, &template.name, score, action, priority));
                if items.len() >= cap {
                    break 'articles;
                }
            }
        }

        items
    }
}

/// Select with the default relevance threshold.
pub fn select_remediations(
    fused: &ArticleScores,
    catalog: &RemediationCatalog,
    top_k: usize,
) -> Vec<RemediationItem> {
    RemediationSelector::new(top_k).select(fused, catalog)
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
