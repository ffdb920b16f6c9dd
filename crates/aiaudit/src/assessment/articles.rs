use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// EU AI Act articles used as the classification axis for risk and remediation content.
///
/// Variant order is the canonical article order; `BTreeMap<Article, _>` iterates in it,
/// which keeps every score vector deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Article {
    #[serde(rename = "Article_9")]
    RiskManagement,
    #[serde(rename = "Article_10")]
    DataGovernance,
    #[serde(rename = "Article_12")]
    RecordKeeping,
    #[serde(rename = "Article_14")]
    HumanOversight,
    #[serde(rename = "Article_15")]
    AccuracyRobustness,
}

impl Article {
    pub const ALL: [Self; 5] = [
        Self::RiskManagement,
        Self::DataGovernance,
        Self::RecordKeeping,
        Self::HumanOversight,
        Self::AccuracyRobustness,
    ];

    /// Wire identifier, e.g. `Article_9`.
    pub const fn id(self) -> &'static str {
        match self {
            Self::RiskManagement => "Article_9",
            Self::DataGovernance => "Article_10",
            Self::RecordKeeping => "Article_12",
            Self::HumanOversight => "Article_14",
            Self::AccuracyRobustness => "Article_15",
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::RiskManagement => 9,
            Self::DataGovernance => 10,
            Self::RecordKeeping => 12,
            Self::HumanOversight => 14,
            Self::AccuracyRobustness => 15,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::RiskManagement => "Risk Management System",
            Self::DataGovernance => "Data and Data Governance",
            Self::RecordKeeping => "Record-Keeping",
            Self::HumanOversight => "Human Oversight",
            Self::AccuracyRobustness => "Accuracy, Robustness and Cybersecurity",
        }
    }

    pub fn from_id(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|article| article.id().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Per-article score vector. Producers in this crate always populate every article.
pub type ArticleScores = BTreeMap<Article, f64>;

/// Score vector with every article present at 0.0.
pub fn zeroed_scores() -> ArticleScores {
    Article::ALL.into_iter().map(|article| (article, 0.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_lookup() {
        for article in Article::ALL {
            assert_eq!(Article::from_id(article.id()), Some(article));
        }
        assert_eq!(Article::from_id("article_14"), Some(Article::HumanOversight));
        assert_eq!(Article::from_id("Article_5"), None);
    }

    #[test]
    fn scores_serialize_with_article_ids() {
        let mut scores = zeroed_scores();
        scores.insert(Article::RecordKeeping, 0.5);

        let json = serde_json::to_value(&scores).expect("scores serialize");

        assert_eq!(json["Article_12"], 0.5);
        assert_eq!(json["Article_9"], 0.0);
        assert_eq!(json.as_object().map(|map| map.len()), Some(5));
    }
}
