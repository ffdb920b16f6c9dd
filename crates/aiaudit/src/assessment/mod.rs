//! Free-text assessment path: keyword rules, model fusion and remediation ranking.

pub mod articles;
pub mod catalog;
pub mod classifier;
pub mod fusion;
pub mod keywords;
pub mod plan;
pub mod render;
pub mod selector;
pub mod signal;

pub use articles::{Article, ArticleScores};
pub use catalog::{ArticleTemplate, CatalogError, RemediationAction, RemediationCatalog, Urgency};
pub use classifier::{ClassifierError, Prediction, RiskClassifier, StaticClassifier};
pub use fusion::{fuse, top_articles, ModelProbabilities, RiskLevel, DEFAULT_ALPHA};
pub use keywords::{article_keywords, extract_keywords};
pub use plan::{build_remediation_plan, RemediationPlan, DISCLAIMER};
pub use render::{to_github_issue, to_markdown, IssueDraft};
pub use selector::{
    select_remediations, RemediationItem, RemediationSelector, DEFAULT_RELEVANCE_THRESHOLD,
    DEFAULT_TOP_K,
};
pub use signal::{compute_rule_signal, RuleSignal};
