use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::articles::Article;

const BUILTIN_CATALOG: &str = include_str!("../../templates/article_remediations.yml");

/// Urgency attached to a remediation action; the primary sort key within an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    /// Lower ranks sort first.
    pub const fn rank(self) -> u8 {
        match self {
            Urgency::High => 0,
            Urgency::Medium => 1,
            Urgency::Low => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Urgency::High => "high",
            Urgency::Medium => "medium",
            Urgency::Low => "low",
        }
    }

    /// Issue-tracker priority tag.
    pub const fn tracker_tag(self) -> &'static str {
        match self {
            Urgency::High => "P0",
            Urgency::Medium => "P1",
            Urgency::Low => "P2",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Candidate corrective action from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationAction {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub urgency: Urgency,
    #[serde(default = "unknown_effort")]
    pub estimated_effort: String,
}

fn unknown_effort() -> String {
    "Unknown".to_string()
}

/// Catalog entry for one article: display name plus actions in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleTemplate {
    pub name: String,
    pub remediations: Vec<RemediationAction>,
}

#[derive(Debug, Deserialize)]
struct RawTemplate {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    remediations: Vec<RemediationAction>,
}

/// Errors raised while loading or validating a remediation catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read remediation catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("remediation catalog is not valid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("remediation catalog references unknown article '{0}'")]
    UnknownArticle(String),
    #[error("remediation in {article} is missing a {field}")]
    MissingField { article: Article, field: &'static str },
    #[error("remediation id '{0}' appears more than once")]
    DuplicateAction(String),
}

/// Article-keyed remediation templates, validated at load and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationCatalog {
    templates: BTreeMap<Article, ArticleTemplate>,
    fingerprint: String,
}

impl RemediationCatalog {
    /// Catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&raw)?;
        info!(
            path = %path.display(),
            articles = catalog.templates.len(),
            fingerprint = %catalog.fingerprint,
            "remediation catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, CatalogError> {
        let parsed: BTreeMap<String, RawTemplate> = serde_yaml::from_str(raw)?;

        let mut templates = BTreeMap::new();
        for (key, template) in parsed {
            let article =
                Article::from_id(&key).ok_or_else(|| CatalogError::UnknownArticle(key.clone()))?;
            let name = template
                .name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| article.name().to_string());
            templates.insert(
                article,
                ArticleTemplate {
                    name,
                    remediations: template.remediations,
                },
            );
        }

        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        let fingerprint = hex::encode(hasher.finalize())[..12].to_string();

        let catalog = Self::from_templates(templates)?;
        Ok(Self {
            fingerprint,
            ..catalog
        })
    }

    /// Build a catalog from already-typed templates, applying the same validation as the
    /// YAML loader.
    pub fn from_templates(
        templates: BTreeMap<Article, ArticleTemplate>,
    ) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for (article, template) in &templates {
            for action in &template.remediations {
                if action.id.trim().is_empty() {
                    return Err(CatalogError::MissingField {
                        article: *article,
                        field: "id",
                    });
                }
                if action.title.trim().is_empty() {
                    return Err(CatalogError::MissingField {
                        article: *article,
                        field: "title",
                    });
                }
                if !seen.insert(action.id.clone()) {
                    return Err(CatalogError::DuplicateAction(action.id.clone()));
                }
            }
            if template.remediations.is_empty() {
                debug!(%article, "catalog article has no remediations");
            }
        }

        Ok(Self {
            templates,
            fingerprint: "inline".to_string(),
        })
    }

    pub fn template(&self, article: Article) -> Option<&ArticleTemplate> {
        self.templates.get(&article)
    }

    pub fn articles(&self) -> impl Iterator<Item = Article> + '_ {
        self.templates.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn action_count(&self) -> usize {
        self.templates
            .values()
            .map(|template| template.remediations.len())
            .sum()
    }

    /// Short content hash of the source YAML, or `inline` for programmatic catalogs.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}
