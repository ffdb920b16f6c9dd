use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assessment::{IntakeAssessmentResult, RiskCategory};
use super::domain::IntakeForm;

/// Score movements smaller than this are not reported as changes.
const SCORE_CHANGE_EPSILON: f64 = 0.001;

/// Point-in-time record of an intake assessment, kept for trend reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub snapshot_id: String,
    pub system_name: String,
    pub system_version: String,
    pub assessment_timestamp: DateTime<Utc>,
    pub risk_score: f64,
    pub risk_category: RiskCategory,
    pub key_changes: Vec<String>,
}

impl SnapshotRecord {
    /// Build a snapshot for `result`, describing what moved since `previous`.
    pub fn from_assessment(
        form: &IntakeForm,
        result: &IntakeAssessmentResult,
        previous: Option<&SnapshotRecord>,
    ) -> Self {
        let mut record = Self {
            snapshot_id: result.assessment_id.clone(),
            system_name: form.system_name.clone(),
            system_version: form.system_version.clone(),
            assessment_timestamp: result.assessment_timestamp,
            risk_score: result.risk_score,
            risk_category: result.risk_category,
            key_changes: Vec::new(),
        };
        if let Some(previous) = previous {
            record.key_changes = key_changes(previous, &record);
        }
        record
    }
}

/// Differences between two snapshots of the same system, oldest first.
pub fn key_changes(previous: &SnapshotRecord, current: &SnapshotRecord) -> Vec<String> {
    let mut changes = Vec::new();

    if previous.system_version != current.system_version {
        changes.push(format!(
            "System version changed from {} to {}",
            previous.system_version, current.system_version
        ));
    }

    let delta = current.risk_score - previous.risk_score;
    if delta.abs() >= SCORE_CHANGE_EPSILON {
        let direction = if delta > 0.0 { "increased" } else { "decreased" };
        changes.push(format!(
            "Risk score {} from {:.3} to {:.3}",
            direction, previous.risk_score, current.risk_score
        ));
    }

    if previous.risk_category != current.risk_category {
        changes.push(format!(
            "Risk category changed from {} to {}",
            previous.risk_category, current.risk_category
        ));
    }

    changes
}

/// Builds the next snapshot from the latest one recorded for the same system.
pub type SnapshotBuilder<'a> = dyn Fn(Option<&SnapshotRecord>) -> SnapshotRecord + 'a;

/// Storage abstraction for assessment history.
pub trait SnapshotRepository: Send + Sync {
    /// Append the snapshot produced by `build` from the latest record for `system_name`.
    /// The lookup and the append are atomic. Snapshot ids need not be unique.
    fn append(
        &self,
        system_name: &str,
        build: &SnapshotBuilder<'_>,
    ) -> Result<SnapshotRecord, RepositoryError>;
    /// Snapshots for `system_name` in recording order.
    fn history(&self, system_name: &str) -> Result<Vec<SnapshotRecord>, RepositoryError>;
    fn all(&self) -> Result<Vec<SnapshotRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("snapshot repository unavailable: {0}")]
    Unavailable(String),
}
