use serde::{Deserialize, Serialize};

use super::fusion::{ModelProbabilities, RiskLevel};

/// Label plus full distribution returned by a text classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub risk_level: RiskLevel,
    pub probabilities: ModelProbabilities,
}

impl Prediction {
    /// Prediction whose label is the arg-max of `probabilities`.
    pub fn from_probabilities(probabilities: ModelProbabilities) -> Self {
        Self {
            risk_level: probabilities.most_likely().0,
            probabilities,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("no risk classifier is loaded")]
    Unavailable,
    #[error("risk classifier failed: {0}")]
    Failed(String),
}

/// Seam for the external risk-level text classifier.
pub trait RiskClassifier: Send + Sync {
    fn predict(&self, text: &str) -> Result<Prediction, ClassifierError>;

    /// Identifier reported alongside assessments.
    fn version(&self) -> &str;
}

/// Classifier that answers every request with the same distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticClassifier {
    probabilities: ModelProbabilities,
}

impl StaticClassifier {
    pub const fn new(probabilities: ModelProbabilities) -> Self {
        Self { probabilities }
    }
}

impl RiskClassifier for StaticClassifier {
    fn predict(&self, _text: &str) -> Result<Prediction, ClassifierError> {
        Ok(Prediction::from_probabilities(self.probabilities))
    }

    fn version(&self) -> &str {
        "static"
    }
}
