use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::assessment::{
    build_remediation_plan, CatalogError, ClassifierError, ModelProbabilities, Prediction,
    RemediationCatalog, RemediationPlan, RemediationSelector, RiskClassifier,
};
use crate::config::{AssessmentConfig, MAX_TOP_K};
use crate::intake::{
    assess_intake, IntakeAssessmentResult, IntakeForm, RepositoryError, SnapshotRecord,
    SnapshotRepository,
};

/// Version reported when probabilities came from the caller rather than a classifier.
const CALLER_SUPPLIED: &str = "caller-supplied";

/// Remediation plan annotated with the model and catalog that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemediationReport {
    #[serde(flatten)]
    pub plan: RemediationPlan,
    pub model_version: String,
    pub catalog_version: String,
}

/// Context object owning the catalog, the optional classifier and engine tuning.
pub struct AssessmentService<S> {
    catalog: Arc<RemediationCatalog>,
    classifier: Option<Arc<dyn RiskClassifier>>,
    snapshots: Arc<S>,
    settings: AssessmentConfig,
}

impl<S> AssessmentService<S>
where
    S: SnapshotRepository + 'static,
{
    pub fn new(
        catalog: Arc<RemediationCatalog>,
        classifier: Option<Arc<dyn RiskClassifier>>,
        snapshots: Arc<S>,
        settings: AssessmentConfig,
    ) -> Self {
        Self {
            catalog,
            classifier,
            snapshots,
            settings,
        }
    }

    /// Load the configured catalog (or the embedded one) and build the service.
    pub fn from_config(
        settings: AssessmentConfig,
        classifier: Option<Arc<dyn RiskClassifier>>,
        snapshots: Arc<S>,
    ) -> Result<Self, CatalogError> {
        let catalog = match &settings.templates_path {
            Some(path) => RemediationCatalog::from_path(path)?,
            None => RemediationCatalog::builtin()?,
        };
        info!(
            actions = catalog.action_count(),
            fingerprint = catalog.fingerprint(),
            classifier = classifier.is_some(),
            "assessment service ready"
        );
        Ok(Self::new(Arc::new(catalog), classifier, snapshots, settings))
    }

    pub fn catalog(&self) -> &RemediationCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &AssessmentConfig {
        &self.settings
    }

    pub fn classifier_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn catalog_loaded(&self) -> bool {
        !self.catalog.is_empty()
    }

    pub fn predict(&self, text: &str) -> Result<Prediction, ServiceError> {
        require_text(text)?;
        let classifier = self
            .classifier
            .as_ref()
            .ok_or(ServiceError::ModelUnavailable)?;
        classifier.predict(text).map_err(ServiceError::from)
    }

    /// Produce a remediation plan for `text`.
    ///
    /// Caller-supplied probabilities win; otherwise the classifier is consulted and its
    /// absence is reported as [`ServiceError::ModelUnavailable`].
    pub fn assess_and_remediate(
        &self,
        text: &str,
        top_k: Option<usize>,
        probabilities: Option<ModelProbabilities>,
    ) -> Result<RemediationReport, ServiceError> {
        require_text(text)?;
        let top_k = top_k.unwrap_or(self.settings.top_k);
        if !(1..=MAX_TOP_K).contains(&top_k) {
            return Err(ServiceError::InvalidRequest(format!(
                "top_k must be between 1 and {MAX_TOP_K}"
            )));
        }

        let (probabilities, model_version) = match probabilities {
            Some(supplied) if !supplied.is_within_bounds() => {
                return Err(ServiceError::InvalidRequest(
                    "probabilities must be finite and between 0 and 1".to_string(),
                ));
            }
            Some(supplied) => (supplied, CALLER_SUPPLIED.to_string()),
            None => {
                let prediction = self.predict(text)?;
                (prediction.probabilities, self.classifier_version())
            }
        };

        let selector =
            RemediationSelector::new(top_k).with_threshold(self.settings.relevance_threshold);
        let plan = build_remediation_plan(
            text,
            &probabilities,
            &self.catalog,
            self.settings.fusion_alpha,
            &selector,
        );
        info!(
            risk_level = %plan.risk_level,
            items = plan.items.len(),
            "remediation plan generated"
        );

        Ok(RemediationReport {
            plan,
            model_version,
            catalog_version: self.catalog.fingerprint().to_string(),
        })
    }

    /// Score an intake form and record a snapshot of the result.
    ///
    /// With `use_model`, the classifier's severity for the form's free text is blended in.
    /// A missing classifier degrades to rules only; a failing one is an error.
    pub fn assess_intake(
        &self,
        form: &IntakeForm,
        use_model: bool,
    ) -> Result<IntakeAssessmentResult, ServiceError> {
        if form.system_name.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "system_name must not be empty".to_string(),
            ));
        }

        let ml_score = if use_model {
            self.intake_ml_score(form)?
        } else {
            None
        };

        let result = assess_intake(form, ml_score);

        let snapshot = self.snapshots.append(&form.system_name, &|previous| {
            SnapshotRecord::from_assessment(form, &result, previous)
        })?;
        info!(
            system = %snapshot.system_name,
            assessment_id = %snapshot.snapshot_id,
            risk_category = %snapshot.risk_category,
            changes = snapshot.key_changes.len(),
            "intake assessment recorded"
        );

        Ok(result)
    }

    pub fn snapshots(&self) -> Result<Vec<SnapshotRecord>, ServiceError> {
        Ok(self.snapshots.all()?)
    }

    pub fn history(&self, system_name: &str) -> Result<Vec<SnapshotRecord>, ServiceError> {
        Ok(self.snapshots.history(system_name)?)
    }

    fn intake_ml_score(&self, form: &IntakeForm) -> Result<Option<f64>, ServiceError> {
        let Some(classifier) = self.classifier.as_ref() else {
            warn!(system = %form.system_name, "no classifier loaded; scoring intake with rules only");
            return Ok(None);
        };

        match classifier.predict(&form.classifier_text()) {
            Ok(prediction) => Ok(Some(prediction.probabilities.risk_multiplier())),
            Err(ClassifierError::Unavailable) => {
                warn!(system = %form.system_name, "classifier unavailable; scoring intake with rules only");
                Ok(None)
            }
            Err(err) => Err(ServiceError::Classifier(err)),
        }
    }

    fn classifier_version(&self) -> String {
        self.classifier
            .as_ref()
            .map(|classifier| classifier.version().to_string())
            .unwrap_or_else(|| CALLER_SUPPLIED.to_string())
    }
}

fn require_text(text: &str) -> Result<(), ServiceError> {
    if text.trim().is_empty() {
        return Err(ServiceError::InvalidRequest(
            "text must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("no risk classifier is loaded; supply probabilities explicitly")]
    ModelUnavailable,
    #[error(transparent)]
    Classifier(ClassifierError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<ClassifierError> for ServiceError {
    fn from(value: ClassifierError) -> Self {
        match value {
            ClassifierError::Unavailable => Self::ModelUnavailable,
            other => Self::Classifier(other),
        }
    }
}
