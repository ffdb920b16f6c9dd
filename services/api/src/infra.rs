use aiaudit::assessment::ModelProbabilities;
use aiaudit::intake::{RepositoryError, SnapshotBuilder, SnapshotRecord, SnapshotRepository};
use aiaudit::AssessmentService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

pub(crate) type ApiService = AssessmentService<InMemorySnapshotRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) service: Arc<ApiService>,
}

/// Process-local snapshot history, lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemorySnapshotRepository {
    records: Arc<Mutex<Vec<SnapshotRecord>>>,
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn append(
        &self,
        system_name: &str,
        build: &SnapshotBuilder<'_>,
    ) -> Result<SnapshotRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("snapshot mutex poisoned");
        let previous = guard
            .iter()
            .rev()
            .find(|record| record.system_name == system_name);
        let snapshot = build(previous);
        guard.push(snapshot.clone());
        Ok(snapshot)
    }

    fn history(&self, system_name: &str) -> Result<Vec<SnapshotRecord>, RepositoryError> {
        let guard = self.records.lock().expect("snapshot mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.system_name == system_name)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<SnapshotRecord>, RepositoryError> {
        Ok(self.records.lock().expect("snapshot mutex poisoned").clone())
    }
}

/// Parse `high,medium,low` into a probability triple.
pub(crate) fn parse_distribution(raw: &str) -> Result<ModelProbabilities, String> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|err| format!("failed to parse '{part}' as a probability ({err})"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match values.as_slice() {
        [high, medium, low] if values.iter().all(|p| (0.0..=1.0).contains(p)) => {
            Ok(ModelProbabilities::new(*high, *medium, *low))
        }
        [_, _, _] => Err("probabilities must lie between 0 and 1".to_string()),
        _ => Err(format!(
            "expected three comma-separated probabilities (high,medium,low), got '{raw}'"
        )),
    }
}
