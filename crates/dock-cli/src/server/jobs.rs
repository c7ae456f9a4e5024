use chrono::{DateTime, Utc};
use rigidock::engine::config::DockingParameters;
use rigidock::engine::error::DockingError;
use rigidock::workflows::dock::{self, DockingResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Done,
    Error,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<DockingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of a docking submission. Missing structures fall back to the demo pair,
/// and missing, null or partial parameters fall back to defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockRequest {
    pub pdb_a: Option<String>,
    pub pdb_b: Option<String>,
    #[serde(default, deserialize_with = "params_ignoring_nulls")]
    pub params: Option<DockingParameters>,
}

impl DockRequest {
    /// Parses a raw request body. A blank body is an empty request.
    pub fn from_body(body: &[u8]) -> serde_json::Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }
}

/// Null-valued parameter fields are dropped so they take their defaults.
fn params_ignoring_nulls<'de, D>(deserializer: D) -> Result<Option<DockingParameters>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(mut fields)) => {
            fields.retain(|_, v| !v.is_null());
            serde_json::from_value(Value::Object(fields))
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
        Some(other) => serde_json::from_value(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// In-memory job table shared by all request handlers.
///
/// Jobs are never evicted and have no timeout or cancellation.
#[derive(Debug, Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<Uuid, Job>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let job = Job {
            id,
            status: JobStatus::Queued,
            created_at: Utc::now(),
            result: None,
            error: None,
        };
        self.jobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, job);
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<Job> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn update(&self, id: &Uuid, f: impl FnOnce(&mut Job)) {
        let mut jobs = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
        match jobs.get_mut(id) {
            Some(job) => f(job),
            None => warn!(%id, "Update for unknown job ignored."),
        }
    }

    pub fn mark_running(&self, id: &Uuid) {
        self.update(id, |job| job.status = JobStatus::Running);
    }

    pub fn finish(&self, id: &Uuid, outcome: Result<DockingResult, DockingError>) {
        self.update(id, |job| match outcome {
            Ok(result) => {
                job.status = JobStatus::Done;
                job.result = Some(result);
            }
            Err(e) => {
                job.status = JobStatus::Error;
                job.error = Some(e.to_string());
            }
        });
    }

    /// Creates a queued job and starts it on the blocking pool.
    pub fn submit(&self, request: DockRequest) -> Uuid {
        let id = self.create();
        self.spawn(id, request);
        id
    }

    pub(crate) fn spawn(&self, id: Uuid, request: DockRequest) -> JoinHandle<()> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            store.mark_running(&id);
            let params = request.params.unwrap_or_default();
            info!(%id, samples = params.samples, seed = params.seed, "Docking job started.");

            let outcome = dock::run(request.pdb_a.as_deref(), request.pdb_b.as_deref(), &params);
            match &outcome {
                Ok(_) => info!(%id, "Docking job finished."),
                Err(e) => error!(%id, error = %e, "Docking job failed."),
            }
            store.finish(&id, outcome);
        })
    }
}
