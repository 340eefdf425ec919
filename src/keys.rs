use crate::job::JobState;

/// Prefix applied when the caller passes a blank one, matching BullMQ's
/// default namespace.
pub(crate) const DEFAULT_PREFIX: &str = "bull";

/// Centralizes the Redis key naming scheme for BullMQ-layout queues.
///
/// Every key Bullscope touches is rendered here so the layout stays
/// bit-exact with what BullMQ producers write.
#[derive(Debug, Clone)]
pub(crate) struct ExplorerKeys {
    /// Namespace prefix applied to every key (e.g. `bull`).
    pub(crate) prefix: String,
}

impl ExplorerKeys {
    pub(crate) fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = if prefix.is_empty() {
            DEFAULT_PREFIX.to_string()
        } else {
            prefix
        };
        Self { prefix }
    }

    /// Glob pattern matching every queue's `meta` marker key.
    pub(crate) fn meta_pattern(&self) -> String {
        format!("{}:*:meta", self.prefix)
    }

    /// State collection key (`{prefix}:<queue>:wait` and friends). The
    /// collection type behind it is probed at read time, never assumed.
    pub(crate) fn state(&self, queue: &str, state: JobState) -> String {
        format!("{}:{}:{}", self.prefix, queue, state.as_str())
    }

    /// Per-job hash record holding `name`, `data` and `timestamp` fields.
    pub(crate) fn job(&self, queue: &str, job_id: &str) -> String {
        format!("{}:{}:{}", self.prefix, queue, job_id)
    }

    /// Auxiliary log record deleted alongside the job hash.
    pub(crate) fn job_logs(&self, queue: &str, job_id: &str) -> String {
        format!("{}:{}:{}:logs", self.prefix, queue, job_id)
    }
}
