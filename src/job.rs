use serde::{Deserialize, Serialize};

/// One of the five fixed lifecycle buckets a BullMQ job id can live in.
///
/// Membership is not exclusive: degenerate data can place one id in several
/// buckets at once, and an orphaned hash record may sit in none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Wait,
    Active,
    Delayed,
    Completed,
    Failed,
}

impl JobState {
    pub const ALL: [JobState; 5] = [
        JobState::Wait,
        JobState::Active,
        JobState::Delayed,
        JobState::Completed,
        JobState::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Wait => "wait",
            JobState::Active => "active",
            JobState::Delayed => "delayed",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
        }
    }

    /// Parses a state name; anything unrecognized (including the empty
    /// string used as the "no filter" sentinel) is `None`.
    pub fn parse(value: &str) -> Option<JobState> {
        match value {
            "wait" => Some(JobState::Wait),
            "active" => Some(JobState::Active),
            "delayed" => Some(JobState::Delayed),
            "completed" => Some(JobState::Completed),
            "failed" => Some(JobState::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a job listing, hydrated only for the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub id: String,
    /// Producer-assigned label, empty when the hash has no `name` field.
    pub name: String,
    /// Sorted, comma-joined union of every state collection the id was
    /// found in (e.g. `"completed,wait"`); empty for orphans.
    pub state: String,
    /// Compact payload preview, truncated to 140 characters.
    pub data_preview: String,
    /// Local date-time rendering of the `timestamp` field, the raw stored
    /// string when unparseable, `-` when absent.
    pub timestamp: String,
}

/// Full single-job record returned by the detail resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobDetail {
    pub id: String,
    pub name: String,
    /// Re-derived by probing each state collection directly, independent of
    /// any listing merge.
    pub state: String,
    pub data_raw: String,
    /// Pretty-printed form of `data_raw` when it parses as JSON, otherwise
    /// identical to `data_raw`.
    pub data_json: String,
}

/// Raw member counts per state collection.
///
/// These are collection cardinalities, deliberately not deduplicated
/// against the merged job view: a job sitting in two buckets counts once in
/// each. The listing itself reports deduplicated identities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    pub wait: usize,
    pub active: usize,
    pub delayed: usize,
    pub completed: usize,
    pub failed: usize,
}

impl StateCounts {
    pub fn get(&self, state: JobState) -> usize {
        match state {
            JobState::Wait => self.wait,
            JobState::Active => self.active,
            JobState::Delayed => self.delayed,
            JobState::Completed => self.completed,
            JobState::Failed => self.failed,
        }
    }

    pub(crate) fn set(&mut self, state: JobState, count: usize) {
        match state {
            JobState::Wait => self.wait = count,
            JobState::Active => self.active = count,
            JobState::Delayed => self.delayed = count,
            JobState::Completed => self.completed = count,
            JobState::Failed => self.failed = count,
        }
    }

    /// Sum across all five buckets (still counting multi-state jobs once
    /// per bucket).
    pub fn total(&self) -> usize {
        self.wait + self.active + self.delayed + self.completed + self.failed
    }
}

/// One page of a job listing together with its aggregate stats.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    /// Size of the filtered id set before pagination, stable across pages.
    pub total: usize,
    pub counts: StateCounts,
}
