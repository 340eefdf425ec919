use std::sync::Arc;

use crate::error::BullscopeError;
use crate::explorer_internal::ExplorerInternal;
use crate::gateway::StoreCommands;
use crate::info::ServerInfo;
use crate::job::{JobDetail, JobPage};
use crate::redis_gateway::RedisGateway;
use crate::types::JobQuery;

/// Explorer is the main entry point for browsing BullMQ-layout queues.
///
/// It wraps one logical store connection. Queries issued while disconnected
/// return empty values silently rather than failing; check
/// [`Explorer::is_connected`] when the distinction matters. The explorer
/// holds no query state between calls (pagination, search and sort all
/// travel in the per-call [`JobQuery`]), and callers are expected to
/// serialize requests against one connection.
///
/// # Examples
///
/// ```rust,no_run
/// use bullscope::{Explorer, JobQuery};
///
/// async fn example() -> Result<(), bullscope::BullscopeError> {
///     let mut explorer = Explorer::new();
///     explorer.connect("redis://127.0.0.1:6379", "bull").await?;
///
///     for queue in explorer.list_queues().await? {
///         let page = explorer.list_jobs(&queue, &JobQuery::default()).await?;
///         println!("{queue}: {} jobs", page.total);
///     }
///     Ok(())
/// }
/// ```
#[derive(Default)]
pub struct Explorer {
    internal: Option<ExplorerInternal>,
}

impl Explorer {
    /// Creates a disconnected explorer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects to the store at `url`, verifying liveness with a PING, and
    /// remembers `prefix` as the namespace root for every later operation.
    /// A blank prefix falls back to `"bull"`.
    ///
    /// Replaces any previous connection.
    pub async fn connect(&mut self, url: &str, prefix: &str) -> Result<(), BullscopeError> {
        let gateway = RedisGateway::connect(url).await?;
        self.internal = Some(ExplorerInternal::new(Arc::new(gateway), prefix));
        tracing::debug!(prefix = self.prefix(), "connected to store");
        Ok(())
    }

    /// Attaches an already-built store handle instead of dialing Redis.
    ///
    /// Any [`StoreCommands`] implementation works; this is also the seam
    /// the integration tests drive an in-memory store through.
    pub fn with_store(store: Arc<dyn StoreCommands>, prefix: &str) -> Self {
        Self {
            internal: Some(ExplorerInternal::new(store, prefix)),
        }
    }

    /// Releases the store handle. Idempotent.
    pub fn disconnect(&mut self) {
        self.internal = None;
    }

    pub fn is_connected(&self) -> bool {
        self.internal.is_some()
    }

    /// The active namespace prefix, if connected.
    pub fn prefix(&self) -> Option<&str> {
        self.internal.as_ref().map(ExplorerInternal::prefix)
    }

    /// Basic server telemetry (version, mode, memory, clients), with `-`
    /// placeholders for anything the server does not report. `None` while
    /// disconnected.
    pub async fn server_info(&self) -> Result<Option<ServerInfo>, BullscopeError> {
        match &self.internal {
            Some(internal) => Ok(Some(internal.server_info().await?)),
            None => Ok(None),
        }
    }

    /// Distinct queue names discovered under the prefix, sorted ascending.
    /// Empty while disconnected.
    pub async fn list_queues(&self) -> Result<Vec<String>, BullscopeError> {
        match &self.internal {
            Some(internal) => internal.queues().await,
            None => Ok(Vec::new()),
        }
    }

    /// One page of the queue's unified job listing plus aggregate counts.
    ///
    /// Jobs found in several state collections appear once, labeled with
    /// the sorted comma-joined union of their states, while
    /// [`JobPage::counts`](crate::JobPage) reports raw per-collection
    /// cardinalities. `total` is the filtered-set size before pagination.
    /// A default [`JobPage`] while disconnected.
    pub async fn list_jobs(
        &self,
        queue: &str,
        query: &JobQuery,
    ) -> Result<JobPage, BullscopeError> {
        match &self.internal {
            Some(internal) => internal.list_jobs(queue, query).await,
            None => Ok(JobPage::default()),
        }
    }

    /// Full record of one job, with its state membership re-probed
    /// per-collection at call time. A missing job yields empty fields, not
    /// an error; `None` while disconnected.
    pub async fn job_detail(
        &self,
        queue: &str,
        job_id: &str,
    ) -> Result<Option<JobDetail>, BullscopeError> {
        match &self.internal {
            Some(internal) => Ok(Some(internal.job_detail(queue, job_id).await?)),
            None => Ok(None),
        }
    }

    /// Removes the job from every state collection and deletes its hash
    /// and log records in one batched round trip. Deleting an absent job is
    /// a no-op, as is calling this while disconnected.
    pub async fn delete_job(&self, queue: &str, job_id: &str) -> Result<(), BullscopeError> {
        match &self.internal {
            Some(internal) => internal.delete_job(queue, job_id).await,
            None => Ok(()),
        }
    }

    /// Deletes a job and immediately re-runs the listing with `query`,
    /// returning the refreshed page a browsing surface would render next.
    pub async fn delete_job_and_refresh(
        &self,
        queue: &str,
        job_id: &str,
        query: &JobQuery,
    ) -> Result<JobPage, BullscopeError> {
        self.delete_job(queue, job_id).await?;
        self.list_jobs(queue, query).await
    }
}
