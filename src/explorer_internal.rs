use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::BullscopeError;
use crate::gateway::{CollectionKind, StoreCommands, StoreOp};
use crate::info::ServerInfo;
use crate::job::{JobDetail, JobPage, JobState, StateCounts};
use crate::keys::ExplorerKeys;
use crate::query::{self, Membership};
use crate::types::{JobQuery, SortBy};

/// Store-facing half of the explorer: owns the gateway handle and the key
/// scheme, and drives every read and mutation. Stateless across calls.
#[derive(Clone)]
pub(crate) struct ExplorerInternal {
    store: Arc<dyn StoreCommands>,
    keys: ExplorerKeys,
}

impl ExplorerInternal {
    pub(crate) fn new(store: Arc<dyn StoreCommands>, prefix: &str) -> Self {
        Self {
            store,
            keys: ExplorerKeys::new(prefix),
        }
    }

    pub(crate) fn prefix(&self) -> &str {
        &self.keys.prefix
    }

    /// Distinct queue names, discovered from `meta` marker keys, sorted
    /// ascending.
    pub(crate) async fn queues(&self) -> Result<Vec<String>, BullscopeError> {
        let keys = self.store.scan_keys(&self.keys.meta_pattern()).await?;
        let mut names = BTreeSet::new();
        for key in keys {
            let parts: Vec<&str> = key.split(':').collect();
            if parts.len() >= 3 {
                names.insert(parts[1].to_string());
            }
        }
        Ok(names.into_iter().collect())
    }

    /// All member ids of one state collection, dispatched on the probed
    /// collection type. Absent or unsupported keys contribute nothing.
    async fn state_ids(&self, key: &str) -> Result<Vec<String>, BullscopeError> {
        match self.store.collection_kind(key).await? {
            CollectionKind::List => self.store.read_list(key).await,
            CollectionKind::SortedSet => self.store.read_sorted_set(key).await,
            CollectionKind::Set => self.store.read_set(key).await,
            CollectionKind::Missing => Ok(Vec::new()),
        }
    }

    /// The job query engine: merge per-state memberships, filter, sort
    /// globally, paginate, then hydrate only the current page.
    pub(crate) async fn list_jobs(
        &self,
        queue: &str,
        query: &JobQuery,
    ) -> Result<JobPage, BullscopeError> {
        tracing::trace!(queue, page = query.page, "listing jobs");

        // Raw reads double as both the count source and the merge input.
        // Counts reflect collection membership; the listing deduplicates.
        let mut membership = Membership::new();
        let mut counts = StateCounts::default();
        for state in JobState::ALL {
            let ids = self.state_ids(&self.keys.state(queue, state)).await?;
            counts.set(state, ids.len());
            query::merge_state_ids(&mut membership, state, &ids);
        }

        // Status narrowing happens before search to bound the payload fetch.
        let mut ids = query::filter_by_status(&membership, query.status);

        if !query.search.is_empty() {
            let needle = query.search.to_lowercase();
            let ops = ids
                .iter()
                .map(|id| StoreOp::HashGetField {
                    key: self.keys.job(queue, id),
                    field: "data".to_string(),
                })
                .collect();
            let replies = self.store.batch(ops).await?;
            ids = ids
                .into_iter()
                .zip(replies)
                .filter_map(|(id, reply)| {
                    let data = reply.into_field();
                    query::matches_search(&id, data.as_deref(), &needle).then_some(id)
                })
                .collect();
        }

        let total = ids.len();

        match query.sort {
            SortBy::Timestamp => {
                let ops = ids
                    .iter()
                    .map(|id| StoreOp::HashGetField {
                        key: self.keys.job(queue, id),
                        field: "timestamp".to_string(),
                    })
                    .collect();
                let replies = self.store.batch(ops).await?;
                let mut keyed: Vec<(String, i64)> = ids
                    .into_iter()
                    .zip(replies)
                    .map(|(id, reply)| {
                        let ts = query::timestamp_sort_key(reply.into_field().as_deref());
                        (id, ts)
                    })
                    .collect();
                // stable sort keeps equal timestamps in ascending id order
                keyed.sort_by_key(|(_, ts)| *ts);
                ids = keyed.into_iter().map(|(id, _)| id).collect();
            }
            SortBy::Id => {
                ids.sort_by(|a, b| query::cmp_job_ids(a, b));
            }
        }
        if query.descending {
            ids.reverse();
        }

        let page_ids = query::page_slice(&ids, query.page, query.page_size);
        if page_ids.is_empty() {
            return Ok(JobPage {
                jobs: Vec::new(),
                total,
                counts,
            });
        }

        let ops = page_ids
            .iter()
            .map(|id| StoreOp::HashGetAll {
                key: self.keys.job(queue, id),
            })
            .collect();
        let replies = self.store.batch(ops).await?;
        let jobs = page_ids
            .iter()
            .zip(replies)
            .map(|(id, reply)| {
                query::hydrate_job(id, &reply.into_record(), membership.get(id.as_str()))
            })
            .collect();

        Ok(JobPage { jobs, total, counts })
    }

    /// Point-in-time single-job record. State membership is re-derived by
    /// probing each collection directly instead of reusing any listing
    /// merge, so the answer is precise even while the queue moves.
    pub(crate) async fn job_detail(
        &self,
        queue: &str,
        job_id: &str,
    ) -> Result<JobDetail, BullscopeError> {
        let record = self.store.hash_get_all(&self.keys.job(queue, job_id)).await?;

        let mut states = BTreeSet::new();
        for state in JobState::ALL {
            let key = self.keys.state(queue, state);
            let kind = self.store.collection_kind(&key).await?;
            if self.store.contains_member(&key, kind, job_id).await? {
                states.insert(state);
            }
        }

        let data_raw = record.get("data").cloned().unwrap_or_default();
        Ok(JobDetail {
            id: job_id.to_string(),
            name: record.get("name").cloned().unwrap_or_default(),
            state: query::state_label(&states),
            data_json: query::pretty_data(&data_raw),
            data_raw,
        })
    }

    /// Removes the id from every state collection and deletes the job hash
    /// plus its log record, all in one batched round trip. Removing a
    /// non-member is a no-op.
    pub(crate) async fn delete_job(
        &self,
        queue: &str,
        job_id: &str,
    ) -> Result<(), BullscopeError> {
        tracing::info!(queue, job_id, "deleting job");

        let mut ops = Vec::with_capacity(JobState::ALL.len() + 1);
        for state in JobState::ALL {
            let key = self.keys.state(queue, state);
            let kind = self.store.collection_kind(&key).await?;
            if kind != CollectionKind::Missing {
                ops.push(StoreOp::RemoveMember {
                    key,
                    kind,
                    member: job_id.to_string(),
                });
            }
        }
        ops.push(StoreOp::DeleteKeys {
            keys: vec![
                self.keys.job(queue, job_id),
                self.keys.job_logs(queue, job_id),
            ],
        });

        self.store.batch(ops).await?;
        Ok(())
    }

    pub(crate) async fn server_info(&self) -> Result<ServerInfo, BullscopeError> {
        let fields = self.store.server_info().await?;
        Ok(ServerInfo::from_raw(&fields))
    }
}
