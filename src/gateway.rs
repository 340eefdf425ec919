use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::BullscopeError;

/// Collection type found behind a state key, probed at read time.
///
/// Real deployments vary the type per state (and per BullMQ version), so
/// every operation that touches a state key dispatches on this instead of
/// assuming a fixed layout. Absent keys and unsupported types both map to
/// `Missing` and contribute zero members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    List,
    SortedSet,
    Set,
    Missing,
}

/// One operation in a batched round trip.
#[derive(Debug, Clone)]
pub enum StoreOp {
    HashGetField { key: String, field: String },
    HashGetAll { key: String },
    RemoveMember {
        key: String,
        kind: CollectionKind,
        member: String,
    },
    DeleteKeys { keys: Vec<String> },
}

/// Reply to one batched operation, in issue order.
#[derive(Debug, Clone)]
pub enum StoreReply {
    Field(Option<String>),
    Record(HashMap<String, String>),
    Done,
}

impl StoreReply {
    pub(crate) fn into_field(self) -> Option<String> {
        match self {
            StoreReply::Field(value) => value,
            _ => None,
        }
    }

    pub(crate) fn into_record(self) -> HashMap<String, String> {
        match self {
            StoreReply::Record(record) => record,
            _ => HashMap::new(),
        }
    }
}

/// Command surface Bullscope needs from a key-value store.
///
/// `RedisGateway` is the production implementation; anything else that
/// honors the contract (the integration suite uses an in-memory store) can
/// drive the full engine. Reads have no side effects; mutation happens only
/// through `batch` with `RemoveMember`/`DeleteKeys` operations.
#[async_trait]
pub trait StoreCommands: Send + Sync {
    /// Liveness check against the store.
    async fn ping(&self) -> Result<(), BullscopeError>;

    /// Every key matching a glob pattern, collected via repeated bounded
    /// scans so no single call blocks on a large keyspace.
    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, BullscopeError>;

    async fn collection_kind(&self, key: &str) -> Result<CollectionKind, BullscopeError>;

    /// Full member range of a list key, in list order.
    async fn read_list(&self, key: &str) -> Result<Vec<String>, BullscopeError>;

    /// Members of a sorted set; scores are irrelevant here, only membership
    /// matters.
    async fn read_sorted_set(&self, key: &str) -> Result<Vec<String>, BullscopeError>;

    async fn read_set(&self, key: &str) -> Result<Vec<String>, BullscopeError>;

    async fn hash_get_all(
        &self,
        key: &str,
    ) -> Result<HashMap<String, String>, BullscopeError>;

    async fn hash_get_field(
        &self,
        key: &str,
        field: &str,
    ) -> Result<Option<String>, BullscopeError>;

    /// Single-member membership probe, dispatched on the collection kind
    /// (positional lookup for lists, score lookup for sorted sets,
    /// membership test for sets). `Missing` is never a member of anything.
    async fn contains_member(
        &self,
        key: &str,
        kind: CollectionKind,
        member: &str,
    ) -> Result<bool, BullscopeError>;

    /// Executes every operation in one round trip, preserving per-operation
    /// reply order. Partial command errors fail the whole batch: partial
    /// success cannot be safely interpreted by the caller.
    async fn batch(&self, ops: Vec<StoreOp>) -> Result<Vec<StoreReply>, BullscopeError>;

    /// Raw server telemetry fields (Redis INFO), keyed by field name.
    async fn server_info(&self) -> Result<HashMap<String, String>, BullscopeError>;
}
