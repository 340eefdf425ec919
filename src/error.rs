/// Errors surfaced by Bullscope operations.
///
/// Data-shape anomalies (unparseable payloads, malformed timestamps,
/// unexpected collection types) are absorbed with documented fallback values
/// and never reach this enum; what remains is connection-level and
/// batch-level failure.
#[derive(Debug, thiserror::Error)]
pub enum BullscopeError {
    #[error("Redis error: {0}")]
    Redis(#[from] deadpool_redis::redis::RedisError),

    #[error("Redis pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    #[error("Failed to create Redis pool: {0}")]
    CreatePool(#[from] deadpool_redis::CreatePoolError),

    #[error("Batched round trip returned {got} replies for {expected} operations")]
    BatchShape { expected: usize, got: usize },
}
