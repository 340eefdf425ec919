use std::collections::HashMap;

use async_trait::async_trait;
use deadpool_redis::redis::{self, AsyncCommands};

use crate::error::BullscopeError;
use crate::gateway::{CollectionKind, StoreCommands, StoreOp, StoreReply};

/// Upper bound per SCAN step so one call never blocks on a large keyspace.
const SCAN_PAGE_SIZE: usize = 200;

/// Production `StoreCommands` implementation over a deadpool-redis pool.
#[derive(Clone)]
pub struct RedisGateway {
    pool: deadpool_redis::Pool,
}

impl RedisGateway {
    /// Builds a pool for `url` and verifies liveness with a PING before
    /// handing the gateway out.
    pub async fn connect(url: &str) -> Result<Self, BullscopeError> {
        let cfg = deadpool_redis::Config::from_url(url);
        let pool = cfg.create_pool(Some(deadpool_redis::Runtime::Tokio1))?;
        let gateway = Self { pool };
        gateway.ping().await?;
        Ok(gateway)
    }

    pub fn from_pool(pool: deadpool_redis::Pool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> Result<deadpool_redis::Connection, BullscopeError> {
        self.pool.get().await.map_err(BullscopeError::Pool)
    }
}

#[async_trait]
impl StoreCommands for RedisGateway {
    async fn ping(&self) -> Result<(), BullscopeError> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, BullscopeError> {
        let mut conn = self.connection().await?;
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_PAGE_SIZE)
                .query_async(&mut conn)
                .await?;
            keys.extend(batch);
            cursor = next;
            if cursor == 0 {
                break;
            }
        }
        Ok(keys)
    }

    async fn collection_kind(&self, key: &str) -> Result<CollectionKind, BullscopeError> {
        let mut conn = self.connection().await?;
        let kind: String = redis::cmd("TYPE").arg(key).query_async(&mut conn).await?;
        Ok(match kind.as_str() {
            "list" => CollectionKind::List,
            "zset" => CollectionKind::SortedSet,
            "set" => CollectionKind::Set,
            "none" => CollectionKind::Missing,
            other => {
                tracing::warn!(key, kind = other, "unsupported collection type, treating as empty");
                CollectionKind::Missing
            }
        })
    }

    async fn read_list(&self, key: &str) -> Result<Vec<String>, BullscopeError> {
        let mut conn = self.connection().await?;
        let members: Vec<String> = (*conn).lrange(key, 0, -1).await?;
        Ok(members)
    }

    async fn read_sorted_set(&self, key: &str) -> Result<Vec<String>, BullscopeError> {
        let mut conn = self.connection().await?;
        let members: Vec<String> = (*conn).zrange(key, 0, -1).await?;
        Ok(members)
    }

    async fn read_set(&self, key: &str) -> Result<Vec<String>, BullscopeError> {
        let mut conn = self.connection().await?;
        let members: Vec<String> = (*conn).smembers(key).await?;
        Ok(members)
    }

    async fn hash_get_all(
        &self,
        key: &str,
    ) -> Result<HashMap<String, String>, BullscopeError> {
        let mut conn = self.connection().await?;
        let record: HashMap<String, String> = (*conn).hgetall(key).await?;
        Ok(record)
    }

    async fn hash_get_field(
        &self,
        key: &str,
        field: &str,
    ) -> Result<Option<String>, BullscopeError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = (*conn).hget(key, field).await?;
        Ok(value)
    }

    async fn contains_member(
        &self,
        key: &str,
        kind: CollectionKind,
        member: &str,
    ) -> Result<bool, BullscopeError> {
        let mut conn = self.connection().await?;
        match kind {
            CollectionKind::List => {
                let position: Option<u64> = redis::cmd("LPOS")
                    .arg(key)
                    .arg(member)
                    .query_async(&mut conn)
                    .await?;
                Ok(position.is_some())
            }
            CollectionKind::SortedSet => {
                let score: Option<f64> = (*conn).zscore(key, member).await?;
                Ok(score.is_some())
            }
            CollectionKind::Set => {
                let is_member: bool = (*conn).sismember(key, member).await?;
                Ok(is_member)
            }
            CollectionKind::Missing => Ok(false),
        }
    }

    async fn batch(&self, ops: Vec<StoreOp>) -> Result<Vec<StoreReply>, BullscopeError> {
        if ops.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.connection().await?;
        let mut pipe = redis::pipe();
        for op in &ops {
            match op {
                StoreOp::HashGetField { key, field } => {
                    pipe.hget(key, field);
                }
                StoreOp::HashGetAll { key } => {
                    pipe.hgetall(key);
                }
                StoreOp::RemoveMember { key, kind, member } => match kind {
                    CollectionKind::List => {
                        pipe.lrem(key, 0, member);
                    }
                    CollectionKind::SortedSet => {
                        pipe.zrem(key, member);
                    }
                    CollectionKind::Set => {
                        pipe.srem(key, member);
                    }
                    // slot-preserving no-op so replies stay aligned
                    CollectionKind::Missing => {
                        pipe.cmd("EXISTS").arg(key);
                    }
                },
                StoreOp::DeleteKeys { keys } => {
                    pipe.del(keys.clone());
                }
            }
        }

        let values: Vec<redis::Value> = pipe.query_async(&mut conn).await?;
        if values.len() != ops.len() {
            return Err(BullscopeError::BatchShape {
                expected: ops.len(),
                got: values.len(),
            });
        }

        let mut replies = Vec::with_capacity(ops.len());
        for (op, value) in ops.iter().zip(values) {
            let reply = match op {
                StoreOp::HashGetField { .. } => {
                    StoreReply::Field(redis::from_redis_value(&value)?)
                }
                StoreOp::HashGetAll { .. } => {
                    StoreReply::Record(redis::from_redis_value(&value)?)
                }
                StoreOp::RemoveMember { .. } | StoreOp::DeleteKeys { .. } => StoreReply::Done,
            };
            replies.push(reply);
        }
        Ok(replies)
    }

    async fn server_info(&self) -> Result<HashMap<String, String>, BullscopeError> {
        let mut conn = self.connection().await?;
        let raw: String = redis::cmd("INFO").query_async(&mut conn).await?;

        let mut fields = HashMap::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((field, value)) = line.split_once(':') {
                fields.insert(field.to_string(), value.to_string());
            }
        }
        Ok(fields)
    }
}
