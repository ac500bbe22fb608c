//! Redis 当前在线状态读取实现

use crate::error::StorageError;
use crate::traits::CurrentStateStore;
use crate::validation::ensure_queryable;
use domain::{RequestContext, ResourceKind};
use redis::AsyncCommands;
use std::collections::HashMap;

fn online_key(kind: ResourceKind, id: &str) -> String {
    format!("connlog:{}:{}:online", kind.as_str(), id)
}

fn parse_online(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "online" => Some(true),
        "0" | "false" | "offline" => Some(false),
        _ => None,
    }
}

/// Redis 在线状态存储（gateway/device）。
///
/// 键格式 `connlog:{kind}:{id}:online`，值为 `true`/`false`。
pub struct RedisCurrentStateStore {
    client: redis::Client,
}

impl RedisCurrentStateStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    pub fn connect(redis_url: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self::new(client))
    }
}

#[async_trait::async_trait]
impl CurrentStateStore for RedisCurrentStateStore {
    async fn get_connected(
        &self,
        _ctx: &RequestContext,
        kind: ResourceKind,
        id: &str,
    ) -> Result<Option<bool>, StorageError> {
        ensure_queryable(kind)?;
        let mut connection = self.client.get_multiplexed_tokio_connection().await?;
        let value: Option<String> = connection.get(online_key(kind, id)).await?;
        Ok(value.as_deref().and_then(parse_online))
    }

    async fn list_connected(
        &self,
        _ctx: &RequestContext,
        kind: ResourceKind,
        ids: &[String],
    ) -> Result<HashMap<String, bool>, StorageError> {
        ensure_queryable(kind)?;
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut connection = self.client.get_multiplexed_tokio_connection().await?;
        let keys: Vec<String> = ids.iter().map(|id| online_key(kind, id)).collect();
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut connection)
            .await?;
        let mut result = HashMap::new();
        for (id, value) in ids.iter().zip(values) {
            if let Some(connected) = value.as_deref().and_then(parse_online) {
                result.insert(id.clone(), connected);
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn online_key_layout() {
        assert_eq!(
            online_key(ResourceKind::Gateway, "gateway:1"),
            "connlog:gateway:gateway:1:online"
        );
    }

    #[test]
    fn online_values_parse() {
        assert_eq!(parse_online("true"), Some(true));
        assert_eq!(parse_online("OFFLINE"), Some(false));
        assert_eq!(parse_online("0"), Some(false));
        assert_eq!(parse_online("maybe"), None);
    }
}
