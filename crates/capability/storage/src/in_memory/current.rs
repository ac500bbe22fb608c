//! 当前在线状态内存实现（用于测试与占位）。

use crate::error::StorageError;
use crate::traits::CurrentStateStore;
use crate::validation::ensure_queryable;
use domain::{RequestContext, ResourceKind};
use std::collections::HashMap;
use std::sync::RwLock;

pub struct InMemoryCurrentStateStore {
    entries: RwLock<HashMap<(ResourceKind, String), bool>>,
}

impl InMemoryCurrentStateStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn set(
        &self,
        kind: ResourceKind,
        id: impl Into<String>,
        connected: bool,
    ) -> Result<(), StorageError> {
        ensure_queryable(kind)?;
        let mut map = self
            .entries
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        map.insert((kind, id.into()), connected);
        Ok(())
    }
}

impl Default for InMemoryCurrentStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CurrentStateStore for InMemoryCurrentStateStore {
    async fn get_connected(
        &self,
        _ctx: &RequestContext,
        kind: ResourceKind,
        id: &str,
    ) -> Result<Option<bool>, StorageError> {
        ensure_queryable(kind)?;
        let map = self
            .entries
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(map.get(&(kind, id.to_string())).copied())
    }

    async fn list_connected(
        &self,
        _ctx: &RequestContext,
        kind: ResourceKind,
        ids: &[String],
    ) -> Result<HashMap<String, bool>, StorageError> {
        ensure_queryable(kind)?;
        let map = self
            .entries
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut result = HashMap::new();
        for id in ids {
            if let Some(connected) = map.get(&(kind, id.clone())) {
                result.insert(id.clone(), *connected);
            }
        }
        Ok(result)
    }
}
