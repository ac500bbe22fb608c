//! 当前连接状态查询服务。

use crate::access::{AccessFilter, parse_ids, parse_single};
use crate::deadline::within_deadline;
use crate::error::HistoryError;
use connlog_storage::CurrentStateStore;
use domain::{RequestContext, ResourceKind};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// 当前在线状态查询：与历史查询共用访问过滤链，按类型批量读取快照。
pub struct CurrentStateService {
    store: Arc<dyn CurrentStateStore>,
    access: AccessFilter,
}

impl CurrentStateService {
    pub fn new(store: Arc<dyn CurrentStateStore>, access: AccessFilter) -> Self {
        Self { store, access }
    }

    /// 批量查询；无快照的 ID 不出现在结果中。
    pub async fn query_map(
        &self,
        ctx: &RequestContext,
        ids: &[String],
    ) -> Result<HashMap<String, bool>, HistoryError> {
        connlog_telemetry::record_current_query();
        let ids = parse_ids(ids)?;
        let groups = self.access.resolve(ctx, ids).await?;
        self.fetch(ctx, groups).await
    }

    /// 批量查询，结果按 ID 排序。
    pub async fn query_list(
        &self,
        ctx: &RequestContext,
        ids: &[String],
    ) -> Result<Vec<(String, bool)>, HistoryError> {
        let mut list: Vec<_> = self.query_map(ctx, ids).await?.into_iter().collect();
        list.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(list)
    }

    pub async fn get_single(
        &self,
        ctx: &RequestContext,
        kind: ResourceKind,
        id: &str,
    ) -> Result<bool, HistoryError> {
        connlog_telemetry::record_current_query();
        let id = parse_single(kind, id)?;
        let permitted = self.access.permitted(ctx, vec![id.clone()]).await?;
        if permitted.is_empty() {
            return Err(HistoryError::AccessDenied(id.into_string()));
        }
        let groups = self.access.leaves(ctx, permitted).await?;
        let retained = groups
            .iter()
            .any(|(_, leaves)| leaves.iter().any(|leaf| leaf == id.as_str()));
        if !retained {
            return Err(HistoryError::NotFound(id.into_string()));
        }
        let connected = within_deadline(ctx, self.store.get_connected(ctx, kind, id.as_str()))
            .await
            .inspect_err(record_store_failure)?;
        connected.ok_or_else(|| HistoryError::NotFound(id.into_string()))
    }

    async fn fetch(
        &self,
        ctx: &RequestContext,
        groups: Vec<(ResourceKind, Vec<String>)>,
    ) -> Result<HashMap<String, bool>, HistoryError> {
        let mut merged = HashMap::new();
        for (kind, ids) in groups {
            let states = within_deadline(ctx, self.store.list_connected(ctx, kind, &ids))
                .await
                .inspect_err(record_store_failure)?;
            merged.extend(states);
        }
        info!(
            target: "connlog.history",
            request_id = %ctx.request_id,
            resources = merged.len(),
            "current_query_completed"
        );
        Ok(merged)
    }
}

fn record_store_failure(err: &HistoryError) {
    if matches!(err, HistoryError::StoreQuery(_)) {
        connlog_telemetry::record_store_failure();
    }
}
