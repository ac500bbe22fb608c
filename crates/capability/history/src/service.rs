//! 历史连接状态查询服务。

use crate::access::{AccessFilter, parse_ids, parse_single};
use crate::clock::{Clock, RenderZone, SystemClock};
use crate::deadline::within_deadline;
use crate::error::HistoryError;
use crate::planner::{PlanError, plan};
use crate::reconcile::{merge, reconcile};
use crate::window::{WindowCase, classify};
use chrono::FixedOffset;
use connlog_storage::StateSeriesExecutor;
use domain::{HistoricalStates, IdentifierError, RequestContext, ResourceKind, WindowSpec};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 历史状态查询服务（权限过滤 → 展开 → 分类 → 规划 → 执行 → 归并）。
pub struct HistoryService {
    series: Arc<dyn StateSeriesExecutor>,
    access: AccessFilter,
    clock: Arc<dyn Clock>,
    zone: RenderZone,
}

impl HistoryService {
    pub fn new(series: Arc<dyn StateSeriesExecutor>, access: AccessFilter) -> Self {
        Self {
            series,
            access,
            clock: Arc::new(SystemClock),
            zone: RenderZone::utc(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 查询语句中时间戳的渲染时区。
    pub fn with_zone(mut self, zone: RenderZone) -> Self {
        self.zone = zone;
        self
    }

    /// 以固定偏移渲染时间戳。
    pub fn with_offset(self, offset: FixedOffset) -> Self {
        self.with_zone(RenderZone::Fixed(offset))
    }

    /// 批量查询，返回 ID → 时间线。
    ///
    /// 无权限或被黑名单排除的 ID 不出现在结果中；其余每个 ID 都有条目。
    pub async fn query_map(
        &self,
        ctx: &RequestContext,
        ids: &[String],
        spec: &WindowSpec,
    ) -> Result<HashMap<String, HistoricalStates>, HistoryError> {
        connlog_telemetry::record_historical_query();
        let ids = parse_ids(ids)?;
        let case = classify(spec, self.clock.now())?;
        let groups = self.access.resolve(ctx, ids).await?;
        self.fetch(ctx, &case, groups).await
    }

    /// 批量查询，结果按 ID 排序。
    pub async fn query_list(
        &self,
        ctx: &RequestContext,
        ids: &[String],
        spec: &WindowSpec,
    ) -> Result<Vec<(String, HistoricalStates)>, HistoryError> {
        let mut list: Vec<_> = self.query_map(ctx, ids, spec).await?.into_iter().collect();
        list.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(list)
    }

    /// 单资源查询：类型不符、无权限、不存在分别返回对应错误。
    pub async fn get_single(
        &self,
        ctx: &RequestContext,
        kind: ResourceKind,
        id: &str,
        spec: &WindowSpec,
    ) -> Result<HistoricalStates, HistoryError> {
        connlog_telemetry::record_historical_query();
        let id = parse_single(kind, id)?;
        let case = classify(spec, self.clock.now())?;
        let permitted = self.access.permitted(ctx, vec![id.clone()]).await?;
        if permitted.is_empty() {
            return Err(HistoryError::AccessDenied(id.into_string()));
        }
        let groups = self.access.leaves(ctx, permitted).await?;
        let mut states = self.fetch(ctx, &case, groups).await?;
        states
            .remove(id.as_str())
            .ok_or_else(|| HistoryError::NotFound(id.into_string()))
    }

    async fn fetch(
        &self,
        ctx: &RequestContext,
        case: &WindowCase,
        groups: Vec<(ResourceKind, Vec<String>)>,
    ) -> Result<HashMap<String, HistoricalStates>, HistoryError> {
        let offset = self.zone.offset_at(self.clock.now());
        let mut merged = HashMap::new();
        for (kind, ids) in groups {
            let queries = match plan(case, kind, &ids, offset) {
                Ok(queries) => queries,
                Err(PlanError::EmptyIdSet) => continue,
                Err(PlanError::UnqueryableKind(kind)) => {
                    return Err(IdentifierError::UnsupportedKind(kind.to_string()).into());
                }
            };
            debug!(
                target: "connlog.history",
                request_id = %ctx.request_id,
                kind = %kind,
                case = case.ordinal(),
                ids = ids.len(),
                statements = queries.len(),
                "history_query_planned"
            );

            connlog_telemetry::record_store_statements(queries.len() as u64);
            let results = match within_deadline(ctx, self.series.execute(ctx, &queries)).await {
                Ok(results) => results,
                Err(err) => {
                    if matches!(err, HistoryError::StoreQuery(_)) {
                        connlog_telemetry::record_store_failure();
                    }
                    warn!(
                        target: "connlog.history",
                        request_id = %ctx.request_id,
                        kind = %kind,
                        error = %err,
                        "history_query_failed"
                    );
                    return Err(err);
                }
            };

            let reconciled = reconcile(kind, &ids, results)?;
            if !reconciled.skipped.is_empty() {
                connlog_telemetry::record_rows_skipped(reconciled.skipped.len() as u64);
                for skipped in &reconciled.skipped {
                    warn!(
                        target: "connlog.history",
                        request_id = %ctx.request_id,
                        id = skipped.id.as_deref().unwrap_or("-"),
                        role = %skipped.role,
                        reason = %skipped.reason,
                        "row_skipped"
                    );
                }
            }
            merge(&mut merged, reconciled.states);
        }
        info!(
            target: "connlog.history",
            request_id = %ctx.request_id,
            case = case.ordinal(),
            resources = merged.len(),
            "history_query_completed"
        );
        Ok(merged)
    }
}
