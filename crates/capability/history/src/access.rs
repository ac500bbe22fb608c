//! 访问过滤：解析 ID → 权限过滤（失败即拒绝）→ 展开 → 属性黑名单 → 按类型分组。

use crate::deadline::within_deadline;
use crate::error::HistoryError;
use connlog_permission::{PermissionChecker, READ_RIGHT, filter_permitted};
use connlog_resolver::{IdentifierResolver, group_by_kind};
use connlog_storage::DeviceDirectory;
use domain::{AttributeFilter, RequestContext, ResourceId, ResourceKind};
use std::sync::Arc;

/// 历史与当前状态查询共用的访问过滤链。
#[derive(Clone)]
pub struct AccessFilter {
    permissions: Arc<dyn PermissionChecker>,
    resolver: Arc<IdentifierResolver>,
    blacklist: Arc<Vec<AttributeFilter>>,
}

impl AccessFilter {
    pub fn new(
        permissions: Arc<dyn PermissionChecker>,
        directory: Arc<dyn DeviceDirectory>,
        blacklist: Vec<AttributeFilter>,
    ) -> Self {
        Self {
            permissions,
            resolver: Arc::new(IdentifierResolver::new(directory)),
            blacklist: Arc::new(blacklist),
        }
    }

    /// 只保留显式授权读取的 ID。
    pub async fn permitted(
        &self,
        ctx: &RequestContext,
        ids: Vec<ResourceId>,
    ) -> Result<Vec<ResourceId>, HistoryError> {
        within_deadline(
            ctx,
            filter_permitted(self.permissions.as_ref(), ctx, ids, READ_RIGHT),
        )
        .await
    }

    /// 把已授权 ID 展开、过滤后按资源类型分组，类型按固定顺序排列。
    pub async fn leaves(
        &self,
        ctx: &RequestContext,
        ids: Vec<ResourceId>,
    ) -> Result<Vec<(ResourceKind, Vec<String>)>, HistoryError> {
        let expanded = within_deadline(ctx, self.resolver.expand(ctx, ids)).await?;
        let filtered = within_deadline(
            ctx,
            self.resolver
                .filter_by_attribute_blacklist(ctx, expanded, &self.blacklist),
        )
        .await?;
        let mut groups: Vec<(ResourceKind, Vec<String>)> = group_by_kind(filtered)
            .into_iter()
            .filter(|(kind, _)| kind.is_queryable())
            .collect();
        groups.sort_by_key(|(kind, _)| *kind);
        Ok(groups)
    }

    /// 权限过滤后继续展开。
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        ids: Vec<ResourceId>,
    ) -> Result<Vec<(ResourceKind, Vec<String>)>, HistoryError> {
        let permitted = self.permitted(ctx, ids).await?;
        if permitted.is_empty() {
            return Ok(Vec::new());
        }
        self.leaves(ctx, permitted).await
    }
}

/// 解析请求中的全部 ID，任一无法识别即失败。
pub fn parse_ids(raw: &[String]) -> Result<Vec<ResourceId>, HistoryError> {
    raw.iter()
        .map(|id| ResourceId::parse(id.as_str()).map_err(HistoryError::from))
        .collect()
}

/// 解析单资源接口的 ID，并校验其类型与路径一致。
pub fn parse_single(kind: ResourceKind, raw: &str) -> Result<ResourceId, HistoryError> {
    let id = ResourceId::parse(raw)?;
    if id.kind() != kind {
        return Err(HistoryError::UnsupportedIdentifierKind(
            domain::IdentifierError::UnsupportedKind(format!("{raw} is not a {kind} id")),
        ));
    }
    Ok(id)
}
