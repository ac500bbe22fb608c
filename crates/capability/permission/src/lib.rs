//! 权限校验能力：外部权限服务客户端与失败即拒绝的 ID 过滤。

mod http;
mod fixed;

use async_trait::async_trait;
use domain::{RequestContext, ResourceId, ResourceKind};
use std::collections::HashMap;
use tracing::info;

pub use fixed::StaticPermissionChecker;
pub use http::HttpPermissionClient;

/// 读取权限。
pub const READ_RIGHT: &str = "r";

/// 权限校验相关错误。
#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    #[error("permission service unreachable: {0}")]
    Transport(String),
    #[error("permission service rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("permission response invalid: {0}")]
    Decode(String),
}

/// 权限校验接口
///
/// 按资源类型批量校验；结果中未出现或映射为 `false` 的 ID 均视为无权限。
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    async fn check_access(
        &self,
        ctx: &RequestContext,
        kind: ResourceKind,
        ids: &[String],
        right: &str,
    ) -> Result<HashMap<String, bool>, PermissionError>;
}

/// 过滤出有权限的 ID，保持输入顺序。
///
/// 按资源类型分组校验；只有显式映射为 `true` 的 ID 被保留。
pub async fn filter_permitted(
    checker: &dyn PermissionChecker,
    ctx: &RequestContext,
    ids: Vec<ResourceId>,
    right: &str,
) -> Result<Vec<ResourceId>, PermissionError> {
    let mut by_kind: Vec<(ResourceKind, Vec<String>)> = Vec::new();
    for id in &ids {
        match by_kind.iter_mut().find(|(kind, _)| *kind == id.kind()) {
            Some((_, group)) => group.push(id.as_str().to_string()),
            None => by_kind.push((id.kind(), vec![id.as_str().to_string()])),
        }
    }

    let mut allowed: HashMap<ResourceKind, HashMap<String, bool>> = HashMap::new();
    for (kind, group) in by_kind {
        let result = checker.check_access(ctx, kind, &group, right).await?;
        allowed.insert(kind, result);
    }

    let total = ids.len();
    let permitted: Vec<ResourceId> = ids
        .into_iter()
        .filter(|id| {
            allowed
                .get(&id.kind())
                .and_then(|result| result.get(id.as_str()))
                .copied()
                .unwrap_or(false)
        })
        .collect();

    let denied = total - permitted.len();
    if denied > 0 {
        connlog_telemetry::record_ids_denied(denied as u64);
        info!(
            target: "connlog.permission",
            request_id = %ctx.request_id,
            denied,
            "ids_denied"
        );
    }
    Ok(permitted)
}
