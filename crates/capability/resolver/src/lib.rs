//! 标识符展开能力：设备组/位置展开为设备，按属性黑名单过滤设备。

use connlog_storage::{DeviceDirectory, StorageError};
use domain::{AttributeFilter, DeviceAttribute, RequestContext, ResourceId, ResourceKind};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{info, warn};

/// 标识符展开相关错误。
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("device directory failed: {0}")]
    Directory(#[from] StorageError),
}

/// 标识符展开服务（基于 DeviceDirectory）。
pub struct IdentifierResolver {
    directory: Arc<dyn DeviceDirectory>,
}

impl IdentifierResolver {
    pub fn new(directory: Arc<dyn DeviceDirectory>) -> Self {
        Self { directory }
    }

    /// 展开为可直接查询的叶子 ID。
    ///
    /// 设备组展开一层，位置展开为直接关联设备加关联设备组的成员，
    /// 设备与网关原样保留。输出可能包含重复 ID。
    pub async fn expand(
        &self,
        ctx: &RequestContext,
        ids: Vec<ResourceId>,
    ) -> Result<Vec<ResourceId>, ResolverError> {
        let mut leaves = Vec::with_capacity(ids.len());
        for id in ids {
            match id.kind() {
                ResourceKind::Device | ResourceKind::Gateway => leaves.push(id),
                ResourceKind::DeviceGroup => {
                    let members = self.directory.list_group_devices(ctx, id.as_str()).await?;
                    push_devices(ctx, &mut leaves, members);
                }
                ResourceKind::Location => {
                    let members = self
                        .directory
                        .find_location_members(ctx, id.as_str())
                        .await?;
                    push_devices(ctx, &mut leaves, members.device_ids);
                    for group_id in members.device_group_ids {
                        let devices = self.directory.list_group_devices(ctx, &group_id).await?;
                        push_devices(ctx, &mut leaves, devices);
                    }
                }
            }
        }
        Ok(leaves)
    }

    /// 排除任一属性命中黑名单条目的设备。
    ///
    /// 黑名单为空时原样返回；非设备 ID 总是保留。
    pub async fn filter_by_attribute_blacklist(
        &self,
        ctx: &RequestContext,
        ids: Vec<ResourceId>,
        blacklist: &[AttributeFilter],
    ) -> Result<Vec<ResourceId>, ResolverError> {
        if blacklist.is_empty() {
            return Ok(ids);
        }
        let device_ids: Vec<String> = ids
            .iter()
            .filter(|id| id.kind() == ResourceKind::Device)
            .map(|id| id.as_str().to_string())
            .collect();
        if device_ids.is_empty() {
            return Ok(ids);
        }
        let attributes = self
            .directory
            .list_device_attributes(ctx, &device_ids)
            .await?;

        let total = ids.len();
        let kept: Vec<ResourceId> = ids
            .into_iter()
            .filter(|id| {
                id.kind() != ResourceKind::Device
                    || !attributes
                        .get(id.as_str())
                        .is_some_and(|attributes| is_blacklisted(attributes, blacklist))
            })
            .collect();

        let excluded = total - kept.len();
        if excluded > 0 {
            connlog_telemetry::record_ids_blacklisted(excluded as u64);
            info!(
                target: "connlog.resolver",
                request_id = %ctx.request_id,
                excluded,
                "devices_blacklisted"
            );
        }
        Ok(kept)
    }
}

/// 条目之间为 OR 关系，条目内字段为 AND 关系。
pub fn is_blacklisted(attributes: &[DeviceAttribute], blacklist: &[AttributeFilter]) -> bool {
    blacklist
        .iter()
        .any(|entry| attributes.iter().any(|attribute| entry.matches(attribute)))
}

fn push_devices(ctx: &RequestContext, leaves: &mut Vec<ResourceId>, members: Vec<String>) {
    for member in members {
        match ResourceId::parse(member) {
            Ok(id) if id.kind() == ResourceKind::Device => leaves.push(id),
            Ok(id) => warn!(
                target: "connlog.resolver",
                request_id = %ctx.request_id,
                member = %id,
                "member_not_a_device"
            ),
            Err(err) => warn!(
                target: "connlog.resolver",
                request_id = %ctx.request_id,
                error = %err,
                "member_unclassified"
            ),
        }
    }
}

/// 按资源类型分组，组内保持输入顺序并去重。
pub fn group_by_kind(ids: Vec<ResourceId>) -> HashMap<ResourceKind, Vec<String>> {
    let mut groups: HashMap<ResourceKind, Vec<String>> = HashMap::new();
    let mut seen = HashSet::new();
    for id in ids {
        if seen.insert(id.clone()) {
            groups.entry(id.kind()).or_default().push(id.into_string());
        }
    }
    groups
}
