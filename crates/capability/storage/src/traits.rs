//! 存储接口 Trait 定义
//!
//! 定义外部协作方的异步接口：
//! - CurrentStateStore：当前在线状态快照
//! - DeviceDirectory：设备目录（设备组成员、位置成员、设备属性）
//!
//! 时序查询接口见 [`crate::series::StateSeriesExecutor`]。
//!
//! 设计原则：
//! - 所有接口显式接收 RequestContext
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::LocationMembers;
use async_trait::async_trait;
use domain::{DeviceAttribute, RequestContext, ResourceKind};
use std::collections::HashMap;

/// 当前状态存储接口
///
/// 按资源类型读取在线状态快照，只支持设备与网关。
#[async_trait]
pub trait CurrentStateStore: Send + Sync {
    /// 读取单个资源的在线状态
    async fn get_connected(
        &self,
        ctx: &RequestContext,
        kind: ResourceKind,
        id: &str,
    ) -> Result<Option<bool>, StorageError>;

    /// 批量读取在线状态，无快照的 ID 不出现在结果中
    async fn list_connected(
        &self,
        ctx: &RequestContext,
        kind: ResourceKind,
        ids: &[String],
    ) -> Result<HashMap<String, bool>, StorageError>;
}

/// 设备目录接口
///
/// 提供标识符展开所需的关联关系与设备属性。
#[async_trait]
pub trait DeviceDirectory: Send + Sync {
    /// 列出设备组的成员设备
    async fn list_group_devices(
        &self,
        ctx: &RequestContext,
        device_group_id: &str,
    ) -> Result<Vec<String>, StorageError>;

    /// 查找位置直接关联的设备与设备组
    async fn find_location_members(
        &self,
        ctx: &RequestContext,
        location_id: &str,
    ) -> Result<LocationMembers, StorageError>;

    /// 批量读取设备属性，无属性的设备不出现在结果中
    async fn list_device_attributes(
        &self,
        ctx: &RequestContext,
        device_ids: &[String],
    ) -> Result<HashMap<String, Vec<DeviceAttribute>>, StorageError>;
}
