//! 数据模型
//!
//! - LocationMembers：位置直接关联的设备与设备组

/// 位置成员（一级关联，设备组需继续展开）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationMembers {
    pub device_ids: Vec<String>,
    pub device_group_ids: Vec<String>,
}
