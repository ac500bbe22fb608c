//! 验证辅助函数
//!
//! - ensure_queryable：时序库与当前状态库只存放设备与网关

use crate::error::StorageError;
use domain::ResourceKind;

/// 验证资源类型可直接查询。
///
/// 设备组与位置必须先展开为设备 ID，不能直接落到存储层。
pub fn ensure_queryable(kind: ResourceKind) -> Result<(), StorageError> {
    if !kind.is_queryable() {
        return Err(StorageError::new(format!("invalid kind '{kind}'")));
    }
    Ok(())
}
