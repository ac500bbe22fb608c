//! 历史/当前状态查询错误。

use crate::reconcile::ReconcileError;
use connlog_permission::PermissionError;
use connlog_resolver::ResolverError;
use connlog_storage::StorageError;
use domain::{IdentifierError, WindowSpecError};

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("invalid window: {0}")]
    InvalidWindowSpec(#[from] WindowSpecError),
    #[error(transparent)]
    UnsupportedIdentifierKind(#[from] IdentifierError),
    #[error("permission check failed: {0}")]
    PermissionService(#[from] PermissionError),
    #[error("identifier resolution failed: {0}")]
    Resolver(#[from] ResolverError),
    #[error("store query failed: {0}")]
    StoreQuery(#[from] StorageError),
    #[error("reconciliation failed: {0}")]
    Reconciliation(#[from] ReconcileError),
    #[error("deadline exceeded")]
    DeadlineExceeded,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
}

impl HistoryError {
    /// 由调用方输入导致的错误。
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            HistoryError::InvalidWindowSpec(_) | HistoryError::UnsupportedIdentifierKind(_)
        )
    }
}
