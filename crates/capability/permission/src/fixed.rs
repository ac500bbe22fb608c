//! 静态权限表（用于测试与本地运行）。

use crate::{PermissionChecker, PermissionError};
use domain::{RequestContext, ResourceKind};
use std::collections::{HashMap, HashSet};

/// 只对显式授权的 ID 返回 `true`，其余 ID 不出现在结果中。
#[derive(Default)]
pub struct StaticPermissionChecker {
    allowed: HashSet<String>,
    denied: HashSet<String>,
    allow_all: bool,
    failure: Option<String>,
}

impl StaticPermissionChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_all() -> Self {
        Self {
            allow_all: true,
            ..Self::default()
        }
    }

    pub fn allow(mut self, id: impl Into<String>) -> Self {
        self.allowed.insert(id.into());
        self
    }

    /// 显式返回 `false`（与未出现在结果中等价）。
    pub fn deny(mut self, id: impl Into<String>) -> Self {
        self.denied.insert(id.into());
        self
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
impl PermissionChecker for StaticPermissionChecker {
    async fn check_access(
        &self,
        _ctx: &RequestContext,
        _kind: ResourceKind,
        ids: &[String],
        _right: &str,
    ) -> Result<HashMap<String, bool>, PermissionError> {
        if let Some(message) = &self.failure {
            return Err(PermissionError::Transport(message.clone()));
        }
        let mut result = HashMap::new();
        for id in ids {
            if self.denied.contains(id) {
                result.insert(id.clone(), false);
            } else if self.allow_all || self.allowed.contains(id) {
                result.insert(id.clone(), true);
            }
        }
        Ok(result)
    }
}
