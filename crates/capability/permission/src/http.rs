//! 权限检索服务 HTTP 客户端。

use crate::{PermissionChecker, PermissionError};
use domain::{RequestContext, ResourceKind};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct CheckIds<'a> {
    ids: &'a [String],
    rights: &'a str,
}

#[derive(Serialize)]
struct QueryMessage<'a> {
    resource: &'a str,
    check_ids: CheckIds<'a>,
}

impl<'a> QueryMessage<'a> {
    fn check(kind: ResourceKind, ids: &'a [String], right: &'a str) -> Self {
        Self {
            resource: kind.permission_topic(),
            check_ids: CheckIds { ids, rights: right },
        }
    }
}

/// 基于 `POST {base}/v3/query` 的权限校验客户端。
///
/// 访问令牌原样放入 `Authorization` 头转发。
pub struct HttpPermissionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPermissionClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PermissionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PermissionError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl PermissionChecker for HttpPermissionClient {
    async fn check_access(
        &self,
        ctx: &RequestContext,
        kind: ResourceKind,
        ids: &[String],
        right: &str,
    ) -> Result<HashMap<String, bool>, PermissionError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let message = QueryMessage::check(kind, ids, right);
        debug!(
            target: "connlog.permission",
            request_id = %ctx.request_id,
            resource = kind.permission_topic(),
            ids = ids.len(),
            "permission_check"
        );
        let response = self
            .client
            .post(format!("{}/v3/query", self.base_url))
            .header(reqwest::header::AUTHORIZATION, ctx.token.as_str())
            .json(&message)
            .send()
            .await
            .map_err(|err| PermissionError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PermissionError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<HashMap<String, bool>>()
            .await
            .map_err(|err| PermissionError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_message_body_shape() {
        let ids = vec!["device:1".to_string(), "device:2".to_string()];
        let body = serde_json::to_value(QueryMessage::check(ResourceKind::Device, &ids, "r"))
            .expect("serialize");
        assert_eq!(
            body,
            json!({
                "resource": "deviceinstance",
                "check_ids": { "ids": ["device:1", "device:2"], "rights": "r" }
            })
        );
    }

    #[test]
    fn gateway_ids_use_gateway_topic() {
        let ids = vec!["gateway:1".to_string()];
        let body = serde_json::to_value(QueryMessage::check(ResourceKind::Gateway, &ids, "r"))
            .expect("serialize");
        assert_eq!(body["resource"], "gatewayinstance");
    }
}
