//! 请求截止时间。

use crate::error::HistoryError;
use domain::RequestContext;
use std::future::Future;

/// 在上下文截止时间内等待外部调用，超时返回 `DeadlineExceeded`。
pub async fn within_deadline<F, T, E>(ctx: &RequestContext, call: F) -> Result<T, HistoryError>
where
    F: Future<Output = Result<T, E>>,
    HistoryError: From<E>,
{
    match ctx.deadline {
        Some(deadline) => tokio::time::timeout_at(tokio::time::Instant::from_std(deadline), call)
            .await
            .map_err(|_| HistoryError::DeadlineExceeded)?
            .map_err(HistoryError::from),
        None => call.await.map_err(HistoryError::from),
    }
}
