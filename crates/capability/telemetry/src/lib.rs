//! 追踪、请求 ID 生成与进程级计数指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 计数指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub historical_queries: u64,
    pub current_queries: u64,
    pub store_statements: u64,
    pub store_failures: u64,
    pub rows_skipped: u64,
    pub ids_denied: u64,
    pub ids_blacklisted: u64,
}

/// 进程级计数指标。
pub struct TelemetryMetrics {
    historical_queries: AtomicU64,
    current_queries: AtomicU64,
    store_statements: AtomicU64,
    store_failures: AtomicU64,
    rows_skipped: AtomicU64,
    ids_denied: AtomicU64,
    ids_blacklisted: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            historical_queries: AtomicU64::new(0),
            current_queries: AtomicU64::new(0),
            store_statements: AtomicU64::new(0),
            store_failures: AtomicU64::new(0),
            rows_skipped: AtomicU64::new(0),
            ids_denied: AtomicU64::new(0),
            ids_blacklisted: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            historical_queries: self.historical_queries.load(Ordering::Relaxed),
            current_queries: self.current_queries.load(Ordering::Relaxed),
            store_statements: self.store_statements.load(Ordering::Relaxed),
            store_failures: self.store_failures.load(Ordering::Relaxed),
            rows_skipped: self.rows_skipped.load(Ordering::Relaxed),
            ids_denied: self.ids_denied.load(Ordering::Relaxed),
            ids_blacklisted: self.ids_blacklisted.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录历史状态查询次数。
pub fn record_historical_query() {
    metrics().historical_queries.fetch_add(1, Ordering::Relaxed);
}

/// 记录当前状态查询次数。
pub fn record_current_query() {
    metrics().current_queries.fetch_add(1, Ordering::Relaxed);
}

/// 记录提交给时序库的语句数。
pub fn record_store_statements(count: u64) {
    metrics().store_statements.fetch_add(count, Ordering::Relaxed);
}

/// 记录外部存储调用失败次数。
pub fn record_store_failure() {
    metrics().store_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录解码失败被跳过的结果行。
pub fn record_rows_skipped(count: u64) {
    metrics().rows_skipped.fetch_add(count, Ordering::Relaxed);
}

/// 记录权限校验未通过的 ID 数。
pub fn record_ids_denied(count: u64) {
    metrics().ids_denied.fetch_add(count, Ordering::Relaxed);
}

/// 记录被属性黑名单排除的设备数。
pub fn record_ids_blacklisted(count: u64) {
    metrics().ids_blacklisted.fetch_add(count, Ordering::Relaxed);
}
