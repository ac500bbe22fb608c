//! 连接状态查询服务入口。

use connlog_api::{AppState, create_app};
use connlog_config::AppConfig;
use connlog_history::{AccessFilter, CurrentStateService, HistoryService, RenderZone};
use connlog_permission::HttpPermissionClient;
use connlog_storage::{
    InfluxConfig, InfluxStateSeries, PgDeviceDirectory, RedisCurrentStateStore,
};
use connlog_telemetry::init_tracing;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    // InfluxDB 连接状态时序
    let series = Arc::new(InfluxStateSeries::connect(InfluxConfig {
        url: config.influx_url.clone(),
        database: config.influx_db.clone(),
        username: config.influx_user.clone(),
        password: config.influx_password.clone(),
        timeout: config.influx_timeout,
    })?);
    // Postgres 设备目录（设备组、位置、设备属性）
    let directory = Arc::new(PgDeviceDirectory::connect(&config.database_url).await?);
    // Redis 当前在线状态
    let current_store = Arc::new(RedisCurrentStateStore::connect(&config.redis_url)?);
    let permissions = Arc::new(HttpPermissionClient::new(
        config.permissions_url.clone(),
        config.influx_timeout,
    )?);

    let access = AccessFilter::new(
        permissions,
        directory,
        config.device_attribute_blacklist.clone(),
    );
    let zone = if config.influx_use_utc {
        RenderZone::utc()
    } else {
        RenderZone::Local
    };
    let history = Arc::new(HistoryService::new(series, access.clone()).with_zone(zone));
    let current = Arc::new(CurrentStateService::new(current_store, access));

    let state = AppState {
        history,
        current,
        request_timeout: config.request_timeout,
    };
    let app = create_app(state);

    info!(addr = %config.http_addr, "connlog_api_listening");
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
