//! InfluxDB 1.x HTTP 时序查询实现

use crate::error::StorageError;
use crate::series::{ResultSeries, StateQuery, StateSeriesExecutor, StatementResult};
use domain::RequestContext;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// InfluxDB 连接参数。
#[derive(Debug, Clone)]
pub struct InfluxConfig {
    pub url: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

/// InfluxDB 时序查询执行器
///
/// 多个片段以 `;` 拼接后在一次 `/query` 请求中提交，时间戳按秒返回（`epoch=s`）。
pub struct InfluxStateSeries {
    client: reqwest::Client,
    config: InfluxConfig,
}

impl InfluxStateSeries {
    pub fn connect(config: InfluxConfig) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[derive(Debug, Default, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<RawStatement>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStatement {
    #[serde(default)]
    statement_id: usize,
    #[serde(default)]
    series: Vec<RawSeries>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSeries {
    #[serde(default)]
    tags: HashMap<String, String>,
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[async_trait::async_trait]
impl StateSeriesExecutor for InfluxStateSeries {
    async fn execute(
        &self,
        ctx: &RequestContext,
        queries: &[StateQuery],
    ) -> Result<Vec<StatementResult>, StorageError> {
        if queries.is_empty() {
            return Ok(Vec::new());
        }
        let statement: String = queries.iter().map(|query| query.text.as_str()).collect();
        debug!(
            target: "connlog.storage",
            request_id = %ctx.request_id,
            statements = queries.len(),
            query = %statement,
            "influx_query"
        );
        let mut request = self
            .client
            .post(format!("{}/query", self.config.url.trim_end_matches('/')))
            .form(&[
                ("db", self.config.database.as_str()),
                ("q", statement.as_str()),
                ("epoch", "s"),
            ]);
        if let Some(username) = &self.config.username {
            request = request.basic_auth(username, self.config.password.as_deref());
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() && body.trim().is_empty() {
            return Err(StorageError::new(format!("influxdb responded {status}")));
        }
        parse_query_response(&body, queries)
    }
}

/// 解析 `/query` 响应体，并按语句编号为结果附上片段角色。
pub fn parse_query_response(
    body: &str,
    queries: &[StateQuery],
) -> Result<Vec<StatementResult>, StorageError> {
    let response: QueryResponse = serde_json::from_str(body)?;
    if let Some(error) = response.error {
        return Err(StorageError::new(error));
    }
    if response.results.is_empty() {
        return Err(StorageError::new("no results"));
    }
    response
        .results
        .into_iter()
        .map(|statement| {
            if let Some(error) = statement.error {
                return Err(StorageError::new(error));
            }
            Ok(StatementResult {
                statement_id: statement.statement_id,
                role: queries.get(statement.statement_id).map(|query| query.role),
                series: statement
                    .series
                    .into_iter()
                    .map(|series| ResultSeries {
                        tags: series.tags,
                        columns: series.columns,
                        values: series.values,
                    })
                    .collect(),
            })
        })
        .collect()
}
