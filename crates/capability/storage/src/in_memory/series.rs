//! 时序查询执行器内存实现。
//!
//! 按片段的结构化条件（而非查询语句文本）筛选状态，
//! 返回形状与时序库一致：按资源分组、列为 `time`/`connected`、时间为秒。

use crate::error::StorageError;
use crate::series::{QueryBounds, ResultSeries, StateQuery, StateSeriesExecutor, StatementResult};
use domain::{RequestContext, ResourceKind, State};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

type SeriesKey = (ResourceKind, String);

pub struct InMemoryStateSeries {
    states: RwLock<HashMap<SeriesKey, Vec<State>>>,
    raw_rows: RwLock<HashMap<SeriesKey, Vec<Vec<Value>>>>,
    failure: RwLock<Option<String>>,
    executions: AtomicU64,
    statements: AtomicU64,
}

impl InMemoryStateSeries {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
            raw_rows: RwLock::new(HashMap::new()),
            failure: RwLock::new(None),
            executions: AtomicU64::new(0),
            statements: AtomicU64::new(0),
        }
    }

    /// 写入一条状态，同一资源内按时间保持升序。
    pub fn record(
        &self,
        kind: ResourceKind,
        id: impl Into<String>,
        state: State,
    ) -> Result<(), StorageError> {
        let mut map = self
            .states
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let series = map.entry((kind, id.into())).or_default();
        let position = series.partition_point(|item| item.time <= state.time);
        series.insert(position, state);
        Ok(())
    }

    /// 追加一行原样返回的数据（附加在窗口主体结果之后），用于模拟脏数据。
    pub fn record_raw_row(
        &self,
        kind: ResourceKind,
        id: impl Into<String>,
        row: Vec<Value>,
    ) -> Result<(), StorageError> {
        let mut map = self
            .raw_rows
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        map.entry((kind, id.into())).or_default().push(row);
        Ok(())
    }

    /// 之后的每次执行都返回该错误。
    pub fn fail_with(&self, message: impl Into<String>) -> Result<(), StorageError> {
        let mut failure = self
            .failure
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        *failure = Some(message.into());
        Ok(())
    }

    /// 已执行的请求次数（一次请求可包含多条语句）。
    pub fn executions(&self) -> u64 {
        self.executions.load(Ordering::Relaxed)
    }

    /// 已执行的语句总数。
    pub fn statements(&self) -> u64 {
        self.statements.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryStateSeries {
    fn default() -> Self {
        Self::new()
    }
}

fn select(states: &[State], bounds: &QueryBounds) -> Vec<State> {
    match bounds {
        QueryBounds::Range { lower, upper } => states
            .iter()
            .filter(|state| lower.is_none_or(|lower| state.time >= lower))
            .filter(|state| upper.is_none_or(|upper| state.time <= upper))
            .cloned()
            .collect(),
        QueryBounds::LastBefore(edge) => states
            .iter()
            .rev()
            .find(|state| state.time < *edge)
            .cloned()
            .into_iter()
            .collect(),
        QueryBounds::FirstAfter(edge) => states
            .iter()
            .find(|state| state.time > *edge)
            .cloned()
            .into_iter()
            .collect(),
    }
}

fn to_row(state: &State) -> Vec<Value> {
    vec![json!(state.time.timestamp()), json!(state.connected)]
}

#[async_trait::async_trait]
impl StateSeriesExecutor for InMemoryStateSeries {
    async fn execute(
        &self,
        _ctx: &RequestContext,
        queries: &[StateQuery],
    ) -> Result<Vec<StatementResult>, StorageError> {
        self.executions.fetch_add(1, Ordering::Relaxed);
        self.statements
            .fetch_add(queries.len() as u64, Ordering::Relaxed);
        if let Some(message) = self
            .failure
            .read()
            .map_err(|_| StorageError::new("lock failed"))?
            .clone()
        {
            return Err(StorageError::new(message));
        }

        let states = self
            .states
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let raw_rows = self
            .raw_rows
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;

        let mut results = Vec::with_capacity(queries.len());
        for (statement_id, query) in queries.iter().enumerate() {
            let mut series = Vec::new();
            for id in &query.ids {
                let key = (query.kind, id.clone());
                let mut values: Vec<Vec<Value>> = states
                    .get(&key)
                    .map(|items| select(items, &query.bounds).iter().map(to_row).collect())
                    .unwrap_or_default();
                if matches!(query.bounds, QueryBounds::Range { .. })
                    && let Some(extra) = raw_rows.get(&key)
                {
                    values.extend(extra.iter().cloned());
                }
                if values.is_empty() {
                    continue;
                }
                series.push(ResultSeries {
                    tags: HashMap::from([(query.kind.as_str().to_string(), id.clone())]),
                    columns: vec!["time".to_string(), "connected".to_string()],
                    values,
                });
            }
            results.push(StatementResult {
                statement_id,
                role: Some(query.role),
                series,
            });
        }
        Ok(results)
    }
}
