//! 结果归并：把各语句结果按角色装配成每个资源的连接时间线。

use chrono::{DateTime, Utc};
use connlog_storage::{QueryRole, StatementResult};
use domain::{HistoricalStates, ResourceKind, State};
use serde_json::Value;
use std::collections::HashMap;

/// 单行解码失败原因。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowDecodeError {
    #[error("row has {0} columns, expected 2")]
    TooShort(usize),
    #[error("time column is not an epoch second: {0}")]
    InvalidTime(Value),
    #[error("connected column is not a boolean: {0}")]
    InvalidConnected(Value),
    #[error("series without '{0}' tag")]
    MissingTag(ResourceKind),
}

/// 被跳过的结果行。
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub id: Option<String>,
    pub role: QueryRole,
    pub reason: RowDecodeError,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("unknown statement id: {0}")]
    UnknownStatement(usize),
}

/// 归并结果：每个资源的时间线及被跳过的行。
#[derive(Debug, Default)]
pub struct Reconciled {
    pub states: HashMap<String, HistoricalStates>,
    pub skipped: Vec<SkippedRow>,
}

/// 解码 `[time, connected]` 行，时间为 epoch 秒。
pub fn decode_row(row: &[Value]) -> Result<State, RowDecodeError> {
    let [time, connected, ..] = row else {
        return Err(RowDecodeError::TooShort(row.len()));
    };
    let seconds = time
        .as_i64()
        .or_else(|| time.as_f64().filter(|value| value.fract() == 0.0).map(|value| value as i64))
        .ok_or_else(|| RowDecodeError::InvalidTime(time.clone()))?;
    let time = DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| RowDecodeError::InvalidTime(time.clone()))?;
    let connected = connected
        .as_bool()
        .ok_or_else(|| RowDecodeError::InvalidConnected(connected.clone()))?;
    Ok(State::new(time, connected))
}

/// 按角色归并一种资源类型的语句结果。
///
/// `ids` 中的每个 ID 都会得到一个条目（无数据时为空时间线）。
/// 主体行按返回顺序追加，不重新排序；边缘只取每个资源的第一行。
/// 未提交过的语句编号是致命错误。
pub fn reconcile(
    kind: ResourceKind,
    ids: &[String],
    results: Vec<StatementResult>,
) -> Result<Reconciled, ReconcileError> {
    let mut reconciled = Reconciled {
        states: ids
            .iter()
            .map(|id| (id.clone(), HistoricalStates::default()))
            .collect(),
        skipped: Vec::new(),
    };

    for result in results {
        let role = result
            .role
            .ok_or(ReconcileError::UnknownStatement(result.statement_id))?;
        for series in result.series {
            if series.values.is_empty() {
                continue;
            }
            let Some(id) = series.tags.get(kind.as_str()).cloned() else {
                reconciled.skipped.push(SkippedRow {
                    id: None,
                    role,
                    reason: RowDecodeError::MissingTag(kind),
                });
                continue;
            };
            let entry = reconciled.states.entry(id.clone()).or_default();
            match role {
                QueryRole::Main => {
                    for row in &series.values {
                        match decode_row(row) {
                            Ok(state) => entry.states.push(state),
                            Err(reason) => reconciled.skipped.push(SkippedRow {
                                id: Some(id.clone()),
                                role,
                                reason,
                            }),
                        }
                    }
                }
                QueryRole::EdgeBefore | QueryRole::EdgeAfter => {
                    match decode_row(&series.values[0]) {
                        Ok(state) if role == QueryRole::EdgeBefore => entry.prev_state = Some(state),
                        Ok(state) => entry.next_state = Some(state),
                        Err(reason) => reconciled.skipped.push(SkippedRow {
                            id: Some(id),
                            role,
                            reason,
                        }),
                    }
                }
            }
        }
    }
    Ok(reconciled)
}

/// 合并各资源类型的结果（ID 前缀不同，不会冲突）。
pub fn merge(
    target: &mut HashMap<String, HistoricalStates>,
    source: HashMap<String, HistoricalStates>,
) {
    target.extend(source);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_accepts_integral_floats() {
        let state = decode_row(&[json!(1700000000.0), json!(true)]).expect("decode");
        assert_eq!(state.time.timestamp(), 1_700_000_000);
        assert!(state.connected);
    }

    #[test]
    fn decode_rejects_bad_columns() {
        assert_eq!(
            decode_row(&[json!(1)]),
            Err(RowDecodeError::TooShort(1))
        );
        assert_eq!(
            decode_row(&[json!("2024-01-01"), json!(true)]),
            Err(RowDecodeError::InvalidTime(json!("2024-01-01")))
        );
        assert_eq!(
            decode_row(&[json!(1.5), json!(true)]),
            Err(RowDecodeError::InvalidTime(json!(1.5)))
        );
        assert_eq!(
            decode_row(&[json!(10), json!("yes")]),
            Err(RowDecodeError::InvalidConnected(json!("yes")))
        );
    }
}
