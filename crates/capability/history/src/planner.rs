//! 查询规划：由窗口情形生成带角色的 InfluxQL 查询片段。
//!
//! 片段顺序固定为 前沿 → 主体 → 后沿，缺失的角色直接省略。
//! 度量名与标签键均为资源类型名（`device` / `gateway`）。

use crate::window::WindowCase;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use connlog_storage::{QueryBounds, QueryRole, StateQuery};
use domain::ResourceKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("empty id set")]
    EmptyIdSet,
    #[error("resource kind '{0}' is not stored in the time series")]
    UnqueryableKind(ResourceKind),
}

/// 生成 1-3 个查询片段。
///
/// `offset` 决定语句中时间戳的渲染时区，不影响所表示的时刻。
pub fn plan(
    case: &WindowCase,
    kind: ResourceKind,
    ids: &[String],
    offset: FixedOffset,
) -> Result<Vec<StateQuery>, PlanError> {
    if ids.is_empty() {
        return Err(PlanError::EmptyIdSet);
    }
    if !kind.is_queryable() {
        return Err(PlanError::UnqueryableKind(kind));
    }

    let (lower, upper) = case.bounds();
    let id_filter = render_id_filter(kind, ids);
    let fragment = |role, bounds, text| StateQuery {
        role,
        kind,
        ids: ids.to_vec(),
        bounds,
        text,
    };

    let mut queries = Vec::with_capacity(3);
    if case.needs_edge_before()
        && let Some(lower) = lower
    {
        queries.push(fragment(
            QueryRole::EdgeBefore,
            QueryBounds::LastBefore(lower),
            format!(
                "SELECT \"time\", LAST(\"connected\") AS \"connected\" FROM \"{kind}\" \
                 WHERE time < '{}' AND ({id_filter}) GROUP BY \"{kind}\";",
                render_time(lower, offset)
            ),
        ));
    }

    let mut conditions = String::new();
    if let Some(lower) = lower {
        conditions.push_str(&format!("time >= '{}' AND ", render_time(lower, offset)));
    }
    if let Some(upper) = upper {
        conditions.push_str(&format!("time <= '{}' AND ", render_time(upper, offset)));
    }
    queries.push(fragment(
        QueryRole::Main,
        QueryBounds::Range { lower, upper },
        format!(
            "SELECT \"time\", \"connected\" FROM \"{kind}\" \
             WHERE {conditions}({id_filter}) GROUP BY \"{kind}\" ORDER BY time ASC;"
        ),
    ));

    if case.needs_edge_after()
        && let Some(upper) = upper
    {
        queries.push(fragment(
            QueryRole::EdgeAfter,
            QueryBounds::FirstAfter(upper),
            format!(
                "SELECT \"time\", FIRST(\"connected\") AS \"connected\" FROM \"{kind}\" \
                 WHERE time > '{}' AND ({id_filter}) GROUP BY \"{kind}\";",
                render_time(upper, offset)
            ),
        ));
    }
    Ok(queries)
}

fn render_time(time: DateTime<Utc>, offset: FixedOffset) -> String {
    time.with_timezone(&offset)
        .to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn render_id_filter(kind: ResourceKind, ids: &[String]) -> String {
    ids.iter()
        .map(|id| format!("\"{kind}\" = '{}'", escape_literal(id)))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// 转义单引号字符串字面量中的反斜杠与单引号。
fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
