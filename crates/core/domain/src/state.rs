/// 一次观测到的连接状态变化。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub time: chrono::DateTime<chrono::Utc>,
    pub connected: bool,
}

impl State {
    pub fn new(time: chrono::DateTime<chrono::Utc>, connected: bool) -> Self {
        Self { time, connected }
    }
}

/// 单个资源在查询窗口内的连接时间线。
///
/// `prev_state` 为窗口下界之前最近的一次状态，`next_state` 为窗口上界之后最早的一次状态；
/// `states` 按时序库返回顺序（时间升序）保存窗口内的状态。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricalStates {
    pub prev_state: Option<State>,
    pub states: Vec<State>,
    pub next_state: Option<State>,
}
