//! 通用类型定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 边容量（带符号整数，输入容量非负；残余值用同一类型以便检测负值缺陷）
pub type Capacity = i64;

/// 流量值
pub type FlowValue = i64;

/// 增广路径搜索策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// 广度优先（Edmonds-Karp，按跳数最短路径）
    BreadthFirst,
    /// 深度优先（回溯搜索，附带逐步残余快照）
    DepthFirst,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::BreadthFirst => "breadth-first",
            StrategyKind::DepthFirst => "depth-first",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 每次增广后原始边的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStatus {
    /// 残余容量等于原始容量，尚未使用
    Unused,
    /// 已承载部分流量，且仍可到达汇点
    Open,
    /// 已承载部分流量，但从边终点已无法到达汇点
    Blocked,
    /// 残余容量为 0
    Saturated,
}

impl EdgeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeStatus::Unused => "unused",
            EdgeStatus::Open => "open",
            EdgeStatus::Blocked => "blocked",
            EdgeStatus::Saturated => "saturated",
        }
    }
}

impl fmt::Display for EdgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
