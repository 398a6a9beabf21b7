//! FlowGraph - 交互式图编辑器的最大流计算引擎
//!
//! 面向交互式编辑场景的有向带容量图最大流计算，支持：
//! - 广度优先 (Edmonds-Karp) 与深度优先两种增广路径策略
//! - 两种策略独立求解并交叉核对结果
//! - 深度优先变体附带逐轮残余容量快照与边状态推导
//! - 交互式 CLI 编辑器与 JSON 会话文件

pub mod algorithm;
pub mod cli;
pub mod engine;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod types;

// 重导出常用类型
pub use algorithm::{
    AugmentingPath, AugmentingPathStrategy, BreadthFirstStrategy, DepthFirstStrategy,
    FlowOutcome, MaxFlowDriver, ResidualGraph, ResidualTrace,
};
pub use engine::{
    FlowEdge, FlowEngine, FlowReport, MaxFlowAnalysis, PathCapacity, PathFlow, TraceReport,
};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, FlowGraph, Node, NodeId};
pub use types::{Capacity, EdgeStatus, FlowValue, StrategyKind};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
