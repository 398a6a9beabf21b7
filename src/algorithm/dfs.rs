//! 深度优先搜索策略（手动演算变体）
//!
//! 回溯式搜索，提交给第一个可行邻居；找到的不一定是最短路径，
//! 因此可能比广度优先多若干轮增广，但最终流量必须一致。
//! 额外记录每次增广后所有原始边的残余容量与状态，供结果页展示

use crate::algorithm::residual::ResidualGraph;
use crate::algorithm::strategy::{path_bottleneck, AugmentingPath, AugmentingPathStrategy};
use crate::graph::{FlowGraph, NodeId};
use crate::types::{Capacity, EdgeStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 单条原始边的逐步残余轨迹
///
/// `values[0]` 为初始容量，`values[k]` 为第 k 次增广后的残余容量；
/// `statuses` 与 `values` 一一对应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidualTrace {
    /// 边的起点
    pub source: NodeId,
    /// 边的终点
    pub target: NodeId,
    /// 逐步残余容量
    pub values: Vec<Capacity>,
    /// 逐步状态
    pub statuses: Vec<EdgeStatus>,
}

/// 深度优先策略
///
/// 邻居按残余图的插入顺序尝试，死路节点保留访问标记不再重试
#[derive(Debug)]
pub struct DepthFirstStrategy {
    /// 原始边 (起点, 终点, 容量)，按图中顺序
    edges: Vec<(NodeId, NodeId, Capacity)>,
    /// 与 edges 平行的轨迹表
    traces: Vec<ResidualTrace>,
}

impl DepthFirstStrategy {
    pub fn new(graph: &FlowGraph) -> Self {
        let edges: Vec<(NodeId, NodeId, Capacity)> = graph
            .edges()
            .map(|e| (e.source().clone(), e.target().clone(), e.capacity()))
            .collect();

        let traces = edges
            .iter()
            .map(|(source, target, _)| ResidualTrace {
                source: source.clone(),
                target: target.clone(),
                values: Vec::new(),
                statuses: Vec::new(),
            })
            .collect();

        Self { edges, traces }
    }

    /// 取出完整的逐步残余表
    pub fn into_residual_table(self) -> Vec<ResidualTrace> {
        self.traces
    }

    /// 为所有原始边追加一行快照
    fn record_snapshot(&mut self, residual: &ResidualGraph, sink: &NodeId) {
        for (index, (source, target, capacity)) in self.edges.iter().enumerate() {
            let value = residual.capacity(source, target);
            let status = classify(residual, target, sink, value, *capacity);

            let trace = &mut self.traces[index];
            trace.values.push(value);
            trace.statuses.push(status);
        }
    }

    /// 回溯探测：提交第一个可行邻居，死路返回 false
    fn probe(
        &self,
        residual: &ResidualGraph,
        current: &NodeId,
        sink: &NodeId,
        visited: &mut HashSet<NodeId>,
        path: &mut Vec<NodeId>,
    ) -> bool {
        if current == sink {
            return true;
        }

        for (next, capacity) in residual.neighbors(current) {
            if capacity > 0 && !visited.contains(next) {
                visited.insert(next.clone());
                path.push(next.clone());

                if self.probe(residual, next, sink, visited, path) {
                    return true;
                }

                // 回溯；访问标记保留，死路节点不再进入
                path.pop();
            }
        }

        false
    }
}

/// 推导一条原始边当前的状态
fn classify(
    residual: &ResidualGraph,
    target: &NodeId,
    sink: &NodeId,
    value: Capacity,
    capacity: Capacity,
) -> EdgeStatus {
    if value == 0 {
        EdgeStatus::Saturated
    } else if value == capacity {
        EdgeStatus::Unused
    } else if !residual.can_reach(target, sink) {
        EdgeStatus::Blocked
    } else {
        EdgeStatus::Open
    }
}

impl AugmentingPathStrategy for DepthFirstStrategy {
    fn name(&self) -> &'static str {
        "depth-first"
    }

    fn find_path(
        &mut self,
        residual: &ResidualGraph,
        source: &NodeId,
        sink: &NodeId,
    ) -> Option<AugmentingPath> {
        if source == sink {
            return None;
        }

        let mut visited = HashSet::new();
        let mut nodes = vec![source.clone()];
        visited.insert(source.clone());

        if !self.probe(residual, source, sink, &mut visited, &mut nodes) {
            return None;
        }

        let bottleneck = path_bottleneck(residual, &nodes);
        Some(AugmentingPath { nodes, bottleneck })
    }

    fn on_search_begin(&mut self, residual: &ResidualGraph, sink: &NodeId) {
        self.record_snapshot(residual, sink);
    }

    fn after_augment(&mut self, residual: &ResidualGraph, sink: &NodeId) {
        self.record_snapshot(residual, sink);
    }
}
