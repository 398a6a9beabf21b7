//! 最大流驱动器
//!
//! 反复调用搜索策略直到找不到增广路径，累计总流量

use crate::algorithm::residual::ResidualGraph;
use crate::algorithm::strategy::{AugmentingPath, AugmentingPathStrategy};
use crate::error::Result;
use crate::graph::{FlowGraph, NodeId};
use crate::types::FlowValue;
use tracing::debug;

/// 驱动器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    /// 继续搜索增广路径
    Searching,
    /// 无增广路径，计算结束
    Done,
}

/// 单次驱动的结果
#[derive(Debug, Clone)]
pub struct FlowOutcome {
    /// 最大流量
    pub total_flow: FlowValue,
    /// 按发现顺序记录的增广路径
    pub paths: Vec<AugmentingPath>,
    /// 终态残余图
    pub residual: ResidualGraph,
}

/// 最大流驱动器
pub struct MaxFlowDriver;

impl MaxFlowDriver {
    /// 用指定策略对图求最大流
    ///
    /// 不设迭代上限：每次增广使总流量增加一个正整数，
    /// 且总流量受源点出边容量之和约束，循环必然终止
    pub fn run<S: AugmentingPathStrategy>(
        graph: &FlowGraph,
        source: &NodeId,
        sink: &NodeId,
        strategy: &mut S,
    ) -> Result<FlowOutcome> {
        let mut residual = ResidualGraph::build(graph);
        strategy.on_search_begin(&residual, sink);

        let mut total_flow: FlowValue = 0;
        let mut paths: Vec<AugmentingPath> = Vec::new();
        let mut state = DriverState::Searching;

        while state == DriverState::Searching {
            match strategy.find_path(&residual, source, sink) {
                Some(path) => {
                    debug!(
                        strategy = strategy.name(),
                        bottleneck = path.bottleneck,
                        hops = path.hops(),
                        "找到增广路径"
                    );

                    residual.augment(&path.nodes, path.bottleneck)?;
                    total_flow += path.bottleneck;
                    strategy.after_augment(&residual, sink);
                    paths.push(path);
                }
                None => {
                    state = DriverState::Done;
                }
            }
        }

        debug!(
            strategy = strategy.name(),
            total_flow,
            rounds = paths.len(),
            "增广结束"
        );

        Ok(FlowOutcome {
            total_flow,
            paths,
            residual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::bfs::BreadthFirstStrategy;
    use crate::algorithm::dfs::DepthFirstStrategy;
    use crate::graph::{Edge, Node};

    fn run_bfs(graph: &FlowGraph) -> FlowOutcome {
        let (source, sink) = graph.endpoints().unwrap();
        MaxFlowDriver::run(graph, &source, &sink, &mut BreadthFirstStrategy::new()).unwrap()
    }

    fn run_dfs(graph: &FlowGraph) -> FlowOutcome {
        let (source, sink) = graph.endpoints().unwrap();
        let mut strategy = DepthFirstStrategy::new(graph);
        MaxFlowDriver::run(graph, &source, &sink, &mut strategy).unwrap()
    }

    #[test]
    fn test_single_edge() {
        let graph = FlowGraph::new(
            vec![Node::source("S", "S"), Node::sink("T", "T")],
            vec![Edge::new("e1", "S", "T", 7)],
        )
        .unwrap();

        let outcome = run_bfs(&graph);
        assert_eq!(outcome.total_flow, 7);
        assert_eq!(outcome.paths.len(), 1);
        assert_eq!(
            outcome.paths[0].nodes,
            vec![NodeId::new("S"), NodeId::new("T")]
        );
        assert_eq!(outcome.paths[0].bottleneck, 7);
    }

    #[test]
    fn test_disconnected_is_zero() {
        let graph = FlowGraph::new(
            vec![
                Node::source("S", "S"),
                Node::new("A", "A"),
                Node::sink("T", "T"),
            ],
            vec![Edge::new("e1", "S", "A", 10)],
        )
        .unwrap();

        let outcome = run_bfs(&graph);
        assert_eq!(outcome.total_flow, 0);
        assert!(outcome.paths.is_empty());
    }

    #[test]
    fn test_bottleneck_chain() {
        let graph = FlowGraph::new(
            vec![
                Node::source("S", "S"),
                Node::new("A", "A"),
                Node::sink("T", "T"),
            ],
            vec![
                Edge::new("e1", "S", "A", 10),
                Edge::new("e2", "A", "T", 5),
            ],
        )
        .unwrap();

        assert_eq!(run_bfs(&graph).total_flow, 5);
        assert_eq!(run_dfs(&graph).total_flow, 5);
    }

    #[test]
    fn test_flow_cancellation_needed() {
        // 经典反例：先走 S-A-B-T 会占用 A->B，必须经反向弧抵消才能达到最优
        let graph = FlowGraph::new(
            vec![
                Node::source("S", "S"),
                Node::new("A", "A"),
                Node::new("B", "B"),
                Node::sink("T", "T"),
            ],
            vec![
                Edge::new("e1", "S", "A", 10),
                Edge::new("e2", "S", "B", 10),
                Edge::new("e3", "A", "B", 10),
                Edge::new("e4", "A", "T", 10),
                Edge::new("e5", "B", "T", 10),
            ],
        )
        .unwrap();

        assert_eq!(run_bfs(&graph).total_flow, 20);
        assert_eq!(run_dfs(&graph).total_flow, 20);
    }

    #[test]
    fn test_many_rounds_terminate() {
        // 150 条互不相交的单位容量路径，每轮增广只推 1 单位流量。
        // 轮数远超任何固定轮数上限也必须算完
        let mut nodes = vec![Node::source("S", "S"), Node::sink("T", "T")];
        let mut edges = Vec::new();
        for i in 0..150 {
            let mid = format!("M{}", i);
            nodes.push(Node::new(mid.clone(), mid.clone()));
            edges.push(Edge::new(format!("in-{}", i), "S", mid.clone(), 1));
            edges.push(Edge::new(format!("out-{}", i), mid, "T", 1));
        }
        let graph = FlowGraph::new(nodes, edges).unwrap();

        let bfs = run_bfs(&graph);
        let dfs = run_dfs(&graph);

        assert_eq!(bfs.total_flow, 150);
        assert_eq!(dfs.total_flow, 150);
        assert_eq!(bfs.paths.len(), 150);
        assert_eq!(dfs.paths.len(), 150);
    }
}
