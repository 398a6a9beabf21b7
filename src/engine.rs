//! 最大流计算引擎
//!
//! 对外边界：输入一个校验过的流网络，独立运行两种策略，
//! 交叉核对总流量后汇总为结果对象。引擎本身是输入图的纯函数

use crate::algorithm::{
    AugmentingPath, BreadthFirstStrategy, DepthFirstStrategy, FlowOutcome, MaxFlowDriver,
    ResidualGraph, ResidualTrace,
};
use crate::error::{Error, Result};
use crate::graph::{EdgeId, FlowGraph, NodeId};
use crate::metrics::global_metrics;
use crate::types::{Capacity, FlowValue, StrategyKind};
use serde::{Deserialize, Serialize};
use tracing::info;

/// 边的最终流量分配
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEdge {
    /// 边 ID
    pub id: EdgeId,
    /// 起点
    pub source: NodeId,
    /// 终点
    pub target: NodeId,
    /// 原始容量
    pub capacity: Capacity,
    /// 最终流量
    pub flow: FlowValue,
}

/// 增广路径及其推入的流量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathFlow {
    /// 路径上的节点序列
    pub path: Vec<NodeId>,
    /// 该路径推入的流量
    pub flow: FlowValue,
}

/// 增广路径及其瓶颈容量（诊断报告用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCapacity {
    /// 路径上的节点序列
    pub path: Vec<NodeId>,
    /// 瓶颈容量
    pub capacity: Capacity,
}

/// 广度优先（标准）报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowReport {
    /// 最大流量
    pub max_flow: FlowValue,
    /// 每条边的流量分配
    pub flow_edges: Vec<FlowEdge>,
    /// 按发现顺序的增广路径
    pub paths: Vec<PathFlow>,
}

/// 深度优先（诊断）报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceReport {
    /// 最大流量
    pub max_flow: FlowValue,
    /// 每条边的流量分配
    pub flow_edges: Vec<FlowEdge>,
    /// 按发现顺序的增广路径
    pub paths: Vec<PathCapacity>,
    /// 推荐路径（瓶颈容量最大，相同时取先发现的）
    pub recommended_path: Option<PathCapacity>,
    /// 最长路径（跳数最多，相同时取先发现的）
    pub longest_path: Option<PathCapacity>,
    /// 每条原始边的逐步残余表
    pub residual_table: Vec<ResidualTrace>,
}

/// 综合分析结果
///
/// 两种策略独立求解并核对一致后的完整输出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlowAnalysis {
    /// 双方一致的最大流量
    pub max_flow: FlowValue,
    /// 广度优先报告
    pub breadth_first: FlowReport,
    /// 深度优先报告
    pub depth_first: TraceReport,
}

/// 最大流计算引擎
pub struct FlowEngine;

impl FlowEngine {
    /// 完整分析：运行两种策略并交叉核对
    ///
    /// 策略各自从独立构建的初始残余图出发；总流量不一致说明
    /// 某个策略有缺陷，直接报错而不是擅自取其一
    pub fn analyze(graph: &FlowGraph) -> Result<MaxFlowAnalysis> {
        let metrics = global_metrics();
        let timer = metrics.record_compute_start();
        let result = Self::analyze_inner(graph);
        metrics.record_compute_complete(timer, result.is_ok());
        result
    }

    fn analyze_inner(graph: &FlowGraph) -> Result<MaxFlowAnalysis> {
        let (source, sink) = graph.endpoints()?;

        let bfs_outcome =
            MaxFlowDriver::run(graph, &source, &sink, &mut BreadthFirstStrategy::new())?;

        let mut dfs_strategy = DepthFirstStrategy::new(graph);
        let dfs_outcome = MaxFlowDriver::run(graph, &source, &sink, &mut dfs_strategy)?;

        if bfs_outcome.total_flow != dfs_outcome.total_flow {
            return Err(Error::FlowMismatch {
                breadth_first: bfs_outcome.total_flow,
                depth_first: dfs_outcome.total_flow,
            });
        }

        let max_flow = bfs_outcome.total_flow;
        global_metrics()
            .record_augmentations((bfs_outcome.paths.len() + dfs_outcome.paths.len()) as u64);
        info!(
            max_flow,
            bfs_rounds = bfs_outcome.paths.len(),
            dfs_rounds = dfs_outcome.paths.len(),
            "最大流计算完成"
        );

        let breadth_first = FlowReport {
            max_flow,
            flow_edges: flow_assignment(graph, &bfs_outcome.residual),
            paths: bfs_outcome
                .paths
                .iter()
                .map(|p| PathFlow {
                    path: p.nodes.clone(),
                    flow: p.bottleneck,
                })
                .collect(),
        };

        let dfs_paths: Vec<PathCapacity> = dfs_outcome
            .paths
            .iter()
            .map(|p| PathCapacity {
                path: p.nodes.clone(),
                capacity: p.bottleneck,
            })
            .collect();

        let depth_first = TraceReport {
            max_flow,
            flow_edges: flow_assignment(graph, &dfs_outcome.residual),
            recommended_path: recommended_path(&dfs_outcome.paths),
            longest_path: longest_path(&dfs_outcome.paths),
            paths: dfs_paths,
            residual_table: dfs_strategy.into_residual_table(),
        };

        Ok(MaxFlowAnalysis {
            max_flow,
            breadth_first,
            depth_first,
        })
    }

    /// 单策略求解（标准报告形式）
    pub fn compute(graph: &FlowGraph, kind: StrategyKind) -> Result<FlowReport> {
        let (source, sink) = graph.endpoints()?;

        let outcome: FlowOutcome = match kind {
            StrategyKind::BreadthFirst => {
                MaxFlowDriver::run(graph, &source, &sink, &mut BreadthFirstStrategy::new())?
            }
            StrategyKind::DepthFirst => {
                let mut strategy = DepthFirstStrategy::new(graph);
                MaxFlowDriver::run(graph, &source, &sink, &mut strategy)?
            }
        };

        Ok(FlowReport {
            max_flow: outcome.total_flow,
            flow_edges: flow_assignment(graph, &outcome.residual),
            paths: outcome
                .paths
                .iter()
                .map(|p| PathFlow {
                    path: p.nodes.clone(),
                    flow: p.bottleneck,
                })
                .collect(),
        })
    }
}

/// 由终态残余图推导每条原始边的流量
///
/// 流量 = 原始容量 - 终态正向残余。用户创建的反向边在抵消后
/// 残余可能超过自身容量，因此下限钳制为 0
fn flow_assignment(graph: &FlowGraph, residual: &ResidualGraph) -> Vec<FlowEdge> {
    graph
        .edges()
        .map(|edge| {
            let remaining = residual.capacity(edge.source(), edge.target());
            FlowEdge {
                id: edge.id().clone(),
                source: edge.source().clone(),
                target: edge.target().clone(),
                capacity: edge.capacity(),
                flow: (edge.capacity() - remaining).max(0),
            }
        })
        .collect()
}

/// 瓶颈容量最大的路径（相同时取先发现的）
fn recommended_path(paths: &[AugmentingPath]) -> Option<PathCapacity> {
    let mut best: Option<&AugmentingPath> = None;
    for path in paths {
        if best.map_or(true, |b| path.bottleneck > b.bottleneck) {
            best = Some(path);
        }
    }
    best.map(|p| PathCapacity {
        path: p.nodes.clone(),
        capacity: p.bottleneck,
    })
}

/// 跳数最多的路径（相同时取先发现的）
fn longest_path(paths: &[AugmentingPath]) -> Option<PathCapacity> {
    let mut best: Option<&AugmentingPath> = None;
    for path in paths {
        if best.map_or(true, |b| path.hops() > b.hops()) {
            best = Some(path);
        }
    }
    best.map(|p| PathCapacity {
        path: p.nodes.clone(),
        capacity: p.bottleneck,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};
    use std::collections::HashMap;

    fn node(id: &str) -> Node {
        Node::new(id, id)
    }

    fn graph(nodes: Vec<Node>, edges: Vec<Edge>) -> FlowGraph {
        FlowGraph::new(nodes, edges).unwrap()
    }

    /// 校验流量守恒与容量约束
    fn assert_flow_properties(g: &FlowGraph, max_flow: FlowValue, flow_edges: &[FlowEdge]) {
        let (source, sink) = g.endpoints().unwrap();

        let mut inbound: HashMap<NodeId, FlowValue> = HashMap::new();
        let mut outbound: HashMap<NodeId, FlowValue> = HashMap::new();

        for fe in flow_edges {
            // 0 <= flow <= capacity
            assert!(fe.flow >= 0, "流量为负: {:?}", fe);
            assert!(fe.flow <= fe.capacity, "流量超过容量: {:?}", fe);

            *outbound.entry(fe.source.clone()).or_insert(0) += fe.flow;
            *inbound.entry(fe.target.clone()).or_insert(0) += fe.flow;
        }

        // 中间节点流量守恒
        for n in g.nodes() {
            if n.id() == &source || n.id() == &sink {
                continue;
            }
            assert_eq!(
                inbound.get(n.id()).copied().unwrap_or(0),
                outbound.get(n.id()).copied().unwrap_or(0),
                "节点 {} 流量不守恒",
                n.id()
            );
        }

        // 源点净流出 = 汇点净流入 = 最大流
        let source_net = outbound.get(&source).copied().unwrap_or(0)
            - inbound.get(&source).copied().unwrap_or(0);
        let sink_net = inbound.get(&sink).copied().unwrap_or(0)
            - outbound.get(&sink).copied().unwrap_or(0);
        assert_eq!(source_net, max_flow);
        assert_eq!(sink_net, max_flow);

        // 最小割上界：不超过源点出边容量之和
        let source_out_capacity: Capacity = g
            .outgoing_edges(&source)
            .iter()
            .map(|e| e.capacity())
            .sum();
        assert!(max_flow <= source_out_capacity);
    }

    #[test]
    fn test_scenario_single_edge() {
        // 单边 S->T(7)：最大流 7，唯一路径 [S, T] 瓶颈 7
        let g = graph(
            vec![Node::source("S", "S"), Node::sink("T", "T")],
            vec![Edge::new("e1", "S", "T", 7)],
        );

        let analysis = FlowEngine::analyze(&g).unwrap();
        assert_eq!(analysis.max_flow, 7);
        assert_eq!(analysis.breadth_first.paths.len(), 1);
        assert_eq!(
            analysis.breadth_first.paths[0],
            PathFlow {
                path: vec![NodeId::new("S"), NodeId::new("T")],
                flow: 7,
            }
        );
        assert_flow_properties(&g, analysis.max_flow, &analysis.breadth_first.flow_edges);
    }

    #[test]
    fn test_scenario_diamond_with_cross_arc() {
        // S->A(10), S->B(5), A->T(5), B->T(10), A->B(3)：
        // 交叉边 A->B 让 A 的富余流入经 B 汇出，最大流 13
        let g = graph(
            vec![Node::source("S", "S"), node("A"), node("B"), Node::sink("T", "T")],
            vec![
                Edge::new("e1", "S", "A", 10),
                Edge::new("e2", "S", "B", 5),
                Edge::new("e3", "A", "T", 5),
                Edge::new("e4", "B", "T", 10),
                Edge::new("e5", "A", "B", 3),
            ],
        );

        let analysis = FlowEngine::analyze(&g).unwrap();
        assert_eq!(analysis.max_flow, 13);
        assert_flow_properties(&g, analysis.max_flow, &analysis.breadth_first.flow_edges);
    }

    #[test]
    fn test_scenario_diamond_with_useless_cross_arc() {
        // 交叉边换成 B->A(3) 则帮不上忙：最大流 10
        let g = graph(
            vec![Node::source("S", "S"), node("A"), node("B"), Node::sink("T", "T")],
            vec![
                Edge::new("e1", "S", "A", 10),
                Edge::new("e2", "S", "B", 5),
                Edge::new("e3", "A", "T", 5),
                Edge::new("e4", "B", "T", 10),
                Edge::new("e5", "B", "A", 3),
            ],
        );

        let analysis = FlowEngine::analyze(&g).unwrap();
        assert_eq!(analysis.max_flow, 10);
        assert_flow_properties(&g, analysis.max_flow, &analysis.breadth_first.flow_edges);
    }

    #[test]
    fn test_scenario_disconnected() {
        // 源汇不连通：最大流 0，所有边流量 0，没有增广路径
        let g = graph(
            vec![Node::source("S", "S"), node("A"), node("B"), Node::sink("T", "T")],
            vec![
                Edge::new("e1", "S", "A", 10),
                Edge::new("e2", "B", "T", 10),
            ],
        );

        let analysis = FlowEngine::analyze(&g).unwrap();
        assert_eq!(analysis.max_flow, 0);
        assert!(analysis.breadth_first.paths.is_empty());
        assert!(analysis.depth_first.paths.is_empty());
        assert!(analysis
            .breadth_first
            .flow_edges
            .iter()
            .all(|fe| fe.flow == 0));
        assert!(analysis.depth_first.recommended_path.is_none());
    }

    #[test]
    fn test_scenario_detached_cycle() {
        // 游离的 A->B(5)、B->A(5) 环不得贡献虚假流量
        let g = graph(
            vec![Node::source("S", "S"), Node::sink("T", "T"), node("A"), node("B")],
            vec![
                Edge::new("e1", "S", "T", 7),
                Edge::new("e2", "A", "B", 5),
                Edge::new("e3", "B", "A", 5),
            ],
        );

        let analysis = FlowEngine::analyze(&g).unwrap();
        assert_eq!(analysis.max_flow, 7);
        for fe in &analysis.breadth_first.flow_edges {
            if fe.id.as_str() != "e1" {
                assert_eq!(fe.flow, 0, "环上的边不应有流量: {:?}", fe);
            }
        }
        assert_flow_properties(&g, analysis.max_flow, &analysis.breadth_first.flow_edges);
    }

    #[test]
    fn test_user_reverse_edge_on_flow_path() {
        // 流经 A->B 的同时存在用户边 B->A：
        // 抵消让 B->A 的残余超过自身容量，流量钳制为 0
        let g = graph(
            vec![Node::source("S", "S"), node("A"), node("B"), Node::sink("T", "T")],
            vec![
                Edge::new("e1", "S", "A", 4),
                Edge::new("e2", "A", "B", 4),
                Edge::new("e3", "B", "A", 3),
                Edge::new("e4", "B", "T", 4),
            ],
        );

        let analysis = FlowEngine::analyze(&g).unwrap();
        assert_eq!(analysis.max_flow, 4);

        let back = analysis
            .breadth_first
            .flow_edges
            .iter()
            .find(|fe| fe.id.as_str() == "e3")
            .unwrap();
        assert_eq!(back.flow, 0);
        assert_flow_properties(&g, analysis.max_flow, &analysis.breadth_first.flow_edges);
    }

    #[test]
    fn test_empty_graph_needs_endpoints() {
        let g = graph(vec![], vec![]);
        assert!(matches!(
            FlowEngine::analyze(&g),
            Err(Error::SourceNotDesignated)
        ));
    }

    #[test]
    fn test_no_edges_resolves_to_zero() {
        // 只有端点没有边：合法输入，最大流 0
        let g = graph(
            vec![Node::source("S", "S"), Node::sink("T", "T")],
            vec![],
        );

        let analysis = FlowEngine::analyze(&g).unwrap();
        assert_eq!(analysis.max_flow, 0);
        assert!(analysis.breadth_first.paths.is_empty());
        assert!(analysis.depth_first.residual_table.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let g = graph(
            vec![Node::source("S", "S"), node("A"), node("B"), Node::sink("T", "T")],
            vec![
                Edge::new("e1", "S", "A", 10),
                Edge::new("e2", "S", "B", 5),
                Edge::new("e3", "A", "T", 5),
                Edge::new("e4", "B", "T", 10),
                Edge::new("e5", "A", "B", 3),
            ],
        );

        let first = FlowEngine::analyze(&g).unwrap();
        let second = FlowEngine::analyze(&g).unwrap();

        assert_eq!(first.max_flow, second.max_flow);
        assert_eq!(first.breadth_first.paths, second.breadth_first.paths);
        assert_eq!(first.depth_first.paths, second.depth_first.paths);
    }

    #[test]
    fn test_recommended_and_longest_path() {
        // 两跳大容量路径与三跳小容量路径并存
        let g = graph(
            vec![Node::source("S", "S"), node("A"), node("B"), Node::sink("T", "T")],
            vec![
                Edge::new("e1", "S", "A", 8),
                Edge::new("e2", "A", "T", 10),
                Edge::new("e3", "S", "B", 2),
                Edge::new("e4", "B", "A", 2),
            ],
        );

        let analysis = FlowEngine::analyze(&g).unwrap();
        assert_eq!(analysis.max_flow, 10);

        let recommended = analysis.depth_first.recommended_path.unwrap();
        assert_eq!(recommended.capacity, 8);
        assert_eq!(recommended.path.len(), 3);

        let longest = analysis.depth_first.longest_path.unwrap();
        assert_eq!(longest.path.len(), 4);
        assert_eq!(longest.capacity, 2);
    }

    #[test]
    fn test_residual_table_dimensions() {
        let g = graph(
            vec![Node::source("S", "S"), node("A"), Node::sink("T", "T")],
            vec![
                Edge::new("e1", "S", "A", 10),
                Edge::new("e2", "A", "T", 5),
            ],
        );

        let analysis = FlowEngine::analyze(&g).unwrap();
        let rounds = analysis.depth_first.paths.len();

        assert_eq!(analysis.depth_first.residual_table.len(), 2);
        for trace in &analysis.depth_first.residual_table {
            // 第 0 行为初始状态，之后每轮增广一行
            assert_eq!(trace.values.len(), rounds + 1);
            assert_eq!(trace.statuses.len(), trace.values.len());
        }
    }

    #[test]
    fn test_compute_single_strategy() {
        let g = graph(
            vec![Node::source("S", "S"), Node::sink("T", "T")],
            vec![Edge::new("e1", "S", "T", 7)],
        );

        let bfs = FlowEngine::compute(&g, StrategyKind::BreadthFirst).unwrap();
        let dfs = FlowEngine::compute(&g, StrategyKind::DepthFirst).unwrap();
        assert_eq!(bfs.max_flow, 7);
        assert_eq!(dfs.max_flow, 7);
    }

    #[test]
    fn test_random_graphs_strategies_agree() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        // analyze 内部已交叉核对两种策略的总流量，
        // 这里再对两份报告分别校验守恒与容量约束
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..30 {
            let node_count = rng.gen_range(2..9);
            let mut nodes = vec![Node::source("n0", "n0"), Node::sink("n1", "n1")];
            for i in 2..node_count {
                nodes.push(node(&format!("n{}", i)));
            }

            let mut edges = Vec::new();
            for i in 0..node_count {
                for j in 0..node_count {
                    if i != j && rng.gen_bool(0.45) {
                        edges.push(Edge::new(
                            format!("e{}-{}", i, j),
                            format!("n{}", i),
                            format!("n{}", j),
                            rng.gen_range(0..20),
                        ));
                    }
                }
            }

            let g = graph(nodes, edges);
            let analysis = FlowEngine::analyze(&g).unwrap();
            assert_flow_properties(&g, analysis.max_flow, &analysis.breadth_first.flow_edges);
            assert_flow_properties(&g, analysis.max_flow, &analysis.depth_first.flow_edges);
        }
    }

    #[test]
    fn test_analysis_serialization() {
        let g = graph(
            vec![Node::source("S", "S"), Node::sink("T", "T")],
            vec![Edge::new("e1", "S", "T", 7)],
        );

        let analysis = FlowEngine::analyze(&g).unwrap();
        let json = serde_json::to_string(&analysis).unwrap();
        let restored: MaxFlowAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.max_flow, 7);
        assert_eq!(restored.depth_first.residual_table.len(), 1);
    }
}
