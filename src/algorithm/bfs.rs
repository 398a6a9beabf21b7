//! 广度优先搜索策略（Edmonds-Karp）
//!
//! 按跳数找最短增广路径，保证若汇点可达必能找到路径，
//! 单次调用 O(V+E)

use crate::algorithm::residual::ResidualGraph;
use crate::algorithm::strategy::{path_bottleneck, AugmentingPath, AugmentingPathStrategy};
use crate::graph::NodeId;
use crate::types::Capacity;
use std::collections::{HashMap, HashSet, VecDeque};

/// 广度优先策略
///
/// 同层邻居按残余容量降序访问，容量相同时按节点 ID 升序。
/// 该顺序只影响在多条最短路径中报告哪一条，不影响最大流的值
#[derive(Debug, Default)]
pub struct BreadthFirstStrategy;

impl BreadthFirstStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl AugmentingPathStrategy for BreadthFirstStrategy {
    fn name(&self) -> &'static str {
        "breadth-first"
    }

    fn find_path(
        &mut self,
        residual: &ResidualGraph,
        source: &NodeId,
        sink: &NodeId,
    ) -> Option<AugmentingPath> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        let mut parent: HashMap<NodeId, NodeId> = HashMap::new();

        visited.insert(source.clone());
        queue.push_back(source.clone());

        while let Some(current) = queue.pop_front() {
            if &current == sink {
                break;
            }

            let mut candidates: Vec<(&NodeId, Capacity)> = residual
                .neighbors(&current)
                .filter(|(next, capacity)| *capacity > 0 && !visited.contains(*next))
                .collect();
            candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

            for (next, _) in candidates {
                visited.insert(next.clone());
                parent.insert(next.clone(), current.clone());
                queue.push_back(next.clone());
            }
        }

        if !parent.contains_key(sink) {
            return None;
        }

        // 沿父指针重构路径
        let mut nodes = vec![sink.clone()];
        let mut current = sink.clone();
        while &current != source {
            current = parent.get(&current)?.clone();
            nodes.push(current.clone());
        }
        nodes.reverse();

        let bottleneck = path_bottleneck(residual, &nodes);
        Some(AugmentingPath { nodes, bottleneck })
    }
}
