//! 残余图
//!
//! 两种搜索策略共用的可变底层结构：正向弧携带剩余容量，
//! 反向弧用于流量抵消

use crate::error::{Error, Result};
use crate::graph::{FlowGraph, NodeId};
use crate::types::Capacity;
use indexmap::IndexMap;
use std::collections::{HashSet, VecDeque};

/// 残余图
///
/// 节点 ID -> (邻居 ID -> 剩余容量)，保持构建时的插入顺序
#[derive(Debug, Clone)]
pub struct ResidualGraph {
    arcs: IndexMap<NodeId, IndexMap<NodeId, Capacity>>,
}

impl ResidualGraph {
    /// 由流网络构建残余图
    ///
    /// 每条用户边写入正向容量；反向槽位不存在时补 0。
    /// 用户自己创建的反向边是真实的边，不会被合成的 0 槽位覆盖。
    pub fn build(graph: &FlowGraph) -> Self {
        let mut arcs: IndexMap<NodeId, IndexMap<NodeId, Capacity>> =
            IndexMap::with_capacity(graph.node_count());

        for node in graph.nodes() {
            arcs.insert(node.id().clone(), IndexMap::new());
        }

        for edge in graph.edges() {
            arcs.entry(edge.source().clone())
                .or_default()
                .insert(edge.target().clone(), edge.capacity());

            let reverse = arcs.entry(edge.target().clone()).or_default();
            if !reverse.contains_key(edge.source()) {
                reverse.insert(edge.source().clone(), 0);
            }
        }

        Self { arcs }
    }

    /// 获取弧的剩余容量（弧不存在时为 0）
    pub fn capacity(&self, from: &NodeId, to: &NodeId) -> Capacity {
        self.arcs
            .get(from)
            .and_then(|m| m.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// 遍历节点的所有残余弧（含容量为 0 的反向槽位）
    pub fn neighbors(&self, from: &NodeId) -> impl Iterator<Item = (&NodeId, Capacity)> {
        self.arcs
            .get(from)
            .into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k, *v)))
    }

    /// 沿增广路径推入流量
    ///
    /// 每对相邻节点：正向减瓶颈、反向加瓶颈。
    /// 正向值变负说明驱动器或策略有缺陷，立即报错
    pub fn augment(&mut self, path: &[NodeId], bottleneck: Capacity) -> Result<()> {
        for pair in path.windows(2) {
            let (u, v) = (&pair[0], &pair[1]);

            let forward = self
                .arcs
                .get_mut(u)
                .and_then(|m| m.get_mut(v))
                .ok_or_else(|| Error::MissingResidualArc {
                    from: u.to_string(),
                    to: v.to_string(),
                })?;
            *forward -= bottleneck;
            if *forward < 0 {
                return Err(Error::NegativeResidual {
                    from: u.to_string(),
                    to: v.to_string(),
                    value: *forward,
                });
            }

            let backward = self
                .arcs
                .get_mut(v)
                .and_then(|m| m.get_mut(u))
                .ok_or_else(|| Error::MissingResidualArc {
                    from: v.to_string(),
                    to: u.to_string(),
                })?;
            *backward += bottleneck;
        }

        Ok(())
    }

    /// 判断沿正容量弧能否从 from 到达 to
    pub fn can_reach(&self, from: &NodeId, to: &NodeId) -> bool {
        if from == to {
            return true;
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from.clone());
        queue.push_back(from.clone());

        while let Some(current) = queue.pop_front() {
            for (next, capacity) in self.neighbors(&current) {
                if capacity > 0 && !visited.contains(next) {
                    if next == to {
                        return true;
                    }
                    visited.insert(next.clone());
                    queue.push_back(next.clone());
                }
            }
        }

        false
    }

    /// 节点数量
    pub fn node_count(&self) -> usize {
        self.arcs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn chain() -> FlowGraph {
        FlowGraph::new(
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
        .unwrap()
    }

    #[test]
    fn test_build_forward_and_reverse() {
        let graph = chain();
        let residual = ResidualGraph::build(&graph);

        let (s, a, t) = (NodeId::new("S"), NodeId::new("A"), NodeId::new("T"));
        assert_eq!(residual.capacity(&s, &a), 10);
        assert_eq!(residual.capacity(&a, &t), 5);
        // 合成的反向弧初始为 0
        assert_eq!(residual.capacity(&a, &s), 0);
        assert_eq!(residual.capacity(&t, &a), 0);
        // 不存在的弧视为 0
        assert_eq!(residual.capacity(&s, &t), 0);
    }

    #[test]
    fn test_build_keeps_user_reverse_edge() {
        // A->B 与 B->A 都是用户边，互不覆盖
        let graph = FlowGraph::new(
            vec![Node::new("A", "A"), Node::new("B", "B")],
            vec![
                Edge::new("e1", "A", "B", 5),
                Edge::new("e2", "B", "A", 3),
            ],
        )
        .unwrap();
        let residual = ResidualGraph::build(&graph);

        let (a, b) = (NodeId::new("A"), NodeId::new("B"));
        assert_eq!(residual.capacity(&a, &b), 5);
        assert_eq!(residual.capacity(&b, &a), 3);
    }

    #[test]
    fn test_augment_updates_both_directions() {
        let graph = chain();
        let mut residual = ResidualGraph::build(&graph);

        let path = vec![NodeId::new("S"), NodeId::new("A"), NodeId::new("T")];
        residual.augment(&path, 5).unwrap();

        let (s, a, t) = (NodeId::new("S"), NodeId::new("A"), NodeId::new("T"));
        assert_eq!(residual.capacity(&s, &a), 5);
        assert_eq!(residual.capacity(&a, &s), 5);
        assert_eq!(residual.capacity(&a, &t), 0);
        assert_eq!(residual.capacity(&t, &a), 5);
    }

    #[test]
    fn test_augment_negative_is_error() {
        let graph = chain();
        let mut residual = ResidualGraph::build(&graph);

        let path = vec![NodeId::new("S"), NodeId::new("A"), NodeId::new("T")];
        let result = residual.augment(&path, 7);
        assert!(matches!(result, Err(Error::NegativeResidual { .. })));
    }

    #[test]
    fn test_can_reach() {
        let graph = chain();
        let mut residual = ResidualGraph::build(&graph);

        let (s, t) = (NodeId::new("S"), NodeId::new("T"));
        assert!(residual.can_reach(&s, &t));
        assert!(residual.can_reach(&t, &t));

        // 饱和 A->T 之后 S 无法再到达 T
        let path = vec![NodeId::new("S"), NodeId::new("A"), NodeId::new("T")];
        residual.augment(&path, 5).unwrap();
        assert!(!residual.can_reach(&s, &t));
    }
}
