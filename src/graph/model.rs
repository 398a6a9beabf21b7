//! 流网络模型
//!
//! 不可变的节点/边快照，构建时完成全部校验，只提供读访问

use crate::error::{Error, Result};
use crate::graph::edge::{Edge, EdgeId};
use crate::graph::node::{Node, NodeId};
use crate::types::Capacity;
use indexmap::IndexMap;
use std::collections::HashMap;

/// 流网络
///
/// 由外部编辑器的一次快照构建，在单次计算期间不可变
#[derive(Debug, Clone)]
pub struct FlowGraph {
    /// 节点（保持插入顺序）
    nodes: IndexMap<NodeId, Node>,
    /// 边（保持插入顺序）
    edges: IndexMap<EdgeId, Edge>,
    /// 出边索引
    outgoing: HashMap<NodeId, Vec<EdgeId>>,
    /// 有序点对到边的索引
    pair_index: HashMap<(NodeId, NodeId), EdgeId>,
}

impl FlowGraph {
    /// 由节点和边集合构建流网络
    ///
    /// 校验失败时返回错误：节点重复、端点缺失、自环、负容量、同向重边
    pub fn new(node_list: Vec<Node>, edge_list: Vec<Edge>) -> Result<Self> {
        let mut nodes: IndexMap<NodeId, Node> = IndexMap::with_capacity(node_list.len());
        for node in node_list {
            if nodes.contains_key(node.id()) {
                return Err(Error::DuplicateNode(node.id().to_string()));
            }
            nodes.insert(node.id().clone(), node);
        }

        let mut edges: IndexMap<EdgeId, Edge> = IndexMap::with_capacity(edge_list.len());
        let mut outgoing: HashMap<NodeId, Vec<EdgeId>> = HashMap::new();
        let mut pair_index: HashMap<(NodeId, NodeId), EdgeId> = HashMap::new();

        for edge in edge_list {
            if !nodes.contains_key(edge.source()) {
                return Err(Error::NodeNotFound(edge.source().to_string()));
            }
            if !nodes.contains_key(edge.target()) {
                return Err(Error::NodeNotFound(edge.target().to_string()));
            }
            if edge.source() == edge.target() {
                return Err(Error::SelfLoop(edge.source().to_string()));
            }
            if edge.capacity() < 0 {
                return Err(Error::NegativeCapacity {
                    src_node: edge.source().to_string(),
                    target: edge.target().to_string(),
                    capacity: edge.capacity(),
                });
            }

            let pair = (edge.source().clone(), edge.target().clone());
            if pair_index.contains_key(&pair) {
                return Err(Error::DuplicateEdge(
                    edge.source().to_string(),
                    edge.target().to_string(),
                ));
            }

            outgoing
                .entry(edge.source().clone())
                .or_default()
                .push(edge.id().clone());
            pair_index.insert(pair, edge.id().clone());
            edges.insert(edge.id().clone(), edge);
        }

        Ok(Self {
            nodes,
            edges,
            outgoing,
            pair_index,
        })
    }

    /// 解析源点和汇点
    ///
    /// 标记必须各恰好出现一次且不在同一节点上，否则在任何搜索开始前报错
    pub fn endpoints(&self) -> Result<(NodeId, NodeId)> {
        let sources: Vec<&NodeId> = self
            .nodes
            .values()
            .filter(|n| n.is_source())
            .map(|n| n.id())
            .collect();
        let sinks: Vec<&NodeId> = self
            .nodes
            .values()
            .filter(|n| n.is_sink())
            .map(|n| n.id())
            .collect();

        let source = match sources.as_slice() {
            [] => return Err(Error::SourceNotDesignated),
            [s] => (*s).clone(),
            _ => return Err(Error::MultipleSources),
        };
        let sink = match sinks.as_slice() {
            [] => return Err(Error::SinkNotDesignated),
            [t] => (*t).clone(),
            _ => return Err(Error::MultipleSinks),
        };

        if source == sink {
            return Err(Error::SourceEqualsSink(source.to_string()));
        }

        Ok((source, sink))
    }

    /// 获取节点
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// 获取边
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// 遍历所有节点（插入顺序）
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// 遍历所有边（插入顺序）
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// 获取节点的所有出边
    pub fn outgoing_edges(&self, id: &NodeId) -> Vec<&Edge> {
        self.outgoing
            .get(id)
            .map(|ids| ids.iter().filter_map(|eid| self.edges.get(eid)).collect())
            .unwrap_or_default()
    }

    /// 获取有序点对之间的边容量
    pub fn capacity_between(&self, source: &NodeId, target: &NodeId) -> Option<Capacity> {
        self.pair_index
            .get(&(source.clone(), target.clone()))
            .and_then(|eid| self.edges.get(eid))
            .map(|e| e.capacity())
    }

    /// 获取节点数量
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
