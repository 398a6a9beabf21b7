//! 编辑器工作区
//!
//! 交互会话中的可变节点/边集合。引擎从不直接接触这里的状态：
//! 计算前先 snapshot() 生成不可变的流网络

use crate::error::{Error, Result};
use crate::graph::{Edge, FlowGraph, Node};
use crate::metrics::global_metrics;
use crate::types::Capacity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 新建边的默认容量
pub const DEFAULT_CAPACITY: Capacity = 10;

/// 编辑器工作区
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Workspace {
    /// 节点列表
    nodes: Vec<Node>,
    /// 边列表
    edges: Vec<Edge>,
    /// 节点自动编号
    #[serde(default)]
    next_node: u32,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 节点操作 ====================

    /// 添加节点，返回其在列表中的引用
    ///
    /// 未指定名称时按 A, B, C... 自动命名
    pub fn add_node(&mut self, label: Option<&str>) -> &Node {
        let (id, number) = self.next_node_id();
        self.next_node = number;

        let label = match label {
            Some(l) => l.to_string(),
            None => default_label(number),
        };

        self.nodes.push(Node::new(id, label));
        global_metrics().record_node_added();
        self.nodes.last().expect("刚刚插入的节点")
    }

    /// 删除节点及其关联的所有边
    pub fn remove_node(&mut self, key: &str) -> Result<Node> {
        let index = self
            .find_node_index(key)
            .ok_or_else(|| Error::NodeNotFound(key.to_string()))?;
        let node = self.nodes.remove(index);

        self.edges
            .retain(|e| e.source() != node.id() && e.target() != node.id());

        Ok(node)
    }

    /// 重命名节点
    pub fn rename_node(&mut self, key: &str, label: &str) -> Result<()> {
        let index = self
            .find_node_index(key)
            .ok_or_else(|| Error::NodeNotFound(key.to_string()))?;
        self.nodes[index].set_label(label);
        Ok(())
    }

    /// 按 ID 或名称查找节点
    pub fn find_node(&self, key: &str) -> Option<&Node> {
        self.find_node_index(key).map(|i| &self.nodes[i])
    }

    fn find_node_index(&self, key: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.id().as_str() == key)
            .or_else(|| self.nodes.iter().position(|n| n.label() == key))
    }

    fn next_node_id(&self) -> (String, u32) {
        let mut number = self.next_node;
        loop {
            number += 1;
            let id = format!("node-{}", number);
            if !self.nodes.iter().any(|n| n.id().as_str() == id) {
                return (id, number);
            }
        }
    }

    // ==================== 边操作 ====================

    /// 在两个节点之间创建有向边
    ///
    /// 同方向已有边时拒绝；容量缺省为 [`DEFAULT_CAPACITY`]
    pub fn connect(&mut self, from: &str, to: &str, capacity: Option<Capacity>) -> Result<&Edge> {
        let source = self
            .find_node(from)
            .ok_or_else(|| Error::NodeNotFound(from.to_string()))?
            .id()
            .clone();
        let target = self
            .find_node(to)
            .ok_or_else(|| Error::NodeNotFound(to.to_string()))?
            .id()
            .clone();

        if source == target {
            return Err(Error::SelfLoop(source.to_string()));
        }
        if self
            .edges
            .iter()
            .any(|e| e.source() == &source && e.target() == &target)
        {
            return Err(Error::DuplicateEdge(source.to_string(), target.to_string()));
        }

        let capacity = capacity.unwrap_or(DEFAULT_CAPACITY);
        if capacity < 0 {
            return Err(Error::NegativeCapacity {
                src_node: source.to_string(),
                target: target.to_string(),
                capacity,
            });
        }

        let id = format!("edge-{}-{}", source, target);
        self.edges.push(Edge::new(id, source, target, capacity));
        global_metrics().record_edge_added();
        Ok(self.edges.last().expect("刚刚插入的边"))
    }

    /// 删除两个节点之间的有向边
    pub fn disconnect(&mut self, from: &str, to: &str) -> Result<Edge> {
        let index = self
            .find_edge_index(from, to)
            .ok_or_else(|| Error::EdgeNotFound(format!("{} -> {}", from, to)))?;
        Ok(self.edges.remove(index))
    }

    /// 更新边容量
    pub fn set_capacity(&mut self, from: &str, to: &str, capacity: Capacity) -> Result<()> {
        let index = self
            .find_edge_index(from, to)
            .ok_or_else(|| Error::EdgeNotFound(format!("{} -> {}", from, to)))?;

        if capacity < 0 {
            let edge = &self.edges[index];
            return Err(Error::NegativeCapacity {
                src_node: edge.source().to_string(),
                target: edge.target().to_string(),
                capacity,
            });
        }

        self.edges[index].set_capacity(capacity);
        Ok(())
    }

    fn find_edge_index(&self, from: &str, to: &str) -> Option<usize> {
        let source = self.find_node(from)?.id().clone();
        let target = self.find_node(to)?.id().clone();
        self.edges
            .iter()
            .position(|e| e.source() == &source && e.target() == &target)
    }

    // ==================== 源点/汇点 ====================

    /// 将节点设为源点（此前的源点标记被清除）
    pub fn set_source(&mut self, key: &str) -> Result<()> {
        let index = self
            .find_node_index(key)
            .ok_or_else(|| Error::NodeNotFound(key.to_string()))?;

        for (i, node) in self.nodes.iter_mut().enumerate() {
            if i == index {
                node.set_source(true);
            } else if node.is_source() {
                node.set_source(false);
            }
        }
        Ok(())
    }

    /// 将节点设为汇点（此前的汇点标记被清除）
    pub fn set_sink(&mut self, key: &str) -> Result<()> {
        let index = self
            .find_node_index(key)
            .ok_or_else(|| Error::NodeNotFound(key.to_string()))?;

        for (i, node) in self.nodes.iter_mut().enumerate() {
            if i == index {
                node.set_sink(true);
            } else if node.is_sink() {
                node.set_sink(false);
            }
        }
        Ok(())
    }

    /// 当前的源点
    pub fn source(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.is_source())
    }

    /// 当前的汇点
    pub fn sink(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.is_sink())
    }

    // ==================== 快照与会话 ====================

    /// 生成不可变快照供引擎使用
    pub fn snapshot(&self) -> Result<FlowGraph> {
        FlowGraph::new(self.nodes.clone(), self.edges.clone())
    }

    /// 清空工作区
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.next_node = 0;
    }

    /// 保存会话到 JSON 文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::SerializationError(e.to_string()))?;
        fs::write(path, json)?;
        global_metrics().record_session_saved();
        Ok(())
    }

    /// 从 JSON 文件加载会话
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let workspace: Self =
            serde_json::from_str(&json).map_err(|e| Error::SerializationError(e.to_string()))?;
        global_metrics().record_session_loaded();
        Ok(workspace)
    }

    /// 遍历节点
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// 遍历边
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// 节点数量
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// 自动节点名：前 26 个按字母，之后退回编号
fn default_label(number: u32) -> String {
    if (1..=26).contains(&number) {
        ((b'A' + (number - 1) as u8) as char).to_string()
    } else {
        format!("N{}", number)
    }
}
