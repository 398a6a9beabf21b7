//! 边定义
//!
//! 有向带容量的边，同一有序点对最多一条

use crate::graph::node::NodeId;
use crate::types::Capacity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边 ID（由外部编辑器分配的稳定字符串，全局唯一）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EdgeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 边
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// 边 ID
    id: EdgeId,
    /// 起点 ID
    source: NodeId,
    /// 终点 ID
    target: NodeId,
    /// 容量（非负，在图构建时校验）
    capacity: Capacity,
}

impl Edge {
    /// 创建新边
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        capacity: Capacity,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            capacity,
        }
    }

    /// 获取边 ID
    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    /// 获取起点 ID
    pub fn source(&self) -> &NodeId {
        &self.source
    }

    /// 获取终点 ID
    pub fn target(&self) -> &NodeId {
        &self.target
    }

    /// 获取容量
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// 设置容量
    pub fn set_capacity(&mut self, capacity: Capacity) {
        self.capacity = capacity;
    }
}
