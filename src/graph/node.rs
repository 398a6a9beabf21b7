//! 节点定义
//!
//! 节点由外部编辑器创建，引擎将其视为不可变输入

use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点 ID（由外部编辑器分配的稳定字符串，全局唯一）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// 节点 ID
    id: NodeId,
    /// 显示名称（仅用于展示，引擎不读取）
    label: String,
    /// 是否为源点
    is_source: bool,
    /// 是否为汇点
    is_sink: bool,
}

impl Node {
    /// 创建新节点
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            is_source: false,
            is_sink: false,
        }
    }

    /// 创建源点
    pub fn source(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        let mut n = Self::new(id, label);
        n.is_source = true;
        n
    }

    /// 创建汇点
    pub fn sink(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        let mut n = Self::new(id, label);
        n.is_sink = true;
        n
    }

    /// 获取节点 ID
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// 获取显示名称
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 是否为源点
    pub fn is_source(&self) -> bool {
        self.is_source
    }

    /// 是否为汇点
    pub fn is_sink(&self) -> bool {
        self.is_sink
    }

    /// 设置显示名称
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// 标记/取消源点
    pub fn set_source(&mut self, is_source: bool) {
        self.is_source = is_source;
        if is_source {
            self.is_sink = false;
        }
    }

    /// 标记/取消汇点
    pub fn set_sink(&mut self, is_sink: bool) {
        self.is_sink = is_sink;
        if is_sink {
            self.is_source = false;
        }
    }
}
