//! 图模型模块
//!
//! 节点、边与不可变流网络快照

mod edge;
mod model;
mod node;

pub use edge::{Edge, EdgeId};
pub use model::FlowGraph;
pub use node::{Node, NodeId};
