//! 搜索策略契约
//!
//! 两种增广路径搜索共用同一接口，由驱动器按参数选择

use crate::algorithm::residual::ResidualGraph;
use crate::graph::NodeId;
use crate::types::Capacity;
use serde::{Deserialize, Serialize};

/// 增广路径
///
/// 从源点到汇点的节点序列，发现时每对相邻节点的残余容量均为正
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentingPath {
    /// 路径上的节点序列（首为源点，尾为汇点）
    pub nodes: Vec<NodeId>,
    /// 瓶颈容量（路径上残余容量的最小值）
    pub bottleneck: Capacity,
}

impl AugmentingPath {
    /// 路径跳数
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// 增广路径搜索策略
///
/// 契约：给定残余图和源汇点，返回一条增广路径或「无路径」。
/// 每次调用都从空的已访问集合开始
pub trait AugmentingPathStrategy {
    /// 策略名称
    fn name(&self) -> &'static str;

    /// 在当前残余图中寻找一条增广路径
    fn find_path(
        &mut self,
        residual: &ResidualGraph,
        source: &NodeId,
        sink: &NodeId,
    ) -> Option<AugmentingPath>;

    /// 搜索循环开始前的钩子（记录初始快照用）
    fn on_search_begin(&mut self, _residual: &ResidualGraph, _sink: &NodeId) {}

    /// 每次增广生效后的钩子（记录逐步快照用）
    fn after_augment(&mut self, _residual: &ResidualGraph, _sink: &NodeId) {}
}

/// 计算路径在当前残余图中的瓶颈容量
pub(crate) fn path_bottleneck(residual: &ResidualGraph, nodes: &[NodeId]) -> Capacity {
    let mut bottleneck = Capacity::MAX;
    for pair in nodes.windows(2) {
        bottleneck = bottleneck.min(residual.capacity(&pair[0], &pair[1]));
    }
    bottleneck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_hops() {
        let path = AugmentingPath {
            nodes: vec![NodeId::new("S"), NodeId::new("A"), NodeId::new("T")],
            bottleneck: 5,
        };
        assert_eq!(path.hops(), 2);
    }

    #[test]
    fn test_path_serialization() {
        let path = AugmentingPath {
            nodes: vec![NodeId::new("S"), NodeId::new("T")],
            bottleneck: 7,
        };
        let json = serde_json::to_string(&path).unwrap();
        let restored: AugmentingPath = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, path);
    }
}
