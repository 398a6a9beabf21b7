//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("未指定源点")]
    SourceNotDesignated,

    #[error("未指定汇点")]
    SinkNotDesignated,

    #[error("存在多个源点")]
    MultipleSources,

    #[error("存在多个汇点")]
    MultipleSinks,

    #[error("源点与汇点不能是同一节点: {0}")]
    SourceEqualsSink(String),

    #[error("节点不存在: {0}")]
    NodeNotFound(String),

    #[error("节点已存在: {0}")]
    DuplicateNode(String),

    #[error("边不存在: {0}")]
    EdgeNotFound(String),

    #[error("同方向的边已存在: {0} -> {1}")]
    DuplicateEdge(String, String),

    #[error("不允许自环边: {0}")]
    SelfLoop(String),

    #[error("容量不能为负: {src_node} -> {target} 容量 {capacity}")]
    NegativeCapacity {
        src_node: String,
        target: String,
        capacity: i64,
    },

    #[error("两种策略的最大流结果不一致: 广度优先 {breadth_first}, 深度优先 {depth_first}")]
    FlowMismatch {
        breadth_first: i64,
        depth_first: i64,
    },

    #[error("残余容量为负: {from} -> {to} 值 {value}")]
    NegativeResidual {
        from: String,
        to: String,
        value: i64,
    },

    #[error("残余弧不存在: {from} -> {to}")]
    MissingResidualArc { from: String, to: String },

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}
