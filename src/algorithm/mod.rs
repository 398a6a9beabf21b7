//! 最大流算法模块
//!
//! 残余图、两种增广路径搜索策略与驱动器

mod bfs;
mod dfs;
mod driver;
mod residual;
mod strategy;

pub use bfs::BreadthFirstStrategy;
pub use dfs::{DepthFirstStrategy, ResidualTrace};
pub use driver::{FlowOutcome, MaxFlowDriver};
pub use residual::ResidualGraph;
pub use strategy::{AugmentingPath, AugmentingPathStrategy};
