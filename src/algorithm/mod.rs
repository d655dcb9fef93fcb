//! 图算法模块
//!
//! 包含最短增广路径搜索、最大流和最小割

mod max_flow;
mod min_cut;
mod path_tracing;

pub use max_flow::{ford_fulkerson, EdmondsKarp, MaxFlow, ResidualGraph};
pub use min_cut::MinCut;
pub use path_tracing::{PathFinder, PathResult};
