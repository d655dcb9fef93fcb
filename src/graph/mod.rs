//! 图核心模块
//!
//! 定义节点、边和邻接表图

mod edge;
mod graph;
mod node;

pub use edge::{Capacity, Edge};
pub use graph::Graph;
pub use node::NodeId;
