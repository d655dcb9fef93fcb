//! 边定义
//!
//! 有向带容量的边 `(from, to, capacity)`

use crate::graph::node::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 容量（残余容量），非负整数
pub type Capacity = u64;

/// 边
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// 起点
    pub from: NodeId,
    /// 终点
    pub to: NodeId,
    /// 容量
    pub capacity: Capacity,
}

impl Edge {
    /// 创建新边
    pub fn new(from: NodeId, to: NodeId, capacity: Capacity) -> Self {
        Self { from, to, capacity }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --({})--> {}", self.from, self.capacity, self.to)
    }
}
