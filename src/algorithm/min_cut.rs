//! 最小割
//!
//! 最大流结束后，从源点出发在残余图上可达的节点构成源侧 S（前景），
//! 其余节点构成汇侧 T（背景）。

use super::path_tracing::PathFinder;
use crate::graph::{Capacity, Edge, Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 最小割 (S, T)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// 源侧节点
    pub source_side: BTreeSet<NodeId>,
    /// 汇侧节点
    pub sink_side: BTreeSet<NodeId>,
}

impl MinCut {
    /// 在残余图上按可达性划分节点
    pub fn from_residual(residual: &Graph, source: NodeId) -> Self {
        let reachable = PathFinder::new(residual).reachable_from(source);

        let (source_side, sink_side): (BTreeSet<NodeId>, BTreeSet<NodeId>) = residual
            .nodes()
            .partition(|id| reachable.contains(id));

        Self {
            source_side,
            sink_side,
        }
    }

    /// 节点是否在源侧
    pub fn is_source_side(&self, id: NodeId) -> bool {
        self.source_side.contains(&id)
    }

    /// 原图中从 S 指向 T 的边
    pub fn crossing_edges(&self, original: &Graph) -> Vec<Edge> {
        original
            .edges()
            .filter(|edge| self.is_source_side(edge.from) && self.sink_side.contains(&edge.to))
            .collect()
    }

    /// 割的容量（按原图计算），等于最大流值
    pub fn capacity(&self, original: &Graph) -> Capacity {
        self.crossing_edges(original)
            .iter()
            .fold(0, |total: Capacity, edge| total.saturating_add(edge.capacity))
    }
}
