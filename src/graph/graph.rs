//! 图数据结构
//!
//! 邻接表表示的有向带权图。每个节点持有一个按邻居 ID 排序的
//! `BTreeMap`，同一有序节点对最多一条边，重复插入即覆盖。

use super::edge::{Capacity, Edge};
use super::node::NodeId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 有向带容量图
///
/// 最大流计算会原地修改图（残余容量、反向边），需要保留原图的调用方
/// 应在求解前 `clone()`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// 节点 -> (邻居 -> 容量)，节点按注册顺序保存
    adjacency: IndexMap<NodeId, BTreeMap<NodeId, Capacity>>,
}

impl Graph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    /// 预分配节点容量
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            adjacency: IndexMap::with_capacity(nodes),
        }
    }

    // ==================== 节点操作 ====================

    /// 注册节点，返回是否为新节点
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> bool {
        let id = id.into();
        if self.adjacency.contains_key(&id) {
            return false;
        }
        self.adjacency.insert(id, BTreeMap::new());
        true
    }

    /// 节点是否已注册
    pub fn contains_node(&self, id: impl Into<NodeId>) -> bool {
        self.adjacency.contains_key(&id.into())
    }

    /// 节点数量
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// 按注册顺序遍历所有节点
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    // ==================== 边操作 ====================

    /// 插入或覆盖边 `from -> to`，两端节点自动注册
    pub fn add_edge(&mut self, from: impl Into<NodeId>, to: impl Into<NodeId>, capacity: Capacity) {
        let from = from.into();
        let to = to.into();
        self.add_node(from);
        self.add_node(to);
        self.adjacency.entry(from).or_default().insert(to, capacity);
    }

    /// 删除边，不存在时什么也不做
    pub fn remove_edge(&mut self, from: impl Into<NodeId>, to: impl Into<NodeId>) -> Option<Capacity> {
        let to = to.into();
        self.adjacency
            .get_mut(&from.into())
            .and_then(|neighbors| neighbors.remove(&to))
    }

    /// 边 `from -> to` 的容量
    pub fn capacity(&self, from: impl Into<NodeId>, to: impl Into<NodeId>) -> Option<Capacity> {
        let to = to.into();
        self.adjacency
            .get(&from.into())
            .and_then(|neighbors| neighbors.get(&to))
            .copied()
    }

    /// 边数量
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// 遍历所有边
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().flat_map(|(&from, neighbors)| {
            neighbors
                .iter()
                .map(move |(&to, &capacity)| Edge::new(from, to, capacity))
        })
    }

    // ==================== 邻居查询 ====================

    /// 出边邻居及容量，按邻居 ID 升序
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, Capacity)> + '_ {
        self.adjacency
            .get(&id)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(&to, &capacity)| (to, capacity)))
    }

    /// 出度
    pub fn out_degree(&self, id: impl Into<NodeId>) -> usize {
        self.adjacency.get(&id.into()).map_or(0, BTreeMap::len)
    }

    /// 出边容量之和
    pub fn outgoing_capacity(&self, id: impl Into<NodeId>) -> Capacity {
        self.neighbors(id.into())
            .fold(0, |total: Capacity, (_, capacity)| total.saturating_add(capacity))
    }

    /// 入边容量之和
    pub fn incoming_capacity(&self, id: impl Into<NodeId>) -> Capacity {
        let id = id.into();
        self.adjacency
            .values()
            .filter_map(|neighbors| neighbors.get(&id))
            .fold(0, |total: Capacity, &capacity| total.saturating_add(capacity))
    }
}

/// 按邻接表格式输出：`id --(w)--> to --(w)--> to ...`
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, neighbors) in &self.adjacency {
            write!(f, "{}", id)?;
            for (to, capacity) in neighbors {
                write!(f, " --({})--> {}", capacity, to)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_basic() {
        let mut graph = Graph::new();

        assert!(graph.add_node(0));
        assert!(!graph.add_node(0));

        graph.add_edge(0, 1, 3);
        graph.add_edge(0, 2, 6);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.capacity(0, 1), Some(3));
        assert_eq!(graph.capacity(1, 0), None);
        assert!(graph.contains_node(2));
    }

    #[test]
    fn test_add_edge_overwrites() {
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 3);
        graph.add_edge(0, 1, 9);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.capacity(0, 1), Some(9));
    }

    #[test]
    fn test_remove_edge_keeps_nodes() {
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 5);

        assert_eq!(graph.remove_edge(0, 1), Some(5));
        assert_eq!(graph.remove_edge(0, 1), None);
        assert_eq!(graph.remove_edge(7, 1), None);

        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.out_degree(0), 0);
    }

    #[test]
    fn test_neighbors_sorted_by_id() {
        let mut graph = Graph::new();
        graph.add_edge(0, 3, 8);
        graph.add_edge(0, 1, 3);
        graph.add_edge(0, 2, 6);

        let neighbors: Vec<_> = graph.neighbors(NodeId::new(0)).collect();
        assert_eq!(
            neighbors,
            vec![(NodeId::new(1), 3), (NodeId::new(2), 6), (NodeId::new(3), 8)]
        );
        assert_eq!(graph.neighbors(NodeId::new(42)).count(), 0);
    }

    #[test]
    fn test_capacity_sums() {
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 3);
        graph.add_edge(0, 2, 6);
        graph.add_edge(1, 2, 2);

        assert_eq!(graph.outgoing_capacity(0), 9);
        assert_eq!(graph.incoming_capacity(2), 8);
        assert_eq!(graph.incoming_capacity(0), 0);
    }

    #[test]
    fn test_display_adjacency() {
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 3);
        graph.add_node(1);

        assert_eq!(graph.to_string(), "0 --(3)--> 1\n1\n");
    }
}
