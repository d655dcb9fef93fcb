//! 最短增广路径搜索
//!
//! 在残余图上做广度优先搜索，返回边数最少的路径及该路径上的瓶颈容量。

use crate::graph::{Capacity, Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// 路径结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathResult {
    /// 找到路径（含起点与终点）及瓶颈容量
    Found {
        path: Vec<NodeId>,
        bottleneck: Capacity,
    },
    /// 端点非法或不可达
    NotFound,
}

impl PathResult {
    /// 是否找到路径
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found { .. })
    }

    /// 路径上的节点，未找到时为空
    pub fn path(&self) -> &[NodeId] {
        match self {
            PathResult::Found { path, .. } => path,
            PathResult::NotFound => &[],
        }
    }

    /// 瓶颈容量
    pub fn bottleneck(&self) -> Option<Capacity> {
        match self {
            PathResult::Found { bottleneck, .. } => Some(*bottleneck),
            PathResult::NotFound => None,
        }
    }

    /// 路径边数
    pub fn length(&self) -> usize {
        self.path().len().saturating_sub(1)
    }
}

/// 路径查找器
///
/// 只读借用图；容量为 0 的边视为不存在。
pub struct PathFinder<'g> {
    graph: &'g Graph,
}

impl<'g> PathFinder<'g> {
    /// 创建路径查找器
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// BFS 最短增广路径
    ///
    /// 先到先得：节点一旦被访问，其前驱不再被覆盖，因此重构出的路径边数最少。
    /// 瓶颈是这条路径本身的最小容量，而不是所有路径中的最大瓶颈。
    pub fn shortest_augmenting_path(&self, start: NodeId, end: NodeId) -> PathResult {
        if !self.graph.contains_node(start) || !self.graph.contains_node(end) {
            return PathResult::NotFound;
        }

        if start == end {
            return PathResult::Found {
                path: vec![start],
                bottleneck: 0,
            };
        }

        // 前驱节点及到达该节点所用边的容量
        let mut parent: HashMap<NodeId, (NodeId, Capacity)> =
            HashMap::with_capacity(self.graph.node_count());
        let mut visited = HashSet::with_capacity(self.graph.node_count());
        let mut queue = VecDeque::new();

        visited.insert(start);
        queue.push_back(start);

        let mut reached = false;
        while let Some(current) = queue.pop_front() {
            if current == end {
                reached = true;
                break;
            }

            for (neighbor, capacity) in self.graph.neighbors(current) {
                if capacity == 0 || visited.contains(&neighbor) {
                    continue;
                }
                visited.insert(neighbor);
                parent.insert(neighbor, (current, capacity));
                queue.push_back(neighbor);
            }
        }

        if !reached {
            return PathResult::NotFound;
        }

        self.reconstruct_path(start, end, &parent)
    }

    /// 从终点沿前驱回溯，同时求瓶颈
    fn reconstruct_path(
        &self,
        start: NodeId,
        end: NodeId,
        parent: &HashMap<NodeId, (NodeId, Capacity)>,
    ) -> PathResult {
        let mut path = vec![end];
        let mut bottleneck = Capacity::MAX;
        let mut current = end;

        while current != start {
            match parent.get(&current) {
                Some(&(prev, capacity)) => {
                    bottleneck = bottleneck.min(capacity);
                    path.push(prev);
                    current = prev;
                }
                None => return PathResult::NotFound,
            }
        }

        path.reverse();
        PathResult::Found { path, bottleneck }
    }

    /// 从 start 出发、只走正容量边可达的全部节点（含 start）
    pub fn reachable_from(&self, start: NodeId) -> HashSet<NodeId> {
        let mut visited = HashSet::new();
        if !self.graph.contains_node(start) {
            return visited;
        }

        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for (neighbor, capacity) in self.graph.neighbors(current) {
                if capacity > 0 && visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited
    }

    /// 判断两点是否连通
    pub fn is_reachable(&self, start: NodeId, end: NodeId) -> bool {
        self.shortest_augmenting_path(start, end).is_found()
    }
}
