//! 最大流算法
//!
//! 实现 Edmonds-Karp 算法（基于 BFS 的 Ford-Fulkerson），
//! 直接在图上原地维护残余容量和反向边。

use super::min_cut::MinCut;
use super::path_tracing::{PathFinder, PathResult};
use crate::graph::{Capacity, Graph, NodeId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// 最大流结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxFlow {
    /// 源点
    pub source: NodeId,
    /// 汇点
    pub sink: NodeId,
    /// 最大流量值
    pub value: Capacity,
    /// 增广次数
    pub augmentations: usize,
}

/// 残余图
///
/// 在一次最大流计算期间独占借用图。
pub struct ResidualGraph<'g> {
    graph: &'g mut Graph,
}

impl<'g> ResidualGraph<'g> {
    pub fn new(graph: &'g mut Graph) -> Self {
        Self { graph }
    }

    /// 只读视图
    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    /// 沿边 `u -> v` 推送 `amount` 单位流量
    ///
    /// 正向边剩余容量仍为正时扣减；恰好饱和时整条边删除，
    /// 其全部容量转移到反向边上。容量相加在 `Capacity::MAX` 处饱和。
    pub fn push(&mut self, u: NodeId, v: NodeId, amount: Capacity) {
        let forward = self.graph.capacity(u, v).unwrap_or(0);
        let backward = self.graph.capacity(v, u).unwrap_or(0);
        debug_assert!(forward >= amount, "推送量超过残余容量");

        if forward > amount {
            self.graph.add_edge(u, v, forward - amount);
            self.graph.add_edge(v, u, backward.saturating_add(amount));
        } else {
            self.graph.add_edge(v, u, backward.saturating_add(forward));
            self.graph.remove_edge(u, v);
        }
    }

    /// 沿整条路径推送瓶颈流量
    pub fn augment(&mut self, path: &[NodeId], bottleneck: Capacity) {
        for pair in path.windows(2) {
            self.push(pair[0], pair[1], bottleneck);
        }
    }
}

/// Edmonds-Karp 最大流算法
pub struct EdmondsKarp<'g> {
    residual: ResidualGraph<'g>,
}

impl<'g> EdmondsKarp<'g> {
    /// 创建算法实例，计算期间图被原地改写为残余图
    pub fn new(graph: &'g mut Graph) -> Self {
        Self {
            residual: ResidualGraph::new(graph),
        }
    }

    /// 计算从 source 到 sink 的最大流
    ///
    /// 重复 BFS 找增广路径直到不存在为止。对已经饱和的残余图再次调用得到 0。
    /// 总流量超过 `Capacity::MAX` 时取 `Capacity::MAX`。
    pub fn max_flow(&mut self, source: NodeId, sink: NodeId) -> MaxFlow {
        let mut value: Capacity = 0;
        let mut augmentations = 0;

        loop {
            let result =
                PathFinder::new(self.residual.graph()).shortest_augmenting_path(source, sink);

            let (path, bottleneck) = match result {
                PathResult::NotFound => break,
                // source == sink 时得到零长度路径，没有可推送的流量
                PathResult::Found { bottleneck: 0, .. } => break,
                PathResult::Found { path, bottleneck } => (path, bottleneck),
            };

            debug!(
                augmentation = augmentations + 1,
                bottleneck,
                hops = path.len() - 1,
                "沿增广路径推送流量"
            );

            self.residual.augment(&path, bottleneck);
            value = value.saturating_add(bottleneck);
            augmentations += 1;
        }

        info!(%source, %sink, value, augmentations, "最大流计算完成");

        MaxFlow {
            source,
            sink,
            value,
            augmentations,
        }
    }

    /// 当前残余图上的最小割
    pub fn min_cut(&self, source: NodeId) -> MinCut {
        MinCut::from_residual(self.residual.graph(), source)
    }

    /// 残余图只读视图
    pub fn residual(&self) -> &Graph {
        self.residual.graph()
    }
}

/// 计算最大流并返回流量值，图被改写为残余图
pub fn ford_fulkerson(graph: &mut Graph, source: NodeId, sink: NodeId) -> Capacity {
    EdmondsKarp::new(graph).max_flow(source, sink).value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: i64) -> NodeId {
        NodeId::new(id)
    }

    fn create_flow_graph() -> Graph {
        // 经典最大流测试图
        //     10       10
        // S -----> A -----> T
        // |        ^        ^
        // |5       |5       |
        // v        |        |
        // B -----> C ------>|
        //     10       10
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 10); // S -> A
        graph.add_edge(0, 2, 5); // S -> B
        graph.add_edge(1, 4, 10); // A -> T
        graph.add_edge(2, 3, 10); // B -> C
        graph.add_edge(3, 1, 5); // C -> A
        graph.add_edge(3, 4, 10); // C -> T
        graph
    }

    #[test]
    fn test_max_flow_basic() {
        let mut graph = create_flow_graph();
        let result = EdmondsKarp::new(&mut graph).max_flow(n(0), n(4));

        assert_eq!(result.value, 15);
        assert_eq!(result.augmentations, 2);
    }

    #[test]
    fn test_line_graph_saturates_smaller_edge() {
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 5);
        graph.add_edge(1, 2, 3);

        assert_eq!(ford_fulkerson(&mut graph, n(0), n(2)), 3);

        // 1 -> 2 饱和后被删除，容量全部转移到反向边
        assert_eq!(graph.capacity(1, 2), None);
        assert_eq!(graph.capacity(2, 1), Some(3));
        assert_eq!(graph.capacity(0, 1), Some(2));
        assert_eq!(graph.capacity(1, 0), Some(3));
    }

    #[test]
    fn test_parallel_paths() {
        let mut graph = Graph::new();
        // S -> A -> T (5), S -> B -> T (10)
        graph.add_edge(0, 1, 5);
        graph.add_edge(1, 3, 5);
        graph.add_edge(0, 2, 10);
        graph.add_edge(2, 3, 10);

        assert_eq!(ford_fulkerson(&mut graph, n(0), n(3)), 15);
    }

    #[test]
    fn test_back_edge_reroutes_flow() {
        // 第一条最短路径 0-1-2-3 占用了 1 -> 2，第二条路径必须经反向边 2 -> 1 撤销它
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, 1);
        graph.add_edge(2, 3, 1);
        graph.add_edge(1, 4, 1);
        graph.add_edge(4, 5, 1);
        graph.add_edge(5, 3, 1);
        graph.add_edge(0, 6, 1);
        graph.add_edge(6, 7, 1);
        graph.add_edge(7, 2, 1);

        let result = EdmondsKarp::new(&mut graph).max_flow(n(0), n(3));
        assert_eq!(result.value, 2);
        assert_eq!(result.augmentations, 2);

        // 1 -> 2 上的流量被撤销后恢复
        assert_eq!(graph.capacity(1, 2), Some(1));
    }

    #[test]
    fn test_second_run_adds_nothing() {
        let mut graph = create_flow_graph();
        let mut solver = EdmondsKarp::new(&mut graph);

        assert_eq!(solver.max_flow(n(0), n(4)).value, 15);

        let again = solver.max_flow(n(0), n(4));
        assert_eq!(again.value, 0);
        assert_eq!(again.augmentations, 0);
    }

    #[test]
    fn test_source_equals_sink() {
        let mut graph = create_flow_graph();
        let before = graph.clone();

        assert_eq!(ford_fulkerson(&mut graph, n(1), n(1)), 0);
        assert_eq!(graph, before);
    }

    #[test]
    fn test_disconnected_or_invalid() {
        let mut graph = create_flow_graph();
        graph.add_node(9);

        assert_eq!(ford_fulkerson(&mut graph, n(0), n(9)), 0);
        assert_eq!(ford_fulkerson(&mut graph, n(0), n(42)), 0);
        assert_eq!(ford_fulkerson(&mut graph, n(-3), n(4)), 0);
    }

    #[test]
    fn test_push_partial_and_saturating() {
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 4);
        graph.add_edge(1, 0, 1);

        let mut residual = ResidualGraph::new(&mut graph);
        residual.push(n(0), n(1), 3);
        assert_eq!(residual.graph().capacity(0, 1), Some(1));
        assert_eq!(residual.graph().capacity(1, 0), Some(4));

        residual.push(n(0), n(1), 1);
        assert_eq!(residual.graph().capacity(0, 1), None);
        assert_eq!(residual.graph().capacity(1, 0), Some(5));
    }

    #[test]
    fn test_max_capacity_edges_saturate() {
        // 反向边已满，推送后仍停在上限
        let mut graph = Graph::new();
        graph.add_edge(0, 1, Capacity::MAX);
        graph.add_edge(1, 0, Capacity::MAX);

        let flow = EdmondsKarp::new(&mut graph).max_flow(n(0), n(1));
        assert_eq!(flow.value, Capacity::MAX);
        assert_eq!(flow.augmentations, 1);
        assert_eq!(graph.capacity(0, 1), None);
        assert_eq!(graph.capacity(1, 0), Some(Capacity::MAX));

        // 总流量超过上限
        let mut graph = Graph::new();
        graph.add_edge(0, 2, Capacity::MAX);
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, 1);
        let original = graph.clone();

        let mut solver = EdmondsKarp::new(&mut graph);
        let flow = solver.max_flow(n(0), n(2));
        assert_eq!(flow.value, Capacity::MAX);
        assert_eq!(flow.augmentations, 2);
        assert_eq!(solver.min_cut(n(0)).capacity(&original), Capacity::MAX);
        assert_eq!(original.outgoing_capacity(0), Capacity::MAX);
        assert_eq!(solver.residual().capacity(2, 0), Some(Capacity::MAX));
        assert_eq!(solver.residual().capacity(2, 1), Some(1));
    }

    #[test]
    fn test_min_cut_after_solve() {
        let mut graph = create_flow_graph();
        let original = graph.clone();

        let mut solver = EdmondsKarp::new(&mut graph);
        let flow = solver.max_flow(n(0), n(4));
        let cut = solver.min_cut(n(0));

        assert!(cut.is_source_side(n(0)));
        assert!(!cut.is_source_side(n(4)));
        assert_eq!(cut.capacity(&original), flow.value);
    }
}
