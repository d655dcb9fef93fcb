//! FlowCut - 最大流 / 最小割与图像分割
//!
//! - 邻接表有向带容量图，支持残余边的原地更新
//! - BFS 最短增广路径与 Edmonds-Karp 最大流
//! - 基于残余图可达性的最小割
//! - PGM 灰度图的前景/背景分割

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod image;
pub mod import;

// 重导出常用类型
pub use algorithm::{ford_fulkerson, EdmondsKarp, MaxFlow, MinCut, PathFinder, PathResult};
pub use error::{Error, Result};
pub use graph::{Capacity, Edge, Graph, NodeId};
pub use image::{PgmImage, Segmentation, SegmentationConfig, Segmenter};
pub use import::{graph_from_file, graph_from_str, AdjacencyListImporter, ImportStats};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
