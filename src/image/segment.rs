//! 图像分割
//!
//! 把灰度图建模为网格图：像素 (x, y) 是节点 `y * width + x`，相邻像素按相似度
//! 连边；超级源点 -1 连向“像前景”的像素，“像背景”的像素连向超级汇点
//! `width * height`。最大流结束后源侧像素即前景。

use super::pgm::PgmImage;
use crate::algorithm::{EdmondsKarp, MaxFlow, MinCut};
use crate::error::{Error, Result};
use crate::graph::{Capacity, Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// 超级源点 ID
pub const SUPER_SOURCE: NodeId = NodeId(-1);

/// 分割配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// 覆盖自动计算的阈值
    pub threshold: Option<u32>,
    /// 输出文件的注释行
    pub comment: String,
    /// 背景像素写出的灰度，默认为图像最大值
    pub background: Option<u32>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            threshold: None,
            comment: "# Created by flowcut".to_string(),
            background: None,
        }
    }
}

impl SegmentationConfig {
    /// 从 JSON 文件加载
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// 分割结果
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// 实际使用的阈值
    pub threshold: u32,
    /// 最大流
    pub flow: MaxFlow,
    /// 最小割
    pub cut: MinCut,
    /// 每个像素是否属于前景（行优先）
    pub foreground: Vec<bool>,
}

impl Segmentation {
    /// 前景像素数量
    pub fn foreground_count(&self) -> usize {
        self.foreground.iter().filter(|&&f| f).count()
    }
}

/// 图像分割器
pub struct Segmenter<'a> {
    image: &'a PgmImage,
    config: SegmentationConfig,
    threshold: u32,
}

impl<'a> Segmenter<'a> {
    /// 创建分割器，背景灰度不能超过图像最大值
    pub fn new(image: &'a PgmImage, config: SegmentationConfig) -> Result<Self> {
        if let Some(background) = config.background {
            if background > image.max_value() {
                return Err(Error::ConfigError(format!(
                    "背景灰度 {} 超过图像最大值 {}",
                    background,
                    image.max_value()
                )));
            }
        }

        let threshold = config.threshold.unwrap_or_else(|| image.threshold());
        Ok(Self {
            image,
            config,
            threshold,
        })
    }

    /// 使用的阈值
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// 超级汇点 ID
    pub fn sink_id(&self) -> NodeId {
        NodeId::new((self.image.width() * self.image.height()) as i64)
    }

    /// 像素节点 ID
    pub fn pixel_id(&self, x: usize, y: usize) -> NodeId {
        NodeId::new((y * self.image.width() + x) as i64)
    }

    /// 构建网格图，权重低于阈值的边不加入
    pub fn build_graph(&self) -> Graph {
        let (width, height) = (self.image.width(), self.image.height());
        let max = self.image.max_value();
        let mut graph = Graph::with_capacity(width * height + 2);

        for y in 0..height {
            for x in 0..width {
                let current = self.pixel_id(x, y);
                let intensity = self.image.pixel(x, y);
                graph.add_node(current);

                // 左、右、上、下
                let mut neighbors = Vec::with_capacity(4);
                if x > 0 {
                    neighbors.push((x - 1, y));
                }
                if x + 1 < width {
                    neighbors.push((x + 1, y));
                }
                if y > 0 {
                    neighbors.push((x, y - 1));
                }
                if y + 1 < height {
                    neighbors.push((x, y + 1));
                }

                for (nx, ny) in neighbors {
                    let weight = self.image.edge_weight(self.image.pixel(nx, ny), intensity);
                    self.link(&mut graph, current, self.pixel_id(nx, ny), weight);
                }
            }
        }

        let sink = self.sink_id();
        graph.add_node(SUPER_SOURCE);
        graph.add_node(sink);

        for y in 0..height {
            for x in 0..width {
                let id = self.pixel_id(x, y);
                let intensity = self.image.pixel(x, y);

                self.link(&mut graph, SUPER_SOURCE, id, max.abs_diff(intensity));
                self.link(&mut graph, id, sink, intensity);
            }
        }

        graph
    }

    /// 权重不低于阈值时连边，零权重边不加入
    fn link(&self, graph: &mut Graph, from: NodeId, to: NodeId, weight: u32) {
        if weight > 0 && weight >= self.threshold {
            graph.add_edge(from, to, Capacity::from(weight));
        }
    }

    /// 建图、求最大流并按最小割划分像素
    pub fn segment(&self) -> Segmentation {
        let mut graph = self.build_graph();
        let sink = self.sink_id();

        let mut solver = EdmondsKarp::new(&mut graph);
        let flow = solver.max_flow(SUPER_SOURCE, sink);
        let cut = solver.min_cut(SUPER_SOURCE);

        let pixel_count = self.image.width() * self.image.height();
        let foreground: Vec<bool> = (0..pixel_count)
            .map(|i| cut.is_source_side(NodeId::new(i as i64)))
            .collect();

        let segmentation = Segmentation {
            threshold: self.threshold,
            flow,
            cut,
            foreground,
        };

        info!(
            width = self.image.width(),
            height = self.image.height(),
            threshold = self.threshold,
            flow = segmentation.flow.value,
            foreground = segmentation.foreground_count(),
            "图像分割完成"
        );

        segmentation
    }

    /// 背景灰度
    pub fn background(&self) -> u32 {
        self.config.background.unwrap_or(self.image.max_value())
    }

    /// 写出分割后的图像
    pub fn write<P: AsRef<Path>>(&self, segmentation: &Segmentation, path: P) -> Result<()> {
        self.image.write_segmented_to_path(
            path,
            &segmentation.foreground,
            &self.config.comment,
            self.background(),
        )
    }
}

/// 读取 PGM、分割并写出结果
pub fn segment_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: SegmentationConfig,
) -> Result<Segmentation> {
    let image = PgmImage::from_path(input)?;
    let segmenter = Segmenter::new(&image, config)?;
    let segmentation = segmenter.segment();
    segmenter.write(&segmentation, output)?;
    Ok(segmentation)
}
