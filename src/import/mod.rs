//! 数据导入模块
//!
//! 从邻接表文本构建图。第 i 行（从 0 开始）列出节点 i 的出边，
//! 格式为若干 `<邻居ID> <权重>` 对，空行表示没有出边：
//!
//! ```text
//! 1 3 2 6 3 8
//! 2 2
//!
//! ```
//!
//! 行首可以带 `i:` 形式的标签，此时以标签作为出边起点。

use crate::error::Result;
use crate::graph::{Capacity, Graph, NodeId};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub lines_read: usize,
    pub edges_imported: usize,
    /// 因格式错误被丢弃的 token 数
    pub tokens_skipped: usize,
    pub duration_ms: u64,
}

/// 邻接表导入器
pub struct AdjacencyListImporter {
    graph: Graph,
    stats: ImportStats,
    /// 出现过的最大节点 ID
    max_id: Option<i64>,
}

impl AdjacencyListImporter {
    /// 创建导入器
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            stats: ImportStats::default(),
            max_id: None,
        }
    }

    /// 从文件导入
    pub fn import_file<P: AsRef<Path>>(mut self, path: P) -> Result<(Graph, ImportStats)> {
        let start = std::time::Instant::now();
        let file = File::open(path.as_ref())?;
        self.import_reader(BufReader::new(file))?;
        self.stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            path = %path.as_ref().display(),
            lines = self.stats.lines_read,
            edges = self.stats.edges_imported,
            "邻接表导入完成"
        );
        Ok(self.finish())
    }

    /// 逐行读取
    pub fn import_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in reader.lines() {
            self.import_line(&line?);
        }
        Ok(())
    }

    /// 导入一行，行号即当前已读行数
    pub fn import_line(&mut self, line: &str) {
        let line_no = self.stats.lines_read;
        self.stats.lines_read += 1;

        let mut tokens = line.split_whitespace().peekable();

        let mut from = line_no as i64;
        if let Some(label) = tokens.peek().copied().and_then(|t| t.strip_suffix(':')) {
            match label.parse::<i64>() {
                Ok(id) if id >= 0 => {
                    from = id;
                    tokens.next();
                }
                _ => {}
            }
        }
        self.register(from);

        while let Some(token) = tokens.next() {
            let neighbor = match token.parse::<i64>() {
                Ok(id) if id >= 0 => id,
                _ => {
                    self.skip_rest(line_no, token, tokens.by_ref().count() + 1);
                    return;
                }
            };

            // 缺少权重时整条边都不添加
            let weight = match tokens.next().map(|t| (t, t.parse::<Capacity>())) {
                Some((_, Ok(weight))) => weight,
                Some((token, Err(_))) => {
                    self.skip_rest(line_no, token, tokens.by_ref().count() + 2);
                    return;
                }
                None => {
                    self.skip_rest(line_no, token, 1);
                    return;
                }
            };

            self.register(neighbor);
            // 零容量边不可增广，只登记节点
            if weight > 0 {
                self.graph.add_edge(from, neighbor, weight);
                self.stats.edges_imported += 1;
            }
        }
    }

    fn register(&mut self, id: i64) {
        self.graph.add_node(id);
        self.max_id = Some(self.max_id.map_or(id, |max| max.max(id)));
    }

    fn skip_rest(&mut self, line_no: usize, token: &str, skipped: usize) {
        debug!(line = line_no, token, skipped, "邻接表格式错误，忽略该行剩余内容");
        self.stats.tokens_skipped += skipped;
    }

    /// 补齐 0..=max_id 之间的所有节点，返回图和统计
    pub fn finish(mut self) -> (Graph, ImportStats) {
        if let Some(max_id) = self.max_id {
            for id in 0..=max_id {
                self.graph.add_node(NodeId::new(id));
            }
        }
        (self.graph, self.stats)
    }
}

impl Default for AdjacencyListImporter {
    fn default() -> Self {
        Self::new()
    }
}

/// 从邻接表文件构建图
pub fn graph_from_file<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let (graph, _) = AdjacencyListImporter::new().import_file(path)?;
    Ok(graph)
}

/// 从邻接表文本构建图
pub fn graph_from_str(text: &str) -> Graph {
    let mut importer = AdjacencyListImporter::new();
    for line in text.lines() {
        importer.import_line(line);
    }
    importer.finish().0
}
