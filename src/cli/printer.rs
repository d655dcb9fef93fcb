//! 结果打印器
//!
//! 提供表格、垂直和 JSON 格式的结果输出

use crate::algorithm::{MaxFlow, PathResult};
use crate::error::Result;
use crate::graph::NodeId;
use crate::image::Segmentation;
use prettytable::{format, row, Cell, Row, Table};
use serde_json::json;

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
    /// JSON
    Json,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 打印 BFS 结果，每个终点一行
    pub fn print_paths(&self, start: NodeId, results: &[(NodeId, PathResult)]) -> Result<String> {
        if self.mode == PrintMode::Json {
            let entries: Vec<_> = results
                .iter()
                .map(|(end, result)| {
                    json!({
                        "start": start,
                        "end": end,
                        "path": result.path(),
                        "bottleneck": result.bottleneck(),
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&entries)?);
        }

        let columns = ["起点", "终点", "路径", "瓶颈容量"].map(String::from);
        let rows: Vec<Vec<String>> = results
            .iter()
            .map(|(end, result)| {
                let (path, bottleneck) = match result {
                    PathResult::Found { path, bottleneck } => (
                        path.iter()
                            .map(NodeId::to_string)
                            .collect::<Vec<_>>()
                            .join(" --> "),
                        bottleneck.to_string(),
                    ),
                    PathResult::NotFound => ("未找到路径".to_string(), "-".to_string()),
                };
                vec![start.to_string(), end.to_string(), path, bottleneck]
            })
            .collect();

        Ok(self.render(&columns, &rows))
    }

    /// 打印最大流结果
    pub fn print_max_flow(&self, flow: &MaxFlow) -> Result<String> {
        if self.mode == PrintMode::Json {
            return Ok(serde_json::to_string_pretty(flow)?);
        }

        let columns = ["源点", "汇点", "最大流", "增广次数"].map(String::from);
        let rows = vec![vec![
            flow.source.to_string(),
            flow.sink.to_string(),
            flow.value.to_string(),
            flow.augmentations.to_string(),
        ]];
        Ok(self.render(&columns, &rows))
    }

    /// 打印分割结果摘要
    pub fn print_segmentation(&self, segmentation: &Segmentation) -> Result<String> {
        if self.mode == PrintMode::Json {
            let summary = json!({
                "threshold": segmentation.threshold,
                "flow": segmentation.flow,
                "pixels": segmentation.foreground.len(),
                "foreground": segmentation.foreground_count(),
            });
            return Ok(serde_json::to_string_pretty(&summary)?);
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Threshold", segmentation.threshold.to_string()]);
        table.add_row(row!["Max Flow", segmentation.flow.value.to_string()]);
        table.add_row(row!["Pixels", segmentation.foreground.len().to_string()]);
        table.add_row(row!["Foreground", segmentation.foreground_count().to_string()]);
        Ok(table.to_string())
    }

    fn render(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        match self.mode {
            PrintMode::Vertical => self.format_vertical(columns, rows),
            _ => self.format_table(columns, rows),
        }
    }

    /// 表格格式
    fn format_table(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.chars().count()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }
}
