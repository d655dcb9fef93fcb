//! FlowCut 命令行工具
//!
//! - `-b <文件> <起点> <终点...>`  BFS 最短增广路径
//! - `-f <文件> [<源点> <汇点>]`   最大流
//! - `-i <输入.pgm> <输出.pgm>`    图像分割

use anyhow::{bail, Context, Result};
use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser, ValueEnum};
use flowcut::algorithm::{EdmondsKarp, PathFinder, PathResult};
use flowcut::cli::{PrintMode, Printer};
use flowcut::graph::{Graph, NodeId};
use flowcut::image::{segment_file, SegmentationConfig};
use flowcut::import::graph_from_file;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowcut", version)]
#[command(about = "最大流 / 最小割与 PGM 图像分割")]
#[command(group(ArgGroup::new("mode").required(true).args(["bfs", "flow", "image"])))]
struct Args {
    /// 广度优先搜索: <文件> <起点> <终点...>
    #[arg(short = 'b', long = "bfs", num_args = 3.., value_names = ["FILE", "START", "END"])]
    bfs: Option<Vec<String>>,

    /// 最大流: <文件> [<源点> <汇点>]，默认源点 0、汇点为最后一个节点
    #[arg(short = 'f', long = "flow", num_args = 1..=3, value_names = ["FILE", "SOURCE", "SINK"])]
    flow: Option<Vec<String>>,

    /// 图像分割: <输入.pgm> <输出.pgm>
    #[arg(short = 'i', long = "image", num_args = 2, value_names = ["INPUT", "OUTPUT"])]
    image: Option<Vec<PathBuf>>,

    /// 输出格式
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// 分割配置文件 (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// 覆盖自动计算的分割阈值
    #[arg(long)]
    threshold: Option<u32>,

    /// 求解前打印邻接表
    #[arg(long)]
    print_graph: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Vertical,
    Json,
}

impl From<OutputFormat> for PrintMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => PrintMode::Table,
            OutputFormat::Vertical => PrintMode::Vertical,
            OutputFormat::Json => PrintMode::Json,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let printer = Printer::new(args.format.into());

    if let Some(values) = &args.bfs {
        run_bfs(&args, values, &printer)
    } else if let Some(values) = &args.flow {
        run_flow(&args, values, &printer)
    } else if let Some(paths) = &args.image {
        run_image(&args, paths, &printer)
    } else {
        usage_error(ErrorKind::MissingRequiredArgument, "需要指定 -b、-f 或 -i 之一")
    }
}

fn run_bfs(args: &Args, values: &[String], printer: &Printer) -> Result<()> {
    let graph = load_graph(&values[0], args.print_graph)?;
    let start = parse_node(&values[1], "起点");

    let finder = PathFinder::new(&graph);
    let results: Vec<(NodeId, PathResult)> = values[2..]
        .iter()
        .map(|value| {
            let end = parse_node(value, "终点");
            (end, finder.shortest_augmenting_path(start, end))
        })
        .collect();

    println!("{}", printer.print_paths(start, &results)?);
    Ok(())
}

fn run_flow(args: &Args, values: &[String], printer: &Printer) -> Result<()> {
    if values.len() == 2 {
        usage_error(ErrorKind::WrongNumberOfValues, "源点和汇点必须同时指定");
    }

    let mut graph = load_graph(&values[0], args.print_graph)?;
    if graph.node_count() == 0 {
        bail!("图为空: {}", values[0]);
    }

    let (source, sink) = match values {
        [_, source, sink] => (parse_node(source, "源点"), parse_node(sink, "汇点")),
        _ => (NodeId::new(0), NodeId::new(graph.node_count() as i64 - 1)),
    };

    let flow = EdmondsKarp::new(&mut graph).max_flow(source, sink);
    println!("{}", printer.print_max_flow(&flow)?);
    Ok(())
}

fn run_image(args: &Args, paths: &[PathBuf], printer: &Printer) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SegmentationConfig::from_path(path)
            .with_context(|| format!("无法加载配置: {}", path.display()))?,
        None => SegmentationConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.threshold = Some(threshold);
    }

    let (input, output) = (&paths[0], &paths[1]);
    let segmentation = segment_file(input, output, config)
        .with_context(|| format!("分割失败: {} -> {}", input.display(), output.display()))?;

    println!("{}", printer.print_segmentation(&segmentation)?);
    Ok(())
}

fn load_graph(path: &str, print: bool) -> Result<Graph> {
    let graph = graph_from_file(path).with_context(|| format!("无法读取图文件: {}", path))?;
    if print {
        eprint!("{}", graph);
    }
    Ok(graph)
}

fn parse_node(value: &str, name: &str) -> NodeId {
    match value.parse::<i64>() {
        Ok(id) => NodeId::new(id),
        Err(_) => usage_error(ErrorKind::InvalidValue, &format!("无效的{}: {}", name, value)),
    }
}

/// 打印用法错误并以非零状态退出
fn usage_error(kind: ErrorKind, message: &str) -> ! {
    Args::command().error(kind, message).exit()
}
