//! PGM (P2, ASCII) 灰度图读写

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::warn;

/// 灰度图，像素按行优先存储
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgmImage {
    width: usize,
    height: usize,
    max_value: u32,
    pixels: Vec<u32>,
}

impl PgmImage {
    /// 由像素矩阵创建图像
    pub fn new(width: usize, height: usize, max_value: u32, pixels: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::PgmFormat(format!("图像尺寸无效: {}x{}", width, height)));
        }
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(Error::PgmFormat(format!(
                "像素数量应为 {}, 实际为 {}",
                expected,
                pixels.len()
            )));
        }
        if let Some(&pixel) = pixels.iter().find(|&&p| p > max_value) {
            return Err(Error::PgmFormat(format!(
                "像素值 {} 超过最大值 {}",
                pixel, max_value
            )));
        }

        Ok(Self {
            width,
            height,
            max_value,
            pixels,
        })
    }

    /// 从文件读取
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// 从任意输入读取
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// 解析 P2 文本，`#` 到行尾为注释
    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = text
            .lines()
            .flat_map(|line| line.split('#').next().unwrap_or("").split_whitespace());

        match tokens.next() {
            Some("P2") => {}
            Some(magic) => {
                return Err(Error::PgmFormat(format!("不支持的格式: {}，只支持 P2", magic)))
            }
            None => return Err(Error::PgmFormat("文件为空".to_string())),
        }

        let width: usize = parse_header_field(tokens.next(), "宽度")?;
        let height: usize = parse_header_field(tokens.next(), "高度")?;
        let max_value: u32 = parse_header_field(tokens.next(), "最大灰度值")?;

        let expected = pixel_count(width, height)?;
        // 每个像素至少占两个字符，头部声明的尺寸不可信
        let mut pixels = Vec::with_capacity(expected.min(text.len() / 2 + 1));
        for token in tokens.by_ref().take(expected) {
            let pixel = token
                .parse::<u32>()
                .map_err(|_| Error::PgmFormat(format!("无效的像素值: {}", token)))?;
            pixels.push(pixel);
        }

        if pixels.len() < expected {
            return Err(Error::PgmFormat(format!(
                "像素数据不足: 期望 {}, 实际 {}",
                expected,
                pixels.len()
            )));
        }

        let extra = tokens.count();
        if extra > 0 {
            warn!(extra, "PGM 像素数据之后有多余内容，已忽略");
        }

        Self::new(width, height, max_value, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// 像素 (x, y) 的灰度
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    /// 阈值 `|max - mean|`，均值取整数
    pub fn threshold(&self) -> u32 {
        let sum: u64 = self.pixels.iter().map(|&p| u64::from(p)).sum();
        let mean = sum / self.pixels.len() as u64;
        // mean 不超过 max_value
        self.max_value.abs_diff(mean as u32)
    }

    /// 相邻像素相似度 `|max - |a - b||`，越相似权重越大
    pub fn edge_weight(&self, a: u32, b: u32) -> u32 {
        self.max_value.abs_diff(a.abs_diff(b))
    }

    /// 写出分割结果：前景像素保留原值，背景像素写为 `background`
    pub fn write_segmented<W: Write>(
        &self,
        mut writer: W,
        foreground: &[bool],
        comment: &str,
        background: u32,
    ) -> Result<()> {
        writeln!(writer, "P2")?;
        if !comment.is_empty() {
            if comment.starts_with('#') {
                writeln!(writer, "{}", comment)?;
            } else {
                writeln!(writer, "# {}", comment)?;
            }
        }
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "{}", self.max_value)?;

        for (row, pixels) in self.pixels.chunks(self.width).enumerate() {
            for (x, &pixel) in pixels.iter().enumerate() {
                let keep = foreground
                    .get(row * self.width + x)
                    .copied()
                    .unwrap_or(false);
                write!(writer, "{} ", if keep { pixel } else { background })?;
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// 写出分割结果到文件
    pub fn write_segmented_to_path<P: AsRef<Path>>(
        &self,
        path: P,
        foreground: &[bool],
        comment: &str,
        background: u32,
    ) -> Result<()> {
        let file = File::create(path)?;
        self.write_segmented(BufWriter::new(file), foreground, comment, background)
    }
}

/// 像素总数，溢出视为格式错误
fn pixel_count(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .ok_or_else(|| Error::PgmFormat(format!("图像尺寸过大: {}x{}", width, height)))
}

fn parse_header_field<T: std::str::FromStr>(token: Option<&str>, name: &str) -> Result<T> {
    let token = token.ok_or_else(|| Error::PgmFormat(format!("缺少{}", name)))?;
    token
        .parse()
        .map_err(|_| Error::PgmFormat(format!("无效的{}: {}", name, token)))
}
