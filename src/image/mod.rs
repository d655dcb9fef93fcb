//! 图像分割模块
//!
//! PGM 读写以及基于最小割的前景/背景分割

mod pgm;
mod segment;

pub use pgm::PgmImage;
pub use segment::{segment_file, Segmentation, SegmentationConfig, Segmenter, SUPER_SOURCE};
