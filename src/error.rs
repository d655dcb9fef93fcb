//! 错误类型定义
//!
//! 算法层面的情况（无增广路径、端点非法）不是错误，通过返回值表达；
//! 这里只覆盖输入输出和文件格式问题。

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("PGM 格式错误: {0}")]
    PgmFormat(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("序列化错误: {0}")]
    SerializationError(#[from] serde_json::Error),
}
