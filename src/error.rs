//! 错误类型
//!
//! 整条流水线只运行一次，任何错误都会中止本次运行，不做重试。

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("读取文件失败 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("解析TSV数据失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("标签不在 label2id 映射中: {0}")]
    UnknownLabel(String),

    #[error("配置无效: {0}")]
    InvalidConfig(String),

    #[error("解析配置文件失败: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("加载用户词典失败: {0}")]
    UserDict(String),

    #[error("词表缓存损坏 ({}): {reason}", .path.display())]
    CorruptCache { path: PathBuf, reason: String },

    #[error(
        "词表缓存与当前语料不一致 ({}): 缓存指纹 {cached}, 语料指纹 {current}",
        .path.display()
    )]
    StaleCache {
        path: PathBuf,
        cached: String,
        current: String,
    },

    #[error("序列化词表缓存失败: {0}")]
    CacheEncode(#[from] bincode::error::EncodeError),
}

impl PrepError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrepError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PrepError>;
