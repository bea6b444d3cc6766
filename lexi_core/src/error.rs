//! 词典加载错误。

use std::{io, path::PathBuf};

use thiserror::Error;

/// 加载词典时可能出现的错误；`search` 本身从不失败。
#[derive(Debug, Error)]
pub enum LoadError {
    /// 字节不是合法 JSON，或顶层/词条形状不是“词 -> 释义”映射。
    #[error("dictionary data is malformed: {reason}")]
    Malformed { reason: String },

    /// 字节来源（由宿主提供）读取失败，例如文件不存在或无权限。
    #[error("dictionary source {} is unreadable: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 解析成功但词典为空（仅在要求非空词典时返回）。
    #[error("dictionary contains no entries")]
    Empty,
}

impl LoadError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        LoadError::Malformed {
            reason: reason.into(),
        }
    }

    /// 失败是否来自字节来源（而不是数据本身）。
    pub fn is_unreadable(&self) -> bool {
        matches!(self, LoadError::Unreadable { .. })
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(error: serde_json::Error) -> Self {
        LoadError::malformed(error.to_string())
    }
}
