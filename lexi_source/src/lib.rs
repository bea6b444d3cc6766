use std::{
    fs,
    path::{Path, PathBuf},
};

use lexi_core::{LoadError, LookupEngine, SearchConfig, source::ByteSource};
use tracing::{debug, info};

/// JSON 词典文件（简化版）：
///
/// - 顶层对象：`{"word": <definition>, ...}`
/// - definition 可以是字符串、`{"label": "text"}` 对象或字符串数组
///
/// 这里只负责把文件读成字节；解析交给 `lexi_core`。
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileSource {
    fn read_bytes(&self) -> Result<Vec<u8>, LoadError> {
        let bytes = fs::read(&self.path).map_err(|source| LoadError::Unreadable {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "read dictionary source");
        Ok(bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// 内存中的词典字节（测试或内嵌词典用）。
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    bytes: Vec<u8>,
}

impl InMemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl ByteSource for InMemorySource {
    fn read_bytes(&self) -> Result<Vec<u8>, LoadError> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.bytes.len())
    }
}

/// 读取 `path` 并构建一个已加载的引擎。
pub fn open_engine(path: impl AsRef<Path>, config: SearchConfig) -> Result<LookupEngine, LoadError> {
    let source = FileSource::new(path.as_ref());
    let engine = LookupEngine::new().config(config);
    engine.reload_from(&source)?;
    info!(
        source = %source.describe(),
        words = engine.vocabulary().len(),
        "dictionary loaded"
    );
    Ok(engine)
}
