use crate::error::LoadError;

/// 字节来源抽象：core 不关心词典来自文件/内存/网络。
///
/// 约定：
/// - 读取失败由实现方映射为 `LoadError::Unreadable`
/// - core 只消费返回的字节，自身不做任何 I/O
pub trait ByteSource: Send + Sync {
    /// 读出完整的词典字节。
    fn read_bytes(&self) -> Result<Vec<u8>, LoadError>;

    /// 展示用的来源描述（例如文件路径）。
    fn describe(&self) -> String {
        String::from("<bytes>")
    }
}
