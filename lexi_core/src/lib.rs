//! `lexi_core`：查词引擎的纯逻辑层，不做任何文件/网络 I/O。
//!
//! 设计目标：
//! - **核心可复用**：CLI/GUI/服务端都能复用同一套查词逻辑
//! - **分层清晰**：source（字节）-> lexicon（快照）-> engine（编排）-> definition / ranker -> filter -> 输出（`SearchResult`）
//! - **快照替换**：重新加载词典时整体替换快照，读者永远看不到“半更新”的词表
pub mod definition;
pub mod engine;
pub mod error;
pub mod filter;
pub mod lexicon;
pub mod model;
pub mod ranker;
pub mod similarity;
pub mod source;

pub use engine::{EngineState, LookupEngine, SearchConfig};
pub use error::LoadError;
pub use lexicon::{Lexicon, Snapshot};
pub use model::{DefinitionValue, Found, SearchResult, Suggestion, SuggestionList};
