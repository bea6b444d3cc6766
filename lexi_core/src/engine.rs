use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::definition;
use crate::error::LoadError;
use crate::lexicon::{Lexicon, Vocabulary};
use crate::model::{Found, SearchResult, SuggestionList};
use crate::ranker::{DEFAULT_MAX_RESULTS, DEFAULT_MIN_SCORE, Ranker, SequenceRanker};
use crate::source::ByteSource;

/// 建议词相关配置（可从宿主的 JSON 配置中读取）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// 建议词数量上限
    pub max_results: usize,
    /// 相似度下限，范围 [0, 1]
    pub min_score: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

/// 引擎状态：是否已经有可用的词典快照。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Empty,
    Loaded,
}

/// 查词引擎：负责把查询词转成 `SearchResult`。
///
/// 流水线：
/// - lexicon（精确查找） -> definition（格式化） -> `Found`
/// - 未命中：ranker（相似度打分） -> filter（排序/去重/截断） -> `Suggested` / `NotFound`
///
/// 引擎是 `Send + Sync` 的：`reload` 可以放在后台线程执行，其他线程同时 `search`。
pub struct LookupEngine<R = SequenceRanker> {
    /// 词典（当前快照）
    lexicon: Lexicon,
    /// 未命中时的候选打分器
    ranker: R,
    config: SearchConfig,
    /// 最近一次精确命中（供宿主重新展示/朗读）
    last_found: Mutex<Option<Found>>,
}

impl LookupEngine<SequenceRanker> {
    pub fn new() -> Self {
        Self::with_ranker(SequenceRanker)
    }
}

impl Default for LookupEngine<SequenceRanker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> LookupEngine<R>
where
    R: Ranker,
{
    pub fn with_ranker(ranker: R) -> Self {
        Self {
            lexicon: Lexicon::new(),
            ranker,
            config: SearchConfig::default(),
            last_found: Mutex::new(None),
        }
    }

    /// 设置建议词数量上限；0 表示从不给出建议。
    pub fn max_results(mut self, n: usize) -> Self {
        self.config.max_results = n;
        self
    }

    /// 设置相似度下限；超出 [0, 1] 的值在打分时会被钳制。
    pub fn min_score(mut self, score: f64) -> Self {
        self.config.min_score = score;
        self
    }

    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// 为 true 时，加载到空词典视为 `LoadError::Empty`。
    pub fn require_non_empty(mut self, yes: bool) -> Self {
        self.lexicon = self.lexicon.require_non_empty(yes);
        self
    }

    pub fn search_config(&self) -> SearchConfig {
        self.config
    }

    pub fn state(&self) -> EngineState {
        if self.lexicon.is_loaded() {
            EngineState::Loaded
        } else {
            EngineState::Empty
        }
    }

    /// 用新字节替换词典；失败时保留旧快照与状态。
    pub fn reload(&self, raw: &[u8]) -> Result<(), LoadError> {
        let snapshot = self.lexicon.load(raw)?;
        debug!(words = snapshot.len(), "lexicon snapshot replaced");
        Ok(())
    }

    /// 从字节来源读取并重载。
    pub fn reload_from(&self, source: &dyn ByteSource) -> Result<(), LoadError> {
        let raw = source.read_bytes()?;
        self.reload(&raw)
    }

    /// 查词：精确命中则格式化释义，否则给出相近候选。
    ///
    /// 查询词按原样使用（区分大小写）；大小写策略由宿主决定。
    pub fn search(&self, word: &str) -> SearchResult {
        // 整次查询只用这一份快照，重载不会影响进行中的查询。
        let Some(snapshot) = self.lexicon.snapshot() else {
            return SearchResult::NotFound;
        };

        if let Some(value) = snapshot.lookup(word) {
            let found = Found {
                word: word.to_owned(),
                definition: definition::format(value),
            };
            *self.last_found_slot() = Some(found.clone());
            return SearchResult::Found(found);
        }

        let suggestions = self.ranker.rank(
            word,
            snapshot.vocabulary(),
            self.config.max_results,
            self.config.min_score,
        );
        if suggestions.is_empty() {
            SearchResult::NotFound
        } else {
            SearchResult::Suggested(SuggestionList::new(suggestions))
        }
    }

    /// 最近一次精确命中；`Suggested`/`NotFound` 不会覆盖它。
    pub fn last_found(&self) -> Option<Found> {
        self.last_found_slot().clone()
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.lexicon.vocabulary()
    }

    /// 自动补全用的前缀候选（大小写不敏感）。
    pub fn completions(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.lexicon
            .snapshot()
            .map(|snapshot| {
                snapshot
                    .completions(prefix, limit)
                    .into_iter()
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn last_found_slot(&self) -> std::sync::MutexGuard<'_, Option<Found>> {
        self.last_found.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
