//! `lexicon`：词典快照与原子替换。
//!
//! 约定：
//! - `Snapshot` 一经构建不再修改；词表（vocabulary）与映射总是一起替换
//! - `Lexicon` 只在指针读取/替换时持锁，解析与查询都在锁外进行
//! - 加载失败不会动到当前快照

use std::{
    collections::HashMap,
    ops::Deref,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use serde_json::Value;

use crate::{error::LoadError, model::DefinitionValue};

/// 一份完整、一致的词典数据。
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: HashMap<String, DefinitionValue>,
    /// 按首次出现顺序排列的去重词表
    vocabulary: Vec<String>,
}

impl Snapshot {
    /// 从 JSON 字节构建快照：顶层必须是对象，值为字符串 / 字符串对象 / 字符串数组。
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let document: Value = serde_json::from_slice(bytes)?;
        let Value::Object(map) = document else {
            return Err(LoadError::malformed(format!(
                "top level must be an object of words, found {}",
                kind_of(&document)
            )));
        };

        let mut entries = HashMap::with_capacity(map.len());
        let mut vocabulary = Vec::with_capacity(map.len());
        for (word, value) in map {
            if word.is_empty() {
                return Err(LoadError::malformed("entry with an empty word"));
            }
            let definition = definition_from_json(&word, value)?;
            vocabulary.push(word.clone());
            entries.insert(word, definition);
        }
        Ok(Self {
            entries,
            vocabulary,
        })
    }

    pub fn lookup(&self, word: &str) -> Option<&DefinitionValue> {
        self.entries.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// 前缀补全：大小写不敏感，按词表顺序，最多 `limit` 条。
    pub fn completions(&self, prefix: &str, limit: usize) -> Vec<&str> {
        if prefix.is_empty() || limit == 0 {
            return Vec::new();
        }
        let prefix = prefix.to_lowercase();
        self.vocabulary
            .iter()
            .filter(|word| word.to_lowercase().starts_with(&prefix))
            .take(limit)
            .map(String::as_str)
            .collect()
    }
}

fn definition_from_json(word: &str, value: Value) -> Result<DefinitionValue, LoadError> {
    match value {
        Value::String(text) => Ok(DefinitionValue::Text(text)),
        Value::Object(senses) => senses
            .into_iter()
            .map(|(label, text)| match text {
                Value::String(text) => Ok((label, text)),
                other => Err(LoadError::malformed(format!(
                    "sense {label:?} of {word:?} must be a string, found {}",
                    kind_of(&other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(DefinitionValue::Senses),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => Ok(text),
                other => Err(LoadError::malformed(format!(
                    "definition list of {word:?} must hold strings, found {}",
                    kind_of(&other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(DefinitionValue::List),
        other => Err(LoadError::malformed(format!(
            "definition of {word:?} must be a string, object or array, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// 当前快照的只读词表视图（持有快照引用，替换后依旧有效）。
#[derive(Debug, Clone, Default)]
pub struct Vocabulary(Option<Arc<Snapshot>>);

impl Deref for Vocabulary {
    type Target = [String];

    fn deref(&self) -> &[String] {
        self.0.as_deref().map_or(&[], Snapshot::vocabulary)
    }
}

/// 词典：独占当前快照，提供原子重载。
#[derive(Debug, Default)]
pub struct Lexicon {
    current: RwLock<Option<Arc<Snapshot>>>,
    /// 为 true 时，空词典视为加载失败
    require_non_empty: bool,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_non_empty(mut self, yes: bool) -> Self {
        self.require_non_empty = yes;
        self
    }

    /// 解析 `raw` 并在完全成功后替换当前快照。
    pub fn load(&self, raw: &[u8]) -> Result<Arc<Snapshot>, LoadError> {
        let snapshot = Arc::new(Snapshot::from_json_slice(raw)?);
        if self.require_non_empty && snapshot.is_empty() {
            return Err(LoadError::Empty);
        }
        *self.write() = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// 当前快照；尚未加载时为 `None`。
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.read().is_some()
    }

    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary(self.snapshot())
    }

    /// 精确匹配，不做任何大小写归一。
    pub fn lookup(&self, word: &str) -> Option<DefinitionValue> {
        self.snapshot()?.lookup(word).cloned()
    }

    // 锁里只有一个指针，panic 也不会留下半更新的数据，直接取回即可。
    fn read(&self) -> RwLockReadGuard<'_, Option<Arc<Snapshot>>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Arc<Snapshot>>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}
