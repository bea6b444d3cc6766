/// 词条的原始释义（加载时一次性判定形状，之后不再做运行时类型判断）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionValue {
    /// 单个字符串，内部可能带有 "1. "、"2. " 这样的编号分段
    Text(String),
    /// 有序的 义项标签 -> 义项文本（保持 JSON 中的插入顺序）
    Senses(Vec<(String, String)>),
    /// 字符串数组，每一项是一个义项
    List(Vec<String>),
}

impl From<&str> for DefinitionValue {
    fn from(text: &str) -> Self {
        DefinitionValue::Text(text.to_owned())
    }
}

/// 精确命中：查询词与格式化后的释义。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub word: String,
    /// 形如 `"\n1. …\n2. …"` 的展示文本
    pub definition: String,
}

/// 候选建议词（可被 UI 展示与点击）。
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// 词表中的原词
    pub word: String,
    /// 相似度，范围 [0, 1]，越大越靠前
    pub score: f64,
}

/// 按相似度降序排列、去重、且不超过上限的建议列表。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionList(Vec<Suggestion>);

impl SuggestionList {
    pub fn new(suggestions: Vec<Suggestion>) -> Self {
        Self(suggestions)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.word.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Suggestion> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Suggestion> {
        self.0
    }
}

impl IntoIterator for SuggestionList {
    type Item = Suggestion;
    type IntoIter = std::vec::IntoIter<Suggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SuggestionList {
    type Item = &'a Suggestion;
    type IntoIter = std::slice::Iter<'a, Suggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// 引擎给宿主的查询结果。
///
/// 约定：
/// - `Found`：精确命中，释义已格式化
/// - `Suggested`：未命中，但有相似度过线的候选词
/// - `NotFound`：未命中且没有候选（或尚未加载词典）
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Found(Found),
    Suggested(SuggestionList),
    NotFound,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }
}
