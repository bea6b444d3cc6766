//! `filter`：候选后处理（排序/去重/裁剪）。

use std::collections::HashSet;

use crate::model::Suggestion;

/// Filter：对候选列表做后处理。
pub trait Filter: Send + Sync {
    fn apply(&self, suggestions: Vec<Suggestion>) -> Vec<Suggestion>;
}

/// 默认 filter：按 score 倒序稳定排序（同分保持词表顺序），按 word 去重，截断到 limit。
pub struct DedupSortTruncate {
    pub limit: usize,
}

impl Filter for DedupSortTruncate {
    fn apply(&self, mut suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
        if self.limit == 0 {
            return Vec::new();
        }
        suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
        let mut seen = HashSet::new();
        suggestions.retain(|s| seen.insert(s.word.clone()));
        suggestions.truncate(self.limit);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(word: &str, score: f64) -> Suggestion {
        Suggestion {
            word: word.to_owned(),
            score,
        }
    }

    fn words(list: &[Suggestion]) -> Vec<&str> {
        list.iter().map(|s| s.word.as_str()).collect()
    }

    #[test]
    fn ties_keep_input_order() {
        let out = DedupSortTruncate { limit: 3 }.apply(vec![
            s("b", 0.7),
            s("a", 0.9),
            s("c", 0.7),
            s("d", 0.7),
        ]);
        assert_eq!(words(&out), ["a", "b", "c"]);
    }

    #[test]
    fn duplicates_collapse_to_first() {
        let out = DedupSortTruncate { limit: 5 }.apply(vec![
            s("pot", 0.8),
            s("dot", 0.6),
            s("pot", 0.8),
        ]);
        assert_eq!(words(&out), ["pot", "dot"]);
    }

    #[test]
    fn zero_limit_is_empty() {
        assert!(DedupSortTruncate { limit: 0 }.apply(vec![s("a", 1.0)]).is_empty());
    }
}
