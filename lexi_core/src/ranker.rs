//! `ranker`：未精确命中时，从词表里挑出最相近的候选词。
//!
//! 当前实现：
//! - `SequenceRanker`：基于 `similarity::QueryMatcher` 的相似度打分
//!   - 先用两个便宜的上界（长度、字符多重集）剪掉不可能过线的词
//!   - 再算完整相似度，低于 cutoff 的丢弃
//!   - 最后交给 `DedupSortTruncate` 排序/去重/截断

use crate::{
    filter::{DedupSortTruncate, Filter},
    model::Suggestion,
    similarity::QueryMatcher,
};

/// 默认候选数量上限。
pub const DEFAULT_MAX_RESULTS: usize = 3;
/// 默认相似度下限。
pub const DEFAULT_MIN_SCORE: f64 = 0.6;

/// Ranker：给查询词在词表中找相近候选。
pub trait Ranker: Send + Sync {
    fn rank(
        &self,
        query: &str,
        vocabulary: &[String],
        max_results: usize,
        min_score: f64,
    ) -> Vec<Suggestion>;
}

/// 序列相似度 ranker。
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceRanker;

impl Ranker for SequenceRanker {
    fn rank(
        &self,
        query: &str,
        vocabulary: &[String],
        max_results: usize,
        min_score: f64,
    ) -> Vec<Suggestion> {
        if max_results == 0 {
            return Vec::new();
        }
        let cutoff = clamp_cutoff(min_score);
        let matcher = QueryMatcher::new(query);

        let mut out = Vec::new();
        let mut candidate: Vec<char> = Vec::new();
        for word in vocabulary {
            candidate.clear();
            candidate.extend(word.chars());
            if matcher.real_quick_ratio(&candidate) < cutoff
                || matcher.quick_ratio(&candidate) < cutoff
            {
                continue;
            }
            let score = matcher.ratio(&candidate);
            if score >= cutoff {
                out.push(Suggestion {
                    word: word.clone(),
                    score,
                });
            }
        }

        DedupSortTruncate { limit: max_results }.apply(out)
    }
}

/// 便捷函数：用 `SequenceRanker` 打分。
pub fn suggest(
    query: &str,
    vocabulary: &[String],
    max_results: usize,
    min_score: f64,
) -> Vec<Suggestion> {
    SequenceRanker.rank(query, vocabulary, max_results, min_score)
}

/// cutoff 限制在 [0, 1]；NaN 当作 0。
fn clamp_cutoff(min_score: f64) -> f64 {
    if min_score.is_nan() {
        0.0
    } else {
        min_score.clamp(0.0, 1.0)
    }
}
