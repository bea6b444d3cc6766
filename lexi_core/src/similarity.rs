//! `similarity`：基于“最长匹配块”的序列相似度。
//!
//! 相似度 = `2·M / (|a| + |b|)`，`M` 是递归求最长公共连续块得到的匹配字符总数
//! （先找最长块，再对其左右两侧分别递归）。按 Unicode 标量值比较，不做任何归一化。
//!
//! 查询串只预处理一次（`QueryMatcher`），然后依次与词表中的每个候选词比较。

use std::collections::HashMap;

/// 查询串长度达到该值时启用“高频字符”启发式。
const POPULAR_MIN_LEN: usize = 200;

/// 预处理后的查询串。
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    chars: Vec<char>,
    /// 字符 -> 在查询串中出现的位置（升序）；高频字符不在其中
    positions: HashMap<char, Vec<usize>>,
    /// 字符 -> 出现次数（含高频字符），供 `quick_ratio` 使用
    counts: HashMap<char, usize>,
}

impl QueryMatcher {
    pub fn new(query: &str) -> Self {
        let chars: Vec<char> = query.chars().collect();
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        let mut counts: HashMap<char, usize> = HashMap::new();
        for (j, &ch) in chars.iter().enumerate() {
            positions.entry(ch).or_default().push(j);
            *counts.entry(ch).or_default() += 1;
        }

        // 长串里出现过于频繁的字符不作为匹配起点（仍可用于向两侧延伸）。
        let n = chars.len();
        if n >= POPULAR_MIN_LEN {
            let threshold = n / 100 + 1;
            positions.retain(|_, idxs| idxs.len() <= threshold);
        }

        Self {
            chars,
            positions,
            counts,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// 完整相似度。
    pub fn ratio(&self, candidate: &[char]) -> f64 {
        score(self.matching_chars(candidate), candidate.len() + self.chars.len())
    }

    /// 字符多重集交集给出的上界（不小于 `ratio`）。
    pub fn quick_ratio(&self, candidate: &[char]) -> f64 {
        let mut avail: HashMap<char, isize> = HashMap::new();
        let mut matches = 0;
        for &ch in candidate {
            let left = avail
                .entry(ch)
                .or_insert_with(|| self.counts.get(&ch).copied().unwrap_or(0) as isize);
            if *left > 0 {
                matches += 1;
            }
            *left -= 1;
        }
        score(matches, candidate.len() + self.chars.len())
    }

    /// 只看长度的上界（不小于 `quick_ratio`）。
    pub fn real_quick_ratio(&self, candidate: &[char]) -> f64 {
        let (la, lb) = (candidate.len(), self.chars.len());
        score(la.min(lb), la + lb)
    }

    /// 所有匹配块的字符总数。
    pub fn matching_chars(&self, a: &[char]) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, a.len(), 0, self.chars.len())];
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.longest_match(a, alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }
        total
    }

    /// `a[alo..ahi]` 与查询串 `[blo..bhi]` 中最长的公共连续块 `(i, j, k)`。
    ///
    /// 多个同长块时取 `a` 中最靠前的，再取查询串中最靠前的。
    fn longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let b = &self.chars;
        let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);

        // j2len[j]：以 a[i-1] 与 b[j] 结尾的匹配长度
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(idxs) = self.positions.get(ch) {
                for &j in idxs {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = if j > 0 {
                        j2len.get(&(j - 1)).copied().unwrap_or(0)
                    } else {
                        0
                    };
                    let k = prev + 1;
                    next.insert(j, k);
                    if k > best_k {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_k = k;
                    }
                }
            }
            j2len = next;
        }

        // 高频字符不参与起点，但相邻的相同字符仍然算进匹配块。
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_k += 1;
        }
        while best_i + best_k < ahi
            && best_j + best_k < bhi
            && a[best_i + best_k] == b[best_j + best_k]
        {
            best_k += 1;
        }

        (best_i, best_j, best_k)
    }
}

fn score(matches: usize, length: usize) -> f64 {
    if length == 0 {
        1.0
    } else {
        2.0 * matches as f64 / length as f64
    }
}

/// 两个字符串的相似度，范围 [0, 1]。
pub fn ratio(a: &str, b: &str) -> f64 {
    let candidate: Vec<char> = a.chars().collect();
    QueryMatcher::new(b).ratio(&candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical_and_disjoint() {
        assert!(close(ratio("pot", "pot"), 1.0));
        assert!(close(ratio("abc", "xyz"), 0.0));
        assert!(close(ratio("", ""), 1.0));
        assert!(close(ratio("", "abc"), 0.0));
    }

    #[test]
    fn known_ratios() {
        assert!(close(ratio("abcd", "bcde"), 0.75));
        assert!(close(ratio("pot", "pott"), 6.0 / 7.0));
        assert!(close(ratio("pit", "pott"), 4.0 / 7.0));
        assert!(close(ratio("dot", "pott"), 4.0 / 7.0));
        assert!(close(ratio("apple", "appel"), 0.8));
        assert!(close(ratio("ape", "appel"), 0.75));
        assert!(close(ratio("puppy", "appel"), 0.4));
    }

    #[test]
    fn compares_unicode_scalars_not_bytes() {
        assert!(close(ratio("café", "cafe"), 0.75));
        assert!(close(ratio("中文", "中文字"), 0.8));
    }

    #[test]
    fn no_implicit_case_folding() {
        assert!(close(ratio("Pot", "pot"), 2.0 * 2.0 / 6.0));
    }

    #[test]
    fn bounds_never_undercut_ratio() {
        let words = ["pot", "pottery", "top", "", "opt", "tpo", "potato"];
        for query in words {
            let matcher = QueryMatcher::new(query);
            for word in words {
                let candidate: Vec<char> = word.chars().collect();
                let full = matcher.ratio(&candidate);
                let quick = matcher.quick_ratio(&candidate);
                let real_quick = matcher.real_quick_ratio(&candidate);
                assert!(quick >= full - 1e-12, "{query} vs {word}");
                assert!(real_quick >= quick - 1e-12, "{query} vs {word}");
            }
        }
    }

    #[test]
    fn popular_characters_still_extend_matches() {
        let query = "a".repeat(POPULAR_MIN_LEN);
        let matcher = QueryMatcher::new(&query);
        assert!(matcher.positions.is_empty());
        // 没有可用起点时只能从区间开头向后延伸
        let candidate: Vec<char> = "baaa".chars().collect();
        assert_eq!(matcher.matching_chars(&candidate), 0);
        let candidate: Vec<char> = "aaaa".chars().collect();
        assert_eq!(matcher.matching_chars(&candidate), 4);

        let query = format!("xyz{}", "a".repeat(POPULAR_MIN_LEN));
        let matcher = QueryMatcher::new(&query);
        let candidate: Vec<char> = "xyzaa".chars().collect();
        assert_eq!(matcher.matching_chars(&candidate), 5);
    }
}
