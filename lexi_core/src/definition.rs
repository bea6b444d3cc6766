//! `definition`：把原始释义整理成统一编号的展示文本。
//!
//! 规则：
//! - `Text`：按 "1–2 位数字 + 句点 + 空格" 切分义项，片段原样保留（不裁剪空白），空白片段丢弃
//! - `Senses`：每项渲染为 `"{label}: {text}"`，保持插入顺序
//! - `List`：每项即一个义项
//! - 输出：重新编号 1..K，每个义项渲染为 `"\n{i}. {sense}"`

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::DefinitionValue;

/// 义项分隔符：句点按字面匹配，`"12X "` 不算分隔符。
static SENSE_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{1,2}\.[ ]+").expect("valid regex"));

/// 拆出义项（按原始顺序）。
pub fn senses(value: &DefinitionValue) -> Vec<Cow<'_, str>> {
    match value {
        DefinitionValue::Text(text) => SENSE_DELIMITER
            .split(text)
            .filter(|fragment| !fragment.trim().is_empty())
            .map(Cow::Borrowed)
            .collect(),
        DefinitionValue::Senses(pairs) => pairs
            .iter()
            .map(|(label, text)| Cow::Owned(format!("{label}: {text}")))
            .collect(),
        DefinitionValue::List(items) => items.iter().map(|s| Cow::Borrowed(s.as_str())).collect(),
    }
}

/// 格式化释义；纯函数，对任何输入都有结果。
pub fn format(value: &DefinitionValue) -> String {
    let mut out = String::new();
    for (i, sense) in senses(value).iter().enumerate() {
        out.push('\n');
        out.push_str(&(i + 1).to_string());
        out.push_str(". ");
        out.push_str(sense);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> DefinitionValue {
        DefinitionValue::Text(s.to_owned())
    }

    #[test]
    fn numbered_text_is_renumbered_without_trimming() {
        assert_eq!(format(&text("1. foo 2. bar")), "\n1. foo \n2. bar");
    }

    #[test]
    fn unnumbered_text_is_single_sense() {
        assert_eq!(format(&text("already formatted")), "\n1. already formatted");
    }

    #[test]
    fn numbering_is_stable_for_single_sense() {
        let once = format(&text("plain"));
        assert_eq!(format(&text(&once)), once);
        assert_eq!(format(&text("3. first 7. second")), "\n1. first \n2. second");
    }

    #[test]
    fn leading_text_before_first_delimiter_is_kept() {
        assert_eq!(
            format(&text("noun 1. a vessel 2. a sum")),
            "\n1. noun \n2. a vessel \n3. a sum"
        );
    }

    #[test]
    fn delimiter_requires_literal_period() {
        assert_eq!(format(&text("12X foo")), "\n1. 12X foo");
        assert_eq!(format(&text("12. foo")), "\n1. foo");
    }

    #[test]
    fn three_digit_numbers_split_on_last_two_digits() {
        assert_eq!(format(&text("123. foo")), "\n1. 1\n2. foo");
    }

    #[test]
    fn senses_keep_insertion_order() {
        let value = DefinitionValue::Senses(vec![
            ("a".into(), "x".into()),
            ("b".into(), "y".into()),
        ]);
        assert_eq!(format(&value), "\n1. a: x\n2. b: y");
    }

    #[test]
    fn list_items_are_senses() {
        let value = DefinitionValue::List(vec!["small mark".into(), "tiny amount".into()]);
        assert_eq!(format(&value), "\n1. small mark\n2. tiny amount");
    }

    #[test]
    fn empty_inputs_format_to_empty_string() {
        assert_eq!(format(&text("")), "");
        assert_eq!(format(&text("   ")), "");
        assert_eq!(format(&DefinitionValue::Senses(Vec::new())), "");
        assert_eq!(format(&DefinitionValue::List(Vec::new())), "");
    }
}
