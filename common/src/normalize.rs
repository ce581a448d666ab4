//! 正規化モジュール
//!
//! 各ソース固有の表記（単語・音標・品詞・タグ・訳語・頻度順位）を
//! 共通のスカラー形式に揃える。

use regex::Regex;
use std::collections::{BTreeSet, HashSet};

lazy_static::lazy_static! {
    /// 正規化済み単語: 小文字英字で始まる 2〜31 文字（英字・アポストロフィ・ハイフン）
    static ref WORD_RE: Regex = Regex::new(r"^[a-z][a-z'\-]{1,30}$").unwrap();
    /// 行中の単語候補
    static ref TOKEN_RE: Regex = Regex::new(r"[A-Za-z][A-Za-z'\-]{1,30}").unwrap();
    /// 行頭の単語（リスト記号・番号・句読点を読み飛ばす）
    static ref LEADING_WORD_RE: Regex =
        Regex::new(r"^[\s\-\*\d\.)\]]*([A-Za-z][A-Za-z'\-]{1,30})\b").unwrap();
    static ref BRACKET_RE: Regex = Regex::new(r"\[[^\]]*\]").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref POS_SEPARATOR_RE: Regex = Regex::new(r"[\s/;,，]+").unwrap();
    static ref TAG_SEPARATOR_RE: Regex = Regex::new(r"[\s,;/|]+").unwrap();
    static ref SENSE_SEPARATOR_RE: Regex = Regex::new(r"[；;]").unwrap();
}

/// 訳語の区切り（全角セミコロン）
pub const SENSE_JOINER: &str = "；";

/// 見出し語辞書の訳語の最大文字数
pub const MAX_HEADWORD_MEANING_CHARS: usize = 80;

/// 頻度辞書の訳語で保持する義の数
pub const MAX_FREQUENCY_SENSES: usize = 3;

/// 前後の空白を除去して小文字化
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// 正規化済み単語のパターンに一致するか
pub fn is_valid_word(word: &str) -> bool {
    WORD_RE.is_match(word)
}

/// 正規化して、パターンに一致する場合のみ返す
pub fn canonical_word(raw: &str) -> Option<String> {
    let word = normalize_word(raw);
    is_valid_word(&word).then_some(word)
}

/// 行頭の単語を取り出す（科目別リストの1行用）
pub fn leading_word(line: &str) -> Option<String> {
    LEADING_WORD_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| canonical_word(m.as_str()))
}

/// 行中の全単語を取り出す（AWL リスト用）
pub fn extract_words(line: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(line)
        .filter_map(|m| canonical_word(m.as_str()))
        .collect()
}

/// 改行を空白に置換し、連続空白を1つにまとめて前後を除去
pub fn clean_text(text: &str) -> String {
    let text = text.replace(['\r', '\n'], " ");
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// `[...]` 注記を取り除く
pub fn strip_annotations(text: &str) -> String {
    BRACKET_RE.replace_all(text, "").into_owned()
}

/// 見出し語辞書の1訳語を整形
pub fn clean_headword_translation(text: &str) -> String {
    clean_text(&strip_annotations(&clean_text(text)))
}

/// 訳語リストを重複排除して連結し、最大長で切り詰める
pub fn join_glosses<I, S>(glosses: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for gloss in glosses {
        let gloss = gloss.as_ref();
        if !gloss.is_empty() && seen.insert(gloss.to_string()) {
            unique.push(gloss.to_string());
        }
    }

    let joined = clean_text(&unique.join(SENSE_JOINER));
    truncate_meaning(&joined, MAX_HEADWORD_MEANING_CHARS)
}

/// 文字数で切り詰め、末尾の区切り記号を除去
///
/// 上限以下の場合はそのまま返す。
pub fn truncate_meaning(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    truncated
        .trim_end_matches(['；', ';', '，', ',', ' '])
        .to_string()
}

/// 音標を `/…/` 形式に揃える
pub fn normalize_phonetic(phonetic: &str) -> String {
    let phonetic = clean_text(phonetic);
    if phonetic.is_empty() {
        return String::new();
    }
    if phonetic.starts_with('/') && phonetic.ends_with('/') {
        return phonetic;
    }
    format!("/{}/", phonetic)
}

/// 品詞を先頭トークン + `.` の形式に揃える
///
/// `"n/v"` → `"n."`, `"adj."` → `"adj."`
pub fn normalize_pos(pos: &str) -> String {
    let pos = clean_text(pos);
    if pos.is_empty() {
        return String::new();
    }

    let first = POS_SEPARATOR_RE.split(&pos).next().unwrap_or("");
    let token = first.trim_matches('.');
    if token.is_empty() {
        return String::new();
    }
    format!("{}.", token)
}

/// 用途タグを小文字の集合に分解
pub fn parse_tags(tag_text: &str) -> BTreeSet<String> {
    let tag_text = clean_text(tag_text).to_lowercase();
    TAG_SEPARATOR_RE
        .split(&tag_text)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// COCA 順位を解釈（小数は切り捨て、1 未満・解釈不能は None）
pub fn parse_coca_rank(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let number: f64 = value.parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    let truncated = number.trunc();
    if truncated < 1.0 {
        return None;
    }
    Some(truncated.min(u32::MAX as f64) as u32)
}

/// 頻度辞書の訳語を整形（注記除去・最大3義）
pub fn clean_frequency_translation(text: &str) -> String {
    let text = clean_text(&strip_annotations(&clean_text(text)));
    if text.is_empty() {
        return String::new();
    }

    SENSE_SEPARATOR_RE
        .split(&text)
        .map(clean_text)
        .filter(|s| !s.is_empty())
        .take(MAX_FREQUENCY_SENSES)
        .collect::<Vec<_>>()
        .join(SENSE_JOINER)
}
