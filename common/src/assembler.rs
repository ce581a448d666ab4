//! エントリ組み立て
//!
//! 各フィールドは固定の優先順位でソースから選ぶ:
//! - meaning: 見出し語辞書 → 頻度辞書
//! - pos: 頻度辞書 → 見出し語辞書（正規化）
//! - phonetic / coca_rank: 頻度辞書のみ

use crate::normalize::normalize_pos;
use crate::types::{
    AcademicWordSet, FinalEntry, FrequencyMap, HeadwordMap, SubjectTagMap, Tier,
};
use std::collections::HashSet;

/// エントリ ID の接頭辞
pub const ID_PREFIX: &str = "toefl_";

/// ID の最小桁数
pub const MIN_ID_WIDTH: usize = 4;

/// AWL 収録語に付けるタグ
pub const ACADEMIC_MARKERS: [&str; 2] = ["AWL", "学术通用"];

/// 頻度辞書タグ → 出力タグ（この順で判定）
pub const EXAM_LEVEL_MARKERS: [(&str, &str); 2] = [("cet4", "CET4"), ("cet6", "CET6")];

pub fn choose_meaning(word: &str, headwords: &HeadwordMap, frequency: &FrequencyMap) -> String {
    if let Some(info) = headwords.get(word).filter(|h| !h.meaning.is_empty()) {
        return info.meaning.clone();
    }
    if let Some(info) = frequency.get(word).filter(|f| !f.meaning.is_empty()) {
        return info.meaning.clone();
    }
    String::new()
}

pub fn choose_pos(word: &str, headwords: &HeadwordMap, frequency: &FrequencyMap) -> String {
    if let Some(info) = frequency.get(word).filter(|f| !f.pos.is_empty()) {
        return info.pos.clone();
    }
    if let Some(info) = headwords.get(word).filter(|h| !h.pos.is_empty()) {
        return normalize_pos(&info.pos);
    }
    String::new()
}

/// タグ列を組み立てる（AWL → 科目（辞書順）→ 試験レベル、重複除去）
pub fn build_tags(
    word: &str,
    academic: &AcademicWordSet,
    subject_tags: &SubjectTagMap,
    frequency: &FrequencyMap,
) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    if academic.contains(word) {
        tags.extend(ACADEMIC_MARKERS.iter().map(|t| t.to_string()));
    }

    if let Some(subjects) = subject_tags.get(word) {
        tags.extend(subjects.iter().cloned());
    }

    if let Some(info) = frequency.get(word) {
        for (source_tag, marker) in EXAM_LEVEL_MARKERS {
            if info.tags.contains(source_tag) {
                tags.push(marker.to_string());
            }
        }
    }

    let mut seen = HashSet::new();
    tags.retain(|t| seen.insert(t.clone()));
    tags
}

/// ID の桁数（総数の桁数、最小4桁）
pub fn id_width(total: usize) -> usize {
    total.to_string().len().max(MIN_ID_WIDTH)
}

/// 連番 ID（1 始まり）
pub fn format_id(index: usize, width: usize) -> String {
    format!("{}{:0width$}", ID_PREFIX, index, width = width)
}

/// 並び順どおりにエントリを生成する（ID は 1 から振り直す）
pub fn make_entries(
    ordered: &[(String, Tier)],
    headwords: &HeadwordMap,
    frequency: &FrequencyMap,
    subject_tags: &SubjectTagMap,
    academic: &AcademicWordSet,
) -> Vec<FinalEntry> {
    let width = id_width(ordered.len());

    ordered
        .iter()
        .enumerate()
        .map(|(i, (word, tier))| {
            let freq = frequency.get(word);
            FinalEntry {
                id: format_id(i + 1, width),
                word: word.clone(),
                phonetic: freq.map(|f| f.phonetic.clone()).unwrap_or_default(),
                meaning: choose_meaning(word, headwords, frequency),
                pos: choose_pos(word, headwords, frequency),
                coca_rank: freq.and_then(|f| f.coca_rank),
                tier: *tier,
                tags: build_tags(word, academic, subject_tags, frequency),
                example: String::new(),
            }
        })
        .collect()
}
