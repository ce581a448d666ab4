//! ソース内の重複レコードのマージ規則
//!
//! 同じレコードを2回マージしても1回と同じ結果になる（冪等）。

use crate::types::{FrequencyRecord, HeadwordRecord};
use std::collections::HashMap;

/// 同一単語のレコードを統合する
pub trait Merge {
    fn merge(&mut self, other: Self);
}

impl Merge for HeadwordRecord {
    /// 訳語は厳密に長い方、品詞は最初の非空値
    fn merge(&mut self, other: Self) {
        if other.meaning.chars().count() > self.meaning.chars().count() {
            self.meaning = other.meaning;
        }
        if self.pos.is_empty() {
            self.pos = other.pos;
        }
    }
}

impl Merge for FrequencyRecord {
    /// 各フィールドは最初の非空値、タグは和集合
    fn merge(&mut self, other: Self) {
        if self.phonetic.is_empty() {
            self.phonetic = other.phonetic;
        }
        if self.pos.is_empty() {
            self.pos = other.pos;
        }
        if self.coca_rank.is_none() {
            self.coca_rank = other.coca_rank;
        }
        if self.meaning.is_empty() {
            self.meaning = other.meaning;
        }
        self.tags.extend(other.tags);
    }
}

/// マップに追加（既存ならマージ）
pub fn merge_into<T: Merge>(map: &mut HashMap<String, T>, word: String, record: T) {
    match map.get_mut(&word) {
        Some(existing) => existing.merge(record),
        None => {
            map.insert(word, record);
        }
    }
}
