//! 词库の型定義
//!
//! ソースごとの正規化済みレコードと最終出力:
//! - HeadwordRecord: 見出し語辞書（kajweb）の1語分
//! - FrequencyRecord: 頻度辞書（ECDICT）の1語分
//! - FinalEntry: core/full 出力の1エントリ

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// 見出し語辞書のレコード
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadwordRecord {
    /// 中国語訳（`；`区切り、最大80文字）
    pub meaning: String,
    /// 品詞（ソースの表記そのまま）
    pub pos: String,
}

/// 頻度辞書のレコード
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyRecord {
    /// `/…/` で囲まれた IPA
    pub phonetic: String,
    /// `n.` / `adj.` 形式の品詞
    pub pos: String,
    /// COCA 頻度順位（1 以上）
    pub coca_rank: Option<u32>,
    /// 小文字の用途タグ（`toefl`, `cet4` など）
    pub tags: BTreeSet<String>,
    /// 中国語訳（最大3義）
    pub meaning: String,
}

pub type HeadwordMap = HashMap<String, HeadwordRecord>;
pub type FrequencyMap = HashMap<String, FrequencyRecord>;
pub type SubjectTagMap = HashMap<String, BTreeSet<String>>;
pub type AcademicWordSet = BTreeSet<String>;

/// 出力上の層
///
/// 宣言順がそのまま優先順位（core → extended → subject → supplementary）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Core,
    Extended,
    Subject,
    Supplementary,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Core => "core",
            Tier::Extended => "extended",
            Tier::Subject => "subject",
            Tier::Supplementary => "supplementary",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// core/full 出力のエントリ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalEntry {
    pub id: String,
    pub word: String,
    pub phonetic: String,
    pub meaning: String,
    pub pos: String,
    /// 不明な場合は `null` として出力
    pub coca_rank: Option<u32>,
    pub tier: Tier,
    pub tags: Vec<String>,
    /// 例文（現状は常に空）
    pub example: String,
}
