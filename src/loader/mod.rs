//! データソース読み込みモジュール
//!
//! 各ローダーは生データを単語キーのマップに変換する。
//! - パターンに合わない語・壊れたレコードは黙って捨てる（件数のみログ）
//! - 必須の配置先が存在しなければ致命的エラー
//! - 配置先はあるが中身がない場合は `LoadOutcome::Empty`

pub mod academic;
pub mod frequency;
pub mod headword;
pub mod subject;

use crate::config::DataPaths;
use crate::error::Result;
use toefl_vocab_common::Sources;

/// 1ソースの読み込み結果（致命的な失敗は `Err`）
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Loaded(T),
    Empty { reason: String },
}

impl<T: Default> LoadOutcome<T> {
    /// 空なら警告を出してデフォルト値にする
    pub fn or_warn(self, source: &str) -> T {
        match self {
            LoadOutcome::Loaded(value) => value,
            LoadOutcome::Empty { reason } => {
                tracing::warn!(source, %reason, "ソースが空のため寄与なしで続行");
                T::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, LoadOutcome::Empty { .. })
    }
}

/// 4ソースをすべて読み込む
pub fn load_sources(paths: &DataPaths) -> Result<Sources> {
    let headwords = headword::load_headwords(&paths.kajweb_dir)?.or_warn("kajweb");
    println!("✔ 見出し語: {}語", headwords.len());

    let frequency = frequency::load_frequency(&paths.ecdict_csv)?.or_warn("ecdict");
    println!("✔ 頻度辞書: {}語", frequency.len());

    let subject_tags = subject::load_subject_tags(&paths.xiaolai_dir)?.or_warn("xiaolai");
    println!("✔ 科目タグ: {}語", subject_tags.len());

    let academic = academic::load_academic_words(&paths.awl_txt)?.or_warn("awl");
    println!("✔ AWL: {}語", academic.len());

    Ok(Sources {
        headwords,
        frequency,
        subject_tags,
        academic,
    })
}

/// UTF-8 として読めないバイト列は置換せずに落とす
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
