//! 頻度辞書（ECDICT CSV）ローダー

use crate::error::{Result, VocabError};
use crate::loader::LoadOutcome;
use csv::StringRecord;
use std::path::Path;
use toefl_vocab_common::normalize::{
    canonical_word, clean_frequency_translation, normalize_phonetic, normalize_pos,
    parse_coca_rank, parse_tags,
};
use toefl_vocab_common::{merge_into, FrequencyMap, FrequencyRecord};

/// 使用する列の位置（`word` 以外は欠けていてもよい）
struct Columns {
    word: usize,
    phonetic: Option<usize>,
    translation: Option<usize>,
    pos: Option<usize>,
    tag: Option<usize>,
    frq: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Option<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Some(Self {
            word: find("word")?,
            phonetic: find("phonetic"),
            translation: find("translation"),
            pos: find("pos"),
            tag: find("tag"),
            frq: find("frq"),
        })
    }
}

fn field(record: &StringRecord, index: Option<usize>) -> &str {
    index.and_then(|i| record.get(i)).unwrap_or("")
}

/// ECDICT CSV を読み込む
pub fn load_frequency(path: &Path) -> Result<LoadOutcome<FrequencyMap>> {
    if !path.exists() {
        return Err(VocabError::MissingSource(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let columns = Columns::from_headers(&headers).ok_or_else(|| VocabError::Source {
        path: path.display().to_string(),
        message: "word 列がありません".into(),
    })?;

    let mut map = FrequencyMap::new();
    let mut rows = 0usize;
    let mut skipped = 0usize;

    for result in reader.records() {
        rows += 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(error = %e, "壊れた行をスキップ");
                skipped += 1;
                continue;
            }
        };

        let Some(word) = canonical_word(field(&record, Some(columns.word))) else {
            skipped += 1;
            continue;
        };

        let info = FrequencyRecord {
            phonetic: normalize_phonetic(field(&record, columns.phonetic)),
            pos: normalize_pos(field(&record, columns.pos)),
            coca_rank: parse_coca_rank(field(&record, columns.frq)),
            tags: parse_tags(field(&record, columns.tag)),
            meaning: clean_frequency_translation(field(&record, columns.translation)),
        };
        merge_into(&mut map, word, info);
    }

    tracing::info!(rows, skipped, unique = map.len(), "ECDICT 読み込み完了");

    if map.is_empty() {
        return Ok(LoadOutcome::Empty {
            reason: format!("{} に有効な行がありません", path.display()),
        });
    }
    Ok(LoadOutcome::Loaded(map))
}
