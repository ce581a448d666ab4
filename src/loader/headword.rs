//! 見出し語辞書（kajweb `book/`）ローダー
//!
//! TOEFL 用の `.zip` / `.json` を読み、単語ごとに訳語と品詞をまとめる。
//! `.json` は先頭が `[` なら配列、それ以外は JSON Lines として扱う。

use crate::error::{Result, VocabError};
use crate::loader::{decode_text, LoadOutcome};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use toefl_vocab_common::normalize::{canonical_word, clean_headword_translation, clean_text, join_glosses};
use toefl_vocab_common::{merge_into, HeadwordMap, HeadwordRecord};
use walkdir::WalkDir;

/// kajweb の1レコード（使うフィールドのみ）
///
/// 値の型揺れは項目単位で吸収し、レコード全体は捨てない。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct KajRecord {
    #[serde(deserialize_with = "lenient_string")]
    head_word: Option<String>,
    content: KajOuter,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KajOuter {
    word: KajWord,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KajWord {
    content: KajContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KajContent {
    #[serde(deserialize_with = "lenient_items")]
    trans: Vec<KajTranslation>,
    syno: KajSynonyms,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct KajTranslation {
    #[serde(deserialize_with = "lenient_string")]
    tran_cn: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pos: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KajSynonyms {
    #[serde(deserialize_with = "lenient_items")]
    synos: Vec<KajSynonym>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KajSynonym {
    #[serde(deserialize_with = "lenient_string")]
    pos: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    tran: Option<String>,
}

/// 文字列以外のスカラーも文字列として受け取る（null / false は None）
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// 配列の各要素を読む。オブジェクト以外の要素は空項目、配列でなければ空
fn lenient_items<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| {
            if item.is_object() {
                serde_json::from_value(item).unwrap_or_default()
            } else {
                T::default()
            }
        })
        .collect())
}

/// 読み込み中の集計
#[derive(Debug, Default)]
struct LoadCounter {
    records: usize,
    skipped: usize,
}

/// `book/` 以下の TOEFL 辞書ファイルを読み込む
pub fn load_headwords(kajweb_dir: &Path) -> Result<LoadOutcome<HeadwordMap>> {
    let book_dir = kajweb_dir.join("book");
    if !book_dir.exists() {
        return Err(VocabError::MissingSource(book_dir.display().to_string()));
    }

    let candidates = find_candidates(&book_dir);
    if candidates.is_empty() {
        return Err(VocabError::MissingSource(format!(
            "{} (TOEFL の .zip/.json がありません)",
            book_dir.display()
        )));
    }

    let mut map = HeadwordMap::new();
    let mut counter = LoadCounter::default();

    for path in &candidates {
        let is_zip = path
            .extension()
            .map(|e| e.to_string_lossy().eq_ignore_ascii_case("zip"))
            .unwrap_or(false);

        if is_zip {
            read_zip(path, &mut map, &mut counter)?;
        } else {
            read_json_file(path, &mut map, &mut counter)?;
        }
    }

    tracing::info!(
        files = candidates.len(),
        records = counter.records,
        skipped = counter.skipped,
        unique = map.len(),
        "kajweb TOEFL 読み込み完了"
    );

    if map.is_empty() {
        return Ok(LoadOutcome::Empty {
            reason: format!("{} に有効な見出し語がありません", book_dir.display()),
        });
    }
    Ok(LoadOutcome::Loaded(map))
}

/// ファイル名に `toefl` を含む `.zip` / `.json`（パス順）
fn find_candidates(book_dir: &Path) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = WalkDir::new(book_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            let name = p
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            let ext = p
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            name.contains("toefl") && (ext == "zip" || ext == "json")
        })
        .collect();
    candidates.sort();
    candidates
}

fn read_zip(path: &Path, map: &mut HeadwordMap, counter: &mut LoadCounter) -> Result<()> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut member = archive.by_index(i)?;
        if !member.name().to_lowercase().ends_with(".json") {
            continue;
        }

        let mut bytes = Vec::new();
        member.read_to_end(&mut bytes)?;
        absorb_json_lines(&decode_text(&bytes), map, counter);
    }

    Ok(())
}

fn read_json_file(path: &Path, map: &mut HeadwordMap, counter: &mut LoadCounter) -> Result<()> {
    let bytes = std::fs::read(path)?;
    let text = decode_text(&bytes);

    if text.starts_with('[') {
        match serde_json::from_str::<Vec<Value>>(&text) {
            Ok(items) => {
                for item in items {
                    absorb_value(item, map, counter);
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "JSON 配列として読めないためスキップ");
            }
        }
    } else {
        absorb_json_lines(&text, map, counter);
    }

    Ok(())
}

fn absorb_json_lines(text: &str, map: &mut HeadwordMap, counter: &mut LoadCounter) {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(value) => absorb_value(value, map, counter),
            Err(_) => counter.skipped += 1,
        }
    }
}

fn absorb_value(value: Value, map: &mut HeadwordMap, counter: &mut LoadCounter) {
    if !value.is_object() {
        counter.skipped += 1;
        return;
    }
    counter.records += 1;

    let parsed = serde_json::from_value::<KajRecord>(value)
        .ok()
        .and_then(parse_record);
    match parsed {
        Some((word, record)) => merge_into(map, word, record),
        None => counter.skipped += 1,
    }
}

/// 1レコードを正規化（単語がパターン外なら None）
fn parse_record(record: KajRecord) -> Option<(String, HeadwordRecord)> {
    let word = canonical_word(record.head_word.as_deref().unwrap_or(""))?;
    let content = record.content.word.content;

    let mut glosses = Vec::new();
    let mut pos = String::new();

    for tran in &content.trans {
        let gloss = clean_headword_translation(tran.tran_cn.as_deref().unwrap_or(""));
        if !gloss.is_empty() {
            glosses.push(gloss);
        }
        if pos.is_empty() {
            pos = clean_text(tran.pos.as_deref().unwrap_or(""));
        }
    }

    if glosses.is_empty() {
        if let Some(first) = content.syno.synos.first() {
            let gloss = clean_text(first.tran.as_deref().unwrap_or(""));
            if !gloss.is_empty() {
                glosses.push(gloss);
            }
            if pos.is_empty() {
                pos = clean_text(first.pos.as_deref().unwrap_or(""));
            }
        }
    }

    Some((
        word,
        HeadwordRecord {
            meaning: join_glosses(&glosses),
            pos,
        },
    ))
}
