//! 科目別語彙（xiaolai リポジトリ）ローダー
//!
//! ファイルの親ディレクトリ名とファイル名から科目ラベルを推定し、
//! 各行の先頭の単語にそのラベルを付ける。

use crate::error::{Result, VocabError};
use crate::loader::{decode_text, LoadOutcome};
use std::path::{Path, PathBuf};
use toefl_vocab_common::normalize::leading_word;
use toefl_vocab_common::SubjectTagMap;
use walkdir::WalkDir;

/// キーワード → 科目ラベル（先に一致したものを採用）
pub const SUBJECT_KEYWORDS: &[(&str, &str)] = &[
    ("astronomy", "天文"),
    ("geo", "地质"),
    ("geology", "地质"),
    ("ecology", "生态"),
    ("environment", "环境"),
    ("biology", "生物"),
    ("chemistry", "化学"),
    ("physics", "物理"),
    ("medicine", "医学"),
    ("history", "历史"),
    ("anthropology", "人类学"),
    ("archaeology", "考古"),
    ("sociology", "社会学"),
    ("psychology", "心理学"),
    ("economics", "经济"),
    ("politics", "政治"),
    ("law", "法律"),
    ("education", "教育"),
    ("linguistics", "语言学"),
    ("ocean", "海洋"),
    ("geography", "地理"),
    ("agriculture", "农业"),
    ("humanities", "人文"),
];

/// どのキーワードにも一致しない場合のラベル
pub const DEFAULT_SUBJECT: &str = "学术专题";

const WORD_LIST_EXTENSIONS: &[&str] = &["txt", "md", "csv", "tsv", "json"];

/// パスから科目ラベルを推定
pub fn infer_subject(path: &Path) -> &'static str {
    let parent = path
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let key = format!("{} {}", parent, stem).to_lowercase();

    SUBJECT_KEYWORDS
        .iter()
        .find(|(keyword, _)| key.contains(keyword))
        .map(|(_, label)| *label)
        .unwrap_or(DEFAULT_SUBJECT)
}

/// README 以外の語彙ファイル（パス順）
fn find_word_lists(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            let ext = p
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            WORD_LIST_EXTENSIONS.contains(&ext.as_str())
        })
        .filter(|p| {
            p.file_name()
                .map(|n| !n.to_string_lossy().eq_ignore_ascii_case("readme.md"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// 科目タグを読み込む
pub fn load_subject_tags(xiaolai_dir: &Path) -> Result<LoadOutcome<SubjectTagMap>> {
    if !xiaolai_dir.exists() {
        return Err(VocabError::MissingSource(xiaolai_dir.display().to_string()));
    }

    let files = find_word_lists(xiaolai_dir);
    if files.is_empty() {
        return Ok(LoadOutcome::Empty {
            reason: format!("{} に解析可能な語彙ファイルがありません", xiaolai_dir.display()),
        });
    }

    let mut tags = SubjectTagMap::new();
    let mut unreadable = 0usize;

    for path in &files {
        let subject = infer_subject(path);
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "読み込めないファイルをスキップ");
                unreadable += 1;
                continue;
            }
        };

        for line in decode_text(&bytes).lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('>') {
                continue;
            }
            if let Some(word) = leading_word(line) {
                tags.entry(word).or_default().insert(subject.to_string());
            }
        }
    }

    tracing::info!(files = files.len(), unreadable, words = tags.len(), "xiaolai 読み込み完了");

    if tags.is_empty() {
        return Ok(LoadOutcome::Empty {
            reason: format!("{} の語彙ファイルに単語がありません", xiaolai_dir.display()),
        });
    }
    Ok(LoadOutcome::Loaded(tags))
}
