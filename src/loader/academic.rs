//! AWL（Academic Word List）ローダー

use crate::error::{Result, VocabError};
use crate::loader::{decode_text, LoadOutcome};
use std::path::Path;
use toefl_vocab_common::normalize::extract_words;
use toefl_vocab_common::AcademicWordSet;

/// `awl.txt` の全単語を集める（`#` 行はコメント）
pub fn load_academic_words(path: &Path) -> Result<LoadOutcome<AcademicWordSet>> {
    if !path.exists() {
        return Err(VocabError::MissingSource(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let mut words = AcademicWordSet::new();

    for line in decode_text(&bytes).lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        words.extend(extract_words(line));
    }

    tracing::info!(words = words.len(), "AWL 読み込み完了");

    if words.is_empty() {
        return Ok(LoadOutcome::Empty {
            reason: format!("{} に単語がありません", path.display()),
        });
    }
    Ok(LoadOutcome::Loaded(words))
}
