//! 出力モジュール
//!
//! core/full の JSON と統計テキストをまとめて書き出す。
//! 3ファイルとも一時ファイルへの書き込みが成功してから配置するため、
//! 途中で失敗しても一部だけが更新されることはない。

use crate::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use toefl_vocab_common::{FinalEntry, Lexicon};

pub const CORE_FILE_NAME: &str = "core_toefl.json";
pub const FULL_FILE_NAME: &str = "full_toefl.json";
pub const STATS_FILE_NAME: &str = "stats.txt";

/// 出力先ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub core: PathBuf,
    pub full: PathBuf,
    pub stats: PathBuf,
}

impl OutputPaths {
    pub fn resolve(output_dir: &Path) -> Self {
        Self {
            core: output_dir.join(CORE_FILE_NAME),
            full: output_dir.join(FULL_FILE_NAME),
            stats: output_dir.join(STATS_FILE_NAME),
        }
    }
}

/// エントリ列を整形済み JSON に変換（非 ASCII はそのまま）
pub fn render_entries(entries: &[FinalEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// core/full/stats を書き出す
pub fn write_outputs(lexicon: &Lexicon, output_dir: &Path) -> Result<OutputPaths> {
    let paths = OutputPaths::resolve(output_dir);

    // 先にすべて文字列化しておく
    let contents = [
        (&paths.core, render_entries(&lexicon.core)?),
        (&paths.full, render_entries(&lexicon.full)?),
        (&paths.stats, lexicon.stats.render()),
    ];

    std::fs::create_dir_all(output_dir)?;

    let mut staged = Vec::with_capacity(contents.len());
    for (dest, content) in &contents {
        let mut temp = NamedTempFile::new_in(output_dir)?;
        temp.write_all(content.as_bytes())?;
        temp.flush()?;
        staged.push((temp, *dest));
    }

    for (temp, dest) in staged {
        temp.persist(dest).map_err(|e| e.error)?;
        tracing::debug!(path = %dest.display(), "書き出し完了");
    }

    Ok(paths)
}
