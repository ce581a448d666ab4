//! データソース取得（`--download`）
//!
//! 既に存在するソースはスキップする。HTTP 取得は候補 URL を順に試し、
//! すべて失敗した場合のみそのソースの取得を失敗とする。

use crate::config::{Config, DataPaths};
use crate::error::{Result, VocabError};
use reqwest::blocking::Client;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Duration;
use tempfile::NamedTempFile;
use toefl_vocab_common::normalize::canonical_word;

/// 不足しているソースを取得する
pub fn download_sources(paths: &DataPaths, config: &Config) -> Result<()> {
    std::fs::create_dir_all(&paths.data_dir)?;

    let client = Client::builder()
        .connect_timeout(Duration::from_secs(config.timeout_seconds))
        .timeout(Duration::from_secs(config.download_timeout_seconds))
        .build()?;

    clone_if_absent("kajweb", &config.kajweb_repo, &paths.kajweb_dir)?;
    clone_if_absent("xiaolai", &config.xiaolai_repo, &paths.xiaolai_dir)?;

    if paths.ecdict_csv.exists() {
        println!("- ecdict.csv は既に存在するためスキップ");
    } else {
        println!("- ECDICT をダウンロード中...");
        try_each("ECDICT", &config.ecdict_urls, |url| download_file(&client, url, &paths.ecdict_csv))?;
        println!("✔ ECDICT: {}", paths.ecdict_csv.display());
    }

    if paths.awl_txt.exists() {
        println!("- awl.txt は既に存在するためスキップ");
    } else {
        println!("- AWL をダウンロード中...");
        let count = try_each("AWL", &config.awl_urls, |url| fetch_awl(&client, url, &paths.awl_txt))?;
        println!("✔ AWL: {}語", count);
    }

    Ok(())
}

/// 候補を先頭から試し、最初に成功した結果を返す
pub fn try_each<T, F>(source_name: &str, candidates: &[String], mut attempt: F) -> Result<T>
where
    F: FnMut(&str) -> Result<T>,
{
    let mut attempts = Vec::new();

    for candidate in candidates {
        tracing::info!(source = source_name, url = %candidate, "取得を試行");
        match attempt(candidate) {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::warn!(source = source_name, url = %candidate, error = %e, "取得失敗、次の候補へ");
                attempts.push(format!("{} ({})", candidate, e));
            }
        }
    }

    Err(VocabError::FetchFailed {
        source_name: source_name.to_string(),
        attempts,
    })
}

fn clone_if_absent(name: &str, repo: &str, dest: &Path) -> Result<()> {
    if dest.exists() {
        println!("- {} は既に存在するためスキップ", name);
        return Ok(());
    }

    println!("- {} を clone 中...", name);
    let output = Command::new("git")
        .args(["clone", "--depth", "1", repo])
        .arg(dest)
        .output()
        .map_err(|e| VocabError::CommandFailed(format!("git 実行エラー: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VocabError::CommandFailed(format!(
            "git clone {} failed (code {:?}): {}",
            repo,
            output.status.code(),
            stderr.trim()
        )));
    }

    println!("✔ {}: {}", name, dest.display());
    Ok(())
}

/// 一時ファイルに書き込み、完了後に配置する
fn download_file(client: &Client, url: &str, dest: &Path) -> Result<()> {
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut response = client.get(url).send()?.error_for_status()?;
    let mut temp = NamedTempFile::new_in(parent)?;
    response.copy_to(&mut temp)?;
    temp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

fn fetch_awl(client: &Client, url: &str, dest: &Path) -> Result<usize> {
    let body = client.get(url).send()?.error_for_status()?.bytes()?;
    let value: serde_json::Value = serde_json::from_slice(&body)?;

    let words = parse_awl_json(&value);
    if words.is_empty() {
        return Err(VocabError::Source {
            path: url.to_string(),
            message: "AWL の単語を抽出できません".into(),
        });
    }

    write_lines(dest, &words)?;
    Ok(words.len())
}

/// `{ "sublist": { "word": ... }, ... }` 形式から単語を取り出す（整列・重複除去済み）
pub fn parse_awl_json(value: &serde_json::Value) -> Vec<String> {
    let Some(sublists) = value.as_object() else {
        return Vec::new();
    };

    let words: BTreeSet<String> = sublists
        .values()
        .filter_map(|sublist| sublist.as_object())
        .flat_map(|sublist| sublist.keys())
        .filter_map(|w| canonical_word(w))
        .collect();
    words.into_iter().collect()
}

fn write_lines(dest: &Path, lines: &[String]) -> Result<()> {
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    for line in lines {
        writeln!(temp, "{}", line)?;
    }
    temp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_awl_json() {
        let value = serde_json::json!({
            "sublist1": {"Analyse": ["analysed"], "benefit": [], "x": []},
            "sublist2": {"analyse": [], "concept": []},
            "meta": "ignored"
        });
        assert_eq!(parse_awl_json(&value), vec!["analyse", "benefit", "concept"]);
        assert!(parse_awl_json(&serde_json::json!(["analyse"])).is_empty());
    }

    #[test]
    fn test_try_each_falls_through() {
        let urls = vec!["first".to_string(), "second".to_string()];
        let mut tried = Vec::new();
        let result = try_each("ECDICT", &urls, |url| {
            tried.push(url.to_string());
            if url == "second" {
                Ok(42)
            } else {
                Err(VocabError::CommandFailed("boom".into()))
            }
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(tried, vec!["first", "second"]);
    }

    #[test]
    fn test_try_each_all_fail() {
        let urls = vec!["a".to_string(), "b".to_string()];
        let result: Result<()> = try_each("AWL", &urls, |_| Err(VocabError::CommandFailed("down".into())));
        match result {
            Err(VocabError::FetchFailed { source_name, attempts }) => {
                assert_eq!(source_name, "AWL");
                assert_eq!(attempts.len(), 2);
                assert!(attempts[0].starts_with("a ("));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_write_lines() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("data").join("awl.txt");
        write_lines(&dest, &["analyse".to_string(), "benefit".to_string()]).unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "analyse\nbenefit\n");
    }

    #[test]
    fn test_existing_sources_are_skipped() {
        let dir = tempdir().unwrap();
        let paths = DataPaths::resolve(dir.path());
        std::fs::create_dir_all(&paths.kajweb_dir).unwrap();
        std::fs::create_dir_all(&paths.xiaolai_dir).unwrap();
        std::fs::write(&paths.ecdict_csv, "word\n").unwrap();
        std::fs::write(&paths.awl_txt, "analyse\n").unwrap();

        // 何も取得しないのでネットワーク不要
        download_sources(&paths, &Config::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&paths.awl_txt).unwrap(), "analyse\n");
    }
}
