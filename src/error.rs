use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("データソースが不足しています。`--download` を付けて実行するか、手動で配置してください:{}", format_missing(.0))]
    MissingSources(Vec<String>),

    #[error("データソースが見つかりません: {0}")]
    MissingSource(String),

    #[error("データソースの形式が不正 ({path}): {message}")]
    Source { path: String, message: String },

    #[error("{source_name} の取得に失敗しました（試行: {}）", .attempts.join(", "))]
    FetchFailed {
        source_name: String,
        attempts: Vec<String>,
    },

    #[error("コマンド実行エラー: {0}")]
    CommandFailed(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV解析エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("ZIP解析エラー: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] toefl_vocab_common::Error),
}

fn format_missing(paths: &[String]) -> String {
    paths.iter().map(|p| format!("\n  - {}", p)).collect()
}

pub type Result<T> = std::result::Result<T, VocabError>;
