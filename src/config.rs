use crate::error::{Result, VocabError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// ソース取得の設定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 見出し語辞書リポジトリ
    pub kajweb_repo: String,
    /// 科目別語彙リポジトリ
    pub xiaolai_repo: String,
    /// ECDICT CSV の候補 URL（先頭から順に試す）
    pub ecdict_urls: Vec<String>,
    /// AWL JSON の候補 URL
    pub awl_urls: Vec<String>,
    /// 接続確立のタイムアウト
    pub timeout_seconds: u64,
    /// 1ファイルの取得全体（本文の受信を含む）の上限
    pub download_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kajweb_repo: "https://github.com/kajweb/dict".into(),
            xiaolai_repo: "https://github.com/xiaolai/toefl-ibt-vocabulary-in-context".into(),
            ecdict_urls: vec![
                "https://raw.githubusercontent.com/skywind3000/ECDICT/master/ecdict.csv".into(),
                "https://raw.githubusercontent.com/skywind3000/ECDICT/master/stardict.csv".into(),
            ],
            awl_urls: vec![
                "https://raw.githubusercontent.com/lpmi-13/machine_readable_wordlists/master/Academic/AWL/AWL.json".into(),
            ],
            timeout_seconds: 60,
            download_timeout_seconds: 1800,
        }
    }
}

impl Config {
    /// 明示パス → ユーザー設定 → デフォルトの順で読み込む
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(VocabError::Config(format!(
                    "設定ファイルが見つかりません: {}",
                    path.display()
                )));
            }
            return Self::load_from(path);
        }

        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("toefl-vocab").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(VocabError::Config("timeout_seconds は 1 以上である必要があります".into()));
        }
        if self.download_timeout_seconds < self.timeout_seconds {
            return Err(VocabError::Config(
                "download_timeout_seconds は timeout_seconds 以上である必要があります".into(),
            ));
        }
        if self.ecdict_urls.is_empty() {
            return Err(VocabError::Config("ecdict_urls が空です".into()));
        }
        if self.awl_urls.is_empty() {
            return Err(VocabError::Config("awl_urls が空です".into()));
        }
        Ok(())
    }
}

/// データソースの配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub kajweb_dir: PathBuf,
    pub ecdict_csv: PathBuf,
    pub xiaolai_dir: PathBuf,
    pub awl_txt: PathBuf,
}

impl DataPaths {
    pub fn resolve(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            kajweb_dir: data_dir.join("kajweb"),
            ecdict_csv: data_dir.join("ecdict.csv"),
            xiaolai_dir: data_dir.join("xiaolai"),
            awl_txt: data_dir.join("awl.txt"),
        }
    }

    /// 存在しないソースの一覧
    pub fn missing(&self) -> Vec<String> {
        [&self.kajweb_dir, &self.ecdict_csv, &self.xiaolai_dir, &self.awl_txt]
            .into_iter()
            .filter(|p| !p.exists())
            .map(|p| p.display().to_string())
            .collect()
    }

    /// すべて揃っていなければ MissingSources
    pub fn ensure_present(&self) -> Result<()> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(VocabError::MissingSources(missing))
        }
    }
}
