//! 実行フロー
//!
//! 1. 閾値の検証（ソースに触れる前）
//! 2. 必要ならソース取得
//! 3. ソースの存在確認と読み込み
//! 4. 層構築・エントリ生成
//! 5. 出力

use crate::cli::Cli;
use crate::config::{Config, DataPaths};
use crate::error::Result;
use crate::export::{self, OutputPaths};
use crate::fetch;
use crate::loader;
use std::path::PathBuf;
use toefl_vocab_common::{build_lexicon, Thresholds};

/// 1回の実行パラメータ
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub download: bool,
    pub core_coca_max: i64,
    pub full_coca_max: i64,
    pub output_dir: PathBuf,
    pub data_dir: PathBuf,
    pub config: Option<PathBuf>,
}

impl From<&Cli> for RunOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            download: cli.download,
            core_coca_max: cli.core_coca_max,
            full_coca_max: cli.full_coca_max,
            output_dir: cli.output_dir.clone(),
            data_dir: cli.data_dir.clone(),
            config: cli.config.clone(),
        }
    }
}

/// 実行結果
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub core_count: usize,
    pub full_count: usize,
    pub outputs: OutputPaths,
}

pub fn run(options: &RunOptions) -> Result<RunSummary> {
    let thresholds = Thresholds::new(options.core_coca_max, options.full_coca_max)?;
    let paths = DataPaths::resolve(&options.data_dir);

    if options.download {
        println!("[1/4] データソースを取得中...");
        let config = Config::load(options.config.as_deref())?;
        fetch::download_sources(&paths, &config)?;
        println!();
    } else {
        println!("[1/4] データソース取得をスキップ（--download 未指定）\n");
    }

    paths.ensure_present()?;

    println!("[2/4] データソースを読み込み中...");
    let sources = loader::load_sources(&paths)?;
    println!();

    println!(
        "[3/4] 層を構築してエントリを生成中... (core ≤ {}, full ≤ {})",
        thresholds.core_max(),
        thresholds.full_max()
    );
    let lexicon = build_lexicon(&sources, thresholds);
    println!(
        "✔ core: {}語 (A={}, B={}) / full: {}語 (C={}, D={}, E={})\n",
        lexicon.core.len(),
        lexicon.stats.layer_a,
        lexicon.stats.layer_b,
        lexicon.full.len(),
        lexicon.stats.layer_c,
        lexicon.stats.layer_d,
        lexicon.stats.layer_e
    );

    println!("[4/4] JSON と統計を書き出し中...");
    let outputs = export::write_outputs(&lexicon, &options.output_dir)?;
    println!("✔ {}", outputs.core.display());
    println!("✔ {}", outputs.full.display());
    println!("✔ {}", outputs.stats.display());

    Ok(RunSummary {
        core_count: lexicon.core.len(),
        full_count: lexicon.full.len(),
        outputs,
    })
}
