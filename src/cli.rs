use clap::Parser;
use std::path::PathBuf;
use toefl_vocab_common::tiers::{DEFAULT_CORE_COCA_MAX, DEFAULT_FULL_COCA_MAX};

#[derive(Parser, Debug)]
#[command(name = "toefl-vocab")]
#[command(about = "複数の辞書ソースを統合して新托福词库（core / full）を生成", long_about = None)]
pub struct Cli {
    /// 処理前に不足しているデータソースを取得する
    #[arg(long)]
    pub download: bool,

    /// core 版の COCA 順位上限
    #[arg(long, default_value_t = DEFAULT_CORE_COCA_MAX as i64, allow_negative_numbers = true)]
    pub core_coca_max: i64,

    /// full 版の COCA 順位上限
    #[arg(long, default_value_t = DEFAULT_FULL_COCA_MAX as i64, allow_negative_numbers = true)]
    pub full_coca_max: i64,

    /// 出力ディレクトリ
    #[arg(short, long, default_value = "./output")]
    pub output_dir: PathBuf,

    /// データソースのディレクトリ
    #[arg(short, long, default_value = "./data")]
    pub data_dir: PathBuf,

    /// 取得設定ファイル（JSON）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 詳細ログを出力
    #[arg(short, long)]
    pub verbose: bool,
}
