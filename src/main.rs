use clap::Parser;
use toefl_vocab_rust::{cli, error, pipeline};
use cli::Cli;
use error::Result;
use pipeline::RunOptions;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("📚 toefl-vocab - 词库生成\n");

    let summary = pipeline::run(&RunOptions::from(&cli))?;

    println!("\n✅ 完了: core={}語, full={}語", summary.core_count, summary.full_count);
    if let Some(dir) = summary.outputs.core.parent() {
        println!("   出力先: {}", dir.display());
    }

    Ok(())
}
