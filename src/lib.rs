//! TOEFL 词库生成ツール
//!
//! ソースの取得・読み込み・書き出しを担当し、
//! 統合ロジックは `toefl_vocab_common` に委譲する。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod loader;
pub mod pipeline;
