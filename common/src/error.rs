//! エラー型定義

use thiserror::Error;

/// 語彙ビルドの入力エラー
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// 階層の閾値が不正
    #[error("閾値エラー: {0}")]
    InvalidThreshold(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
