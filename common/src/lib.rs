//! TOEFL Vocab Common Library
//!
//! 複数ソースの統合・層構築・並べ替え・エントリ生成（I/O なし）

pub mod types;
pub mod error;
pub mod normalize;
pub mod merge;
pub mod tiers;
pub mod ordering;
pub mod assembler;
pub mod stats;
pub mod lexicon;

pub use types::{
    AcademicWordSet, FinalEntry, FrequencyMap, FrequencyRecord, HeadwordMap, HeadwordRecord,
    SubjectTagMap, Tier,
};
pub use error::{Error, Result};
pub use merge::{merge_into, Merge};
pub use tiers::{build_layers, Thresholds, TierLayers};
pub use ordering::{core_order, full_order, sort_by_rank};
pub use assembler::make_entries;
pub use stats::{Coverage, LexiconStats};
pub use lexicon::{build_lexicon, Lexicon, Sources};
