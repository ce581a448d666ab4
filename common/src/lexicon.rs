//! 词库構築パイプライン（純粋部分）
//!
//! 読み込み済みの4ソースと閾値から、層・core/full エントリ・統計を生成する。

use crate::assembler::make_entries;
use crate::ordering::{core_order, full_order};
use crate::stats::LexiconStats;
use crate::tiers::{build_layers, Thresholds, TierLayers};
use crate::types::{AcademicWordSet, FinalEntry, FrequencyMap, HeadwordMap, SubjectTagMap};

/// 読み込み済みソース一式
#[derive(Debug, Clone, Default)]
pub struct Sources {
    /// 見出し語辞書（候補語の母集団）
    pub headwords: HeadwordMap,
    /// 頻度辞書
    pub frequency: FrequencyMap,
    /// 科目タグ
    pub subject_tags: SubjectTagMap,
    /// AWL
    pub academic: AcademicWordSet,
}

/// 構築結果
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub layers: TierLayers,
    pub core: Vec<FinalEntry>,
    pub full: Vec<FinalEntry>,
    pub stats: LexiconStats,
}

/// 词库を構築する
pub fn build_lexicon(sources: &Sources, thresholds: Thresholds) -> Lexicon {
    let layers = build_layers(
        &sources.headwords,
        &sources.frequency,
        &sources.subject_tags,
        &sources.academic,
        thresholds,
    );

    let core_words = core_order(&layers, &sources.frequency);
    let full_words = full_order(&layers, &sources.frequency);

    let core = make_entries(
        &core_words,
        &sources.headwords,
        &sources.frequency,
        &sources.subject_tags,
        &sources.academic,
    );
    let full = make_entries(
        &full_words,
        &sources.headwords,
        &sources.frequency,
        &sources.subject_tags,
        &sources.academic,
    );

    let stats = LexiconStats::compute(&layers, &core, &full, &sources.subject_tags, &sources.academic);

    Lexicon { layers, core, full, stats }
}
