//! 並び順の決定
//!
//! 層内は「順位あり（昇順）→ 順位なし」、同順位・順位なしは辞書順。
//! 集合の反復順には依存しない。

use crate::tiers::{rank_of, TierLayers};
use crate::types::{FrequencyMap, Tier};
use std::collections::HashSet;

/// 順位で並べ替え（重複は除去）
pub fn sort_by_rank<'a, I>(words: I, frequency: &FrequencyMap) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let unique: HashSet<&String> = words.into_iter().collect();
    let mut keyed: Vec<(bool, u32, &String)> = unique
        .into_iter()
        .map(|w| match rank_of(w, frequency) {
            Some(rank) => (false, rank, w),
            None => (true, u32::MAX, w),
        })
        .collect();
    keyed.sort();
    keyed.into_iter().map(|(_, _, w)| w.clone()).collect()
}

/// core 出力の単語順
pub fn core_order(layers: &TierLayers, frequency: &FrequencyMap) -> Vec<(String, Tier)> {
    sort_by_rank(&layers.core, frequency)
        .into_iter()
        .map(|w| (w, Tier::Core))
        .collect()
}

/// full 出力の単語順
///
/// core → extended → subject → supplementary の順に連結し、
/// 2回目以降の出現は捨てる（層は最初の割り当てのまま）。
pub fn full_order(layers: &TierLayers, frequency: &FrequencyMap) -> Vec<(String, Tier)> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();

    for (tier, words) in layers.tier_sets() {
        for word in sort_by_rank(words, frequency) {
            if seen.insert(word.clone()) {
                ordered.push((word, tier));
            }
        }
    }

    ordered
}
