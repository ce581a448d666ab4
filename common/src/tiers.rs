//! 層（Tier）構築
//!
//! 見出し語辞書のキーを候補とし、頻度順位・AWL・科目タグ・試験タグから
//! 互いに素な層を集合演算で組み立てる。
//!
//! ## 構築順序
//! 1. layer_a: 順位 ≤ core_max の見出し語
//! 2. layer_b: AWL に含まれる見出し語
//! 3. core = layer_a ∪ layer_b
//! 4. layer_c: core_max < 順位 ≤ full_max の見出し語（core を除く）
//! 5. layer_d: 科目タグ付きの語（core, layer_c を除く）
//! 6. layer_e: 試験タグ付きの頻度辞書の語（上記すべてを除く）
//! 7. full = core ∪ layer_c ∪ layer_d ∪ layer_e

use crate::error::{Error, Result};
use crate::types::{AcademicWordSet, FrequencyMap, HeadwordMap, SubjectTagMap, Tier};
use std::collections::BTreeSet;

pub const DEFAULT_CORE_COCA_MAX: u32 = 5000;
pub const DEFAULT_FULL_COCA_MAX: u32 = 15000;

/// layer_e の対象となる試験タグ
pub const EXAM_CATEGORY_TAG: &str = "toefl";

/// core/full の COCA 順位上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    core_max: u32,
    full_max: u32,
}

impl Thresholds {
    /// 閾値を検証して生成する
    ///
    /// 両方とも正の整数で、`full_max >= core_max` であること。
    pub fn new(core_max: i64, full_max: i64) -> Result<Self> {
        if core_max <= 0 || full_max <= 0 {
            return Err(Error::InvalidThreshold(format!(
                "COCA 閾値は正の整数である必要があります (core={}, full={})",
                core_max, full_max
            )));
        }
        if full_max < core_max {
            return Err(Error::InvalidThreshold(format!(
                "full-coca-max ({}) は core-coca-max ({}) 以上である必要があります",
                full_max, core_max
            )));
        }

        let core_max = u32::try_from(core_max)
            .map_err(|_| Error::InvalidThreshold(format!("core-coca-max が大きすぎます: {}", core_max)))?;
        let full_max = u32::try_from(full_max)
            .map_err(|_| Error::InvalidThreshold(format!("full-coca-max が大きすぎます: {}", full_max)))?;

        Ok(Self { core_max, full_max })
    }

    pub fn core_max(&self) -> u32 {
        self.core_max
    }

    pub fn full_max(&self) -> u32 {
        self.full_max
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            core_max: DEFAULT_CORE_COCA_MAX,
            full_max: DEFAULT_FULL_COCA_MAX,
        }
    }
}

/// 層ごとの単語集合（1回の実行中は不変）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierLayers {
    pub layer_a: BTreeSet<String>,
    pub layer_b: BTreeSet<String>,
    pub core: BTreeSet<String>,
    pub layer_c: BTreeSet<String>,
    pub layer_d: BTreeSet<String>,
    pub layer_e: BTreeSet<String>,
    pub full: BTreeSet<String>,
}

impl TierLayers {
    /// 出力層と集合の対応（優先順）
    pub fn tier_sets(&self) -> [(Tier, &BTreeSet<String>); 4] {
        [
            (Tier::Core, &self.core),
            (Tier::Extended, &self.layer_c),
            (Tier::Subject, &self.layer_d),
            (Tier::Supplementary, &self.layer_e),
        ]
    }
}

/// 頻度辞書上の COCA 順位
pub fn rank_of(word: &str, frequency: &FrequencyMap) -> Option<u32> {
    frequency.get(word).and_then(|info| info.coca_rank)
}

/// 層を構築する
pub fn build_layers(
    headwords: &HeadwordMap,
    frequency: &FrequencyMap,
    subject_tags: &SubjectTagMap,
    academic: &AcademicWordSet,
    thresholds: Thresholds,
) -> TierLayers {
    let universe: BTreeSet<&str> = headwords.keys().map(String::as_str).collect();
    let core_max = thresholds.core_max();
    let full_max = thresholds.full_max();

    let layer_a: BTreeSet<String> = universe
        .iter()
        .filter(|w| matches!(rank_of(w, frequency), Some(r) if r <= core_max))
        .map(|w| w.to_string())
        .collect();

    let layer_b: BTreeSet<String> = universe
        .iter()
        .filter(|w| academic.contains(**w))
        .map(|w| w.to_string())
        .collect();

    let core: BTreeSet<String> = layer_a.union(&layer_b).cloned().collect();

    let layer_c: BTreeSet<String> = universe
        .iter()
        .filter(|w| matches!(rank_of(w, frequency), Some(r) if core_max < r && r <= full_max))
        .filter(|w| !core.contains(**w))
        .map(|w| w.to_string())
        .collect();

    let layer_d: BTreeSet<String> = subject_tags
        .keys()
        .filter(|w| !core.contains(*w) && !layer_c.contains(*w))
        .cloned()
        .collect();

    let layer_e: BTreeSet<String> = frequency
        .iter()
        .filter(|(w, _)| !core.contains(*w) && !layer_c.contains(*w) && !layer_d.contains(*w))
        .filter(|(_, info)| info.tags.contains(EXAM_CATEGORY_TAG))
        .map(|(w, _)| w.clone())
        .collect();

    let full: BTreeSet<String> = core
        .iter()
        .chain(&layer_c)
        .chain(&layer_d)
        .chain(&layer_e)
        .cloned()
        .collect();

    TierLayers {
        layer_a,
        layer_b,
        core,
        layer_c,
        layer_d,
        layer_e,
        full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FrequencyRecord, HeadwordRecord};

    fn headwords(words: &[&str]) -> HeadwordMap {
        words
            .iter()
            .map(|w| (w.to_string(), HeadwordRecord::default()))
            .collect()
    }

    fn ranked(word: &str, rank: Option<u32>, tags: &[&str]) -> (String, FrequencyRecord) {
        (
            word.to_string(),
            FrequencyRecord {
                coca_rank: rank,
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
        )
    }

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_thresholds_validation() {
        assert!(Thresholds::new(5000, 15000).is_ok());
        assert!(Thresholds::new(5000, 5000).is_ok());
        assert!(matches!(Thresholds::new(0, 15000), Err(Error::InvalidThreshold(_))));
        assert!(matches!(Thresholds::new(5000, -1), Err(Error::InvalidThreshold(_))));
        assert!(matches!(Thresholds::new(15000, 5000), Err(Error::InvalidThreshold(_))));
        assert!(matches!(Thresholds::new(1, i64::MAX), Err(Error::InvalidThreshold(_))));
    }

    #[test]
    fn test_thresholds_default() {
        let t = Thresholds::default();
        assert_eq!(t.core_max(), 5000);
        assert_eq!(t.full_max(), 15000);
    }

    #[test]
    fn test_core_boundary_is_inclusive() {
        let hw = headwords(&["edge", "over"]);
        let freq: FrequencyMap = [ranked("edge", Some(5000), &[]), ranked("over", Some(5001), &[])]
            .into_iter()
            .collect();
        let layers = build_layers(&hw, &freq, &SubjectTagMap::new(), &AcademicWordSet::new(), Thresholds::default());

        assert_eq!(layers.layer_a, set(&["edge"]));
        assert_eq!(layers.layer_c, set(&["over"]));
    }

    #[test]
    fn test_full_boundary_is_inclusive() {
        let hw = headwords(&["edge_full", "over_full"]);
        let freq: FrequencyMap = [ranked("edge_full", Some(15000), &[]), ranked("over_full", Some(15001), &[])]
            .into_iter()
            .collect();
        let layers = build_layers(&hw, &freq, &SubjectTagMap::new(), &AcademicWordSet::new(), Thresholds::default());

        assert_eq!(layers.layer_c, set(&["edge_full"]));
        assert!(!layers.full.contains("over_full"));
    }

    #[test]
    fn test_build_layers_example() {
        let hw = headwords(&["abate", "zephyr"]);
        let freq: FrequencyMap = [ranked("abate", Some(4200), &[]), ranked("zephyr", None, &[])]
            .into_iter()
            .collect();
        let academic = set(&["zephyr"]);

        let layers = build_layers(&hw, &freq, &SubjectTagMap::new(), &academic, Thresholds::default());

        assert_eq!(layers.layer_a, set(&["abate"]));
        assert_eq!(layers.layer_b, set(&["zephyr"]));
        assert_eq!(layers.core, set(&["abate", "zephyr"]));
        assert!(layers.layer_c.is_empty());
        assert_eq!(layers.full, layers.core);
    }

    #[test]
    fn test_exam_tagged_word_only_in_layer_e() {
        let hw = headwords(&["abate"]);
        let freq: FrequencyMap = [ranked("abate", Some(4200), &["toefl"]), ranked("ecology", None, &["toefl"])]
            .into_iter()
            .collect();

        let layers = build_layers(&hw, &freq, &SubjectTagMap::new(), &AcademicWordSet::new(), Thresholds::default());

        assert_eq!(layers.layer_e, set(&["ecology"]));
        assert!(!layers.core.contains("ecology"));
        assert!(layers.full.contains("ecology"));
    }

    #[test]
    fn test_layers_disjoint() {
        let hw = headwords(&["alpha", "beta", "gamma", "delta"]);
        let freq: FrequencyMap = [
            ranked("alpha", Some(10), &["toefl"]),
            ranked("beta", Some(9000), &["toefl"]),
            ranked("gamma", None, &["toefl"]),
            ranked("omega", Some(20000), &["toefl"]),
        ]
        .into_iter()
        .collect();
        let mut subjects = SubjectTagMap::new();
        subjects.insert("alpha".to_string(), set(&["生物"]));
        subjects.insert("beta".to_string(), set(&["生物"]));
        subjects.insert("gamma".to_string(), set(&["历史"]));

        let layers = build_layers(&hw, &freq, &subjects, &set(&["delta"]), Thresholds::default());

        assert_eq!(layers.core, set(&["alpha", "delta"]));
        assert_eq!(layers.layer_c, set(&["beta"]));
        assert_eq!(layers.layer_d, set(&["gamma"]));
        assert_eq!(layers.layer_e, set(&["omega"]));
        assert_eq!(layers.full.len(), 5);
    }

    #[test]
    fn test_untraceable_word_excluded() {
        let hw = headwords(&["orphan"]);
        let layers = build_layers(&hw, &FrequencyMap::new(), &SubjectTagMap::new(), &AcademicWordSet::new(), Thresholds::default());
        assert!(layers.full.is_empty());
    }
}
