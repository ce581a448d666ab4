//! 統計集計
//!
//! 構築済みの層とエントリ列だけを入力とする純粋な集計。

use crate::tiers::TierLayers;
use crate::types::{AcademicWordSet, FinalEntry, SubjectTagMap};
use std::collections::HashMap;
use std::fmt::Write;

/// 割合（分母が 0 以下なら 0.0）
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

/// 1出力分のフィールド充足状況
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coverage {
    pub total: usize,
    pub with_phonetic: usize,
    pub with_rank: usize,
    pub awl_overlap: usize,
}

impl Coverage {
    pub fn phonetic_ratio(&self) -> f64 {
        ratio(self.with_phonetic, self.total)
    }

    pub fn rank_ratio(&self) -> f64 {
        ratio(self.with_rank, self.total)
    }
}

/// 実行全体の統計
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexiconStats {
    pub layer_a: usize,
    pub layer_b: usize,
    pub layer_c: usize,
    pub layer_d: usize,
    pub layer_e: usize,
    pub core: Coverage,
    pub full: Coverage,
    /// 科目ラベルの出現数（件数降順、同数はラベル順）
    pub subject_distribution: Vec<(String, usize)>,
}

fn coverage(entries: &[FinalEntry], awl_overlap: usize) -> Coverage {
    Coverage {
        total: entries.len(),
        with_phonetic: entries.iter().filter(|e| !e.phonetic.is_empty()).count(),
        with_rank: entries.iter().filter(|e| e.coca_rank.is_some()).count(),
        awl_overlap,
    }
}

impl LexiconStats {
    pub fn compute(
        layers: &TierLayers,
        core_entries: &[FinalEntry],
        full_entries: &[FinalEntry],
        subject_tags: &SubjectTagMap,
        academic: &AcademicWordSet,
    ) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for word in &layers.full {
            for label in subject_tags.get(word).into_iter().flatten() {
                *counts.entry(label.as_str()).or_insert(0) += 1;
            }
        }

        let mut subject_distribution: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(label, count)| (label.to_string(), count))
            .collect();
        subject_distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            layer_a: layers.layer_a.len(),
            layer_b: layers.layer_b.len(),
            layer_c: layers.layer_c.len(),
            layer_d: layers.layer_d.len(),
            layer_e: layers.layer_e.len(),
            core: coverage(core_entries, layers.core.intersection(academic).count()),
            full: coverage(full_entries, layers.full.intersection(academic).count()),
            subject_distribution,
        }
    }

    /// `stats.txt` 形式のテキストに整形
    pub fn render(&self) -> String {
        let mut out = String::new();

        // String への書き込みは失敗しない
        let _ = writeln!(out, "[Stats] Core");
        let _ = writeln!(out, "core_total={}", self.core.total);
        let _ = writeln!(out, "layer_a={}", self.layer_a);
        let _ = writeln!(out, "layer_b={}", self.layer_b);
        let _ = writeln!(out);
        let _ = writeln!(out, "[Stats] Full");
        let _ = writeln!(out, "full_total={}", self.full.total);
        let _ = writeln!(out, "layer_c={}", self.layer_c);
        let _ = writeln!(out, "layer_d={}", self.layer_d);
        let _ = writeln!(out, "layer_e={}", self.layer_e);
        let _ = writeln!(out);
        render_coverage(&mut out, "Core", &self.core);
        let _ = writeln!(out);
        render_coverage(&mut out, "Full", &self.full);
        let _ = writeln!(out);
        let _ = writeln!(out, "[Subject Distribution]");
        if self.subject_distribution.is_empty() {
            let _ = writeln!(out, "(empty)");
        } else {
            for (label, count) in &self.subject_distribution {
                let _ = writeln!(out, "{}={}", label, count);
            }
        }

        out
    }
}

fn render_coverage(out: &mut String, name: &str, coverage: &Coverage) {
    let _ = writeln!(out, "[Coverage] {}", name);
    let _ = writeln!(
        out,
        "phonetic_coverage={}/{} ({:.2}%)",
        coverage.with_phonetic,
        coverage.total,
        coverage.phonetic_ratio() * 100.0
    );
    let _ = writeln!(
        out,
        "coca_coverage={}/{} ({:.2}%)",
        coverage.with_rank,
        coverage.total,
        coverage.rank_ratio() * 100.0
    );
    let _ = writeln!(out, "awl_overlap={}", coverage.awl_overlap);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn entry(word: &str, phonetic: &str, rank: Option<u32>) -> FinalEntry {
        FinalEntry {
            word: word.to_string(),
            phonetic: phonetic.to_string(),
            coca_rank: rank,
            ..Default::default()
        }
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(ratio(0, 0), 0.0);
        assert_eq!(ratio(5, 0), 0.0);
        assert!((ratio(1, 4) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_coverage() {
        let stats = LexiconStats::compute(
            &TierLayers::default(),
            &[],
            &[],
            &SubjectTagMap::new(),
            &AcademicWordSet::new(),
        );
        assert_eq!(stats.core.phonetic_ratio(), 0.0);
        assert_eq!(stats.full.rank_ratio(), 0.0);

        let report = stats.render();
        assert!(report.contains("phonetic_coverage=0/0 (0.00%)"));
        assert!(report.contains("(empty)"));
    }

    #[test]
    fn test_compute_counts() {
        let layers = TierLayers {
            layer_a: set(&["abate"]),
            layer_b: set(&["zephyr"]),
            core: set(&["abate", "zephyr"]),
            layer_d: set(&["erosion", "fossil"]),
            full: set(&["abate", "zephyr", "erosion", "fossil"]),
            ..Default::default()
        };
        let core_entries = vec![entry("abate", "/ə'beɪt/", Some(4200)), entry("zephyr", "", None)];
        let mut full_entries = core_entries.clone();
        full_entries.push(entry("erosion", "/ɪ'rəʊʒn/", Some(9000)));
        full_entries.push(entry("fossil", "", None));

        let mut subjects = SubjectTagMap::new();
        subjects.insert("erosion".to_string(), set(&["地质", "生态"]));
        subjects.insert("fossil".to_string(), set(&["地质"]));
        subjects.insert("unrelated".to_string(), set(&["历史"]));

        let stats = LexiconStats::compute(&layers, &core_entries, &full_entries, &subjects, &set(&["zephyr"]));

        assert_eq!(stats.core.total, 2);
        assert_eq!(stats.core.with_phonetic, 1);
        assert_eq!(stats.full.with_rank, 2);
        assert_eq!(stats.core.awl_overlap, 1);
        assert_eq!(stats.full.awl_overlap, 1);
        assert_eq!(
            stats.subject_distribution,
            vec![("地质".to_string(), 2), ("生态".to_string(), 1)]
        );

        let report = stats.render();
        assert!(report.contains("core_total=2"));
        assert!(report.contains("layer_d=2"));
        assert!(report.contains("phonetic_coverage=1/2 (50.00%)"));
        assert!(report.contains("地质=2\n生态=1\n"));
    }
}
