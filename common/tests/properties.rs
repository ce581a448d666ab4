//! 層構築・並べ替え・ID 採番の性質テスト

use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use toefl_vocab_common::{
    build_lexicon, sort_by_rank, FrequencyRecord, HeadwordRecord, Merge, Sources, Thresholds,
};

const WORDS: &[&str] = &[
    "abate", "zephyr", "ecology", "erosion", "fossil", "glacier", "habitat", "igneous",
    "journal", "kinetic", "lunar", "magma", "nectar", "orbit", "plankton", "quartz",
];

const EXAM_TAGS: &[&str] = &["toefl", "cet4", "cet6", "gk"];

fn word() -> impl Strategy<Value = String> {
    prop::sample::select(WORDS).prop_map(str::to_string)
}

fn frequency_record() -> impl Strategy<Value = FrequencyRecord> {
    (
        prop::option::of(1u32..30_000),
        prop::collection::btree_set(prop::sample::select(EXAM_TAGS), 0..3),
        "[a-z]{0,4}",
    )
        .prop_map(|(rank, tags, pos)| FrequencyRecord {
            phonetic: String::new(),
            pos,
            coca_rank: rank,
            tags: tags.into_iter().map(str::to_string).collect(),
            meaning: String::new(),
        })
}

fn sources() -> impl Strategy<Value = Sources> {
    (
        prop::collection::btree_set(word(), 0..12),
        prop::collection::hash_map(word(), frequency_record(), 0..12),
        prop::collection::hash_map(word(), prop::collection::btree_set("[a-z]{2,5}", 1..3), 0..6),
        prop::collection::btree_set(word(), 0..5),
    )
        .prop_map(|(headwords, frequency, subject_tags, academic)| Sources {
            headwords: headwords
                .into_iter()
                .map(|w| (w, HeadwordRecord::default()))
                .collect(),
            frequency,
            subject_tags,
            academic,
        })
}

fn thresholds() -> impl Strategy<Value = Thresholds> {
    (1i64..20_000, 0i64..20_000)
        .prop_map(|(core, extra)| Thresholds::new(core, core + extra).unwrap())
}

proptest! {
    #[test]
    fn layers_are_disjoint_and_core_in_full(sources in sources(), thresholds in thresholds()) {
        let layers = build_lexicon(&sources, thresholds).layers;

        prop_assert!(layers.core.is_subset(&layers.full));
        prop_assert!(layers.layer_a.is_subset(&layers.core));
        prop_assert!(layers.layer_b.is_subset(&layers.core));

        let disjoint_sets = [&layers.core, &layers.layer_c, &layers.layer_d, &layers.layer_e];
        for (i, left) in disjoint_sets.iter().enumerate() {
            for right in &disjoint_sets[i + 1..] {
                prop_assert!(left.is_disjoint(right));
            }
        }
    }

    #[test]
    fn ids_are_contiguous_and_words_unique(sources in sources(), thresholds in thresholds()) {
        let lexicon = build_lexicon(&sources, thresholds);

        for entries in [&lexicon.core, &lexicon.full] {
            let width = entries.first().map(|e| e.id.len()).unwrap_or(0);
            for (i, entry) in entries.iter().enumerate() {
                let number: usize = entry.id.trim_start_matches("toefl_").parse().unwrap();
                prop_assert_eq!(number, i + 1);
                prop_assert_eq!(entry.id.len(), width);
            }

            let unique: HashSet<&str> = entries.iter().map(|e| e.word.as_str()).collect();
            prop_assert_eq!(unique.len(), entries.len());
        }
    }

    #[test]
    fn known_ranks_sort_ascending(sources in sources()) {
        let words: BTreeSet<String> = sources.frequency.keys().cloned().collect();
        let ordered = sort_by_rank(&words, &sources.frequency);

        let ranks: Vec<Option<u32>> = ordered
            .iter()
            .map(|w| sources.frequency[w].coca_rank)
            .collect();
        let known: Vec<u32> = ranks.iter().flatten().copied().collect();
        prop_assert!(known.windows(2).all(|w| w[0] <= w[1]));

        let first_unknown = ranks.iter().position(Option::is_none).unwrap_or(ranks.len());
        prop_assert!(ranks[first_unknown..].iter().all(Option::is_none));
    }

    #[test]
    fn frequency_merge_is_idempotent(record in frequency_record()) {
        let mut merged = record.clone();
        merged.merge(record.clone());
        prop_assert_eq!(merged, record);
    }

    #[test]
    fn headword_merge_is_idempotent(meaning in "[a-z；]{0,10}", pos in "[a-z]{0,3}") {
        let record = HeadwordRecord { meaning, pos };
        let mut merged = record.clone();
        merged.merge(record.clone());
        prop_assert_eq!(merged, record);
    }
}
