//! Property tests for the pipeline stages

use keyterm_core::{
    decode, hits, splitter, AggregationSettings, Aggregator, Config, EventKind, FnTokenizer,
    Input, Keyword, Processor, Snapshot, Tokenizer,
};
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

fn whitespace() -> Arc<dyn Tokenizer> {
    Arc::new(FnTokenizer::new(|text: &str| text.split_whitespace().collect()))
}

/// Sentences built from a small vocabulary so that hits and qualifying
/// terms occur often
fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!["ab", "abc", "abd", "xab", "x", "yy", "北京", "北京市"]),
        1..6,
    )
    .prop_map(|words| words.join(" "))
}

fn corpus() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(sentence(), 0..40)
}

proptest! {
    #[test]
    fn decoder_is_total(raw in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode(&raw);
    }

    #[test]
    fn decoder_round_trips_utf8(text in "\\PC{0,200}") {
        prop_assert_eq!(decode(text.as_bytes()), text);
    }

    #[test]
    fn splitter_keeps_non_empty_segments_in_order(text in "[a-c 。！？\n,.!?；;]{0,80}") {
        let segments: Vec<&str> = splitter::split(&text).collect();

        for segment in &segments {
            prop_assert!(!segment.trim().is_empty());
            prop_assert!(!segment.chars().any(splitter::is_delimiter));
        }

        // Every segment occurs in the input after the previous one.
        let mut offset = 0;
        for segment in &segments {
            let found = text[offset..].find(segment);
            prop_assert!(found.is_some());
            offset += found.unwrap_or(0) + segment.len();
        }

        let kept: String = segments.concat();
        let expected: String = text
            .chars()
            .filter(|c| !splitter::is_delimiter(*c) && !c.is_whitespace())
            .collect();
        prop_assert_eq!(
            kept.chars().filter(|c| !c.is_whitespace()).collect::<String>(),
            expected
        );
    }

    #[test]
    fn filter_keeps_exactly_literal_matches(
        sentences in prop::collection::vec("[ab北京 ]{0,8}", 0..20),
        keyword in "[ab北京]{1,3}",
    ) {
        let keyword = Keyword::new(keyword).unwrap();
        let kept = hits::filter(sentences.iter().map(String::as_str), &keyword);
        let expected: Vec<String> = sentences
            .iter()
            .filter(|s| s.contains(keyword.as_str()))
            .cloned()
            .collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn qualifying_terms_contain_and_exceed_keyword(
        token in "[ab北京]{0,6}",
        keyword in "[ab北京]{1,3}",
    ) {
        let keyword = Keyword::new(keyword).unwrap();
        let expected = token.contains(keyword.as_str())
            && token.chars().count() > keyword.as_str().chars().count();
        prop_assert_eq!(keyword.qualifies(&token), expected);
    }

    #[test]
    fn aggregator_emits_ceil_total_over_batch(
        hits in corpus(),
        batch_size in 1usize..8,
    ) {
        let total = hits.len();
        let snapshots: Vec<Snapshot> = Aggregator::new(
            hits,
            Keyword::new("ab").unwrap(),
            whitespace(),
            AggregationSettings { batch_size, top_n: 5 },
        )
        .map(|s| s.unwrap())
        .collect();

        prop_assert_eq!(snapshots.len(), total.div_ceil(batch_size));
        if let Some(last) = snapshots.last() {
            prop_assert_eq!(last.processed, total);
            prop_assert!(last.is_final());
        }
        prop_assert!(snapshots.iter().rev().skip(1).all(|s| !s.is_final()));
    }

    #[test]
    fn counts_never_decrease(hits in corpus(), batch_size in 1usize..8) {
        let snapshots: Vec<Snapshot> = Aggregator::new(
            hits,
            Keyword::new("ab").unwrap(),
            whitespace(),
            AggregationSettings { batch_size, top_n: usize::MAX },
        )
        .map(|s| s.unwrap())
        .collect();

        let mut previous: HashMap<String, u64> = HashMap::new();
        for snapshot in &snapshots {
            let current: HashMap<String, u64> = snapshot
                .ranked_terms
                .iter()
                .map(|t| (t.term.clone(), t.count))
                .collect();
            for (term, count) in &previous {
                prop_assert!(current.get(term).copied().unwrap_or(0) >= *count);
            }
            previous = current;
        }
    }

    #[test]
    fn rankings_are_bounded_sorted_and_unique(
        hits in corpus(),
        batch_size in 1usize..8,
        top_n in 0usize..5,
    ) {
        let aggregator = Aggregator::new(
            hits,
            Keyword::new("ab").unwrap(),
            whitespace(),
            AggregationSettings { batch_size, top_n },
        );

        for snapshot in aggregator {
            let ranked = snapshot.unwrap().ranked_terms;
            prop_assert!(ranked.len() <= top_n);
            prop_assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));

            let mut terms: Vec<&str> = ranked.iter().map(|t| t.term.as_str()).collect();
            terms.sort_unstable();
            terms.dedup();
            prop_assert_eq!(terms.len(), ranked.len());
        }
    }

    #[test]
    fn final_counts_match_naive_recount(hits in corpus(), batch_size in 1usize..8) {
        let keyword = Keyword::new("ab").unwrap();
        let mut expected: HashMap<&str, u64> = HashMap::new();
        for token in hits.iter().flat_map(|h| h.split_whitespace()) {
            if keyword.qualifies(token) {
                *expected.entry(token).or_default() += 1;
            }
        }

        let last = Aggregator::new(
            hits.clone(),
            keyword.clone(),
            whitespace(),
            AggregationSettings { batch_size, top_n: usize::MAX },
        )
        .map(|s| s.unwrap())
        .last();

        let actual: HashMap<&str, u64> = last
            .iter()
            .flat_map(|s| s.ranked_terms.iter())
            .map(|t| (t.term.as_str(), t.count))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn stream_ends_with_exactly_one_terminal_event(
        hits in corpus(),
        batch_size in 1usize..8,
    ) {
        let text = hits.join("。");
        let config = Config::builder().batch_size(batch_size).build().unwrap();
        let events: Vec<_> = Processor::with_config(config, whitespace())
            .stream_input(Input::from_text(text), "ab", 5)
            .unwrap()
            .collect();

        prop_assert!(!events.is_empty());
        let terminal = events.iter().filter(|e| e.is_terminal()).count();
        prop_assert_eq!(terminal, 1);
        prop_assert_eq!(events.last().map(|e| e.kind()), Some(EventKind::Done));
    }
}
