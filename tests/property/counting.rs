//! Counter invariants over random corpora.

use proptest::prelude::*;
use tallydex::{Index, MemoryStore, VectorIndex};

use crate::common::{oracle_corpus_counts, oracle_term_counts};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Small vocabulary so documents share terms.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "hello".to_string(),
        "world".to_string(),
        "tiger".to_string(),
        "rumic".to_string(),
        "café".to_string(),
        "x".to_string(),
    ])
}

fn separator_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        " ".to_string(),
        "  ".to_string(),
        "\t".to_string(),
        "\n ".to_string(),
    ])
}

/// Text with varied whitespace, sometimes leading or trailing.
fn text_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec((word_strategy(), separator_strategy()), 0..8),
        any::<bool>(),
    )
        .prop_map(|(parts, lead)| {
            let mut text = if lead { " ".to_string() } else { String::new() };
            for (word, sep) in parts {
                text.push_str(&word);
                text.push_str(&sep);
            }
            text
        })
}

/// Documents with distinct names; a name may be indexed more than once.
fn corpus_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(
        (prop::sample::select(vec!["a", "b", "c", "d"]), text_strategy()),
        1..8,
    )
    .prop_map(|docs| {
        docs.into_iter()
            .map(|(name, text)| (name.to_string(), text))
            .collect()
    })
}

fn index_corpus(store: &MemoryStore, docs: &[(String, String)]) -> VectorIndex<MemoryStore> {
    let mut index = VectorIndex::open(store.clone()).unwrap();
    for (name, text) in docs {
        index.add(name, text).unwrap();
    }
    index
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// ft(d, t) == tf(t, d) == occurrences of t across every add of d.
    #[test]
    fn prop_pair_counts_match_occurrences(docs in corpus_strategy()) {
        let store = MemoryStore::new();
        let index = index_corpus(&store, &docs);

        let mut expected = std::collections::BTreeMap::new();
        for (name, text) in &docs {
            for (term, n) in oracle_term_counts(text) {
                *expected.entry((name.clone(), term)).or_insert(0u32) += n;
            }
        }

        for ((name, term), n) in &expected {
            prop_assert_eq!(index.doc_term_count(name, term).unwrap(), *n);
            prop_assert_eq!(index.term_doc_count(term, name).unwrap(), *n);
        }
    }

    /// df(t) == Σ_d ft(d, t), in the store and in the cache.
    #[test]
    fn prop_corpus_counts_are_sums(docs in corpus_strategy()) {
        let store = MemoryStore::new();
        let index = index_corpus(&store, &docs);
        let expected = oracle_corpus_counts(&docs);

        let cache = index.corpus_counts().unwrap();
        prop_assert_eq!(cache.len(), expected.len());
        for (term, n) in &expected {
            prop_assert_eq!(index.corpus_count(term).unwrap(), *n);
            prop_assert_eq!(cache.get(term), Some(*n));
        }
        prop_assert!(index.verify().unwrap().is_consistent());
    }

    /// A reopened index rebuilds exactly the cache it had before close.
    #[test]
    fn prop_cache_survives_reopen(docs in corpus_strategy()) {
        let store = MemoryStore::new();
        let mut index = index_corpus(&store, &docs);
        let mut before: Vec<(String, u32)> = index
            .corpus_counts()
            .unwrap()
            .iter()
            .map(|(term, n)| (term.to_string(), n))
            .collect();
        before.sort();
        index.close().unwrap();

        let reopened = VectorIndex::open(store).unwrap();
        let mut after: Vec<(String, u32)> = reopened
            .corpus_counts()
            .unwrap()
            .iter()
            .map(|(term, n)| (term.to_string(), n))
            .collect();
        after.sort();
        prop_assert_eq!(before, after);
    }

    /// Search returns exactly the documents sharing a term with the query.
    #[test]
    fn prop_results_are_candidates(docs in corpus_strategy(), query in text_strategy()) {
        let store = MemoryStore::new();
        let index = index_corpus(&store, &docs);

        let query_terms = oracle_term_counts(&query);
        let mut expected: Vec<String> = docs
            .iter()
            .filter(|(_, text)| {
                oracle_term_counts(text).keys().any(|t| query_terms.contains_key(t))
            })
            .map(|(name, _)| name.clone())
            .collect();
        expected.sort();
        expected.dedup();

        let mut results = index.search(&query).unwrap();
        results.sort();
        prop_assert_eq!(results, expected);
    }
}
