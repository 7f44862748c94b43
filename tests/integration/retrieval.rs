//! Ranked and presence retrieval over the reference corpora.

use tallydex::codec::{encode_count, keys};
use tallydex::{Corruption, Error, Index, KvStore, MemoryStore, PresenceIndex, VectorIndex};

use crate::common::{assert_close, presence_index_with, vector_index_with, SCENARIO};

// ============================================================================
// VECTOR INDEX
// ============================================================================

const RANKED: [(&str, &str); 3] = [
    ("a", "hello hello hello hello world"),
    ("b", "hello tiger tiger"),
    ("c", "rumic tiger"),
];

#[test]
fn test_ranked_results() {
    let index = vector_index_with(&RANKED);
    assert_eq!(index.search("hello").unwrap(), vec!["a", "b"]);
    assert_eq!(index.search("tiger").unwrap(), vec!["b", "c"]);
    assert_eq!(index.search("world").unwrap(), vec!["a"]);
    assert!(index.search("nothing").unwrap().is_empty());
}

#[test]
fn test_ranked_scores() {
    // df: hello=5 world=1 tiger=3 rumic=1
    let index = vector_index_with(&RANKED);
    let scored = index.search_scored("tiger").unwrap();

    // q = {tiger: 1/3}
    // b = {hello: 1/5, tiger: 2/3}, c = {rumic: 1, tiger: 1/3}
    let q_mag = 1.0 / 9.0;
    let b_score = (1.0 / 3.0 * 2.0 / 3.0) / (q_mag * (1.0 / 25.0 + 4.0 / 9.0));
    let c_score = (1.0 / 3.0 * 1.0 / 3.0) / (q_mag * (1.0 + 1.0 / 9.0));

    assert_eq!(scored[0].name, "b");
    assert_close(scored[0].score, b_score);
    assert_eq!(scored[1].name, "c");
    assert_close(scored[1].score, c_score);
}

#[test]
fn test_multi_term_query_unions_candidates() {
    let index = vector_index_with(&SCENARIO);
    let mut results = index.search("tiger rumic").unwrap();
    results.sort();
    assert_eq!(results, vec!["b", "c"]);
}

#[test]
fn test_unknown_terms_do_not_change_scores() {
    let index = vector_index_with(&RANKED);
    let plain = index.search_scored("tiger").unwrap();
    let noisy = index.search_scored("tiger zebra").unwrap();
    assert_eq!(plain, noisy);
}

#[test]
fn test_equal_scores_order_by_name() {
    let index = vector_index_with(&[("z", "same"), ("m", "same"), ("a", "same")]);
    assert_eq!(index.search("same").unwrap(), vec!["a", "m", "z"]);
}

#[test]
fn test_indexes_work_behind_trait_objects() {
    let mut indexes: Vec<Box<dyn Index>> = vec![
        Box::new(VectorIndex::open(MemoryStore::new()).unwrap()),
        Box::new(PresenceIndex::open(MemoryStore::new()).unwrap()),
    ];
    for index in &mut indexes {
        for (name, text) in SCENARIO {
            index.add(name, text).unwrap();
        }
        let mut results = index.search("world").unwrap();
        results.sort();
        assert_eq!(results, vec!["a", "c"]);
        index.close().unwrap();
        assert!(matches!(index.search("world"), Err(Error::Closed)));
    }
}

#[test]
fn test_stats_and_verify() {
    let index = vector_index_with(&RANKED);
    let stats = index.stats().unwrap();
    assert_eq!(stats.documents, 3);
    assert_eq!(stats.terms, 4);
    assert_eq!(stats.tokens, 10);
    assert!(index.verify().unwrap().is_consistent());
}

#[test]
fn test_adding_a_document_twice_accumulates() {
    let mut index = vector_index_with(&[("a", "hello")]);
    index.add("a", "hello world").unwrap();
    assert_eq!(index.doc_term_count("a", "hello").unwrap(), 2);
    assert_eq!(index.corpus_count("hello").unwrap(), 2);
    assert_eq!(index.stats().unwrap().documents, 1);
}

#[test]
fn test_half_written_add_surfaces_as_corruption() {
    let store = MemoryStore::new();
    let mut index = VectorIndex::open(store.clone()).unwrap();
    index.add("a", "hello world").unwrap();
    store
        .put(&keys::doc_term_key("a", "orphan"), &encode_count(1))
        .unwrap();

    let err = index.search("hello").unwrap_err();
    assert!(err.is_corruption());
    assert!(matches!(
        err,
        Error::CorruptIndex(Corruption::MissingCorpusCount { .. })
    ));
    // Documents that never touched the orphan term still score.
    index.add("b", "tiger").unwrap();
    assert_eq!(index.search("tiger").unwrap(), vec!["b"]);
}

// ============================================================================
// PRESENCE INDEX
// ============================================================================

#[test]
fn test_presence_lookup() {
    let index = presence_index_with(&SCENARIO);
    assert_eq!(index.search("hello").unwrap(), vec!["a", "b"]);
    assert_eq!(index.search("tiger").unwrap(), vec!["b"]);
    assert_eq!(index.search("world").unwrap(), vec!["a", "c"]);
    assert!(index.search("zebra").unwrap().is_empty());
}
