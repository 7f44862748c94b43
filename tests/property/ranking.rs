//! Ranking order and determinism.

use proptest::prelude::*;
use tallydex::scoring::{compare_scored, rank};
use tallydex::{Index, ScoredDocument};

use crate::common::vector_index_with;

fn scored_strategy() -> impl Strategy<Value = Vec<ScoredDocument>> {
    prop::collection::vec(
        (
            "[a-e]{1,2}",
            prop::sample::select(vec![0.0, 0.5, 1.0, 2.5, f64::NAN]),
        ),
        0..12,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(name, score)| ScoredDocument::new(name, score))
            .collect()
    })
}

proptest! {
    /// Input order never changes the ranking.
    #[test]
    fn prop_rank_ignores_input_order(mut scored in scored_strategy()) {
        let forward: Vec<(String, u64)> = rank(scored.clone())
            .into_iter()
            .map(|s| (s.name, s.score.to_bits()))
            .collect();
        scored.reverse();
        let backward: Vec<(String, u64)> = rank(scored)
            .into_iter()
            .map(|s| (s.name, s.score.to_bits()))
            .collect();
        prop_assert_eq!(forward, backward);
    }

    /// Adjacent results are ordered by score descending, then name.
    #[test]
    fn prop_rank_is_sorted(scored in scored_strategy()) {
        let ranked = rank(scored);
        for pair in ranked.windows(2) {
            prop_assert!(compare_scored(&pair[0], &pair[1]).is_le());
        }
    }

    /// Same corpus in a different add order gives the same search results.
    #[test]
    fn prop_search_is_independent_of_add_order(query in "(hello|world|tiger|rumic)( (hello|world|tiger|rumic)){0,2}") {
        let docs = [
            ("a", "hello world"),
            ("b", "hello tiger tiger"),
            ("c", "rumic world"),
            ("d", "tiger world hello"),
        ];
        let mut reversed = docs;
        reversed.reverse();

        let forward = vector_index_with(&docs);
        let backward = vector_index_with(&reversed);
        prop_assert_eq!(forward.search(&query).unwrap(), backward.search(&query).unwrap());
    }
}

#[test]
fn test_nan_sorts_deterministically() {
    let ranked = rank(vec![
        ScoredDocument::new("b", 1.0),
        ScoredDocument::new("a", f64::NAN),
        ScoredDocument::new("c", 2.0),
    ]);
    let names: Vec<&str> = ranked.iter().map(|s| s.name.as_str()).collect();
    // Positive NaN is greater than every number under total ordering.
    assert_eq!(names, vec!["a", "c", "b"]);
}
