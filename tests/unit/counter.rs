//! Read-modify-write counters against the in-memory store.

use tallydex::codec::encode_count;
use tallydex::counter::{increment, read};
use tallydex::{Error, KvStore, MemoryStore};

#[test]
fn test_absent_counter_reads_zero() {
    let store = MemoryStore::new();
    assert_eq!(read(&store, b"dfx").unwrap(), 0);
    assert!(store.is_empty());
}

#[test]
fn test_first_increment_writes_one() {
    let store = MemoryStore::new();
    assert_eq!(increment(&store, b"dfx").unwrap(), 1);
    assert_eq!(store.get(b"dfx").unwrap(), Some(vec![0, 0, 0, 1]));
}

#[test]
fn test_increments_accumulate() {
    let store = MemoryStore::new();
    for expected in 1..=300 {
        assert_eq!(increment(&store, b"dfx").unwrap(), expected);
    }
    assert_eq!(read(&store, b"dfx").unwrap(), 300);
}

#[test]
fn test_increment_at_max_overflows_without_writing() {
    let store = MemoryStore::new();
    store.put(b"dfx", &encode_count(u32::MAX)).unwrap();
    match increment(&store, b"dfx") {
        Err(Error::Overflow { key }) => assert_eq!(key, b"dfx".to_vec()),
        other => panic!("expected overflow, got {other:?}"),
    }
    assert_eq!(read(&store, b"dfx").unwrap(), u32::MAX);
}

#[test]
fn test_increment_of_malformed_value_is_corruption() {
    let store = MemoryStore::new();
    store.put(b"dfx", &[1, 2, 3]).unwrap();
    let err = increment(&store, b"dfx").unwrap_err();
    assert!(err.is_corruption());
    assert_eq!(store.get(b"dfx").unwrap(), Some(vec![1, 2, 3]));
}

#[test]
fn test_counters_are_independent() {
    let store = MemoryStore::new();
    increment(&store, b"dfa").unwrap();
    increment(&store, b"dfa").unwrap();
    increment(&store, b"dfb").unwrap();
    assert_eq!(read(&store, b"dfa").unwrap(), 2);
    assert_eq!(read(&store, b"dfb").unwrap(), 1);
}
