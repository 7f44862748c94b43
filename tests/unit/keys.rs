//! Key layout of the three counter families.

use tallydex::codec::keys::{self, CORPUS, DOC_TERM, SEPARATOR, TERM_DOC};
use tallydex::codec::{decode_count, encode_count};
use tallydex::Corruption;

#[test]
fn test_family_layouts() {
    assert_eq!(keys::doc_term_key("doc1", "hello"), b"ftdoc1\x00hello".to_vec());
    assert_eq!(keys::corpus_key("hello"), b"dfhello".to_vec());
    assert_eq!(keys::term_doc_key("hello", "doc1"), b"tfhello\x00doc1".to_vec());
}

#[test]
fn test_family_tags_are_two_bytes() {
    for tag in [DOC_TERM, CORPUS, TERM_DOC] {
        assert_eq!(tag.len(), 2);
        assert!(!tag.contains(&SEPARATOR));
    }
}

#[test]
fn test_decode_splits_at_first_separator() {
    let (a, b) = keys::decode(b"x\x00y\x00z").unwrap();
    assert_eq!(a, b"x");
    assert_eq!(b, b"y\x00z");
}

#[test]
fn test_decode_without_separator_is_corruption() {
    assert_eq!(
        keys::decode(b"nosep"),
        Err(Corruption::MissingSeparator {
            key: b"nosep".to_vec()
        })
    );
}

#[test]
fn test_empty_components_round_trip() {
    let key = keys::encode(b"", b"");
    assert_eq!(key, vec![SEPARATOR]);
    assert_eq!(keys::decode(&key).unwrap(), (&b""[..], &b""[..]));
}

#[test]
fn test_term_prefix_does_not_match_longer_terms() {
    let prefix = keys::term_docs_prefix("hell");
    assert!(!keys::term_doc_key("hello", "a").starts_with(&prefix));
    assert!(keys::term_doc_key("hell", "a").starts_with(&prefix));
}

#[test]
fn test_counts_are_big_endian() {
    assert_eq!(encode_count(258), [0, 0, 1, 2]);
    assert_eq!(decode_count(b"k", &[0, 0, 1, 2]).unwrap(), 258);
    assert_eq!(decode_count(b"k", &encode_count(u32::MAX)).unwrap(), u32::MAX);
}

#[test]
fn test_wrong_width_count_is_corruption() {
    for value in [&[][..], &[1][..], &[0, 0, 0, 0, 1][..]] {
        assert_eq!(
            decode_count(b"k", value),
            Err(Corruption::CounterWidth {
                key: b"k".to_vec(),
                len: value.len()
            })
        );
    }
}
