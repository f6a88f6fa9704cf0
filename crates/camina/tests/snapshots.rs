//! Serialized shapes of the containers.

use camina::{Bunch, Catalog, Dictionary, Hybrid, Listing};

#[test]
fn dictionary_serializes_as_map() {
    let mut dictionary = Dictionary::from_iter([("b".to_string(), 2)]);
    dictionary.add(("a".to_string(), 1)).expect("add");
    insta::assert_json_snapshot!(dictionary, @r#"
    {
      "a": 1,
      "b": 2
    }
    "#);
}

#[test]
fn listing_serializes_as_sequence() {
    let listing = Listing::from(vec![1, 3, 4]);
    insta::assert_json_snapshot!(listing, @r#"
    [
      1,
      3,
      4
    ]
    "#);
}

#[test]
fn hybrid_serializes_in_order() {
    let mut hybrid: Hybrid<&'static str> = Hybrid::new();
    hybrid.add_all(["zebra", "apple"]).expect("add");
    insta::assert_json_snapshot!(hybrid, @r#"
    [
      "zebra",
      "apple"
    ]
    "#);
}

#[test]
fn catalog_serializes_contents_only() {
    let mut catalog: Catalog<bool> = Catalog::new();
    catalog.insert("enabled", true).expect("insert");
    insta::assert_json_snapshot!(catalog, @r#"
    {
      "enabled": true
    }
    "#);
}

#[test]
fn listing_deserializes_from_sequence() {
    let listing: Listing<u8> = serde_json::from_str("[5, 6]").expect("valid listing");
    assert_eq!(listing.as_slice(), &[5, 6]);
}
