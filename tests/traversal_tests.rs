//! Integration tests for path traversal behavior.
//!
//! Tests cover:
//! - Auto-vivification of missing intermediate containers
//! - Pop semantics for elements, entries, fields, and slots
//! - Cursor (gap) reads, insertions, and neighbor reporting
//! - Filter and whole-sequence steps
//! - Record field/slot capability errors
//! - Structural sharing of untouched siblings

#![forbid(unsafe_code)]

use lenspath::{access, path, Command, Found, Path, Record, TraversalError, Value, ValueKind};
use rstest::rstest;

fn store() -> Value {
    Value::map_from([
        ("name", Value::from("corner shop")),
        (
            "inventory",
            Value::seq([
                Value::map_from([("sku", Value::from("apple")), ("count", Value::from(3))]),
                Value::map_from([("sku", Value::from("pear")), ("count", Value::from(0))]),
                Value::map_from([("sku", Value::from("plum")), ("count", Value::from(7))]),
            ]),
        ),
    ])
}

// =============================================================================
// Auto-vivification Tests
// =============================================================================

#[rstest]
fn test_put_into_null_subject_builds_nested_mappings() {
    let rebuilt = path!["a", "b"].put_in(Value::Null, 5).unwrap();
    assert_eq!(
        rebuilt,
        Value::map_from([("a", Value::map_from([("b", 5)]))])
    );
}

#[rstest]
fn test_vivified_container_matches_successor_not_locator() {
    // The step after the missing key expects a sequence, so a sequence is
    // created even though the locator itself is a string key.
    let rebuilt = path!["log"]
        .after_last()
        .put_in(Value::Null, "first entry")
        .unwrap();
    assert_eq!(
        rebuilt,
        Value::map_from([("log", Value::seq(["first entry"]))])
    );
}

#[rstest]
fn test_update_of_missing_subtree_writes_transform_result() {
    let rebuilt = path!["counts", "apples"]
        .update_in(Value::Null, |found| {
            Value::Int(found.into_value().and_then(|v| v.as_int()).unwrap_or(0) + 1)
        })
        .unwrap();
    assert_eq!(
        rebuilt,
        Value::map_from([("counts", Value::map_from([("apples", 1)]))])
    );
}

// =============================================================================
// Pop Tests
// =============================================================================

#[rstest]
fn test_pop_removes_exactly_one_element() {
    let subject = Value::seq([Value::map_from([("x", 1)])]);
    let (found, remainder) = path![0].pop_in(subject).unwrap();
    assert_eq!(found, Found::Value(Value::map_from([("x", 1)])));
    assert_eq!(remainder, Value::seq(Vec::<Value>::new()));
}

#[rstest]
fn test_second_pop_at_an_index_removes_the_shifted_element() {
    let head = path![0];
    let subject = head.put_in(Value::seq([1, 2]), 99).unwrap();
    assert_eq!(subject, Value::seq([99, 2]));

    let (first, once) = head.pop_in(subject).unwrap();
    assert_eq!(first, Found::Value(Value::Int(99)));

    // Element 2 shifted into index 0, so it is what the second pop finds.
    let (second, twice) = head.pop_in(once).unwrap();
    assert_eq!(second, Found::Value(Value::Int(2)));
    assert_eq!(twice, Value::seq(Vec::<Value>::new()));
}

#[rstest]
fn test_pop_of_mapping_entry_removes_the_entry() {
    let subject = Value::map_from([("a", 1), ("b", 2)]);
    let (found, remainder) = path!["a"].pop_in(subject).unwrap();
    assert_eq!(found, Found::Value(Value::Int(1)));
    assert_eq!(remainder, Value::map_from([("b", 2)]));
}

#[rstest]
fn test_pop_through_every_element_leaves_empty_sequence() {
    let subject = Value::map_from([("xs", Value::seq([1, 2, 3]))]);
    let (_, remainder) = path!["xs", access::all()].pop_in(subject).unwrap();
    assert_eq!(
        remainder,
        Value::map_from([("xs", Value::seq(Vec::<Value>::new()))])
    );
}

#[rstest]
fn test_pop_of_null_entry_is_clean() {
    // A null entry reads as missing, so there is nothing to remove.
    let subject = Value::map_from([("a", Value::Null)]);
    let (found, remainder) = path!["a"].pop_in(subject.clone()).unwrap();
    assert!(found.is_absent());
    assert!(remainder.shares_identity(&subject));
}

#[rstest]
fn test_pop_of_whole_subject_yields_null() {
    let (found, remainder) = Path::empty().pop_in(Value::Int(5)).unwrap();
    assert_eq!(found, Found::Value(Value::Int(5)));
    assert_eq!(remainder, Value::Null);
}

// =============================================================================
// Cursor Tests
// =============================================================================

#[rstest]
#[case(1, vec![1, 99, 2, 3])]
#[case(0, vec![99, 1, 2, 3])]
#[case(3, vec![1, 2, 3, 99])]
#[case(9, vec![1, 2, 3, 99])] // past the end clamps to the final gap
fn test_cursor_insertion(#[case] offset: usize, #[case] expected: Vec<i64>) {
    let rebuilt = Path::empty()
        .before(offset)
        .put_in(Value::seq([1, 2, 3]), 99)
        .unwrap();
    assert_eq!(rebuilt, Value::seq(expected));
}

#[rstest]
fn test_after_last_appends_regardless_of_length() {
    let once = Path::empty().after_last().put_in(Value::seq([1]), 2).unwrap();
    let twice = Path::empty().after_last().put_in(once, 3).unwrap();
    assert_eq!(twice, Value::seq([1, 2, 3]));
}

#[rstest]
fn test_cursor_reports_neighbors() {
    let found = Path::empty()
        .before(2)
        .get_in(&Value::seq([1, 2, 3]))
        .unwrap();
    let Found::Cursor(position) = found else {
        panic!("expected a cursor position, got {found:?}");
    };
    assert_eq!(position.offset(), 2);
    assert_eq!(position.element_before(), Some(&Value::Int(2)));
    assert_eq!(position.element_after(), Some(&Value::Int(3)));
    assert!(!position.is_first());
    assert!(!position.is_last());
}

#[rstest]
fn test_pop_at_cursor_is_noop() {
    let subject = Value::seq([1, 2]);
    let (found, remainder) = Path::empty().before(1).pop_in(subject.clone()).unwrap();
    assert!(matches!(found, Found::Cursor(_)));
    assert!(remainder.shares_identity(&subject));
}

#[rstest]
fn test_between_each_interleaves_insertions() {
    let rebuilt = Path::empty()
        .between_each()
        .put_in(Value::seq([1, 2]), 0)
        .unwrap();
    assert_eq!(rebuilt, Value::seq([0, 1, 0, 2, 0]));
}

#[rstest]
fn test_between_each_clean_keeps_original() {
    let subject = Value::seq([1, 2]);
    let (found, remainder) = Path::empty()
        .between_each()
        .get_and_update_in(subject.clone(), |_| Command::Clean)
        .unwrap();
    assert!(matches!(found, Found::Many(ref gaps) if gaps.len() == 3));
    assert!(remainder.shares_identity(&subject));
}

// =============================================================================
// Filter and Whole-sequence Tests
// =============================================================================

fn out_of_stock(item: &Value) -> bool {
    item.as_map()
        .and_then(|fields| fields.get(&"count".into()))
        .and_then(Value::as_int)
        == Some(0)
}

#[rstest]
fn test_filter_selects_matching_elements() {
    let skus = path!["inventory", access::filter(out_of_stock), "sku"];
    let found = skus.get_in(&store()).unwrap();
    assert_eq!(found.into_values(), vec![Value::from("pear")]);
}

#[rstest]
fn test_filter_pop_drops_only_matching_elements() {
    let (_, remainder) = path!["inventory", access::filter(out_of_stock)]
        .pop_in(store())
        .unwrap();
    let skus = path!["inventory", access::all(), "sku"]
        .get_in(&remainder)
        .unwrap()
        .into_values();
    assert_eq!(skus, vec![Value::from("apple"), Value::from("plum")]);
}

#[rstest]
fn test_filter_replacement_stays_even_if_it_stops_matching() {
    let restocked = path!["inventory", access::filter(out_of_stock), "count"]
        .put_in(store(), 10)
        .unwrap();
    let counts = path!["inventory", access::all(), "count"]
        .get_in(&restocked)
        .unwrap()
        .into_values();
    assert_eq!(counts, vec![Value::Int(3), Value::Int(10), Value::Int(7)]);
}

#[rstest]
fn test_all_doubles_every_count_in_order() {
    let doubled = path!["inventory", access::all(), "count"]
        .update_in(store(), |found| {
            Value::Int(found.into_value().and_then(|v| v.as_int()).unwrap_or(0) * 2)
        })
        .unwrap();
    let counts = path!["inventory", access::all(), "count"]
        .get_in(&doubled)
        .unwrap()
        .into_values();
    assert_eq!(counts, vec![Value::Int(6), Value::Int(0), Value::Int(14)]);
}

#[rstest]
fn test_update_through_absent_data_reports_what_a_read_would() {
    let every = Path::empty().all();
    assert!(every.get_in(&Value::Null).unwrap().is_absent());

    let (found, remainder) = every
        .get_and_update_in(Value::Null, |_| Command::Dirty(Value::Int(1)))
        .unwrap();
    assert!(found.is_absent());
    assert_eq!(remainder, Value::Null);

    let matching = Path::empty().filter(|_| true);
    let (found, remainder) = matching
        .get_and_update_in(Value::Null, |_| Command::Dirty(Value::Int(1)))
        .unwrap();
    assert!(found.is_absent());
    assert_eq!(remainder, Value::Null);
}

#[rstest]
fn test_first_and_last_read_the_edges() {
    let inventory = path!["inventory"];
    let first_sku = inventory.first().key("sku");
    let last_sku = inventory.last().key("sku");
    assert_eq!(
        first_sku.get_in(&store()).unwrap().into_value(),
        Some(Value::from("apple"))
    );
    assert_eq!(
        last_sku.get_in(&store()).unwrap().into_value(),
        Some(Value::from("plum"))
    );
}

#[rstest]
fn test_first_write_on_empty_sequence_inserts() {
    let rebuilt = Path::empty()
        .first()
        .put_in(Value::seq(Vec::<Value>::new()), 1)
        .unwrap();
    assert_eq!(rebuilt, Value::seq([1]));
}

#[rstest]
fn test_last_pop_on_empty_sequence_is_clean() {
    let subject = Value::seq(Vec::<Value>::new());
    let (found, remainder) = Path::empty().last().pop_in(subject.clone()).unwrap();
    assert!(found.is_absent());
    assert!(remainder.shares_identity(&subject));
}

// =============================================================================
// Negative Index Tests
// =============================================================================

#[rstest]
fn test_negative_index_counts_from_the_end() {
    let subject = Value::seq([1, 2, 3]);
    assert_eq!(
        path![-1].get_in(&subject).unwrap().into_value(),
        Some(Value::Int(3))
    );
    assert_eq!(path![-1].put_in(subject, 9).unwrap(), Value::seq([1, 2, 9]));
}

#[rstest]
fn test_negative_index_before_the_start_reads_absent() {
    assert!(path![-5].get_in(&Value::seq([1, 2])).unwrap().is_absent());
}

// =============================================================================
// Record Tests
// =============================================================================

fn address() -> Value {
    Value::from(Record::with_fields([
        ("street", Value::from("Main St")),
        ("city", Value::from("Tokyo")),
    ]))
}

#[rstest]
fn test_field_read_and_write() {
    let subject = Value::map_from([("addr", address())]);
    let street = path!["addr"].field("street");

    assert_eq!(
        street.get_in(&subject).unwrap().into_value(),
        Some(Value::from("Main St"))
    );

    let moved = street.put_in(subject, "Oak Ave").unwrap();
    assert_eq!(
        street.get_in(&moved).unwrap().into_value(),
        Some(Value::from("Oak Ave"))
    );
}

#[rstest]
fn test_field_pop_clears_but_keeps_the_declaration() {
    let subject = Value::map_from([("addr", address())]);
    let street = path!["addr"].field("street");

    let (found, cleared) = street.pop_in(subject).unwrap();
    assert_eq!(found, Found::Value(Value::from("Main St")));

    // The field still exists; its value reads as absent.
    assert!(street.get_in(&cleared).unwrap().is_absent());
    let record = path!["addr"].get_in(&cleared).unwrap().into_value().unwrap();
    assert!(record.as_record().unwrap().has_field("street"));
}

#[rstest]
fn test_undeclared_field_is_a_capability_error() {
    let subject = Value::map_from([("addr", address())]);
    let result = path!["addr"].field("country").get_in(&subject);
    assert!(matches!(
        result,
        Err(TraversalError::MissingCapability(ref error)) if error.kind == ValueKind::Record
    ));
}

#[rstest]
fn test_field_of_non_record_is_a_capability_error() {
    let subject = Value::map_from([("addr", 5)]);
    let result = path!["addr"].field("street").get_in(&subject);
    assert!(matches!(
        result,
        Err(TraversalError::MissingCapability(ref error)) if error.kind == ValueKind::Int
    ));
}

#[rstest]
fn test_slots_are_created_and_removed_freely() {
    let subject = Value::map_from([("addr", address())]);
    let geocoded = path!["addr"].slot("geocoded");

    assert!(geocoded.get_in(&subject).unwrap().is_absent());

    let annotated = geocoded.put_in(subject, true).unwrap();
    assert_eq!(
        geocoded.get_in(&annotated).unwrap().into_value(),
        Some(Value::from(true))
    );

    let (found, stripped) = geocoded.pop_in(annotated).unwrap();
    assert_eq!(found, Found::Value(Value::from(true)));
    assert!(geocoded.get_in(&stripped).unwrap().is_absent());
}

// =============================================================================
// Structural Sharing Tests
// =============================================================================

#[rstest]
fn test_untouched_siblings_share_structure_after_a_write() {
    let subject = store();
    let rebuilt = path!["inventory", 0, "count"]
        .put_in(subject.clone(), 4)
        .unwrap();

    // The name entry and the two untouched inventory items are the same
    // allocations as in the original document.
    let name = path!["name"];
    assert!(name
        .get_in(&rebuilt)
        .unwrap()
        .into_value()
        .unwrap()
        .shares_identity(&name.get_in(&subject).unwrap().into_value().unwrap()));
    for position in [1, 2] {
        let item = path!["inventory", position];
        assert!(item
            .get_in(&rebuilt)
            .unwrap()
            .into_value()
            .unwrap()
            .shares_identity(&item.get_in(&subject).unwrap().into_value().unwrap()));
    }
}

#[rstest]
fn test_clean_traversal_returns_the_original_subject() {
    let subject = store();
    let (_, remainder) = path!["inventory", access::all()]
        .get_and_update_in(subject.clone(), |_| Command::Clean)
        .unwrap();
    assert!(remainder.shares_identity(&subject));
}

// =============================================================================
// Mixed End-to-end Tests
// =============================================================================

#[rstest]
fn test_get_and_update_reports_pre_modification_values() {
    let (found, rebuilt) = path!["inventory", access::all(), "count"]
        .get_and_update_in(store(), |found| match found.as_value() {
            Some(Value::Int(0)) => Command::Dirty(Value::Int(1)),
            _ => Command::Clean,
        })
        .unwrap();

    assert_eq!(
        found.into_values(),
        vec![Value::Int(3), Value::Int(0), Value::Int(7)]
    );
    let counts = path!["inventory", access::all(), "count"]
        .get_in(&rebuilt)
        .unwrap()
        .into_values();
    assert_eq!(counts, vec![Value::Int(3), Value::Int(1), Value::Int(7)]);
}

#[rstest]
fn test_reusable_path_applies_to_many_subjects() {
    let head = path!["xs", 0];
    let subjects = [
        Value::map_from([("xs", Value::seq([1]))]),
        Value::map_from([("xs", Value::seq([2, 3]))]),
        Value::map_from([("ys", Value::seq([9]))]),
    ];
    let heads: Vec<Option<Value>> = subjects
        .iter()
        .map(|subject| head.get_in(subject).unwrap().into_value())
        .collect();
    assert_eq!(heads, vec![Some(Value::Int(1)), Some(Value::Int(2)), None]);
}
