//! Behaviour tests for the public collection API.

use collekt::{collect, Collection, CollectionError, Dir, Items, Key, Op};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};

fn items(value: Value) -> Items {
    Items::from(value)
}

// ============================================================================
// Construction & access
// ============================================================================

#[test]
fn factory_takes_container_as_is() {
    let list = collect(vec![json!(1), json!(2)]);
    assert_eq!(list.all(), &items(json!([1, 2])));

    let empty: Collection = Collection::new();
    assert_eq!(empty.all(), &Items::Sequence(Vec::new()));

    let from_value: Collection = json!({"a": 1}).into();
    assert!(from_value.all().is_mapping());
}

#[test]
fn get_missing_key_is_null() {
    let map = collect(json!({"a": 1}));
    assert_eq!(map.get("b"), Value::Null);
    assert_eq!(map.get_or("b", "fallback"), json!("fallback"));
    assert_eq!(map.get_or_else("b", || json!([1])), json!([1]));
}

#[test]
fn first_and_last_with_predicates() {
    let list = collect(json!([1, 2, 3, 4]));
    assert_eq!(list.first_where(|v| v.as_i64() > Some(2)), Some(&json!(3)));
    assert_eq!(list.last_where(|v| v.as_i64() < Some(3)), Some(&json!(2)));
    assert_eq!(list.first_where(|v| v.is_null()), None);
}

// ============================================================================
// Transformation
// ============================================================================

#[test]
fn chunk_drains_the_receiver() {
    let mut list = collect(json!([1, 2, 3, 4, 5]));
    let chunks = list.chunk(2);
    assert_eq!(chunks.all(), &items(json!([[1, 2], [3, 4], [5]])));
    assert!(list.is_empty());
}

#[test]
fn flatten_all_levels_or_one() {
    let nested = collect(json!([1, [2, [3, 4]], 5]));
    assert_eq!(nested.flatten().all(), &items(json!([1, 2, 3, 4, 5])));
    assert_eq!(nested.flatten_depth(1).all(), &items(json!([1, 2, [3, 4], 5])));
}

#[test]
fn flatten_keeps_strings_whole_and_spreads_objects() {
    let nested = collect(json!(["ab", {"x": [1], "y": "c"}]));
    assert_eq!(nested.flatten().all(), &items(json!(["ab", 1, "c"])));
}

#[test]
fn collapse_one_level() {
    let nested = collect(json!([[1, 2], [3, [4]], 5]));
    assert_eq!(nested.collapse().all(), &items(json!([1, 2, 3, [4], 5])));
}

#[test]
fn flat_map_reassociates_with_original_keys() {
    let list = collect(json!(["a", "b"]));
    let mapped = list.flat_map(|values| values.into_iter().rev().collect());
    assert_eq!(mapped.all(), &items(json!({"0": "b", "1": "a"})));
}

#[test]
fn group_and_key_by() {
    let people = collect(json!([
        {"name": "a", "team": "x"},
        {"name": "b", "team": "y"},
        {"name": "c", "team": "x"},
    ]));

    let groups = people.group_by("team");
    assert_eq!(groups.all().keys(), vec!["x", "y"]);
    assert_eq!(groups.get("x").as_array().map(Vec::len), Some(2));

    let keyed = people.key_by(Key::with(|item| item["name"].clone()));
    assert_eq!(keyed.get("b"), json!({"name": "b", "team": "y"}));
}

#[test]
fn sort_variants() {
    let numbers = collect(json!([10, 9, 1]));
    assert_eq!(numbers.sort().all(), &items(json!([1, 10, 9])));
    assert_eq!(
        numbers.sort_with(|a, b| a.as_i64().cmp(&b.as_i64())).all(),
        &items(json!([1, 9, 10]))
    );

    let records = collect(json!([{"n": 2, "id": "a"}, {"n": 1, "id": "b"}, {"n": 2, "id": "c"}]));
    assert_eq!(records.sort_by("n").pluck("id").all(), &items(json!(["b", "a", "c"])));
    assert_eq!(records.sort_by_desc("n").pluck("id").all(), &items(json!(["c", "a", "b"])));
    assert_eq!(numbers.all(), &items(json!([10, 9, 1])));
    assert_eq!(Dir::default(), Dir::Asc);
}

#[test]
fn paging_and_slicing() {
    let list: Collection = (1..=7).map(Value::from).collect();
    assert_eq!(list.for_page(2, 3).all(), &items(json!([4, 5, 6])));
    assert_eq!(list.nth(3, 1).all(), &items(json!([2, 5])));
    assert_eq!(list.take(2).all(), &items(json!([1, 2])));
    assert_eq!(list.take(-2).all(), &items(json!([6, 7])));
    assert_eq!(list.slice(5, None).all(), &items(json!([6, 7])));
    assert_eq!(list.slice(1, Some(2)).all(), &items(json!([2, 3])));
}

#[test]
fn split_into_groups() {
    let list = collect(json!([1, 2, 3, 4, 5]));
    assert_eq!(
        list.split(2),
        vec![vec![json!(1), json!(2), json!(3)], vec![json!(4), json!(5)]]
    );
}

#[test]
fn pairing_operations() {
    let keys = collect(json!(["a", "b"]));
    assert_eq!(keys.combine(&[json!(1), json!(2)]).all(), &items(json!({"a": 1, "b": 2})));
    assert_eq!(keys.flip().all(), &items(json!({"a": "0", "b": "1"})));
    assert_eq!(
        keys.zip(&[json!(1)]).all(),
        &items(json!([["a", 1], ["b", null]]))
    );
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn median_follows_current_order() {
    let list = collect(json!([5, 1, 3, 2]));
    assert_eq!(list.median(), 2.0);
    assert_eq!(list.sort().median(), 2.5);
    assert_eq!(collect(json!([4, 8, 1])).median(), 8.0);
}

#[test]
fn mode_examples() {
    assert_eq!(Collection::new().mode(), None);
    assert_eq!(collect(json!([1, 1, 2])).mode(), Some(vec![json!(1)]));
    assert_eq!(collect(json!([1, 1, 2, 2])).mode(), Some(vec![json!(1), json!(2)]));
}

#[test]
fn aggregates_degenerate_to_float_values() {
    let empty = Collection::new();
    assert_eq!(empty.sum(), 0.0);
    assert!(empty.avg().is_nan());
    assert_eq!(empty.max(), f64::NEG_INFINITY);
    assert_eq!(empty.min(), f64::INFINITY);

    let records = collect(json!([{"n": 1}, {"m": 2}]));
    assert!(records.sum_by("n").is_nan());
    assert_eq!(records.max_by("n"), 1.0);
}

// ============================================================================
// Set operations
// ============================================================================

#[test]
fn where_with_operator() {
    let people = collect(json!([{"age": 17}, {"age": 19}, {"age": 18}]));
    let older = people.where_op("age", ">", 18).unwrap();
    assert_eq!(older.all(), &items(json!([{"age": 19}])));
    assert_eq!(people.where_cmp("age", Op::Lte, 18).count(), 2);
    assert_eq!(people.where_eq("age", 18).all(), &items(json!([{"age": 18}])));
}

#[test]
fn where_with_unknown_operator_fails() {
    let people = collect(json!([{"age": 17}]));
    let err = people.where_op("age", "<>", 1).unwrap_err();
    assert!(matches!(err, CollectionError::UnknownOperator(_)));
    assert!(err.to_string().contains("<>"));
}

#[test]
fn diff_keys_against_mapping() {
    let map = collect(json!({"a": 1, "b": 2}));
    let rest = map.diff_keys(&collect(json!({"b": 3})));
    assert_eq!(rest.all(), &items(json!({"a": 1})));
}

#[test]
fn unique_by_resolved_key() {
    let list = collect(json!([{"k": 1, "v": "a"}, {"k": 1, "v": "b"}, {"k": 2, "v": "c"}]));
    assert_eq!(list.unique_by("k").pluck("v").all(), &items(json!(["a", "c"])));
}

#[test]
fn merge_and_union_bias() {
    let map = collect(json!({"a": 1, "b": 2}));
    let other = json!({"b": 3, "c": 4});
    assert_eq!(map.merge(other.clone()).get("b"), json!(3));
    assert_eq!(map.union(other).get("b"), json!(2));
    assert_eq!(map.get("c"), Value::Null);
}

// ============================================================================
// Mutators
// ============================================================================

#[test]
fn splice_examples() {
    let mut list = collect(json!([10, 20, 30, 40]));
    assert_eq!(list.splice(1, 2).all(), &items(json!([20, 30])));
    assert_eq!(list.all(), &items(json!([10, 40])));

    let mut list = collect(json!([10, 20, 30]));
    assert_eq!(list.splice_with(1, 1, vec![json!(99)]).all(), &items(json!([20])));
    assert_eq!(list.all(), &items(json!([10, 99, 30])));
}

#[test]
fn mutators_chain() {
    let mut list = Collection::new();
    list.push(1)
        .prepend(0)
        .times(2, |n| json!(n + 1))
        .transform(|v| json!(v.as_i64().unwrap_or(0) * 10))
        .forget("0");
    assert_eq!(list.all(), &items(json!([null, 10, 20, 30])));
}

#[test]
fn when_and_tap_asymmetry() {
    let mut list = collect(json!([1]));
    list.tap(|c| {
        c.push(2);
    })
    .push(3);

    let () = list.when(true, |c| {
        c.push(4);
    });
    assert_eq!(list.all(), &items(json!([1, 2, 3, 4])));
}

#[test]
fn seeded_random_is_reproducible() {
    let source = json!([1, 2, 3, 4, 5]);

    let mut a = collect(source.clone());
    let mut b = collect(source);
    assert_eq!(
        a.random_with(&mut StdRng::seed_from_u64(42)),
        b.random_with(&mut StdRng::seed_from_u64(42))
    );

    let mut c = collect(json!([1, 2, 3, 4, 5]));
    c.random_n_with(3, &mut StdRng::seed_from_u64(9));
    assert_eq!(c.count(), 3);
    assert_eq!(c.unique().count(), 3);
}

// ============================================================================
// Serialization & iteration
// ============================================================================

#[test]
fn json_round_trip_preserves_order() {
    let map = collect(json!({"z": 1, "a": {"nested": [1, 2]}, "m": null}));
    let text = map.to_json().unwrap();
    assert_eq!(text, r#"{"z":1,"a":{"nested":[1,2]},"m":null}"#);

    let parsed = Collection::from_json(&text).unwrap();
    assert_eq!(parsed.all().keys(), vec!["z", "a", "m"]);
    assert_eq!(parsed, map);
}

#[test]
fn from_json_rejects_bad_input() {
    assert!(matches!(
        Collection::from_json("{not json"),
        Err(CollectionError::Json(_))
    ));
}

#[test]
fn iteration_does_not_consume() {
    let list = collect(json!(["a", "b"]));
    let mut seen = Vec::new();
    for item in &list {
        seen.push(item.clone());
    }
    for item in &list {
        seen.push(item.clone());
    }
    assert_eq!(seen.len(), 4);
    assert_eq!(list.count(), 2);
}

#[test]
fn keys_union_and_values() {
    let list = collect(json!([{"a": 1}, {"a": 2, "b": 3}]));
    assert_eq!(list.keys().all(), &items(json!(["a", "b"])));
    assert_eq!(collect(json!({"x": 1})).values().all(), &items(json!([1])));
}

#[test]
fn implode_and_search() {
    let list = collect(json!([{"n": "a"}, {"n": "b"}]));
    assert_eq!(list.implode_by("n", "|"), "a|b");
    assert_eq!(collect(json!([1, 2])).implode(", "), "1, 2");

    let mixed = collect(json!(["2", 2]));
    assert_eq!(mixed.search(2), Some(0));
    assert_eq!(mixed.search_strict(2), Some(1));
    assert_eq!(mixed.search(3), None);
}

#[test]
fn pipe_and_reduce() {
    let list = collect(json!([1, 2, 3]));
    let total = list.reduce(|carry, item| json!(carry.as_i64().unwrap_or(0) + item.as_i64().unwrap_or(0)), None);
    assert_eq!(total, json!(6));
    assert_eq!(list.pipe(|c| c.sum() * 2.0), 12.0);
}
