use rinse::{Collection, CollectionError, QueryError, Value, Warning};
use serde_json::json;

fn collection(records: serde_json::Value) -> Collection {
    let records = records
        .as_array()
        .expect("fixture must be an array")
        .iter()
        .cloned()
        .map(Value::from)
        .collect();
    Collection::from_records(records).expect("fixture records are valid")
}

fn ids(records: &[Value]) -> Vec<&str> {
    records
        .iter()
        .filter_map(|r| r.get("id").and_then(Value::as_text))
        .collect()
}

fn users() -> Collection {
    collection(json!([
        { "id": "u1", "name": "Alice", "age": 30, "tags": ["admin", "developer", "x"],
          "profile": { "bio": "hello", "city": "Oslo" } },
        { "id": "u2", "name": "Bob", "age": 25, "tags": ["developer"],
          "profile": {} },
        { "id": "u3", "name": "Cara", "age": 35, "tags": [],
          "profile": { "bio": "", "city": "Bergen" } },
        { "id": "u4", "name": "Dan", "age": 40, "tags": ["admin"],
          "profile": { "bio": null } },
        { "id": "u5", "name": "Eve", "age": 20, "tags": ["qa", "developer"] }
    ]))
}

#[test]
fn is_between_is_inclusive_and_preserves_order() {
    let found = users()
        .find(&Value::from(json!({ "age$": { "$isBetween": [25, 30] } })))
        .unwrap();
    assert_eq!(ids(found.records()), vec!["u1", "u2"]);
}

#[test]
fn contains_with_array_operand_requires_every_element() {
    let records = users();
    let query = Value::from(json!({ "tags$": { "$contains": ["admin", "developer"] } }));
    let found = records.find(&query).unwrap();
    assert_eq!(ids(found.records()), vec!["u1"]);
}

#[test]
fn or_matches_the_union_of_branches() {
    let found = users()
        .find(&Value::from(json!({ "$or": [
            { "name": "Alice" },
            { "age$": { "$isGreaterThan": 30 } }
        ]})))
        .unwrap();
    assert_eq!(ids(found.records()), vec!["u1", "u3", "u4"]);
}

#[test]
fn nested_is_empty_treats_absent_as_empty() {
    let found = users()
        .find(&Value::from(json!({ "profile": { "bio$": { "$isEmpty": true } } })))
        .unwrap();
    // u2: bio absent, u3: bio "", u4: bio null, u5: profile itself absent
    assert_eq!(ids(found.records()), vec!["u2", "u3", "u4", "u5"]);
}

#[test]
fn unknown_operator_is_a_compile_error() {
    let err = users()
        .find(&Value::from(json!({ "tags$": { "$invalidOp": 1 } })))
        .unwrap_err();
    assert_eq!(
        err,
        CollectionError::Query(QueryError::UnknownFilter {
            name: "$invalidOp".to_string(),
        })
    );
}

#[test]
fn non_array_combinator_is_a_compile_error() {
    let err = users()
        .find(&Value::from(json!({ "$and": { "name": "Alice" } })))
        .unwrap_err();
    assert_eq!(
        err,
        CollectionError::Query(QueryError::LogicalOperandNotArray { key: "$and" })
    );
}

#[test]
fn empty_or_matches_nothing_empty_and_matches_everything() {
    let records = users();
    let none = records.find(&Value::from(json!({ "$or": [] }))).unwrap();
    assert!(none.is_empty());

    let all = records.find(&Value::from(json!({ "$and": [] }))).unwrap();
    assert_eq!(all.len(), 5);
}

#[test]
fn multiple_operators_on_one_field_conjoin() {
    let found = users()
        .find(&Value::from(json!({
            "age$": { "$isGreaterThan": 20, "$isLessThan": 35 }
        })))
        .unwrap();
    assert_eq!(ids(found.records()), vec!["u1", "u2"]);
}

#[test]
fn implicit_equality_is_deep() {
    let found = users()
        .find(&Value::from(json!({ "tags": ["qa", "developer"] })))
        .unwrap();
    assert_eq!(ids(found.records()), vec!["u5"]);

    // order matters for array equality
    let found = users()
        .find(&Value::from(json!({ "tags": ["developer", "qa"] })))
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn type_mismatches_surface_as_warnings_not_errors() {
    let found = users()
        .find(&Value::from(json!({ "name$": { "$isGreaterThan": 10 } })))
        .unwrap();
    assert!(found.is_empty());
    assert_eq!(found.warnings().len(), 5);
    assert!(matches!(
        found.warnings()[0],
        Warning::NumericComparisonOnNonNumber { ref path, filter: "$isGreaterThan" } if path == "name"
    ));
}

#[test]
fn find_one_returns_the_first_match_only() {
    let records = users();
    let hit = records
        .find_one(&Value::from(json!({ "tags$": { "$contains": "developer" } })))
        .unwrap();
    assert_eq!(hit.as_ref().and_then(|r| r.get("id")), Some(&Value::from("u1")));

    let miss = records
        .find_one(&Value::from(json!({ "name": "Zed" })))
        .unwrap();
    assert!(miss.is_none());
}

#[test]
fn find_by_ids_follows_collection_order() {
    let records = users();
    let hits = records.find_by_ids(&["u4", "u2", "ghost"]);
    assert_eq!(ids(&hits.into_iter().cloned().collect::<Vec<_>>()), vec!["u2", "u4"]);

    assert!(records.find_by_id("u3").is_some());
    assert!(records.find_by_id("ghost").is_none());
}

#[test]
fn dotted_paths_reach_nested_fields() {
    let found = users()
        .find(&Value::from(json!({ "profile.city$": { "$startsWith": "Ber" } })))
        .unwrap();
    assert_eq!(ids(found.records()), vec!["u3"]);
}

#[test]
fn is_in_handles_scalars_and_arrays() {
    let records = users();
    let found = records
        .find(&Value::from(json!({ "name$": { "$isIn": ["Alice", "Eve"] } })))
        .unwrap();
    assert_eq!(ids(found.records()), vec!["u1", "u5"]);

    // array field: subset semantics (empty array is a subset of anything)
    let found = records
        .find(&Value::from(json!({ "tags$": { "$isIn": ["admin", "developer", "x"] } })))
        .unwrap();
    assert_eq!(ids(found.records()), vec!["u1", "u2", "u3", "u4"]);
}

#[test]
fn exists_distinguishes_null_from_missing_fields() {
    let records = users();
    let found = records
        .find(&Value::from(json!({ "profile.bio$": { "$exists": true } })))
        .unwrap();
    assert_eq!(ids(found.records()), vec!["u1", "u3"]);

    let found = records
        .find(&Value::from(json!({ "profile.bio$": { "$doesNotExist": true } })))
        .unwrap();
    assert_eq!(ids(found.records()), vec!["u2", "u4", "u5"]);
}

#[test]
fn or_and_and_field_clauses_conjoin_when_both_present() {
    let found = users()
        .find(&Value::from(json!({
            "$or": [{ "name": "Alice" }, { "name": "Dan" }],
            "$and": [{ "tags$": { "$contains": "admin" } }],
            "age": 40
        })))
        .unwrap();
    assert_eq!(ids(found.records()), vec!["u4"]);
}

#[test]
fn lone_or_ignores_sibling_clauses() {
    let found = users()
        .find(&Value::from(json!({
            "age": 999,
            "$or": [{ "name": "Eve" }]
        })))
        .unwrap();
    assert_eq!(ids(found.records()), vec!["u5"]);
}

#[test]
fn or_union_equals_branchwise_union() {
    let records = users();
    let a = Value::from(json!({ "name": "Alice" }));
    let b = Value::from(json!({ "age$": { "$isGreaterThan": 30 } }));
    let union = records
        .find(&Value::from(json!({ "$or": [
            { "name": "Alice" },
            { "age$": { "$isGreaterThan": 30 } }
        ]})))
        .unwrap();

    let a_hits = records.find(&a).unwrap();
    let b_hits = records.find(&b).unwrap();
    let mut expected = ids(a_hits.records());
    for id in ids(b_hits.records()) {
        if !expected.contains(&id) {
            expected.push(id);
        }
    }
    expected.sort_unstable();

    let mut actual = ids(union.records());
    actual.sort_unstable();
    assert_eq!(actual, expected);
}
