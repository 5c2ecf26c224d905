use rinse::{Collection, CollectionError, SortSpec, Value};
use serde_json::json;

fn record(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn people() -> Collection {
    Collection::from_records(vec![
        record(json!({ "id": "111", "name": "taylor", "isCool": true })),
        record(json!({ "id": "222", "name": "hannah", "isCool": true })),
        record(json!({ "id": "333", "name": "lily", "isCool": true })),
        record(json!({ "id": "444", "name": "sam", "isCool": false })),
    ])
    .unwrap()
}

fn names(collection: &Collection) -> Vec<&str> {
    collection
        .records()
        .iter()
        .filter_map(|r| r.get("name").and_then(Value::as_text))
        .collect()
}

#[test]
fn insert_appends_and_keeps_the_given_id() {
    let mut collection = people();
    let id = collection
        .insert(record(json!({ "id": "555", "name": "sailor" })))
        .unwrap();
    assert_eq!(id, "555");
    assert_eq!(collection.len(), 5);
    assert_eq!(
        collection.last().and_then(|r| r.get("name")),
        Some(&Value::from("sailor"))
    );
}

#[test]
fn insert_generates_an_id_when_absent() {
    let mut collection = people();
    let id = collection.insert(record(json!({ "name": "sailor" }))).unwrap();
    assert_eq!(id.len(), 26); // ulid text form
    assert_eq!(collection.find_by_id(&id).and_then(|r| r.get("name")), Some(&Value::from("sailor")));
}

#[test]
fn insert_many_appends_in_order() {
    let mut collection = people();
    let ids = collection
        .insert_many(vec![
            record(json!({ "id": "555", "name": "ada" })),
            record(json!({ "id": "666", "name": "grace" })),
        ])
        .unwrap();
    assert_eq!(ids, vec!["555", "666"]);
    assert_eq!(
        names(&collection),
        vec!["taylor", "hannah", "lily", "sam", "ada", "grace"]
    );
}

#[test]
fn insert_rejects_invalid_records() {
    let mut collection = people();

    let err = collection.insert(Value::from("not a record")).unwrap_err();
    assert_eq!(err, CollectionError::RecordNotObject { found: "string" });

    let err = collection
        .insert(record(json!({ "id": 7, "name": "seven" })))
        .unwrap_err();
    assert_eq!(
        err,
        CollectionError::NonTextIdentity {
            id_key: "id".to_string(),
            found: "number",
        }
    );
    assert_eq!(collection.len(), 4);
}

#[test]
fn update_replaces_the_whole_record() {
    let mut collection = people();
    let replaced = collection
        .update(record(json!({ "id": "222", "name": "hannah roksanne" })))
        .unwrap();
    assert!(replaced);

    let updated = collection.find_by_id("222").unwrap();
    assert_eq!(updated.get("name"), Some(&Value::from("hannah roksanne")));
    // replacement, not merge: the old field is gone
    assert_eq!(updated.get("isCool"), None);
    // position is preserved
    assert_eq!(names(&collection)[1], "hannah roksanne");
}

#[test]
fn update_without_a_match_is_a_no_op() {
    let mut collection = people();
    assert!(!collection
        .update(record(json!({ "id": "999", "name": "ghost" })))
        .unwrap());
    assert!(!collection.update(record(json!({ "name": "no id" }))).unwrap());
    assert_eq!(collection.len(), 4);
}

#[test]
fn update_many_counts_replacements() {
    let mut collection = people();
    let replaced = collection
        .update_many(vec![
            record(json!({ "id": "222", "name": "hannah r" })),
            record(json!({ "id": "333", "name": "lily c" })),
            record(json!({ "id": "999", "name": "ghost" })),
        ])
        .unwrap();
    assert_eq!(replaced, 2);
    assert_eq!(names(&collection), vec!["taylor", "hannah r", "lily c", "sam"]);
}

#[test]
fn remove_by_id_and_ids_keep_the_complement_in_order() {
    let mut collection = people();
    assert!(collection.remove_by_id("222"));
    assert!(!collection.remove_by_id("222"));
    assert_eq!(names(&collection), vec!["taylor", "lily", "sam"]);

    let removed = collection.remove_by_ids(&["111", "444"]);
    assert_eq!(removed, 2);
    assert_eq!(names(&collection), vec!["lily"]);
}

#[test]
fn remove_records_uses_their_identity_fields() {
    let mut collection = people();
    let removed = collection.remove_records(&[
        record(json!({ "id": "111" })),
        record(json!({ "id": "444" })),
        record(json!({ "name": "no id" })),
    ]);
    assert_eq!(removed, 2);
    assert_eq!(names(&collection), vec!["hannah", "lily"]);
}

#[test]
fn remove_where_drops_every_match() {
    let mut collection = people();
    let removed = collection
        .remove_where(&Value::from(json!({ "isCool": true })))
        .unwrap();
    assert_eq!(removed, 3);
    assert_eq!(names(&collection), vec!["sam"]);
}

#[test]
fn sort_by_key_is_stable_in_both_directions() {
    let collection = Collection::from_records(vec![
        record(json!({ "id": "0", "name": "John", "age": 30, "tags": ["a", "b"] })),
        record(json!({ "id": "1", "name": "Hannah", "age": 25, "tags": ["a", "b", "c"] })),
        record(json!({ "id": "2", "name": "John", "age": 35, "tags": ["a", "b", "c", "d"] })),
    ])
    .unwrap();

    let by_name = collection.sort(&SortSpec::ascending("name"));
    assert_eq!(names(&by_name), vec!["Hannah", "John", "John"]);
    // stable: equal names keep collection order
    let john_ids: Vec<_> = by_name
        .records()
        .iter()
        .filter(|r| r.get("name") == Some(&Value::from("John")))
        .filter_map(|r| r.get("id").and_then(Value::as_text))
        .collect();
    assert_eq!(john_ids, vec!["0", "2"]);

    let by_age_desc = collection.sort(&SortSpec::descending("age"));
    let ages: Vec<_> = by_age_desc
        .records()
        .iter()
        .filter_map(|r| r.get("age").and_then(Value::as_number))
        .collect();
    assert_eq!(ages, vec![35.0, 30.0, 25.0]);

    // the receiver is untouched
    assert_eq!(names(&collection), vec!["John", "Hannah", "John"]);
}

#[test]
fn sort_with_missing_keys_groups_them_first() {
    let collection = Collection::from_records(vec![
        record(json!({ "id": "a", "rank": 2 })),
        record(json!({ "id": "b" })),
        record(json!({ "id": "c", "rank": 1 })),
    ])
    .unwrap();

    let sorted = collection.sort(&SortSpec::ascending("rank"));
    let ids: Vec<_> = sorted
        .records()
        .iter()
        .filter_map(|r| r.get("id").and_then(Value::as_text))
        .collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
}

#[test]
fn sort_by_accepts_an_arbitrary_comparator() {
    let collection = Collection::from_records(vec![
        record(json!({ "id": "0", "tags": ["a", "b", "c"] })),
        record(json!({ "id": "1", "tags": ["a"] })),
        record(json!({ "id": "2", "tags": ["a", "b"] })),
    ])
    .unwrap();

    let sorted = collection.sort_by(|a, b| {
        let len = |r: &Value| r.get("tags").and_then(Value::length).unwrap_or(0);
        len(a).cmp(&len(b))
    });
    let ids: Vec<_> = sorted
        .records()
        .iter()
        .filter_map(|r| r.get("id").and_then(Value::as_text))
        .collect();
    assert_eq!(ids, vec!["1", "2", "0"]);
}

#[test]
fn select_projects_requested_keys_in_order() {
    let projected = people().select(&["name", "id"]);
    let first = projected.first().unwrap();
    assert_eq!(
        first,
        &Value::from_entries(vec![
            ("name", Value::from("taylor")),
            ("id", Value::from("111")),
        ])
    );

    // missing keys are simply absent
    let sparse = people().select(&["name", "missing"]);
    assert_eq!(
        sparse.first().map(|r| r.as_entries().map(<[_]>::len)),
        Some(Some(1))
    );
}

#[test]
fn query_sort_select_chain() {
    let collection = Collection::from_records(vec![
        record(json!({ "id": "0", "name": "John", "age": 30, "isActive": true })),
        record(json!({ "id": "1", "name": "Hannah", "age": 25, "isActive": false })),
        record(json!({ "id": "2", "name": "John", "age": 35, "isActive": true })),
    ])
    .unwrap();

    let result = collection
        .query(&Value::from(json!({ "name": "John" })))
        .unwrap()
        .sort(&SortSpec::ascending("age"))
        .select(&["name", "age"]);

    assert_eq!(result.len(), 2);
    assert_eq!(
        result.first(),
        Some(&Value::from_entries(vec![
            ("name", Value::from("John")),
            ("age", Value::from(30)),
        ]))
    );
    assert_eq!(
        result.last().and_then(|r| r.get("age")),
        Some(&Value::from(35))
    );
}

#[test]
fn custom_identity_key() {
    let mut collection = Collection::new().with_id_key("uuid");
    collection
        .insert(record(json!({ "uuid": "x1", "name": "one" })))
        .unwrap();
    collection.insert(record(json!({ "name": "two" }))).unwrap();

    assert!(collection.find_by_id("x1").is_some());
    assert!(collection.records()[1].get("uuid").is_some());

    let err = collection
        .insert(record(json!({ "uuid": 5 })))
        .unwrap_err();
    assert_eq!(
        err,
        CollectionError::NonTextIdentity {
            id_key: "uuid".to_string(),
            found: "number",
        }
    );
}

#[test]
fn result_set_first_and_last() {
    let found = people()
        .find(&Value::from(json!({ "isCool": true })))
        .unwrap();
    assert_eq!(found.len(), 3);
    assert_eq!(
        found.first().and_then(|r| r.get("name")),
        Some(&Value::from("taylor"))
    );
    assert_eq!(
        found.last().and_then(|r| r.get("name")),
        Some(&Value::from("lily"))
    );
    assert!(found.warnings().is_empty());
}
