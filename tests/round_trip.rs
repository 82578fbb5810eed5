use std::sync::Arc;

use deep_struct::{DeepStruct, Error, Field, Mapping, Value};

fn mapping<const N: usize>(pairs: [(&str, Value); N]) -> Mapping {
    pairs.into_iter().collect()
}

fn sample() -> Mapping {
    mapping([
        ("name", Value::from("service")),
        (
            "database",
            Value::from(mapping([
                ("host", Value::from("db.internal")),
                ("port", Value::from(5432)),
                ("replicas", Value::from(vec![Value::from("r1"), Value::from("r2")])),
            ])),
        ),
        (
            "matrix",
            Value::from(vec![
                Value::from(vec![Value::from(1), Value::from(2)]),
                Value::from(vec![Value::from(mapping([("deep", Value::Bool(true))]))]),
            ]),
        ),
        ("ratio", Value::from(0.25)),
        ("missing", Value::Null),
    ])
}

#[test]
fn snapshot_reconstructs_the_input() {
    let input = sample();
    let node = DeepStruct::from_mapping(&input).unwrap();

    assert_eq!(node.to_value(), Value::from(input.clone()));

    let snapshot = node.to_snapshot();
    let keys: Vec<&str> = snapshot.keys().map(String::as_str).collect();
    assert_eq!(keys, ["name", "database", "matrix", "ratio", "missing"]);
    for (key, value) in &input {
        assert_eq!(snapshot.get(key.as_str().unwrap()), Some(value));
    }
}

#[test]
fn snapshot_copies_are_independent() {
    let node = DeepStruct::from_mapping(&sample()).unwrap();

    let mut first = node.to_snapshot();
    let second = node.to_snapshot();
    assert_eq!(first, second);

    first.shift_remove("name");
    first.insert("added".to_owned(), Value::from(1));
    first.reverse();

    assert_ne!(first, second);
    assert_eq!(node.to_snapshot(), second);
    assert_eq!(node.get("name").unwrap().as_str(), Some("service"));
    assert!(node.get("added").is_err());
}

#[test]
fn snapshot_shares_nested_values_with_the_input() {
    let input = sample();
    let node = DeepStruct::from_mapping(&input).unwrap();
    let snapshot = node.to_snapshot();

    match (input.get("database"), snapshot.get("database")) {
        (Some(Value::Mapping(original)), Some(Value::Mapping(kept))) => {
            assert!(Arc::ptr_eq(original, kept));
        }
        other => panic!("expected two mappings, got {other:?}"),
    }
    match (input.get("matrix"), snapshot.get("matrix")) {
        (Some(Value::Sequence(original)), Some(Value::Sequence(kept))) => {
            assert!(Arc::ptr_eq(original, kept));
        }
        other => panic!("expected two sequences, got {other:?}"),
    }
}

#[test]
fn scalar_strings_are_not_copied() {
    let input = mapping([("s", Value::from("shared"))]);
    let node = DeepStruct::from_mapping(&input).unwrap();

    match (input.get("s"), node.get("s").unwrap()) {
        (Some(Value::String(original)), Field::Scalar(Value::String(converted))) => {
            assert!(Arc::ptr_eq(original, converted));
        }
        other => panic!("unexpected shapes: {other:?}"),
    }
}

#[test]
fn to_mapping_matches_to_snapshot() {
    let node = DeepStruct::from_mapping(&sample()).unwrap();
    assert_eq!(node.to_mapping(), node.to_snapshot());
}

#[test]
fn nested_mappings_become_nodes() {
    let input = mapping([(
        "a",
        Value::from(mapping([("b", Value::from(mapping([("c", Value::from(1))])))])),
    )]);
    let node = DeepStruct::from_mapping(&input).unwrap();

    let a = node.get("a").unwrap().as_struct().expect("a should be a node");
    let b = a.get("b").unwrap().as_struct().expect("b should be a node");
    assert_eq!(b.get("c").unwrap().as_i64(), Some(1));

    assert_eq!(node.to_value(), Value::from(input));
}

#[test]
fn sequences_of_mappings_become_sequences_of_nodes() {
    let input = mapping([(
        "list",
        Value::from(vec![
            Value::from(mapping([("x", Value::from(1))])),
            Value::from(mapping([("x", Value::from(2))])),
        ]),
    )]);
    let node = DeepStruct::from_mapping(&input).unwrap();

    let list = node.get("list").unwrap().as_sequence().expect("list should be a sequence");
    assert_eq!(list.len(), 2);
    let xs: Vec<i64> = list
        .iter()
        .map(|item| item.as_struct().unwrap().get("x").unwrap().as_i64().unwrap())
        .collect();
    assert_eq!(xs, [1, 2]);

    assert_eq!(node.to_value(), Value::from(input));
}

#[test]
fn nested_sequences_are_converted_at_every_depth() {
    let node = DeepStruct::from_mapping(&sample()).unwrap();
    let deep = node.dig("matrix[1][0].deep").unwrap();
    assert_eq!(deep.as_bool(), Some(true));

    let first_row = node.dig("matrix[0]").unwrap();
    assert_eq!(
        first_row,
        &Field::Sequence(vec![Field::Scalar(Value::Int(1)), Field::Scalar(Value::Int(2))])
    );
}

#[test]
fn scalars_pass_through_unchanged() {
    let input = mapping([
        ("n", Value::from(5)),
        ("s", Value::from("hi")),
        ("b", Value::Bool(true)),
        ("z", Value::Null),
        ("f", Value::from(1.5)),
        ("big", Value::from(u64::MAX)),
    ]);
    let node = DeepStruct::from_mapping(&input).unwrap();

    for (key, value) in &input {
        let name = key.as_str().unwrap();
        assert_eq!(node.get(name).unwrap(), value, "field {name}");
    }
    assert!(node.get("z").unwrap().is_null());
    assert_eq!(node.get("big").unwrap().as_u64(), Some(u64::MAX));
}

#[test]
fn absent_input_gives_an_empty_node() {
    for node in [
        DeepStruct::new(None).unwrap(),
        DeepStruct::from_value(&Value::Null).unwrap(),
        DeepStruct::from_mapping(&Mapping::new()).unwrap(),
        DeepStruct::empty(),
    ] {
        assert!(node.is_empty());
        assert!(node.to_snapshot().is_empty());
        assert!(matches!(node.get("anything"), Err(Error::FieldNotFound { .. })));
    }
}

#[test]
fn new_with_a_mapping_converts_it() {
    let input = sample();
    assert_eq!(
        DeepStruct::new(Some(&input)).unwrap(),
        DeepStruct::from_mapping(&input).unwrap()
    );
}

#[test]
fn non_mapping_documents_are_rejected() {
    let err = DeepStruct::from_value(&Value::from(vec![Value::from(1)])).unwrap_err();
    assert_eq!(
        err,
        Error::NotAMapping {
            kind: deep_struct::ValueKind::Sequence
        }
    );
    assert!(deep_struct::from_value(&Value::from("text")).is_err());
}

#[test]
fn trees_can_be_shared_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DeepStruct>();
    assert_send_sync::<Value>();

    let node = Arc::new(DeepStruct::from_mapping(&sample()).unwrap());
    let handle = {
        let node = Arc::clone(&node);
        std::thread::spawn(move || node.dig("database.port").unwrap().as_i64())
    };
    assert_eq!(handle.join().unwrap(), Some(5432));
}
