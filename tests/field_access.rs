use deep_struct::{DeepStruct, Error, FieldPath, Mapping, Value, ValueKind};

fn config() -> DeepStruct {
    let listener = |port: i64| -> Value {
        Value::from([("port", Value::from(port))].into_iter().collect::<Mapping>())
    };
    let numbered: Mapping = [("0", "zero")].into_iter().collect();
    let server: Mapping = [
        ("host", Value::from("example.org")),
        ("listeners", Value::from(vec![listener(80), listener(443)])),
        ("numbered", Value::from(numbered)),
    ]
    .into_iter()
    .collect();
    let root: Mapping = [("server", Value::from(server)), ("debug", Value::Bool(false))]
        .into_iter()
        .collect();
    DeepStruct::from_mapping(&root).unwrap()
}

#[test]
fn get_returns_converted_fields() {
    let config = config();
    assert_eq!(config.get("debug").unwrap().as_bool(), Some(false));
    assert!(config.get("server").unwrap().as_struct().is_some());
    assert_eq!(config.len(), 2);
    assert!(config.contains("server"));
    assert!(!config.contains("Server"));
}

#[test]
fn missing_field_is_an_error() {
    let config = config();
    let err = config.get("client").unwrap_err();
    assert_eq!(
        err,
        Error::FieldNotFound {
            name: "client".to_owned(),
            path: FieldPath::root(),
        }
    );
    assert_eq!(err.to_string(), "no field `client` at <root>");
    assert!(config.field("client").is_none());
    assert!(config.get("debug").is_ok(), "other fields stay readable");
}

#[test]
fn nested_get_reports_paths_relative_to_the_node() {
    let config = config();
    let listener = config.dig("server.listeners[0]").unwrap().as_struct().unwrap();

    let err = listener.get("host").unwrap_err();
    assert_eq!(err.path(), Some(&FieldPath::root()));
    assert_eq!(err.to_string(), "no field `host` at <root>");
    assert_eq!(
        listener.original("host").unwrap_err().path(),
        Some(&FieldPath::root())
    );

    let err = config.dig("server.listeners[0].host").unwrap_err();
    assert_eq!(
        err,
        Error::FieldNotFound {
            name: "host".to_owned(),
            path: FieldPath::parse("server.listeners[0]").unwrap(),
        }
    );
}

#[test]
fn original_returns_the_unconverted_value() {
    let config = config();
    let server = config.original("server").unwrap();
    assert!(server.as_mapping().is_some());
    assert!(matches!(config.original("nope"), Err(Error::FieldNotFound { .. })));
}

#[test]
fn keys_and_iter_follow_input_order() {
    let config = config();
    assert_eq!(config.keys().collect::<Vec<_>>(), ["server", "debug"]);

    let kinds: Vec<(&str, ValueKind)> = config
        .iter()
        .map(|(name, field)| (name, field.kind()))
        .collect();
    assert_eq!(kinds, [("server", ValueKind::Mapping), ("debug", ValueKind::Bool)]);

    let names: Vec<&String> = (&config).into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["server", "debug"]);
}

#[test]
fn dig_walks_nodes_and_sequences() {
    let config = config();
    assert_eq!(config.dig("server.host").unwrap().as_str(), Some("example.org"));
    assert_eq!(config.dig("server.listeners[1].port").unwrap().as_i64(), Some(443));
    assert_eq!(config.dig("server.listeners.0.port").unwrap().as_i64(), Some(80));
    assert_eq!(config.dig("server.numbered.0").unwrap().as_str(), Some("zero"));
}

#[test]
fn dig_reports_where_it_stopped() {
    let config = config();

    let err = config.dig("server.listeners[5].port").unwrap_err();
    assert_eq!(
        err,
        Error::IndexOutOfRange {
            index: 5,
            len: 2,
            path: FieldPath::parse("server.listeners").unwrap(),
        }
    );

    let err = config.dig("server.listeners[0].address").unwrap_err();
    assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("server.listeners[0]"));
    assert!(matches!(err, Error::FieldNotFound { ref name, .. } if name == "address"));

    let err = config.dig("server.host.length").unwrap_err();
    assert!(matches!(err, Error::NotTraversable { kind: ValueKind::String, .. }));

    let err = config.dig("server.listeners.first").unwrap_err();
    assert!(matches!(err, Error::NotTraversable { kind: ValueKind::Sequence, .. }));

    let err = config.dig("[0]").unwrap_err();
    assert!(matches!(err, Error::NotTraversable { kind: ValueKind::Mapping, .. }));

    assert!(matches!(config.dig("server..host"), Err(Error::InvalidPath { .. })));
}

#[test]
fn dig_path_accepts_a_parsed_path() {
    let config = config();
    let path: FieldPath = "server.listeners[0].port".parse().unwrap();
    assert_eq!(config.dig_path(&path).unwrap().as_i64(), Some(80));
    assert!(matches!(config.dig_path(&FieldPath::root()), Err(Error::InvalidPath { .. })));
}
