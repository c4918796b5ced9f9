use pretty_assertions::assert_eq;
use schema_qs::{Error, SchemaCodec, SchemaNode, Value, ValueType};

const GROUP_FINDER: &str = r#"{
    "game": { "query": "game" },
    "filter": {
        "rating": { "query": "rating", "type": "number" },
        "voice": { "query": "voice", "type": "boolean", "acceptEmptyValue": true },
        "tags": { "query": "tags", "type": "array", "separator": "|" },
        "season": { "query": "season", "type": "number", "aliases": { "1": "s1", "2": "s2" } }
    },
    "wow": {
        "dungeon": {
            "query": "dungeon",
            "aliases": { "Plaguefall": "pf" },
            "decodeCondition": { "game": "Wow" }
        }
    },
    "lostArk": {
        "dungeon": {
            "query": "dungeon",
            "decodeCondition": { "game": "LostArk" }
        }
    },
    "debug": { "query": "debug", "encodable": false, "decodeEmptyValue": true }
}"#;

#[test]
fn loads_a_full_schema() {
    let codec = SchemaCodec::from_json_str(GROUP_FINDER).unwrap();

    let dungeons: Vec<String> = codec.handlers("dungeon").map(|b| b.dotted_path()).collect();
    assert_eq!(dungeons, ["wow.dungeon", "lostArk.dungeon"]);

    let rating = codec.handlers("rating").next().unwrap();
    assert_eq!(rating.path(), ["filter", "rating"]);
    assert_eq!(rating.handler().value_type(), ValueType::Number);

    let decoded = codec.decode("game=Wow&rating=1400&voice&tags=a|b&season=s2&dungeon=pf&debug=");
    assert_eq!(decoded["game"], Value::from("Wow"));
    assert_eq!(decoded.pointer(&["filter", "rating"]), Some(&Value::from(1400)));
    assert_eq!(decoded.pointer(&["filter", "voice"]), Some(&Value::from(true)));
    assert_eq!(
        decoded.pointer(&["filter", "tags"]),
        Some(&Value::from(vec!["a", "b"]))
    );
    assert_eq!(decoded.pointer(&["filter", "season"]), Some(&Value::from(2)));
    assert_eq!(
        decoded.pointer(&["wow", "dungeon"]),
        Some(&Value::from("Plaguefall"))
    );
    assert_eq!(decoded["debug"], Value::from(""));

    // `debug` is decode-only
    assert_eq!(codec.encode(&decoded), "game=Wow&rating=1400&voice=&tags=a|b&season=s2&dungeon=pf");
}

#[test]
fn decode_type_is_accepted_as_an_alias_of_type() {
    let schema = SchemaNode::from_json_str(r#"{ "n": { "query": "n", "decodeType": "number" } }"#)
        .unwrap();
    let codec = SchemaCodec::new(schema).unwrap();
    assert_eq!(codec.decode("n=7")["n"], Value::from(7));
}

#[test]
fn rejects_values_that_are_neither_nodes_nor_handlers() {
    for (input, path, found) in [
        (r#"{ "game": "game" }"#, "game", "a string"),
        (r#"{ "filter": { "rating": 5 } }"#, "filter.rating", "a number"),
        (r#"{ "filter": { "tags": [] } }"#, "filter.tags", "an array"),
        (r#"{ "filter": null }"#, "filter", "null"),
        (r#"[]"#, "", "an array"),
    ] {
        let err = SchemaNode::from_json_str(input).unwrap_err();
        match err {
            Error::UnexpectedType {
                path: err_path,
                found: err_found,
            } => {
                assert_eq!(err_path, path, "input: {input}");
                assert_eq!(err_found, found, "input: {input}");
            }
            other => panic!("unexpected error for {input}: {other}"),
        }
    }
}

#[test]
fn rejects_malformed_handlers() {
    let err = SchemaNode::from_json_str(r#"{ "a": { "b": { "query": "b", "type": "date" } } }"#)
        .unwrap_err();
    assert!(
        matches!(&err, Error::InvalidHandler { path, .. } if path == "a.b"),
        "got: {err}"
    );

    let err = SchemaNode::from_json_str(r#"{ "a": { "query": "a", "encodable": "no" } }"#)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidHandler { .. }), "got: {err}");

    let err = SchemaNode::from_json_str(r#"{ "a": { "query": "a", "aliass": {} } }"#).unwrap_err();
    assert!(matches!(err, Error::InvalidHandler { .. }), "got: {err}");

    let err = SchemaNode::from_json_str(r#"{ "a": { "query": "a", "separator": "" } }"#)
        .unwrap_err();
    assert!(
        err.to_string().contains("separator must not be empty"),
        "got: {err}"
    );
}

#[test]
fn rejects_invalid_json() {
    let err = SchemaNode::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, Error::Json(_)), "got: {err}");
}

#[test]
fn query_member_must_be_a_string_to_make_a_leaf() {
    // a branch may have a child called `query`
    let schema = SchemaNode::from_json_str(r#"{ "search": { "query": { "query": "q" } } }"#)
        .unwrap();
    let codec = SchemaCodec::new(schema).unwrap();
    assert_eq!(
        codec.decode("q=rust").pointer(&["search", "query"]),
        Some(&Value::from("rust"))
    );
}

#[test]
fn root_handler_is_rejected_by_the_codec() {
    let err = SchemaCodec::from_json_str(r#"{ "query": "q" }"#).unwrap_err();
    assert!(matches!(err, Error::UnexpectedType { .. }), "got: {err}");
}
