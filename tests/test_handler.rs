use pretty_assertions::assert_eq;
use schema_qs::{FieldHandler, Value, ValueType};

#[test]
fn string_field() {
    let handler = FieldHandler::new("dungeon");
    assert_eq!(handler.encode(&Value::from("Mists of Tirna Scithe")), "Mists%20of%20Tirna%20Scithe");
    assert_eq!(
        handler.decode("Mists%20of%20Tirna%20Scithe"),
        Some(Value::from("Mists of Tirna Scithe"))
    );
    // `+` as written by html forms
    assert_eq!(handler.decode("De+Other+Side"), Some(Value::from("De Other Side")));
}

#[test]
fn structural_characters_are_escaped() {
    let handler = FieldHandler::new("q");
    let encoded = handler.encode(&Value::from("a&b=c+d%"));
    assert_eq!(encoded, "a%26b%3Dc%2Bd%25");
    assert_eq!(handler.decode(&encoded), Some(Value::from("a&b=c+d%")));
}

#[test]
fn number_field() {
    let handler = FieldHandler::new("rating").decode_type(ValueType::Number);
    assert_eq!(handler.encode(&Value::from(1400)), "1400");
    assert_eq!(handler.encode(&Value::from(2.5)), "2.5");
    assert_eq!(handler.decode("1400"), Some(Value::from(1400)));
    assert_eq!(handler.decode("-2.5"), Some(Value::from(-2.5)));
}

#[test]
fn number_field_yields_nan_when_unparsable() {
    let handler = FieldHandler::new("rating").decode_type(ValueType::Number);
    let decoded = handler.decode("high").and_then(|value| value.as_f64());
    assert!(decoded.is_some_and(f64::is_nan), "got: {decoded:?}");
}

#[test]
fn boolean_field_is_true_for_any_non_empty_string() {
    let handler = FieldHandler::new("voice").decode_type(ValueType::Boolean);
    assert_eq!(handler.encode(&Value::from(true)), "true");
    assert_eq!(handler.encode(&Value::from(false)), "false");
    assert_eq!(handler.decode("true"), Some(Value::from(true)));
    assert_eq!(handler.decode("false"), Some(Value::from(true)));
    assert_eq!(handler.decode("0"), Some(Value::from(true)));
    assert_eq!(handler.decode(""), None);
}

#[test]
fn array_field() {
    let handler = FieldHandler::new("tags").decode_type(ValueType::Array);
    let tags = Value::from(vec!["chill", "voice chat", "100%"]);
    let encoded = handler.encode(&tags);
    assert_eq!(encoded, "chill,voice%20chat,100%25");
    assert_eq!(handler.decode(&encoded), Some(tags));
}

#[test]
fn array_field_splits_after_unescaping() {
    let handler = FieldHandler::new("tags").decode_type(ValueType::Array);
    // browsers and most serializers escape the separator
    assert_eq!(
        handler.decode("chill%2Cvoice%20chat"),
        Some(Value::from(vec!["chill", "voice chat"]))
    );
    assert_eq!(handler.decode("a%2Cb"), Some(Value::from(vec!["a", "b"])));
    // an element holding the separator does not survive
    let encoded = handler.encode(&Value::from(vec!["a,b"]));
    assert_eq!(handler.decode(&encoded), Some(Value::from(vec!["a", "b"])));
    // a form-encoded space inside an element
    assert_eq!(
        handler.decode("voice+chat,pvp"),
        Some(Value::from(vec!["voice chat", "pvp"]))
    );
}

#[test]
fn array_field_with_custom_separator() {
    let handler = FieldHandler::new("ids")
        .decode_type(ValueType::Array)
        .separator("|");
    assert_eq!(handler.array_separator(), "|");
    assert_eq!(handler.encode(&Value::from(vec![1, 2, 3])), "1|2|3");
    assert_eq!(
        handler.decode("1|2|3"),
        Some(Value::from(vec!["1", "2", "3"]))
    );
}

#[test]
fn empty_separator_falls_back_to_default() {
    let handler = FieldHandler::new("ids").separator("");
    assert_eq!(handler.array_separator(), schema_qs::DEFAULT_SEPARATOR);
}

#[test]
fn aliases_round_trip() {
    let handler = FieldHandler::new("mode").aliases([
        ("WowMythicPlus", "mplus"),
        ("WowRaid", "raid"),
    ]);
    assert_eq!(handler.encode(&Value::from("WowMythicPlus")), "mplus");
    assert_eq!(handler.decode("mplus"), Some(Value::from("WowMythicPlus")));
    assert_eq!(handler.encode(&Value::from("WowRaid")), "raid");
    assert_eq!(handler.decode("raid"), Some(Value::from("WowRaid")));
}

#[test]
fn alias_miss() {
    let handler = FieldHandler::new("mode").aliases([("WowMythicPlus", "mplus")]);
    // encoding falls back to the value itself
    assert_eq!(handler.encode(&Value::from("Arena 3v3")), "Arena%203v3");
    // decoding does not
    assert_eq!(handler.decode("Arena%203v3"), None);
}

#[test]
fn numeric_aliases() {
    let handler = FieldHandler::new("season")
        .decode_type(ValueType::Number)
        .aliases([(1, "s1"), (2, "s2")]);
    assert_eq!(handler.encode(&Value::from(2)), "s2");
    assert_eq!(handler.decode("s1"), Some(Value::from(1)));
}

#[test]
fn duplicate_wire_alias_prefers_last() {
    let handler = FieldHandler::new("region").aliases([("Europe", "eu"), ("EuropeWest", "eu")]);
    assert_eq!(handler.encode(&Value::from("Europe")), "eu");
    assert_eq!(handler.decode("eu"), Some(Value::from("EuropeWest")));
}

#[test]
fn empty_values_are_absent_by_default() {
    let handler = FieldHandler::new("comment");
    assert_eq!(handler.decode(""), None);

    let handler = FieldHandler::new("comment").decode_empty_value(true);
    assert_eq!(handler.decode(""), Some(Value::from("")));

    let handler = FieldHandler::new("count")
        .decode_type(ValueType::Number)
        .decode_empty_value(true);
    assert_eq!(handler.decode(""), Some(Value::from(0)));
}

#[test]
fn accept_empty_value_flag() {
    let handler = FieldHandler::new("voice")
        .decode_type(ValueType::Boolean)
        .accept_empty_value(true);
    assert_eq!(handler.encode(&Value::from(true)), "");
    assert_eq!(handler.decode(""), Some(Value::from(true)));
    assert_eq!(handler.decode("anything"), Some(Value::from(true)));
    // a falsy value is written out as usual
    assert_eq!(handler.encode(&Value::from(false)), "false");
}

#[test]
fn accept_empty_value_needs_boolean_type() {
    let handler = FieldHandler::new("note").accept_empty_value(true);
    assert_eq!(handler.encode(&Value::from("text")), "text");
    assert_eq!(handler.decode(""), None);
}

#[test]
fn get_from_query() {
    let handler = FieldHandler::new("rating").decode_type(ValueType::Number);
    assert_eq!(
        handler.get_from_query("game=Wow&rating=1400&rating=2000"),
        Some(Value::from(1400))
    );
    assert_eq!(handler.get_from_query("game=Wow"), None);
    assert_eq!(handler.get_from_query("rating="), None);
    assert_eq!(handler.get_from_query(""), None);
}

#[test]
fn clone_with_condition_keeps_settings() {
    let dungeon = FieldHandler::new("dungeon")
        .aliases([("Plaguefall", "pf")])
        .encodable(false);
    let wow = dungeon.clone_with_condition([("game", "Wow")]);

    assert_eq!(wow.query(), "dungeon");
    assert!(!wow.is_encodable());
    assert_eq!(wow.decode("pf"), Some(Value::from("Plaguefall")));
    assert_eq!(
        wow.condition().and_then(|condition| condition.get("game")),
        Some(&Value::from("Wow"))
    );
    assert!(dungeon.condition().is_none());
}
