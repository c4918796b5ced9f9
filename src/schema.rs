//! The caller's schema tree, built in code or loaded from JSON.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::handler::{FieldHandler, ValueType};
use crate::value::{Value, parse_number};

/// A node of the schema tree: a leaf describing one field, or a branch
/// mirroring a nested object.
///
/// ```
/// use schema_qs::{FieldHandler, SchemaNode, ValueType};
///
/// let schema = SchemaNode::branch([
///     ("game", SchemaNode::leaf(FieldHandler::new("game"))),
///     (
///         "filter",
///         SchemaNode::branch([(
///             "rating",
///             FieldHandler::new("rating").decode_type(ValueType::Number),
///         )]),
///     ),
/// ]);
/// assert!(matches!(schema, SchemaNode::Branch(_)));
/// ```
#[derive(Clone, Debug)]
pub enum SchemaNode {
    Leaf(FieldHandler),
    Branch(IndexMap<String, SchemaNode>),
}

impl SchemaNode {
    pub fn leaf(handler: FieldHandler) -> Self {
        SchemaNode::Leaf(handler)
    }

    pub fn branch<I, K, N>(children: I) -> Self
    where
        I: IntoIterator<Item = (K, N)>,
        K: Into<String>,
        N: Into<SchemaNode>,
    {
        SchemaNode::Branch(
            children
                .into_iter()
                .map(|(key, node)| (key.into(), node.into()))
                .collect(),
        )
    }

    /// Classifies a JSON document into a schema tree.
    ///
    /// An object with a string `"query"` member is a leaf; any other object
    /// is a branch. Every other JSON value is rejected with
    /// [`Error::UnexpectedType`].
    ///
    /// Leaf members: `query`, `type` (`"string"`, `"number"`, `"boolean"`,
    /// `"array"`), `aliases`, `separator`, `encodable`, `decodeEmptyValue`,
    /// `acceptEmptyValue`, `decodeCondition`.
    ///
    /// ```
    /// use schema_qs::SchemaNode;
    ///
    /// let schema = SchemaNode::from_json_str(r#"{
    ///     "game": { "query": "game" },
    ///     "filter": { "rating": { "query": "rating", "type": "number" } }
    /// }"#).unwrap();
    /// assert!(matches!(schema, SchemaNode::Branch(_)));
    ///
    /// let err = SchemaNode::from_json_str(r#"{ "filter": { "rating": 5 } }"#).unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "unexpected type at `filter.rating`: expected a nested object or a field handler, found a number"
    /// );
    /// ```
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let mut path = Vec::new();
        classify(value, &mut path)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Self::from_json(&value)
    }
}

impl From<FieldHandler> for SchemaNode {
    fn from(handler: FieldHandler) -> Self {
        SchemaNode::Leaf(handler)
    }
}

fn classify(value: &serde_json::Value, path: &mut Vec<String>) -> Result<SchemaNode> {
    let serde_json::Value::Object(members) = value else {
        return Err(Error::unexpected_type(path, json_kind(value)));
    };

    if members.get("query").is_some_and(serde_json::Value::is_string) {
        return read_handler(value, path).map(SchemaNode::Leaf);
    }

    let mut children = IndexMap::with_capacity(members.len());
    for (key, child) in members {
        path.push(key.clone());
        let node = classify(child, path)?;
        path.pop();
        children.insert(key.clone(), node);
    }
    Ok(SchemaNode::Branch(children))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// The JSON shape of a leaf.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct HandlerDocument {
    query: String,
    #[serde(default, rename = "type", alias = "decodeType")]
    value_type: ValueType,
    #[serde(default)]
    aliases: Option<IndexMap<String, String>>,
    #[serde(default)]
    separator: Option<String>,
    #[serde(default)]
    encodable: Option<bool>,
    #[serde(default)]
    decode_empty_value: bool,
    #[serde(default)]
    accept_empty_value: bool,
    #[serde(default)]
    decode_condition: Option<serde_json::Map<String, serde_json::Value>>,
}

fn read_handler(value: &serde_json::Value, path: &[String]) -> Result<FieldHandler> {
    let document = HandlerDocument::deserialize(value)
        .map_err(|err| Error::invalid_handler(path, err))?;

    let mut handler = FieldHandler::new(document.query)
        .decode_type(document.value_type)
        .decode_empty_value(document.decode_empty_value)
        .accept_empty_value(document.accept_empty_value);

    if let Some(aliases) = document.aliases {
        // JSON object keys are always strings
        let numeric = document.value_type == ValueType::Number;
        handler = handler.aliases(aliases.into_iter().map(|(logical, wire)| {
            let logical = if numeric {
                Value::Number(parse_number(&logical))
            } else {
                Value::String(logical)
            };
            (logical, wire)
        }));
    }
    if let Some(separator) = document.separator {
        if separator.is_empty() {
            return Err(Error::invalid_handler(path, "separator must not be empty"));
        }
        handler = handler.separator(separator);
    }
    if let Some(encodable) = document.encodable {
        handler = handler.encodable(encodable);
    }
    if let Some(condition) = document.decode_condition {
        handler = handler.decode_condition(
            condition
                .into_iter()
                .map(|(key, value)| (key, Value::from(value))),
        );
    }
    Ok(handler)
}
