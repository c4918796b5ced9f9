//! Encode/decode rules for a single field.

use std::collections::HashMap;

use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use serde::Deserialize;

use crate::qs;
use crate::value::{Map, Value, parse_number};

/// Separator used to join array elements when a handler sets none.
pub const DEFAULT_SEPARATOR: &str = ",";

/// How a decoded string is coerced.
///
/// A querystring carries no type information (`rating=1400` could be a
/// string or a number), so every handler declares one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    Number,
    Boolean,
    Array,
}

/// Both directions of an alias table.
#[derive(Clone, Debug, Default)]
struct Aliases {
    /// logical value (in its string form) -> wire string
    forward: IndexMap<String, String>,
    /// wire string -> logical value
    reverse: HashMap<String, Value>,
}

/// The leaf of a schema: how one field appears in the querystring.
///
/// ```
/// use schema_qs::{FieldHandler, Value, ValueType};
///
/// let mode = FieldHandler::new("mode").aliases([("WowMythicPlus", "mplus")]);
/// assert_eq!(mode.encode(&Value::from("WowMythicPlus")), "mplus");
/// assert_eq!(mode.decode("mplus"), Some(Value::from("WowMythicPlus")));
///
/// let rating = FieldHandler::new("rating").decode_type(ValueType::Number);
/// assert_eq!(rating.decode("1400"), Some(Value::from(1400)));
/// ```
#[derive(Clone, Debug)]
pub struct FieldHandler {
    query: String,
    value_type: ValueType,
    aliases: Option<Aliases>,
    separator: Option<String>,
    encodable: bool,
    decode_empty_value: bool,
    accept_empty_value: bool,
    decode_condition: Option<Map>,
}

impl FieldHandler {
    /// A string field written under `query`.
    pub fn new(query: impl Into<String>) -> Self {
        FieldHandler {
            query: query.into(),
            value_type: ValueType::String,
            aliases: None,
            separator: None,
            encodable: true,
            decode_empty_value: false,
            accept_empty_value: false,
            decode_condition: None,
        }
    }

    pub fn decode_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Maps logical values to the strings written on the wire.
    ///
    /// The reverse table is built here. If two logical values share a
    /// wire string, decoding yields the one listed last.
    pub fn aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<String>,
    {
        let mut table = Aliases::default();
        for (logical, wire) in aliases {
            let logical = logical.into();
            let wire = wire.into();
            table.forward.insert(logical.to_string(), wire.clone());
            table.reverse.insert(wire, logical);
        }
        self.aliases = Some(table);
        self
    }

    /// Separator for array values, [`DEFAULT_SEPARATOR`] if unset or empty.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into()).filter(|separator| !separator.is_empty());
        self
    }

    /// `false` keeps the field out of encoded querystrings. Decoding is
    /// unaffected.
    pub fn encodable(mut self, encodable: bool) -> Self {
        self.encodable = encodable;
        self
    }

    /// Decode `key=` as a value of the field's type instead of as absent.
    pub fn decode_empty_value(mut self, decode_empty_value: bool) -> Self {
        self.decode_empty_value = decode_empty_value;
        self
    }

    /// Treat the key's presence as the value: a truthy value encodes as
    /// `key=` and any value decodes to `true`.
    ///
    /// Only honoured for [`ValueType::Boolean`] fields.
    pub fn accept_empty_value(mut self, accept_empty_value: bool) -> Self {
        self.accept_empty_value = accept_empty_value;
        self
    }

    /// The pattern that selects this handler when its query key is shared
    /// with other handlers. See [`SchemaCodec`](crate::SchemaCodec) for
    /// how it is matched.
    pub fn decode_condition<I, K, V>(mut self, condition: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.decode_condition = Some(collect_condition(condition));
        self
    }

    /// A copy of this handler under a different decode condition, for
    /// declaring several fields behind one query key.
    ///
    /// ```
    /// use schema_qs::FieldHandler;
    ///
    /// let dungeon = FieldHandler::new("dungeon");
    /// let wow = dungeon.clone_with_condition([("game", "Wow")]);
    /// let lost_ark = dungeon.clone_with_condition([("game", "LostArk")]);
    /// assert_eq!(wow.query(), lost_ark.query());
    /// ```
    pub fn clone_with_condition<I, K, V>(&self, condition: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        FieldHandler {
            decode_condition: Some(collect_condition(condition)),
            ..self.clone()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_encodable(&self) -> bool {
        self.encodable
    }

    pub fn array_separator(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }

    pub fn condition(&self) -> Option<&Map> {
        self.decode_condition.as_ref()
    }

    fn accepts_empty_value(&self) -> bool {
        self.accept_empty_value && self.value_type == ValueType::Boolean
    }

    /// Encodes a value into its escaped wire form.
    pub fn encode(&self, value: &Value) -> String {
        if self.accepts_empty_value() && value.is_truthy() {
            // presence of the key alone carries the value
            return String::new();
        }

        if let Some(aliases) = &self.aliases {
            if value.is_primitive() {
                let logical = value.to_string();
                let wire = aliases
                    .forward
                    .get(&logical)
                    .filter(|alias| !alias.is_empty())
                    .unwrap_or(&logical);
                return qs::encode_component(wire);
            }
        }

        if let Value::Array(items) = value {
            return items
                .iter()
                .map(|item| qs::encode_component(&item.to_string()))
                .collect::<Vec<_>>()
                .join(self.array_separator());
        }

        qs::encode_component(&value.to_string())
    }

    /// Decodes a raw wire value. `None` means the field is absent.
    ///
    /// Boolean fields are `true` for any non-empty string, so `"false"`
    /// decodes to `true`.
    pub fn decode(&self, raw: &str) -> Option<Value> {
        let data = qs::decode_component(raw);

        if data.is_empty() && !self.decode_empty_value && !self.accepts_empty_value() {
            return None;
        }

        if let Some(aliases) = &self.aliases {
            return aliases.reverse.get(&*data).cloned();
        }

        let value = match self.value_type {
            ValueType::Boolean => Value::Bool(self.accepts_empty_value() || !data.is_empty()),
            ValueType::Number => Value::Number(parse_number(&data)),
            ValueType::String => Value::String(data.into_owned()),
            // elements are unescaped once more after the split; `+` is
            // literal at that point
            ValueType::Array => Value::Array(
                data.split(self.array_separator())
                    .map(|item| {
                        Value::String(percent_decode_str(item).decode_utf8_lossy().into_owned())
                    })
                    .collect(),
            ),
        };
        Some(value)
    }

    /// Reads this field straight out of a querystring.
    ///
    /// Uses the first pair named [`query`](Self::query); `None` if there is
    /// none or it decodes as absent.
    ///
    /// ```
    /// use schema_qs::{FieldHandler, Value};
    ///
    /// let region = FieldHandler::new("region");
    /// assert_eq!(region.get_from_query("?game=Wow&region=Europe"), Some(Value::from("Europe")));
    /// assert_eq!(region.get_from_query("game=Wow"), None);
    /// ```
    pub fn get_from_query(&self, query: &str) -> Option<Value> {
        let pairs = qs::parse(query);
        qs::get(&pairs, &self.query).and_then(|raw| self.decode(raw))
    }
}

fn collect_condition<I, K, V>(condition: I) -> Map
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    condition
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}
