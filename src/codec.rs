//! The schema walker: builds the handler index, encodes data and decodes
//! querystrings.
//!
//! ### Shared query keys
//!
//! Several leaves may use the same query key when they belong to
//! different logical branches of the data, e.g. a `dungeon` field that
//! means one thing for one game and another thing for another game. Each
//! such leaf carries a decode condition, and decoding picks the first
//! leaf (in schema order) whose condition holds against the fields
//! decoded so far.
//!
//! A condition is an object pattern such as `{ game: "Wow" }`. Each entry
//! is looked up starting in the object the leaf writes into and then in
//! each enclosing object up to the root; the nearest one holding the key
//! wins. Nested patterns match as subsets.
//!
//! Decoding is independent of pair order in the input. Unshared keys are
//! decoded first. Shared keys are then resolved in rounds: a key waits
//! while another pending shared key could still produce a field its
//! conditions look at. If every remaining key is waiting on another one (a
//! cycle), they are all resolved against what has been decoded so far.

mod index;
mod resolve;

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::Result;
use crate::schema::SchemaNode;
use crate::value::{Map, Value};
use crate::qs;

pub use index::Binding;
use index::{Branch, HandlerIndex, Node};

/// Encodes and decodes data objects against a schema.
///
/// ```
/// use schema_qs::{FieldHandler, SchemaCodec, SchemaNode, Value, ValueType};
///
/// let dungeon = FieldHandler::new("dungeon");
/// let codec = SchemaCodec::new(SchemaNode::branch([
///     ("game", SchemaNode::leaf(FieldHandler::new("game"))),
///     ("rating", SchemaNode::leaf(FieldHandler::new("rating").decode_type(ValueType::Number))),
///     ("wow", SchemaNode::branch([("dungeon", dungeon.clone_with_condition([("game", "Wow")]))])),
///     ("lostArk", SchemaNode::branch([("dungeon", dungeon.clone_with_condition([("game", "LostArk")]))])),
/// ]))
/// .unwrap();
///
/// let data: Value = [
///     ("game", Value::from("Wow")),
///     ("rating", Value::from(1400)),
///     ("wow", [("dungeon", "Plaguefall")].into_iter().collect()),
/// ]
/// .into_iter()
/// .collect();
///
/// let query = codec.encode(&data);
/// assert_eq!(query, "game=Wow&rating=1400&dungeon=Plaguefall");
/// assert_eq!(codec.decode(&query), data);
/// assert_eq!(codec.decode("dungeon=Plaguefall&game=Wow"), codec.decode("game=Wow&dungeon=Plaguefall"));
/// ```
#[derive(Clone, Debug)]
pub struct SchemaCodec {
    tree: Branch,
    index: HandlerIndex,
    config: Config,
}

impl SchemaCodec {
    /// Builds a codec with the default [`Config`].
    ///
    /// Fails if the root is a leaf, or if a query key is shared by several
    /// leaves and one of them has no decode condition.
    ///
    /// The second check is stricter than "first matching leaf wins": a
    /// schema where an unconditioned leaf shares its key would decode that
    /// key unpredictably, so it is rejected with
    /// [`Error::MissingCondition`](crate::Error::MissingCondition) instead
    /// of being accepted.
    pub fn new(schema: SchemaNode) -> Result<Self> {
        Self::with_config(schema, Config::default())
    }

    pub fn with_config(schema: SchemaNode, config: Config) -> Result<Self> {
        let (tree, index) = HandlerIndex::build(schema)?;
        debug!(
            fields = index.bindings.len(),
            queries = index.buckets.len(),
            "built handler index"
        );
        Ok(SchemaCodec {
            tree,
            index,
            config,
        })
    }

    /// Loads the schema from a JSON document, see
    /// [`SchemaNode::from_json`].
    pub fn from_json_str(schema: &str) -> Result<Self> {
        Self::new(SchemaNode::from_json_str(schema)?)
    }

    /// The leaves behind `query`, in schema order.
    pub fn handlers(&self, query: &str) -> impl Iterator<Item = &Binding> + '_ {
        self.index
            .candidates(query)
            .iter()
            .map(move |&position| &self.index.bindings[position])
    }

    /// Every query key the schema knows, in schema order.
    pub fn queries(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.buckets.keys().map(String::as_str)
    }

    /// Flattens `data` into a querystring.
    ///
    /// `data` is walked together with the schema: keys missing from either
    /// side, `Null` values, fields marked not encodable, and values whose
    /// shape does not fit the schema are left out.
    pub fn encode(&self, data: &Value) -> String {
        let mut pairs = IndexMap::new();
        match data {
            Value::Object(map) => self.encode_branch(&self.tree, map, &mut pairs),
            other => debug!(found = ?other, "top-level data is not an object, nothing to encode"),
        }
        qs::serialize(&pairs, self.config)
    }

    fn encode_branch(&self, schema: &Branch, data: &Map, pairs: &mut IndexMap<String, String>) {
        for (key, value) in data {
            let Some(node) = schema.get(key) else {
                trace!(key = %key, "no schema entry, dropped");
                continue;
            };
            match (node, value) {
                (_, Value::Null) => {}
                (Node::Branch(children), Value::Object(nested)) => {
                    self.encode_branch(children, nested, pairs)
                }
                (Node::Branch(_), _) => {
                    debug!(key = %key, "expected a nested object, skipped");
                }
                (Node::Leaf(_), Value::Object(_)) => {
                    debug!(key = %key, "expected a field value, found an object, skipped");
                }
                (Node::Leaf(position), value) => {
                    let handler = self.index.bindings[*position].handler();
                    if !handler.is_encodable() {
                        continue;
                    }
                    if pairs
                        .insert(handler.query().to_string(), handler.encode(value))
                        .is_some()
                    {
                        debug!(query = handler.query(), "query key written twice, keeping the later value");
                    }
                }
            }
        }
    }

    /// Encodes any serializable value by way of [`Value`].
    ///
    /// ```
    /// use schema_qs::{FieldHandler, SchemaCodec, SchemaNode, ValueType};
    ///
    /// #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
    /// struct Search {
    ///     term: String,
    ///     page: Option<u32>,
    /// }
    ///
    /// let codec = SchemaCodec::new(SchemaNode::branch([
    ///     ("term", FieldHandler::new("q")),
    ///     ("page", FieldHandler::new("p").decode_type(ValueType::Number)),
    /// ]))
    /// .unwrap();
    ///
    /// let search = Search { term: "rust lang".into(), page: Some(2) };
    /// let query = codec.to_string(&search).unwrap();
    /// assert_eq!(query, "q=rust%20lang&p=2");
    /// assert_eq!(codec.from_str::<Search>(&query).unwrap(), search);
    /// ```
    pub fn to_string<T: Serialize>(&self, data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(self.encode(&Value::from(value)))
    }

    /// Decodes a querystring into any deserializable type by way of
    /// [`Value`]. Fields missing from the querystring are missing from the
    /// input the type sees, so they should be `Option`s or have defaults.
    pub fn from_str<T: DeserializeOwned>(&self, query: &str) -> Result<T> {
        let value = self.decode(query);
        Ok(serde_json::from_value(value.into())?)
    }
}
