//! Schema-driven querystrings
//!
//! Flattens a nested data object into plain `key=value` pairs, and back,
//! following a schema that mirrors the object's shape. Each leaf of the
//! schema is a [`FieldHandler`] naming the query key the field is written
//! under and how its value is coerced.
//!
//! Unlike bracket-style nested querystrings (`filter[region]=Europe`),
//! the keys stay flat (`region=Europe`) and short, and the nesting lives
//! in the schema instead of in the URL. Several fields of different
//! branches may even share a key, told apart on decode by a condition on
//! other decoded fields.
//!
//! ## Supported Values
//!
//! Leaves hold strings, numbers, booleans or arrays of those, see
//! [`ValueType`]. Data is passed as a [`Value`], or as any type
//! implementing `serde::Serialize` / `serde::Deserialize` through
//! [`SchemaCodec::to_string`] and [`SchemaCodec::from_str`].
//!
//! ## Usage
//!
//! ```
//! use schema_qs::{FieldHandler, SchemaCodec, SchemaNode, ValueType};
//!
//! #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
//! struct Filter {
//!     region: Option<String>,
//!     rating: Option<u32>,
//! }
//!
//! #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
//! struct Search {
//!     game: String,
//!     mode: Option<String>,
//!     filter: Filter,
//!     tags: Vec<String>,
//! }
//!
//! let codec = SchemaCodec::new(SchemaNode::branch([
//!     ("game", SchemaNode::leaf(FieldHandler::new("g"))),
//!     (
//!         "mode",
//!         SchemaNode::leaf(FieldHandler::new("mode").aliases([("WowMythicPlus", "mplus")])),
//!     ),
//!     (
//!         "filter",
//!         SchemaNode::branch([
//!             ("region", FieldHandler::new("region")),
//!             ("rating", FieldHandler::new("rating").decode_type(ValueType::Number)),
//!         ]),
//!     ),
//!     ("tags", SchemaNode::leaf(FieldHandler::new("tags").decode_type(ValueType::Array))),
//! ]))
//! .unwrap();
//!
//! let search = Search {
//!     game: "Wow".to_string(),
//!     mode: Some("WowMythicPlus".to_string()),
//!     filter: Filter {
//!         region: Some("Europe".to_string()),
//!         rating: Some(1400),
//!     },
//!     tags: vec!["chill".to_string(), "voice chat".to_string()],
//! };
//!
//! let query = codec.to_string(&search).unwrap();
//! assert_eq!(query, "g=Wow&mode=mplus&region=Europe&rating=1400&tags=chill,voice%20chat");
//! assert_eq!(codec.from_str::<Search>(&query).unwrap(), search);
//! ```

mod codec;
mod config;
mod error;
mod handler;
pub mod qs;
mod schema;
mod value;

#[doc(inline)]
pub use codec::{Binding, SchemaCodec};
pub use config::{Config, DuplicateKeys};
pub use error::{Error, Result};
#[doc(inline)]
pub use handler::{DEFAULT_SEPARATOR, FieldHandler, ValueType};
pub use schema::SchemaNode;
pub use value::{Map, Value};
