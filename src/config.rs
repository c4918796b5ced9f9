/// Configuration for the wire side of a [`SchemaCodec`](crate::SchemaCodec).
///
/// The schema decides what each field looks like; `Config` only covers
/// how pairs are written and which pair wins when a key repeats.
///
/// ```
/// use schema_qs::{Config, DuplicateKeys, FieldHandler, SchemaCodec, SchemaNode, Value};
///
/// let schema = SchemaNode::branch([("page", FieldHandler::new("page"))]);
///
/// let codec = SchemaCodec::new(schema.clone()).unwrap();
/// assert_eq!(codec.decode("page=1&page=2")["page"], Value::from("2"));
///
/// let config = Config::new().duplicate_keys(DuplicateKeys::First);
/// let codec = SchemaCodec::with_config(schema, config).unwrap();
/// assert_eq!(codec.decode("page=1&page=2")["page"], Value::from("1"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub(crate) use_form_encoding: bool,
    pub(crate) duplicate_keys: DuplicateKeys,
}

/// Which occurrence of a repeated query key is decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuplicateKeys {
    /// Keep the first pair, e.g. `a=1` in `a=1&a=2`.
    First,
    /// Keep the last pair, e.g. `a=2` in `a=1&a=2`.
    Last,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            use_form_encoding: cfg!(feature = "default_to_form_encoding"),
            duplicate_keys: DuplicateKeys::Last,
        }
    }

    /// By default keys are written with query-string encoding, as defined
    /// in [WHATWG](https://url.spec.whatwg.org/#query-percent-encode-set).
    /// This leaves most punctuation alone and writes spaces as `+`.
    ///
    /// Set this to `true` to escape keys with the stricter
    /// `application/x-www-form-urlencoded` set instead, e.g. `a[b]`
    /// becomes `a%5Bb%5D`. Field values are always escaped by their
    /// handler and are not affected.
    ///
    /// The `default_to_form_encoding` Cargo feature flips the default.
    pub const fn use_form_encoding(mut self, use_form_encoding: bool) -> Self {
        self.use_form_encoding = use_form_encoding;
        self
    }

    /// Chooses which pair is decoded when a key appears more than once.
    /// Default is [`DuplicateKeys::Last`].
    pub const fn duplicate_keys(mut self, duplicate_keys: DuplicateKeys) -> Self {
        self.duplicate_keys = duplicate_keys;
        self
    }
}
