use thiserror::Error as ThisError;

/// Errors raised while building a codec or bridging typed data.
///
/// Decoding a querystring never fails: unknown keys, alias misses and
/// unresolvable collisions are all dropped from the output instead.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A schema document value that is neither a nested node nor a leaf.
    #[error("unexpected type at `{path}`: expected a nested object or a field handler, found {found}")]
    UnexpectedType { path: String, found: &'static str },

    /// A leaf whose settings could not be read.
    #[error("invalid field handler at `{path}`: {message}")]
    InvalidHandler { path: String, message: String },

    /// A query key shared by several leaves, at least one of which has
    /// nothing to tell it apart from the others.
    #[error("query key `{query}` is shared by several fields but `{path}` has no decode condition")]
    MissingCondition { query: String, path: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unexpected_type(path: &[String], found: &'static str) -> Self {
        Error::UnexpectedType {
            path: path.join("."),
            found,
        }
    }

    pub(crate) fn invalid_handler<T: std::fmt::Display>(path: &[String], message: T) -> Self {
        Error::InvalidHandler {
            path: path.join("."),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
