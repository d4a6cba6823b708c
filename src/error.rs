//! Error type shared by every map level and the grouping utility.

use thiserror::Error;

/// Errors returned by map operations that can fail.
///
/// Probing operations (`contains_key`, `try_get`, `remove`) never return an
/// error; absence is reported through `bool`/`Option` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A constructor or builder argument was rejected.
    #[error("invalid argument `{name}`: {message}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The key chain position targeted by an add is already occupied.
    #[error("an element with the same key already exists")]
    DuplicateKey,

    /// A value read found nothing under the requested key.
    #[error("the given key was not present in the map")]
    KeyNotFound,
}

/// A convenience `Result` type alias using the crate's `Error` type.
pub type Result<T> = std::result::Result<T, Error>;
