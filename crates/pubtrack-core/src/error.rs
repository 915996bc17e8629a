//! Engine error types
//!
//! "No match found" is a normal outcome and never an error; it comes back as
//! `None` or an empty collection. The only genuine error the engine raises is
//! a record that violates the data-model invariants at a component boundary.

use thiserror::Error;

use pubtrack_domain::ValidationError;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed input that callers were expected to filter out.
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, Error>;
