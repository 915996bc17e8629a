//! pubtrack-core: multi-source record-resolution engine
//!
//! This library decides whether two publication records, citations, or author
//! mentions refer to the same real-world entity, and merges attributes of
//! records that do into one canonical representation. It provides pure Rust
//! implementations of:
//! - Fuzzy text comparison and common-subphrase scoring
//! - Author identity matching (tracked registry, citation authors, cross-source)
//! - Publication identity resolution against a running collection
//! - Cross-source record merging (missing-value-wins)
//! - Duplicate citation detection
//!
//! The engine performs no I/O; source query clients, citation tokenization,
//! and persistence live outside this workspace and exchange the
//! `pubtrack-domain` shapes with it.

pub mod authors;
pub mod deduplication;
pub mod error;
pub mod identifiers;
pub mod merge;
pub mod resolution;
pub mod text;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use resolution::{ApplyOutcome, PublicationCollection};
pub use text::fuzzy::{fuzzy_eq, strings_fuzzy_match, DEFAULT_MATCH_RATIO};

// Downstream callers get the domain models through a single dependency
pub use pubtrack_domain as domain;
