//! Boundary invariant checks
//!
//! The resolution engine's contract permits undefined behavior on records
//! that violate the data-model invariants, so callers are expected to have
//! filtered them out. These checks enforce that contract at component
//! boundaries and surface violations as a hard error kind, distinct from the
//! "no match" outcomes the engine reports through `Option`/empty returns.

use thiserror::Error;

use crate::{AuthorMention, PublicationRecord, ReferenceMention};

/// A record violating the data-model invariants.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An individual author mention with no usable identity at all.
    #[error("author mention carries neither a last name nor an ORCID")]
    EmptyAuthorMention,

    /// A collective author mention whose group name is blank.
    #[error("collective author mention has an empty collective name")]
    EmptyCollectiveName,

    /// A reference entry with every field null.
    #[error("reference mention with every field empty")]
    EmptyReference,

    /// A record with no identifier and no title cannot be keyed or resolved.
    #[error("publication record has neither an identifier nor a title")]
    UnresolvableRecord,
}

/// Check the `AuthorMention` identity invariant.
pub fn validate_author_mention(mention: &AuthorMention) -> Result<(), ValidationError> {
    match mention {
        AuthorMention::Individual {
            last_name, orcid, ..
        } => {
            let has_name = last_name.as_deref().is_some_and(|n| !n.trim().is_empty());
            if has_name || orcid.is_some() {
                Ok(())
            } else {
                Err(ValidationError::EmptyAuthorMention)
            }
        }
        AuthorMention::Collective {
            collective_name, ..
        } => {
            if collective_name.trim().is_empty() {
                Err(ValidationError::EmptyCollectiveName)
            } else {
                Ok(())
            }
        }
    }
}

/// Check the `ReferenceMention` not-all-null invariant.
pub fn validate_reference(reference: &ReferenceMention) -> Result<(), ValidationError> {
    if reference.is_empty() {
        Err(ValidationError::EmptyReference)
    } else {
        Ok(())
    }
}

/// Check a whole record: it must be keyable (or at least titled), and every
/// author and reference entry must satisfy its own invariant.
pub fn validate_record(record: &PublicationRecord) -> Result<(), ValidationError> {
    if record.canonical_key().is_none() && record.title.is_none() {
        return Err(ValidationError::UnresolvableRecord);
    }
    for author in &record.authors {
        validate_author_mention(author)?;
    }
    for reference in &record.references {
        validate_reference(reference)?;
    }
    Ok(())
}
