//! Publication identity resolution and the running collection
//!
//! The collection is the single accumulation point for everything the source
//! queries return: an owned, insertion-ordered set of canonical records with
//! case-insensitive key lookup. Queries against different sources may run
//! concurrently, but their result batches are applied here one at a time by
//! one writer; nothing in this module is internally synchronized.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use pubtrack_domain::{
    validate_record, PublicationRecord, TokenizedCitation, ValidationError,
};

use crate::authors::match_pub_authors_to_citation_authors;
use crate::error::{Error, Result};
use crate::identifiers::dois_equal;
use crate::merge::merge_into;
use crate::text::fuzzy::strings_fuzzy_match;

/// What `PublicationCollection::apply` did with an incoming record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyOutcome {
    /// The record was unknown and has been inserted under `key`.
    Inserted { key: String },
    /// The record resolved to an existing entry and was merged into it.
    Merged { key: String },
    /// The source already contributed to the resolved entry; nothing merged.
    Skipped { key: String },
    /// The record has no derivable key and matched nothing; it cannot join
    /// the collection.
    Discarded,
}

impl ApplyOutcome {
    /// Canonical key of the record the outcome refers to, if it joined or
    /// resolved against the collection.
    pub fn key(&self) -> Option<&str> {
        match self {
            ApplyOutcome::Inserted { key }
            | ApplyOutcome::Merged { key }
            | ApplyOutcome::Skipped { key } => Some(key),
            ApplyOutcome::Discarded => None,
        }
    }
}

/// Insertion-ordered collection of canonical publication records keyed by
/// their canonical publication key.
#[derive(Clone, Debug, Default)]
pub struct PublicationCollection {
    records: Vec<(String, PublicationRecord)>,
    /// Lower-cased key -> position in `records`.
    index: HashMap<String, usize>,
}

impl PublicationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate `(key, record)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PublicationRecord)> {
        self.records
            .iter()
            .map(|(key, record)| (key.as_str(), record))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(&key.to_lowercase())
    }

    /// Case-insensitive lookup.
    pub fn get(&self, key: &str) -> Option<&PublicationRecord> {
        self.index
            .get(&key.to_lowercase())
            .map(|&position| &self.records[position].1)
    }

    /// Case-insensitive lookup, mutable.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut PublicationRecord> {
        self.index
            .get(&key.to_lowercase())
            .map(|&position| &mut self.records[position].1)
    }

    /// Insert a record under its canonical key, replacing any record already
    /// stored under that key.
    pub fn insert(&mut self, record: PublicationRecord) -> Result<String> {
        validate_record(&record)?;
        let key = record
            .canonical_key()
            .ok_or(Error::InvalidRecord(ValidationError::UnresolvableRecord))?
            .to_string();

        match self.index.get(&key.to_lowercase()) {
            Some(&position) => self.records[position].1 = record,
            None => {
                self.index.insert(key.to_lowercase(), self.records.len());
                self.records.push((key.clone(), record));
            }
        }
        Ok(key)
    }

    /// Resolve a candidate record to the key of a publication already known.
    ///
    /// An exact (case-insensitive) key hit always wins, even over a better
    /// title elsewhere. Otherwise the first known publication, in insertion
    /// order, whose title fuzzy-matches the candidate title is returned; with
    /// two fuzzy-matching titles the winner is whichever was inserted first,
    /// and callers must not rely on that tie-break.
    pub fn resolve(&self, key: &str, title: Option<&str>) -> Option<&str> {
        self.resolve_position(key, title)
            .map(|position| self.records[position].0.as_str())
    }

    fn resolve_position(&self, key: &str, title: Option<&str>) -> Option<usize> {
        if let Some(&position) = self.index.get(&key.to_lowercase()) {
            return Some(position);
        }
        self.records
            .iter()
            .position(|(_, record)| strings_fuzzy_match(title, record.title.as_deref()))
    }

    /// Apply one record returned by `source`: resolve it against the
    /// collection, then merge, insert, or skip.
    ///
    /// The don't-re-merge guard lives here: a source that already contributed
    /// to the resolved record is not merged a second time, which keeps the
    /// two-pass querying discipline idempotent.
    pub fn apply(&mut self, source: &str, incoming: PublicationRecord) -> Result<ApplyOutcome> {
        validate_record(&incoming)?;

        let incoming_key = incoming.canonical_key();
        let resolved = self.resolve_position(
            incoming_key.as_ref().map(|k| k.as_str()).unwrap_or(""),
            incoming.title.as_deref(),
        );

        match resolved {
            Some(position) => {
                let (key, record) = &mut self.records[position];
                let key = key.clone();
                if record.queried_sources.iter().any(|s| s == source) {
                    debug!(%key, source, "source already contributed; skipping merge");
                    return Ok(ApplyOutcome::Skipped { key });
                }
                merge_into(record, &incoming)?;
                record.queried_sources.push(source.to_string());
                Ok(ApplyOutcome::Merged { key })
            }
            None => {
                if incoming_key.is_none() {
                    // No identifier and nothing to resolve against: the
                    // record cannot be tracked. Common for sparse sources.
                    debug!(source, "record has no key and matched nothing; discarding");
                    return Ok(ApplyOutcome::Discarded);
                }
                let mut record = incoming;
                record.queried_sources = vec![source.to_string()];
                let key = self.insert(record)?;
                debug!(%key, source, "inserted new publication");
                Ok(ApplyOutcome::Inserted { key })
            }
        }
    }

    /// Stamp `matched_publication_key` on every citation that resolves to a
    /// record in the collection and is not already matched.
    pub fn assign_citation_keys(&self, citations: &mut [TokenizedCitation]) {
        for citation in citations {
            if citation.matched_publication_key.is_some() {
                continue;
            }
            if let Some(key) = self.resolve_citation(citation) {
                citation.matched_publication_key = Some(key.to_string());
            }
        }
    }

    /// Find the first record, in insertion order, that a citation matches.
    pub fn resolve_citation(&self, citation: &TokenizedCitation) -> Option<&str> {
        self.records
            .iter()
            .find(|(_, record)| citation_matches_record(citation, record))
            .map(|(key, _)| key.as_str())
    }

    /// For each citation, whether some record in the collection matches its
    /// PMID, its DOI, or its title.
    pub fn citation_presence(&self, citations: &[TokenizedCitation]) -> Vec<bool> {
        citations
            .iter()
            .map(|citation| {
                self.records.iter().any(|(_, record)| {
                    identifier_paths_match(citation, record)
                        || strings_fuzzy_match(citation.title.as_deref(), record.title.as_deref())
                })
            })
            .collect()
    }
}

fn identifier_paths_match(citation: &TokenizedCitation, record: &PublicationRecord) -> bool {
    if let (Some(pmid), Some(record_pmid)) =
        (citation.pmid.as_deref(), record.pubmed_id.as_deref())
    {
        if pmid == record_pmid {
            return true;
        }
    }
    if let (Some(doi), Some(record_doi)) = (citation.doi.as_deref(), record.doi.as_deref()) {
        if dois_equal(doi, record_doi) {
            return true;
        }
    }
    false
}

/// Decide whether a queried record corresponds to a parsed citation.
///
/// An identifier settles it outright, even when the titles disagree. Without
/// one, a plausible shared author plus a fuzzy title match is required.
pub fn citation_matches_record(citation: &TokenizedCitation, record: &PublicationRecord) -> bool {
    if identifier_paths_match(citation, record) {
        return true;
    }
    match_pub_authors_to_citation_authors(&citation.authors, &record.authors)
        && strings_fuzzy_match(citation.title.as_deref(), record.title.as_deref())
}
