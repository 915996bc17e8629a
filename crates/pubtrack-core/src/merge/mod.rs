//! Cross-source record merging
//!
//! Two representations of the same publication are folded into one canonical
//! record. Content fields are write-once: the first source to supply a value
//! wins, later sources only fill gaps. List fields get real matching —
//! authors through the cross-source author matcher, references through
//! identifier/title/phrase comparison, grants as an ordered union.

use std::collections::HashSet;

use tracing::{debug, trace};

use pubtrack_domain::{validate_record, PublicationRecord, ReferenceMention};

use crate::authors::merge_author_lists;
use crate::error::Result;
use crate::identifiers::dois_equal;
use crate::text::fuzzy::strings_fuzzy_match;
use crate::text::subphrase::{common_phrase_percent, DEFAULT_PHRASE_MIN_LEN, DEFAULT_STRIP_CHARS};

/// Common-phrase score at or above which two raw citation texts are treated
/// as the same reference.
pub const PHRASE_MATCH_PERCENT: f64 = 85.0;

/// Merge `incoming` into `existing`, which must denote the same publication.
///
/// The caller is responsible for appending the contributing source to
/// `existing.queried_sources` afterwards, and for skipping the merge entirely
/// when that source already contributed (`PublicationCollection::apply` does
/// both). Assumes exclusive access to `existing` for the duration of the
/// call.
pub fn merge_into(existing: &mut PublicationRecord, incoming: &PublicationRecord) -> Result<()> {
    validate_record(existing)?;
    validate_record(incoming)?;

    existing.fill_missing_from(incoming);
    existing.authors = merge_author_lists(std::mem::take(&mut existing.authors), &incoming.authors);
    existing.references =
        merge_reference_lists(std::mem::take(&mut existing.references), &incoming.references);

    for grant in &incoming.grants {
        if !existing.grants.contains(grant) {
            existing.grants.push(grant.clone());
        }
    }

    debug!(
        authors = existing.authors.len(),
        references = existing.references.len(),
        grants = existing.grants.len(),
        "merged incoming record"
    );
    Ok(())
}

/// Decide whether two reference entries denote the same cited work.
///
/// Any single signal suffices: shared identifier, fuzzy title, one side's
/// title inside the other side's raw citation text, or a high common-phrase
/// score between the two raw citations (the path that carries OCR-mangled
/// reference lists with no titles at all).
fn references_match(existing: &ReferenceMention, incoming: &ReferenceMention) -> bool {
    if let (Some(a), Some(b)) = (existing.doi.as_deref(), incoming.doi.as_deref()) {
        if dois_equal(a, b) {
            return true;
        }
    }
    if let (Some(a), Some(b)) = (existing.pubmed_id.as_deref(), incoming.pubmed_id.as_deref()) {
        if a == b {
            return true;
        }
    }
    if let (Some(a), Some(b)) = (existing.pmcid.as_deref(), incoming.pmcid.as_deref()) {
        if a == b {
            return true;
        }
    }

    if strings_fuzzy_match(existing.title.as_deref(), incoming.title.as_deref()) {
        return true;
    }

    if let (Some(title), Some(citation)) = (incoming.title.as_deref(), existing.citation.as_deref())
    {
        if citation.to_lowercase().contains(&title.to_lowercase()) {
            return true;
        }
    }
    if let (Some(title), Some(citation)) = (existing.title.as_deref(), incoming.citation.as_deref())
    {
        if citation.to_lowercase().contains(&title.to_lowercase()) {
            return true;
        }
    }

    if let Some((existing_pct, incoming_pct)) = common_phrase_percent(
        existing.citation.as_deref(),
        incoming.citation.as_deref(),
        DEFAULT_STRIP_CHARS,
        DEFAULT_PHRASE_MIN_LEN,
    ) {
        if existing_pct >= PHRASE_MATCH_PERCENT || incoming_pct >= PHRASE_MATCH_PERCENT {
            return true;
        }
    }

    false
}

/// Merge the reference lists of two representations of the same publication.
///
/// Each incoming reference may consume at most one existing reference and
/// vice versa, tracked through an explicit consumed set; a matched pair is
/// deep-merged missing-value-wins, anything unmatched is appended.
fn merge_reference_lists(
    mut existing: Vec<ReferenceMention>,
    incoming: &[ReferenceMention],
) -> Vec<ReferenceMention> {
    // Incoming references only pair with the original entries, never with
    // references appended earlier in this same merge.
    let original_len = existing.len();
    let mut consumed: HashSet<usize> = HashSet::new();

    for incoming_reference in incoming {
        let mut matched = false;
        for index in 0..original_len {
            if consumed.contains(&index) {
                continue;
            }
            if references_match(&existing[index], incoming_reference) {
                trace!(index, "incoming reference matched existing entry");
                existing[index].fill_missing_from(incoming_reference);
                consumed.insert(index);
                matched = true;
                break;
            }
        }
        if !matched {
            existing.push(incoming_reference.clone());
        }
    }

    existing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references_match_by_identifier() {
        let a = ReferenceMention::new().with_doi("10.1/abc");
        let b = ReferenceMention::new()
            .with_doi("10.1/ABC")
            .with_title("anything");
        assert!(references_match(&a, &b));

        let a = ReferenceMention::new().with_pubmed_id("555");
        let b = ReferenceMention::new().with_pubmed_id("555");
        assert!(references_match(&a, &b));

        let a = ReferenceMention::new().with_pmcid("PMC100");
        let b = ReferenceMention::new().with_pmcid("PMC100");
        assert!(references_match(&a, &b));
    }

    #[test]
    fn test_references_match_title_in_citation() {
        let a = ReferenceMention::new()
            .with_citation("Smith J. A Landmark Study of Things. J Things. 2020.");
        let b = ReferenceMention::new().with_title("a landmark study of things");
        assert!(references_match(&a, &b));
        assert!(references_match(&b, &a));
    }

    #[test]
    fn test_references_no_match_without_shared_signal() {
        let a = ReferenceMention::new().with_doi("10.1/abc");
        let b = ReferenceMention::new().with_pubmed_id("555");
        assert!(!references_match(&a, &b));
    }

    #[test]
    fn test_consumed_existing_reference_cannot_absorb_twice() {
        let existing = vec![ReferenceMention::new().with_pubmed_id("1")];
        let incoming = vec![
            ReferenceMention::new().with_pubmed_id("1").with_doi("10.1/a"),
            ReferenceMention::new()
                .with_pubmed_id("1")
                .with_doi("10.1/b"),
        ];

        let merged = merge_reference_lists(existing, &incoming);
        // The second incoming copy may not re-consume the merged entry.
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].doi.as_deref(), Some("10.1/a"));
        assert_eq!(merged[1].doi.as_deref(), Some("10.1/b"));
    }
}
