//! Author identity matching
//!
//! Three directions of the same heuristic family:
//! - publication author mentions against the tracked-author registry
//!   (precise: requires an ORCID, a fuzzy collective name, or two independent
//!   signals — name plus affiliation — because false positives corrupt a
//!   researcher's publication list),
//! - publication author mentions against a citation's tokenized authors
//!   (loose: a single weak signal is enough, the caller pairs it with a title
//!   check),
//! - author mentions of the same publication across two sources (merging).

use regex::Regex;
use tracing::{debug, trace};

use pubtrack_domain::{AuthorMention, CitationAuthor, TrackedAuthor, TrackedName};

use crate::text::fuzzy::strings_fuzzy_match;

/// Lower-case and drop periods so "J." and "j" compare equal.
fn normalize_name(name: &str) -> String {
    name.replace('.', "").to_lowercase()
}

/// One direction of the tolerant first-name rule: `candidate` appears in
/// `target` as a trailing token, a leading token, or a prefix.
fn first_name_pattern_matches(candidate: &str, target: &str) -> bool {
    let escaped = regex::escape(candidate);
    let pattern = format!("^(?:.* {escaped}|{escaped} .*|{escaped})");
    Regex::new(&pattern)
        .map(|re| re.is_match(target))
        .unwrap_or(false)
}

/// Tolerant first-name comparison, checked in both directions so middle
/// names and initials appended on either side still match ("Jane" pairs with
/// "Jane A", "Andrew P" pairs with "Andrew"). Prefix collisions ("Hu" matches
/// "Hubert") are accepted; the exact last-name requirement carries the
/// precision.
pub(crate) fn first_names_match(a: &str, b: &str) -> bool {
    let a = normalize_name(a);
    let b = normalize_name(b);
    first_name_pattern_matches(&a, &b) || first_name_pattern_matches(&b, &a)
}

/// Exact last-name comparison, case- and period-insensitive.
fn last_names_match(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

/// At least one registry affiliation substring must appear in the mention's
/// free-text affiliation, case-insensitively.
fn affiliations_overlap(tracked: &[String], mention_affiliation: Option<&str>) -> bool {
    let Some(affiliation) = mention_affiliation else {
        return false;
    };
    let affiliation = affiliation.to_lowercase();
    tracked
        .iter()
        .any(|candidate| affiliation.contains(&candidate.to_lowercase()))
}

/// Try one mention against one tracked author, in priority order.
fn mention_matches_tracked(mention: &AuthorMention, tracked: &TrackedAuthor) -> bool {
    // ORCID is the strongest signal and short-circuits everything else.
    if let (Some(mention_orcid), Some(tracked_orcid)) = (mention.orcid(), tracked.orcid.as_deref())
    {
        if mention_orcid == tracked_orcid {
            return true;
        }
    }

    match (mention, &tracked.name) {
        (
            AuthorMention::Collective {
                collective_name, ..
            },
            TrackedName::Collective {
                collective_name: tracked_name,
            },
        ) => strings_fuzzy_match(Some(collective_name), Some(tracked_name)),
        (
            AuthorMention::Individual {
                first_name,
                last_name,
                affiliation,
                ..
            },
            TrackedName::Individual {
                first_name: tracked_first,
                last_name: tracked_last,
            },
        ) => {
            let (Some(first), Some(last)) = (first_name.as_deref(), last_name.as_deref()) else {
                return false;
            };
            first_names_match(tracked_first, first)
                && last_names_match(tracked_last, last)
                && affiliations_overlap(&tracked.affiliations, affiliation.as_deref())
        }
        _ => false,
    }
}

/// Resolve a publication's author mentions against the tracked registry.
///
/// Each mention is stamped with the id of the first tracked author it matches
/// (and the tracked ORCID is backfilled when the mention has none). Returns
/// the empty vector when no mention matched any tracked author — the signal
/// that the whole publication should be discarded. Not finding a match is
/// common: sources return publications where a tracked author was only a
/// collaborator.
pub fn match_authors_to_registry(
    mut mentions: Vec<AuthorMention>,
    registry: &[TrackedAuthor],
) -> Vec<AuthorMention> {
    let mut publication_has_tracked_author = false;

    for mention in &mut mentions {
        for tracked in registry {
            trace!(tracked = %tracked.id, "trying tracked author against mention");
            if mention_matches_tracked(mention, tracked) {
                debug!(tracked = %tracked.id, "author mention matched tracked author");
                mention.set_author_id(tracked.id.clone());
                if let Some(orcid) = tracked.orcid.as_deref() {
                    mention.backfill_orcid(orcid);
                }
                publication_has_tracked_author = true;
                break;
            }
        }
    }

    if publication_has_tracked_author {
        mentions
    } else {
        Vec::new()
    }
}

/// Decide whether a queried publication plausibly shares an author with a
/// parsed citation.
///
/// Deliberately looser than the registry matcher: citation tokenization
/// rarely preserves affiliations or first names, so an ORCID, a fuzzy
/// collective name, or an exact last name alone counts. The caller combines
/// this with a title similarity check.
pub fn match_pub_authors_to_citation_authors(
    citation_authors: &[CitationAuthor],
    mentions: &[AuthorMention],
) -> bool {
    for mention in mentions {
        for citation_author in citation_authors {
            if let (Some(mention_orcid), Some(citation_orcid)) =
                (mention.orcid(), citation_author.orcid())
            {
                if mention_orcid == citation_orcid {
                    return true;
                }
            }

            match (mention, citation_author) {
                (
                    AuthorMention::Collective {
                        collective_name, ..
                    },
                    CitationAuthor::Collective {
                        collective_name: citation_name,
                        ..
                    },
                ) => {
                    if strings_fuzzy_match(Some(collective_name), Some(citation_name)) {
                        return true;
                    }
                }
                (
                    AuthorMention::Individual { last_name, .. },
                    CitationAuthor::Individual { last, .. },
                ) => {
                    if let Some(last_name) = last_name.as_deref() {
                        if last_names_match(last_name, last) {
                            return true;
                        }
                    }
                }
                _ => {}
            }
        }
    }
    false
}

/// Try to pair an incoming author mention with an existing one from another
/// source.
fn mentions_match(existing: &AuthorMention, incoming: &AuthorMention) -> bool {
    if let (Some(a), Some(b)) = (existing.author_id(), incoming.author_id()) {
        if a == b {
            return true;
        }
    }
    if let (Some(a), Some(b)) = (existing.orcid(), incoming.orcid()) {
        if a == b {
            return true;
        }
    }

    match (existing, incoming) {
        (
            AuthorMention::Collective {
                collective_name: a, ..
            },
            AuthorMention::Collective {
                collective_name: b, ..
            },
        ) => strings_fuzzy_match(Some(a), Some(b)),
        (
            AuthorMention::Individual {
                first_name: existing_first,
                last_name: existing_last,
                ..
            },
            AuthorMention::Individual {
                first_name: incoming_first,
                last_name: incoming_last,
                ..
            },
        ) => {
            let (Some(existing_first), Some(existing_last)) =
                (existing_first.as_deref(), existing_last.as_deref())
            else {
                return false;
            };
            let (Some(incoming_first), Some(incoming_last)) =
                (incoming_first.as_deref(), incoming_last.as_deref())
            else {
                return false;
            };
            first_names_match(incoming_first, existing_first)
                && last_names_match(incoming_last, existing_last)
        }
        _ => false,
    }
}

/// Merge the author lists of two representations of the same publication.
///
/// Each incoming mention is paired with the first matching existing mention
/// (tracked id, then ORCID, then collective name, then first/last name); a
/// match backfills `author_id` and `orcid` onto the existing mention.
/// Unmatched incoming mentions are appended as new authors, preserving the
/// existing order in front.
pub fn merge_author_lists(
    mut existing: Vec<AuthorMention>,
    incoming: &[AuthorMention],
) -> Vec<AuthorMention> {
    // Incoming mentions may only pair with authors that were already present,
    // not with mentions appended earlier in this same merge.
    let original_len = existing.len();

    for incoming_mention in incoming {
        let mut matched = false;
        for existing_mention in existing.iter_mut().take(original_len) {
            if mentions_match(existing_mention, incoming_mention) {
                if let Some(id) = incoming_mention.author_id() {
                    existing_mention.backfill_author_id(id);
                }
                if let Some(orcid) = incoming_mention.orcid() {
                    existing_mention.backfill_orcid(orcid);
                }
                matched = true;
                break;
            }
        }
        if !matched {
            existing.push(incoming_mention.clone());
        }
    }

    existing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Vec<TrackedAuthor> {
        vec![
            TrackedAuthor::individual("Jane Smith", "Jane", "Smith")
                .with_affiliation("MIT")
                .with_orcid("0000-0001-2345-6789"),
            TrackedAuthor::collective("ENCODE", "ENCODE Project Consortium"),
        ]
    }

    #[test]
    fn test_first_names_match_tolerates_appended_initials() {
        assert!(first_names_match("Jane", "Jane"));
        assert!(first_names_match("Jane", "Jane A"));
        assert!(first_names_match("Jane", "Mary Jane"));
        assert!(first_names_match("Jane", "jane a."));
        assert!(first_names_match("Andrew P", "Andrew"));
        assert!(!first_names_match("Jane", "Bob"));
        assert!(!first_names_match("Janet Q", "Jane B"));
    }

    #[test]
    fn test_first_names_match_prefix_quirk() {
        // Prefix matches are accepted by design; the last-name check carries
        // the precision.
        assert!(first_names_match("Hu", "Hubert"));
        assert!(first_names_match("Jane", "Janet"));
    }

    #[test]
    fn test_registry_match_requires_affiliation() {
        let mentions = vec![AuthorMention::individual("Smith").with_first_name("Jane A")];
        assert!(match_authors_to_registry(mentions, &registry()).is_empty());

        let mentions = vec![AuthorMention::individual("Smith")
            .with_first_name("Jane A")
            .with_affiliation("Dept. of Biology, MIT, Cambridge MA")];
        let matched = match_authors_to_registry(mentions, &registry());
        assert_eq!(matched[0].author_id(), Some("Jane Smith"));
        // Registry ORCID is backfilled onto the mention.
        assert_eq!(matched[0].orcid(), Some("0000-0001-2345-6789"));
    }

    #[test]
    fn test_registry_match_by_orcid_ignores_names() {
        let mentions =
            vec![AuthorMention::individual("Smyth").with_orcid("0000-0001-2345-6789")];
        let matched = match_authors_to_registry(mentions, &registry());
        assert_eq!(matched[0].author_id(), Some("Jane Smith"));
    }

    #[test]
    fn test_registry_match_collective_fuzzy() {
        let mentions = vec![AuthorMention::collective("ENCODE Project Consortium.")];
        let matched = match_authors_to_registry(mentions, &registry());
        assert_eq!(matched[0].author_id(), Some("ENCODE"));
    }

    #[test]
    fn test_unmatched_mentions_keep_no_author_id() {
        let mentions = vec![
            AuthorMention::individual("Smith")
                .with_first_name("Jane")
                .with_affiliation("MIT"),
            AuthorMention::individual("Doe").with_first_name("John"),
        ];
        let matched = match_authors_to_registry(mentions, &registry());
        assert_eq!(matched.len(), 2);
        assert!(matched[0].author_id().is_some());
        assert!(matched[1].author_id().is_none());
    }

    #[test]
    fn test_citation_author_match_last_name_only() {
        let mentions = vec![AuthorMention::individual("Smith").with_first_name("Jane")];
        let citation_authors = vec![CitationAuthor::individual("smith.").with_initials("J")];
        assert!(match_pub_authors_to_citation_authors(
            &citation_authors,
            &mentions
        ));

        let other = vec![CitationAuthor::individual("Doe")];
        assert!(!match_pub_authors_to_citation_authors(&other, &mentions));
    }

    #[test]
    fn test_citation_author_match_by_orcid() {
        let mentions = vec![AuthorMention::individual("Smyth").with_orcid("0000-0001-2345-6789")];
        let citation_authors =
            vec![CitationAuthor::individual("Smith").with_orcid("0000-0001-2345-6789")];
        assert!(match_pub_authors_to_citation_authors(
            &citation_authors,
            &mentions
        ));
    }

    #[test]
    fn test_merge_author_lists_backfills_and_appends() {
        let existing = vec![AuthorMention::individual("Smith").with_first_name("Jane A")];
        let incoming = vec![
            AuthorMention::individual("Smith")
                .with_first_name("Jane")
                .with_author_id("Jane Smith")
                .with_orcid("0000-0001-2345-6789"),
            AuthorMention::individual("Doe").with_first_name("John"),
        ];

        let merged = merge_author_lists(existing, &incoming);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].author_id(), Some("Jane Smith"));
        assert_eq!(merged[0].orcid(), Some("0000-0001-2345-6789"));
        match &merged[1] {
            AuthorMention::Individual { last_name, .. } => {
                assert_eq!(last_name.as_deref(), Some("Doe"));
            }
            AuthorMention::Collective { .. } => panic!("appended author should be individual"),
        }
    }

    #[test]
    fn test_merge_author_lists_matches_by_author_id() {
        let existing = vec![AuthorMention::collective("The Consortium").with_author_id("C1")];
        let incoming = vec![AuthorMention::collective("A Consortium, renamed")
            .with_author_id("C1")
            .with_orcid("0000-0002-0000-0001")];

        let merged = merge_author_lists(existing, &incoming);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].orcid(), Some("0000-0002-0000-0001"));
    }
}
