//! Duplicate citation detection
//!
//! Citations parsed from one document can repeat the same work three ways:
//! same PMID, same DOI, or near-identical titles. Each criterion contributes
//! edges over the citation indices, and the transitive closure of the union
//! graph yields the duplicate groups — if citation 1 shares a title with 2
//! and 2 shares a PMID with 3, all three form one group even though 1 and 3
//! share nothing directly.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use pubtrack_domain::TokenizedCitation;

use crate::text::fuzzy::strings_fuzzy_match;

/// Partition a batch of citations into duplicate-equivalence classes.
///
/// Returns one sorted index list per group of size >= 2; singletons are
/// omitted, and no index appears in two groups. Title grouping is
/// first-match: a title joins the cluster of the earliest title it
/// fuzzy-matches, which with non-transitive similarity can split borderline
/// chains — the closure over PMID/DOI edges is what stitches those back
/// together when identifiers agree.
pub fn find_duplicate_citations(citations: &[TokenizedCitation]) -> Vec<Vec<usize>> {
    let titles: Vec<String> = citations
        .iter()
        .filter_map(|citation| citation.title.as_deref())
        .map(str::to_lowercase)
        .collect();

    let mut pmid_groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut doi_groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut title_clusters: Vec<(String, Vec<usize>)> = Vec::new();

    for (index, citation) in citations.iter().enumerate() {
        if let Some(pmid) = citation.pmid.as_deref() {
            pmid_groups.entry(pmid.to_string()).or_default().push(index);
        }
        if let Some(doi) = citation.doi.as_deref() {
            doi_groups
                .entry(doi.to_lowercase())
                .or_default()
                .push(index);
        }
        if let Some(title) = citation.title.as_deref() {
            let title = title.to_lowercase();
            let matches: Vec<&str> = titles
                .iter()
                .map(String::as_str)
                .filter(|&candidate| strings_fuzzy_match(Some(&title), Some(candidate)))
                .collect();
            // The first matching title decides the cluster; with only the
            // self-match the citation starts a cluster of its own.
            let cluster_key = if matches.len() > 1 {
                matches[0]
            } else {
                title.as_str()
            };
            match title_clusters
                .iter()
                .position(|(key, _)| key.as_str() == cluster_key)
            {
                Some(position) => title_clusters[position].1.push(index),
                None => title_clusters.push((title.clone(), vec![index])),
            }
        }
    }

    let edges = pmid_groups
        .into_values()
        .chain(doi_groups.into_values())
        .chain(title_clusters.into_iter().map(|(_, members)| members))
        .filter(|members| members.len() > 1);

    let mut neighbors: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    for members in edges {
        for &index in &members {
            let entry = neighbors.entry(index).or_default();
            entry.extend(members.iter().copied());
        }
    }

    // Transitive closure: absorb each node's neighbors' neighbors until the
    // neighbor sets stabilize.
    loop {
        let mut changed = false;
        let snapshot = neighbors.clone();
        for members in neighbors.values_mut() {
            let before = members.len();
            let absorbed: BTreeSet<usize> = members
                .iter()
                .filter_map(|member| snapshot.get(member))
                .flat_map(|set| set.iter().copied())
                .collect();
            members.extend(absorbed);
            if members.len() != before {
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let mut groups: BTreeSet<Vec<usize>> = BTreeSet::new();
    for (index, mut members) in neighbors {
        members.insert(index);
        if members.len() > 1 {
            groups.insert(members.into_iter().collect());
        }
    }

    let groups: Vec<Vec<usize>> = groups.into_iter().collect();
    if !groups.is_empty() {
        debug!(groups = groups.len(), "found duplicate citation groups");
    }
    groups
}

/// Drop every duplicate after the first member of its group, preserving the
/// original order of the survivors.
pub fn drop_duplicate_citations(citations: Vec<TokenizedCitation>) -> Vec<TokenizedCitation> {
    let groups = find_duplicate_citations(&citations);
    let dropped: BTreeSet<usize> = groups
        .iter()
        .flat_map(|group| group.iter().skip(1).copied())
        .collect();

    citations
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !dropped.contains(index))
        .map(|(_, citation)| citation)
        .collect()
}
