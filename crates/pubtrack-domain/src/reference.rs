//! Reference list entries

use serde::{Deserialize, Serialize};

/// One entry in a publication's reference list.
///
/// Sources disagree wildly here: PubMed returns raw citation text plus
/// whatever article ids it resolved, Crossref returns structured titles and
/// DOIs. A stored reference must carry at least one non-null field; entries
/// with nothing are discarded before storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceMention {
    /// Raw citation text as it appeared in the source.
    pub citation: Option<String>,
    pub title: Option<String>,
    /// Lower-cased DOI.
    pub doi: Option<String>,
    pub pubmed_id: Option<String>,
    #[serde(rename = "PMCID")]
    pub pmcid: Option<String>,
}

impl ReferenceMention {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the raw citation text.
    pub fn with_citation(mut self, text: impl Into<String>) -> Self {
        self.citation = Some(text.into());
        self
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to set the DOI (stored lower-cased).
    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into().to_lowercase());
        self
    }

    /// Builder method to set the PubMed id.
    pub fn with_pubmed_id(mut self, pmid: impl Into<String>) -> Self {
        self.pubmed_id = Some(pmid.into());
        self
    }

    /// Builder method to set the PMCID.
    pub fn with_pmcid(mut self, pmcid: impl Into<String>) -> Self {
        self.pmcid = Some(pmcid.into());
        self
    }

    /// True when every field is null; such entries violate the storage
    /// invariant and are rejected at component boundaries.
    pub fn is_empty(&self) -> bool {
        self.citation.is_none()
            && self.title.is_none()
            && self.doi.is_none()
            && self.pubmed_id.is_none()
            && self.pmcid.is_none()
    }

    /// Copy any field that is missing here but present in `other`.
    pub fn fill_missing_from(&mut self, other: &ReferenceMention) {
        fn fill(slot: &mut Option<String>, value: &Option<String>) {
            if slot.is_none() {
                *slot = value.clone();
            }
        }

        fill(&mut self.citation, &other.citation);
        fill(&mut self.title, &other.title);
        fill(&mut self.doi, &other.doi);
        fill(&mut self.pubmed_id, &other.pubmed_id);
        fill(&mut self.pmcid, &other.pmcid);
    }
}
