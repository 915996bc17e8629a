//! Tokenized citations parsed from a free-text document
//!
//! The tokenizer itself lives outside this workspace; these are the shapes it
//! produces. Citations are consumed read-only by the resolution engine except
//! for `matched_publication_key`, which is stamped once resolution succeeds.

use serde::{Deserialize, Serialize};

/// A loose author token inside a parsed citation. Citation text rarely
/// preserves more than a surname and initials, so this is a much weaker shape
/// than `AuthorMention` — no affiliation, usually no first name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CitationAuthor {
    Collective {
        collective_name: String,
        #[serde(rename = "ORCID", default, skip_serializing_if = "Option::is_none")]
        orcid: Option<String>,
    },
    Individual {
        last: String,
        #[serde(default)]
        initials: Option<String>,
        #[serde(rename = "ORCID", default, skip_serializing_if = "Option::is_none")]
        orcid: Option<String>,
    },
}

impl CitationAuthor {
    /// Create an individual citation author from a surname.
    pub fn individual(last: impl Into<String>) -> Self {
        CitationAuthor::Individual {
            last: last.into(),
            initials: None,
            orcid: None,
        }
    }

    /// Create a collective citation author.
    pub fn collective(name: impl Into<String>) -> Self {
        CitationAuthor::Collective {
            collective_name: name.into(),
            orcid: None,
        }
    }

    /// Builder method to add initials (individuals only; no-op otherwise).
    pub fn with_initials(mut self, value: impl Into<String>) -> Self {
        if let CitationAuthor::Individual { initials, .. } = &mut self {
            *initials = Some(value.into());
        }
        self
    }

    /// Builder method to add an ORCID.
    pub fn with_orcid(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            CitationAuthor::Individual { orcid, .. } => *orcid = Some(value.into()),
            CitationAuthor::Collective { orcid, .. } => *orcid = Some(value.into()),
        }
        self
    }

    pub fn orcid(&self) -> Option<&str> {
        match self {
            CitationAuthor::Individual { orcid, .. } => orcid.as_deref(),
            CitationAuthor::Collective { orcid, .. } => orcid.as_deref(),
        }
    }
}

/// One citation parsed out of a reference document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenizedCitation {
    #[serde(default)]
    pub authors: Vec<CitationAuthor>,
    pub title: Option<String>,
    #[serde(rename = "PMID")]
    pub pmid: Option<String>,
    #[serde(rename = "DOI")]
    pub doi: Option<String>,
    /// The raw line the citation was parsed from, kept for reporting.
    pub reference_line: Option<String>,
    /// Canonical key of the publication this citation resolved to, if any.
    #[serde(rename = "pub_dict_key", default, skip_serializing_if = "Option::is_none")]
    pub matched_publication_key: Option<String>,
}

impl TokenizedCitation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to set the PMID.
    pub fn with_pmid(mut self, pmid: impl Into<String>) -> Self {
        self.pmid = Some(pmid.into());
        self
    }

    /// Builder method to set the DOI.
    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    /// Builder method to set the raw reference line.
    pub fn with_reference_line(mut self, line: impl Into<String>) -> Self {
        self.reference_line = Some(line.into());
        self
    }

    /// Builder method to append an author token.
    pub fn with_author(mut self, author: CitationAuthor) -> Self {
        self.authors.push(author);
        self
    }
}
