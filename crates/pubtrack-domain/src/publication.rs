//! Publication record domain model

use serde::{Deserialize, Serialize};

use crate::{AuthorMention, ReferenceMention};

/// URL prefix a DOI is resolved under when it becomes a publication key.
pub const DOI_URL: &str = "https://doi.org/";

/// Canonical identifier for a publication.
///
/// Derived from the DOI when present, else the PubMed id, else the external
/// URL. Two keys compare equal case-insensitively, which is what lets a
/// record with DOI `10.1/ABC` resolve against one stored as `10.1/abc`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicationKey(String);

impl PublicationKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw key string.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq for PublicationKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for PublicationKey {}

impl std::hash::Hash for PublicationKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl std::fmt::Display for PublicationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PublicationKey> for String {
    fn from(key: PublicationKey) -> Self {
        key.0
    }
}

/// Publication date with independently missing parts. The year is the field
/// the cutoff filter and ordering care about.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl PublicationDate {
    pub fn new(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Self {
        Self { year, month, day }
    }

    /// Copy any part that is missing here but present in `other`.
    pub fn fill_missing_from(&mut self, other: &PublicationDate) {
        if self.year.is_none() {
            self.year = other.year;
        }
        if self.month.is_none() {
            self.month = other.month;
        }
        if self.day.is_none() {
            self.day = other.day;
        }
    }
}

/// Canonical unit of a tracked work, accumulated across sources.
///
/// Created the first time a source yields an unresolved record, then mutated
/// in place by the merge engine on every later source hit. Content fields are
/// write-once: a later source only ever fills gaps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicationRecord {
    /// Lower-cased DOI without the resolver prefix.
    pub doi: Option<String>,
    pub pubmed_id: Option<String>,
    #[serde(rename = "PMCID")]
    pub pmcid: Option<String>,
    /// External URL used as a last-resort identity for sources that return
    /// neither a DOI nor a PubMed id.
    pub url: Option<String>,

    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub journal: Option<String>,
    pub methods: Option<String>,
    pub results: Option<String>,
    pub conclusions: Option<String>,
    pub copyrights: Option<String>,
    pub keywords: Option<Vec<String>>,

    #[serde(default)]
    pub publication_date: PublicationDate,

    /// Order matters: first/last authorship carries meaning downstream.
    #[serde(default)]
    pub authors: Vec<AuthorMention>,
    #[serde(default)]
    pub references: Vec<ReferenceMention>,
    /// Grant identifiers, insertion-ordered and deduplicated on merge.
    #[serde(default)]
    pub grants: Vec<String>,
    /// Source names that already contributed to this record; drives the
    /// don't-re-merge-the-same-source-twice policy.
    #[serde(default)]
    pub queried_sources: Vec<String>,
}

impl PublicationRecord {
    /// Create an empty record; all fields start missing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the DOI. Stored lower-cased so key derivation
    /// and comparisons stay stable.
    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into().to_lowercase());
        self
    }

    /// Builder method to set the PubMed id.
    pub fn with_pubmed_id(mut self, pmid: impl Into<String>) -> Self {
        self.pubmed_id = Some(pmid.into());
        self
    }

    /// Builder method to set the external URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to set the journal.
    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = Some(journal.into());
        self
    }

    /// Builder method to set the publication year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.publication_date.year = Some(year);
        self
    }

    /// Builder method to append an author mention.
    pub fn with_author(mut self, author: AuthorMention) -> Self {
        self.authors.push(author);
        self
    }

    /// Builder method to append a reference mention.
    pub fn with_reference(mut self, reference: ReferenceMention) -> Self {
        self.references.push(reference);
        self
    }

    /// Builder method to append a grant identifier.
    pub fn with_grant(mut self, grant: impl Into<String>) -> Self {
        self.grants.push(grant.into());
        self
    }

    pub fn year(&self) -> Option<i32> {
        self.publication_date.year
    }

    /// Derive the canonical publication key: DOI-derived URL if the DOI is
    /// present, else the PubMed id, else the external URL.
    pub fn canonical_key(&self) -> Option<PublicationKey> {
        if let Some(doi) = &self.doi {
            return Some(PublicationKey::new(format!(
                "{}{}",
                DOI_URL,
                doi.to_lowercase()
            )));
        }
        if let Some(pmid) = &self.pubmed_id {
            return Some(PublicationKey::new(pmid.clone()));
        }
        self.url.as_ref().map(PublicationKey::new)
    }

    /// Copy every scalar content field that is missing here but present in
    /// `other`. List fields (authors, references, grants) and
    /// `queried_sources` are left alone; the merge engine owns those.
    pub fn fill_missing_from(&mut self, other: &PublicationRecord) {
        fn fill<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if slot.is_none() {
                *slot = value.clone();
            }
        }

        fill(&mut self.doi, &other.doi);
        fill(&mut self.pubmed_id, &other.pubmed_id);
        fill(&mut self.pmcid, &other.pmcid);
        fill(&mut self.url, &other.url);
        fill(&mut self.title, &other.title);
        fill(&mut self.abstract_text, &other.abstract_text);
        fill(&mut self.journal, &other.journal);
        fill(&mut self.methods, &other.methods);
        fill(&mut self.results, &other.results);
        fill(&mut self.conclusions, &other.conclusions);
        fill(&mut self.copyrights, &other.copyrights);
        fill(&mut self.keywords, &other.keywords);
        self.publication_date
            .fill_missing_from(&other.publication_date);
    }

    /// Serialize to the JSON document shape the persistence layer stores.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a stored JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_precedence() {
        let record = PublicationRecord::new()
            .with_doi("10.1234/Test")
            .with_pubmed_id("123")
            .with_url("https://example.com/paper");
        assert_eq!(
            record.canonical_key().unwrap().as_str(),
            "https://doi.org/10.1234/test"
        );

        let record = PublicationRecord::new()
            .with_pubmed_id("123")
            .with_url("https://example.com/paper");
        assert_eq!(record.canonical_key().unwrap().as_str(), "123");

        let record = PublicationRecord::new().with_url("https://example.com/paper");
        assert_eq!(
            record.canonical_key().unwrap().as_str(),
            "https://example.com/paper"
        );

        assert!(PublicationRecord::new().canonical_key().is_none());
    }

    #[test]
    fn test_key_comparison_case_insensitive() {
        let a = PublicationKey::new("https://doi.org/10.1/abc");
        let b = PublicationKey::new("https://doi.org/10.1/ABC");
        assert_eq!(a, b);
        assert!(a.matches("HTTPS://DOI.ORG/10.1/ABC"));
    }

    #[test]
    fn test_fill_missing_never_overwrites() {
        let mut existing = PublicationRecord::new()
            .with_title("Original Title")
            .with_year(2020);
        let incoming = PublicationRecord::new()
            .with_title("Replacement Title")
            .with_journal("Nature");

        existing.fill_missing_from(&incoming);
        assert_eq!(existing.title.as_deref(), Some("Original Title"));
        assert_eq!(existing.journal.as_deref(), Some("Nature"));
        assert_eq!(existing.year(), Some(2020));
    }

    #[test]
    fn test_date_fill_missing_fieldwise() {
        let mut date = PublicationDate::new(Some(2021), None, None);
        date.fill_missing_from(&PublicationDate::new(Some(1999), Some(4), Some(2)));
        assert_eq!(date, PublicationDate::new(Some(2021), Some(4), Some(2)));
    }

    #[test]
    fn test_json_roundtrip() {
        let record = PublicationRecord::new()
            .with_doi("10.1234/test")
            .with_title("A Paper")
            .with_author(AuthorMention::individual("Smith").with_first_name("Jane"));

        let json = record.to_json().unwrap();
        assert!(json.contains("\"abstract\":null"));
        let back = PublicationRecord::from_json(&json).unwrap();
        assert_eq!(record, back);
    }
}
