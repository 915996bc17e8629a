//! Author representations
//!
//! An author shows up in three different shapes: as a mention on a queried
//! publication (`AuthorMention`), as a registry entry from the tracking
//! configuration (`TrackedAuthor`), and as a loose token inside a parsed
//! citation (`CitationAuthor`, defined in `citation`). The mention is a
//! tagged variant: whether an entry is an individual or a collective is
//! decided once at construction and never re-derived from field presence.

use serde::{Deserialize, Serialize};

/// An author entry on a publication as returned by a bibliographic source.
///
/// `author_id` is absent until a match against the tracked-author registry
/// succeeds; the matcher stamps it with the tracked author's key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorMention {
    /// A group author (consortium, working group) identified by a group name.
    Collective {
        collective_name: String,
        #[serde(rename = "ORCID", default, skip_serializing_if = "Option::is_none")]
        orcid: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author_id: Option<String>,
    },
    /// A person. Sources disagree on which name fields they fill in; the
    /// affiliation is free text and may hold several affiliations joined by
    /// newlines.
    Individual {
        #[serde(rename = "firstname", default)]
        first_name: Option<String>,
        #[serde(rename = "lastname", default)]
        last_name: Option<String>,
        #[serde(default)]
        initials: Option<String>,
        #[serde(default)]
        affiliation: Option<String>,
        #[serde(rename = "ORCID", default, skip_serializing_if = "Option::is_none")]
        orcid: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author_id: Option<String>,
    },
}

impl AuthorMention {
    /// Create an individual mention with just a last name.
    pub fn individual(last_name: impl Into<String>) -> Self {
        AuthorMention::Individual {
            first_name: None,
            last_name: Some(last_name.into()),
            initials: None,
            affiliation: None,
            orcid: None,
            author_id: None,
        }
    }

    /// Create a collective mention.
    pub fn collective(name: impl Into<String>) -> Self {
        AuthorMention::Collective {
            collective_name: name.into(),
            orcid: None,
            author_id: None,
        }
    }

    /// Builder method to add a first name (individuals only; no-op otherwise).
    pub fn with_first_name(mut self, first: impl Into<String>) -> Self {
        if let AuthorMention::Individual { first_name, .. } = &mut self {
            *first_name = Some(first.into());
        }
        self
    }

    /// Builder method to add initials (individuals only; no-op otherwise).
    pub fn with_initials(mut self, value: impl Into<String>) -> Self {
        if let AuthorMention::Individual { initials, .. } = &mut self {
            *initials = Some(value.into());
        }
        self
    }

    /// Builder method to add an affiliation (individuals only; no-op otherwise).
    pub fn with_affiliation(mut self, value: impl Into<String>) -> Self {
        if let AuthorMention::Individual { affiliation, .. } = &mut self {
            *affiliation = Some(value.into());
        }
        self
    }

    /// Builder method to add an ORCID.
    pub fn with_orcid(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            AuthorMention::Individual { orcid, .. } => *orcid = Some(value.into()),
            AuthorMention::Collective { orcid, .. } => *orcid = Some(value.into()),
        }
        self
    }

    /// Builder method to pre-set the tracked-author key.
    pub fn with_author_id(mut self, value: impl Into<String>) -> Self {
        self.set_author_id(value.into());
        self
    }

    pub fn is_collective(&self) -> bool {
        matches!(self, AuthorMention::Collective { .. })
    }

    pub fn orcid(&self) -> Option<&str> {
        match self {
            AuthorMention::Individual { orcid, .. } => orcid.as_deref(),
            AuthorMention::Collective { orcid, .. } => orcid.as_deref(),
        }
    }

    pub fn author_id(&self) -> Option<&str> {
        match self {
            AuthorMention::Individual { author_id, .. } => author_id.as_deref(),
            AuthorMention::Collective { author_id, .. } => author_id.as_deref(),
        }
    }

    /// Stamp the tracked-author key onto this mention.
    pub fn set_author_id(&mut self, id: String) {
        match self {
            AuthorMention::Individual { author_id, .. } => *author_id = Some(id),
            AuthorMention::Collective { author_id, .. } => *author_id = Some(id),
        }
    }

    /// Backfill the tracked-author key if this mention does not have one yet.
    pub fn backfill_author_id(&mut self, id: &str) {
        if self.author_id().is_none() {
            self.set_author_id(id.to_string());
        }
    }

    /// Backfill the ORCID if this mention does not have one yet.
    pub fn backfill_orcid(&mut self, value: &str) {
        let slot = match self {
            AuthorMention::Individual { orcid, .. } => orcid,
            AuthorMention::Collective { orcid, .. } => orcid,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }
}

/// The name of a tracked author from the configuration registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackedName {
    Collective { collective_name: String },
    Individual { first_name: String, last_name: String },
}

/// A registry entry for an author whose publications are being tracked.
///
/// Consumed read-only by the matchers. `id` is the registry key the matcher
/// stamps onto matched `AuthorMention`s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackedAuthor {
    pub id: String,
    #[serde(flatten)]
    pub name: TrackedName,
    #[serde(default)]
    pub affiliations: Vec<String>,
    #[serde(rename = "ORCID", default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_year: Option<i32>,
}

impl TrackedAuthor {
    /// Create an individual tracked author.
    pub fn individual(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: TrackedName::Individual {
                first_name: first_name.into(),
                last_name: last_name.into(),
            },
            affiliations: Vec::new(),
            orcid: None,
            cutoff_year: None,
        }
    }

    /// Create a collective tracked author.
    pub fn collective(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: TrackedName::Collective {
                collective_name: name.into(),
            },
            affiliations: Vec::new(),
            orcid: None,
            cutoff_year: None,
        }
    }

    /// Builder method to add an affiliation string.
    pub fn with_affiliation(mut self, value: impl Into<String>) -> Self {
        self.affiliations.push(value.into());
        self
    }

    /// Builder method to set the ORCID.
    pub fn with_orcid(mut self, value: impl Into<String>) -> Self {
        self.orcid = Some(value.into());
        self
    }

    /// Builder method to set the cutoff year.
    pub fn with_cutoff_year(mut self, year: i32) -> Self {
        self.cutoff_year = Some(year);
        self
    }

    /// Whether a publication year passes this author's cutoff.
    ///
    /// A record with no year fails a configured cutoff; callers apply this
    /// before admitting a record, the matchers never do.
    pub fn within_cutoff(&self, year: Option<i32>) -> bool {
        match (self.cutoff_year, year) {
            (None, _) => true,
            (Some(cutoff), Some(year)) => year >= cutoff,
            (Some(_), None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mention_accessors() {
        let mut mention = AuthorMention::individual("Smith")
            .with_first_name("Jane")
            .with_affiliation("MIT");
        assert!(!mention.is_collective());
        assert!(mention.orcid().is_none());

        mention.set_author_id("Jane Smith".to_string());
        assert_eq!(mention.author_id(), Some("Jane Smith"));
    }

    #[test]
    fn test_backfill_does_not_overwrite() {
        let mut mention = AuthorMention::individual("Smith").with_orcid("0000-0001-2345-6789");
        mention.backfill_orcid("0000-0009-9999-9999");
        assert_eq!(mention.orcid(), Some("0000-0001-2345-6789"));

        mention.backfill_author_id("Jane Smith");
        mention.backfill_author_id("Other Smith");
        assert_eq!(mention.author_id(), Some("Jane Smith"));
    }

    #[test]
    fn test_collective_serde_shape() {
        let mention = AuthorMention::collective("CHARGE Consortium");
        let json = serde_json::to_value(&mention).unwrap();
        assert_eq!(json["collective_name"], "CHARGE Consortium");

        let back: AuthorMention = serde_json::from_value(json).unwrap();
        assert!(back.is_collective());
    }

    #[test]
    fn test_individual_serde_field_names() {
        let json = serde_json::json!({
            "firstname": "Jane",
            "lastname": "Smith",
            "initials": "JS",
            "affiliation": "MIT",
        });
        let mention: AuthorMention = serde_json::from_value(json).unwrap();
        match mention {
            AuthorMention::Individual {
                first_name,
                last_name,
                ..
            } => {
                assert_eq!(first_name.as_deref(), Some("Jane"));
                assert_eq!(last_name.as_deref(), Some("Smith"));
            }
            AuthorMention::Collective { .. } => panic!("parsed as collective"),
        }
    }

    #[test]
    fn test_within_cutoff() {
        let author = TrackedAuthor::individual("Jane Smith", "Jane", "Smith").with_cutoff_year(2019);
        assert!(author.within_cutoff(Some(2019)));
        assert!(author.within_cutoff(Some(2023)));
        assert!(!author.within_cutoff(Some(2018)));
        assert!(!author.within_cutoff(None));

        let unbounded = TrackedAuthor::individual("Jane Smith", "Jane", "Smith");
        assert!(unbounded.within_cutoff(None));
    }

    #[test]
    fn test_tracked_author_config_shape() {
        let json = serde_json::json!({
            "id": "Jane Smith",
            "first_name": "Jane",
            "last_name": "Smith",
            "affiliations": ["MIT"],
            "ORCID": "0000-0001-2345-6789",
            "cutoff_year": 2020,
        });
        let author: TrackedAuthor = serde_json::from_value(json).unwrap();
        assert_eq!(author.orcid.as_deref(), Some("0000-0001-2345-6789"));
        assert!(matches!(author.name, TrackedName::Individual { .. }));
    }
}
