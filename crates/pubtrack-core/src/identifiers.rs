//! Identifier normalization and extraction

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Bare ORCID id, with the X checksum digit allowed in the last position.
    static ref ORCID_REGEX: Regex =
        Regex::new(r"(\d{4}-\d{4}-\d{4}-\d{3}[0-9X])").unwrap();
}

/// Normalize a DOI for comparison: strip resolver prefixes and lower-case.
pub fn normalize_doi(doi: &str) -> String {
    doi.to_lowercase()
        .replace("https://doi.org/", "")
        .replace("http://doi.org/", "")
        .replace("https://dx.doi.org/", "")
        .replace("doi:", "")
        .trim()
        .to_string()
}

/// Case-insensitive DOI equality over the normalized forms.
pub fn dois_equal(a: &str, b: &str) -> bool {
    normalize_doi(a) == normalize_doi(b)
}

/// Pull a bare ORCID id out of text. Sources are inconsistent here: some
/// return `0000-0001-2345-6789`, others `https://orcid.org/0000-...`.
pub fn extract_orcid(text: &str) -> Option<String> {
    ORCID_REGEX
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_doi() {
        assert_eq!(normalize_doi("10.1234/TEST"), "10.1234/test");
        assert_eq!(normalize_doi("https://doi.org/10.1234/test"), "10.1234/test");
        assert_eq!(normalize_doi("doi:10.1234/test"), "10.1234/test");
    }

    #[test]
    fn test_dois_equal() {
        assert!(dois_equal("10.1/abc", "https://doi.org/10.1/ABC"));
        assert!(!dois_equal("10.1/abc", "10.1/abd"));
    }

    #[test]
    fn test_extract_orcid() {
        assert_eq!(
            extract_orcid("https://orcid.org/0000-0001-2345-678X").as_deref(),
            Some("0000-0001-2345-678X")
        );
        assert_eq!(
            extract_orcid("0000-0001-2345-6789").as_deref(),
            Some("0000-0001-2345-6789")
        );
        assert!(extract_orcid("no id here").is_none());
    }
}
