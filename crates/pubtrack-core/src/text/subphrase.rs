//! Common subphrases between two strings
//!
//! When two citations of the same paper carry no usable titles, similarity is
//! scored by how much text they share. A phrase is a substring bounded by
//! whitespace or by the edges of the shorter string on each side; phrases
//! never split a word.

/// Punctuation stripped before phrase scoring.
pub const DEFAULT_STRIP_CHARS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Default minimum phrase length when scoring citations. Anything shorter is
/// mostly stray tokens ("of", "and") and inflates the score.
pub const DEFAULT_PHRASE_MIN_LEN: usize = 4;

/// Find every shared substring of length >= `min_len` that is a phrase of the
/// shorter string and occurs in the longer one.
///
/// Candidates are scanned longest-first, and a candidate is only accepted if
/// it does not overlap a previously accepted phrase in the shorter string's
/// index space. Accepted phrases therefore occupy disjoint ranges and can be
/// removed from both strings afterward without double-counting. A phrase that
/// recurs in a second, non-overlapping position is returned once per
/// occurrence.
pub fn common_subphrases(s1: &str, s2: &str, min_len: usize) -> Vec<String> {
    let chars1: Vec<char> = s1.chars().collect();
    let chars2: Vec<char> = s2.chars().collect();
    let (shorter, longer) = if chars1.len() <= chars2.len() {
        (chars1, s2)
    } else {
        (chars2, s1)
    };

    if min_len == 0 || shorter.len() < min_len {
        return Vec::new();
    }

    let mut accepted: Vec<(usize, usize)> = Vec::new();
    let mut phrases = Vec::new();

    for len in (min_len..=shorter.len()).rev() {
        for start in 0..=(shorter.len() - len) {
            let end = start + len;
            let left_ok = start == 0 || shorter[start - 1].is_whitespace();
            let right_ok = end == shorter.len() || shorter[end].is_whitespace();
            if !left_ok || !right_ok {
                continue;
            }
            if accepted.iter().any(|&(a, b)| start < b && a < end) {
                continue;
            }
            let candidate: String = shorter[start..end].iter().collect();
            if !longer.contains(&candidate) {
                continue;
            }
            accepted.push((start, end));
            phrases.push(candidate);
        }
    }

    phrases
}

/// Score how much of each string is made of text common to both.
///
/// Strips `strip_chars`, lower-cases, extracts common subphrases, removes
/// them from each side, and returns
/// `len(common) / (len(common) + len(remainder)) * 100` for each side. Two
/// scores come back because the citations may differ greatly in length; the
/// caller declares a match when either side clears its threshold. Returns
/// `None` when either input is absent or empty after stripping.
pub fn common_phrase_percent(
    s1: Option<&str>,
    s2: Option<&str>,
    strip_chars: &str,
    min_len: usize,
) -> Option<(f64, f64)> {
    let (Some(s1), Some(s2)) = (s1, s2) else {
        return None;
    };

    let strip = |s: &str| -> String {
        s.chars()
            .filter(|c| !strip_chars.contains(*c))
            .collect::<String>()
            .to_lowercase()
    };

    let stripped1 = strip(s1);
    let stripped2 = strip(s2);
    if stripped1.trim().is_empty() || stripped2.trim().is_empty() {
        return None;
    }

    let phrases = common_subphrases(&stripped1, &stripped2, min_len);
    let common_len: usize = phrases.iter().map(|p| p.chars().count()).sum();

    let percent_of = |stripped: &str| -> f64 {
        let mut remainder = stripped.to_string();
        for phrase in &phrases {
            remainder = remainder.replacen(phrase.as_str(), "", 1);
        }
        let remainder_len = remainder.chars().count();
        if common_len + remainder_len == 0 {
            return 0.0;
        }
        common_len as f64 / (common_len + remainder_len) as f64 * 100.0
    };

    Some((percent_of(&stripped1), percent_of(&stripped2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_string_is_the_longest_phrase() {
        let phrases = common_subphrases("alpha beta gamma", "alpha beta gamma", 2);
        assert_eq!(phrases, vec!["alpha beta gamma".to_string()]);
    }

    #[test]
    fn test_never_splits_a_word() {
        // "abcd" is shared but sits inside "abcdxyz" without a boundary, so
        // no phrase may be carved out of it.
        let phrases = common_subphrases("abcdxyz", "abcd something", 4);
        assert!(phrases.is_empty());
    }

    #[test]
    fn test_longest_first_suppresses_covered_subphrases() {
        let phrases = common_subphrases(
            "deep learning for proteins",
            "advances in deep learning for proteins and more",
            4,
        );
        assert_eq!(phrases, vec!["deep learning for proteins".to_string()]);
    }

    #[test]
    fn test_disjoint_phrases_both_found() {
        let phrases = common_subphrases(
            "gut microbiome XYZQ metabolite profiling",
            "metabolite profiling of the gut microbiome",
            5,
        );
        assert!(phrases.contains(&"gut microbiome".to_string()));
        assert!(phrases.contains(&"metabolite profiling".to_string()));
        assert_eq!(phrases.len(), 2);
    }

    #[test]
    fn test_min_len_filters_short_phrases() {
        let phrases = common_subphrases("of a cat", "pictures of a dog", 4);
        assert!(phrases.is_empty());
    }

    #[test]
    fn test_identical_strings_score_100() {
        let scores = common_phrase_percent(
            Some("Smith J. Landmark study of things. J Things. 2020."),
            Some("Smith J. Landmark study of things. J Things. 2020."),
            DEFAULT_STRIP_CHARS,
            DEFAULT_PHRASE_MIN_LEN,
        )
        .unwrap();
        assert_eq!(scores, (100.0, 100.0));
    }

    #[test]
    fn test_empty_after_stripping_is_none() {
        assert!(common_phrase_percent(Some("..."), Some("a real string"), DEFAULT_STRIP_CHARS, 4)
            .is_none());
        assert!(common_phrase_percent(None, Some("a real string"), DEFAULT_STRIP_CHARS, 4).is_none());
    }

    #[test]
    fn test_asymmetric_lengths_give_two_scores() {
        let (short_pct, long_pct) = common_phrase_percent(
            Some("Landmark study of things"),
            Some("Smith J. Landmark study of things. J Things. 2020;12(3):45-67."),
            DEFAULT_STRIP_CHARS,
            DEFAULT_PHRASE_MIN_LEN,
        )
        .unwrap();
        assert!(short_pct > 95.0, "short side should be nearly all common");
        assert!(long_pct < short_pct);
    }
}
