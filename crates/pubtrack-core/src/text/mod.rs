//! Text comparison primitives

pub mod fuzzy;
pub mod subphrase;

pub use fuzzy::{fuzzy_eq, ratio, strings_fuzzy_match, DEFAULT_MATCH_RATIO};
pub use subphrase::{
    common_phrase_percent, common_subphrases, DEFAULT_PHRASE_MIN_LEN, DEFAULT_STRIP_CHARS,
};
