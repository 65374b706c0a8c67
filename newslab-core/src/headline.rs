//! Screen for market round-up headlines that are not about one issuer.

use regex::Regex;
use std::sync::LazyLock;

use crate::lexicon::GENERIC_HEADLINES;

static GENERIC: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    GENERIC_HEADLINES
        .iter()
        .map(|p| Regex::new(p).expect("headline pattern must compile"))
        .collect()
});

/// Whether `title` is a digest, calendar or market round-up.
pub fn is_generic_headline(title: &str) -> bool {
    let lower = title.to_lowercase();
    GENERIC.iter().any(|re| re.is_match(&lower))
}
