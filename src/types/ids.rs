//! Identifier normalization.
//!
//! The desktop cache stores block and collection ids as dashed UUID text,
//! while ids pasted by users (or copied from page URLs) are usually
//! undashed. Every lookup therefore compares against several spellings of
//! the same identifier.

use super::ValidationError;
use crate::constants::PAGE_URL_BASE;
use regex::Regex;

/// Byte offsets at which the canonical form carries a dash.
const DASH_OFFSETS: [usize; 4] = [8, 12, 16, 20];

/// Length of an undashed identifier.
const UNDASHED_LEN: usize = 32;

/// Removes every dash from an identifier.
pub fn strip(id: &str) -> String {
    id.replace('-', "")
}

/// Renders an identifier in the dashed 8-4-4-4-12 form.
///
/// A well-formed dashed id comes back unchanged. Inputs that are not 32
/// ASCII characters once stripped cannot be dashed meaningfully and are
/// returned stripped, which keeps `canonicalize(strip(x)) == canonicalize(x)`
/// true for every input.
pub fn canonicalize(id: &str) -> String {
    let stripped = strip(id);
    if stripped.len() != UNDASHED_LEN || !stripped.is_ascii() {
        return stripped;
    }

    let mut dashed = String::with_capacity(UNDASHED_LEN + DASH_OFFSETS.len());
    let mut start = 0;
    for offset in DASH_OFFSETS {
        dashed.push_str(&stripped[start..offset]);
        dashed.push('-');
        start = offset;
    }
    dashed.push_str(&stripped[start..]);
    dashed
}

/// Builds the public link of a page from its identifier.
pub fn page_url(id: &str) -> String {
    format!("{}{}", PAGE_URL_BASE, strip(id))
}

/// Every spelling under which an identifier may be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    pub literal: String,
    pub canonical: String,
    pub stripped: String,
}

impl LookupKey {
    pub fn new(id: &str) -> Self {
        Self {
            literal: id.to_string(),
            canonical: canonicalize(id),
            stripped: strip(id),
        }
    }
}

/// Turns raw caller input into the identifier to look up.
///
/// Plain ids pass through trimmed. Page links such as
/// `https://www.notion.so/Meeting-Notes-<32 hex>` are reduced to the
/// trailing identifier.
pub fn parse_identifier_input(input: &str, field: &'static str) -> Result<String, ValidationError> {
    let cleaned = input.trim().trim_end_matches('/');
    if cleaned.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }

    if cleaned.starts_with("http://") || cleaned.starts_with("https://") {
        return extract_from_url(cleaned);
    }

    Ok(cleaned.to_string())
}

fn extract_from_url(url: &str) -> Result<String, ValidationError> {
    lazy_static::lazy_static! {
        static ref ID_REGEX: Regex = Regex::new(
            r"(?:[/-])([a-fA-F0-9]{32}|[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12})(?:[/?#]|$)"
        ).expect("Failed to compile page ID regex - this is a bug in the code");
    }

    ID_REGEX
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id_match| id_match.as_str().to_lowercase())
        .ok_or_else(|| ValidationError::InvalidId(format!("No valid ID found in URL: {}", url)))
}
