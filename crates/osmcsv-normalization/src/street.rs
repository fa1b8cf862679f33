//! Street designation canonicalization.
//!
//! Street values end in a designation token (вулиця, проспект, ...). The
//! extract mixes canonical designations with abbreviated and Russian-spelled
//! variants; known variants are rewritten in place via a fixed correction
//! table. Unknown trailing tokens pass through untouched and are surfaced
//! only by the audit query, which exists to grow the table deliberately
//! rather than guess at corrections.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

/// Trailing designation token: the last whitespace-free run, optionally
/// dot-terminated, anchored at end of string.
static STREET_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\S+\.?$").expect("invalid street designation regex"));

/// Designations considered correct for the extract's locale.
pub const CANONICAL_DESIGNATIONS: [&str; 13] = [
    "вулиця",
    "бульвар",
    "тупик",
    "проїзд",
    "проспект",
    "алея",
    "шосе",
    "набережна",
    "узвіз",
    "дорога",
    "провулок",
    "площа",
    "шоссе",
];

/// Known irregular designations and their canonical replacements.
static STREET_CORRECTIONS: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        ("вул.", "вулиця"),
        ("вул", "вулиця"),
        ("ул.", "вулиця"),
        ("ул", "вулиця"),
        ("пл.", "площа"),
        ("шоссе-2", "шоссе"),
        ("улица", "вулиця"),
    ])
});

/// The trailing designation token of a street value, if one is present.
pub fn trailing_designation(value: &str) -> Option<&str> {
    STREET_TYPE_RE.find(value).map(|found| found.as_str())
}

/// The trailing token when it falls outside the canonical set.
///
/// Pure query behind the audit path; never applied as a correction.
pub fn non_canonical_designation(value: &str) -> Option<&str> {
    trailing_designation(value).filter(|token| !CANONICAL_DESIGNATIONS.contains(token))
}

/// Records a street value in the designation survey when its trailing token
/// is not canonical, bucketing full values under the token they ended with.
pub fn audit_street(survey: &mut BTreeMap<String, BTreeSet<String>>, value: &str) {
    if let Some(designation) = non_canonical_designation(value) {
        survey
            .entry(designation.to_string())
            .or_default()
            .insert(value.to_string());
    }
}

/// Rewrites a known irregular trailing designation to its canonical form,
/// preserving everything before it. Values without a trailing token, or with
/// a token outside the correction table, are returned unchanged.
pub fn normalize_street(value: &str) -> String {
    normalize_street_with(value, &STREET_CORRECTIONS)
}

/// [`normalize_street`] against a caller-supplied correction table.
pub fn normalize_street_with(value: &str, corrections: &BTreeMap<&str, &str>) -> String {
    let Some(found) = STREET_TYPE_RE.find(value) else {
        return value.to_string();
    };
    match corrections.get(found.as_str()) {
        Some(canonical) => format!("{}{}", &value[..found.start()], canonical),
        None => value.to_string(),
    }
}
