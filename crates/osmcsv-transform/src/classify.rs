//! Tag classification.
//!
//! A raw tag either carries problem characters (dropped before it can reach
//! output), a namespaced `prefix:local` key (split, with sensitive keys
//! routed through a normalizer), or a plain key. Classification is pure
//! given its inputs and the static correction tables.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use osmcsv_model::{Result, TagRow};
use osmcsv_normalization::{normalize_street, standardize_phone};

/// Type marker for tags without a namespace prefix.
pub const DEFAULT_TAG_TYPE: &str = "regular";

/// Key whose values are street names.
pub const STREET_KEY: &str = "addr:street";

/// Namespaced key whose values are phone numbers.
pub const CONTACT_PHONE_KEY: &str = "contact:phone";

/// Bare key whose values are phone numbers.
pub const PHONE_KEY: &str = "phone";

/// Characters that disqualify a key from output entirely.
static PROBLEM_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[=+/&<>;'"?%#$@,. \t\r\n]"#).expect("invalid problem chars regex"));

/// `namespace:local-key` shape; the local key keeps any further colons.
static NAMESPACED_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+):(\w+:?.*)").expect("invalid namespaced key regex"));

/// Classifies one raw tag into a [`TagRow`], or `None` when the key is
/// disqualified. Street and phone values are normalized on the way through;
/// an unmappable phone value propagates as an error rather than reaching
/// output raw.
pub fn classify(element_id: &str, key: &str, value: &str) -> Result<Option<TagRow>> {
    if PROBLEM_CHARS_RE.is_match(key) {
        debug!(key, "dropping tag key with problem characters");
        return Ok(None);
    }

    if let Some(caps) = NAMESPACED_KEY_RE.captures(key) {
        let namespace = caps.get(1).map_or("", |m| m.as_str());
        let local_key = caps.get(2).map_or("", |m| m.as_str());
        let value = if key == STREET_KEY {
            normalize_street(value)
        } else if key == CONTACT_PHONE_KEY {
            standardize_phone(value)?.into_value()
        } else {
            value.to_string()
        };
        return Ok(Some(TagRow {
            id: element_id.to_string(),
            key: local_key.to_string(),
            value,
            kind: namespace.to_string(),
        }));
    }

    let value = if key == PHONE_KEY {
        standardize_phone(value)?.into_value()
    } else {
        value.to_string()
    };
    Ok(Some(TagRow {
        id: element_id.to_string(),
        key: key.to_string(),
        value,
        kind: DEFAULT_TAG_TYPE.to_string(),
    }))
}
