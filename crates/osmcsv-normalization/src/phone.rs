//! Phone number standardization.
//!
//! Raw phone values in the extract fall into four structurally distinct
//! mostly-digit formats, each tolerating arbitrary punctuation noise between
//! digits. Matchers are tried in strict precedence order and the first match
//! reconstructs the dashed canonical form. Values no pattern can parse fall
//! through to an exact-match correction table audited by hand; entries there
//! are either a corrected string or marked unrecoverable. A value that is
//! neither parseable nor listed is an error, never a silent pass-through.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use osmcsv_model::{ConvertError, Result};

/// Serialized form of an unrecoverable phone value.
pub const UNRECOVERABLE_VALUE: &str = "ERRONEOUS";

/// Outcome of phone standardization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StandardizedPhone {
    /// Reconstructed dashed form.
    Formatted(String),
    /// Listed in the correction table as beyond repair.
    Unrecoverable,
}

impl StandardizedPhone {
    /// The value written to the tag record.
    pub fn into_value(self) -> String {
        match self {
            StandardizedPhone::Formatted(value) => value,
            StandardizedPhone::Unrecoverable => UNRECOVERABLE_VALUE.to_string(),
        }
    }
}

/// 3-8-0 then nine digits, noise-separated, anywhere in the value.
static INTL_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(3)\W*(8)\W*(0)\W*(\d)\W*(\d)\W*(\d)\W*(\d)\W*(\d)\W*(\d)\W*(\d)\W*(\d)\W*(\d)\b",
    )
    .expect("invalid international prefix regex")
});

/// Leading 0 or 8, literal 800, then six digits.
static TOLL_FREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|8)\W*(800)\W*(\d)\W*(\d)\W*(\d)\W*(\d)\W*(\d)\W*(\d)\b")
        .expect("invalid toll-free regex")
});

/// Trunk prefix 0 plus area code, then seven digits.
static TRUNK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\W?(0)\W*(\d{2})\W*(\d)\W*(\d)\W*(\d)\W*(\d)\W*(\d)\W*(\d)\W*(\d)\b")
        .expect("invalid trunk prefix regex")
});

/// Bare seven-digit local number grouped 3-2-2.
static LOCAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{3})\W*(\d{2})\W*(\d{2})$").expect("invalid local number regex")
});

/// One standardization strategy: a shape to recognize and the dashed form to
/// rebuild from its captures.
struct Matcher {
    pattern: &'static LazyLock<Regex>,
    rebuild: fn(&Captures<'_>) -> String,
}

/// Strategies in precedence order; the first match wins and later shapes are
/// never consulted.
static MATCHERS: &[Matcher] = &[
    Matcher {
        pattern: &INTL_PREFIX_RE,
        rebuild: rebuild_intl_prefix,
    },
    Matcher {
        pattern: &TOLL_FREE_RE,
        rebuild: rebuild_toll_free,
    },
    Matcher {
        pattern: &TRUNK_RE,
        rebuild: rebuild_trunk,
    },
    Matcher {
        pattern: &LOCAL_RE,
        rebuild: rebuild_local,
    },
];

fn group<'c>(caps: &'c Captures<'_>, index: usize) -> &'c str {
    caps.get(index).map_or("", |m| m.as_str())
}

fn rebuild_intl_prefix(caps: &Captures<'_>) -> String {
    format!(
        "+{}{}-{}{}{}-{}{}{}-{}{}{}{}",
        group(caps, 1),
        group(caps, 2),
        group(caps, 3),
        group(caps, 4),
        group(caps, 5),
        group(caps, 6),
        group(caps, 7),
        group(caps, 8),
        group(caps, 9),
        group(caps, 10),
        group(caps, 11),
        group(caps, 12),
    )
}

fn rebuild_toll_free(caps: &Captures<'_>) -> String {
    format!(
        "{}-{}-{}{}{}-{}{}{}",
        group(caps, 1),
        group(caps, 2),
        group(caps, 3),
        group(caps, 4),
        group(caps, 5),
        group(caps, 6),
        group(caps, 7),
        group(caps, 8),
    )
}

fn rebuild_trunk(caps: &Captures<'_>) -> String {
    format!(
        "+38-{}{}-{}{}{}-{}{}{}{}",
        group(caps, 1),
        group(caps, 2),
        group(caps, 3),
        group(caps, 4),
        group(caps, 5),
        group(caps, 6),
        group(caps, 7),
        group(caps, 8),
        group(caps, 9),
    )
}

fn rebuild_local(caps: &Captures<'_>) -> String {
    format!(
        "+38-044-{}-{}-{}",
        group(caps, 1),
        group(caps, 2),
        group(caps, 3),
    )
}

/// Correction table entry: a hand-audited replacement or a marker that the
/// value cannot be repaired.
enum Correction {
    Replace(&'static str),
    Unrecoverable,
}

/// Raw values the patterns cannot parse, keyed by the exact input text.
/// Multi-number fields keep their first number; wrong country prefixes are
/// rewritten to the local one.
static PHONE_CORRECTIONS: LazyLock<BTreeMap<&'static str, Correction>> = LazyLock::new(|| {
    BTreeMap::from([
        ("(44)4247431", Correction::Replace("+38-044-424-7431")),
        ("+1 347 868 0740", Correction::Replace("+1-347-868-0740")),
        ("+3-044-257-20-97", Correction::Replace("+38-044-257-2097")),
        ("+3-8-044-446-77e-70", Correction::Replace("+38-044-446-7770")),
        (
            "+30 (44) 536-99-06; +30 (44) 536-99-08; +30 (44) 536-99-07",
            Correction::Replace("+38-044-536-9906"),
        ),
        ("+3044 401-42-94", Correction::Replace("+38-044-401-4294")),
        ("+30442556013", Correction::Replace("+38-044-255-6013")),
        ("+38 44 2784864", Correction::Replace("+38-044-278-4864")),
        ("+38 44 425 03 98", Correction::Replace("+38-044-4250-0398")),
        ("+380 (044) 235-73-82", Correction::Replace("+38-044-235-7382")),
        ("+380 (044) 275-33-00", Correction::Replace("+38-044-275-3300")),
        ("+380 (044) 360 02 09", Correction::Replace("+38-044-360 0209")),
        ("+380 (044) 486-18-08", Correction::Replace("+38-044-486-1808")),
        ("+380 (067) 912-20-66", Correction::Replace("+38 067 912-2066")),
        ("+380 44 01010", Correction::Unrecoverable),
        ("+380 9905577327", Correction::Replace("+38-099-055-77327")),
        ("+380(044) 528-30-47", Correction::Replace("+38-044-528-3047")),
        ("+380-044-4172526", Correction::Replace("+38-044-417-2526")),
        ("+3800675055958", Correction::Replace("+38-067-505-5958")),
        ("+3804118875", Correction::Unrecoverable),
        ("+38986073213", Correction::Replace("+38-098-607-3213")),
        ("+39 044 5939575", Correction::Replace("+38-044-593-9575")),
        ("+800 1800 1800", Correction::Unrecoverable),
        ("044526", Correction::Unrecoverable),
        ("08005005000", Correction::Unrecoverable),
        ("102", Correction::Unrecoverable),
        (
            "234-55-83;234-05-88;235-23-21",
            Correction::Replace("+38-044-234-5583"),
        ),
        (
            "287-32-11 066-563-57-29",
            Correction::Replace("38-044-287-3211"),
        ),
        ("2870711,2870020", Correction::Replace("+38-044-287-0711")),
        ("2876149,2876216", Correction::Replace("+38-044-287-6149")),
        ("4-60-85", Correction::Unrecoverable),
        ("5-74-41", Correction::Unrecoverable),
        (
            "67 401 21 66, 044 287 5252",
            Correction::Replace("+38-067-401-2166"),
        ),
        ("8097-331-17-93", Correction::Replace("+38-097-331-1793")),
        ("88003000500", Correction::Unrecoverable),
        (
            "Регистратура - (044) 408-03-41, Вызов врача - (044) 408-74-40, Неотложная помощь - (044) 497-60-61",
            Correction::Replace("38-044-408-0341"),
        ),
    ])
});

/// Standardizes a raw phone value to its dashed canonical form.
///
/// Patterns are tried in precedence order; on no match the exact raw value
/// is looked up in the correction table. An unlisted, unparseable value is
/// [`ConvertError::UnmappablePhone`].
pub fn standardize_phone(raw: &str) -> Result<StandardizedPhone> {
    for matcher in MATCHERS {
        if let Some(caps) = matcher.pattern.captures(raw) {
            return Ok(StandardizedPhone::Formatted((matcher.rebuild)(&caps)));
        }
    }
    match PHONE_CORRECTIONS.get(raw) {
        Some(Correction::Replace(corrected)) => {
            Ok(StandardizedPhone::Formatted((*corrected).to_string()))
        }
        Some(Correction::Unrecoverable) => Ok(StandardizedPhone::Unrecoverable),
        None => Err(ConvertError::UnmappablePhone(raw.to_string())),
    }
}
