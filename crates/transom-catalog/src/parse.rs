//! Low-level string parsing for extracting horsepower ratings from listing titles.
//!
//! Dealership imports are uneven: many listings carry the rating only in the
//! title (`"Tohatsu MFS25C 25hp EFI Outboard"`) and leave the structured
//! field at zero. These helpers use manual byte scanning rather than `regex`
//! to stay dependency-light. See [`crate::normalize`] for how the parsed
//! value backfills the structured field.

/// Attempts to parse a horsepower rating from a product title.
///
/// Matching rules (case-insensitive):
/// - `"25hp"` / `"25 hp"` — integer ratings.
/// - `"9.9hp"` / `"9.9 HP"` — fractional ratings on portable models.
///
/// The first number followed by an `hp` marker wins. Model codes with
/// embedded digits (`"MFS25C"`) do not match because the digits are not
/// followed by `hp`. Zero and negative parses are discarded.
///
/// Returns `None` when no parseable rating is found.
#[must_use]
pub(crate) fn parse_horsepower(title: &str) -> Option<f64> {
    let lower = title.to_lowercase();
    extract_hp_value(&lower).filter(|hp| *hp > 0.0)
}

/// Scans `s` for the first occurrence of a number (integer or decimal)
/// optionally followed by whitespace and then `"hp"`. Returns the parsed
/// `f64` value or `None`. Input must be pre-lowercased.
fn extract_hp_value(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len {
        if bytes[i].is_ascii_digit()
            || (bytes[i] == b'.' && i + 1 < len && bytes[i + 1].is_ascii_digit())
        {
            let num_start = i;

            let mut has_dot = false;
            while i < len && (bytes[i].is_ascii_digit() || (bytes[i] == b'.' && !has_dot)) {
                if bytes[i] == b'.' {
                    has_dot = true;
                }
                i += 1;
            }
            let num_str = &s[num_start..i];

            let after_num = i;
            while i < len && bytes[i] == b' ' {
                i += 1;
            }

            if s[i..].starts_with("hp") {
                if let Ok(v) = num_str.parse::<f64>() {
                    return Some(v);
                }
            }

            i = after_num;
        } else {
            i += 1;
        }
    }
    None
}
