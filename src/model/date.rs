// Normalizes the localized date line of an event card into `YYYY-MM-DD`.
//
// Event cards carry their date as Arabic text, e.g.
//   "التاريخ: 15 تشرين الأول 2024"
// The month is written with the Levantine month names, some of which span
// two words ("تشرين الأول", "كانون الثاني"). Those pairs are resolved by the
// second word; every other name is looked up on the first word alone.

use once_cell::sync::Lazy;
use regex::Regex;

/// Label that introduces the date on an event card.
pub const DATE_LABEL: &str = "التاريخ:";

/// Month used when the month phrase is not recognized.
pub const FALLBACK_MONTH: &str = "01";

const TISHRIN: &str = "تشرين";
const KANUN: &str = "كانون";
const FIRST: &str = "الأول";

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    // ASCII digits only: `\d` is Unicode-aware in `regex` and would accept
    // Arabic-Indic digits, which cannot be copied verbatim into an ISO date.
    Regex::new(&format!(
        r"{}\s*([0-9]{{1,2}})\s+([\p{{L}}\p{{M}}]+)(?:\s+([\p{{L}}\p{{M}}]+))?\s+([0-9]{{4}})(?:[^0-9]|$)",
        regex::escape(DATE_LABEL)
    ))
    .expect("date pattern is valid")
});

/// Month names that are a single word. Two-word names are handled in `month_number`.
const SINGLE_WORD_MONTHS: &[(&str, &str)] = &[
    ("شباط", "02"),
    ("آذار", "03"),
    ("نيسان", "04"),
    ("أيار", "05"),
    ("حزيران", "06"),
    ("تموز", "07"),
    ("آب", "08"),
    ("أيلول", "09"),
];

/// Resolves a month phrase to its two-digit number.
///
/// `first` is the first word of the phrase and `second` the optional second
/// word. Unknown phrases resolve to January.
pub fn month_number(first: &str, second: Option<&str>) -> &'static str {
    match first {
        TISHRIN => {
            if second == Some(FIRST) {
                "10"
            } else {
                "11"
            }
        }
        // "كانون الأول" is December, anything else after "كانون" is January.
        KANUN => {
            if second == Some(FIRST) {
                "12"
            } else {
                "01"
            }
        }
        _ => SINGLE_WORD_MONTHS
            .iter()
            .find(|(name, _)| *name == first)
            .map(|(_, num)| *num)
            .unwrap_or(FALLBACK_MONTH),
    }
}

/// Extracts the event date from free text and returns it as `YYYY-MM-DD`.
///
/// Returns an empty string when the text holds no `التاريخ:` date. The day is
/// zero-padded to two digits and the year is copied as written.
pub fn normalize_date_text(text: &str) -> String {
    let Some(caps) = DATE_RE.captures(text) else {
        return String::new();
    };

    let day = &caps[1];
    let first = &caps[2];
    let second = caps.get(3).map(|m| m.as_str());
    let year = &caps[4];

    format!("{}-{}-{:0>2}", year, month_number(first, second), day)
}
