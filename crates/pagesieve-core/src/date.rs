//! Textual date extraction: find the first recognizable calendar date in a
//! block of page text.
//!
//! Invoices encode dates in a handful of notations ("01-JAN-2026",
//! "Jan 01 2026", "01 January 2026", "01/01/2026", "2026-01-01"). The parser
//! tries a fixed list of patterns in priority order and returns the date from
//! the first pattern whose first in-text occurrence survives calendar
//! validation. Absence of a date is a normal outcome, never an error.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Month-name alternation shared by the name-bearing patterns. `sept` is an
/// accepted alternate abbreviation for September; the trailing `[a-z]*` in
/// the patterns swallows the rest of a full month name.
const MONTH_ABBREV: &str = "jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec";

const MONTH_FULL: &str = "january|february|march|april|may|june|july|august|september|october|november|december";

/// Date patterns in priority order. The first pattern whose first match in
/// the text yields a valid calendar date wins; later occurrences of the same
/// pattern are never consulted.
static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // 01-JAN-2026, 01 Jan 2026
        format!(r"(?i)(\d{{1,2}})[-\s]({MONTH_ABBREV})[a-z]*[-\s](\d{{4}})"),
        // JAN-01-2026, Jan 01 2026
        format!(r"(?i)({MONTH_ABBREV})[a-z]*[-\s](\d{{1,2}})[-\s](\d{{4}})"),
        // 01 January 2026, 01 Jan 2026
        format!(r"(?i)(\d{{1,2}})\s+({MONTH_FULL}|{MONTH_ABBREV})[a-z]*\s+(\d{{4}})"),
        // DD/MM/YYYY or DD-MM-YYYY
        r"(\d{1,2})[/-](\d{1,2})[/-](\d{4})".to_string(),
        // YYYY/MM/DD or YYYY-MM-DD
        r"(\d{4})[/-](\d{1,2})[/-](\d{1,2})".to_string(),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("date pattern must compile"))
    .collect()
});

/// Map a month-name token (abbreviation or full name, any case) to its
/// 1-based month number. Returns `None` for anything else.
pub fn month_number(token: &str) -> Option<u32> {
    let month = match token.to_ascii_lowercase().as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

/// Extract the first recognizable date from `text`.
///
/// Tries each supported notation in priority order against the raw text
/// (case-folding is handled inside the patterns, the text is not otherwise
/// normalized). A match with an out-of-range day or month is rejected and
/// parsing falls through to the next pattern. Returns `None` when no pattern
/// produces a valid date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    for pattern in PATTERNS.iter() {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };
        let g1 = caps.get(1).map_or("", |m| m.as_str());
        let g2 = caps.get(2).map_or("", |m| m.as_str());
        let g3 = caps.get(3).map_or("", |m| m.as_str());

        let date = if let Some(month) = month_number(g1) {
            // JAN-01-2026: month name first
            build_date(g3, month, g2)
        } else if let Some(month) = month_number(g2) {
            // 01-JAN-2026: day first, month name second
            build_date(g3, month, g1)
        } else if g1.len() == 4 {
            // YYYY-MM-DD
            g2.parse().ok().and_then(|m| build_date(g1, m, g3))
        } else {
            // DD/MM/YYYY
            g2.parse().ok().and_then(|m| build_date(g3, m, g1))
        };

        if date.is_some() {
            return date;
        }
        // Invalid day/month: fall through to the next pattern.
    }
    None
}

fn build_date(year: &str, month: u32, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // --- month_number ---

    #[test]
    fn month_number_abbreviations() {
        assert_eq!(month_number("jan"), Some(1));
        assert_eq!(month_number("sep"), Some(9));
        assert_eq!(month_number("sept"), Some(9));
        assert_eq!(month_number("dec"), Some(12));
    }

    #[test]
    fn month_number_full_names_any_case() {
        assert_eq!(month_number("January"), Some(1));
        assert_eq!(month_number("SEPTEMBER"), Some(9));
        assert_eq!(month_number("december"), Some(12));
    }

    #[test]
    fn month_number_rejects_non_months() {
        assert_eq!(month_number("janx"), None);
        assert_eq!(month_number("2026"), None);
        assert_eq!(month_number(""), None);
    }

    // --- notation equivalence ---

    #[test]
    fn all_notations_parse_to_the_same_date() {
        let expected = date(2026, 1, 1);
        for text in [
            "01-Jan-2026",
            "01-JAN-2026",
            "Jan-01-2026",
            "JAN 01 2026",
            "01 January 2026",
            "01/01/2026",
            "01-01-2026",
            "2026-01-01",
            "2026/01/01",
        ] {
            assert_eq!(parse_date(text), Some(expected), "notation: {text}");
        }
    }

    #[test]
    fn date_embedded_in_surrounding_text() {
        let text = "Invoice No. 1093\nDue date: 15-Mar-2024\nAmount: 120.00";
        assert_eq!(parse_date(text), Some(date(2024, 3, 15)));
    }

    #[test]
    fn full_month_name_in_hyphenated_form() {
        // The abbreviation pattern's [a-z]* swallows the full name's tail.
        assert_eq!(parse_date("03-September-2025"), Some(date(2025, 9, 3)));
    }

    #[test]
    fn sept_alternate_abbreviation() {
        assert_eq!(parse_date("12 Sept 2024"), Some(date(2024, 9, 12)));
    }

    #[test]
    fn single_digit_day_and_month() {
        assert_eq!(parse_date("5/7/2024"), Some(date(2024, 7, 5)));
    }

    // --- priority and first-match-wins ---

    #[test]
    fn first_pattern_takes_priority_over_later_ones() {
        // Both a month-name date and a numeric date are present; the
        // day-monthname pattern is tried first.
        let text = "billed 02-Feb-2024 and settled 31/12/2023";
        assert_eq!(parse_date(text), Some(date(2024, 2, 2)));
    }

    #[test]
    fn only_first_occurrence_of_a_pattern_is_used() {
        // The first numeric occurrence is invalid (month 13) and the pattern
        // does not retry later occurrences; the year-first pattern then
        // matches elsewhere in the text.
        let text = "ref 05/13/2024 issued 2024-06-09";
        assert_eq!(parse_date(text), Some(date(2024, 6, 9)));
    }

    // --- rejection ---

    #[test]
    fn no_date_like_substring() {
        assert_eq!(parse_date("Invoice for ACME Corp, net 30 terms"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn out_of_range_day_is_rejected() {
        assert_eq!(parse_date("32/01/2026"), None);
    }

    #[test]
    fn day_zero_is_rejected() {
        assert_eq!(parse_date("00-Jan-2026"), None);
    }

    #[test]
    fn out_of_range_month_is_rejected() {
        assert_eq!(parse_date("10/13/2026"), None);
    }

    #[test]
    fn non_leap_february_29_is_rejected() {
        assert_eq!(parse_date("29/02/2023"), None);
        assert_eq!(parse_date("29/02/2024"), Some(date(2024, 2, 29)));
    }

    #[test]
    fn invalid_match_falls_through_to_next_pattern() {
        // Day 45 matches the day-monthname pattern textually but fails
        // calendar validation; the year-first pattern then finds a date.
        let text = "45-Jan-2026 paid on 2026-02-03";
        assert_eq!(parse_date(text), Some(date(2026, 2, 3)));
    }

    #[test]
    fn two_digit_year_is_not_a_date() {
        assert_eq!(parse_date("01/02/26"), None);
    }
}
