//! Match criteria: the immutable inputs a scan filters pages against.

use chrono::NaiveDate;

use crate::date::parse_date;

/// Criteria a page must satisfy to be extracted.
///
/// Holds the search term (trimmed and lowercased at construction) and the
/// optional inclusive date bounds. The term is matched as a plain substring
/// against lowercased page text; the bounds are applied to a date parsed
/// from the page text, when one exists.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchCriteria {
    term: String,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

impl MatchCriteria {
    /// Build criteria from a raw search term and optional inclusive bounds.
    ///
    /// The term is trimmed and lowercased here, once; an empty result is the
    /// caller's precondition failure to surface, checked via [`is_empty`].
    ///
    /// [`is_empty`]: MatchCriteria::is_empty
    pub fn new(term: &str, date_from: Option<NaiveDate>, date_to: Option<NaiveDate>) -> Self {
        Self {
            term: term.trim().to_lowercase(),
            date_from,
            date_to,
        }
    }

    /// The normalized (trimmed, lowercased) search term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Inclusive lower date bound, if any.
    pub fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    /// Inclusive upper date bound, if any.
    pub fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }

    /// `true` when the normalized term is empty.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    /// `true` when at least one date bound was supplied.
    pub fn has_date_bounds(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    /// Case-insensitive substring containment test against page text.
    pub fn matches_text(&self, text: &str) -> bool {
        !self.term.is_empty() && text.to_lowercase().contains(&self.term)
    }

    /// Date-range check for a page whose text already matched the term.
    ///
    /// `date` is the outcome of running the date parser on the page text.
    /// A parsed date strictly before the lower bound or strictly after the
    /// upper bound is rejected; an exactly-equal date passes. A page with no
    /// parsable date is accepted even when bounds were supplied: the textual
    /// match is the gate, the date range only narrows it.
    pub fn accepts_date(&self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else {
            return true;
        };
        if self.date_from.is_some_and(|from| date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| date > to) {
            return false;
        }
        true
    }

    /// Full page test: substring match, then the date filter when bounds
    /// were requested. The date parser only runs when it can matter.
    pub fn accepts_page(&self, text: &str) -> bool {
        if !self.matches_text(text) {
            return false;
        }
        if !self.has_date_bounds() {
            return true;
        }
        self.accepts_date(parse_date(text))
    }
}
