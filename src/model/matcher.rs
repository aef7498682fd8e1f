// Logic for checking if events match the page filter controls.
//
// Three independent checks, all of which must pass:
//   category -> "all" or case-insensitive equality
//   search   -> empty or case-insensitive substring of title or description
//   date     -> empty or exact equality with the event's normalized ISO date
//
// Criteria are normalized once per filter pass (`FilterCriteria::normalized`)
// and the result is reused for every event in the list.

use crate::model::item::EventRecord;
use serde::{Deserialize, Serialize};

/// Category value meaning "no category constraint".
pub const ALL_CATEGORIES: &str = "all";

/// Raw filter control values, as typed or restored from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_term: String,
    pub category: String,
    pub iso_date: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: ALL_CATEGORIES.to_string(),
            iso_date: String::new(),
        }
    }
}

impl FilterCriteria {
    pub fn new(search_term: &str, category: &str, iso_date: &str) -> Self {
        Self {
            search_term: search_term.to_string(),
            category: category.to_string(),
            iso_date: iso_date.to_string(),
        }
    }

    /// True when at least one criterion differs from its "no constraint" value.
    /// Judged on the normalized values, so `"All"` or a blank search count as unset.
    pub fn is_active(&self) -> bool {
        let n = self.normalized();
        !n.search_term.is_empty() || n.category != ALL_CATEGORIES || !n.iso_date.is_empty()
    }

    /// Lowercases and trims the criteria for a filter pass.
    pub fn normalized(&self) -> NormalizedCriteria {
        NormalizedCriteria {
            search_term: self.search_term.trim().to_lowercase(),
            category: self.category.trim().to_lowercase(),
            iso_date: self.iso_date.trim().to_string(),
        }
    }
}

/// Criteria ready for matching. Built by `FilterCriteria::normalized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCriteria {
    search_term: String,
    category: String,
    iso_date: String,
}

impl NormalizedCriteria {
    fn matches_category(&self, event: &EventRecord) -> bool {
        self.category == ALL_CATEGORIES || event.category.to_lowercase() == self.category
    }

    fn matches_search(&self, event: &EventRecord) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        event.title.to_lowercase().contains(&self.search_term)
            || event.description.to_lowercase().contains(&self.search_term)
    }

    fn matches_date(&self, event: &EventRecord) -> bool {
        // An undated event yields "" and so never equals a non-empty filter.
        self.iso_date.is_empty() || event.iso_date() == self.iso_date
    }
}

impl EventRecord {
    /// Decides whether the event stays visible under already-normalized criteria.
    pub fn is_visible(&self, criteria: &NormalizedCriteria) -> bool {
        criteria.matches_category(self)
            && criteria.matches_search(self)
            && criteria.matches_date(self)
    }

    /// Convenience for a single check; normalizes `criteria` on every call.
    pub fn matches_criteria(&self, criteria: &FilterCriteria) -> bool {
        self.is_visible(&criteria.normalized())
    }
}

/// Computes the visibility of every event, in input order.
pub fn visibility(events: &[EventRecord], criteria: &FilterCriteria) -> Vec<bool> {
    let normalized = criteria.normalized();
    events.iter().map(|e| e.is_visible(&normalized)).collect()
}

/// Returns the visible events, preserving input order.
pub fn filter_events<'a>(
    events: &'a [EventRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a EventRecord> {
    let normalized = criteria.normalized();
    let visible: Vec<&EventRecord> = events
        .iter()
        .filter(|e| e.is_visible(&normalized))
        .collect();
    log::debug!(
        "Filter pass: {}/{} events visible (search={:?}, category={:?}, date={:?})",
        visible.len(),
        events.len(),
        criteria.search_term,
        criteria.category,
        criteria.iso_date
    );
    visible
}
