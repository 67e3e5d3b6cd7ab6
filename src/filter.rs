//! Event filtering and sorting.
//!
//! [`filter_and_sort`] is a pure function: it borrows the collection, clones
//! the matching records, and orders them with a stable sort. It never fails;
//! a parameter it cannot make sense of simply imposes no constraint.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::category::CategoryCatalog;
use crate::models::{Event, EventQuery};

/// Requested ordering of the filtered events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    Featured,
    Date,
    PriceLow,
    PriceHigh,
    Popularity,
}

impl SortOption {
    /// Parse a wire value. Unknown values fall back to `Featured`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "date" => SortOption::Date,
            "price-low" => SortOption::PriceLow,
            "price-high" => SortOption::PriceHigh,
            "popularity" => SortOption::Popularity,
            _ => SortOption::Featured,
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn contains(&self, price: f64) -> bool {
        let min_ok = !self.min.is_finite() || price >= self.min;
        let max_ok = !self.max.is_finite() || price <= self.max;
        min_ok && max_ok
    }
}

/// Filter and sort parameters for one listing.
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
    pub category: Option<String>,
    pub search_term: Option<String>,
    pub price_range: Option<PriceRange>,
    pub selected_tags: HashSet<String>,
    pub sort_option: SortOption,
}

impl FilterParams {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.selected_tags.insert(tag.into());
        self
    }

    pub fn sort(mut self, sort_option: SortOption) -> Self {
        self.sort_option = sort_option;
        self
    }
}

impl From<EventQuery> for FilterParams {
    fn from(query: EventQuery) -> Self {
        let min = query.min_price.and_then(|s| s.trim().parse::<f64>().ok());
        let max = query.max_price.and_then(|s| s.trim().parse::<f64>().ok());
        let price_range = match (min, max) {
            (None, None) => None,
            (min, max) => Some(PriceRange::new(
                min.unwrap_or(f64::NEG_INFINITY),
                max.unwrap_or(f64::INFINITY),
            )),
        };

        let selected_tags = query
            .tags
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        FilterParams {
            category: query.category,
            search_term: query.search,
            price_range,
            selected_tags,
            sort_option: query.sort.as_deref().map(SortOption::parse).unwrap_or_default(),
        }
    }
}

/// Return the events matching every active filter, in the requested order.
pub fn filter_and_sort(
    events: &[Event],
    params: &FilterParams,
    catalog: &CategoryCatalog,
) -> Vec<Event> {
    let category = params.category.as_deref().and_then(|slug| catalog.resolve(slug));
    let search = params
        .search_term
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    let mut results: Vec<Event> = events
        .iter()
        .filter(|e| category.map_or(true, |c| c.matches(&e.category)))
        .filter(|e| search.as_deref().map_or(true, |term| matches_search(e, term)))
        .filter(|e| params.price_range.map_or(true, |r| r.contains(e.price)))
        .filter(|e| {
            params.selected_tags.is_empty()
                || e.tags.iter().any(|t| params.selected_tags.contains(t))
        })
        .cloned()
        .collect();

    sort_events(&mut results, params.sort_option);
    results
}

/// Distinct tags across the collection, sorted.
pub fn all_tags(events: &[Event]) -> Vec<String> {
    let mut tags: Vec<String> = events
        .iter()
        .flat_map(|e| e.tags.iter().cloned())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    tags.sort();
    tags
}

fn matches_search(event: &Event, term: &str) -> bool {
    event.title.to_lowercase().contains(term)
        || event.location.to_lowercase().contains(term)
        || event.category.to_lowercase().contains(term)
}

fn sort_events(events: &mut [Event], sort_option: SortOption) {
    match sort_option {
        SortOption::Featured => events.sort_by_key(|e| !e.featured),
        SortOption::Date => events.sort_by_cached_key(|e| DateKey(parse_event_date(&e.date))),
        SortOption::PriceLow => events.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOption::PriceHigh => events.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortOption::Popularity => events.sort_by(|a, b| b.attendees.cmp(&a.attendees)),
    }
}

/// Orders known dates ascending, unknown dates last.
#[derive(PartialEq, Eq)]
struct DateKey(Option<NaiveDate>);

impl Ord for DateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for DateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Parse the date shapes events carry: `2025-05-15`, RFC 3339,
/// `May 15, 2025`, `Aug 5, 2025`, and day ranges like `August 5-6, 2025`
/// (which resolve to their first day).
pub fn parse_event_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    let normalized = strip_day_range(s);
    ["%B %d, %Y", "%b %d, %Y", "%B %d %Y", "%b %d %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&normalized, fmt).ok())
}

/// "August 5-6, 2025" -> "August 5, 2025"
fn strip_day_range(s: &str) -> String {
    let Some((head, rest)) = s.split_once('-') else {
        return s.to_string();
    };
    let tail = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    format!("{}{}", head, tail)
}
