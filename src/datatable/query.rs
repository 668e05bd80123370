//! # Query View
//!
//! Read-only projection of the record collection: filter by search text, sort by
//! one column, then cut a page. Nothing here mutates the store, so the view can be
//! recomputed as often as the presentation layer likes.
//!
//! ## Search
//!
//! A record matches when the lowercased text of its name, its `YYYY-MM-DD` date or
//! its decimal value contains the lowercased search text. An empty search matches
//! everything.
//!
//! ## Sort
//!
//! Sorting is stable, so records with equal keys keep their insertion order.
//!
//! | Column | Order |
//! |--------|-------|
//! | `name` | [`locale_cmp`]: CLDR collation (`ru`), lowercase first on case ties |
//! | `date` | chronological |
//! | `value` | numeric |
//!
//! Header clicks cycle a column through ascending, descending and unsorted. See
//! [`SortSpec::toggle`].

use crate::model::{Field, Record};
use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use icu_locale_core::locale;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{trace, warn};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascend" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descend" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub field: Field,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: Field, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: Field) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: Field) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    /// Next sort state after clicking the `field` column header.
    ///
    /// The clicked column goes unsorted -> ascending -> descending -> unsorted.
    /// Clicking a column other than the sorted one starts it at ascending.
    pub fn toggle(current: Option<SortSpec>, field: Field) -> Option<SortSpec> {
        match current {
            Some(spec) if spec.field == field => match spec.direction {
                SortDirection::Ascending => Some(Self::descending(field)),
                SortDirection::Descending => None,
            },
            _ => Some(Self::ascending(field)),
        }
    }

    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ord = compare_by(self.field, a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction.arrow())
    }
}

fn compare_by(field: Field, a: &Record, b: &Record) -> Ordering {
    match field {
        Field::Name => locale_cmp(&a.name, &b.name),
        Field::Date => a.date.cmp(&b.date),
        Field::Value => a.value.total_cmp(&b.value),
    }
}

/// Names are collated with the CLDR Russian tailoring: Cyrillic sorts before
/// Latin, accented letters sort next to their base letter, `ё` sorts with `е`,
/// and strings that differ only in case put lowercase first.
fn collator() -> Option<&'static CollatorBorrowed<'static>> {
    static COLLATOR: OnceLock<Option<CollatorBorrowed<'static>>> = OnceLock::new();
    COLLATOR
        .get_or_init(|| {
            Collator::try_new(locale!("ru").into(), CollatorOptions::default())
                .map_err(|e| warn!(error = %e, "collation data unavailable"))
                .ok()
        })
        .as_ref()
}

/// Locale-aware string order, made total by falling back to code points
/// when the collator sees two strings as equal.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    match collator() {
        Some(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
        None => a.cmp(b),
    }
}

/// Case-insensitive substring match over the name, date and value texts.
pub fn matches_search(record: &Record, search: &str) -> bool {
    let needle = search.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .search_texts()
        .iter()
        .any(|text| text.to_lowercase().contains(&needle))
}

/// Filters then stably sorts `records`. `records` is left untouched.
pub fn view(records: &[Record], search: &str, sort: Option<SortSpec>) -> Vec<Record> {
    let mut rows: Vec<Record> = records
        .iter()
        .filter(|r| matches_search(r, search))
        .cloned()
        .collect();
    if let Some(spec) = sort {
        rows.sort_by(|a, b| spec.compare(a, b));
    }
    trace!(
        total = records.len(),
        shown = rows.len(),
        search,
        "view derived"
    );
    rows
}

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Page {
    pub fn new(number: usize, size: usize) -> Self {
        Self { number, size }
    }

    pub fn first(size: usize) -> Self {
        Self::new(1, size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One page of a view, with enough context to render a pager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub records: Vec<Record>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Cuts `rows` into the requested page. Out-of-range page numbers are clamped,
/// and an empty view still has one (empty) page.
pub fn paginate(rows: Vec<Record>, page: Page) -> PageView {
    let size = page.size.max(1);
    let total_items = rows.len();
    let total_pages = total_items.div_ceil(size).max(1);
    let number = page.number.clamp(1, total_pages);
    let records = rows
        .into_iter()
        .skip((number - 1) * size)
        .take(size)
        .collect();
    PageView {
        records,
        page: number,
        total_pages,
        total_items,
    }
}
