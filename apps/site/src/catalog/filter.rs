//! Filter/search engine shared by the events, speakers and sponsors pages.
//!
//! Three independent predicates combine with AND:
//! 1. category: exact string equality, "All" disables it
//! 2. free text: case-insensitive substring, OR across the record's search fields
//! 3. featured only: keeps records whose featured flag is set

use serde::{Deserialize, Serialize};

use crate::models::{Event, Speaker, Sponsor};

/// Sentinel category value that disables the category predicate.
pub const ALL_CATEGORIES: &str = "All";

/// What a record exposes to the filter engine.
pub trait Searchable {
    /// Value compared against the selected category.
    fn category(&self) -> Option<&str>;

    /// Text fields searched by the free-text query.
    fn search_fields(&self) -> Vec<&str>;

    fn is_featured(&self) -> bool;
}

impl Searchable for Event {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn search_fields(&self) -> Vec<&str> {
        [
            Some(self.title.as_str()),
            self.short_description.as_deref(),
            self.location.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn is_featured(&self) -> bool {
        self.featured
    }
}

impl Searchable for Speaker {
    fn category(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    fn search_fields(&self) -> Vec<&str> {
        [
            Some(self.name.as_str()),
            self.title.as_deref(),
            self.organization.as_deref(),
            self.short_bio.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn is_featured(&self) -> bool {
        self.featured
    }
}

impl Searchable for Sponsor {
    fn category(&self) -> Option<&str> {
        self.tier.as_deref()
    }

    fn search_fields(&self) -> Vec<&str> {
        [Some(self.name.as_str()), self.description.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }

    fn is_featured(&self) -> bool {
        self.featured
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategorySelection {
    #[default]
    All,
    Only(String),
}

impl CategorySelection {
    /// Missing, blank and "All" all mean no constraint.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => CategorySelection::All,
            Some(value) => CategorySelection::Only(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategorySelection::All => ALL_CATEGORIES,
            CategorySelection::Only(value) => value,
        }
    }
}

impl Serialize for CategorySelection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategorySelection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(CategorySelection::from_param(Some(&raw)))
    }
}

/// The user-controlled inputs of a listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub category: CategorySelection,
    pub query: String,
    pub featured_only: bool,
}

/// Offered in place of an empty listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub message: &'static str,
    pub reset_label: &'static str,
    /// Filter to apply when the reset control is used.
    pub reset_to: CatalogFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterOutcome<T> {
    pub items: Vec<T>,
    /// Size of the unfiltered list.
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<EmptyState>,
}

impl CatalogFilter {
    /// Puts every input back to its no-constraint default.
    pub fn reset(&mut self) {
        *self = CatalogFilter::default();
    }

    pub fn is_unconstrained(&self) -> bool {
        self.category == CategorySelection::All
            && self.query.trim().is_empty()
            && !self.featured_only
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        if let CategorySelection::Only(wanted) = &self.category {
            if item.category() != Some(wanted.as_str()) {
                return false;
            }
        }

        let needle = self.query.trim().to_lowercase();
        if !needle.is_empty()
            && !item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        {
            return false;
        }

        !self.featured_only || item.is_featured()
    }

    /// Visible subset of `items`, in input order.
    pub fn apply<'a, T: Searchable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }

    /// Like `apply`, plus the empty-state affordance when nothing is left.
    pub fn run<T: Searchable + Clone>(&self, items: &[T]) -> FilterOutcome<T> {
        let visible: Vec<T> = self.apply(items).into_iter().cloned().collect();
        let empty = visible.is_empty().then(|| EmptyState {
            message: "No results match your filters",
            reset_label: "Clear all filters",
            reset_to: CatalogFilter::default(),
        });
        FilterOutcome {
            items: visible,
            total: items.len(),
            empty,
        }
    }
}

/// Category options for a filter control: "All" first, then each distinct
/// category in first-seen order.
pub fn categories_of<T: Searchable>(items: &[T]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for category in items.iter().filter_map(|item| item.category()) {
        if !categories.iter().any(|c| c == category) {
            categories.push(category.to_string());
        }
    }
    categories
}
