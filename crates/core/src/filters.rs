//! Product listing filters.
//!
//! The sidebar offers independent widgets (category, price slider, rating,
//! color, size, style, in-stock). [`FilterSelection`] holds their state and
//! [`FilterSelection::to_query`] collapses it into the canonical parameter
//! list for the backend listing endpoint. Single-select widgets toggle:
//! choosing the active value again clears it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lower bound of the price slider.
pub const DEFAULT_MIN_PRICE: u32 = 0;

/// Upper bound of the price slider.
pub const DEFAULT_MAX_PRICE: u32 = 500;

/// Products per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// Largest page size the storefront will request.
pub const MAX_PAGE_SIZE: u32 = 60;

/// Invalid filter input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("price range minimum {min} exceeds maximum {max}")]
    InvertedPriceRange { min: u32, max: u32 },
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
}

/// Price slider bounds in whole currency units. Always `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceRange")]
pub struct PriceRange {
    min: u32,
    max: u32,
}

#[derive(Deserialize)]
struct RawPriceRange {
    min: u32,
    max: u32,
}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = FilterError;

    fn try_from(raw: RawPriceRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl PriceRange {
    /// # Errors
    ///
    /// Returns [`FilterError::InvertedPriceRange`] when `min > max`.
    pub const fn new(min: u32, max: u32) -> Result<Self, FilterError> {
        if min > max {
            return Err(FilterError::InvertedPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_PRICE,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

/// A single sidebar interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "value", rename_all = "camelCase")]
pub enum FilterChange {
    Category(String),
    Rating(u8),
    Color(String),
    Size(String),
    Style(String),
    Price(PriceRange),
    InStock(bool),
    Reset,
}

/// Current state of the product sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    pub category: Option<String>,
    pub price: PriceRange,
    /// Minimum star rating.
    pub rating: Option<u8>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub style: Option<String>,
    pub in_stock: bool,
    /// Page-level style the sidebar was last seeded from.
    #[serde(default)]
    style_context: Option<String>,
}

impl FilterSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_category(&mut self, value: &str) {
        toggle(&mut self.category, value);
    }

    /// # Errors
    ///
    /// Returns [`FilterError::RatingOutOfRange`] outside `1..=5`.
    pub fn toggle_rating(&mut self, value: u8) -> Result<(), FilterError> {
        if !(1..=5).contains(&value) {
            return Err(FilterError::RatingOutOfRange(value));
        }
        self.rating = if self.rating == Some(value) {
            None
        } else {
            Some(value)
        };
        Ok(())
    }

    pub fn toggle_color(&mut self, value: &str) {
        toggle(&mut self.color, value);
    }

    pub fn toggle_size(&mut self, value: &str) {
        toggle(&mut self.size, value);
    }

    pub fn toggle_style(&mut self, value: &str) {
        toggle(&mut self.style, value);
    }

    pub const fn set_price_range(&mut self, range: PriceRange) {
        self.price = range;
    }

    pub const fn set_in_stock(&mut self, in_stock: bool) {
        self.in_stock = in_stock;
    }

    /// Seed the style selection from the page the shopper arrived from.
    ///
    /// Only a change of context seeds; repeating the same context leaves a
    /// style the shopper picked since then alone.
    pub fn apply_style_context(&mut self, context: Option<&str>) {
        let context = context.map(str::trim).filter(|c| !c.is_empty());
        if context == self.style_context.as_deref() {
            return;
        }
        self.style_context = context.map(str::to_string);
        if let Some(style) = context {
            self.style = Some(style.to_string());
        }
    }

    /// Return every widget to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply one sidebar interaction.
    ///
    /// # Errors
    ///
    /// Propagates rating validation errors; the selection is left unchanged.
    pub fn apply(&mut self, change: &FilterChange) -> Result<(), FilterError> {
        match change {
            FilterChange::Category(v) => self.toggle_category(v),
            FilterChange::Rating(v) => self.toggle_rating(*v)?,
            FilterChange::Color(v) => self.toggle_color(v),
            FilterChange::Size(v) => self.toggle_size(v),
            FilterChange::Style(v) => self.toggle_style(v),
            FilterChange::Price(range) => self.set_price_range(*range),
            FilterChange::InStock(v) => self.set_in_stock(*v),
            FilterChange::Reset => self.reset(),
        }
        Ok(())
    }

    /// Canonical query parameters.
    ///
    /// Price bounds are always present; every other dimension appears only
    /// when it differs from its default.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(8);
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        params.push(("minPrice", self.price.min.to_string()));
        params.push(("maxPrice", self.price.max.to_string()));
        if let Some(rating) = self.rating {
            params.push(("rating", rating.to_string()));
        }
        if let Some(color) = &self.color {
            params.push(("color", color.clone()));
        }
        if let Some(size) = &self.size {
            params.push(("size", size.clone()));
        }
        if let Some(style) = &self.style {
            params.push(("style", style.clone()));
        }
        if self.in_stock {
            params.push(("inStock", "true".to_string()));
        }
        params
    }
}

fn toggle(slot: &mut Option<String>, value: &str) {
    let value = value.trim();
    if value.is_empty() || slot.as_deref() == Some(value) {
        *slot = None;
    } else {
        *slot = Some(value.to_string());
    }
}

/// A listing request: sidebar selection plus pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub filters: FilterSelection,
    pub page: u32,
    pub limit: u32,
}

impl ListingQuery {
    /// Build a listing query, clamping page to at least 1 and limit to
    /// `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn new(filters: FilterSelection, page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            filters,
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Filter parameters followed by `page` and `limit`.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = self.filters.to_query();
        params.push(("page", self.page.to_string()));
        params.push(("limit", self.limit.to_string()));
        params
    }
}
