//! Print the listing query for a filter selection.

use clap::Args;

use threadline_core::{FilterSelection, ListingQuery, PriceRange};

use super::CommandError;

/// Sidebar selection given on the command line.
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub size: Option<String>,
    #[arg(long)]
    pub style: Option<String>,
    /// Minimum star rating (1-5)
    #[arg(long)]
    pub rating: Option<u8>,
    #[arg(long)]
    pub min_price: Option<u32>,
    #[arg(long)]
    pub max_price: Option<u32>,
    #[arg(long)]
    pub in_stock: bool,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
}

impl FilterArgs {
    /// Apply the arguments to a default sidebar.
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted price range or out-of-range rating.
    pub fn to_listing_query(&self) -> Result<ListingQuery, CommandError> {
        let invalid = |e: threadline_core::FilterError| CommandError::Invalid(e.to_string());

        let mut selection = FilterSelection::new();
        if let Some(category) = &self.category {
            selection.toggle_category(category);
        }
        if let Some(color) = &self.color {
            selection.toggle_color(color);
        }
        if let Some(size) = &self.size {
            selection.toggle_size(size);
        }
        if let Some(style) = &self.style {
            selection.toggle_style(style);
        }
        if let Some(rating) = self.rating {
            selection.toggle_rating(rating).map_err(invalid)?;
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            let defaults = PriceRange::default();
            let range = PriceRange::new(
                self.min_price.unwrap_or(defaults.min()),
                self.max_price.unwrap_or(defaults.max()),
            )
            .map_err(invalid)?;
            selection.set_price_range(range);
        }
        selection.set_in_stock(self.in_stock);

        Ok(ListingQuery::new(selection, self.page, self.limit))
    }
}

/// Encode the query as it is sent to `GET /api/items`.
#[must_use]
pub fn encode(query: &ListingQuery) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.to_query())
        .finish()
}

/// Print the query string.
///
/// # Errors
///
/// Returns an error if the selection is invalid.
#[allow(clippy::print_stdout)]
pub fn run(args: &FilterArgs) -> Result<(), CommandError> {
    let query = args.to_listing_query()?;
    println!("{}", encode(&query));
    Ok(())
}
