//! Cache types for backend API responses.

use std::time::Duration;

use moka::future::Cache;

use super::types::Product;

/// Maximum number of cached product details.
const MAX_CACHED_PRODUCTS: u64 = 1000;

/// Cache key for product detail lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(String),
}

/// Product detail cache. Listings are not cached since every filter
/// combination is a distinct key and stock changes often.
pub type ProductCache = Cache<CacheKey, Product>;

/// Build the product cache with the configured TTL.
pub fn product_cache(ttl: Duration) -> ProductCache {
    Cache::builder()
        .max_capacity(MAX_CACHED_PRODUCTS)
        .time_to_live(ttl)
        .build()
}
