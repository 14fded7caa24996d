//! Domain models for storefront.

pub mod session;

pub use session::CurrentShopper;
pub use session::keys as session_keys;
