//! Session-related types.
//!
//! Everything a visitor accumulates between requests lives in their
//! tower-sessions record under the keys below.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Session-stored shopper identity.
///
/// The backend access token is kept as a plain string so the session store
/// can serialize it; handlers take it out through [`CurrentShopper::token`].
#[derive(Clone, Serialize, Deserialize)]
pub struct CurrentShopper {
    access_token: String,
    /// Display name, if the backend returned one.
    pub name: Option<String>,
    /// Email the shopper signed in with.
    pub email: String,
}

impl CurrentShopper {
    /// Build a session identity from a fresh login.
    #[must_use]
    pub const fn new(access_token: String, name: Option<String>, email: String) -> Self {
        Self {
            access_token,
            name,
            email,
        }
    }

    /// Bearer token for backend order calls.
    #[must_use]
    pub fn token(&self) -> SecretString {
        SecretString::from(self.access_token.clone())
    }
}

impl std::fmt::Debug for CurrentShopper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentShopper")
            .field("access_token", &"[REDACTED]")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish()
    }
}

/// Session keys for visitor state.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for the signed-in shopper.
    pub const CURRENT_SHOPPER: &str = "current_shopper";

    /// Key for the product listing filter sidebar.
    pub const FILTERS: &str = "filters";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let shopper = CurrentShopper::new(
            "tok_live_123".to_string(),
            Some("Lan".to_string()),
            "lan@example.com".to_string(),
        );
        let debug = format!("{shopper:?}");
        assert!(!debug.contains("tok_live_123"));
        assert!(debug.contains("[REDACTED]"));
        assert_eq!(shopper.token().expose_secret(), "tok_live_123");
    }

    #[test]
    fn test_session_round_trip_keeps_token() {
        let shopper = CurrentShopper::new("abc".to_string(), None, "a@b.co".to_string());
        let json = serde_json::to_value(&shopper).unwrap();
        let back: CurrentShopper = serde_json::from_value(json).unwrap();
        assert_eq!(back.token().expose_secret(), "abc");
    }
}
