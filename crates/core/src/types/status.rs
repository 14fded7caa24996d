//! Status enums for orders and payment selection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a status or payment-method string is outside the
/// known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusParseError {
    #[error("unrecognized order status: {0}")]
    OrderStatus(String),
    #[error("unrecognized payment method: {0}")]
    PaymentMethod(String),
}

/// Order status as reported by the backend.
///
/// The vocabulary is closed; anything else is rejected rather than treated
/// as "no progress". Parsing ignores case and surrounding whitespace, both
/// through [`FromStr`](std::str::FromStr) and when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum OrderStatus {
    Pending,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Paid,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StatusParseError::OrderStatus(s.to_string()))
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = StatusParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Manual bank transfer.
    Bank,
    /// `MoMo` e-wallet.
    Momo,
    /// `VNPay` redirect gateway.
    Vnpay,
}

impl PaymentMethod {
    /// Whether the storefront can submit an order for this method.
    ///
    /// Only the `VNPay` redirect flow is wired to the backend.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::Vnpay)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bank => "Bank transfer",
            Self::Momo => "MoMo",
            Self::Vnpay => "VNPay",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bank => write!(f, "bank"),
            Self::Momo => write!(f, "momo"),
            Self::Vnpay => write!(f, "vnpay"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bank" => Ok(Self::Bank),
            "momo" => Ok(Self::Momo),
            "vnpay" => Ok(Self::Vnpay),
            _ => Err(StatusParseError::PaymentMethod(s.to_string())),
        }
    }
}
