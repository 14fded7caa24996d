//! Order progress projection.
//!
//! Maps an order's status onto the four steps shown to the shopper: order
//! made, paid, shipped, completed. Two fixed sequences exist and the one in
//! force is chosen once per order from its timeline:
//!
//! ```text
//! prepaid:          PENDING -> PAID -> PROCESSING -> SHIPPED -> DELIVERED
//! cash on delivery: PENDING -> PROCESSING -> SHIPPED -> DELIVERED -> PAID
//! ```
//!
//! A step is reached when the order's index in its sequence is at or past
//! the step's threshold. `CANCELLED` sits in neither sequence and reaches no
//! step. This module only reads status; writes happen in the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::OrderStatus;

/// Marker that identifies a cash-on-delivery order in its timeline.
pub const COD_MARKER: &str = "cash on delivery";

const PREPAID_SEQUENCE: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Paid,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

const COD_SEQUENCE: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
    OrderStatus::Paid,
];

/// One event in an order's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// When payment is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTiming {
    Prepaid,
    CashOnDelivery,
}

impl PaymentTiming {
    /// Cash on delivery if any timeline description carries the marker.
    #[must_use]
    pub fn from_timeline(timeline: &[TimelineEntry]) -> Self {
        let is_cod = timeline
            .iter()
            .any(|entry| entry.description.to_ascii_lowercase().contains(COD_MARKER));
        if is_cod {
            Self::CashOnDelivery
        } else {
            Self::Prepaid
        }
    }

    /// The status sequence for this timing.
    #[must_use]
    pub const fn sequence(&self) -> &'static [OrderStatus; 5] {
        match self {
            Self::Prepaid => &PREPAID_SEQUENCE,
            Self::CashOnDelivery => &COD_SEQUENCE,
        }
    }

    /// Position of `status` in this sequence, `None` if absent.
    #[must_use]
    pub fn index_of(&self, status: OrderStatus) -> Option<usize> {
        self.sequence().iter().position(|s| *s == status)
    }

    /// Minimum index at which `step` counts as reached.
    #[must_use]
    pub const fn threshold(&self, step: StepKind) -> usize {
        match (self, step) {
            (_, StepKind::OrderMade) => 0,
            (Self::Prepaid, StepKind::OrderPaid) => 1,
            (Self::Prepaid, StepKind::Shipped) => 3,
            (Self::Prepaid, StepKind::Completed) => 4,
            (Self::CashOnDelivery, StepKind::Shipped) => 2,
            (Self::CashOnDelivery, StepKind::Completed) => 3,
            (Self::CashOnDelivery, StepKind::OrderPaid) => 4,
        }
    }

    /// Steps in the order they are displayed for this timing.
    #[must_use]
    pub const fn display_order(&self) -> [StepKind; 4] {
        match self {
            Self::Prepaid => [
                StepKind::OrderMade,
                StepKind::OrderPaid,
                StepKind::Shipped,
                StepKind::Completed,
            ],
            Self::CashOnDelivery => [
                StepKind::OrderMade,
                StepKind::Shipped,
                StepKind::Completed,
                StepKind::OrderPaid,
            ],
        }
    }
}

/// A shopper-facing progress step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    OrderMade,
    OrderPaid,
    Shipped,
    Completed,
}

impl StepKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OrderMade => "Order placed",
            Self::OrderPaid => "Payment confirmed",
            Self::Shipped => "Shipped",
            Self::Completed => "Completed",
        }
    }
}

/// One step with its reached flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressStep {
    pub kind: StepKind,
    pub label: &'static str,
    pub reached: bool,
}

/// Projected progress for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)] // one flag per displayed step
pub struct OrderProgress {
    pub status: OrderStatus,
    pub timing: PaymentTiming,
    /// Index in the applicable sequence; `None` for cancelled orders.
    pub index: Option<usize>,
    pub order_made: bool,
    pub order_paid: bool,
    pub shipped: bool,
    pub completed: bool,
    /// Steps in display order for this timing.
    pub steps: Vec<ProgressStep>,
}

impl OrderProgress {
    /// Project `status` using the timing derived from `timeline`.
    #[must_use]
    pub fn project(status: OrderStatus, timeline: &[TimelineEntry]) -> Self {
        Self::with_timing(status, PaymentTiming::from_timeline(timeline))
    }

    /// Project `status` for an explicit timing.
    #[must_use]
    pub fn with_timing(status: OrderStatus, timing: PaymentTiming) -> Self {
        let index = timing.index_of(status);
        let reached = |step: StepKind| index.is_some_and(|i| i >= timing.threshold(step));

        let steps = timing
            .display_order()
            .into_iter()
            .map(|kind| ProgressStep {
                kind,
                label: kind.label(),
                reached: reached(kind),
            })
            .collect();

        Self {
            status,
            timing,
            index,
            order_made: reached(StepKind::OrderMade),
            order_paid: reached(StepKind::OrderPaid),
            shipped: reached(StepKind::Shipped),
            completed: reached(StepKind::Completed),
            steps,
        }
    }
}
