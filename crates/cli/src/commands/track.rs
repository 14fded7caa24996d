//! Project an order status onto the tracking steps.

use threadline_core::{OrderProgress, OrderStatus, PaymentTiming, TimelineEntry};

use super::{CommandError, print_yaml, read_yaml};

/// Compute the progress for `status`.
///
/// # Errors
///
/// Returns an error for an unknown status or an unreadable timeline file.
pub async fn run(status: &str, timeline: Option<&str>, cod: bool) -> Result<(), CommandError> {
    let status: OrderStatus = status
        .parse()
        .map_err(|e: threadline_core::StatusParseError| CommandError::Invalid(e.to_string()))?;

    let progress = if cod {
        OrderProgress::with_timing(status, PaymentTiming::CashOnDelivery)
    } else {
        let entries: Vec<TimelineEntry> = match timeline {
            Some(path) => read_yaml(path).await?,
            None => Vec::new(),
        };
        OrderProgress::project(status, &entries)
    };

    print_yaml(&progress)
}
