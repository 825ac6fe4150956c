//! Sales domain errors

use core_kernel::LineItemId;
use thiserror::Error;

/// Errors that can occur in the sales domain
///
/// Out-of-range numeric input is clamped rather than rejected (this is a
/// live-editing form), so the only hard rejections are a plot that is
/// already allocated elsewhere and payload validation at submit time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SalesError {
    /// The requested plot is already allocated to another invoice
    #[error("Plot {plot_number} of {property} is not available")]
    PlotUnavailable {
        property: String,
        plot_number: String,
    },

    /// No line item with this id on the draft invoice
    #[error("Line item not found: {0}")]
    LineItemNotFound(LineItemId),

    /// The payload is not ready for submission
    #[error("Validation error: {0}")]
    Validation(String),
}
