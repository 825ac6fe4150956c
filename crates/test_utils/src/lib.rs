//! Shared test utilities for the plot-sales test suite
//!
//! Builders construct test data with sensible defaults so tests specify
//! only the fields they care about; fixtures provide the small worked
//! catalog the suite reuses.

pub mod builders;
pub mod fixtures;

pub use builders::{InvoiceBuilder, PlotRecordBuilder};
pub use fixtures::{greenfield_catalog, greenfield_masters};
