//! Catalog Domain - Plot Master Data
//!
//! This crate owns the read-only view over the plot master data: every
//! sellable unit of land, identified by project, property (a phase or
//! sub-division of a project) and plot number, with its area in cents and
//! price per cent.
//!
//! Master rows are created and edited by a separate master-data screen and
//! reach the engine through the [`PlotMasterStore`] port as an immutable
//! snapshot. The catalog holds no internal cache and never mutates its
//! input, so it has no staleness-invalidation problem of its own.

pub mod plot;
pub mod catalog;
pub mod ports;

pub use plot::PlotRecord;
pub use catalog::PlotCatalog;
pub use ports::PlotMasterStore;
