//! Core Kernel - Foundational types for the plot-sales system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Rupee money values with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - Port abstractions for external collaborators

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::Money;
pub use identifiers::{InvoiceId, LineItemId, PlotId};
pub use ports::{DomainPort, PortError};
