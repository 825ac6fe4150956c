//! Common test fixtures

use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal_macros::dec;

use core_kernel::Money;
use domain_catalog::{PlotCatalog, PlotRecord};

/// The small worked catalog most tests run against
///
/// Greenfield Phase 1 carries plots A1 (5 cents) and A2 (3 cents) at
/// ₹1,00,000 per cent; Phase 2 and a second project exist to exercise
/// scoping.
pub fn greenfield_masters() -> Vec<PlotRecord> {
    vec![
        PlotRecord::new("Greenfield", "Greenfield Phase 1", "A1", dec!(5), Money::new(dec!(100000))),
        PlotRecord::new("Greenfield", "Greenfield Phase 1", "A2", dec!(3), Money::new(dec!(100000))),
        PlotRecord::new("Greenfield", "Greenfield Phase 2", "B1", dec!(4), Money::new(dec!(125000))),
        PlotRecord::new("Lakeview", "Lakeview East", "L1", dec!(10), Money::new(dec!(80000))),
    ]
}

/// `greenfield_masters` wrapped in a catalog snapshot
pub fn greenfield_catalog() -> PlotCatalog {
    PlotCatalog::new(greenfield_masters())
}

/// A random buyer name
pub fn customer_name() -> String {
    Name().fake()
}
