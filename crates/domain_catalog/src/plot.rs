//! Plot master records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, PlotId};

/// One sellable unit of land in the master data
///
/// A plot belongs to a property (a phase of a project) and carries its area
/// in cents and the asking price per cent. Records are immutable from the
/// engine's perspective; the master-data screen owns their lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotRecord {
    /// Unique identifier
    pub id: PlotId,
    /// Project name (e.g. "Ananta Giri")
    pub project: String,
    /// Property/phase name within the project (e.g. "Ananta Giri Farm Lands")
    pub property: String,
    /// Plot number, unique within a property
    pub plot_number: String,
    /// Area in cents
    pub area: Decimal,
    /// Asking price per cent
    pub price_per_cent: Money,
    /// Inactive rows are hidden from the catalog view
    pub is_active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl PlotRecord {
    /// Creates a new plot record
    pub fn new(
        project: impl Into<String>,
        property: impl Into<String>,
        plot_number: impl Into<String>,
        area: Decimal,
        price_per_cent: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PlotId::new_v7(),
            project: project.into(),
            property: property.into(),
            plot_number: plot_number.into(),
            area,
            price_per_cent,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the identifier
    pub fn with_id(mut self, id: PlotId) -> Self {
        self.id = id;
        self
    }

    /// Marks the record inactive
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Asking value of the whole plot: `area × price_per_cent`
    pub fn total_value(&self) -> Money {
        self.price_per_cent * self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_value() {
        let plot = PlotRecord::new(
            "Greenfield",
            "Greenfield Phase 1",
            "A1",
            dec!(5),
            Money::new(dec!(100000)),
        );
        assert_eq!(plot.total_value(), Money::new(dec!(500000)));
    }

    #[test]
    fn test_new_records_are_active() {
        let plot = PlotRecord::new("P", "P1", "A1", dec!(1), Money::zero());
        assert!(plot.is_active);
        assert!(!plot.inactive().is_active);
    }
}
