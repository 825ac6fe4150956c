//! Invoice line items and their cascading calculator
//!
//! The derived fields form a strict one-directional chain:
//! `area, price_per_cent → total_amount → (with discount) → final_amount`.
//! Every setter that touches an upstream field recomputes everything
//! downstream inside the same call, so the item is never observable in an
//! inconsistent intermediate state. This is a recompute-on-write chain, not
//! an observer graph.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{LineItemId, Money};
use domain_catalog::PlotCatalog;

use crate::availability::AvailabilityResolver;
use crate::error::SalesError;

/// One row of an invoice: the sale of one plot
///
/// `property` and `plot_number` are empty until selected. Area and price are
/// prefilled from the catalog but remain editable; the seller may negotiate
/// either figure by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Locally unique within the invoice
    pub id: LineItemId,
    /// Selected property (phase), or empty
    pub property: String,
    /// Selected plot number within the property, or empty
    pub plot_number: String,
    /// Area in cents
    pub area: Decimal,
    /// Price per cent
    pub price_per_cent: Money,
    /// Derived: `area × price_per_cent`
    pub total_amount: Money,
    /// Discount, clamped to `[0, total_amount]`
    pub discount: Money,
    /// Derived: `total_amount − discount`
    pub final_amount: Money,
}

impl LineItem {
    /// Creates a blank row
    pub fn new() -> Self {
        Self {
            id: LineItemId::new(),
            property: String::new(),
            plot_number: String::new(),
            area: Decimal::ZERO,
            price_per_cent: Money::zero(),
            total_amount: Money::zero(),
            discount: Money::zero(),
            final_amount: Money::zero(),
        }
    }

    /// True once a plot has been selected
    pub fn has_plot(&self) -> bool {
        !self.plot_number.is_empty()
    }

    /// Selects a property, invalidating any previously chosen plot
    ///
    /// Plot numbers are scoped to a property, so the plot selection and area
    /// reset to empty/zero and the price prefills from the catalog's default
    /// for the new property. Totals drop to zero until a plot is chosen.
    pub fn set_property(&mut self, property: impl Into<String>, catalog: &PlotCatalog) {
        self.property = property.into();
        self.plot_number.clear();
        self.area = Decimal::ZERO;
        self.price_per_cent = catalog.default_price(&self.property);
        self.recalculate();
    }

    /// Selects a plot out of the still-available set
    ///
    /// A plot that is missing from the available set (already sold, or not in
    /// the catalog for this property) is rejected and the item is left
    /// unchanged. On success the area is copied from the master record; the
    /// price keeps whatever the property default or a manual edit set.
    pub fn set_plot(
        &mut self,
        plot_number: &str,
        resolver: &AvailabilityResolver<'_>,
    ) -> Result<(), SalesError> {
        let plot = resolver
            .find_available(&self.property, plot_number)
            .ok_or_else(|| SalesError::PlotUnavailable {
                property: self.property.clone(),
                plot_number: plot_number.to_string(),
            })?;

        self.plot_number = plot.plot_number.clone();
        self.area = plot.area;
        self.recalculate();
        Ok(())
    }

    /// Overrides the area; negative input clamps to 0
    pub fn set_area(&mut self, area: Decimal) {
        self.area = area.max(Decimal::ZERO);
        self.recalculate();
    }

    /// Overrides the price per cent; negative input clamps to 0
    pub fn set_price_per_cent(&mut self, price: Money) {
        self.price_per_cent = price.max(Money::zero());
        self.recalculate();
    }

    /// Sets the discount, clamped to `[0, total_amount]`
    ///
    /// Leaves `total_amount` untouched; only `final_amount` moves.
    pub fn set_discount(&mut self, discount: Money) {
        self.discount = discount.clamp(Money::zero(), self.total_amount);
        self.final_amount = self.total_amount - self.discount;
    }

    /// Recomputes the whole derived chain from `area` and `price_per_cent`
    ///
    /// The discount is re-clamped first: if the total dropped below a
    /// previously entered discount, the discount shrinks to the new total
    /// and the final amount bottoms out at zero.
    fn recalculate(&mut self) {
        self.total_amount = self.price_per_cent * self.area;
        self.discount = self.discount.clamp(Money::zero(), self.total_amount);
        self.final_amount = self.total_amount - self.discount;
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::new()
    }
}
