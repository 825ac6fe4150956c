//! Plot availability against the sibling-invoice collection
//!
//! Exclusivity is advisory: it is computed from the latest snapshot of
//! sibling invoices the caller has. Two users racing to claim the same plot
//! need a server-side reservation, which is out of scope here.

use std::collections::HashSet;

use core_kernel::InvoiceId;
use domain_catalog::{PlotCatalog, PlotRecord};

use crate::invoice::Invoice;

/// Resolves which plots of a property are still unsold
///
/// Built per edit from read-only snapshots of the catalog and the sibling
/// invoices. In edit mode the invoice being edited is excluded, so its own
/// previously chosen plots remain selectable.
#[derive(Debug, Clone)]
pub struct AvailabilityResolver<'a> {
    catalog: &'a PlotCatalog,
    invoices: &'a [Invoice],
    exclude: Option<InvoiceId>,
}

impl<'a> AvailabilityResolver<'a> {
    /// Creates a resolver over the given snapshots
    pub fn new(catalog: &'a PlotCatalog, invoices: &'a [Invoice]) -> Self {
        Self {
            catalog,
            invoices,
            exclude: None,
        }
    }

    /// Excludes an invoice from the exclusivity check (edit mode)
    pub fn excluding(mut self, invoice_id: InvoiceId) -> Self {
        self.exclude = Some(invoice_id);
        self
    }

    /// Plot numbers of a property already claimed by a sibling line item
    ///
    /// A plot claimed twice by pre-existing bad data still counts as claimed:
    /// the resolver prevents new double-booking but never repairs old data.
    fn claimed(&self, property: &str) -> HashSet<&'a str> {
        self.invoices
            .iter()
            .filter(|invoice| Some(invoice.id) != self.exclude)
            .flat_map(|invoice| invoice.line_items.iter())
            .filter(|item| item.property == property && !item.plot_number.is_empty())
            .map(|item| item.plot_number.as_str())
            .collect()
    }

    /// The plots of a property that are still unsold
    ///
    /// Output order equals the catalog's plot order with exclusions removed,
    /// regardless of invoice iteration order.
    pub fn available_plots(&self, property: &str) -> Vec<&'a PlotRecord> {
        let claimed = self.claimed(property);
        self.catalog
            .plots(property)
            .into_iter()
            .filter(|plot| !claimed.contains(plot.plot_number.as_str()))
            .collect()
    }

    /// True if the plot exists in the catalog and is not claimed elsewhere
    pub fn is_available(&self, property: &str, plot_number: &str) -> bool {
        self.find_available(property, plot_number).is_some()
    }

    /// Looks up an available plot by number
    pub fn find_available(&self, property: &str, plot_number: &str) -> Option<&'a PlotRecord> {
        self.available_plots(property)
            .into_iter()
            .find(|plot| plot.plot_number == plot_number)
    }
}
