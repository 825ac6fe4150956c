//! The read-only catalog view over plot master data

use core_kernel::Money;

use crate::plot::PlotRecord;

/// Read-only view over a snapshot of plot master data
///
/// The catalog answers the cascading selector queries of the invoice form:
/// project → property → plot, plus the default price used to prefill a new
/// line item. Unknown projects or properties yield empty results rather than
/// errors, because the master data may still be loading on the caller's side.
#[derive(Debug, Clone, Default)]
pub struct PlotCatalog {
    plots: Vec<PlotRecord>,
}

impl PlotCatalog {
    /// Creates a catalog from a master-data snapshot, keeping active rows only
    pub fn new(records: Vec<PlotRecord>) -> Self {
        Self {
            plots: records.into_iter().filter(|p| p.is_active).collect(),
        }
    }

    /// Returns every record in the snapshot, source order
    pub fn records(&self) -> &[PlotRecord] {
        &self.plots
    }

    /// Returns project names, deduplicated, in insertion order
    pub fn projects(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for plot in &self.plots {
            if !seen.contains(&plot.project.as_str()) {
                seen.push(&plot.project);
            }
        }
        seen
    }

    /// Returns property names for a project, deduplicated, in insertion order
    pub fn properties(&self, project: &str) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for plot in self.plots.iter().filter(|p| p.project == project) {
            if !seen.contains(&plot.property.as_str()) {
                seen.push(&plot.property);
            }
        }
        seen
    }

    /// Returns the plots of a property, source order
    pub fn plots(&self, property: &str) -> Vec<&PlotRecord> {
        self.plots.iter().filter(|p| p.property == property).collect()
    }

    /// Price per cent of the first record of a property
    ///
    /// Used to prefill a new line item when the user picks a property before
    /// a plot. Zero for an unknown property: a data-availability condition,
    /// not an error.
    pub fn default_price(&self, property: &str) -> Money {
        self.plots
            .iter()
            .find(|p| p.property == property)
            .map(|p| p.price_per_cent)
            .unwrap_or_else(Money::zero)
    }

    /// Looks up one plot by property and plot number
    pub fn find(&self, property: &str, plot_number: &str) -> Option<&PlotRecord> {
        self.plots
            .iter()
            .find(|p| p.property == property && p.plot_number == plot_number)
    }
}
