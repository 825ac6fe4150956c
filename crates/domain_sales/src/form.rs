//! The invoice editing session
//!
//! [`InvoiceForm`] is the single entry point the surrounding application
//! drives: user input events come in as setter calls, each one runs the
//! cascading recalculation synchronously, and `into_invoice` emits the
//! validated payload for the external store. All computation is
//! single-threaded and pure; the form never awaits anything.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::{InvoiceId, LineItemId, Money};
use domain_catalog::{PlotCatalog, PlotRecord};

use crate::availability::AvailabilityResolver;
use crate::error::SalesError;
use crate::invoice::{Invoice, InvoiceStatus, InvoiceType, LeadSource};
use crate::line_item::LineItem;

/// An in-flight invoice edit against catalog and sibling-invoice snapshots
///
/// Create mode starts a fresh draft with one blank line item, the way the
/// entry form opens. Edit mode wraps an existing invoice and excludes it
/// from its own exclusivity check so its plots remain selectable.
#[derive(Debug, Clone)]
pub struct InvoiceForm {
    catalog: PlotCatalog,
    siblings: Vec<Invoice>,
    draft: Invoice,
    exclude: Option<InvoiceId>,
}

impl InvoiceForm {
    /// Starts a new invoice draft
    pub fn create(catalog: PlotCatalog, siblings: Vec<Invoice>) -> Self {
        let today = Utc::now().date_naive();
        let mut draft = Invoice::new("", today, today);
        draft.line_items.push(LineItem::new());
        Self {
            catalog,
            siblings,
            draft,
            exclude: None,
        }
    }

    /// Opens an existing invoice for edit-in-place
    pub fn edit(catalog: PlotCatalog, siblings: Vec<Invoice>, invoice: Invoice) -> Self {
        let exclude = Some(invoice.id);
        Self {
            catalog,
            siblings,
            draft: invoice,
            exclude,
        }
    }

    fn resolver(&self) -> AvailabilityResolver<'_> {
        let resolver = AvailabilityResolver::new(&self.catalog, &self.siblings);
        match self.exclude {
            Some(id) => resolver.excluding(id),
            None => resolver,
        }
    }

    /// The plots of a property still offered for selection
    pub fn available_plots(&self, property: &str) -> Vec<&PlotRecord> {
        self.resolver().available_plots(property)
    }

    /// Property names of a project, for the cascading selector
    pub fn properties(&self, project: &str) -> Vec<&str> {
        self.catalog.properties(project)
    }

    // ------------------------------------------------------------------
    // Line items
    // ------------------------------------------------------------------

    /// Appends a blank line item and returns its id
    pub fn add_line_item(&mut self) -> LineItemId {
        let item = LineItem::new();
        let id = item.id;
        self.draft.line_items.push(item);
        id
    }

    /// Removes a line item
    pub fn remove_line_item(&mut self, id: LineItemId) -> Result<(), SalesError> {
        let before = self.draft.line_items.len();
        self.draft.line_items.retain(|item| item.id != id);
        if self.draft.line_items.len() == before {
            return Err(SalesError::LineItemNotFound(id));
        }
        Ok(())
    }

    /// Current line items, in order
    pub fn line_items(&self) -> &[LineItem] {
        &self.draft.line_items
    }

    /// Selects a property on a line item
    pub fn set_property(
        &mut self,
        id: LineItemId,
        property: impl Into<String>,
    ) -> Result<(), SalesError> {
        let catalog = &self.catalog;
        let item = self
            .draft
            .line_item_mut(id)
            .ok_or(SalesError::LineItemNotFound(id))?;
        item.set_property(property, catalog);
        Ok(())
    }

    /// Selects a plot on a line item, enforcing exclusivity
    pub fn set_plot(&mut self, id: LineItemId, plot_number: &str) -> Result<(), SalesError> {
        let resolver = {
            let resolver = AvailabilityResolver::new(&self.catalog, &self.siblings);
            match self.exclude {
                Some(exclude) => resolver.excluding(exclude),
                None => resolver,
            }
        };
        let item = self
            .draft
            .line_item_mut(id)
            .ok_or(SalesError::LineItemNotFound(id))?;
        let result = item.set_plot(plot_number, &resolver);
        if let Err(SalesError::PlotUnavailable { property, plot_number }) = &result {
            debug!(%property, %plot_number, "plot selection rejected: not available");
        }
        result
    }

    /// Overrides a line item's area
    pub fn set_area(&mut self, id: LineItemId, area: Decimal) -> Result<(), SalesError> {
        self.draft
            .line_item_mut(id)
            .ok_or(SalesError::LineItemNotFound(id))?
            .set_area(area);
        Ok(())
    }

    /// Overrides a line item's price per cent
    pub fn set_price_per_cent(&mut self, id: LineItemId, price: Money) -> Result<(), SalesError> {
        self.draft
            .line_item_mut(id)
            .ok_or(SalesError::LineItemNotFound(id))?
            .set_price_per_cent(price);
        Ok(())
    }

    /// Sets a line item's discount
    pub fn set_discount(&mut self, id: LineItemId, discount: Money) -> Result<(), SalesError> {
        self.draft
            .line_item_mut(id)
            .ok_or(SalesError::LineItemNotFound(id))?
            .set_discount(discount);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Header fields
    // ------------------------------------------------------------------

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.draft.customer_name = name.into();
    }

    pub fn set_project_name(&mut self, project: impl Into<String>) {
        self.draft.project_name = Some(project.into());
    }

    pub fn set_customer_phone(&mut self, phone: impl Into<String>) {
        self.draft.customer_phone = Some(phone.into());
    }

    pub fn set_reference(&mut self, reference: impl Into<String>) {
        self.draft.reference = Some(reference.into());
    }

    pub fn set_lead_source(&mut self, source: LeadSource) {
        self.draft.lead_source = Some(source);
    }

    pub fn set_invoice_date(&mut self, date: NaiveDate) {
        self.draft.invoice_date = date;
    }

    pub fn set_due_date(&mut self, date: NaiveDate) {
        self.draft.due_date = date;
    }

    pub fn set_status(&mut self, status: InvoiceStatus) {
        self.draft.status = status;
    }

    pub fn set_invoice_type(&mut self, invoice_type: InvoiceType) {
        self.draft.invoice_type = invoice_type;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = Some(notes.into());
    }

    // ------------------------------------------------------------------
    // Payment stages
    // ------------------------------------------------------------------

    /// Sets the token amount against the current grand total
    pub fn set_token(&mut self, amount: Money) {
        let total = self.draft.grand_total();
        self.draft.schedule.set_token(amount, total);
    }

    /// Sets the agreement amount against the current grand total
    pub fn set_agreement_due(&mut self, amount: Money) {
        let total = self.draft.grand_total();
        self.draft.schedule.set_agreement_due(amount, total);
    }

    /// Sets the registration amount against the current grand total
    pub fn set_registration_due(&mut self, amount: Money) {
        let total = self.draft.grand_total();
        self.draft.schedule.set_registration_due(amount, total);
    }

    pub fn set_agreement_due_date(&mut self, date: NaiveDate) {
        self.draft.schedule.set_agreement_due_date(Some(date));
    }

    pub fn set_registration_due_date(&mut self, date: NaiveDate) {
        self.draft.schedule.set_registration_due_date(Some(date));
    }

    // ------------------------------------------------------------------
    // Views and submission
    // ------------------------------------------------------------------

    /// The draft's grand total
    pub fn grand_total(&self) -> Money {
        self.draft.grand_total()
    }

    /// The schedule's remaining balance against the current grand total
    pub fn remaining(&self) -> Money {
        self.draft.remaining()
    }

    /// Validates the draft and emits the payload for the external store
    ///
    /// The engine does not persist anything itself; the caller passes the
    /// result to `InvoiceStore::create` or `InvoiceStore::update`.
    pub fn into_invoice(mut self) -> Result<Invoice, SalesError> {
        if self.draft.customer_name.trim().is_empty() {
            return Err(SalesError::Validation(
                "customer name is required".to_string(),
            ));
        }

        let has_content = self
            .draft
            .line_items
            .iter()
            .any(|item| item.has_plot() || !item.total_amount.is_zero());
        if !has_content {
            return Err(SalesError::Validation(
                "at least one line item with a plot or amount is required".to_string(),
            ));
        }

        self.draft.updated_at = Utc::now();
        debug!(
            invoice_number = %self.draft.invoice_number,
            grand_total = %self.draft.grand_total(),
            "invoice payload validated"
        );
        Ok(self.draft)
    }
}
