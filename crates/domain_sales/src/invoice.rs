//! Invoice aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{InvoiceId, LineItemId, Money};

use crate::line_item::LineItem;
use crate::schedule::PaymentSchedule;

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvoiceStatus {
    /// Fully paid
    Paid,
    /// Awaiting payment
    Pending,
    /// Past due date
    Overdue,
    /// Partially collected
    Partial,
}

/// What kind of billing this invoice represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvoiceType {
    /// Billed against a project
    Project,
    /// Billed to a customer (plot sales)
    Customer,
    /// Expense passthrough
    Expense,
}

/// How the buyer found the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadSource {
    #[serde(rename = "Marketing Data")]
    MarketingData,
    #[serde(rename = "Old Data")]
    OldData,
    #[serde(rename = "Direct Lead")]
    DirectLead,
    Referral,
    #[serde(rename = "Social Media")]
    SocialMedia,
    Others,
}

/// A sales invoice
///
/// Owned exclusively by the form session until submitted to the external
/// store, which assigns/returns the canonical stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// Human-readable invoice number
    pub invoice_number: String,
    /// Project this sale belongs to
    pub project_name: Option<String>,
    /// Buyer name
    pub customer_name: String,
    /// Buyer phone
    pub customer_phone: Option<String>,
    /// Free-form reference
    pub reference: Option<String>,
    /// How the buyer found the project
    pub lead_source: Option<LeadSource>,
    /// Invoice date
    pub invoice_date: NaiveDate,
    /// Due date
    pub due_date: NaiveDate,
    /// Status
    pub status: InvoiceStatus,
    /// Invoice kind
    pub invoice_type: InvoiceType,
    /// Ordered line items
    pub line_items: Vec<LineItem>,
    /// Token/agreement/registration breakdown
    pub schedule: PaymentSchedule,
    /// Notes
    pub notes: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates a new draft invoice
    pub fn new(
        customer_name: impl Into<String>,
        invoice_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: InvoiceId::new_v7(),
            invoice_number: generate_invoice_number(),
            project_name: None,
            customer_name: customer_name.into(),
            customer_phone: None,
            reference: None,
            lead_source: None,
            invoice_date,
            due_date,
            status: InvoiceStatus::Pending,
            invoice_type: InvoiceType::Customer,
            line_items: Vec::new(),
            schedule: PaymentSchedule::new(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of every line item's final amount
    ///
    /// Pure and total: an invoice with no line items totals zero.
    pub fn grand_total(&self) -> Money {
        self.line_items.iter().map(|item| item.final_amount).sum()
    }

    /// The schedule's remaining balance against the current grand total
    pub fn remaining(&self) -> Money {
        self.schedule.remaining(self.grand_total())
    }

    /// Looks up a line item by id
    pub fn line_item(&self, id: LineItemId) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.id == id)
    }

    /// Looks up a line item by id, mutably
    pub fn line_item_mut(&mut self, id: LineItemId) -> Option<&mut LineItem> {
        self.line_items.iter_mut().find(|item| item.id == id)
    }

    /// Checks if the invoice is past its due date and still unpaid
    pub fn is_overdue(&self) -> bool {
        let today = Utc::now().date_naive();
        today > self.due_date && !matches!(self.status, InvoiceStatus::Paid)
    }
}

/// Generates a unique invoice number
fn generate_invoice_number() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("INV-{}", duration.as_millis() % 10_000_000_000)
}
