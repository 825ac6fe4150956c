//! Test data builders

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Money, PlotId};
use domain_catalog::PlotRecord;
use domain_sales::{Invoice, LineItem};

use crate::fixtures::customer_name;

/// Builder for plot master records
pub struct PlotRecordBuilder {
    project: String,
    property: String,
    plot_number: String,
    area: Decimal,
    price_per_cent: Money,
    is_active: bool,
}

impl Default for PlotRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotRecordBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            project: "Greenfield".to_string(),
            property: "Greenfield Phase 1".to_string(),
            plot_number: "A1".to_string(),
            area: dec!(5),
            price_per_cent: Money::new(dec!(100000)),
            is_active: true,
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = property.into();
        self
    }

    pub fn with_plot_number(mut self, plot_number: impl Into<String>) -> Self {
        self.plot_number = plot_number.into();
        self
    }

    pub fn with_area(mut self, area: Decimal) -> Self {
        self.area = area;
        self
    }

    pub fn with_price_per_cent(mut self, price: Money) -> Self {
        self.price_per_cent = price;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> PlotRecord {
        let record = PlotRecord::new(
            self.project,
            self.property,
            self.plot_number,
            self.area,
            self.price_per_cent,
        )
        .with_id(PlotId::new());
        if self.is_active {
            record
        } else {
            record.inactive()
        }
    }
}

/// Builder for sibling invoices holding plot claims
pub struct InvoiceBuilder {
    customer_name: String,
    invoice_date: NaiveDate,
    due_date: NaiveDate,
    claims: Vec<(String, String)>,
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            customer_name: customer_name(),
            invoice_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            claims: Vec::new(),
        }
    }

    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = name.into();
        self
    }

    pub fn with_dates(mut self, invoice_date: NaiveDate, due_date: NaiveDate) -> Self {
        self.invoice_date = invoice_date;
        self.due_date = due_date;
        self
    }

    /// Adds a line item claiming a plot of a property
    pub fn claiming(mut self, property: impl Into<String>, plot_number: impl Into<String>) -> Self {
        self.claims.push((property.into(), plot_number.into()));
        self
    }

    pub fn build(self) -> Invoice {
        let mut invoice = Invoice::new(self.customer_name, self.invoice_date, self.due_date);
        for (property, plot_number) in self.claims {
            let mut item = LineItem::new();
            item.property = property;
            item.plot_number = plot_number;
            invoice.line_items.push(item);
        }
        invoice
    }
}
