//! Sales Domain - Plot Invoicing Engine
//!
//! This crate implements the invoice engine used when selling land plots out
//! of a finite inventory:
//!
//! - **Exclusivity**: a plot may be allocated to at most one invoice at a
//!   time. [`AvailabilityResolver`] computes which plots of a property are
//!   still unsold given the sibling invoices, excluding the invoice being
//!   edited so it can keep its own plots.
//! - **Cascading recalculation**: every [`LineItem`] setter recomputes its
//!   derived fields in one step (area, price → total → discount → final),
//!   so a line item is never observable in an inconsistent state.
//! - **Payment staging**: [`PaymentSchedule`] splits the grand total into
//!   token / agreement / registration / remaining and keeps
//!   `token + agreement + registration + remaining = grand total` under
//!   out-of-order edits.
//!
//! The [`InvoiceForm`] session ties the pieces together and produces a
//! validated [`Invoice`] payload for the external store. The engine performs
//! no I/O of its own; persistence is behind the [`InvoiceStore`] port.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_sales::InvoiceForm;
//!
//! let mut form = InvoiceForm::create(catalog, siblings);
//! form.set_customer_name("Asha Verma");
//! let line = form.add_line_item();
//! form.set_property(line, "Greenfield Phase 1")?;
//! form.set_plot(line, "A2")?;
//! form.set_token(Money::new(dec!(300000)));
//! let invoice = form.into_invoice()?;
//! store.create(&invoice).await?;
//! ```

pub mod availability;
pub mod line_item;
pub mod invoice;
pub mod schedule;
pub mod form;
pub mod ports;
pub mod error;

pub use availability::AvailabilityResolver;
pub use line_item::LineItem;
pub use invoice::{Invoice, InvoiceStatus, InvoiceType, LeadSource};
pub use schedule::PaymentSchedule;
pub use form::InvoiceForm;
pub use ports::InvoiceStore;
pub use error::SalesError;
