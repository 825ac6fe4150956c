//! Sales Domain Ports
//!
//! Invoices are persisted by a remote store the engine never talks to
//! directly. The form session produces a validated [`Invoice`] payload and
//! the caller pushes it through [`InvoiceStore`]; the same port supplies the
//! sibling-invoice snapshot the exclusivity check reads.

use async_trait::async_trait;

use core_kernel::{DomainPort, InvoiceId, PortError};

use crate::invoice::Invoice;

/// Port over the remote invoice store
#[async_trait]
pub trait InvoiceStore: DomainPort {
    /// Fetches every invoice (the sibling set for exclusivity checks)
    async fn list(&self) -> Result<Vec<Invoice>, PortError>;

    /// Fetches one invoice
    async fn get(&self, id: InvoiceId) -> Result<Invoice, PortError>;

    /// Persists a new invoice, returning the canonical id
    async fn create(&self, invoice: &Invoice) -> Result<InvoiceId, PortError>;

    /// Replaces a stored invoice
    async fn update(&self, id: InvoiceId, invoice: &Invoice) -> Result<(), PortError>;

    /// Deletes an invoice
    async fn delete(&self, id: InvoiceId) -> Result<(), PortError>;
}
