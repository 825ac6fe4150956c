//! Catalog Domain Ports
//!
//! The plot master data lives in a remote store owned by the master-data
//! screens. The engine only ever reads it; adapters (database, REST, mock)
//! implement [`PlotMasterStore`] and the caller turns the result into a
//! [`PlotCatalog`](crate::PlotCatalog) snapshot.

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};

use crate::plot::PlotRecord;

/// Port over the remote plot master-data store
#[async_trait]
pub trait PlotMasterStore: DomainPort {
    /// Fetches every master record
    async fn list(&self) -> Result<Vec<PlotRecord>, PortError>;

    /// Fetches the master records of one project
    async fn list_by_project(&self, project: &str) -> Result<Vec<PlotRecord>, PortError>;
}
