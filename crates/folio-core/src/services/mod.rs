//! Services that sit between the ports and the presentation layer.
//!
//! - [`CatalogStore`] owns the working set for one category view, its tag
//!   index and tag filter.
//! - [`CatalogAdmin`] performs authenticated mutations and uploads.
//! - [`AdminGate`] turns a password into an [`AdminSession`].

mod admin_gate;
mod catalog_admin;
mod catalog_store;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin_gate::{AdminGate, AdminSession};
pub use catalog_admin::{AssetKind, CatalogAdmin};
pub use catalog_store::{CatalogFetcher, CatalogStore, LoadOutcome, LoadPhase, LoadTicket};
