//! Core business logic - framework-agnostic money handling, catalog snapshot,
//! and the order composer state machine.
//!
//! Nothing in this module touches a terminal or an HTTP client directly; backend
//! access goes through the [`crate::api::SalesApi`] seam so every rule here is
//! testable against an in-memory double.

/// Catalog snapshot and stock-availability aggregation
pub mod catalog;
/// Order composer state machine and submission saga
pub mod composer;
/// Currency-string parsing and formatting
pub mod money;

pub use catalog::Catalog;
pub use composer::{Composer, CustomerMode, LineItem, SaleReceipt};
