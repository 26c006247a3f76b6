//! API boundary - everything that crosses the wire to the inventory backend.
//!
//! The backend is loose about field names (`product_id` vs `productId`) and id
//! representations (numbers vs numeric strings). All of that tolerance lives here,
//! in the deserializers: the rest of the crate only ever sees one canonical shape
//! and never branches on key spelling.

/// HTTP client implementation backed by `reqwest`
pub mod client;
/// Canonical wire types with normalization at deserialize time
pub mod types;

pub use client::HttpSalesApi;
pub use types::{CreatedOrder, NewOrder, NewOrderItem, Product, StockRecord, Supplier};

use crate::errors::Result;

/// The slice of the inventory backend the order composer consumes.
///
/// Kept as a trait so the composer and console can be exercised against an
/// in-memory double in tests; [`HttpSalesApi`] is the production implementation.
#[async_trait::async_trait]
pub trait SalesApi: Send + Sync {
    /// Checks that the backend is reachable.
    async fn health_check(&self) -> Result<()>;

    /// Lists all products with their currency-formatted unit prices.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Lists all suppliers (the registered-customer directory).
    async fn list_suppliers(&self) -> Result<Vec<Supplier>>;

    /// Lists all stock records across all warehouses.
    async fn list_stock(&self) -> Result<Vec<StockRecord>>;

    /// Creates the order header and returns its backend-assigned identity.
    async fn create_order(&self, order: &NewOrder) -> Result<CreatedOrder>;

    /// Creates one order item against an existing order.
    async fn create_order_item(&self, item: &NewOrderItem) -> Result<()>;
}
