//! Catalog snapshot - the composer's read-only view of the backend.
//!
//! Products, suppliers, and stock records are fetched concurrently when a session
//! opens and are not refreshed afterwards; availability is always recomputed from
//! this snapshot. A failed load fails as a whole (no partial catalog from a
//! half-successful fetch), and the caller decides whether to continue empty.

use crate::{
    api::{Product, SalesApi, StockRecord, Supplier},
    errors::Result,
};

/// Immutable snapshot of the backend's catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Sellable products with currency-formatted prices
    pub products: Vec<Product>,
    /// Registered-customer directory
    pub suppliers: Vec<Supplier>,
    /// Per-warehouse stock records; availability is summed per product
    pub stock: Vec<StockRecord>,
}

impl Catalog {
    /// Fetches products, suppliers, and stock concurrently.
    ///
    /// The three requests are issued together and awaited jointly; if any of them
    /// fails the whole load fails.
    pub async fn load<A: SalesApi>(api: &A) -> Result<Self> {
        let (products, suppliers, stock) = tokio::try_join!(
            api.list_products(),
            api.list_suppliers(),
            api.list_stock(),
        )?;
        tracing::info!(
            "Catalog loaded: {} products, {} suppliers, {} stock records",
            products.len(),
            suppliers.len(),
            stock.len()
        );
        Ok(Self {
            products,
            suppliers,
            stock,
        })
    }

    /// Looks up a product by id.
    pub fn product(&self, product_id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.product_id == product_id)
    }

    /// Looks up a supplier by id.
    pub fn supplier(&self, supplier_id: u64) -> Option<&Supplier> {
        self.suppliers
            .iter()
            .find(|s| s.supplier_id == supplier_id)
    }

    /// Total quantity available for a product, summed across every stock record
    /// that references it. Zero when no record matches.
    pub fn available_quantity(&self, product_id: u64) -> i64 {
        self.stock
            .iter()
            .filter(|record| record.product_id == product_id)
            .map(|record| record.quantity)
            .sum()
    }
}
