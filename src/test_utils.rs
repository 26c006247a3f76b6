//! Shared test utilities for `SalesDesk`.
//!
//! This module provides catalog builders with sensible defaults and an in-memory
//! scripted [`SalesApi`] double so composer and console behavior can be tested
//! without a network. The double records every write so tests can assert both
//! what was sent and - for the no-network-call properties - that nothing was.

use crate::{
    api::{CreatedOrder, NewOrder, NewOrderItem, Product, SalesApi, StockRecord, Supplier},
    core::catalog::Catalog,
    errors::{Error, Result},
};
use std::sync::Mutex;

/// Creates a product with the given id, name, and currency-formatted price.
pub fn test_product(product_id: u64, name: &str, unit_price: &str) -> Product {
    Product {
        product_id,
        name: name.to_string(),
        unit_price: unit_price.to_string(),
    }
}

/// Creates a supplier with the given id and name.
pub fn test_supplier(supplier_id: u64, name: &str) -> Supplier {
    Supplier {
        supplier_id,
        name: name.to_string(),
    }
}

/// Creates a stock record for a product.
pub fn test_stock(product_id: u64, quantity: i64) -> StockRecord {
    StockRecord {
        product_id,
        quantity,
    }
}

/// Assembles a catalog from explicit parts.
pub fn catalog_with(
    products: Vec<Product>,
    suppliers: Vec<Supplier>,
    stock: Vec<StockRecord>,
) -> Catalog {
    Catalog {
        products,
        suppliers,
        stock,
    }
}

/// The standard one-product catalog most composer tests start from:
/// a ₱100.00 Widget with 5 units in stock and one registered customer.
pub fn widget_catalog() -> Catalog {
    catalog_with(
        vec![test_product(1, "Widget", "₱100.00")],
        vec![test_supplier(4, "Acme Trading")],
        vec![test_stock(1, 5)],
    )
}

/// In-memory [`SalesApi`] double with scriptable failures.
///
/// Reads serve the configured fixture data; writes are recorded. Failure points
/// are opted into per test: the whole stock listing, the order create, or the
/// item create at a given position in the sequence.
#[derive(Debug, Default)]
pub struct MockSalesApi {
    products: Vec<Product>,
    suppliers: Vec<Supplier>,
    stock: Vec<StockRecord>,
    fail_stock_list: bool,
    fail_order_create: bool,
    fail_item_at: Option<usize>,
    next_order_id: u64,
    orders: Mutex<Vec<NewOrder>>,
    items: Mutex<Vec<NewOrderItem>>,
}

impl MockSalesApi {
    /// Creates a double with empty fixtures and no scripted failures.
    pub fn new() -> Self {
        Self {
            next_order_id: 17,
            ..Self::default()
        }
    }

    /// Sets the products served by `list_products`.
    #[must_use]
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    /// Sets the suppliers served by `list_suppliers`.
    #[must_use]
    pub fn with_suppliers(mut self, suppliers: Vec<Supplier>) -> Self {
        self.suppliers = suppliers;
        self
    }

    /// Sets the stock records served by `list_stock`.
    #[must_use]
    pub fn with_stock(mut self, stock: Vec<StockRecord>) -> Self {
        self.stock = stock;
        self
    }

    /// Scripts `list_stock` to fail, for joint-load failure tests.
    #[must_use]
    pub fn with_stock_failure(mut self) -> Self {
        self.fail_stock_list = true;
        self
    }

    /// Scripts `create_order` to fail.
    #[must_use]
    pub fn with_order_failure(mut self) -> Self {
        self.fail_order_create = true;
        self
    }

    /// Scripts the `index`-th (zero-based) `create_order_item` call to fail.
    #[must_use]
    pub fn failing_item_at(mut self, index: usize) -> Self {
        self.fail_item_at = Some(index);
        self
    }

    /// Number of orders successfully created.
    pub fn orders_created(&self) -> usize {
        self.orders.lock().map(|o| o.len()).unwrap_or(0)
    }

    /// Number of order items successfully created.
    pub fn items_created(&self) -> usize {
        self.items.lock().map(|i| i.len()).unwrap_or(0)
    }

    /// The order bodies received, in call order.
    pub fn recorded_orders(&self) -> Vec<NewOrder> {
        self.orders.lock().map(|o| o.clone()).unwrap_or_default()
    }

    /// The order-item bodies received, in call order.
    pub fn recorded_items(&self) -> Vec<NewOrderItem> {
        self.items.lock().map(|i| i.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl SalesApi for MockSalesApi {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        Ok(self.suppliers.clone())
    }

    async fn list_stock(&self) -> Result<Vec<StockRecord>> {
        if self.fail_stock_list {
            return Err(Error::Api {
                message: "stock listing unavailable".to_string(),
            });
        }
        Ok(self.stock.clone())
    }

    async fn create_order(&self, order: &NewOrder) -> Result<CreatedOrder> {
        if self.fail_order_create {
            return Err(Error::Api {
                message: "order create rejected".to_string(),
            });
        }
        if let Ok(mut orders) = self.orders.lock() {
            orders.push(order.clone());
        }
        Ok(CreatedOrder {
            order_id: self.next_order_id,
        })
    }

    async fn create_order_item(&self, item: &NewOrderItem) -> Result<()> {
        let position = self.items_created();
        if self.fail_item_at == Some(position) {
            return Err(Error::Api {
                message: format!("order item create rejected at position {position}"),
            });
        }
        if let Ok(mut items) = self.items.lock() {
            items.push(item.clone());
        }
        Ok(())
    }
}
