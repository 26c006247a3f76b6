//! `reqwest`-backed implementation of [`SalesApi`].
//!
//! Paths and response envelopes match the inventory backend exactly: list
//! endpoints wrap their payload in a named collection key, error responses carry
//! either a `message` or an `error` field, and falling back to the bare HTTP
//! status when the body has neither.

use crate::{
    api::{
        SalesApi,
        types::{CreatedOrder, NewOrder, NewOrderItem, Product, StockRecord, Supplier},
    },
    errors::{Error, Result},
};
use serde::Deserialize;

/// HTTP client for the inventory backend.
#[derive(Debug, Clone)]
pub struct HttpSalesApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSalesApi {
    /// Creates a client against the given base URL (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("GET {url}");
        let resp = self.http.get(&url).send().await?;
        let resp = error_for_status(resp).await?;
        resp.json().await.map_err(Error::from)
    }

    async fn post_json<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let url = self.url(path);
        tracing::debug!("POST {url}");
        let resp = self.http.post(&url).json(body).send().await?;
        error_for_status(resp).await
    }
}

/// Error body shape the backend uses for rejected requests.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Turns a non-2xx response into [`Error::Api`], preferring the backend's own
/// error text over the bare status code.
async fn error_for_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body: ErrorBody = resp.json().await.unwrap_or_default();
    let message = body
        .message
        .or(body.error)
        .unwrap_or_else(|| format!("API error: {}", status.as_u16()));
    tracing::error!("Backend rejected request ({}): {message}", status.as_u16());
    Err(Error::Api { message })
}

#[derive(Debug, Deserialize)]
struct ProductsResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct SuppliersResponse {
    #[serde(default)]
    suppliers: Vec<Supplier>,
}

#[derive(Debug, Deserialize)]
struct InventoriesResponse {
    #[serde(default)]
    inventories: Vec<StockRecord>,
}

#[derive(Debug, Deserialize)]
struct OrderCreateResponse {
    order: CreatedOrder,
}

#[async_trait::async_trait]
impl SalesApi for HttpSalesApi {
    async fn health_check(&self) -> Result<()> {
        let resp = self.http.get(self.url("/api/health/")).send().await?;
        error_for_status(resp).await?;
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let body: ProductsResponse = self.get_json("/api/products/").await?;
        Ok(body.products)
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        let body: SuppliersResponse = self.get_json("/api/suppliers/").await?;
        Ok(body.suppliers)
    }

    async fn list_stock(&self) -> Result<Vec<StockRecord>> {
        let body: InventoriesResponse = self.get_json("/api/inventory/").await?;
        Ok(body.inventories)
    }

    async fn create_order(&self, order: &NewOrder) -> Result<CreatedOrder> {
        let resp = self.post_json("/api/orders/create/", order).await?;
        let body: OrderCreateResponse = resp.json().await?;
        Ok(body.order)
    }

    async fn create_order_item(&self, item: &NewOrderItem) -> Result<()> {
        // Response body carries the derived subtotal; the composer has no use for it.
        self.post_json("/api/order-items/create/", item).await?;
        Ok(())
    }
}
