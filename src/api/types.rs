//! Canonical wire types for the inventory backend.
//!
//! Identifiers arrive as either JSON numbers or numeric strings depending on the
//! endpoint, and stock records spell their product key either `product_id` or
//! `productId`. Both tolerances are absorbed here with serde aliases and a flexible
//! id deserializer, so every consumer sees a plain `u64`.

use serde::{Deserialize, Deserializer, Serialize, de};

/// Accepts an id encoded as a JSON number or a numeric string.
fn flexible_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid numeric id: '{s}'"))),
    }
}

/// A sellable product as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    /// Backend identity of the product
    #[serde(deserialize_with = "flexible_id")]
    pub product_id: u64,
    /// Display name
    pub name: String,
    /// Currency-formatted unit price, e.g. `"₱1,234.56"`; parsed only when a
    /// line item is added
    #[serde(rename = "unitPrice")]
    pub unit_price: String,
}

/// A supplier, doubling as the registered-customer directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Supplier {
    /// Backend identity of the supplier
    #[serde(deserialize_with = "flexible_id")]
    pub supplier_id: u64,
    /// Display name
    pub name: String,
}

/// One (product, warehouse) stock record. The composer never needs the warehouse
/// identity; availability is summed across all records for a product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StockRecord {
    /// Product this record counts stock for
    #[serde(alias = "productId", deserialize_with = "flexible_id")]
    pub product_id: u64,
    /// On-hand quantity in this record's warehouse
    #[serde(default)]
    pub quantity: i64,
}

/// Order-creation request body. The backend expects camelCase keys and exactly one
/// of the two customer fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Order status; fixed to `"Completed"` at creation
    pub status: String,
    /// Currency-formatted order total, e.g. `"₱3000.00"`
    pub total_amount: String,
    /// Registered-customer reference (supplier id), sent as a string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    /// Regular-customer free-text name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

/// The backend-assigned identity of a freshly created order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CreatedOrder {
    /// Order id to reference from order items
    #[serde(deserialize_with = "flexible_id")]
    pub order_id: u64,
}

/// Order-item creation request body. Ids are sent as strings, matching what the
/// backend accepts from its existing clients; the subtotal is derived server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    /// Order this item belongs to
    pub order_id: String,
    /// Product being sold
    pub product_id: String,
    /// Units sold
    pub quantity: i64,
    /// Currency-formatted unit price snapshot, e.g. `"₱100.00"`
    pub unit_price: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_stock_record_accepts_snake_case_numeric_id() {
        let record: StockRecord =
            serde_json::from_str(r#"{"product_id": 7, "quantity": 12}"#).unwrap();
        assert_eq!(record.product_id, 7);
        assert_eq!(record.quantity, 12);
    }

    #[test]
    fn test_stock_record_accepts_camel_case_string_id() {
        let record: StockRecord =
            serde_json::from_str(r#"{"productId": "7", "quantity": 12}"#).unwrap();
        assert_eq!(record.product_id, 7);
    }

    #[test]
    fn test_stock_record_missing_quantity_defaults_to_zero() {
        let record: StockRecord = serde_json::from_str(r#"{"product_id": 3}"#).unwrap();
        assert_eq!(record.quantity, 0);
    }

    #[test]
    fn test_stock_record_rejects_non_numeric_string_id() {
        let result: Result<StockRecord, _> =
            serde_json::from_str(r#"{"product_id": "seven", "quantity": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_product_keeps_unit_price_as_raw_string() {
        let product: Product = serde_json::from_str(
            r#"{"product_id": "42", "name": "Widget", "unitPrice": "₱1,234.56"}"#,
        )
        .unwrap();
        assert_eq!(product.product_id, 42);
        assert_eq!(product.unit_price, "₱1,234.56");
    }

    #[test]
    fn test_new_order_serializes_camel_case_and_omits_absent_customer() {
        let order = NewOrder {
            status: "Completed".to_string(),
            total_amount: "₱300.00".to_string(),
            supplier_id: None,
            customer_name: Some("Walk-in".to_string()),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "Completed");
        assert_eq!(json["totalAmount"], "₱300.00");
        assert_eq!(json["customerName"], "Walk-in");
        assert!(json.get("supplierId").is_none());
    }

    #[test]
    fn test_new_order_item_serializes_ids_as_strings() {
        let item = NewOrderItem {
            order_id: "9".to_string(),
            product_id: "1".to_string(),
            quantity: 3,
            unit_price: "₱100.00".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["orderId"], "9");
        assert_eq!(json["productId"], "1");
        assert_eq!(json["quantity"], 3);
        assert_eq!(json["unitPrice"], "₱100.00");
    }

    #[test]
    fn test_created_order_accepts_string_id() {
        let created: CreatedOrder = serde_json::from_str(r#"{"order_id": "17"}"#).unwrap();
        assert_eq!(created.order_id, 17);
    }
}
