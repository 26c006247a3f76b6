//! Order composer - assembles a multi-product sale and commits it.
//!
//! The composer is an explicit state record owned by the session: a catalog
//! snapshot, the staged product/quantity selection, the accumulated line items,
//! and the customer reference. Every transition validates first and leaves state
//! untouched on rejection, so the caller can show the error and carry on.
//!
//! Submission is a sequential two-phase write with no server-side atomicity: the
//! order header first, then one order-item call per line item in list order. That
//! non-atomicity is a property of the backend contract, not an accident - on
//! failure the composer keeps all local state for a retry and reports (but never
//! rolls back) whatever was already written.

use crate::{
    api::{NewOrder, NewOrderItem, SalesApi},
    core::{catalog::Catalog, money},
    errors::{Error, Result},
};

/// How the order's customer is identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomerMode {
    /// An existing supplier entity, referenced by id
    #[default]
    Registered,
    /// A free-text customer name
    Regular,
}

/// A locally staged, not-yet-persisted entry of the order being assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Product being sold
    pub product_id: u64,
    /// Display name snapshot, for rendering and error messages
    pub product_name: String,
    /// Units sold
    pub quantity: i64,
    /// Unit price parsed from the product's currency string at add time
    pub unit_price: f64,
    /// `quantity × unit_price`
    pub subtotal: f64,
}

/// What the operator gets back after a fully successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleReceipt {
    /// Backend-assigned order id
    pub order_id: u64,
    /// Total amount of the order
    pub total: f64,
    /// Number of order items written
    pub item_count: usize,
    /// Customer the sale was recorded for
    pub customer: String,
}

/// Which server-side writes a submission attempt got through before failing.
/// This is the compensation hook point: a rollback implementation would consume
/// it; today it is only reported.
#[derive(Debug, Clone, Copy, Default)]
struct SagaProgress {
    order_id: Option<u64>,
    items_created: usize,
}

/// Order status sent at creation; sales are recorded as already completed.
const ORDER_STATUS: &str = "Completed";

/// The order composer state machine.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    catalog: Catalog,
    line_items: Vec<LineItem>,
    selected_product_id: Option<u64>,
    quantity: i64,
    customer_mode: CustomerMode,
    selected_supplier_id: Option<u64>,
    customer_name: String,
    submitting: bool,
}

impl Composer {
    /// Creates a composer over a loaded catalog snapshot.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            quantity: 1,
            ..Self::default()
        }
    }

    /// The catalog snapshot this composer prices and validates against.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Line items staged so far, in add order.
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Currently staged product id, if any.
    pub const fn selected_product_id(&self) -> Option<u64> {
        self.selected_product_id
    }

    /// Currently staged quantity.
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Active customer-reference mode.
    pub const fn customer_mode(&self) -> CustomerMode {
        self.customer_mode
    }

    /// Selected supplier id when in registered mode.
    pub const fn selected_supplier_id(&self) -> Option<u64> {
        self.selected_supplier_id
    }

    /// Free-text customer name when in regular mode.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Whether a submission is currently in flight.
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Stages a product for the next add; `None` clears the selection.
    pub fn select_product(&mut self, product_id: Option<u64>) {
        self.selected_product_id = product_id;
    }

    /// Stages the quantity for the next add. Values below one are kept as-is and
    /// rejected by [`Self::add_line_item`], mirroring where the original form
    /// validated.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    /// Switches the customer-reference mode. The inactive mode's value is kept so
    /// switching back does not lose input.
    pub fn set_customer_mode(&mut self, mode: CustomerMode) {
        self.customer_mode = mode;
    }

    /// Selects the registered customer (supplier) for this order.
    pub fn select_supplier(&mut self, supplier_id: Option<u64>) {
        self.selected_supplier_id = supplier_id;
    }

    /// Sets the free-text customer name for regular mode.
    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    /// Total quantity of a product already staged across all line items.
    ///
    /// Availability is checked against the unchanged catalog snapshot, so this is
    /// what a caller needs to notice that repeated adds of the same product have
    /// staged more than is physically available.
    pub fn staged_quantity(&self, product_id: u64) -> i64 {
        self.line_items
            .iter()
            .filter(|item| item.product_id == product_id)
            .map(|item| item.quantity)
            .sum()
    }

    /// Consumes the staged product/quantity selection into a line item.
    ///
    /// Rejections leave all state untouched: nothing staged, a quantity below
    /// one, an id the catalog does not know, zero availability, a request above
    /// availability, or an unparseable price string. On success the selection is
    /// cleared and the quantity reset to one.
    ///
    /// The availability check reads the catalog snapshot, which is never locally
    /// decremented - adding the same product twice can stage more than the
    /// snapshot says exists. The backend stays the authority on stock; see
    /// [`Self::staged_quantity`] for surfacing the gap to the operator.
    pub fn add_line_item(&mut self) -> Result<&LineItem> {
        let product_id = self.selected_product_id.ok_or(Error::NoProductSelected)?;

        if self.quantity < 1 {
            return Err(Error::InvalidQuantity {
                quantity: self.quantity,
            });
        }

        let product = self
            .catalog
            .product(product_id)
            .ok_or(Error::ProductNotFound { product_id })?;

        let available = self.catalog.available_quantity(product_id);
        if available == 0 {
            return Err(Error::OutOfStock {
                name: product.name.clone(),
            });
        }
        if self.quantity > available {
            return Err(Error::InsufficientStock {
                name: product.name.clone(),
                requested: self.quantity,
                available,
            });
        }

        let unit_price = money::parse_amount(&product.unit_price)?;
        #[allow(clippy::cast_precision_loss)]
        let subtotal = unit_price * self.quantity as f64;

        self.line_items.push(LineItem {
            product_id,
            product_name: product.name.clone(),
            quantity: self.quantity,
            unit_price,
            subtotal,
        });
        self.selected_product_id = None;
        self.quantity = 1;

        // Just pushed, so the list is non-empty
        Ok(self
            .line_items
            .last()
            .unwrap_or_else(|| unreachable!("line item was just pushed")))
    }

    /// Removes a line item by position. No confirmation step.
    pub fn remove_line_item(&mut self, index: usize) -> Result<LineItem> {
        if index >= self.line_items.len() {
            return Err(Error::LineItemNotFound { index });
        }
        Ok(self.line_items.remove(index))
    }

    /// Sum of all staged subtotals; the displayed total and the submitted
    /// `totalAmount` are both this value.
    pub fn total(&self) -> f64 {
        self.line_items.iter().map(|item| item.subtotal).sum()
    }

    /// Checks the submission preconditions without touching the network.
    pub fn validate_ready(&self) -> Result<()> {
        if self.line_items.is_empty() {
            return Err(Error::EmptyOrder);
        }
        match self.customer_mode {
            CustomerMode::Registered => {
                if self.selected_supplier_id.is_none() {
                    return Err(Error::CustomerNotSelected);
                }
            }
            CustomerMode::Regular => {
                if self.customer_name.trim().is_empty() {
                    return Err(Error::CustomerNameEmpty);
                }
            }
        }
        Ok(())
    }

    /// Human-readable customer reference for receipts and messages.
    pub fn customer_label(&self) -> String {
        match self.customer_mode {
            CustomerMode::Registered => self
                .selected_supplier_id
                .and_then(|id| self.catalog.supplier(id))
                .map_or_else(
                    || "registered customer".to_string(),
                    |supplier| supplier.name.clone(),
                ),
            CustomerMode::Regular => self.customer_name.trim().to_string(),
        }
    }

    /// Commits the staged sale: order header first, then one order-item call per
    /// line item in list order, sequentially.
    ///
    /// Validation failures are returned before any network call. A failure after
    /// the first write leaves everything staged for a retry and reports the
    /// partial server-side state through the compensation hook; no rollback is
    /// attempted. On full success the composer is reset and a receipt returned.
    pub async fn submit<A: SalesApi>(&mut self, api: &A) -> Result<SaleReceipt> {
        if self.submitting {
            return Err(Error::SubmissionInFlight);
        }
        self.validate_ready()?;

        self.submitting = true;
        let outcome = self.run_submission(api).await;
        self.submitting = false;

        match outcome {
            Ok(receipt) => {
                tracing::info!(
                    "Sale completed: order {} ({} items, total {})",
                    receipt.order_id,
                    receipt.item_count,
                    money::format_amount(receipt.total)
                );
                self.reset();
                Ok(receipt)
            }
            Err((progress, error)) => {
                self.abort_submission(progress);
                Err(error)
            }
        }
    }

    async fn run_submission<A: SalesApi>(
        &self,
        api: &A,
    ) -> std::result::Result<SaleReceipt, (SagaProgress, Error)> {
        let mut progress = SagaProgress::default();

        let order = NewOrder {
            status: ORDER_STATUS.to_string(),
            total_amount: money::format_amount(self.total()),
            supplier_id: match self.customer_mode {
                CustomerMode::Registered => self.selected_supplier_id.map(|id| id.to_string()),
                CustomerMode::Regular => None,
            },
            customer_name: match self.customer_mode {
                CustomerMode::Registered => None,
                CustomerMode::Regular => Some(self.customer_name.trim().to_string()),
            },
        };

        let created = api
            .create_order(&order)
            .await
            .map_err(|e| (progress, e))?;
        progress.order_id = Some(created.order_id);

        for item in &self.line_items {
            let request = NewOrderItem {
                order_id: created.order_id.to_string(),
                product_id: item.product_id.to_string(),
                quantity: item.quantity,
                unit_price: money::format_amount(item.unit_price),
            };
            api.create_order_item(&request)
                .await
                .map_err(|e| (progress, e))?;
            progress.items_created += 1;
        }

        Ok(SaleReceipt {
            order_id: created.order_id,
            total: self.total(),
            item_count: self.line_items.len(),
            customer: self.customer_label(),
        })
    }

    /// Compensation hook point. A rollback implementation would issue deletes for
    /// the partial writes recorded in `progress`; today the orphaned records are
    /// only reported.
    fn abort_submission(&self, progress: SagaProgress) {
        match progress.order_id {
            Some(order_id) => tracing::error!(
                "Submission aborted: order {order_id} and {}/{} of its items already \
                 exist server-side; no rollback is attempted",
                progress.items_created,
                self.line_items.len()
            ),
            None => tracing::debug!("Submission aborted before the order header was created"),
        }
    }

    /// Clears all staged state back to a fresh form.
    pub fn reset(&mut self) {
        self.line_items.clear();
        self.selected_product_id = None;
        self.quantity = 1;
        self.selected_supplier_id = None;
        self.customer_mode = CustomerMode::Registered;
        self.customer_name.clear();
    }
}
