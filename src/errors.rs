//! Unified error types for `SalesDesk`.
//!
//! Every fallible operation in the crate returns [`Result`]. Validation failures
//! carry enough context to be shown to the operator verbatim; transport and backend
//! failures wrap the underlying error so nothing is lost on the way up.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or value problem.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading or interpreting configuration
        message: String,
    },

    /// The backend rejected a request or returned an error body.
    #[error("Backend error: {message}")]
    Api {
        /// Error text extracted from the backend response
        message: String,
    },

    /// Transport-level HTTP failure (connection refused, TLS, decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error (terminal, config file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// A currency string could not be parsed into an amount.
    #[error("Cannot parse amount from '{raw}'")]
    PriceParse {
        /// The offending currency string as received
        raw: String,
    },

    /// Add was attempted with no product staged.
    #[error("No product selected")]
    NoProductSelected,

    /// Requested quantity is below one.
    #[error("Invalid quantity: {quantity} (must be at least 1)")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i64,
    },

    /// No product with the staged id exists in the catalog snapshot.
    #[error("Unknown product: {product_id}")]
    ProductNotFound {
        /// The id that matched nothing
        product_id: u64,
    },

    /// The product has zero available stock across all warehouses.
    #[error("'{name}' is out of stock")]
    OutOfStock {
        /// Display name of the product
        name: String,
    },

    /// Requested quantity exceeds the available stock.
    #[error("Cannot add {requested} units of '{name}': only {available} available in stock")]
    InsufficientStock {
        /// Display name of the product
        name: String,
        /// Quantity the operator asked for
        requested: i64,
        /// Quantity the catalog snapshot says is available
        available: i64,
    },

    /// Removal index is outside the line-item list.
    #[error("No line item at position {index}")]
    LineItemNotFound {
        /// The out-of-range position
        index: usize,
    },

    /// Submit was attempted with no line items staged.
    #[error("Order has no items: add at least one product before submitting")]
    EmptyOrder,

    /// Registered-customer mode is active but no customer is selected.
    #[error("No customer selected")]
    CustomerNotSelected,

    /// Regular-customer mode is active but the name is blank.
    #[error("Customer name is empty")]
    CustomerNameEmpty,

    /// A submission is already in flight for this composer.
    #[error("Submission already in progress")]
    SubmissionInFlight,
}

/// Convenience `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
