use rincon_domain::validation::ValidationError;

use crate::domain::types::CheckoutState;

/// Storefront client error variants.
///
/// Every variant carries display text; `kind()` gives a stable code for
/// scripts that parse CLI output.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    #[error("email and password are required")]
    IncompleteCredentials,
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("user not found")]
    UserNotFound,
    #[error("customer not found")]
    CustomerNotFound,
    #[error("product not found")]
    ProductNotFound,
    #[error("order not found")]
    OrderNotFound,
    #[error("invalid customer id")]
    InvalidCustomerId,
    #[error("insufficient stock for {product}")]
    InsufficientStock { product: String },
    #[error("could not validate stock: {0}")]
    StockValidation(String),
    #[error("complete the shipping data")]
    IncompleteShippingData,
    #[error("the cart is empty")]
    EmptyCart,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} answered HTTP {status}")]
    Status { status: u16, path: String },
    #[error("checkout failed while {step}: {source}")]
    CheckoutFailed {
        step: CheckoutState,
        #[source]
        source: Box<StorefrontError>,
    },
    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl StorefrontError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::IncompleteCredentials => "INCOMPLETE_CREDENTIALS",
            Self::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::InvalidCustomerId => "INVALID_CUSTOMER_ID",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::StockValidation(_) => "STOCK_VALIDATION",
            Self::IncompleteShippingData => "INCOMPLETE_SHIPPING_DATA",
            Self::EmptyCart => "EMPTY_CART",
            Self::Validation(_) => "VALIDATION",
            Self::Transport { .. } => "TRANSPORT",
            Self::Status { .. } => "HTTP_STATUS",
            Self::CheckoutFailed { .. } => "CHECKOUT_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Wrap a failure of checkout step `step`.
    pub fn checkout(step: CheckoutState, source: StorefrontError) -> Self {
        Self::CheckoutFailed {
            step,
            source: Box::new(source),
        }
    }
}
