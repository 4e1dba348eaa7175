use thiserror::Error;

/// Failures of the in-memory cart store. Purely local, never network-related.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("No cart line with id {0}")]
    LineNotFound(String),
}

/// Failures reported by the remote order gateway.
///
/// The checkout flow treats every variant as a retryable failure: the cart is
/// preserved and the user decides whether to submit again.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Order request timed out")]
    Timeout,

    #[error("Order rejected by server: {0}")]
    Server(String),
}

/// Failures of a checkout attempt.
///
/// `EmptyCart` and `SubmissionInFlight` are local validation errors and are
/// raised before any network call is made.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
