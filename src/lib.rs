//! Client-side ordering core for a restaurant dine-in app: the cart store,
//! the pricing calculator, and the order submission flow against a remote
//! order-creation API.
//!
//! - [`domain`] holds the cart, pricing, promo rules, session/order types,
//!   and the [`OrderGateway`](domain::ports::OrderGateway) port.
//! - [`application`] drives the `Idle → Submitting → Succeeded | Failed`
//!   submission state machine through the port.
//! - [`infrastructure`] implements the port over HTTP against a PocketBase
//!   records endpoint.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::checkout::{CheckoutFlow, SubmissionState};
pub use config::OrderApiConfig;
pub use domain::cart::{Cart, CartItem, CartItemPatch, ModifierChoice};
pub use domain::errors::{CartError, CheckoutError, GatewayError};
pub use domain::menu::{MenuItem, ModifierGroup};
pub use domain::order::{OrderDraft, OrderReceipt, OrderSnapshot};
pub use domain::ports::OrderGateway;
pub use domain::pricing::{compute_totals, PricingResult, TAX_RATE_PERCENT};
pub use domain::promo::{PromoRegistry, PromoRule, PromoStatus};
pub use domain::session::{DiningSession, OrderType};
pub use infrastructure::order_api::PocketBaseOrderGateway;
