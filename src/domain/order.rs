use bigdecimal::BigDecimal;

use super::cart::CartItem;
use super::pricing::PricingResult;
use super::session::{DiningSession, OrderType};

/// The order-creation request: a snapshot of the cart at submission time plus
/// the session context and the totals priced from that same snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub restaurant_id: String,
    pub table_id: String,
    pub items: Vec<CartItem>,
    pub order_type: OrderType,
    pub subtotal: BigDecimal,
    pub tax: BigDecimal,
    pub discount: BigDecimal,
    pub total: BigDecimal,
    pub notes: String,
}

impl OrderDraft {
    pub fn new(
        session: &DiningSession,
        items: Vec<CartItem>,
        order_type: OrderType,
        totals: &PricingResult,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            restaurant_id: session.restaurant_id.clone(),
            table_id: session.table_id.clone(),
            items,
            order_type,
            subtotal: totals.subtotal.clone(),
            tax: totals.tax.clone(),
            discount: totals.discount.clone(),
            total: totals.total.clone(),
            notes: notes.into(),
        }
    }
}

/// What a successful submission returns: the identifiers the payment step
/// consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    pub id: String,
    pub order_number: String,
}

/// Read-side view of a previously created order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSnapshot {
    pub id: String,
    pub order_number: String,
    pub status: String,
    pub payment_status: String,
    pub total: BigDecimal,
}
