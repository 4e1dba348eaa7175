use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the order will be fulfilled. Serialized in snake_case on the wire
/// (`dine_in`, `takeaway`, `delivery`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    DineIn,
    Takeaway,
    Delivery,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::DineIn => "dine_in",
            OrderType::Takeaway => "takeaway",
            OrderType::Delivery => "delivery",
        }
    }
}

/// The context binding a diner to a restaurant and table for the duration of
/// a visit. Produced by the external table verification flow (QR scan); the
/// ordering core only consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiningSession {
    pub restaurant_id: String,
    pub table_id: String,
    pub table_number: String,
    pub session_id: String,
}

impl DiningSession {
    /// Starts a session with a freshly generated session id.
    pub fn start(
        restaurant_id: impl Into<String>,
        table_id: impl Into<String>,
        table_number: impl Into<String>,
    ) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            table_id: table_id.into(),
            table_number: table_number.into(),
            session_id: format!("session_{}", Uuid::new_v4()),
        }
    }
}
