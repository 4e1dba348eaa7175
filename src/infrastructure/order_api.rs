use std::collections::BTreeMap;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::OrderApiConfig;
use crate::domain::cart::CartItem;
use crate::domain::errors::GatewayError;
use crate::domain::order::{OrderDraft, OrderReceipt, OrderSnapshot};
use crate::domain::ports::OrderGateway;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Decimal amounts travel as strings to avoid floating-point issues,
/// e.g. "13.99".
#[derive(Debug, Serialize)]
struct OrderRecordPayload {
    restaurant: String,
    table: String,
    items: Vec<OrderLinePayload>,
    #[serde(rename = "type")]
    order_type: String,
    subtotal: String,
    tax: String,
    discount: String,
    total: String,
    notes: String,
    order_number: String,
    status: &'static str,
    payment_status: &'static str,
}

#[derive(Debug, Serialize)]
struct OrderLinePayload {
    id: String,
    name: String,
    price: String,
    quantity: i32,
    modifiers: BTreeMap<String, ModifierPayload>,
}

#[derive(Debug, Serialize)]
struct ModifierPayload {
    name: String,
    price: String,
}

#[derive(Debug, Deserialize)]
struct OrderRecordResponse {
    id: String,
    order_number: String,
}

#[derive(Debug, Deserialize)]
struct OrderRecordDetail {
    id: String,
    order_number: String,
    status: String,
    payment_status: String,
    total: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl OrderRecordPayload {
    fn from_draft(draft: &OrderDraft, order_number: String) -> Self {
        Self {
            restaurant: draft.restaurant_id.clone(),
            table: draft.table_id.clone(),
            items: draft.items.iter().map(OrderLinePayload::from_line).collect(),
            order_type: draft.order_type.as_str().to_string(),
            subtotal: draft.subtotal.to_string(),
            tax: draft.tax.to_string(),
            discount: draft.discount.to_string(),
            total: draft.total.to_string(),
            notes: draft.notes.clone(),
            order_number,
            status: "pending",
            payment_status: "pending",
        }
    }
}

impl OrderLinePayload {
    fn from_line(line: &CartItem) -> Self {
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            price: line.unit_price.to_string(),
            quantity: line.quantity,
            modifiers: line
                .modifiers
                .iter()
                .map(|(group, choice)| {
                    (
                        group.clone(),
                        ModifierPayload {
                            name: choice.name.clone(),
                            price: choice.price_delta.to_string(),
                        },
                    )
                })
                .collect(),
        }
    }
}

// ── Order numbers ────────────────────────────────────────────────────────────

/// Client-side order number: "ORD-" plus the submission instant's unix
/// milliseconds in uppercase base 36.
fn next_order_number() -> String {
    format!("ORD-{}", base36_upper(Utc::now().timestamp_millis()))
}

fn base36_upper(mut n: i64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n <= 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ascii")
}

// ── Gateway ──────────────────────────────────────────────────────────────────

/// HTTP adapter for the order-creation port, speaking the PocketBase records
/// API (`/api/collections/orders/records`).
pub struct PocketBaseOrderGateway {
    http: reqwest::Client,
    base_url: String,
}

impl PocketBaseOrderGateway {
    pub fn new(config: &OrderApiConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn records_url(&self) -> String {
        format!("{}/api/collections/orders/records", self.base_url)
    }

    async fn server_error(response: reqwest::Response) -> GatewayError {
        let status = response.status();
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("HTTP {}", status));
        GatewayError::Server(message)
    }
}

fn map_transport(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Network(e.to_string())
    }
}

fn parse_amount(field: &str, raw: &str) -> Result<BigDecimal, GatewayError> {
    raw.parse()
        .map_err(|_| GatewayError::Server(format!("Invalid {} '{}' in response", field, raw)))
}

#[async_trait]
impl OrderGateway for PocketBaseOrderGateway {
    async fn create_order(&self, draft: OrderDraft) -> Result<OrderReceipt, GatewayError> {
        let payload = OrderRecordPayload::from_draft(&draft, next_order_number());
        let response = self
            .http
            .post(self.records_url())
            .json(&payload)
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        let record: OrderRecordResponse = response.json().await.map_err(map_transport)?;
        Ok(OrderReceipt { id: record.id, order_number: record.order_number })
    }

    async fn fetch_order(&self, id: &str) -> Result<Option<OrderSnapshot>, GatewayError> {
        let url = format!("{}/{}", self.records_url(), id);
        let response = self.http.get(url).send().await.map_err(map_transport)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        let record: OrderRecordDetail = response.json().await.map_err(map_transport)?;
        Ok(Some(OrderSnapshot {
            id: record.id,
            order_number: record.order_number,
            status: record.status,
            payment_status: record.payment_status,
            total: parse_amount("total", &record.total)?,
        }))
    }
}
