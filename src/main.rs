//! Smoke binary: submits one sample order against the configured endpoint.
//!
//!   ORDER_API_URL=http://localhost:8090 \
//!     RESTAURANT_ID=rest_1 TABLE_ID=table_1 cargo run

use std::collections::BTreeMap;
use std::env;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Mutex;

use bigdecimal::BigDecimal;
use dotenvy::dotenv;
use table_order::{
    Cart, CartItem, CheckoutFlow, DiningSession, OrderApiConfig, OrderGateway, OrderType,
    PocketBaseOrderGateway, PromoRegistry,
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = OrderApiConfig::from_env();
    let restaurant_id = env::var("RESTAURANT_ID").expect("RESTAURANT_ID must be set");
    let table_id = env::var("TABLE_ID").expect("TABLE_ID must be set");
    let table_number = env::var("TABLE_NUMBER").unwrap_or_else(|_| "1".to_string());

    let gateway = match PocketBaseOrderGateway::new(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            log::error!("Failed to build order gateway: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let session = DiningSession::start(restaurant_id, table_id, table_number);
    log::info!("Started session {} against {}", session.session_id, config.base_url);

    let flow = CheckoutFlow::new(
        gateway,
        session,
        PromoRegistry::standard(),
        config.request_timeout,
    );

    let cart = Mutex::new(Cart::new());
    cart.lock().expect("cart lock poisoned").add_item(
        CartItem {
            id: "smoke_item".to_string(),
            name: "Penne Pasta".to_string(),
            unit_price: BigDecimal::from_str("13.99").expect("valid decimal"),
            quantity: 1,
            modifiers: BTreeMap::new(),
        },
        1,
    );

    let receipt = match flow
        .checkout(&cart, OrderType::DineIn, Some("PASTA20"), "smoke test order")
        .await
    {
        Ok(receipt) => receipt,
        Err(e) => {
            log::error!("Checkout failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Created order {} ({})", receipt.order_number, receipt.id);

    match flow.gateway().fetch_order(&receipt.id).await {
        Ok(Some(order)) => {
            log::info!(
                "Order {} is {} (payment {}), total {}",
                order.order_number,
                order.status,
                order.payment_status,
                order.total
            );
            ExitCode::SUCCESS
        }
        Ok(None) => {
            log::error!("Order {} vanished after creation", receipt.id);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("Failed to fetch order back: {}", e);
            ExitCode::FAILURE
        }
    }
}
