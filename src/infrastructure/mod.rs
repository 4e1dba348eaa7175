pub mod order_api;
