pub mod cart;
pub mod errors;
pub mod menu;
pub mod order;
pub mod ports;
pub mod pricing;
pub mod promo;
pub mod session;
