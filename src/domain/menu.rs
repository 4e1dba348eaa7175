use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::cart::ModifierChoice;

/// A group of modifier options for a menu item, e.g. "Size" with
/// "Regular" / "Large".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierGroup {
    pub name: String,
    pub options: Vec<ModifierChoice>,
}

/// A menu item as supplied by the menu data provider.
///
/// The cart copies `id`, `name`, and the effective price at add-time; it does
/// not subscribe to price changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: BigDecimal,
    pub discount_price: Option<BigDecimal>,
    #[serde(default)]
    pub modifier_groups: Vec<ModifierGroup>,
}

impl MenuItem {
    /// The price a diner pays per unit: the discount price when one exists,
    /// else the base price.
    pub fn effective_price(&self) -> &BigDecimal {
        self.discount_price.as_ref().unwrap_or(&self.price)
    }
}
