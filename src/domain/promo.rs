use bigdecimal::BigDecimal;

use super::cart::CartItem;

/// A single promotion: a code granting `percent_off` on the line subtotal of
/// items whose name matches `item_filter` (case-insensitive substring), or of
/// every line when the filter is `None`.
///
/// Promotions are data, not branches: adding a code means adding a rule to
/// the registry, not a new `if` at the call site.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoRule {
    pub code: String,
    pub item_filter: Option<String>,
    pub percent_off: u32,
}

impl PromoRule {
    pub fn matches_item(&self, item: &CartItem) -> bool {
        match &self.item_filter {
            Some(filter) => item.name.to_lowercase().contains(&filter.to_lowercase()),
            None => true,
        }
    }

    /// Discount amount for the given lines, exact.
    pub fn discount_for(&self, items: &[CartItem]) -> BigDecimal {
        let eligible: BigDecimal = items
            .iter()
            .filter(|i| self.matches_item(i))
            .map(CartItem::line_subtotal)
            .sum();
        eligible * BigDecimal::from(self.percent_off) / BigDecimal::from(100)
    }
}

/// The promo code registry: a pure lookup from user-entered code to rule.
#[derive(Debug, Clone, Default)]
pub struct PromoRegistry {
    rules: Vec<PromoRule>,
}

impl PromoRegistry {
    pub fn new(rules: Vec<PromoRule>) -> Self {
        Self { rules }
    }

    /// The stock rule set: PASTA20 grants 20% off pasta items.
    pub fn standard() -> Self {
        Self::new(vec![PromoRule {
            code: "PASTA20".to_string(),
            item_filter: Some("pasta".to_string()),
            percent_off: 20,
        }])
    }

    /// Case-insensitive code lookup.
    pub fn lookup(&self, code: &str) -> Option<&PromoRule> {
        self.rules.iter().find(|r| r.code.eq_ignore_ascii_case(code))
    }
}

/// Outcome of promo code resolution, carried on the pricing result so the UI
/// can distinguish "no code entered" from "code entered but not recognized".
#[derive(Debug, Clone, PartialEq)]
pub enum PromoStatus {
    NotEntered,
    Invalid { code: String },
    Applied { code: String },
}

impl PromoStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, PromoStatus::Applied { .. })
    }
}
