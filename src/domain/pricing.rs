use bigdecimal::{BigDecimal, RoundingMode, Zero};

use super::cart::CartItem;
use super::promo::{PromoRegistry, PromoStatus};

/// Sales tax rate as a percentage. A single constant; call sites never carry
/// their own rate.
pub const TAX_RATE_PERCENT: u32 = 8;

/// Scale used when rounding amounts for display or the wire.
const DISPLAY_SCALE: i64 = 2;

fn tax_rate() -> BigDecimal {
    BigDecimal::from(TAX_RATE_PERCENT) / BigDecimal::from(100)
}

/// Derived totals for a set of cart lines. Computed fresh on demand, never
/// stored alongside the cart.
///
/// Amounts are exact decimals; rounding happens only in [`rounded`], at the
/// final display step, so intermediate values never compound rounding error.
///
/// [`rounded`]: PricingResult::rounded
#[derive(Debug, Clone, PartialEq)]
pub struct PricingResult {
    pub subtotal: BigDecimal,
    pub tax: BigDecimal,
    pub discount: BigDecimal,
    pub total: BigDecimal,
    pub promo: PromoStatus,
}

impl PricingResult {
    pub fn zero() -> Self {
        Self {
            subtotal: BigDecimal::zero(),
            tax: BigDecimal::zero(),
            discount: BigDecimal::zero(),
            total: BigDecimal::zero(),
            promo: PromoStatus::NotEntered,
        }
    }

    /// The same totals with every amount rounded half-up to two decimal
    /// places, for display.
    pub fn rounded(&self) -> Self {
        let round = |v: &BigDecimal| v.with_scale_round(DISPLAY_SCALE, RoundingMode::HalfUp);
        Self {
            subtotal: round(&self.subtotal),
            tax: round(&self.tax),
            discount: round(&self.discount),
            total: round(&self.total),
            promo: self.promo.clone(),
        }
    }
}

/// Pure pricing calculation.
///
/// - subtotal: Σ `(unit_price + modifier deltas) × quantity`, exact.
/// - tax: subtotal × 8%.
/// - discount: per the promo rule matched by `promo_code`; zero when the
///   code is absent or unrecognized. An unrecognized code is reported as
///   [`PromoStatus::Invalid`], distinguishable from no code at all.
/// - total: `subtotal + tax − discount`, clamped at zero.
///
/// An empty cart yields all-zero amounts, not an error.
pub fn compute_totals(
    items: &[CartItem],
    promo_code: Option<&str>,
    promos: &PromoRegistry,
) -> PricingResult {
    let subtotal: BigDecimal = items.iter().map(CartItem::line_subtotal).sum();
    let tax = &subtotal * tax_rate();

    let (discount, promo) = match promo_code.map(str::trim).filter(|c| !c.is_empty()) {
        None => (BigDecimal::zero(), PromoStatus::NotEntered),
        Some(code) => match promos.lookup(code) {
            Some(rule) => (
                rule.discount_for(items),
                PromoStatus::Applied { code: rule.code.clone() },
            ),
            None => (
                BigDecimal::zero(),
                PromoStatus::Invalid { code: code.to_string() },
            ),
        },
    };

    let mut total = &subtotal + &tax - &discount;
    if total < BigDecimal::zero() {
        total = BigDecimal::zero();
    }

    PricingResult { subtotal, tax, discount, total, promo }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::str::FromStr;

    use super::*;
    use crate::domain::cart::ModifierChoice;
    use crate::domain::promo::PromoRule;

    fn line(name: &str, price: &str, quantity: i32) -> CartItem {
        CartItem {
            id: name.to_lowercase().replace(' ', "_"),
            name: name.to_string(),
            unit_price: BigDecimal::from_str(price).expect("valid decimal"),
            quantity,
            modifiers: BTreeMap::new(),
        }
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn empty_cart_prices_to_zero() {
        let totals = compute_totals(&[], None, &PromoRegistry::standard());
        assert_eq!(totals, PricingResult::zero());
    }

    #[test]
    fn empty_code_counts_as_not_entered() {
        let totals = compute_totals(&[], Some("  "), &PromoRegistry::standard());
        assert_eq!(totals.promo, PromoStatus::NotEntered);
    }

    #[test]
    fn subtotal_tax_and_total_without_promo() {
        let items = vec![line("Burger", "10", 2), line("Fries", "5", 1)];
        let totals = compute_totals(&items, None, &PromoRegistry::standard());

        assert_eq!(totals.subtotal, dec("25"));
        assert_eq!(totals.tax, dec("2.00"));
        assert_eq!(totals.discount, dec("0"));
        assert_eq!(totals.total, dec("27.00"));
        assert_eq!(totals.promo, PromoStatus::NotEntered);
    }

    #[test]
    fn modifier_deltas_count_toward_subtotal() {
        let mut item = line("Burger", "10.00", 2);
        item.modifiers.insert(
            "Extra".to_string(),
            ModifierChoice { name: "Cheese".to_string(), price_delta: dec("1.50") },
        );
        let totals = compute_totals(&[item], None, &PromoRegistry::standard());

        // (10.00 + 1.50) × 2 = 23.00
        assert_eq!(totals.subtotal, dec("23.00"));
    }

    #[test]
    fn pasta_promo_discounts_only_pasta_lines() {
        let items = vec![
            line("Penne Pasta", "13.99", 1),
            line("Margherita Pizza", "16.99", 1),
        ];
        let totals = compute_totals(&items, Some("PASTA20"), &PromoRegistry::standard());

        assert_eq!(totals.discount, dec("2.798"));
        assert_eq!(
            totals.promo,
            PromoStatus::Applied { code: "PASTA20".to_string() }
        );
        // 30.98 + 2.4784 − 2.798
        assert_eq!(totals.total, dec("30.6604"));
    }

    #[test]
    fn unrecognized_code_is_invalid_with_zero_discount() {
        let items = vec![line("Penne Pasta", "13.99", 1)];
        let totals = compute_totals(&items, Some("BOGUS50"), &PromoRegistry::standard());

        assert!(totals.discount.is_zero());
        assert_eq!(
            totals.promo,
            PromoStatus::Invalid { code: "BOGUS50".to_string() }
        );
    }

    #[test]
    fn total_clamps_at_zero_when_discount_exceeds_subtotal_and_tax() {
        let promos = PromoRegistry::new(vec![PromoRule {
            code: "EVERYTHING200".to_string(),
            item_filter: None,
            percent_off: 200,
        }]);
        let items = vec![line("Espresso", "3.00", 1)];
        let totals = compute_totals(&items, Some("EVERYTHING200"), &promos);

        assert_eq!(totals.discount, dec("6.00"));
        assert!(totals.total.is_zero());
    }

    #[test]
    fn rounded_rounds_half_up_to_cents() {
        let items = vec![
            line("Penne Pasta", "13.99", 1),
            line("Margherita Pizza", "16.99", 1),
        ];
        let rounded = compute_totals(&items, Some("PASTA20"), &PromoRegistry::standard()).rounded();

        assert_eq!(rounded.subtotal, dec("30.98"));
        assert_eq!(rounded.tax, dec("2.48"));
        assert_eq!(rounded.discount, dec("2.80"));
        assert_eq!(rounded.total, dec("30.66"));
    }
}
