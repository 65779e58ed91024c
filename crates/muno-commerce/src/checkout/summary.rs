//! Order summary: line items, shipping, promo code, totals.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::CheckoutError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Flat shipping fee.
pub const FLAT_SHIPPING: u64 = 15_000;
/// The one promo code the shop honors.
pub const PROMO_CODE: &str = "WELCOME10";
/// Percent off the subtotal under the promo code.
pub const PROMO_PERCENT: u32 = 10;

/// A product and quantity in the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    /// Price per unit in whole currency units.
    pub unit_price: u64,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

impl LineItem {
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: u64,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity,
            image: None,
        }
    }

    /// Line for `quantity` of a catalog product.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            image: product.image.clone(),
        }
    }

    /// `unit_price * quantity` in `currency`.
    pub fn line_total(&self, currency: Currency) -> Money {
        Money::from_units(self.unit_price, currency).multiply(i64::from(self.quantity))
    }
}

/// Totals shown in the summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub subtotal: Money,
    pub shipping: Money,
    pub discount: Money,
    /// subtotal + shipping - discount.
    pub total: Money,
    pub promo_code: Option<String>,
}

impl PricingBreakdown {
    pub fn has_discount(&self) -> bool {
        !self.discount.is_zero()
    }
}

/// Items being bought plus the applied promo code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    promo_code: Option<String>,
}

impl Default for OrderSummary {
    fn default() -> Self {
        Self::new(Vec::new(), Currency::default())
    }
}

impl OrderSummary {
    pub fn new(items: Vec<LineItem>, currency: Currency) -> Self {
        Self {
            items,
            currency,
            promo_code: None,
        }
    }

    /// The demo cart shown on the checkout page.
    pub fn sample() -> Self {
        let mut gift_box = LineItem::new("1", "Personalized Gift Box", 85_000, 1);
        gift_box.image = Some("/products/gift-box-1.jpg".to_string());
        let mut candles = LineItem::new("2", "Artisan Candle Set", 40_000, 1);
        candles.image = Some("/products/candle-set-1.jpg".to_string());
        Self::new(vec![gift_box, candles], Currency::UGX)
    }

    pub fn add_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.iter().all(|item| item.quantity == 0)
    }

    /// Total units across lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Apply a promo code (case-insensitive). Only one code can be applied.
    pub fn apply_promo(&mut self, code: &str) -> Result<(), CheckoutError> {
        if self.promo_code.is_some() {
            return Err(CheckoutError::PromoAlreadyApplied);
        }
        let code = code.trim();
        if !code.eq_ignore_ascii_case(PROMO_CODE) {
            return Err(CheckoutError::InvalidPromoCode(code.to_string()));
        }
        self.promo_code = Some(PROMO_CODE.to_string());
        debug!(code = PROMO_CODE, "Promo code applied");
        Ok(())
    }

    /// Drop the applied promo code. Returns whether one was applied.
    pub fn remove_promo(&mut self) -> bool {
        self.promo_code.take().is_some()
    }

    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }

    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .map(|item| item.line_total(self.currency))
            .fold(Money::zero(self.currency), |sum, line| sum.saturating_add(line))
    }

    pub fn shipping(&self) -> Money {
        Money::from_units(FLAT_SHIPPING, self.currency)
    }

    /// Promo discount, rounded to the nearest unit.
    pub fn discount(&self) -> Money {
        if self.promo_code.is_none() {
            return Money::zero(self.currency);
        }
        self.subtotal().percentage(PROMO_PERCENT)
    }

    pub fn total(&self) -> Money {
        self.subtotal()
            .saturating_add(self.shipping())
            .saturating_sub(self.discount())
    }

    /// All totals in one breakdown.
    pub fn pricing(&self) -> PricingBreakdown {
        PricingBreakdown {
            subtotal: self.subtotal(),
            shipping: self.shipping(),
            discount: self.discount(),
            total: self.total(),
            promo_code: self.promo_code.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_totals() {
        let summary = OrderSummary::sample();
        assert_eq!(summary.subtotal().amount, 125_000);
        assert_eq!(summary.shipping().amount, 15_000);
        assert_eq!(summary.discount().amount, 0);
        assert_eq!(summary.total().amount, 140_000);
        assert_eq!(summary.item_count(), 2);
    }

    #[test]
    fn test_promo_case_insensitive() {
        let mut summary = OrderSummary::sample();
        summary.apply_promo(" welcome10 ").unwrap();
        assert_eq!(summary.promo_code(), Some("WELCOME10"));
        assert_eq!(summary.discount().amount, 12_500);
        assert_eq!(summary.total().amount, 127_500);

        let pricing = summary.pricing();
        assert!(pricing.has_discount());
        assert_eq!(pricing.total.display(), "UGX 127,500");
    }

    #[test]
    fn test_invalid_promo_blocks() {
        let mut summary = OrderSummary::sample();
        assert_eq!(
            summary.apply_promo("SAVE50"),
            Err(CheckoutError::InvalidPromoCode("SAVE50".to_string()))
        );
        assert_eq!(summary.promo_code(), None);
    }

    #[test]
    fn test_promo_only_once() {
        let mut summary = OrderSummary::sample();
        summary.apply_promo("WELCOME10").unwrap();
        assert_eq!(
            summary.apply_promo("WELCOME10"),
            Err(CheckoutError::PromoAlreadyApplied)
        );
        assert!(summary.remove_promo());
        assert_eq!(summary.discount().amount, 0);
    }

    #[test]
    fn test_discount_rounds_half_up() {
        let mut summary = OrderSummary::new(vec![LineItem::new("x", "Card", 12_345, 1)], Currency::UGX);
        summary.apply_promo("WELCOME10").unwrap();
        assert_eq!(summary.discount().amount, 1_235);
    }

    #[test]
    fn test_quantities_multiply() {
        let summary = OrderSummary::new(vec![LineItem::new("x", "Bookmarks", 7_500, 4)], Currency::UGX);
        assert_eq!(summary.subtotal().amount, 30_000);
        assert!(!summary.is_empty());
        assert!(OrderSummary::default().is_empty());
    }

    #[test]
    fn test_large_prices_saturate() {
        let mut summary =
            OrderSummary::new(vec![LineItem::new("x", "Big", u64::MAX / 5, 1)], Currency::UGX);
        summary.apply_promo("WELCOME10").unwrap();
        assert_eq!(summary.subtotal().amount, 3_689_348_814_741_910_323);
        assert_eq!(summary.discount().amount, 368_934_881_474_191_032);
        assert_eq!(summary.total().amount, 3_320_413_933_267_734_291);

        let summary = OrderSummary::new(
            vec![
                LineItem::new("a", "Huge", u64::MAX, 1),
                LineItem::new("b", "Tiny", 1, 1),
            ],
            Currency::UGX,
        );
        assert_eq!(summary.subtotal().amount, i64::MAX);
        assert_eq!(summary.total().amount, i64::MAX);
        assert_eq!(
            LineItem::new("c", "Many", u64::MAX, u32::MAX).line_total(Currency::UGX).amount,
            i64::MAX
        );
    }
}
