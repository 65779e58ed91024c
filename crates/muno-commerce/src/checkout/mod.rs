//! Checkout module.
//!
//! Contains the checkout form, the order summary, and simulated submission.

mod form;
mod submit;
mod summary;

pub use form::{CheckoutForm, DeliveryMethod, FieldError, FormField, PickupLocation};
pub use submit::{submit, OrderConfirmation, SUBMIT_LATENCY, SUCCESS_PATH};
pub use summary::{
    LineItem, OrderSummary, PricingBreakdown, FLAT_SHIPPING, PROMO_CODE, PROMO_PERCENT,
};
