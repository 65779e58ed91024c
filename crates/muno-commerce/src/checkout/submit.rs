//! Simulated order submission.

use crate::checkout::{CheckoutForm, OrderSummary, PricingBreakdown};
use crate::ids::OrderId;
use crate::latency::Delay;
use crate::CheckoutError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Default simulated submission latency.
pub const SUBMIT_LATENCY: Duration = Duration::from_millis(1500);
/// Page shown after a successful order.
pub const SUCCESS_PATH: &str = "/checkout/success";

/// What a successful submission hands to the success page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub form: CheckoutForm,
    pub pricing: PricingBreakdown,
    pub redirect_to: String,
}

/// Validate, wait out the simulated round trip, and confirm. Nothing leaves the process.
pub async fn submit(
    form: &CheckoutForm,
    summary: &OrderSummary,
    delay: &dyn Delay,
    latency: Duration,
) -> Result<OrderConfirmation, CheckoutError> {
    if summary.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(CheckoutError::Invalid(errors));
    }

    delay.wait(latency).await;

    let confirmation = OrderConfirmation {
        order_id: OrderId::generate(),
        form: form.clone(),
        pricing: summary.pricing(),
        redirect_to: SUCCESS_PATH.to_string(),
    };
    info!(
        order_id = %confirmation.order_id,
        delivery = ?form.delivery_method,
        total = %confirmation.pricing.total,
        "Order submitted"
    );
    Ok(confirmation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{DeliveryMethod, FormField};
    use crate::latency::RecordingDelay;
    use futures::executor::block_on;

    fn pickup_form() -> CheckoutForm {
        CheckoutForm {
            email: "grace@example.com".to_string(),
            delivery_method: DeliveryMethod::Pickup,
            ..CheckoutForm::default()
        }
    }

    #[test]
    fn test_submit_waits_and_confirms() {
        let delay = RecordingDelay::new();
        let confirmation = block_on(submit(
            &pickup_form(),
            &OrderSummary::sample(),
            &delay,
            SUBMIT_LATENCY,
        ))
        .unwrap();

        assert_eq!(delay.recorded(), vec![Duration::from_millis(1500)]);
        assert_eq!(confirmation.redirect_to, "/checkout/success");
        assert_eq!(confirmation.pricing.total.amount, 140_000);
    }

    #[test]
    fn test_invalid_form_skips_delay() {
        let delay = RecordingDelay::new();
        let err = block_on(submit(
            &CheckoutForm::default(),
            &OrderSummary::sample(),
            &delay,
            SUBMIT_LATENCY,
        ))
        .unwrap_err();

        let CheckoutError::Invalid(errors) = err else {
            panic!("expected field errors");
        };
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0].field, FormField::Email);
        assert!(delay.recorded().is_empty());
    }

    #[test]
    fn test_empty_cart_rejected() {
        let delay = RecordingDelay::new();
        let err = block_on(submit(
            &pickup_form(),
            &OrderSummary::default(),
            &delay,
            SUBMIT_LATENCY,
        ))
        .unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }
}
