//! Checkout: collect the form, show the order summary, place the order.

use anyhow::{bail, Context as _, Result};
use chrono::Local;
use dialoguer::{Confirm, Input, Select};
use muno_commerce::checkout::{
    submit, CheckoutForm, DeliveryMethod, LineItem, OrderConfirmation, OrderSummary,
    PickupLocation,
};
use muno_commerce::CheckoutError;
use serde::Serialize;

use super::CheckoutArgs;
use crate::context::Context;
use crate::delay::TokioDelay;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let logger = ctx.logger.for_view("checkout");

    let mut summary = build_summary(&args.products, ctx)?;
    if let Some(code) = &args.promo {
        match summary.apply_promo(code) {
            Ok(()) => ctx.output.success(&format!("Promo code {} applied", code.trim())),
            Err(e) => {
                logger.warn_builder("Promo rejected").field("code", code.as_str()).emit();
                ctx.output.warn(&e.to_string());
            }
        }
    }

    let form = match &args.form {
        Some(path) => load_form(&ctx.resolve_path(path).to_string_lossy())?,
        None => prompt_form()?,
    };

    print_summary(&summary, ctx);
    logger
        .info_builder("Checkout form submitted")
        .field_json("form", &form)
        .emit();

    let spinner = ctx.output.spinner("Placing order...");
    let result = submit(&form, &summary, &TokioDelay, ctx.config.checkout_latency()).await;
    spinner.finish_and_clear();

    let confirmation = match result {
        Ok(confirmation) => confirmation,
        Err(CheckoutError::Invalid(errors)) => {
            logger
                .warn_builder("Checkout rejected")
                .field_json("errors", &errors)
                .emit();
            if !ctx.output.is_json() {
                ctx.output.header("Please fix the following");
                for error in &errors {
                    ctx.output.list_item(&error.message);
                }
            }
            return Err(CheckoutError::Invalid(errors).into());
        }
        Err(e) => return Err(e.into()),
    };

    logger
        .info_builder("Order confirmed")
        .field("order_id", confirmation.order_id.as_str())
        .field_json("pricing", &confirmation.pricing)
        .emit();
    print_confirmation(&confirmation, ctx);

    Ok(())
}

/// The demo cart, or one unit of each requested catalog product.
fn build_summary(product_ids: &[String], ctx: &Context) -> Result<OrderSummary> {
    if product_ids.is_empty() {
        return Ok(OrderSummary::sample());
    }

    let catalog = ctx.config.generator()?.generate(ctx.config.catalog.size);
    let currency = catalog.first().map(|p| p.currency).unwrap_or_default();
    let mut summary = OrderSummary::new(Vec::new(), currency);
    for id in product_ids {
        let Some(product) = catalog.iter().find(|p| p.id.as_str() == id.trim()) else {
            bail!("No product '{}' in the catalog", id);
        };
        if !product.in_stock {
            bail!("{} is out of stock", product.name);
        }
        summary.add_item(LineItem::from_product(product, 1));
    }
    Ok(summary)
}

fn load_form(path: &str) -> Result<CheckoutForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read checkout form: {}", path))?;

    if path.ends_with(".json") {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON form: {}", path))
    } else {
        toml::from_str(&content).with_context(|| format!("Failed to parse TOML form: {}", path))
    }
}

fn prompt_form() -> Result<CheckoutForm> {
    let mut form = CheckoutForm {
        email: text("Email")?,
        phone_number: text("Phone number")?,
        newsletter: Confirm::new()
            .with_prompt("Email me with news and offers")
            .default(false)
            .interact()?,
        ..CheckoutForm::default()
    };

    let methods = [DeliveryMethod::Delivery, DeliveryMethod::Pickup];
    let labels: Vec<&str> = methods.iter().map(|m| m.display_name()).collect();
    form.delivery_method = methods[Select::new()
        .with_prompt("Delivery method")
        .items(&labels)
        .default(0)
        .interact()?];

    match form.delivery_method {
        DeliveryMethod::Delivery => {
            form.first_name = text("First name (optional)")?;
            form.last_name = text("Last name")?;
            form.address = text("Address")?;
            form.apartment = optional_text("Apartment, suite, etc. (optional)")?;
            form.city = text("City")?;
            form.special_instructions = optional_text("Special instructions (optional)")?;
        }
        DeliveryMethod::Pickup => {
            let labels: Vec<String> = PickupLocation::ALL
                .iter()
                .map(|l| format!("{} ({})", l.name(), l.address()))
                .collect();
            let choice = Select::new()
                .with_prompt("Pickup location")
                .items(&labels)
                .default(0)
                .interact()?;
            form.pickup_location = Some(PickupLocation::ALL[choice]);
        }
    }

    Ok(form)
}

fn text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

fn optional_text(prompt: &str) -> Result<Option<String>> {
    let value = text(prompt)?;
    Ok((!value.trim().is_empty()).then_some(value))
}

fn print_summary(summary: &OrderSummary, ctx: &Context) {
    if ctx.output.is_json() {
        return;
    }
    ctx.output.header("Order summary");
    for item in &summary.items {
        ctx.output.table_row(
            &[
                &item.name,
                &format!("x{}", item.quantity),
                &item.line_total(summary.currency).display(),
            ],
            &[32, 4, 14],
        );
    }

    let pricing = summary.pricing();
    ctx.output.info("");
    ctx.output.kv("Subtotal", &pricing.subtotal.display());
    ctx.output.kv("Shipping", &pricing.shipping.display());
    if pricing.has_discount() {
        let code = pricing.promo_code.as_deref().unwrap_or_default();
        ctx.output.kv(
            &format!("Discount ({})", code),
            &format!("-{}", pricing.discount.display()),
        );
    }
    ctx.output.kv("Total", &pricing.total.display());
}

#[derive(Serialize)]
struct Receipt<'a> {
    #[serde(flatten)]
    confirmation: &'a OrderConfirmation,
    placed_at: String,
}

fn print_confirmation(confirmation: &OrderConfirmation, ctx: &Context) {
    let placed_at = Local::now();

    if ctx.output.is_json() {
        ctx.output.json(&Receipt {
            confirmation,
            placed_at: placed_at.to_rfc3339(),
        });
        return;
    }

    ctx.output.info("");
    ctx.output.success("Order placed");
    ctx.output.kv("Order", confirmation.order_id.as_str());
    ctx.output
        .kv("Placed", &placed_at.format("%Y-%m-%d %H:%M").to_string());
    ctx.output.kv("Total", &confirmation.pricing.total.display());
    match confirmation.form.delivery_method {
        DeliveryMethod::Delivery => {
            let form = &confirmation.form;
            ctx.output
                .kv("Ship to", &format!("{}, {}, {}", form.address, form.city, form.country));
        }
        DeliveryMethod::Pickup => {
            if let Some(location) = confirmation.form.pickup_location {
                ctx.output.kv("Pick up at", location.name());
            }
        }
    }
    ctx.output.kv("Next", &confirmation.redirect_to);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_form_from_toml() {
        let form: CheckoutForm = toml::from_str(
            r#"
            email = "okello@example.com"
            deliveryMethod = "pickup"
            pickupLocation = "mall-branch"
            "#,
        )
        .unwrap();
        assert_eq!(form.delivery_method, DeliveryMethod::Pickup);
        assert_eq!(form.pickup_location, Some(PickupLocation::MallBranch));
        assert_eq!(form.country, "Uganda");
        assert!(form.is_valid());
    }

    #[test]
    fn test_delivery_form_missing_fields() {
        let form: CheckoutForm = toml::from_str("email = \"a@b.c\"\n").unwrap();
        let messages: Vec<String> = form.validate().into_iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            vec!["Last name is required", "Address is required", "City is required"]
        );
    }
}
