//! Checkout form and field validation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// Shipped to an address.
    #[default]
    Delivery,
    /// Collected from a store.
    Pickup,
}

impl DeliveryMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            DeliveryMethod::Delivery => "Delivery",
            DeliveryMethod::Pickup => "Pickup in store",
        }
    }
}

/// Store a pickup order is collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PickupLocation {
    #[default]
    MainStore,
    MallBranch,
}

impl PickupLocation {
    pub const ALL: [PickupLocation; 2] = [PickupLocation::MainStore, PickupLocation::MallBranch];

    pub fn name(&self) -> &'static str {
        match self {
            PickupLocation::MainStore => "Muno Journey Main Store",
            PickupLocation::MallBranch => "Acacia Mall Branch",
        }
    }

    pub fn address(&self) -> &'static str {
        match self {
            PickupLocation::MainStore => "Kampala Road, City Center",
            PickupLocation::MallBranch => "Kisementi, Kampala",
        }
    }
}

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Email,
    LastName,
    Address,
    City,
    PickupLocation,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Email => "Email",
            FormField::LastName => "Last name",
            FormField::Address => "Address",
            FormField::City => "City",
            FormField::PickupLocation => "Pickup location",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One failed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    /// "<Field> is required".
    pub fn required(field: FormField) -> Self {
        Self {
            field,
            message: format!("{} is required", field.label()),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Contact and shipping details collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckoutForm {
    pub email: String,
    pub phone_number: String,
    pub newsletter: bool,
    pub delivery_method: DeliveryMethod,
    pub country: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub apartment: Option<String>,
    pub city: String,
    pub special_instructions: Option<String>,
    pub pickup_location: Option<PickupLocation>,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            phone_number: String::new(),
            newsletter: false,
            delivery_method: DeliveryMethod::default(),
            country: "Uganda".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            apartment: None,
            city: String::new(),
            special_instructions: None,
            pickup_location: Some(PickupLocation::default()),
        }
    }
}

impl CheckoutForm {
    /// Fields the given method requires.
    pub fn required_fields(method: DeliveryMethod) -> &'static [FormField] {
        match method {
            DeliveryMethod::Delivery => &[
                FormField::Email,
                FormField::LastName,
                FormField::Address,
                FormField::City,
            ],
            DeliveryMethod::Pickup => &[FormField::Email, FormField::PickupLocation],
        }
    }

    /// Every missing required field, in form order.
    pub fn validate(&self) -> Vec<FieldError> {
        Self::required_fields(self.delivery_method)
            .iter()
            .filter(|field| !self.is_filled(**field))
            .map(|field| FieldError::required(*field))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    fn is_filled(&self, field: FormField) -> bool {
        match field {
            FormField::Email => !self.email.trim().is_empty(),
            FormField::LastName => !self.last_name.trim().is_empty(),
            FormField::Address => !self.address.trim().is_empty(),
            FormField::City => !self.city.trim().is_empty(),
            FormField::PickupLocation => self.pickup_location.is_some(),
        }
    }
}
