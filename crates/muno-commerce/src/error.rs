//! Commerce error types.

use crate::checkout::FieldError;
use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Price range with min above max.
    #[error("Invalid price range: min {min} exceeds max {max}")]
    InvalidPriceRange { min: u64, max: u64 },

    /// Finder wizard rejected an action.
    #[error(transparent)]
    Finder(#[from] FinderError),

    /// Checkout rejected the form or summary.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Actions a finder wizard refuses. The wizard state is unchanged after any of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FinderError {
    /// Next pressed while the current step's required answer is missing.
    #[error("Step {step} is missing a required answer")]
    StepIncomplete { step: u8 },

    /// Back pressed on the first step.
    #[error("Already on the first step")]
    NoPreviousStep,

    /// Cancel is only offered on the first step.
    #[error("Cancel is only available on step 1 (currently on step {step})")]
    CancelUnavailable { step: u8 },

    /// The wizard was already submitted or cancelled.
    #[error("Finder already finished")]
    AlreadyFinished,

    /// An answer arrived for a step other than the current one.
    #[error("Answer for step {expected} given while on step {actual}")]
    WrongStep { expected: u8, actual: u8 },

    /// The value is not offered on this step.
    #[error("'{value}' is not an option on step {step}")]
    InvalidChoice { step: u8, value: String },
}

/// Slug did not name a value of the vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown value '{0}'")]
pub struct UnknownSlug(pub String);

/// Checkout failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// One or more form fields failed validation.
    #[error("Checkout form has {} invalid field(s)", .0.len())]
    Invalid(Vec<FieldError>),

    /// Unknown promo code.
    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),

    /// A promo code was already applied to this summary.
    #[error("A promo code is already applied")]
    PromoAlreadyApplied,

    /// Nothing to check out.
    #[error("Cart is empty")]
    EmptyCart,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::FormField;

    #[test]
    fn test_invalid_form_message_counts_fields() {
        let err = CheckoutError::Invalid(vec![
            FieldError::required(FormField::Email),
            FieldError::required(FormField::City),
        ]);
        assert_eq!(err.to_string(), "Checkout form has 2 invalid field(s)");
    }

    #[test]
    fn test_finder_error_converts() {
        let err: CommerceError = FinderError::StepIncomplete { step: 2 }.into();
        assert_eq!(err.to_string(), "Step 2 is missing a required answer");
    }

    #[test]
    fn test_unknown_slug_from_parse() {
        let err = "diary".parse::<crate::catalog::Category>().unwrap_err();
        assert_eq!(err, UnknownSlug("diary".to_string()));
        assert_eq!(err.to_string(), "unknown value 'diary'");
        let _: &dyn std::error::Error = &err;
    }
}
