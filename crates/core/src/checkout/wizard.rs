//! The two-step checkout wizard as an explicit state machine.
//!
//! State lives in [`CheckoutState`]; the UI layer feeds it
//! [`CheckoutEvent`]s through [`CheckoutState::apply`] and renders the
//! [`Outcome`]. Validation failures come back as structured
//! [`FieldErrors`] so the presentation layer decides how to surface them
//! (inline messages, not blocking alerts).
//!
//! Moving back from Payment to Shipping never loses data: card fields
//! entered so far survive on the state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::checkout::format::{
    CVV_MAX_LEN, EXPIRY_MAX_LEN, card_digit_count, format_card_number, format_cvv, format_expiry,
};
use crate::checkout::pricing::{LineItem, PaymentMethod, Totals, quote};
use crate::types::Email;

/// Minimum digits for a plausible card number (shortest valid PAN).
const CARD_MIN_DIGITS: usize = 13;

/// Minimum CVV digits.
const CVV_MIN_LEN: usize = 3;

/// Per-field validation errors, keyed by the form field name.
///
/// Ordered so errors render in a stable field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// No errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field, keeping the first one reported.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// The error message for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether validation passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Customer shipping details collected on the first step.
///
/// All fields except `phone` are required non-empty after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl ShippingDetails {
    /// Validate the shipping step.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        let required: [(&'static str, &str, &str); 7] = [
            ("first_name", &self.first_name, "First name is required"),
            ("last_name", &self.last_name, "Last name is required"),
            ("address", &self.address, "Street address is required"),
            ("city", &self.city, "City is required"),
            ("state", &self.state, "State is required"),
            ("zip", &self.zip, "ZIP code is required"),
            ("country", &self.country, "Country is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.insert(field, message);
            }
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("email", "Email is required");
        } else if Email::parse(email).is_err() {
            errors.insert("email", "Enter a valid email address");
        }

        // phone is optional: no check

        errors
    }

    /// Trim whitespace from every field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            zip: self.zip.trim().to_owned(),
            country: self.country.trim().to_owned(),
        }
    }
}

/// Card fields collected on the payment step.
///
/// Only validated when the selected method is [`PaymentMethod::Card`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// Masked and grouped in 4s, at most 19 characters.
    pub card_number: String,
    /// "MM/YY", at most 5 characters.
    pub expiry_date: String,
    /// Digits only, at most 4 characters.
    pub cvv: String,
    /// Name as printed on the card.
    pub card_name: String,
}

impl CardDetails {
    /// Run every field through its formatter.
    ///
    /// Handlers call this on raw posted values so the state only ever
    /// holds formatted input.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            card_number: format_card_number(&self.card_number),
            expiry_date: format_expiry(&self.expiry_date),
            cvv: format_cvv(&self.cvv),
            card_name: self.card_name.trim().to_owned(),
        }
    }

    /// Validate the card fields (assumes the value is already normalized).
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if card_digit_count(&self.card_number) < CARD_MIN_DIGITS {
            errors.insert("card_number", "Enter a valid card number");
        }
        if self.expiry_date.len() != EXPIRY_MAX_LEN {
            errors.insert("expiry_date", "Enter expiry as MM/YY");
        }
        if self.cvv.len() < CVV_MIN_LEN || self.cvv.len() > CVV_MAX_LEN {
            errors.insert("cvv", "Enter the 3 or 4 digit security code");
        }
        if self.card_name.trim().is_empty() {
            errors.insert("card_name", "Name on card is required");
        }

        errors
    }
}

/// Which step of the wizard the customer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Payment,
}

/// The full wizard state, serialized into the session between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutState {
    pub step: CheckoutStep,
    pub shipping: ShippingDetails,
    pub card: CardDetails,
    pub method: PaymentMethod,
}

/// Events the UI layer can feed into the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutEvent {
    /// Submit the shipping form and try to advance to Payment.
    SubmitShipping(ShippingDetails),
    /// Return from Payment to Shipping. Always permitted; card fields
    /// are preserved.
    Back,
    /// Record the selected payment method.
    SelectMethod(PaymentMethod),
    /// Submit the payment form and try to place the order.
    SubmitPayment(CardDetails),
}

/// Everything the order submission collaborator needs: shipping, method,
/// and the derived totals. Card data is deliberately absent - it never
/// leaves the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub shipping: ShippingDetails,
    pub method: PaymentMethod,
    pub totals: Totals,
}

/// Result of applying one event to the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The transition was accepted; render the new state.
    Advanced(CheckoutState),
    /// Validation rejected the transition; the step does not change and
    /// the errors describe which fields to fix.
    Rejected {
        state: CheckoutState,
        errors: FieldErrors,
    },
    /// The terminal transition succeeded; hand the draft to the order
    /// submission collaborator.
    Submitted(OrderDraft),
}

impl CheckoutState {
    /// Start a fresh wizard on the shipping step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event to the wizard.
    ///
    /// `lines` are the current cart lines; they are only consulted by the
    /// terminal transition, which prices the order at submit time.
    #[must_use]
    pub fn apply(mut self, event: CheckoutEvent, lines: &[LineItem]) -> Outcome {
        match event {
            CheckoutEvent::SubmitShipping(details) => {
                let details = details.trimmed();
                let errors = details.validate();
                self.shipping = details;
                if errors.is_empty() {
                    self.step = CheckoutStep::Payment;
                    Outcome::Advanced(self)
                } else {
                    self.step = CheckoutStep::Shipping;
                    Outcome::Rejected {
                        state: self,
                        errors,
                    }
                }
            }
            CheckoutEvent::Back => {
                self.step = CheckoutStep::Shipping;
                Outcome::Advanced(self)
            }
            CheckoutEvent::SelectMethod(method) => {
                self.method = method;
                Outcome::Advanced(self)
            }
            CheckoutEvent::SubmitPayment(card) => {
                let card = card.normalized();
                self.card = card;

                if self.step != CheckoutStep::Payment {
                    let mut errors = FieldErrors::new();
                    errors.insert("step", "Complete shipping details first");
                    return Outcome::Rejected {
                        state: self,
                        errors,
                    };
                }

                let errors = if self.method == PaymentMethod::Card {
                    self.card.validate()
                } else {
                    FieldErrors::new()
                };

                if errors.is_empty() {
                    let totals = quote(lines, self.method);
                    Outcome::Submitted(OrderDraft {
                        shipping: self.shipping,
                        method: self.method,
                        totals,
                    })
                } else {
                    Outcome::Rejected {
                        state: self,
                        errors,
                    }
                }
            }
        }
    }
}
