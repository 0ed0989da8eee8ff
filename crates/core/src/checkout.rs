//! Checkout form validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum length of the customer name.
const MIN_NAME_LEN: usize = 2;

/// Minimum length of the delivery address.
const MIN_ADDRESS_LEN: usize = 10;

/// Digits in a normalised Bangladeshi mobile number.
const PHONE_LEN: usize = 11;

/// How the customer pays for the order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pay the courier on delivery; the default.
    #[default]
    CashOnDelivery,

    /// bKash mobile wallet.
    Bkash,

    /// Nagad mobile wallet.
    Nagad,

    /// Rocket mobile wallet.
    Rocket,
}

impl PaymentMethod {
    /// Whether this method requires the wallet number and transaction id.
    #[must_use]
    pub fn is_digital(self) -> bool {
        self != Self::CashOnDelivery
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cash_on_delivery" => Ok(Self::CashOnDelivery),
            "bkash" => Ok(Self::Bkash),
            "nagad" => Ok(Self::Nagad),
            "rocket" => Ok(Self::Rocket),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

/// Everything the customer types into the checkout form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutForm {
    /// Customer's full name.
    pub customer_name: String,

    /// Customer's mobile number.
    pub customer_phone: String,

    /// Optional contact email.
    #[serde(default)]
    pub customer_email: String,

    /// Full delivery address.
    pub delivery_address: String,

    /// Area-selector value, e.g. `"inside-dhaka"`.
    pub delivery_area: String,

    /// City or district.
    pub delivery_city: String,

    /// Optional free-text delivery notes.
    #[serde(default)]
    pub delivery_notes: String,

    /// Chosen payment method.
    #[serde(default)]
    pub payment_method: PaymentMethod,

    /// Wallet number, required for digital payments.
    #[serde(default)]
    pub payment_number: String,

    /// Wallet transaction id, required for digital payments.
    #[serde(default)]
    pub transaction_id: String,

    /// Terms and conditions checkbox.
    #[serde(default)]
    pub agreed_to_terms: bool,
}

/// The validatable checkout form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Customer name, required, at least two characters.
    CustomerName,
    /// Customer phone, required, Bangladeshi mobile pattern.
    CustomerPhone,
    /// Email, optional but must look like an address when present.
    CustomerEmail,
    /// Delivery address, required, at least ten characters.
    DeliveryAddress,
    /// Delivery area selector, required.
    DeliveryArea,
    /// Delivery city, required.
    DeliveryCity,
    /// Wallet number, required for digital payments only.
    PaymentNumber,
    /// Transaction id, required for digital payments only.
    TransactionId,
    /// Terms checkbox, must be ticked.
    Terms,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Self; 9] = [
        Self::CustomerName,
        Self::CustomerPhone,
        Self::CustomerEmail,
        Self::DeliveryAddress,
        Self::DeliveryArea,
        Self::DeliveryCity,
        Self::PaymentNumber,
        Self::TransactionId,
        Self::Terms,
    ];
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A required value is empty.
    Missing,
    /// The value is shorter than the field's minimum.
    TooShort,
    /// The value is not a valid Bangladeshi mobile number.
    InvalidPhone,
    /// The value is not a plausible email address.
    InvalidEmail,
    /// The terms checkbox is not ticked.
    NotAccepted,
}

/// All field violations found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("checkout form has {} invalid field(s)", violations.len())]
pub struct ValidationErrors {
    /// `(field, violation)` pairs, in form order, one per failing field.
    pub violations: Vec<(Field, Violation)>,
}

/// Validate a single field, as done on blur.
///
/// Returns `None` when the field passes its rule.
#[must_use]
pub fn validate_field(form: &CheckoutForm, field: Field) -> Option<Violation> {
    let digital = form.payment_method.is_digital();

    match field {
        Field::CustomerName => {
            let value = form.customer_name.trim();
            if value.is_empty() {
                Some(Violation::Missing)
            } else if value.chars().count() < MIN_NAME_LEN {
                Some(Violation::TooShort)
            } else {
                None
            }
        }
        Field::CustomerPhone => {
            let value = form.customer_phone.trim();
            if value.is_empty() {
                Some(Violation::Missing)
            } else if !is_valid_bangladeshi_phone(value) {
                Some(Violation::InvalidPhone)
            } else {
                None
            }
        }
        Field::CustomerEmail => {
            let value = form.customer_email.trim();
            if !value.is_empty() && !is_valid_email(value) {
                Some(Violation::InvalidEmail)
            } else {
                None
            }
        }
        Field::DeliveryAddress => {
            let value = form.delivery_address.trim();
            if value.is_empty() {
                Some(Violation::Missing)
            } else if value.chars().count() < MIN_ADDRESS_LEN {
                Some(Violation::TooShort)
            } else {
                None
            }
        }
        Field::DeliveryArea => {
            if form.delivery_area.trim().is_empty() {
                Some(Violation::Missing)
            } else {
                None
            }
        }
        Field::DeliveryCity => {
            if form.delivery_city.trim().is_empty() {
                Some(Violation::Missing)
            } else {
                None
            }
        }
        Field::PaymentNumber => {
            let value = form.payment_number.trim();
            if digital && value.is_empty() {
                Some(Violation::Missing)
            } else if !value.is_empty() && !is_valid_bangladeshi_phone(value) {
                Some(Violation::InvalidPhone)
            } else {
                None
            }
        }
        Field::TransactionId => {
            if digital && form.transaction_id.trim().is_empty() {
                Some(Violation::Missing)
            } else {
                None
            }
        }
        Field::Terms => {
            if form.agreed_to_terms {
                None
            } else {
                Some(Violation::NotAccepted)
            }
        }
    }
}

/// Validate the whole form, collecting one violation per failing field.
///
/// # Errors
///
/// Returns [`ValidationErrors`] when any field fails its rule.
pub fn validate(form: &CheckoutForm) -> Result<(), ValidationErrors> {
    let violations: Vec<(Field, Violation)> = Field::ALL
        .into_iter()
        .filter_map(|field| validate_field(form, field).map(|violation| (field, violation)))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { violations })
    }
}

/// Check a Bangladeshi mobile number: optional `+88`/`88` country code,
/// then `01`, an operator digit `3..=9` and eight more digits. Whitespace
/// is ignored.
#[must_use]
pub fn is_valid_bangladeshi_phone(phone: &str) -> bool {
    let cleaned: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let rest = cleaned
        .strip_prefix("+88")
        .or_else(|| cleaned.strip_prefix("88"))
        .unwrap_or(&cleaned);

    let mut chars = rest.chars();
    chars.next() == Some('0')
        && chars.next() == Some('1')
        && chars.next().is_some_and(|c| ('3'..='9').contains(&c))
        && chars.clone().count() == PHONE_LEN - 3
        && chars.all(|c| c.is_ascii_digit())
}

/// Check the `local@domain.tld` shape: no whitespace, a single `@`, and a
/// dot inside the domain with something on both sides.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty()
        || local.contains(char::is_whitespace)
        || domain.contains('@')
        || domain.contains(char::is_whitespace)
    {
        return false;
    }

    domain
        .rsplit_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Normalise a phone number for display: keep digits only, drop the `88`
/// country code, ensure the `01` prefix and cap at eleven digits.
///
/// Used for formatting as the user types; validation runs on the raw value.
#[must_use]
pub fn normalize_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();

    let mut digits = match digits.strip_prefix("88") {
        Some(rest) => rest.to_string(),
        None => digits,
    };

    if !digits.is_empty() && !digits.starts_with("01") {
        digits = format!("01{digits}");
    }

    digits.truncate(PHONE_LEN);
    digits
}
