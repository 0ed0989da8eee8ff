//! Bengali message catalogue.
//!
//! All user-facing strings live here; the rest of the application deals in
//! enums and maps to text at the presentation edge.

use tinysteps::checkout::{Field, Violation};

use crate::api::ErrorCategory;

/// Shown when a quantity change hits the per-line ceiling.
pub const MAX_QUANTITY_WARNING: &str = "সর্বোচ্চ ১০টি পণ্য অর্ডার করা যাবে";

/// Shown when checkout is attempted with an empty cart.
pub const EMPTY_CART: &str = "আপনার কার্ট খালি";

/// Banner shown above per-field errors when the form fails validation.
pub const FORM_INVALID: &str = "দয়া করে সমস্ত প্রয়োজনীয় তথ্য সঠিকভাবে পূরণ করুন";

/// Shown while asking the user to confirm removing a cart line.
pub const CONFIRM_REMOVAL: &str = "আপনি কি এই পণ্যটি কার্ট থেকে সরাতে চান?";

/// User-facing text for a failed order submission.
#[must_use]
pub fn category_message(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Network => "নেটওয়ার্ক সমস্যা। ইন্টারনেট কানেকশন চেক করুন।",
        ErrorCategory::Server => "সার্ভার সমস্যা। অনুগ্রহ করে কিছুক্ষণ পরে আবার চেষ্টা করুন।",
        ErrorCategory::Other => "অর্ডার জমা দিতে সমস্যা হয়েছে। পরে আবার চেষ্টা করুন।",
    }
}

/// User-facing text for one failed form field.
#[must_use]
pub fn violation_message(field: Field, violation: Violation) -> &'static str {
    match (field, violation) {
        (Field::CustomerName, Violation::Missing) => "নাম আবশ্যক",
        (Field::CustomerName, _) => "নাম খুব ছোট",
        (Field::CustomerPhone, Violation::Missing) => "মোবাইল নম্বর আবশ্যক",
        (Field::CustomerPhone, _) => "সঠিক মোবাইল নম্বর দিন",
        (Field::CustomerEmail, _) => "সঠিক ইমেইল ঠিকানা দিন",
        (Field::DeliveryAddress, Violation::Missing) => "ঠিকানা আবশ্যক",
        (Field::DeliveryAddress, _) => "সম্পূর্ণ ঠিকানা লিখুন",
        (Field::DeliveryArea, _) => "এলাকা নির্বাচন করুন",
        (Field::DeliveryCity, _) => "শহর/জেলা লিখুন",
        (Field::PaymentNumber, Violation::Missing) => "পেমেন্ট নম্বর আবশ্যক",
        (Field::PaymentNumber, _) => "সঠিক পেমেন্ট নম্বর দিন",
        (Field::TransactionId, _) => "ট্রানজেকশন আইডি আবশ্যক",
        (Field::Terms, _) => "শর্তাবলীতে সম্মতি দিন",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_a_missing_message() {
        for field in Field::ALL {
            assert!(!violation_message(field, Violation::Missing).is_empty());
        }
    }

    #[test]
    fn phone_violations_distinguish_missing_from_malformed() {
        assert_ne!(
            violation_message(Field::CustomerPhone, Violation::Missing),
            violation_message(Field::CustomerPhone, Violation::InvalidPhone)
        );
    }
}
