//! Delivery pricing

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// Flat delivery fee inside the Dhaka metro zone, in BDT.
const INSIDE_DHAKA_FEE: u32 = 80;

/// Flat delivery fee everywhere else, in BDT.
const OUTSIDE_DHAKA_FEE: u32 = 150;

/// Selector value the checkout form uses for the metro zone.
const INSIDE_DHAKA_SELECTOR: &str = "inside-dhaka";

/// Known metro-area spellings matched against free-text city/area fields.
const DHAKA_AREAS: [&str; 9] = [
    "ঢাকা",
    "Dhaka",
    "DHAKA",
    "মিরপুর",
    "উত্তরা",
    "গুলশান",
    "বনানী",
    "ধানমন্ডি",
    "মোহাম্মদপুর",
];

/// Which of the two flat delivery-fee tiers an order falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryZone {
    /// Inside the Dhaka metro zone: lower fee, faster delivery.
    InsideDhaka,

    /// Everywhere else in the country.
    OutsideDhaka,
}

impl DeliveryZone {
    /// Map the checkout form's area-selector value to a zone.
    ///
    /// Anything other than the explicit inside-Dhaka value counts as
    /// outside, including an empty selection.
    #[must_use]
    pub fn from_selector(value: &str) -> Self {
        if value == INSIDE_DHAKA_SELECTOR {
            Self::InsideDhaka
        } else {
            Self::OutsideDhaka
        }
    }

    /// Guess the zone from a free-text city or area field.
    ///
    /// Case-insensitive substring match against the known metro-area
    /// spellings; any hit means inside Dhaka.
    #[must_use]
    pub fn infer_from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::OutsideDhaka;
        }

        let lowered = text.to_lowercase();
        if DHAKA_AREAS
            .iter()
            .any(|area| lowered.contains(&area.to_lowercase()))
        {
            Self::InsideDhaka
        } else {
            Self::OutsideDhaka
        }
    }

    /// Estimated delivery window for the zone.
    #[must_use]
    pub fn estimate(self) -> DeliveryEstimate {
        match self {
            Self::InsideDhaka => DeliveryEstimate {
                min_business_days: 2,
                max_business_days: 3,
            },
            Self::OutsideDhaka => DeliveryEstimate {
                min_business_days: 3,
                max_business_days: 5,
            },
        }
    }
}

/// Delivery window in business days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryEstimate {
    /// Earliest expected delivery.
    pub min_business_days: u8,

    /// Latest expected delivery.
    pub max_business_days: u8,
}

/// Flat delivery fee for the zone.
#[must_use]
pub fn delivery_fee(zone: DeliveryZone) -> Decimal {
    match zone {
        DeliveryZone::InsideDhaka => Decimal::from(INSIDE_DHAKA_FEE),
        DeliveryZone::OutsideDhaka => Decimal::from(OUTSIDE_DHAKA_FEE),
    }
}

/// Full order summary for a cart delivered to the given zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Sum of `price * quantity` over all lines.
    pub subtotal: Decimal,

    /// Flat fee for the delivery zone.
    pub delivery_fee: Decimal,

    /// `subtotal + delivery_fee`.
    pub total: Decimal,

    /// Total number of units in the cart.
    pub item_count: u32,
}

/// Compute subtotal, delivery fee and grand total for a cart.
#[must_use]
pub fn summarize(cart: &Cart, zone: DeliveryZone) -> CartSummary {
    let totals = cart.totals();
    let fee = delivery_fee(zone);

    CartSummary {
        subtotal: totals.subtotal,
        delivery_fee: fee,
        total: totals.subtotal + fee,
        item_count: totals.item_count,
    }
}
