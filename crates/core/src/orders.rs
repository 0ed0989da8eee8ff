//! Orders

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    cart::Cart,
    checkout::{CheckoutForm, PaymentMethod},
};

/// One line of a submitted order, snapshotted from the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product identifier.
    pub product_id: String,

    /// Product name at submission time.
    pub product_name: String,

    /// Units ordered.
    pub quantity: u32,

    /// Unit price in BDT at submission time.
    pub price: Decimal,

    /// Selected colour, may be empty.
    pub color: String,

    /// Selected size, may be empty.
    pub size: String,

    /// Image shown for the line.
    pub main_image: String,
}

/// The JSON payload POSTed to the order-intake endpoint.
///
/// Assembled once per submit attempt; later cart or form edits do not
/// affect a draft that is already in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Customer's full name.
    pub customer_name: String,

    /// Customer's mobile number.
    pub customer_phone: String,

    /// Contact email, empty when not given.
    pub customer_email: String,

    /// Full delivery address.
    pub delivery_address: String,

    /// Area-selector value.
    pub delivery_area: String,

    /// City or district.
    pub delivery_city: String,

    /// Free-text delivery notes, empty when not given.
    pub delivery_notes: String,

    /// Chosen payment method.
    pub payment_method: PaymentMethod,

    /// Wallet number; only present for digital payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_number: Option<String>,

    /// Wallet transaction id; only present for digital payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    /// Snapshot of the cart lines.
    pub products: Vec<OrderLine>,

    /// Mirrors `delivery_notes`; the intake sheet reads either column.
    pub special_notes: String,
}

impl OrderDraft {
    /// Snapshot the cart and form into a submittable draft.
    ///
    /// Purely structural; validation and the non-empty-cart check are the
    /// submission flow's job.
    #[must_use]
    pub fn assemble(form: &CheckoutForm, cart: &Cart) -> Self {
        let digital = form.payment_method.is_digital();

        Self {
            customer_name: form.customer_name.trim().to_string(),
            customer_phone: form.customer_phone.trim().to_string(),
            customer_email: form.customer_email.trim().to_string(),
            delivery_address: form.delivery_address.trim().to_string(),
            delivery_area: form.delivery_area.clone(),
            delivery_city: form.delivery_city.trim().to_string(),
            delivery_notes: form.delivery_notes.clone(),
            payment_method: form.payment_method,
            payment_number: digital.then(|| form.payment_number.trim().to_string()),
            transaction_id: digital.then(|| form.transaction_id.trim().to_string()),
            products: cart
                .items()
                .iter()
                .map(|item| OrderLine {
                    product_id: item.id.clone(),
                    product_name: item.name.clone(),
                    quantity: item.quantity,
                    price: item.price,
                    color: item.color.clone(),
                    size: item.size.clone(),
                    main_image: item.image.clone(),
                })
                .collect(),
            special_notes: form.delivery_notes.clone(),
        }
    }
}

/// Lightweight record of a placed order, persisted for the confirmation
/// view. Also the shape of the API's order-success payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Server-assigned order identifier.
    pub order_id: String,

    /// Customer name echoed by the server.
    pub customer_name: String,

    /// Grand total charged, in BDT.
    pub total_amount: Decimal,

    /// Delivery fee included in the total, in BDT.
    pub delivery_fee: Decimal,

    /// Payment method as reported by the server.
    pub payment_method: String,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::cart::ProductSnapshot;

    use super::*;

    fn form() -> CheckoutForm {
        CheckoutForm {
            customer_name: "Ayesha Rahman".to_string(),
            customer_phone: "01712345678".to_string(),
            customer_email: String::new(),
            delivery_address: "House 12, Road 3, Dhanmondi".to_string(),
            delivery_area: "inside-dhaka".to_string(),
            delivery_city: "Dhaka".to_string(),
            delivery_notes: "call before delivery".to_string(),
            payment_method: PaymentMethod::CashOnDelivery,
            payment_number: String::new(),
            transaction_id: String::new(),
            agreed_to_terms: true,
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(
            "P1",
            &ProductSnapshot {
                name: "Romper".to_string(),
                price: Decimal::from(500),
                image: "images/p1.jpg".to_string(),
                ..ProductSnapshot::default()
            },
        );
        cart.set_quantity("P1", 2);
        cart
    }

    #[test]
    fn assemble_snapshots_the_cart_lines() {
        let draft = OrderDraft::assemble(&form(), &cart());

        assert_eq!(draft.products.len(), 1);
        let line = draft.products.first().cloned();
        assert_eq!(
            line,
            Some(OrderLine {
                product_id: "P1".to_string(),
                product_name: "Romper".to_string(),
                quantity: 2,
                price: Decimal::from(500),
                color: String::new(),
                size: String::new(),
                main_image: "images/p1.jpg".to_string(),
            })
        );
    }

    #[test]
    fn later_cart_edits_do_not_touch_the_draft() {
        let mut cart = cart();
        let draft = OrderDraft::assemble(&form(), &cart);

        cart.clear();

        assert_eq!(draft.products.len(), 1);
    }

    #[test]
    fn cash_on_delivery_omits_the_digital_payment_fields() -> TestResult {
        let draft = OrderDraft::assemble(&form(), &cart());

        assert_eq!(draft.payment_number, None);
        assert_eq!(draft.transaction_id, None);

        let body = serde_json::to_value(&draft)?;
        assert!(body.get("payment_number").is_none());
        assert!(body.get("transaction_id").is_none());

        Ok(())
    }

    #[test]
    fn digital_payment_attaches_wallet_number_and_transaction_id() -> TestResult {
        let mut form = form();
        form.payment_method = PaymentMethod::Bkash;
        form.payment_number = "01812345678".to_string();
        form.transaction_id = "TXN42".to_string();

        let draft = OrderDraft::assemble(&form, &cart());

        assert_eq!(draft.payment_number.as_deref(), Some("01812345678"));
        assert_eq!(draft.transaction_id.as_deref(), Some("TXN42"));

        let body = serde_json::to_value(&draft)?;
        assert_eq!(body["payment_method"], "bkash");
        assert_eq!(body["payment_number"], "01812345678");

        Ok(())
    }

    #[test]
    fn special_notes_mirror_the_delivery_notes() {
        let draft = OrderDraft::assemble(&form(), &cart());

        assert_eq!(draft.special_notes, "call before delivery");
        assert_eq!(draft.delivery_notes, draft.special_notes);
    }

    #[test]
    fn receipt_round_trips_through_json() -> TestResult {
        let receipt = OrderReceipt {
            order_id: "TS-12345678-001".to_string(),
            customer_name: "Ayesha Rahman".to_string(),
            total_amount: Decimal::from(1380),
            delivery_fee: Decimal::from(80),
            payment_method: "cash_on_delivery".to_string(),
        };

        let raw = serde_json::to_string(&receipt)?;
        let parsed: OrderReceipt = serde_json::from_str(&raw)?;

        assert_eq!(parsed, receipt);

        Ok(())
    }
}
