//! End-to-end cart and checkout arithmetic, exercised the way the
//! storefront pages drive it: build a cart, pick a zone, validate the form
//! and assemble the order payload.

use rust_decimal::Decimal;
use testresult::TestResult;
use tinysteps::{
    cart::{Cart, ProductSnapshot},
    checkout::{self, CheckoutForm, PaymentMethod},
    orders::OrderDraft,
    pricing::{self, DeliveryZone},
};

fn snapshot(name: &str, price: i64) -> ProductSnapshot {
    ProductSnapshot {
        name: name.to_string(),
        price: Decimal::from(price),
        image: format!("images/{name}.jpg"),
        ..ProductSnapshot::default()
    }
}

fn filled_form() -> CheckoutForm {
    CheckoutForm {
        customer_name: "Ayesha Rahman".to_string(),
        customer_phone: "+8801712345678".to_string(),
        customer_email: "ayesha@example.com".to_string(),
        delivery_address: "House 12, Road 3, Dhanmondi, Dhaka".to_string(),
        delivery_area: "inside-dhaka".to_string(),
        delivery_city: "Dhaka".to_string(),
        delivery_notes: String::new(),
        payment_method: PaymentMethod::CashOnDelivery,
        payment_number: String::new(),
        transaction_id: String::new(),
        agreed_to_terms: true,
    }
}

#[test]
fn metro_order_totals_add_the_lower_fee() {
    let mut cart = Cart::new();
    cart.add("P1", &snapshot("romper", 500));
    cart.set_quantity("P1", 2);
    cart.add("P2", &snapshot("bib", 300));

    let summary = pricing::summarize(&cart, DeliveryZone::InsideDhaka);

    assert_eq!(summary.subtotal, Decimal::from(1300));
    assert_eq!(summary.delivery_fee, Decimal::from(80));
    assert_eq!(summary.total, Decimal::from(1380));
    assert_eq!(summary.item_count, 3);
}

#[test]
fn the_same_cart_outside_dhaka_pays_the_higher_fee() {
    let mut cart = Cart::new();
    cart.add("P1", &snapshot("romper", 500));
    cart.set_quantity("P1", 2);
    cart.add("P2", &snapshot("bib", 300));

    let summary = pricing::summarize(&cart, DeliveryZone::OutsideDhaka);

    assert_eq!(summary.total, Decimal::from(1450));
}

#[test]
fn a_validated_form_and_cart_produce_a_complete_draft() -> TestResult {
    let mut cart = Cart::new();
    cart.add("P1", &snapshot("romper", 500));
    cart.set_quantity("P1", 2);
    cart.add("P2", &snapshot("bib", 300));

    let form = filled_form();
    checkout::validate(&form)?;

    let draft = OrderDraft::assemble(&form, &cart);

    assert_eq!(draft.products.len(), 2);
    assert_eq!(draft.customer_name, "Ayesha Rahman");
    assert_eq!(
        DeliveryZone::from_selector(&draft.delivery_area),
        DeliveryZone::InsideDhaka
    );

    let line_total: Decimal = draft
        .products
        .iter()
        .map(|line| line.price * Decimal::from(line.quantity))
        .sum();
    assert_eq!(line_total, Decimal::from(1300));

    Ok(())
}

#[test]
fn validation_gates_flip_one_field_at_a_time() {
    let mut form = filled_form();
    form.payment_method = PaymentMethod::Bkash;

    // Digital method selected but wallet fields still empty.
    assert!(checkout::validate(&form).is_err());

    form.payment_number = "01812345678".to_string();
    assert!(checkout::validate(&form).is_err());

    form.transaction_id = "TXN42".to_string();
    assert!(checkout::validate(&form).is_ok());
}

#[test]
fn zone_inference_agrees_with_the_explicit_selector_for_metro_text() {
    let form = filled_form();

    let from_selector = DeliveryZone::from_selector(&form.delivery_area);
    let from_city = DeliveryZone::infer_from_text(&form.delivery_city);

    assert_eq!(from_selector, from_city);
    assert_eq!(pricing::delivery_fee(from_city), Decimal::from(80));
}
