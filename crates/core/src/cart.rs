//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lowest quantity a line item may hold.
pub const MIN_QUANTITY: u32 = 1;

/// Highest quantity a line item may hold.
pub const MAX_QUANTITY: u32 = 10;

/// One line in the cart, keyed by product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier, unique within the cart.
    pub id: String,

    /// Product display name.
    pub name: String,

    /// Unit price in BDT.
    pub price: Decimal,

    /// URL or path of the product image.
    pub image: String,

    /// Units ordered.
    pub quantity: u32,

    /// Selected colour, empty when none was chosen.
    #[serde(default)]
    pub color: String,

    /// Selected size, empty when none was chosen.
    #[serde(default)]
    pub size: String,
}

/// Product fields copied into a new cart line.
#[derive(Debug, Clone, Default)]
pub struct ProductSnapshot {
    /// Product display name.
    pub name: String,

    /// Unit price in BDT; negative values are stored as zero.
    pub price: Decimal,

    /// Image shown next to the line.
    pub image: String,

    /// Chosen colour, may be empty.
    pub color: String,

    /// Chosen size, may be empty.
    pub size: String,
}

/// Result of a quantity change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityOutcome {
    /// The quantity was stored as requested.
    Updated,

    /// The request exceeded [`MAX_QUANTITY`]; the quantity was clamped and
    /// the user should be warned.
    Clamped,

    /// The request fell below [`MIN_QUANTITY`]; removing the line now needs
    /// an explicit confirmation via [`Cart::confirm_removal`].
    RemovalRequested,

    /// No line with that product id exists.
    NotInCart,
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of `price * quantity` over all lines.
    pub subtotal: Decimal,

    /// Sum of quantities over all lines.
    pub item_count: u32,
}

/// In-memory cart for the active session.
///
/// Holds at most one line per product id; persistence is layered on by the
/// application crate so storage failures cannot corrupt this state.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    pending_removal: Option<String>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from previously persisted lines.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self {
            items,
            pending_removal: None,
        }
    }

    /// All lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of a product.
    ///
    /// An existing line gets its quantity incremented without an upper
    /// check; the ceiling is enforced when the quantity is next edited.
    /// Otherwise a new line with quantity 1 is appended from the snapshot.
    pub fn add(&mut self, product_id: &str, snapshot: &ProductSnapshot) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product_id) {
            item.quantity += 1;
            return;
        }

        self.items.push(CartItem {
            id: product_id.to_string(),
            name: snapshot.name.clone(),
            price: snapshot.price.max(Decimal::ZERO),
            image: snapshot.image.clone(),
            quantity: 1,
            color: snapshot.color.clone(),
            size: snapshot.size.clone(),
        });
    }

    /// Set the quantity of a line.
    ///
    /// Zero is treated as a removal request and leaves the line untouched
    /// until confirmed. Values above [`MAX_QUANTITY`] are clamped.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> QuantityOutcome {
        if !self.contains(product_id) {
            return QuantityOutcome::NotInCart;
        }

        if quantity < MIN_QUANTITY {
            self.pending_removal = Some(product_id.to_string());
            return QuantityOutcome::RemovalRequested;
        }

        let (quantity, outcome) = if quantity > MAX_QUANTITY {
            (MAX_QUANTITY, QuantityOutcome::Clamped)
        } else {
            (quantity, QuantityOutcome::Updated)
        };

        if let Some(item) = self.items.iter_mut().find(|item| item.id == product_id) {
            item.quantity = quantity;
        }

        outcome
    }

    /// Change a line's quantity by a signed step (the +/- buttons).
    ///
    /// Stepping below one requests removal; stepping past the ceiling
    /// leaves the quantity at [`MAX_QUANTITY`] and reports the clamp.
    pub fn adjust_quantity(&mut self, product_id: &str, delta: i64) -> QuantityOutcome {
        let Some(current) = self.quantity_of(product_id) else {
            return QuantityOutcome::NotInCart;
        };

        let requested = i64::from(current) + delta;
        if requested < i64::from(MIN_QUANTITY) {
            self.pending_removal = Some(product_id.to_string());
            return QuantityOutcome::RemovalRequested;
        }

        let quantity = u32::try_from(requested).unwrap_or(MAX_QUANTITY);
        self.set_quantity(product_id, quantity)
    }

    /// Ask for a line to be removed; takes effect on [`Cart::confirm_removal`].
    ///
    /// Returns `false` when no such line exists.
    pub fn request_removal(&mut self, product_id: &str) -> bool {
        if !self.contains(product_id) {
            return false;
        }

        self.pending_removal = Some(product_id.to_string());
        true
    }

    /// The product id awaiting removal confirmation, if any.
    #[must_use]
    pub fn pending_removal(&self) -> Option<&str> {
        self.pending_removal.as_deref()
    }

    /// Confirm the pending removal, returning the removed line.
    pub fn confirm_removal(&mut self) -> Option<CartItem> {
        let id = self.pending_removal.take()?;
        self.remove(&id)
    }

    /// Drop the pending removal request, keeping the line as is.
    pub fn cancel_removal(&mut self) {
        self.pending_removal = None;
    }

    /// Remove a line directly, returning it; absent ids are a no-op.
    pub fn remove(&mut self, product_id: &str) -> Option<CartItem> {
        if self.pending_removal.as_deref() == Some(product_id) {
            self.pending_removal = None;
        }

        let position = self.items.iter().position(|item| item.id == product_id)?;
        Some(self.items.remove(position))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.pending_removal = None;
    }

    /// Compute the subtotal and total unit count.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            subtotal: self
                .items
                .iter()
                .map(|item| item.price * Decimal::from(item.quantity))
                .sum(),
            item_count: self.items.iter().map(|item| item.quantity).sum(),
        }
    }

    fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|item| item.id == product_id)
    }

    fn quantity_of(&self, product_id: &str) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.id == product_id)
            .map(|item| item.quantity)
    }
}
