//! Cart session persistence.

use std::sync::Arc;

use tracing::warn;

use tinysteps::{
    cart::{Cart, CartItem, ProductSnapshot, QuantityOutcome},
    pricing::{self, CartSummary, DeliveryZone},
};

use crate::storage::{CART_KEY, KeyValueStore};

/// The active cart plus its persisted copy.
///
/// Every mutation is written back to storage as a JSON array of lines.
/// Storage stays best effort throughout: a failed read yields an empty
/// cart, a failed write is logged and the in-memory cart remains
/// authoritative for the rest of the session.
pub struct CartSession {
    cart: Cart,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for CartSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSession")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartSession {
    /// Restore the cart from storage; missing or corrupt data yields an
    /// empty cart, never an error.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let cart = match store.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(items) => Cart::from_items(items),
                Err(error) => {
                    warn!(%error, "discarding corrupt persisted cart");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!(%error, "failed to read persisted cart");
                Cart::new()
            }
        };

        Self { cart, store }
    }

    /// The current cart state.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a product and persist.
    pub fn add(&mut self, product_id: &str, snapshot: &ProductSnapshot) {
        self.cart.add(product_id, snapshot);
        self.persist();
    }

    /// Set a line's quantity; persists only when something changed.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> QuantityOutcome {
        let outcome = self.cart.set_quantity(product_id, quantity);
        self.persist_after(outcome);
        outcome
    }

    /// Step a line's quantity; persists only when something changed.
    pub fn adjust_quantity(&mut self, product_id: &str, delta: i64) -> QuantityOutcome {
        let outcome = self.cart.adjust_quantity(product_id, delta);
        self.persist_after(outcome);
        outcome
    }

    /// Ask for a line to be removed, pending confirmation.
    pub fn request_removal(&mut self, product_id: &str) -> bool {
        self.cart.request_removal(product_id)
    }

    /// Confirm the pending removal and persist.
    pub fn confirm_removal(&mut self) -> Option<CartItem> {
        let removed = self.cart.confirm_removal();
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    /// Drop the pending removal request.
    pub fn cancel_removal(&mut self) {
        self.cart.cancel_removal();
    }

    /// Remove a line directly and persist.
    pub fn remove(&mut self, product_id: &str) -> Option<CartItem> {
        let removed = self.cart.remove(product_id);
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    /// Empty the cart and persist the empty state.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Price the cart for a delivery zone.
    #[must_use]
    pub fn summary(&self, zone: DeliveryZone) -> CartSummary {
        pricing::summarize(&self.cart, zone)
    }

    fn persist_after(&self, outcome: QuantityOutcome) {
        if matches!(outcome, QuantityOutcome::Updated | QuantityOutcome::Clamped) {
            self.persist();
        }
    }

    fn persist(&self) {
        let payload = match serde_json::to_string(self.cart.items()) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "failed to serialize cart");
                return;
            }
        };

        if let Err(error) = self.store.put(CART_KEY, &payload) {
            warn!(%error, "failed to persist cart; continuing in memory");
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::storage::{JsonFileStore, MockKeyValueStore, StorageError};

    use super::*;

    fn snapshot(price: i64) -> ProductSnapshot {
        ProductSnapshot {
            name: "Romper".to_string(),
            price: Decimal::from(price),
            image: "images/p1.jpg".to_string(),
            ..ProductSnapshot::default()
        }
    }

    #[test]
    fn mutations_survive_a_reload() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(dir.path()));

        let mut session = CartSession::load(Arc::clone(&store));
        session.add("P1", &snapshot(500));
        session.set_quantity("P1", 3);

        let restored = CartSession::load(store);

        assert_eq!(restored.cart().len(), 1);
        assert_eq!(
            restored.cart().items().first().map(|item| item.quantity),
            Some(3)
        );

        Ok(())
    }

    #[test]
    fn corrupt_persisted_cart_loads_as_empty() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path());
        store.put(CART_KEY, "{not json")?;

        let session = CartSession::load(Arc::new(store));

        assert!(session.cart().is_empty());

        Ok(())
    }

    #[test]
    fn missing_persisted_cart_loads_as_empty() -> TestResult {
        let dir = tempfile::tempdir()?;

        let session = CartSession::load(Arc::new(JsonFileStore::new(dir.path())));

        assert!(session.cart().is_empty());

        Ok(())
    }

    #[test]
    fn failed_writes_do_not_disturb_the_in_memory_cart() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store.expect_put().returning(|_, _| {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        });

        let mut session = CartSession::load(Arc::new(store));
        session.add("P1", &snapshot(500));
        session.add("P1", &snapshot(500));

        assert_eq!(
            session.cart().items().first().map(|item| item.quantity),
            Some(2)
        );
    }

    #[test]
    fn clearing_persists_the_empty_state() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path());

        let mut session = CartSession::load(Arc::new(store.clone()));
        session.add("P1", &snapshot(500));
        session.clear();

        assert_eq!(store.get(CART_KEY)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn removal_confirmation_is_persisted_only_on_confirm() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path());

        let mut session = CartSession::load(Arc::new(store.clone()));
        session.add("P1", &snapshot(500));

        assert_eq!(
            session.set_quantity("P1", 0),
            QuantityOutcome::RemovalRequested
        );
        assert!(store.get(CART_KEY)?.is_some_and(|raw| raw.contains("P1")));

        session.confirm_removal();
        assert_eq!(store.get(CART_KEY)?.as_deref(), Some("[]"));

        Ok(())
    }
}
