//! Order submission flow.
//!
//! Drives the `Idle -> Submitting -> {Success, Failed}` machine. Exactly
//! one submission may be in flight at a time; validation and the
//! empty-cart check run before anything touches the network, and a failed
//! attempt leaves the cart and form exactly as they were so the user can
//! retry by submitting again.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::Mutex;
use tracing::{error, warn};

use tinysteps::{
    checkout::{self, CheckoutForm, ValidationErrors},
    orders::{OrderDraft, OrderReceipt},
};

use crate::{
    api::{ErrorCategory, StorefrontApi},
    session::CartSession,
    storage::{FORM_KEY, KeyValueStore, RECEIPT_KEY},
};

/// Outcome of one submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Another submission is already in flight; nothing was sent.
    AlreadySubmitting,

    /// The form failed validation; nothing was sent.
    Invalid(ValidationErrors),

    /// The cart has no lines; nothing was sent.
    EmptyCart,

    /// The order was accepted. The cart and saved form state are cleared
    /// and the receipt is persisted for the confirmation view.
    Placed(OrderReceipt),

    /// The request failed; cart and form are untouched and no retry is
    /// scheduled.
    Failed(ErrorCategory),
}

/// Checkout submission driver.
pub struct CheckoutFlow {
    api: Arc<dyn StorefrontApi>,
    store: Arc<dyn KeyValueStore>,
    submitting: AtomicBool,
}

impl std::fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("submitting", &self.submitting)
            .finish_non_exhaustive()
    }
}

impl CheckoutFlow {
    /// Create a flow over the given API client and storage.
    #[must_use]
    pub fn new(api: Arc<dyn StorefrontApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            api,
            store,
            submitting: AtomicBool::new(false),
        }
    }

    /// Drive one submission attempt end to end.
    ///
    /// Guard order: single-flight first, then form validation, then the
    /// empty-cart check. Only when all three pass is a single request
    /// issued.
    pub async fn submit(
        &self,
        session: &Mutex<CartSession>,
        form: &CheckoutForm,
    ) -> SubmitOutcome {
        if self.submitting.swap(true, Ordering::SeqCst) {
            return SubmitOutcome::AlreadySubmitting;
        }

        let outcome = self.run_submission(session, form).await;
        self.submitting.store(false, Ordering::SeqCst);
        outcome
    }

    async fn run_submission(
        &self,
        session: &Mutex<CartSession>,
        form: &CheckoutForm,
    ) -> SubmitOutcome {
        if let Err(errors) = checkout::validate(form) {
            return SubmitOutcome::Invalid(errors);
        }

        let draft = {
            let session = session.lock().await;
            if session.cart().is_empty() {
                return SubmitOutcome::EmptyCart;
            }
            OrderDraft::assemble(form, session.cart())
        };

        match self.api.submit_order(&draft).await {
            Ok(receipt) => {
                session.lock().await.clear();
                self.clear_form();
                self.persist_receipt(&receipt);
                SubmitOutcome::Placed(receipt)
            }
            Err(api_error) => {
                error!(error = %api_error, "order submission failed");
                SubmitOutcome::Failed(api_error.category())
            }
        }
    }

    /// Save in-progress form values so a reload does not lose them.
    /// Best effort, like every storage write.
    pub fn save_form(&self, form: &CheckoutForm) {
        let payload = match serde_json::to_string(form) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "failed to serialize checkout form");
                return;
            }
        };

        if let Err(error) = self.store.put(FORM_KEY, &payload) {
            warn!(%error, "failed to persist checkout form");
        }
    }

    /// Restore saved form values; missing or corrupt data yields the
    /// default empty form.
    #[must_use]
    pub fn load_form(&self) -> CheckoutForm {
        match self.store.get(FORM_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|error| {
                warn!(%error, "discarding corrupt saved checkout form");
                CheckoutForm::default()
            }),
            Ok(None) => CheckoutForm::default(),
            Err(error) => {
                warn!(%error, "failed to read saved checkout form");
                CheckoutForm::default()
            }
        }
    }

    /// Drop any saved form state.
    pub fn clear_form(&self) {
        if let Err(error) = self.store.remove(FORM_KEY) {
            warn!(%error, "failed to clear saved checkout form");
        }
    }

    /// The receipt of the last successful order, if one was persisted.
    #[must_use]
    pub fn last_receipt(&self) -> Option<OrderReceipt> {
        match self.store.get(RECEIPT_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(receipt) => Some(receipt),
                Err(error) => {
                    warn!(%error, "discarding corrupt order receipt");
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                warn!(%error, "failed to read order receipt");
                None
            }
        }
    }

    fn persist_receipt(&self, receipt: &OrderReceipt) {
        let payload = match serde_json::to_string(receipt) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "failed to serialize order receipt");
                return;
            }
        };

        if let Err(error) = self.store.put(RECEIPT_KEY, &payload) {
            warn!(%error, "failed to persist order receipt");
        }
    }
}
