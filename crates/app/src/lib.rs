//! TinySteps application layer: API client, persisted storage, cart
//! session and the checkout submission flow.

pub mod api;
pub mod checkout;
pub mod config;
pub mod context;
pub mod messages;
pub mod session;
pub mod storage;
