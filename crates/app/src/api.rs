//! Storefront API client.
//!
//! One spreadsheet-backed endpoint serves everything: `GET ?action=products`
//! for the catalogue, `GET ?action=product&id=..` for a single row, and a
//! `POST` of the order draft for intake.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use tinysteps::{
    orders::{OrderDraft, OrderReceipt},
    products::Product,
};

/// Errors raised while talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connection, DNS, timeout, bad body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered but the requested resource does not exist.
    #[error("not found")]
    NotFound,

    /// The API reported a failure, or returned a 5xx status.
    #[error("server error: {0}")]
    Server(String),

    /// The response did not match the expected envelope.
    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// The three user-facing failure buckets. Raw error text never reaches the
/// UI; the presentation layer maps these to its message catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connectivity problem; the user should check their connection.
    Network,

    /// The server failed; the user should retry later.
    Server,

    /// Anything else; generic try-again message.
    Other,
}

impl ApiError {
    /// Classify the error for user-facing messaging.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(error) if error.is_connect() || error.is_timeout() => {
                ErrorCategory::Network
            }
            Self::Server(_) => ErrorCategory::Server,
            Self::Http(_) | Self::NotFound | Self::Unexpected(_) => ErrorCategory::Other,
        }
    }
}

/// `{success, data, error}` wrapper around every API payload.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    success: bool,

    #[serde(default)]
    data: Option<T>,

    #[serde(default)]
    error: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap a successful envelope, mapping `success: false` to the given
    /// error constructor.
    fn into_data(self, on_failure: impl FnOnce(String) -> ApiError) -> Result<T, ApiError> {
        if !self.success {
            return Err(on_failure(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        self.data
            .ok_or_else(|| ApiError::Unexpected("missing data in successful response".to_string()))
    }
}

/// Remote product catalogue and order intake.
#[automock]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Fetch the full product list.
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Fetch a single product by its spreadsheet id.
    async fn get_product(&self, id: &str) -> Result<Product, ApiError>;

    /// Submit an assembled order, returning the server's receipt.
    async fn submit_order(&self, order: &OrderDraft) -> Result<OrderReceipt, ApiError>;
}

/// HTTP implementation over the spreadsheet endpoint.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    base_url: String,
    http: Client,
}

impl HttpStorefrontApi {
    /// Create a client for the given endpoint base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        debug!("fetching product list");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("action", "products")])
            .send()
            .await?;

        let envelope: Envelope<Vec<Product>> = check_status(response)?.json().await?;
        envelope.into_data(ApiError::Server)
    }

    async fn get_product(&self, id: &str) -> Result<Product, ApiError> {
        debug!(id, "fetching product");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("action", "product"), ("id", id)])
            .send()
            .await?;

        let envelope: Envelope<Product> = check_status(response)?.json().await?;

        // The sheet script reports an unknown id as success=false.
        envelope.into_data(|_| ApiError::NotFound)
    }

    async fn submit_order(&self, order: &OrderDraft) -> Result<OrderReceipt, ApiError> {
        debug!(lines = order.products.len(), "submitting order");

        let response = self.http.post(&self.base_url).json(order).send().await?;

        let envelope: Envelope<OrderReceipt> = check_status(response)?.json().await?;
        envelope.into_data(ApiError::Server)
    }
}

/// Map non-2xx statuses onto the error taxonomy before parsing the body.
fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_server_error() {
        return Err(ApiError::Server(format!("status {status}")));
    }

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }

    if !status.is_success() {
        return Err(ApiError::Unexpected(format!("status {status}")));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn envelope_unwraps_successful_data() -> TestResult {
        let envelope: Envelope<Vec<Product>> = serde_json::from_value(json!({
            "success": true,
            "data": [{
                "Product ID": "P1",
                "Name": "Romper",
                "Price (BDT)": "500"
            }]
        }))?;

        let products = envelope.into_data(ApiError::Server)?;
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.id.as_str()), Some("P1"));

        Ok(())
    }

    #[test]
    fn envelope_failure_maps_through_the_given_constructor() -> TestResult {
        let envelope: Envelope<Product> = serde_json::from_value(json!({
            "success": false,
            "error": "Product not found"
        }))?;

        let result = envelope.into_data(|_| ApiError::NotFound);
        assert!(matches!(result, Err(ApiError::NotFound)));

        Ok(())
    }

    #[test]
    fn successful_envelope_without_data_is_unexpected() -> TestResult {
        let envelope: Envelope<Product> = serde_json::from_value(json!({ "success": true }))?;

        let result = envelope.into_data(ApiError::Server);
        assert!(matches!(result, Err(ApiError::Unexpected(_))));

        Ok(())
    }

    #[test]
    fn order_receipt_parses_from_the_intake_response() -> TestResult {
        let envelope: Envelope<OrderReceipt> = serde_json::from_value(json!({
            "success": true,
            "data": {
                "order_id": "TS-12345678-001",
                "customer_name": "Ayesha Rahman",
                "total_amount": 1380,
                "delivery_fee": 80,
                "payment_method": "cash_on_delivery"
            }
        }))?;

        let receipt = envelope.into_data(ApiError::Server)?;
        assert_eq!(receipt.order_id, "TS-12345678-001");

        Ok(())
    }

    #[test]
    fn server_and_unexpected_errors_classify_into_their_categories() {
        assert_eq!(
            ApiError::Server("status 500".to_string()).category(),
            ErrorCategory::Server
        );
        assert_eq!(ApiError::NotFound.category(), ErrorCategory::Other);
        assert_eq!(
            ApiError::Unexpected("weird".to_string()).category(),
            ErrorCategory::Other
        );
    }
}
