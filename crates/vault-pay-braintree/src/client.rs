//! Braintree HTTP client implementation.
//!
//! The client speaks a JSON rendition of the gateway's transaction API and is
//! pointed at an explicit gateway URL. Braintree's public endpoints accept XML
//! bodies only, so there are no built-in sandbox or production presets.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use vault_pay_core::ProcessorTransactionId;

use crate::error::ProcessorError;
use crate::processor::{Processor, SaleOutcome, SaleRequest};
use crate::types::{
    ErrorResponse, TransactionEnvelope, TransactionOptions, TransactionParams, TransactionResult,
};

/// Gateway API version sent with every request.
const API_VERSION: &str = "6";

/// Media type of request and response bodies.
const JSON: &str = "application/json";

/// Merchant API credentials.
#[derive(Clone)]
pub struct Credentials {
    /// Merchant account ID.
    pub merchant_id: String,
    /// Public API key (basic auth user).
    pub public_key: String,
    /// Private API key (basic auth password).
    pub private_key: String,
}

impl Credentials {
    /// Create a credential set.
    pub fn new(
        merchant_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("merchant_id", &self.merchant_id)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Client options.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

/// Braintree transaction API client.
#[derive(Debug, Clone)]
pub struct BraintreeClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl BraintreeClient {
    /// Create a new client for the JSON gateway at `gateway_url`.
    ///
    /// # Errors
    ///
    /// Returns `ProcessorError::Configuration` if `gateway_url` is not an
    /// `http` or `https` URL, or an error if the HTTP client cannot be built.
    pub fn new(
        gateway_url: impl Into<String>,
        credentials: Credentials,
        options: ClientOptions,
    ) -> Result<Self, ProcessorError> {
        let gateway_url = gateway_url.into();
        let base_url = gateway_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ProcessorError::Configuration(format!(
                "gateway URL must be http or https: {gateway_url}"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            credentials,
        })
    }

    fn transactions_url(&self) -> String {
        format!(
            "{}/merchants/{}/transactions",
            self.base_url, self.credentials.merchant_id
        )
    }

    /// Interpret a transaction create response.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<SaleOutcome, ProcessorError> {
        let status = response.status();

        if status.is_success() {
            let result: TransactionResult = response.json().await?;
            return outcome_from_result(result);
        }

        // Try to parse error response
        let error_body: Result<ErrorResponse, _> = response.json().await;
        let message = error_body.map_or_else(|_| format!("HTTP {status}"), |body| body.message);

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            // Validation errors are the gateway's way of refusing the sale.
            return Ok(SaleOutcome::Declined {
                message,
                status: None,
            });
        }

        Err(ProcessorError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn outcome_from_result(result: TransactionResult) -> Result<SaleOutcome, ProcessorError> {
    if !result.success {
        let status = result.transaction.as_ref().and_then(|t| t.status.clone());
        let message = result
            .message
            .or_else(|| result.transaction.and_then(|t| t.processor_response_text))
            .unwrap_or_else(|| "transaction declined".to_string());
        return Ok(SaleOutcome::Declined { message, status });
    }

    let transaction = result.transaction.ok_or_else(|| {
        ProcessorError::InvalidResponse("successful result without a transaction".into())
    })?;
    let transaction_id = ProcessorTransactionId::new(transaction.id)
        .map_err(|e| ProcessorError::InvalidResponse(format!("transaction id: {e}")))?;

    Ok(SaleOutcome::Approved {
        transaction_id,
        status: transaction.status,
    })
}

#[async_trait]
impl Processor for BraintreeClient {
    async fn create_sale(&self, sale: &SaleRequest) -> Result<SaleOutcome, ProcessorError> {
        let body = TransactionEnvelope {
            transaction: TransactionParams {
                kind: "sale",
                amount: sale.amount,
                customer_id: sale.customer_id.clone(),
                options: TransactionOptions {
                    submit_for_settlement: sale.submit_for_settlement,
                },
            },
        };

        tracing::debug!(
            customer_id = %sale.customer_id,
            amount = %sale.amount,
            "Submitting Braintree sale"
        );

        let response = self
            .client
            .post(self.transactions_url())
            .basic_auth(
                &self.credentials.public_key,
                Some(&self.credentials.private_key),
            )
            .header("X-ApiVersion", API_VERSION)
            .header(header::ACCEPT, JSON)
            .header(header::CONTENT_TYPE, JSON)
            .json(&body)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Transaction;

    fn client(gateway_url: &str) -> Result<BraintreeClient, ProcessorError> {
        BraintreeClient::new(
            gateway_url,
            Credentials::new("merchant_1", "p", "s"),
            ClientOptions::default(),
        )
    }

    #[test]
    fn gateway_url_must_be_http() {
        assert!(matches!(
            client("sandbox"),
            Err(ProcessorError::Configuration(_))
        ));
        assert!(matches!(
            client("ftp://gateway.local"),
            Err(ProcessorError::Configuration(_))
        ));
        assert!(client("http://localhost:9000").is_ok());
    }

    #[test]
    fn credentials_debug_redacts_private_key() {
        let debug = format!("{:?}", Credentials::new("m", "pub", "very-secret"));
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("pub"));
    }

    #[test]
    fn transactions_url_includes_merchant() {
        let client = client("https://gateway.example.test/").unwrap();
        assert_eq!(
            client.transactions_url(),
            "https://gateway.example.test/merchants/merchant_1/transactions"
        );
    }

    #[test]
    fn decline_falls_back_to_processor_response_text() {
        let outcome = outcome_from_result(TransactionResult {
            success: false,
            transaction: Some(Transaction {
                id: "t1".into(),
                status: Some("processor_declined".into()),
                amount: None,
                processor_response_text: Some("Insufficient Funds".into()),
            }),
            message: None,
        })
        .unwrap();

        assert_eq!(
            outcome,
            SaleOutcome::Declined {
                message: "Insufficient Funds".into(),
                status: Some("processor_declined".into()),
            }
        );
    }

    #[test]
    fn decline_prefers_result_message() {
        let outcome = outcome_from_result(TransactionResult {
            success: false,
            transaction: Some(Transaction {
                id: "t2".into(),
                status: Some("gateway_rejected".into()),
                amount: None,
                processor_response_text: Some("Insufficient Funds".into()),
            }),
            message: Some("Gateway Rejected: cvv".into()),
        })
        .unwrap();

        assert_eq!(
            outcome,
            SaleOutcome::Declined {
                message: "Gateway Rejected: cvv".into(),
                status: Some("gateway_rejected".into()),
            }
        );
    }

    #[test]
    fn decline_without_any_message_uses_default() {
        let outcome = outcome_from_result(TransactionResult {
            success: false,
            transaction: None,
            message: None,
        })
        .unwrap();

        assert!(matches!(
            outcome,
            SaleOutcome::Declined { ref message, status: None } if message == "transaction declined"
        ));
    }

    #[test]
    fn success_without_transaction_is_invalid() {
        let result = outcome_from_result(TransactionResult {
            success: true,
            transaction: None,
            message: None,
        });
        assert!(matches!(result, Err(ProcessorError::InvalidResponse(_))));
    }
}
