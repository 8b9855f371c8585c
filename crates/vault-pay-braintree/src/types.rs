//! Braintree wire types.

use serde::{Deserialize, Serialize};
use vault_pay_core::{Amount, VaultId};

/// Envelope for a transaction create call.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionEnvelope {
    /// The transaction to create.
    pub transaction: TransactionParams,
}

/// Transaction create parameters.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionParams {
    /// Transaction type; always `"sale"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Amount with two fraction digits, sent as a string.
    pub amount: Amount,
    /// Vaulted customer to charge.
    pub customer_id: VaultId,
    /// Transaction options.
    pub options: TransactionOptions,
}

/// Transaction options.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionOptions {
    /// Submit for settlement on authorization.
    pub submit_for_settlement: bool,
}

/// Result of a transaction create call.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResult {
    /// Whether the sale succeeded.
    pub success: bool,
    /// The transaction, present on success and on processor declines.
    #[serde(default)]
    pub transaction: Option<Transaction>,
    /// Failure message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Braintree transaction object.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: String,
    /// Status (`authorized`, `submitted_for_settlement`, `processor_declined`, ...).
    #[serde(default)]
    pub status: Option<String>,
    /// Amount as echoed by the gateway.
    #[serde(default)]
    pub amount: Option<String>,
    /// Processor response text for declines.
    #[serde(default)]
    pub processor_response_text: Option<String>,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}
