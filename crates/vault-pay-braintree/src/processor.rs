//! The processor seam.

use async_trait::async_trait;
use vault_pay_core::{Amount, ProcessorTransactionId, VaultId};

use crate::error::ProcessorError;

/// A sale against a vaulted payment method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRequest {
    /// Amount to charge.
    pub amount: Amount,
    /// The vault id, sent as the processor's customer reference.
    pub customer_id: VaultId,
    /// Submit the authorization for settlement immediately.
    pub submit_for_settlement: bool,
}

impl SaleRequest {
    /// A sale that is submitted for settlement immediately.
    #[must_use]
    pub fn settle(customer_id: VaultId, amount: Amount) -> Self {
        Self {
            amount,
            customer_id,
            submit_for_settlement: true,
        }
    }
}

/// The processor's definite answer to a sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleOutcome {
    /// The sale succeeded.
    Approved {
        /// The processor's transaction ID.
        transaction_id: ProcessorTransactionId,
        /// Transaction status reported by the processor (e.g. `submitted_for_settlement`).
        status: Option<String>,
    },
    /// The sale was rejected (validation failure, processor decline, gateway rejection).
    Declined {
        /// Reason reported by the processor.
        message: String,
        /// Transaction status, if a transaction was created.
        status: Option<String>,
    },
}

/// A payment processor capable of creating sales.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Submit a sale.
    ///
    /// # Errors
    ///
    /// Returns an error when the outcome is unknown: transport failures, unexpected
    /// gateway statuses, or unreadable responses.
    async fn create_sale(&self, sale: &SaleRequest) -> Result<SaleOutcome, ProcessorError>;
}
