//! Service error types.

use vault_pay_braintree::ProcessorError;
use vault_pay_core::{Amount, AmountError, ProcessorTransactionId, UserId, VaultId};
use vault_pay_store::StoreError;

/// Errors from vault lookup and lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// The user already has a linked payment method.
    #[error("vault already linked for user: {user_id}")]
    AlreadyLinked {
        /// The user.
        user_id: UserId,
    },

    /// The vault id is linked to another user.
    #[error("vault id already in use: {vault_id}")]
    VaultIdTaken {
        /// The vault id.
        vault_id: VaultId,
    },

    /// The user has no linked payment method.
    #[error("no vault linked for user: {user_id}")]
    NotFound {
        /// The user.
        user_id: UserId,
    },

    /// Storage failure.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Why a charge produced no charge log.
#[derive(Debug, thiserror::Error)]
pub enum ChargeError {
    /// The amount is not chargeable.
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// The user has no linked payment method.
    #[error("no vault linked for user: {user_id}")]
    NoVault {
        /// The user.
        user_id: UserId,
    },

    /// The processor refused the sale.
    #[error("charge declined: {message}")]
    Declined {
        /// Reason reported by the processor.
        message: String,
    },

    /// The processor could not be reached or gave no usable answer.
    #[error("processor error: {0}")]
    Processor(#[from] ProcessorError),

    /// The processor accepted the sale but the charge log could not be written.
    #[error("charge {transaction_id} for {amount} succeeded but was not recorded: {source}")]
    Unrecorded {
        /// The processor's transaction ID.
        transaction_id: ProcessorTransactionId,
        /// The charged amount.
        amount: Amount,
        /// The storage failure.
        source: StoreError,
    },

    /// Storage failure before the sale was submitted.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ChargeError {
    /// Whether the processor gave a definite refusal (as opposed to an unknown outcome).
    #[must_use]
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::Declined { .. })
    }
}
