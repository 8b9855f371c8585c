//! Error types for vault-pay storage.

use vault_pay_core::{UserId, VaultId};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("not found")]
    NotFound,

    /// The user already has a vault record.
    #[error("vault already linked for user: {user_id}")]
    VaultExists {
        /// The user that already has a record.
        user_id: UserId,
    },

    /// The vault ID is linked to another user.
    #[error("vault id already in use: {vault_id}")]
    VaultIdTaken {
        /// The vault ID that is already taken.
        vault_id: VaultId,
    },
}
