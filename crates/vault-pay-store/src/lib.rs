//! `RocksDB` storage layer for vault-pay.
//!
//! This crate persists vault records and charge logs using `RocksDB` with column
//! families for the primary records and their indexes.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `vaults`: Vault records, keyed by `user_id`
//! - `vault_ids`: Uniqueness index mapping a vault id to its owner
//! - `charges`: Charge logs, keyed by `charge_id` (ULID)
//! - `charges_by_user`: Index for listing a user's charges newest first
//!
//! # Example
//!
//! ```no_run
//! use vault_pay_store::{RocksStore, Store};
//! use vault_pay_core::{UserId, VaultId, VaultRecord};
//!
//! let store = RocksStore::open("/tmp/vault-pay-db").unwrap();
//!
//! let user_id = UserId::generate();
//! let record = VaultRecord::new(user_id, VaultId::new("cust_123").unwrap());
//! store.insert_vault(&record).unwrap();
//!
//! assert!(store.has_vault(&user_id).unwrap());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use vault_pay_core::{ChargeId, ChargeLog, UserId, VaultId, VaultRecord};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // Vault Operations
    // =========================================================================

    /// Insert a new vault record.
    ///
    /// # Errors
    ///
    /// - `StoreError::VaultExists` if the user already has a record.
    /// - `StoreError::VaultIdTaken` if the vault id belongs to another user.
    fn insert_vault(&self, record: &VaultRecord) -> Result<()>;

    /// Get the vault record for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails. A missing record is
    /// `Ok(None)`.
    fn get_vault(&self, user_id: &UserId) -> Result<Option<VaultRecord>>;

    /// Check whether a user has a vault record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn has_vault(&self, user_id: &UserId) -> Result<bool>;

    /// Get the vault record that owns a vault id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_vault_by_vault_id(&self, vault_id: &VaultId) -> Result<Option<VaultRecord>>;

    /// Delete a user's vault record, returning it.
    ///
    /// Charge logs for the user are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user has no record.
    fn delete_vault(&self, user_id: &UserId) -> Result<VaultRecord>;

    // =========================================================================
    // Charge Log Operations
    // =========================================================================

    /// Append a charge log.
    ///
    /// This also maintains the user index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn append_charge(&self, charge: &ChargeLog) -> Result<()>;

    /// Get a charge log by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_charge(&self, charge_id: &ChargeId) -> Result<Option<ChargeLog>>;

    /// List charge logs for a user, ordered by time (newest first).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_charges_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ChargeLog>>;
}
