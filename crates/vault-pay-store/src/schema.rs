//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Vault records, keyed by `user_id`.
    pub const VAULTS: &str = "vaults";

    /// Uniqueness index: vault id to owning `user_id`.
    pub const VAULT_IDS: &str = "vault_ids";

    /// Charge logs, keyed by `charge_id` (ULID).
    pub const CHARGES: &str = "charges";

    /// Index: charges by user, keyed by `user_id || charge_id`.
    /// Value is empty (index only).
    pub const CHARGES_BY_USER: &str = "charges_by_user";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::VAULTS, cf::VAULT_IDS, cf::CHARGES, cf::CHARGES_BY_USER]
}
