//! Vault records.
//!
//! A [`VaultRecord`] links an application user to the processor's token for a
//! stored payment method. A user has at most one record, and a vault id belongs
//! to at most one user.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{UserId, VaultId};

/// The link between a user and their stored payment credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultRecord {
    /// The owning user.
    pub user_id: UserId,

    /// The processor's customer reference for the stored payment method.
    pub vault_id: VaultId,

    /// When the payment method was linked.
    pub linked_at: DateTime<Utc>,
}

impl VaultRecord {
    /// Create a record linked now.
    #[must_use]
    pub fn new(user_id: UserId, vault_id: VaultId) -> Self {
        Self {
            user_id,
            vault_id,
            linked_at: Utc::now(),
        }
    }
}

impl fmt::Display for VaultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_owner() {
        let user_id = UserId::generate();
        let record = VaultRecord::new(user_id, VaultId::new("cust_1").unwrap());
        assert_eq!(record.to_string(), user_id.to_string());
    }
}
