//! Key encoding utilities for `RocksDB`.

use vault_pay_core::{ChargeId, UserId, VaultId};

/// Create a vault record key from a user ID.
#[must_use]
pub fn vault_key(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Create a vault-id index key.
#[must_use]
pub fn vault_id_key(vault_id: &VaultId) -> Vec<u8> {
    vault_id.as_str().as_bytes().to_vec()
}

/// Create a charge key from a charge ID.
#[must_use]
pub fn charge_key(charge_id: &ChargeId) -> Vec<u8> {
    charge_id.to_bytes().to_vec()
}

/// Create a user-charge index key.
///
/// Format: `user_id (16 bytes) || charge_id (16 bytes)`
///
/// Since ULIDs are time-ordered, charges for a user sort by time.
#[must_use]
pub fn user_charge_key(user_id: &UserId, charge_id: &ChargeId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(user_id.as_bytes());
    key.extend_from_slice(&charge_id.to_bytes());
    key
}

/// Create a prefix for iterating all charges for a user.
#[must_use]
pub fn user_charges_prefix(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Extract the charge ID from a user-charge index key.
///
/// Returns `None` if the key is not exactly 32 bytes.
#[must_use]
pub fn charge_id_from_user_key(key: &[u8]) -> Option<ChargeId> {
    let bytes: [u8; 16] = key.get(16..32)?.try_into().ok()?;
    (key.len() == 32).then(|| ChargeId::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_charge_key_format() {
        let user_id = UserId::generate();
        let charge_id = ChargeId::generate();
        let key = user_charge_key(&user_id, &charge_id);

        assert_eq!(key.len(), 32);
        assert_eq!(&key[..16], user_id.as_bytes());
        assert_eq!(&key[16..], charge_id.to_bytes());
    }

    #[test]
    fn extract_charge_id() {
        let user_id = UserId::generate();
        let charge_id = ChargeId::generate();
        let key = user_charge_key(&user_id, &charge_id);

        assert_eq!(charge_id_from_user_key(&key), Some(charge_id));
        assert_eq!(charge_id_from_user_key(&key[..20]), None);
    }
}
