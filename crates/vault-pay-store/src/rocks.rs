//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use vault_pay_core::{ChargeId, ChargeLog, UserId, VaultId, VaultRecord};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Serializes vault inserts and deletes so the uniqueness checks and the
    /// batch write cannot interleave.
    vault_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            vault_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    fn lock_vaults(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.vault_lock
            .lock()
            .map_err(|_| StoreError::Database("vault lock poisoned".into()))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Vault Operations
    // =========================================================================

    fn insert_vault(&self, record: &VaultRecord) -> Result<()> {
        let _guard = self.lock_vaults()?;

        if self.has_vault(&record.user_id)? {
            return Err(StoreError::VaultExists {
                user_id: record.user_id,
            });
        }
        if self.get_vault_by_vault_id(&record.vault_id)?.is_some() {
            return Err(StoreError::VaultIdTaken {
                vault_id: record.vault_id.clone(),
            });
        }

        let cf_vaults = self.cf(cf::VAULTS)?;
        let cf_vault_ids = self.cf(cf::VAULT_IDS)?;
        let value = Self::serialize(record)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_vaults, keys::vault_key(&record.user_id), &value);
        batch.put_cf(
            &cf_vault_ids,
            keys::vault_id_key(&record.vault_id),
            record.user_id.as_bytes(),
        );

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(
            user_id = %record.user_id,
            vault_id = %record.vault_id,
            "Vault record stored"
        );
        Ok(())
    }

    fn get_vault(&self, user_id: &UserId) -> Result<Option<VaultRecord>> {
        let cf = self.cf(cf::VAULTS)?;
        let key = keys::vault_key(user_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn has_vault(&self, user_id: &UserId) -> Result<bool> {
        let cf = self.cf(cf::VAULTS)?;
        let key = keys::vault_key(user_id);

        let exists = self
            .db
            .get_pinned_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();

        Ok(exists)
    }

    fn get_vault_by_vault_id(&self, vault_id: &VaultId) -> Result<Option<VaultRecord>> {
        let cf = self.cf(cf::VAULT_IDS)?;
        let key = keys::vault_id_key(vault_id);

        let Some(owner) = self
            .db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let bytes: [u8; 16] = owner
            .as_slice()
            .try_into()
            .map_err(|_| StoreError::Serialization("malformed vault index entry".into()))?;

        self.get_vault(&UserId::from_bytes(bytes))
    }

    fn delete_vault(&self, user_id: &UserId) -> Result<VaultRecord> {
        let _guard = self.lock_vaults()?;

        let record = self.get_vault(user_id)?.ok_or(StoreError::NotFound)?;

        let cf_vaults = self.cf(cf::VAULTS)?;
        let cf_vault_ids = self.cf(cf::VAULT_IDS)?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_vaults, keys::vault_key(user_id));
        batch.delete_cf(&cf_vault_ids, keys::vault_id_key(&record.vault_id));

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(record)
    }

    // =========================================================================
    // Charge Log Operations
    // =========================================================================

    fn append_charge(&self, charge: &ChargeLog) -> Result<()> {
        let cf_charges = self.cf(cf::CHARGES)?;
        let cf_by_user = self.cf(cf::CHARGES_BY_USER)?;

        let charge_key = keys::charge_key(&charge.id);
        let user_charge_key = keys::user_charge_key(&charge.user_id, &charge.id);
        let value = Self::serialize(charge)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_charges, &charge_key, &value);
        batch.put_cf(&cf_by_user, &user_charge_key, []); // Index entry (empty value)

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_charge(&self, charge_id: &ChargeId) -> Result<Option<ChargeLog>> {
        let cf = self.cf(cf::CHARGES)?;
        let key = keys::charge_key(charge_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_charges_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ChargeLog>> {
        let cf_by_user = self.cf(cf::CHARGES_BY_USER)?;
        let prefix = keys::user_charges_prefix(user_id);

        let iter = self.db.iterator_cf(
            &cf_by_user,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        // ULID keys sort oldest first; collect then reverse for newest first.
        let mut charge_ids = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            let charge_id = keys::charge_id_from_user_key(&key)
                .ok_or_else(|| StoreError::Serialization("malformed charge index key".into()))?;
            charge_ids.push(charge_id);
        }

        let mut charges = Vec::new();
        for charge_id in charge_ids.iter().rev().skip(offset).take(limit) {
            if let Some(charge) = self.get_charge(charge_id)? {
                charges.push(charge);
            }
        }

        Ok(charges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;
    use vault_pay_core::{Amount, ProcessorTransactionId};

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn vault(user_id: UserId, vault_id: &str) -> VaultRecord {
        VaultRecord::new(user_id, VaultId::new(vault_id).unwrap())
    }

    fn charge(user_id: UserId, amount: rust_decimal::Decimal, txn: &str) -> ChargeLog {
        ChargeLog::new(
            user_id,
            Amount::new(amount).unwrap(),
            ProcessorTransactionId::new(txn).unwrap(),
        )
    }

    #[test]
    fn unknown_user_has_no_vault() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        assert!(!store.has_vault(&user_id).unwrap());
        assert!(store.get_vault(&user_id).unwrap().is_none());
    }

    #[test]
    fn vault_lifecycle() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();
        let record = vault(user_id, "cust_abc");

        store.insert_vault(&record).unwrap();
        assert!(store.has_vault(&user_id).unwrap());
        assert_eq!(store.get_vault(&user_id).unwrap(), Some(record.clone()));
        assert_eq!(
            store.get_vault_by_vault_id(&record.vault_id).unwrap(),
            Some(record.clone())
        );

        let removed = store.delete_vault(&user_id).unwrap();
        assert_eq!(removed, record);
        assert!(!store.has_vault(&user_id).unwrap());
        assert!(store
            .get_vault_by_vault_id(&record.vault_id)
            .unwrap()
            .is_none());

        assert!(matches!(
            store.delete_vault(&user_id),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn one_vault_per_user() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        store.insert_vault(&vault(user_id, "cust_1")).unwrap();
        let result = store.insert_vault(&vault(user_id, "cust_2"));
        assert!(matches!(result, Err(StoreError::VaultExists { .. })));

        // The rejected vault id was not indexed.
        let cust_2 = VaultId::new("cust_2").unwrap();
        assert!(store.get_vault_by_vault_id(&cust_2).unwrap().is_none());
    }

    #[test]
    fn vault_id_is_unique_across_users() {
        let (store, _dir) = create_test_store();

        store
            .insert_vault(&vault(UserId::generate(), "cust_shared"))
            .unwrap();
        let result = store.insert_vault(&vault(UserId::generate(), "cust_shared"));
        assert!(matches!(result, Err(StoreError::VaultIdTaken { .. })));
    }

    #[test]
    fn vault_id_reusable_after_revoke() {
        let (store, _dir) = create_test_store();
        let first = UserId::generate();

        store.insert_vault(&vault(first, "cust_x")).unwrap();
        store.delete_vault(&first).unwrap();
        store
            .insert_vault(&vault(UserId::generate(), "cust_x"))
            .unwrap();
    }

    #[test]
    fn charge_history_newest_first() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        let first = charge(user_id, dec!(10.00), "txn_1");
        store.append_charge(&first).unwrap();

        let second = charge(user_id, dec!(20.00), "txn_2");
        store.append_charge(&second).unwrap();

        // Another user's charges stay out of the listing.
        store
            .append_charge(&charge(UserId::generate(), dec!(1), "txn_other"))
            .unwrap();

        let retrieved = store.get_charge(&first.id).unwrap().unwrap();
        assert_eq!(retrieved, first);

        let charges = store.list_charges_by_user(&user_id, 10, 0).unwrap();
        assert_eq!(charges.len(), 2);
        assert_eq!(charges[0].transaction_id.as_str(), "txn_2");
        assert_eq!(charges[1].transaction_id.as_str(), "txn_1");

        let page1 = store.list_charges_by_user(&user_id, 1, 0).unwrap();
        let page2 = store.list_charges_by_user(&user_id, 1, 1).unwrap();
        assert_eq!(page1[0].id, second.id);
        assert_eq!(page2[0].id, first.id);
    }

    #[test]
    fn rapid_charges_list_in_reverse_order() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        let appended: Vec<ChargeId> = (0..50)
            .map(|i| {
                let log = charge(user_id, dec!(1), &format!("txn_{i}"));
                store.append_charge(&log).unwrap();
                log.id
            })
            .collect();

        let listed: Vec<ChargeId> = store
            .list_charges_by_user(&user_id, 100, 0)
            .unwrap()
            .into_iter()
            .map(|log| log.id)
            .collect();

        let expected: Vec<ChargeId> = appended.into_iter().rev().collect();
        assert_eq!(listed, expected);
    }

    #[test]
    fn charges_survive_revoke() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::generate();

        store.insert_vault(&vault(user_id, "cust_keep")).unwrap();
        store
            .append_charge(&charge(user_id, dec!(5), "txn_keep"))
            .unwrap();
        store.delete_vault(&user_id).unwrap();

        assert_eq!(store.list_charges_by_user(&user_id, 10, 0).unwrap().len(), 1);
    }

    #[test]
    fn records_persist_across_reopen() {
        let dir = TempDir::new().unwrap();
        let user_id = UserId::generate();

        {
            let store = RocksStore::open(dir.path()).unwrap();
            store.insert_vault(&vault(user_id, "cust_persist")).unwrap();
        }

        let store = RocksStore::open(dir.path()).unwrap();
        assert!(store.has_vault(&user_id).unwrap());
    }
}
