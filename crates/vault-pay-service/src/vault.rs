//! Vault lookups, linking, and charging.

use std::sync::Arc;

use rust_decimal::Decimal;

use vault_pay_braintree::{Processor, ProcessorError, SaleOutcome, SaleRequest};
use vault_pay_core::{Amount, ChargeLog, UserId, VaultId, VaultRecord};
use vault_pay_store::{Store, StoreError};

use crate::error::{ChargeError, VaultError};

/// Maximum page size for charge history.
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Links users to vaulted payment methods and charges them.
#[derive(Clone)]
pub struct VaultService {
    store: Arc<dyn Store>,
    processor: Option<Arc<dyn Processor>>,
}

impl VaultService {
    /// Create a service over a store and a processor.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, processor: Arc<dyn Processor>) -> Self {
        Self {
            store,
            processor: Some(processor),
        }
    }

    /// Create a service for lookups, linking, and history only.
    ///
    /// Charges fail with `ProcessorError::Configuration` before anything is
    /// submitted.
    #[must_use]
    pub fn without_processor(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            processor: None,
        }
    }

    /// Return the vault record for a user, or `None` if they have not linked one.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store fails.
    pub fn find_by_user(&self, user_id: &UserId) -> Result<Option<VaultRecord>, VaultError> {
        Ok(self.store.get_vault(user_id)?)
    }

    /// Whether the user has a linked payment method.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store fails.
    pub fn has_vault(&self, user_id: &UserId) -> Result<bool, VaultError> {
        Ok(self.store.has_vault(user_id)?)
    }

    /// Return the vault record that owns a vault id.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store fails.
    pub fn find_by_vault_id(&self, vault_id: &VaultId) -> Result<Option<VaultRecord>, VaultError> {
        Ok(self.store.get_vault_by_vault_id(vault_id)?)
    }

    /// Link a vaulted payment method to a user.
    ///
    /// # Errors
    ///
    /// - `VaultError::AlreadyLinked` if the user already has a record.
    /// - `VaultError::VaultIdTaken` if another user owns the vault id.
    pub fn link_vault(
        &self,
        user_id: UserId,
        vault_id: VaultId,
    ) -> Result<VaultRecord, VaultError> {
        let record = VaultRecord::new(user_id, vault_id);

        self.store.insert_vault(&record).map_err(|e| match e {
            StoreError::VaultExists { user_id } => VaultError::AlreadyLinked { user_id },
            StoreError::VaultIdTaken { vault_id } => VaultError::VaultIdTaken { vault_id },
            other => VaultError::Store(other),
        })?;

        tracing::info!(user_id = %record.user_id, vault_id = %record.vault_id, "Vault linked");
        Ok(record)
    }

    /// Remove a user's vault record. Their charge history is kept.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if the user has no record.
    pub fn revoke_vault(&self, user_id: &UserId) -> Result<VaultRecord, VaultError> {
        let record = self.store.delete_vault(user_id).map_err(|e| match e {
            StoreError::NotFound => VaultError::NotFound { user_id: *user_id },
            other => VaultError::Store(other),
        })?;

        tracing::info!(user_id = %record.user_id, vault_id = %record.vault_id, "Vault revoked");
        Ok(record)
    }

    /// Charge a vaulted payment method.
    ///
    /// The amount is rounded to cents (half-to-even) and submitted as a sale for
    /// immediate settlement. A charge log is written only if the processor approves
    /// the sale.
    ///
    /// # Errors
    ///
    /// - `ChargeError::InvalidAmount` if the rounded amount is not chargeable.
    /// - `ChargeError::Declined` if the processor refused the sale.
    /// - `ChargeError::Processor` if the outcome is unknown.
    /// - `ChargeError::Unrecorded` if the sale succeeded but the log write failed.
    pub async fn charge(
        &self,
        record: &VaultRecord,
        amount: Decimal,
    ) -> Result<ChargeLog, ChargeError> {
        let amount = Amount::new(amount).map_err(|e| {
            tracing::error!(
                user_id = %record.user_id,
                amount = %amount,
                vault_id = %record.vault_id,
                error = %e,
                "Failed to charge: invalid amount"
            );
            ChargeError::InvalidAmount(e)
        })?;

        let sale = SaleRequest::settle(record.vault_id.clone(), amount);

        let outcome = match &self.processor {
            Some(processor) => processor.create_sale(&sale).await,
            None => Err(ProcessorError::Configuration(
                "no payment processor configured".into(),
            )),
        };

        let outcome = outcome.map_err(|e| {
            tracing::error!(
                user_id = %record.user_id,
                amount = %amount,
                vault_id = %record.vault_id,
                error = %e,
                "Failed to charge: processor error"
            );
            ChargeError::Processor(e)
        })?;

        let transaction_id = match outcome {
            SaleOutcome::Approved { transaction_id, .. } => transaction_id,
            SaleOutcome::Declined { message, status } => {
                tracing::error!(
                    user_id = %record.user_id,
                    amount = %amount,
                    vault_id = %record.vault_id,
                    reason = %message,
                    status = ?status,
                    "Failed to charge: declined"
                );
                return Err(ChargeError::Declined { message });
            }
        };

        let log = ChargeLog::new(record.user_id, amount, transaction_id);
        if let Err(source) = self.store.append_charge(&log) {
            tracing::error!(
                user_id = %record.user_id,
                amount = %amount,
                vault_id = %record.vault_id,
                transaction_id = %log.transaction_id,
                error = %source,
                "Charge settled but charge log write failed"
            );
            return Err(ChargeError::Unrecorded {
                transaction_id: log.transaction_id,
                amount,
                source,
            });
        }

        tracing::info!(
            user_id = %log.user_id,
            amount = %log.amount,
            transaction_id = %log.transaction_id,
            "Charge recorded"
        );
        Ok(log)
    }

    /// Look up a user's vault record and charge it.
    ///
    /// # Errors
    ///
    /// Returns `ChargeError::NoVault` if the user has no record, otherwise as
    /// [`VaultService::charge`].
    pub async fn charge_user(
        &self,
        user_id: &UserId,
        amount: Decimal,
    ) -> Result<ChargeLog, ChargeError> {
        let Some(record) = self.store.get_vault(user_id)? else {
            tracing::warn!(
                user_id = %user_id,
                amount = %amount,
                "Charge requested without a vault"
            );
            return Err(ChargeError::NoVault { user_id: *user_id });
        };

        self.charge(&record, amount).await
    }

    /// List a user's charge logs, newest first. `limit` is capped at
    /// [`MAX_HISTORY_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the store fails.
    pub fn charge_history(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ChargeLog>, VaultError> {
        let limit = limit.min(MAX_HISTORY_LIMIT);
        Ok(self.store.list_charges_by_user(user_id, limit, offset)?)
    }
}
