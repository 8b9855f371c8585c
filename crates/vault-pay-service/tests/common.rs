//! Common test utilities for vault-pay service tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use vault_pay_braintree::{Processor, ProcessorError, SaleOutcome, SaleRequest};
use vault_pay_core::{ProcessorTransactionId, UserId, VaultId, VaultRecord};
use vault_pay_service::VaultService;
use vault_pay_store::{RocksStore, Store};

/// What the scripted processor answers with.
#[derive(Debug, Clone)]
pub enum Script {
    /// Approve with this transaction id.
    Approve(&'static str),
    /// Decline with this message.
    Decline(&'static str),
    /// Fail with this HTTP status.
    Fail(u16),
}

/// A processor that answers every sale according to a fixed script and records
/// what it was asked.
pub struct ScriptedProcessor {
    script: Script,
    sales: Mutex<Vec<SaleRequest>>,
}

impl ScriptedProcessor {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            sales: Mutex::new(Vec::new()),
        }
    }

    pub fn sales(&self) -> Vec<SaleRequest> {
        self.sales.lock().unwrap().clone()
    }
}

#[async_trait]
impl Processor for ScriptedProcessor {
    async fn create_sale(&self, sale: &SaleRequest) -> Result<SaleOutcome, ProcessorError> {
        self.sales.lock().unwrap().push(sale.clone());

        match &self.script {
            Script::Approve(id) => Ok(SaleOutcome::Approved {
                transaction_id: ProcessorTransactionId::new(*id).unwrap(),
                status: Some("submitted_for_settlement".into()),
            }),
            Script::Decline(message) => Ok(SaleOutcome::Declined {
                message: (*message).to_string(),
                status: Some("processor_declined".into()),
            }),
            Script::Fail(status) => Err(ProcessorError::Api {
                status: *status,
                message: "scripted failure".into(),
            }),
        }
    }
}

/// Test harness containing a service over a fresh store.
pub struct TestHarness {
    pub service: VaultService,
    pub store: Arc<RocksStore>,
    pub processor: Arc<ScriptedProcessor>,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    pub fn new(script: Script) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Arc::new(RocksStore::open(temp_dir.path()).expect("Failed to open store"));
        let processor = Arc::new(ScriptedProcessor::new(script));

        let service = VaultService::new(store.clone(), processor.clone());

        Self {
            service,
            store,
            processor,
            _temp_dir: temp_dir,
        }
    }

    /// Link a fresh user to `vault_id` and return the record.
    pub fn linked_user(&self, vault_id: &str) -> VaultRecord {
        self.service
            .link_vault(UserId::generate(), VaultId::new(vault_id).unwrap())
            .expect("link succeeds")
    }

    pub fn charge_count(&self, user_id: &UserId) -> usize {
        self.store.list_charges_by_user(user_id, 100, 0).unwrap().len()
    }
}
