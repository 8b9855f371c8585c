//! Vault-pay service layer.
//!
//! This crate ties the store and the processor client together:
//!
//! - Vault lookup (`find_by_user`, `has_vault`) and lifecycle (`link_vault`, `revoke_vault`)
//! - Charging a vaulted payment method and recording the charge log
//! - Charge history
//! - Configuration from the environment and secrets files
//!
//! # Charge outcomes
//!
//! [`VaultService::charge`] separates a processor refusal
//! ([`ChargeError::Declined`]) from an unknown outcome
//! ([`ChargeError::Processor`]). Callers that only care whether a log was
//! produced can use `.ok()`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod vault;

pub use config::ServiceConfig;
pub use error::{ChargeError, VaultError};
pub use vault::{VaultService, MAX_HISTORY_LIMIT};
