//! Core types for vault-pay.
//!
//! This crate provides the data model shared by the store, the processor client,
//! and the service:
//!
//! - **Identifiers**: `UserId`, `ChargeId`, `VaultId`, `ProcessorTransactionId`
//! - **Money**: `Amount` (two fraction digits, round-half-to-even)
//! - **Vault**: `VaultRecord`, the link between a user and a stored payment method
//! - **Charges**: `ChargeLog`, the append-only record of a settled sale
//!
//! # Amounts
//!
//! Amounts are `rust_decimal::Decimal` values quantized to cents. Rounding follows
//! banker's rounding, so `10.005` becomes `10.00` and `10.015` becomes `10.02`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod amount;
pub mod charge;
pub mod ids;
pub mod vault;

pub use amount::{Amount, AmountError, MAX_AMOUNT};
pub use charge::ChargeLog;
pub use ids::{ChargeId, IdError, ProcessorTransactionId, UserId, VaultId};
pub use vault::VaultRecord;
