//! Braintree integration for vault-pay.
//!
//! This crate submits sales against vaulted payment methods. The [`Processor`]
//! trait is the seam the service charges through; [`BraintreeClient`] is the
//! HTTP implementation for a JSON gateway at a configured URL.
//!
//! # Example
//!
//! ```no_run
//! use vault_pay_braintree::{
//!     BraintreeClient, ClientOptions, Credentials, Processor, SaleOutcome, SaleRequest,
//! };
//! use vault_pay_core::{Amount, VaultId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BraintreeClient::new(
//!     "https://gateway.internal.example",
//!     Credentials::new("merchant", "public", "private"),
//!     ClientOptions::default(),
//! )?;
//!
//! let sale = SaleRequest::settle(VaultId::new("cust_123")?, "19.99".parse::<Amount>()?);
//! match client.create_sale(&sale).await? {
//!     SaleOutcome::Approved { transaction_id, .. } => println!("charged: {transaction_id}"),
//!     SaleOutcome::Declined { message, .. } => println!("declined: {message}"),
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod processor;
pub mod types;

pub use client::{BraintreeClient, ClientOptions, Credentials};
pub use error::ProcessorError;
pub use processor::{Processor, SaleOutcome, SaleRequest};
