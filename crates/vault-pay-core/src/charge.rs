//! Charge logs.
//!
//! A [`ChargeLog`] is written once for every sale the processor accepted and is
//! never updated or deleted afterwards.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Amount, ChargeId, ProcessorTransactionId, UserId};

/// A settled charge against a user's vaulted payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeLog {
    /// Local log ID (ULID for time-ordering).
    pub id: ChargeId,

    /// The user who was charged.
    pub user_id: UserId,

    /// Amount charged, quantized to cents.
    pub amount: Amount,

    /// The processor's transaction ID.
    pub transaction_id: ProcessorTransactionId,

    /// When the log entry was created.
    pub timestamp: DateTime<Utc>,
}

impl ChargeLog {
    /// Create a log entry for a sale the processor accepted.
    #[must_use]
    pub fn new(user_id: UserId, amount: Amount, transaction_id: ProcessorTransactionId) -> Self {
        Self {
            id: ChargeId::generate(),
            user_id,
            amount,
            transaction_id,
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for ChargeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} charged ${} - {}",
            self.user_id, self.amount, self.transaction_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn display_format() {
        let user_id = UserId::generate();
        let log = ChargeLog::new(
            user_id,
            Amount::new(dec!(25)).unwrap(),
            ProcessorTransactionId::new("txn_9").unwrap(),
        );
        assert_eq!(log.to_string(), format!("{user_id} charged $25.00 - txn_9"));
    }

    #[test]
    fn serde_json_roundtrip() {
        let log = ChargeLog::new(
            UserId::generate(),
            Amount::new(dec!(1.5)).unwrap(),
            ProcessorTransactionId::new("txn_1").unwrap(),
        );
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["amount"], "1.50");
        let parsed: ChargeLog = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, log);
    }
}
