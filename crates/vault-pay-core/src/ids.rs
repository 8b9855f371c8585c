//! Identifier types for vault-pay.
//!
//! Local identifiers (`UserId`, `ChargeId`) are fixed-width and generated by us.
//! Processor-issued identifiers (`VaultId`, `ProcessorTransactionId`) are opaque
//! strings whose only constraint is a length bound matching their storage columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, SystemTime};
use ulid::{Generator, Ulid};

/// Process-wide ULID source; IDs generated in the same millisecond still increase.
static CHARGE_ID_GENERATOR: Mutex<Generator> = Mutex::new(Generator::new());

/// A user identifier (UUID format).
///
/// User IDs come from the host application's account system.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(uuid::Uuid);

impl UserId {
    /// Create a new identifier from a UUID.
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier (primarily for testing).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Return the bytes of the UUID (16 bytes).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Create a `UserId` from its 16 raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Uuid::from_bytes(bytes))
    }
}

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = uuid::Uuid::parse_str(s).map_err(|_| IdError::InvalidUuid)?;
        Ok(Self(uuid))
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0.to_string()
    }
}

/// A charge log identifier using ULID for time-ordering.
///
/// Charge IDs are assigned locally so a user's charge history sorts
/// chronologically by key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChargeId(Ulid);

impl ChargeId {
    /// Generate a new `ChargeId` with the current timestamp.
    ///
    /// IDs from one process are strictly increasing, including IDs generated
    /// within the same millisecond.
    #[must_use]
    pub fn generate() -> Self {
        let mut generator = CHARGE_ID_GENERATOR
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let ulid = generator.generate().unwrap_or_else(|_| {
            // Random component exhausted for this millisecond.
            let next_ms = SystemTime::now() + Duration::from_millis(1);
            generator
                .generate_from_datetime(next_ms)
                .unwrap_or_else(|_| Ulid::new())
        });

        Self(ulid)
    }

    /// Return the bytes of the ULID (16 bytes).
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 16] {
        self.0.to_bytes()
    }

    /// Create a `ChargeId` from bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Ulid::from_bytes(bytes))
    }
}

impl FromStr for ChargeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ulid = Ulid::from_string(s).map_err(|_| IdError::InvalidUlid)?;
        Ok(Self(ulid))
    }
}

impl fmt::Debug for ChargeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChargeId({})", self.0)
    }
}

impl fmt::Display for ChargeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ChargeId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChargeId> for String {
    fn from(id: ChargeId) -> Self {
        id.0.to_string()
    }
}

/// Macro to define a bounded, opaque string identifier issued by the processor.
///
/// The generated newtype rejects empty values and values longer than `$max`
/// characters, and serializes as a plain string.
macro_rules! opaque_id_type {
    ($name:ident, $max:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Maximum length in characters.
            pub const MAX_LEN: usize = $max;

            /// Validate and wrap a raw identifier.
            ///
            /// # Errors
            ///
            /// Returns an error if the value is empty or longer than `MAX_LEN`.
            pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
                let value = value.into();
                if value.is_empty() {
                    return Err(IdError::Empty);
                }
                let len = value.chars().count();
                if len > Self::MAX_LEN {
                    return Err(IdError::TooLong {
                        len,
                        max: Self::MAX_LEN,
                    });
                }
                Ok(Self(value))
            }

            /// Return the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id_type!(
    VaultId,
    64,
    "A vault identifier: the processor's token for a stored payment method.\n\nUsed as the customer reference when submitting a sale."
);
opaque_id_type!(
    ProcessorTransactionId,
    128,
    "A transaction identifier returned by the processor for a successful sale."
);

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a valid UUID.
    #[error("invalid UUID format")]
    InvalidUuid,

    /// The input is not a valid ULID.
    #[error("invalid ULID format")]
    InvalidUlid,

    /// The input is empty.
    #[error("identifier must not be empty")]
    Empty,

    /// The input exceeds the column width.
    #[error("identifier too long: {len} > {max}")]
    TooLong {
        /// Length of the rejected input in characters.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },
}
