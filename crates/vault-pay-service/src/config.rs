//! Service configuration.

use serde::Deserialize;
use std::path::Path;

use vault_pay_braintree::{ClientOptions, Credentials, ProcessorError};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Path to `RocksDB` data directory (default: "/data/vault-pay").
    pub data_dir: String,

    /// Base URL of the JSON transaction gateway.
    pub braintree_gateway_url: Option<String>,

    /// Braintree merchant ID.
    pub braintree_merchant_id: Option<String>,

    /// Braintree public key.
    pub braintree_public_key: Option<String>,

    /// Braintree private key.
    pub braintree_private_key: Option<String>,

    /// Processor request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Braintree secrets file structure.
#[derive(Debug, Deserialize)]
struct BraintreeSecrets {
    merchant_id: String,
    public_key: String,
    private_key: String,
    #[serde(default)]
    gateway_url: Option<String>,
}

/// Braintree settings as resolved from a secrets file or the environment.
#[derive(Debug, Default)]
struct BraintreeSettings {
    gateway_url: Option<String>,
    merchant_id: Option<String>,
    public_key: Option<String>,
    private_key: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        // Try to load Braintree secrets from file first, then fall back to env vars
        let braintree = load_braintree_secrets();

        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/vault-pay".into()),
            braintree_gateway_url: braintree
                .gateway_url
                .or_else(|| std::env::var("BRAINTREE_GATEWAY_URL").ok()),
            braintree_merchant_id: braintree.merchant_id,
            braintree_public_key: braintree.public_key,
            braintree_private_key: braintree.private_key,
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Whether the gateway URL and all Braintree credentials are present.
    #[must_use]
    pub fn has_braintree(&self) -> bool {
        self.braintree_gateway_url.is_some()
            && self.braintree_merchant_id.is_some()
            && self.braintree_public_key.is_some()
            && self.braintree_private_key.is_some()
    }

    /// Resolve the gateway URL, credentials, and client options.
    ///
    /// # Errors
    ///
    /// Returns `ProcessorError::Configuration` if the gateway URL or a
    /// credential is missing.
    pub fn braintree(&self) -> Result<(String, Credentials, ClientOptions), ProcessorError> {
        let require = |value: &Option<String>, name: &str| {
            value
                .clone()
                .ok_or_else(|| ProcessorError::Configuration(format!("{name} not configured")))
        };

        let gateway_url = require(&self.braintree_gateway_url, "BRAINTREE_GATEWAY_URL")?;
        let credentials = Credentials::new(
            require(&self.braintree_merchant_id, "BRAINTREE_MERCHANT_ID")?,
            require(&self.braintree_public_key, "BRAINTREE_PUBLIC_KEY")?,
            require(&self.braintree_private_key, "BRAINTREE_PRIVATE_KEY")?,
        );

        let options = ClientOptions {
            timeout_seconds: self.request_timeout_seconds,
        };

        Ok((gateway_url, credentials, options))
    }
}

/// Load Braintree secrets from file or environment.
fn load_braintree_secrets() -> BraintreeSettings {
    let secret_paths = [
        ".secrets/braintree.json",
        "vault-pay/.secrets/braintree.json",
        "../.secrets/braintree.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<BraintreeSecrets>(path) {
            tracing::info!(path = %path, "Loaded Braintree secrets from file");
            return BraintreeSettings {
                gateway_url: secrets.gateway_url,
                merchant_id: Some(secrets.merchant_id),
                public_key: Some(secrets.public_key),
                private_key: Some(secrets.private_key),
            };
        }
    }

    // Fall back to environment variables
    tracing::debug!("Braintree secrets file not found, using environment variables");
    BraintreeSettings {
        gateway_url: None,
        merchant_id: std::env::var("BRAINTREE_MERCHANT_ID").ok(),
        public_key: std::env::var("BRAINTREE_PUBLIC_KEY").ok(),
        private_key: std::env::var("BRAINTREE_PRIVATE_KEY").ok(),
    }
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: "/data/vault-pay".into(),
            braintree_gateway_url: None,
            braintree_merchant_id: None,
            braintree_public_key: None,
            braintree_private_key: None,
            request_timeout_seconds: 30,
        }
    }
}
