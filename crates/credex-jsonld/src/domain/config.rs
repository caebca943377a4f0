//! LD-proof format configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use credex_jsonld::domain::{AutoAcceptPolicy, JsonLdFormatConfig};
//!
//! let config = JsonLdFormatConfig::default()
//!     .with_default_auto_accept(AutoAcceptPolicy::ContentApproved);
//! config.validate()?;
//! ```

use super::errors::ConfigError;
use super::value_objects::{AutoAcceptPolicy, LD_PROOF_FORMAT_FAMILY};
use std::env;

/// Agent-level settings for the LD-proof format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonLdFormatConfig {
    /// Policy applied when an exchange record sets none.
    pub default_auto_accept: AutoAcceptPolicy,
    /// Prefix identifying this format family in format specs.
    pub format_family_prefix: String,
}

impl Default for JsonLdFormatConfig {
    fn default() -> Self {
        Self {
            default_auto_accept: AutoAcceptPolicy::Never,
            format_family_prefix: LD_PROOF_FORMAT_FAMILY.to_string(),
        }
    }
}

impl JsonLdFormatConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CREDEX_AUTO_ACCEPT_CREDENTIALS`: `always`, `never` or `contentApproved` (default: never)
    /// - `CREDEX_FORMAT_FAMILY_PREFIX`: format family prefix (default: aries/ld-proof-vc)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = env::var("CREDEX_AUTO_ACCEPT_CREDENTIALS") {
            config.default_auto_accept = AutoAcceptPolicy::parse(value.trim())
                .ok_or(ConfigError::InvalidAutoAccept(value))?;
        }

        if let Ok(prefix) = env::var("CREDEX_FORMAT_FAMILY_PREFIX") {
            config.format_family_prefix = prefix;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // An empty prefix would match every format in a mixed-format message
        if self.format_family_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyFormatFamily);
        }
        Ok(())
    }

    /// Builder-style method to set the agent default policy
    pub fn with_default_auto_accept(mut self, policy: AutoAcceptPolicy) -> Self {
        self.default_auto_accept = policy;
        self
    }

    /// Builder-style method to set the format family prefix
    pub fn with_format_family_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.format_family_prefix = prefix.into();
        self
    }
}
