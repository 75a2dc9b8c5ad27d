use serde::{Deserialize, Serialize};

use crate::utils::{PHONE_DEFAULT_PORT, PHONE_DEFAULT_TIMEOUT_MS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneLinkConfig {
    pub bind_address: String,
    pub port: u16,
    /// Receive timeout per tick [ms].
    pub timeout_ms: u64,
    pub enabled: bool,
}

impl Default for PhoneLinkConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: PHONE_DEFAULT_PORT,
            timeout_ms: PHONE_DEFAULT_TIMEOUT_MS,
            enabled: false,
        }
    }
}
