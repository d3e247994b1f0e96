//! Sections that appear with the same shape in several service configs.

use serde::{Deserialize, Serialize};

/// `server.grpc`: gRPC listener address and optional TLS material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GrpcConfig {
    /// Listen address, e.g. `":9000"` or `"127.0.0.1:2727"`.
    pub address: Option<String>,
    pub cert_file: Option<String>,
    pub key_file: Option<String>,
}

impl GrpcConfig {
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Self::default()
        }
    }
}

/// `logging`: verbosity switches read by the server at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoggingConfig {
    pub disable_info: Option<bool>,
    pub enable_debug: Option<bool>,
    pub enable_trace: Option<bool>,
}
