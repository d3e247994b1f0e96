//! Speech recognizer server config (`cubicsvr.cfg.toml`).
//!
//! Field names are part of the file contract with deployed servers and are
//! kept exactly as the server reads them: root and section keys are
//! lowercase (`server`, `models`, `confidence`), leaf keys are capitalised
//! (`Address`, `ModelConfigPath`, `LMPath`).

use serde::{Deserialize, Serialize};

use crate::config::{GrpcConfig, LoggingConfig, ModelEntry, ModelRegistry, TomlConfig};

/// Schema version written by [`RecognizerConfig::new`].
pub const RECOGNIZER_CONFIG_VERSION: i64 = 5;

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub grpc: GrpcConfig,
    pub http: Option<HttpConfig>,
}

/// `server.http`: REST API and operations listeners.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub api: Option<HttpApiConfig>,
    pub ops: Option<HttpOpsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HttpApiConfig {
    pub address: String,
    pub cert_file: Option<String>,
    pub key_file: Option<String>,
    pub enable_web_demo: Option<bool>,
    pub web_root_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HttpOpsConfig {
    pub address: String,
    pub cert_file: Option<String>,
    pub key_file: Option<String>,
}

// ---------------------------------------------------------------------------
// License / limits / storage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LicenseConfig {
    pub key_file: String,
    pub usage_log: Option<String>,
}

/// `recognizer`: per-stream resource limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(rename = "MaxTTL")]
    pub max_ttl: Option<i64>,
    #[serde(rename = "MaxIdleTimeout")]
    pub max_idle_timeout: Option<i64>,
    /// Must stay within `i64::MAX`; TOML integers are signed.
    #[serde(rename = "MaxAudioBytes")]
    pub max_audio_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "BasePath")]
    pub base_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

/// `models[].confidence`: optional confidence-estimation assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    #[serde(rename = "ModelPath")]
    pub model_path: String,
    #[serde(rename = "LMPath")]
    pub lm_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizerModel {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ModelConfigPath")]
    pub model_config_path: String,
    #[serde(rename = "FormatterConfigPath")]
    pub formatter_config_path: Option<String>,
    pub confidence: Option<ConfidenceConfig>,
}

impl ModelEntry for RecognizerModel {
    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// RecognizerConfig (top-level)
// ---------------------------------------------------------------------------

/// Top-level recognizer server configuration.
///
/// Sections that are `Option` are left `None` when absent from a decoded
/// file; only [`RecognizerConfig::new`] fills them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizerConfig {
    #[serde(rename = "Version")]
    pub version: i64,
    pub server: ServerConfig,
    pub logging: Option<LoggingConfig>,
    pub license: LicenseConfig,
    pub recognizer: Option<LimitsConfig>,
    pub storage: Option<StorageConfig>,
    pub models: Vec<RecognizerModel>,
}

impl RecognizerConfig {
    /// Config with the server's stock defaults (gRPC on `:9000`).
    pub fn new() -> Self {
        Self {
            version: RECOGNIZER_CONFIG_VERSION,
            server: ServerConfig {
                grpc: GrpcConfig::with_address(":9000"),
                http: None,
            },
            logging: Some(LoggingConfig::default()),
            license: LicenseConfig::default(),
            recognizer: Some(LimitsConfig::default()),
            storage: Some(StorageConfig::default()),
            models: Vec::new(),
        }
    }

    /// Append a model with only its config path set.
    pub fn add_model(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
    ) {
        self.push_model(RecognizerModel {
            id: id.into(),
            name: name.into(),
            model_config_path: path.into(),
            formatter_config_path: None,
            confidence: None,
        });
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TomlConfig for RecognizerConfig {
    const SERVICE: &'static str = "recognizer";
}

impl ModelRegistry for RecognizerConfig {
    type Model = RecognizerModel;

    fn models(&self) -> &[RecognizerModel] {
        &self.models
    }

    fn models_mut(&mut self) -> &mut Vec<RecognizerModel> {
        &mut self.models
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
