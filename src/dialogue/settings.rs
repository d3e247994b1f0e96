//! Dialogue server config (`diathekesvr.cfg.toml`).
//!
//! The license key file and every model's config file are kept relative to
//! the resource layout in memory. [`DialogueConfig::save`] writes a copy with
//! those two kinds of path resolved to absolute form, and hands back the
//! relative text. Certificate, key and storage paths are never rewritten.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::layout::{document_dir_from, DocumentDirLookup, PathConfiguration, ResourceDirs};
use crate::config::{
    read_config_file, write_atomically, ConfigError, GrpcConfig, LoggingConfig, ModelEntry,
    ModelRegistry, TomlConfig,
};

/// Schema version written by [`DialogueConfig::new`].
pub const DIALOGUE_CONFIG_VERSION: i64 = 3;

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub grpc: GrpcConfig,
    pub http: HttpConfig,
    pub webdemo: Option<WebDemoConfig>,
}

/// `server.http`: REST gateway. Timeouts are Go-style durations (`"30s"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HttpConfig {
    pub address: String,
    pub enabled: bool,
    pub read_timeout: Option<String>,
    pub write_timeout: Option<String>,
    pub idle_timeout: Option<String>,
    pub cert_file: Option<String>,
    pub key_file: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebDemoConfig {
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// Backend services
// ---------------------------------------------------------------------------

/// `services`: the recognizer (`cubic`) and biometrics (`luna`) backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicesConfig {
    pub cubic: BackendConfig,
    pub luna: BackendConfig,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            cubic: BackendConfig::disabled("127.0.0.1:9000"),
            luna: BackendConfig::disabled("127.0.0.1:9001"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BackendConfig {
    pub enabled: bool,
    pub address: String,
    pub insecure: Option<bool>,
    pub encoding: Option<String>,
}

impl BackendConfig {
    fn disabled(address: &str) -> Self {
        Self {
            enabled: false,
            address: address.into(),
            insecure: None,
            encoding: None,
        }
    }
}

// ---------------------------------------------------------------------------
// License / storage / models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LicenseConfig {
    /// Key file name, relative to the license directory.
    pub key_file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "AudioPath")]
    pub audio_path: Option<String>,
    #[serde(rename = "EventLogsPath")]
    pub event_logs_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueModel {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Model config file name, relative to the models directory.
    #[serde(rename = "ModelConfig")]
    pub model_config: String,
    #[serde(rename = "Language")]
    pub language: String,
    /// Recognizer model this dialogue model transcribes with.
    #[serde(rename = "CubicModelID")]
    pub cubic_model_id: Option<String>,
    /// Biometrics model used for speaker checks.
    #[serde(rename = "LunaModelID")]
    pub luna_model_id: Option<String>,
    #[serde(rename = "TranscribeModelID")]
    pub transcribe_model_id: Option<String>,
}

impl ModelEntry for DialogueModel {
    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// DialogueConfig (top-level)
// ---------------------------------------------------------------------------

/// Top-level dialogue server configuration.
///
/// Besides the file contents it carries the [`PathConfiguration`] and an
/// optional document root override used to resolve paths on save. Neither
/// is written to the file, and equality only looks at the file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    #[serde(rename = "Version")]
    pub version: i64,
    pub server: ServerConfig,
    pub services: ServicesConfig,
    pub logging: Option<LoggingConfig>,
    pub license: LicenseConfig,
    pub models: Vec<DialogueModel>,
    pub storage: Option<StorageConfig>,

    #[serde(skip)]
    path_configuration: PathConfiguration,
    #[serde(skip)]
    document_root: Option<PathBuf>,
    #[serde(skip, default = "default_document_dir_lookup")]
    document_dir_lookup: DocumentDirLookup,
}

fn default_document_dir_lookup() -> DocumentDirLookup {
    dirs::document_dir
}

impl PartialEq for DialogueConfig {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.server == other.server
            && self.services == other.services
            && self.logging == other.logging
            && self.license == other.license
            && self.models == other.models
            && self.storage == other.storage
    }
}

impl DialogueConfig {
    /// Config with the server's stock defaults; both backends disabled.
    pub fn new() -> Self {
        Self {
            version: DIALOGUE_CONFIG_VERSION,
            server: ServerConfig {
                grpc: GrpcConfig::with_address(""),
                http: HttpConfig::default(),
                webdemo: Some(WebDemoConfig::default()),
            },
            services: ServicesConfig::default(),
            logging: Some(LoggingConfig::default()),
            license: LicenseConfig::default(),
            models: Vec::new(),
            storage: None,
            path_configuration: PathConfiguration::default(),
            document_root: None,
            document_dir_lookup: default_document_dir_lookup(),
        }
    }

    /// Load a file written by [`save`](TomlConfig::save), resolving paths
    /// against the given layout and root (`None`: platform document
    /// directory).
    ///
    /// License and model paths under the layout come back relative. Unlike
    /// [`load`](TomlConfig::load), an unresolvable document directory is an
    /// error here.
    pub fn load_with(
        path: &Path,
        path_configuration: PathConfiguration,
        document_root: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::from_toml_str(&read_config_file(path)?)?;
        config.path_configuration = path_configuration;
        config.document_root = document_root;
        config.make_relative()?;
        log::debug!("dialogue config loaded from {}", path.display());
        Ok(config)
    }

    /// Append a dialogue model. `path` is relative to the models directory.
    #[allow(clippy::too_many_arguments)]
    pub fn add_model(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
        language: impl Into<String>,
        cubic_model_id: Option<String>,
        luna_model_id: Option<String>,
        transcribe_model_id: Option<String>,
    ) {
        self.push_model(DialogueModel {
            id: id.into(),
            name: name.into(),
            model_config: path.into(),
            language: language.into(),
            cubic_model_id,
            luna_model_id,
            transcribe_model_id,
        });
    }

    // -----------------------------------------------------------------------
    // Path resolution
    // -----------------------------------------------------------------------

    pub fn path_configuration(&self) -> &PathConfiguration {
        &self.path_configuration
    }

    /// Switch to a new directory layout, creating any of its directories
    /// that do not exist yet.
    ///
    /// On failure the previous layout is kept.
    pub fn set_path_configuration(
        &mut self,
        path_configuration: PathConfiguration,
    ) -> Result<ResourceDirs, ConfigError> {
        let dirs = path_configuration.resolve(&self.document_dir()?);
        dirs.ensure_exist()?;
        log::debug!("dialogue resources under {}", dirs.resource.display());
        self.path_configuration = path_configuration;
        Ok(dirs)
    }

    /// Explicit base directory, if one was set.
    pub fn document_root(&self) -> Option<&Path> {
        self.document_root.as_deref()
    }

    /// Resolve paths under `root` instead of the platform document directory.
    pub fn set_document_root(&mut self, root: impl Into<PathBuf>) {
        self.document_root = Some(root.into());
    }

    pub fn with_document_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.set_document_root(root);
        self
    }

    /// The base directory paths are resolved against.
    pub fn document_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.document_root {
            Some(root) => Ok(root.clone()),
            None => document_dir_from(self.document_dir_lookup),
        }
    }

    /// Absolute resource directories for the current layout.
    pub fn resource_dirs(&self) -> Result<ResourceDirs, ConfigError> {
        Ok(self.path_configuration.resolve(&self.document_dir()?))
    }

    /// Copy with the license key file and model config paths made absolute.
    pub fn to_absolute(&self) -> Result<Self, ConfigError> {
        let dirs = self.resource_dirs()?;
        Ok(self.absolute_under(&dirs))
    }

    /// Turn absolute paths under the resource directories back into relative
    /// ones, e.g. after loading a file written by [`save`](TomlConfig::save).
    ///
    /// Paths outside the layout are left as they are.
    pub fn make_relative(&mut self) -> Result<(), ConfigError> {
        let dirs = self.resource_dirs()?;
        self.relativize_under(&dirs);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn set_document_dir_lookup(&mut self, lookup: DocumentDirLookup) {
        self.document_dir_lookup = lookup;
    }

    fn absolute_under(&self, dirs: &ResourceDirs) -> Self {
        let mut resolved = self.clone();
        resolved.license.key_file = dirs.license_file(&self.license.key_file);
        for model in &mut resolved.models {
            model.model_config = dirs.model_file(&model.model_config);
        }
        resolved
    }

    fn relativize_under(&mut self, dirs: &ResourceDirs) {
        self.license.key_file = dirs.license_relative(&self.license.key_file);
        for model in &mut self.models {
            model.model_config = dirs.model_relative(&model.model_config);
        }
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TomlConfig for DialogueConfig {
    const SERVICE: &'static str = "dialogue";

    /// Keeps the current layout and document root.
    fn replace_from_toml_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut decoded = Self::from_toml_str(text)?;
        decoded.path_configuration = std::mem::take(&mut self.path_configuration);
        decoded.document_root = self.document_root.take();
        decoded.document_dir_lookup = self.document_dir_lookup;
        *self = decoded;
        Ok(())
    }

    /// Decode and turn paths under the default layout in the platform
    /// document directory back into relative form.
    ///
    /// If the document directory cannot be resolved the paths are kept as
    /// stored; use [`DialogueConfig::load_with`] to pick a layout and root.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_toml_str(&read_config_file(path)?)?;
        match config.make_relative() {
            Ok(()) => {}
            Err(ConfigError::DocumentDirUnavailable) => {
                log::warn!("dialogue config paths kept as stored in {}", path.display());
            }
            Err(e) => return Err(e),
        }
        log::debug!("dialogue config loaded from {}", path.display());
        Ok(config)
    }

    /// Write the absolute-path variant to `path` and return the relative
    /// text. Nothing is written if the document directory cannot be resolved.
    fn save(&self, path: &Path) -> Result<String, ConfigError> {
        let dirs = self.resource_dirs()?;
        let absolute = self.absolute_under(&dirs).to_toml_string()?;
        let mut relative = self.clone();
        relative.relativize_under(&dirs);
        let relative = relative.to_toml_string()?;
        write_atomically(path, &absolute)?;
        log::debug!("dialogue config saved to {}", path.display());
        Ok(relative)
    }
}

impl ModelRegistry for DialogueConfig {
    type Model = DialogueModel;

    fn models(&self) -> &[DialogueModel] {
        &self.models
    }

    fn models_mut(&mut self) -> &mut Vec<DialogueModel> {
        &mut self.models
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
