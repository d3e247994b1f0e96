//! Dialogue server configuration and its resource path layout.
//!
//! ```rust,no_run
//! use speechsvr_config::config::TomlConfig;
//! use speechsvr_config::dialogue::{DialogueConfig, PathConfiguration};
//!
//! let mut config = DialogueConfig::new();
//! config
//!     .set_path_configuration(PathConfiguration::new("Speech", "license", "models"))
//!     .unwrap();
//! config.license.key_file = "site.license".into();
//! config.add_model("menu", "Menu", "menu.json", "en_US", None, None, None);
//!
//! // The file holds <documents>/Speech/models/menu.json; `text` keeps "menu.json".
//! let text = config
//!     .save(std::path::Path::new("diathekesvr.cfg.toml"))
//!     .unwrap();
//! println!("{text}");
//! ```

pub mod layout;
pub mod settings;

pub use layout::{platform_document_dir, PathConfiguration, ResourceDirs};
pub use settings::{
    BackendConfig, DialogueConfig, DialogueModel, HttpConfig, LicenseConfig, ServerConfig,
    ServicesConfig, StorageConfig, WebDemoConfig, DIALOGUE_CONFIG_VERSION,
};
