//! Typed TOML configuration for the speech servers.
//!
//! * [`recognizer::RecognizerConfig`] — speech recognizer (`cubicsvr`).
//! * [`dialogue::DialogueConfig`] — dialogue / orchestration (`diathekesvr`),
//!   with license and model paths resolved against a resource layout on save.
//! * [`biometrics::BiometricsConfig`] — voice biometrics (`lunasvr`).
//!
//! All three implement [`config::TomlConfig`] (decode, encode, load, save)
//! and [`config::ModelRegistry`] (ordered model list).
//!
//! # Quick start
//!
//! ```rust,no_run
//! use speechsvr_config::config::{ModelRegistry, TomlConfig};
//! use speechsvr_config::recognizer::RecognizerConfig;
//!
//! let path = std::path::Path::new("cubicsvr.cfg.toml");
//! let mut config = RecognizerConfig::load_or_default(path).unwrap();
//! config.add_model("en_US-16", "English (US)", "models/en_US-16/model.config");
//! config.remove_model("old");
//! config.save(path).unwrap();
//! ```

pub mod biometrics;
pub mod config;
pub mod dialogue;
pub mod recognizer;

pub use config::{ConfigError, ErrorKind, ModelRegistry, TomlConfig};
