//! Pieces shared by every service config.
//!
//! Provides [`TomlConfig`] (decode / encode / load / save), the
//! [`ModelRegistry`] model-list operations, [`ConfigError`], and
//! [`ConfigPaths`] for the platform default file locations.

pub mod codec;
pub mod error;
pub mod paths;
pub mod registry;
pub mod sections;

pub use codec::{read_config_file, write_atomically, TomlConfig};
pub use error::{ConfigError, ErrorKind};
pub use paths::{ConfigPaths, Service};
pub use registry::{ModelEntry, ModelRegistry};
pub use sections::{GrpcConfig, LoggingConfig};
