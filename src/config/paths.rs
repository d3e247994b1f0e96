//! Default config file locations using the `dirs` crate.
//!
//! Layout:
//!
//!   Windows: %APPDATA%\speechsvr\<file>
//!   macOS:   ~/Library/Application Support/speechsvr/<file>
//!   Linux:   ~/.config/speechsvr/<file>

use std::fmt;
use std::path::PathBuf;

/// The speech servers this crate knows how to configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Speech recognizer server.
    Recognizer,
    /// Dialogue / orchestration server.
    Dialogue,
    /// Voice biometrics server.
    Biometrics,
}

impl Service {
    pub const ALL: [Service; 3] = [Self::Recognizer, Self::Dialogue, Self::Biometrics];

    /// File name the server expects its config under.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Recognizer => "cubicsvr.cfg.toml",
            Self::Dialogue => "diathekesvr.cfg.toml",
            Self::Biometrics => "lunasvr.cfg.toml",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Recognizer => "recognizer",
            Self::Dialogue => "dialogue",
            Self::Biometrics => "biometrics",
        };
        f.write_str(name)
    }
}

/// Holds the resolved directory for config files.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Directory holding one config file per service.
    pub config_dir: PathBuf,
}

impl ConfigPaths {
    const APP_NAME: &'static str = "speechsvr";

    /// Resolves the config directory using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);
        Self { config_dir }
    }

    /// Full path of the given service's config file.
    pub fn config_file(&self, service: Service) -> PathBuf {
        self.config_dir.join(service.file_name())
    }
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_non_empty() {
        let paths = ConfigPaths::new();
        assert!(paths.config_dir.to_str().is_some_and(|s| !s.is_empty()));
        assert!(paths
            .config_file(Service::Dialogue)
            .file_name()
            .is_some_and(|n| n == "diathekesvr.cfg.toml"));
    }

    #[test]
    fn file_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            Service::ALL.iter().map(|s| s.file_name()).collect();
        assert_eq!(names.len(), Service::ALL.len());
    }
}
