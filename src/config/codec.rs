//! TOML codec and file persistence shared by all service configs.
//!
//! Every config type implements [`TomlConfig`] and gets decode, encode, load
//! and save for free. Saves go through [`write_atomically`], which writes a
//! temporary file next to the target and renames it into place, so an
//! interrupted save never leaves the target missing or truncated.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use super::ConfigError;

// ---------------------------------------------------------------------------
// TomlConfig
// ---------------------------------------------------------------------------

/// A server configuration persisted as a TOML file.
pub trait TomlConfig: Serialize + DeserializeOwned + Default {
    /// Short service name used in logs and error messages.
    const SERVICE: &'static str;

    /// Decode a config from TOML text.
    ///
    /// Malformed text and type mismatches both yield [`ConfigError::Decode`];
    /// no partially populated value is ever returned.
    fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| {
            log::error!("{} config: decode failed: {source}", Self::SERVICE);
            ConfigError::Decode {
                service: Self::SERVICE,
                source,
            }
        })
    }

    /// Encode the config as TOML. Sections appear in declaration order.
    fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|source| {
            log::error!("{} config: encode failed: {source}", Self::SERVICE);
            ConfigError::Encode {
                service: Self::SERVICE,
                source,
            }
        })
    }

    /// Replace `self` with the config decoded from `text`.
    ///
    /// `self` is left untouched when decoding fails.
    fn replace_from_toml_str(&mut self, text: &str) -> Result<(), ConfigError> {
        *self = Self::from_toml_str(text)?;
        Ok(())
    }

    /// Read and decode the config file at `path`.
    ///
    /// A missing file is reported as [`ConfigError::NotFound`], other read
    /// failures as [`ConfigError::Io`].
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = read_config_file(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("{} config loaded from {}", Self::SERVICE, path.display());
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the default config.
    fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound { .. }) => {
                log::info!(
                    "{} config not found at {}; using defaults",
                    Self::SERVICE,
                    path.display()
                );
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Encode and atomically write the config to `path`.
    ///
    /// Returns the text that was written.
    fn save(&self, path: &Path) -> Result<String, ConfigError> {
        let text = self.to_toml_string()?;
        write_atomically(path, &text)?;
        log::debug!("{} config saved to {}", Self::SERVICE, path.display());
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

/// Read a config file, separating "absent" from "unreadable".
pub fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            log::warn!("config file not found: {}", path.display());
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            log::error!("failed to read {}: {e}", path.display());
            ConfigError::io(path, e)
        }
    })
}

/// Write `text` to a temporary file beside `path`, then rename it over `path`.
///
/// Parent directories are created as needed.
pub fn write_atomically(path: &Path, text: &str) -> Result<(), ConfigError> {
    let result = replace_file(path, text);
    if let Err(e) = &result {
        log::error!("failed to save {}: {e}", path.display());
    }
    result
}

fn replace_file(path: &Path, text: &str) -> Result<(), ConfigError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::io(&dir, e))?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| ConfigError::io(&dir, e))?;
    tmp.write_all(text.as_bytes())
        .map_err(|e| ConfigError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| ConfigError::io(tmp.path(), e))?;

    tmp.persist(path)
        .map_err(|e| ConfigError::io(path, e.error))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorKind;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(rename = "Version")]
        version: i64,
        #[serde(rename = "Name")]
        name: Option<String>,
    }

    impl Default for Sample {
        fn default() -> Self {
            Self {
                version: 1,
                name: None,
            }
        }
    }

    impl TomlConfig for Sample {
        const SERVICE: &'static str = "sample";
    }

    #[test]
    fn save_returns_written_text() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("sample.toml");

        let cfg = Sample {
            version: 2,
            name: Some("x".into()),
        };
        let text = cfg.save(&path).expect("save");

        let on_disk = std::fs::read_to_string(&path).expect("read");
        assert_eq!(text, on_disk);
        assert_eq!(Sample::load(&path).expect("load"), cfg);
    }

    #[test]
    fn save_replaces_existing_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("sample.toml");
        std::fs::write(&path, "garbage that is much longer than the new content").unwrap();

        Sample::default().save(&path).expect("save");
        assert_eq!(Sample::load(&path).expect("load"), Sample::default());

        // Only the target remains; the temporary file was renamed away.
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("a").join("b").join("sample.toml");
        Sample::default().save(&path).expect("save");
        assert!(path.exists());
    }

    #[test]
    fn load_missing_is_not_found() {
        let dir = tempdir().expect("temp dir");
        let err = Sample::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
        assert_eq!(err.kind(), ErrorKind::FileIo);
    }

    #[test]
    fn load_invalid_is_decode_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "Version = \"three\"\n").unwrap();

        let err = Sample::load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let dir = tempdir().expect("temp dir");
        let cfg = Sample::load_or_default(&dir.path().join("missing.toml")).expect("default");
        assert_eq!(cfg, Sample::default());
    }

    #[test]
    fn load_or_default_still_reports_decode_errors() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "Version = [").unwrap();
        assert!(Sample::load_or_default(&path).is_err());
    }

    #[test]
    fn failed_replace_leaves_value_untouched() {
        let mut cfg = Sample {
            version: 7,
            name: Some("keep".into()),
        };
        let err = cfg
            .replace_from_toml_str("Version = \"not a number\"\n")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(cfg.version, 7);
        assert_eq!(cfg.name.as_deref(), Some("keep"));

        cfg.replace_from_toml_str("Version = 9\n").expect("replace");
        assert_eq!(cfg.version, 9);
        assert!(cfg.name.is_none());
    }
}
