//! Directory layout used to resolve dialogue resource paths.
//!
//! Layout under the platform document directory:
//!
//! ```text
//! <documents>/<resource>/<license>/   license key files
//! <documents>/<resource>/<models>/    model config files
//! ```
//!
//! The document directory comes from `dirs::document_dir`:
//!
//!   Windows: {FOLDERID_Documents}
//!   macOS:   ~/Documents
//!   Linux:   XDG_DOCUMENTS_DIR (usually ~/Documents)

use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// The three directory names that make up the resource layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfiguration {
    /// Resource root, directly under the document directory.
    pub resource_directory: String,
    /// License subdirectory of the resource root.
    pub license_directory: String,
    /// Models subdirectory of the resource root.
    pub models_directory: String,
}

impl PathConfiguration {
    pub fn new(
        resource_directory: impl Into<String>,
        license_directory: impl Into<String>,
        models_directory: impl Into<String>,
    ) -> Self {
        Self {
            resource_directory: resource_directory.into(),
            license_directory: license_directory.into(),
            models_directory: models_directory.into(),
        }
    }

    /// Absolute directories for this layout under `document_dir`.
    pub fn resolve(&self, document_dir: &Path) -> ResourceDirs {
        let resource = document_dir.join(&self.resource_directory);
        ResourceDirs {
            license: resource.join(&self.license_directory),
            models: resource.join(&self.models_directory),
            resource,
        }
    }

    /// `true` if `path` exists and is a directory.
    pub fn directory_exists(path: &Path) -> bool {
        std::fs::metadata(path).is_ok_and(|m| m.is_dir())
    }

    /// Create `path` and any missing parents. Existing directories are fine.
    pub fn create_directory(path: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(path).map_err(|e| {
            log::error!("failed to create directory {}: {e}", path.display());
            ConfigError::io(path, e)
        })
    }
}

impl Default for PathConfiguration {
    fn default() -> Self {
        Self::new("speechsvr", "license", "models")
    }
}

/// Resolved absolute directories of a [`PathConfiguration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDirs {
    pub resource: PathBuf,
    pub license: PathBuf,
    pub models: PathBuf,
}

impl ResourceDirs {
    /// Create whichever of the three directories do not exist yet.
    pub fn ensure_exist(&self) -> Result<(), ConfigError> {
        for dir in [&self.resource, &self.license, &self.models] {
            if PathConfiguration::directory_exists(dir) {
                continue;
            }
            PathConfiguration::create_directory(dir)?;
            log::info!("created directory {}", dir.display());
        }
        Ok(())
    }

    /// Absolute form of a license key file name.
    pub fn license_file(&self, relative: &str) -> String {
        absolutize(&self.license, relative)
    }

    /// Absolute form of a model config file name.
    pub fn model_file(&self, relative: &str) -> String {
        absolutize(&self.models, relative)
    }

    /// Inverse of [`license_file`](Self::license_file).
    pub fn license_relative(&self, path: &str) -> String {
        relativize(&self.license, path)
    }

    /// Inverse of [`model_file`](Self::model_file).
    pub fn model_relative(&self, path: &str) -> String {
        relativize(&self.models, path)
    }
}

/// How the document directory is found when no explicit root is set.
pub(crate) type DocumentDirLookup = fn() -> Option<PathBuf>;

/// Look up the platform document directory.
pub fn platform_document_dir() -> Result<PathBuf, ConfigError> {
    document_dir_from(dirs::document_dir)
}

pub(crate) fn document_dir_from(lookup: DocumentDirLookup) -> Result<PathBuf, ConfigError> {
    lookup().ok_or_else(|| {
        log::error!("could not resolve the platform document directory");
        ConfigError::DocumentDirUnavailable
    })
}

// An empty field means "not configured" and stays empty.
fn absolutize(base: &Path, relative: &str) -> String {
    if relative.is_empty() {
        return String::new();
    }
    base.join(relative).to_string_lossy().into_owned()
}

fn relativize(base: &Path, path: &str) -> String {
    match Path::new(path).strip_prefix(base) {
        Ok(rest) => rest.to_string_lossy().into_owned(),
        Err(_) => path.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn resolve_joins_components() {
        let layout = PathConfiguration::new("R", "L", "M");
        let dirs = layout.resolve(Path::new("/home/u/Documents"));
        assert_eq!(dirs.resource, PathBuf::from("/home/u/Documents/R"));
        assert_eq!(dirs.license, PathBuf::from("/home/u/Documents/R/L"));
        assert_eq!(dirs.models, PathBuf::from("/home/u/Documents/R/M"));
    }

    #[test]
    fn file_paths_round_trip() {
        let dirs = PathConfiguration::new("R", "L", "M").resolve(Path::new("/docs"));

        let abs = dirs.model_file("a.json");
        assert_eq!(Path::new(&abs), Path::new("/docs/R/M/a.json"));
        assert_eq!(dirs.model_relative(&abs), "a.json");

        let abs = dirs.license_file("key.lic");
        assert_eq!(Path::new(&abs), Path::new("/docs/R/L/key.lic"));
        assert_eq!(dirs.license_relative(&abs), "key.lic");
    }

    #[test]
    fn empty_and_foreign_paths_are_kept() {
        let dirs = PathConfiguration::new("R", "L", "M").resolve(Path::new("/docs"));
        assert_eq!(dirs.license_file(""), "");
        assert_eq!(dirs.model_relative("/elsewhere/a.json"), "/elsewhere/a.json");
        assert_eq!(dirs.model_relative("a.json"), "a.json");
    }

    #[test]
    fn ensure_exist_creates_all_three() {
        let tmp = tempdir().expect("temp dir");
        let dirs = PathConfiguration::new("R", "L", "M").resolve(tmp.path());
        assert!(!PathConfiguration::directory_exists(&dirs.resource));

        dirs.ensure_exist().expect("create");
        assert!(PathConfiguration::directory_exists(&dirs.resource));
        assert!(PathConfiguration::directory_exists(&dirs.license));
        assert!(PathConfiguration::directory_exists(&dirs.models));

        // Idempotent.
        dirs.ensure_exist().expect("second call");
    }

    #[test]
    fn file_is_not_a_directory() {
        let tmp = tempdir().expect("temp dir");
        let file = tmp.path().join("plain");
        std::fs::write(&file, "x").unwrap();
        assert!(!PathConfiguration::directory_exists(&file));
        assert!(PathConfiguration::create_directory(&file.join("sub")).is_err());
    }
}
