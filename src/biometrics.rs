//! Voice biometrics server config (`lunasvr.cfg.toml`).

use serde::{Deserialize, Serialize};

use crate::config::{GrpcConfig, ModelEntry, ModelRegistry, TomlConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub grpc: GrpcConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BiometricsModel {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    /// Path to the voiceprint model directory or file.
    pub path: String,
}

impl ModelEntry for BiometricsModel {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Top-level biometrics server configuration. Unversioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricsConfig {
    pub server: ServerConfig,
    pub models: Vec<BiometricsModel>,
}

impl BiometricsConfig {
    /// Config with gRPC on `127.0.0.1:2727` and no models.
    pub fn new() -> Self {
        Self {
            server: ServerConfig {
                grpc: GrpcConfig::with_address("127.0.0.1:2727"),
            },
            models: Vec::new(),
        }
    }

    pub fn add_model(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
    ) {
        self.push_model(BiometricsModel {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        });
    }
}

impl Default for BiometricsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TomlConfig for BiometricsConfig {
    const SERVICE: &'static str = "biometrics";
}

impl ModelRegistry for BiometricsConfig {
    type Model = BiometricsModel;

    fn models(&self) -> &[BiometricsModel] {
        &self.models
    }

    fn models_mut(&mut self) -> &mut Vec<BiometricsModel> {
        &mut self.models
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, ErrorKind};
    use tempfile::tempdir;

    #[test]
    fn default_address() {
        let cfg = BiometricsConfig::new();
        assert_eq!(cfg.server.grpc.address.as_deref(), Some("127.0.0.1:2727"));
        assert!(cfg.models.is_empty());
    }

    #[test]
    fn exact_file_layout() {
        let mut cfg = BiometricsConfig::new();
        cfg.add_model("vp", "Voiceprint", "/models/vp");
        let text = cfg.to_toml_string().expect("encode");

        assert!(text.contains("[server.grpc]"));
        assert!(text.contains("Address = \"127.0.0.1:2727\""));
        assert!(text.contains("[[models]]"));
        assert!(text.contains("ID = \"vp\""));
        assert!(text.contains("Name = \"Voiceprint\""));
        assert!(text.contains("Path = \"/models/vp\""));
        assert!(!text.contains("CertFile"));
    }

    #[test]
    fn round_trip_populated_and_minimal() {
        let mut full = BiometricsConfig::new();
        full.server.grpc.cert_file = Some("tls.crt".into());
        full.server.grpc.key_file = Some("tls.key".into());
        full.add_model("a", "A", "a.bin");
        full.add_model("b", "B", "b.bin");
        let text = full.to_toml_string().expect("encode");
        assert_eq!(BiometricsConfig::from_toml_str(&text).expect("decode"), full);

        let minimal = BiometricsConfig {
            server: ServerConfig::default(),
            models: Vec::new(),
        };
        let text = minimal.to_toml_string().expect("encode");
        assert_eq!(BiometricsConfig::from_toml_str(&text).expect("decode"), minimal);
    }

    #[test]
    fn add_and_remove_models() {
        let mut cfg = BiometricsConfig::new();
        cfg.add_model("m1", "One", "1.bin");
        cfg.add_model("m2", "Two", "2.bin");
        assert_eq!(cfg.model_ids(), vec!["m1", "m2"]);
        assert_eq!(cfg.model("m2").map(|m| m.path.as_str()), Some("2.bin"));

        cfg.remove_model("m1");
        assert_eq!(cfg.model_ids(), vec!["m2"]);
        cfg.remove_model("unknown");
        assert_eq!(cfg.model_ids(), vec!["m2"]);
    }

    #[test]
    fn missing_required_field_fails() {
        let text = "[server.grpc]\n\n[[models]]\nID = \"x\"\nName = \"X\"\n";
        let err = BiometricsConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::Decode { .. }));
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn save_load_cycle() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("lunasvr.cfg.toml");

        let mut cfg = BiometricsConfig::load_or_default(&path).expect("default");
        cfg.add_model("vp", "Voiceprint", "vp.bin");
        let text = cfg.save(&path).expect("save");

        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
        assert_eq!(BiometricsConfig::load(&path).expect("load"), cfg);
    }
}
