use std::path::Path;

use serde::Deserialize;

use crate::StreamingAssets;
use crate::error::VfsError;

/// Top-level configuration loaded from `assets.toml`.
///
/// ```toml
/// [assets]
/// root = "./StreamingAssets"
/// backend = "catalog"
/// transport = "http"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    pub assets: AssetsSection,
}

/// Backend selection and the asset root it is initialized with.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsSection {
    /// Directory path or URL of the asset tree.
    pub root: String,
    #[serde(default)]
    pub backend: BackendKind,
    /// Ignored by the direct backend.
    #[serde(default)]
    pub transport: TransportKind,
    /// Hide `.meta` sidecars from direct listings.
    #[serde(default)]
    pub authoring: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Query the filesystem directly.
    #[default]
    Direct,
    /// Query the manifest fetched through a transport.
    Catalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    File,
    Http,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            assets: AssetsSection {
                root: "./StreamingAssets".into(),
                backend: BackendKind::default(),
                transport: TransportKind::default(),
                authoring: false,
            },
        }
    }
}

impl AssetsConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, VfsError> {
        toml::from_str(text).map_err(|e| VfsError::Config(e.to_string()))
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, VfsError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| VfsError::Config(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| VfsError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Load a config, falling back to the defaults if the file is unusable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!(
                    "Loaded assets config: {:?} backend at {}",
                    config.assets.backend,
                    config.assets.root
                );
                config
            }
            Err(e) => {
                log::warn!("No assets config ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn root(&self) -> &str {
        &self.assets.root
    }

    /// Create the configured provider. The caller still has to
    /// [`initialize`](StreamingAssets::initialize) it with [`root`](Self::root).
    pub fn build(&self) -> Result<StreamingAssets, VfsError> {
        match self.assets.backend {
            BackendKind::Direct => build_direct(self.assets.authoring),
            BackendKind::Catalog => build_catalog(self.assets.transport),
        }
    }
}

#[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
fn build_direct(authoring: bool) -> Result<StreamingAssets, VfsError> {
    Ok(StreamingAssets::new(
        crate::DirectProvider::new().authoring(authoring),
    ))
}

#[cfg(not(all(feature = "filesystem", not(target_arch = "wasm32"))))]
fn build_direct(_authoring: bool) -> Result<StreamingAssets, VfsError> {
    Err(VfsError::Unsupported(
        "direct backend needs the `filesystem` feature on a native target".into(),
    ))
}

fn build_catalog(transport: TransportKind) -> Result<StreamingAssets, VfsError> {
    match transport {
        #[cfg(not(target_arch = "wasm32"))]
        TransportKind::File => Ok(StreamingAssets::new(crate::CatalogProvider::new(
            crate::FileTransport::new(),
        ))),
        #[cfg(all(feature = "http", not(target_arch = "wasm32")))]
        TransportKind::Http => Ok(StreamingAssets::new(crate::CatalogProvider::new(
            crate::HttpTransport::new(),
        ))),
        #[allow(unreachable_patterns)]
        other => Err(VfsError::Unsupported(format!(
            "{other:?} transport is not available in this build"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = AssetsConfig::from_toml_str(
            r#"
            [assets]
            root = "https://cdn.example.com/game"
            backend = "catalog"
            transport = "http"
            "#,
        )
        .unwrap();
        assert_eq!(config.root(), "https://cdn.example.com/game");
        assert_eq!(config.assets.backend, BackendKind::Catalog);
        assert_eq!(config.assets.transport, TransportKind::Http);
        assert!(!config.assets.authoring);
    }

    #[test]
    fn defaults_apply() {
        let config = AssetsConfig::from_toml_str("[assets]\nroot = \"./data\"\n").unwrap();
        assert_eq!(config.assets.backend, BackendKind::Direct);
        assert_eq!(config.assets.transport, TransportKind::File);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let result = AssetsConfig::from_toml_str("[assets]\nroot = \"x\"\nbackend = \"zip\"\n");
        assert!(matches!(result, Err(VfsError::Config(_))));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AssetsConfig::load_or_default(&dir.path().join("assets.toml"));
        assert_eq!(config.root(), "./StreamingAssets");
        assert_eq!(config.assets.backend, BackendKind::Direct);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.toml");
        std::fs::write(&path, "[assets]\nroot = \"./a\"\nauthoring = true\n").unwrap();
        let config = AssetsConfig::load(&path).unwrap();
        assert!(config.assets.authoring);
    }

    #[test]
    fn build_catalog_over_files() {
        let config = AssetsConfig::from_toml_str(
            "[assets]\nroot = \"./a\"\nbackend = \"catalog\"\ntransport = \"file\"\n",
        )
        .unwrap();
        let assets = config.build().unwrap();
        assert!(!assets.is_initialized());
    }

    #[cfg(not(feature = "http"))]
    #[test]
    fn http_without_feature_is_unsupported() {
        let config = AssetsConfig::from_toml_str(
            "[assets]\nroot = \"x\"\nbackend = \"catalog\"\ntransport = \"http\"\n",
        )
        .unwrap();
        assert!(matches!(config.build(), Err(VfsError::Unsupported(_))));
    }
}
