use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::VfsError;
use crate::catalog::{CATALOG_FILE_NAME, Catalog, SIDECAR_SUFFIX};

/// Generates the manifest for an asset tree at packaging time.
///
/// Walks `root` recursively, skipping `.meta` sidecars and the manifest
/// itself, and records every file as a root-relative `/`-separated path.
/// Any failure here should abort packaging: a partial manifest would make
/// assets silently invisible at runtime.
///
/// # Example
///
/// ```ignore
/// let written = CatalogBuilder::new("./StreamingAssets").write()?;
/// log::info!("{} assets catalogued", written.len());
/// ```
pub struct CatalogBuilder {
    root: PathBuf,
}

impl CatalogBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the manifest inside the root.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILE_NAME)
    }

    /// Collect every asset path under the root, sorted by walk order.
    pub fn build(&self) -> Result<Catalog, VfsError> {
        if !self.root.is_dir() {
            return Err(VfsError::NotFound(format!(
                "asset root {} is not a directory",
                self.root.display()
            )));
        }

        let mut entries = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(relative) = to_catalog_path(&self.root, entry.path()) else {
                log::warn!("Skipping non UTF-8 asset path {:?}", entry.path());
                continue;
            };
            if relative == CATALOG_FILE_NAME || relative.ends_with(SIDECAR_SUFFIX) {
                continue;
            }
            entries.push(relative);
        }

        Ok(Catalog::new(entries))
    }

    /// Build the catalog and overwrite the manifest with it.
    pub fn write(&self) -> Result<Catalog, VfsError> {
        let catalog = self.build()?;
        let manifest = self.manifest_path();
        std::fs::write(&manifest, catalog.to_manifest())?;
        log::info!(
            "Wrote {} catalog entries to {}",
            catalog.len(),
            manifest.display()
        );
        Ok(catalog)
    }
}

/// Root-relative, `/`-separated form of `path`.
pub(crate) fn to_catalog_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut out = String::new();
    for component in relative.components() {
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(component.as_os_str().to_str()?);
    }
    Some(out)
}
