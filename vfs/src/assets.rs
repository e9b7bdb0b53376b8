use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::VfsError;
use crate::path;
use crate::provider::AssetsProvider;
use crate::transport::AssetFuture;

/// Read-only access to a bundled asset tree.
///
/// Wraps the one [`AssetsProvider`] chosen at startup. Construct it once,
/// call [`initialize`](StreamingAssets::initialize) and pass clones to
/// whoever needs assets; there is no global instance.
///
/// `Clone` is cheap (Arc internals). Thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// let assets = if packaged {
///     StreamingAssets::new(CatalogProvider::new(HttpTransport::new()))
/// } else {
///     StreamingAssets::new(DirectProvider::new())
/// };
///
/// assets.initialize(&root).await;
/// if assets.file_exists("config/settings.json") {
///     let text = assets.read_text("config/settings.json", &token).await;
/// }
/// ```
#[derive(Clone)]
pub struct StreamingAssets {
    provider: Arc<dyn AssetsProvider>,
}

impl StreamingAssets {
    pub fn new(provider: impl AssetsProvider) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Share an already boxed provider.
    pub fn from_provider(provider: Arc<dyn AssetsProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn AssetsProvider {
        self.provider.as_ref()
    }

    /// Prepare the provider for the asset tree at `root`.
    ///
    /// For catalog-backed providers this fetches the manifest; concurrent
    /// calls with the same root share one fetch.
    pub fn initialize(&self, root: &str) -> AssetFuture<()> {
        self.provider.initialize(root)
    }

    pub fn is_initialized(&self) -> bool {
        self.provider.is_initialized()
    }

    pub fn root(&self) -> String {
        self.provider.root()
    }

    /// Read a file as UTF-8 text. `None` if missing, failed or cancelled.
    pub fn read_text(&self, path: &str, cancel: &CancellationToken) -> AssetFuture<Option<String>> {
        self.provider.read_text(path, cancel)
    }

    /// Read a file's bytes. `None` if missing, failed or cancelled.
    pub fn read_bytes(&self, path: &str, cancel: &CancellationToken) -> AssetFuture<Option<Vec<u8>>> {
        self.provider.read_bytes(path, cancel)
    }

    /// Copy a file to `output` on the local filesystem.
    ///
    /// Meant for large files: the data is streamed to disk rather than
    /// handed back, so memory use does not grow with the file size.
    pub fn copy_to_file(
        &self,
        input: &str,
        output: impl AsRef<Path>,
        cancel: &CancellationToken,
    ) -> AssetFuture<bool> {
        self.provider.copy_to_file(input, output.as_ref(), cancel)
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.provider.file_exists(path)
    }

    pub fn directory_exists(&self, path: &str) -> bool {
        self.provider.directory_exists(path)
    }

    /// List files under `path` whose name matches `pattern` (`*`, `?`).
    ///
    /// Use `"/"` for the root. An empty `path` is a programmer error and
    /// returns [`VfsError::InvalidArgument`].
    pub fn list_files(&self, path: &str, pattern: &str, recursive: bool) -> Result<Vec<String>, VfsError> {
        self.provider.list_files(path, pattern, recursive)
    }

    /// Location of `path` as handed to the storage layer.
    pub fn resolve_full_path(&self, path: &str) -> String {
        self.provider.resolve_full_path(path)
    }

    /// Strip the root from a full path, leaving a root-relative path.
    pub fn relative_path(&self, path: &str) -> String {
        path::relative_path(&self.provider.root(), path)
    }
}
