use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::VfsError;
use crate::transport::AssetFuture;

/// Trait for streaming asset backends.
///
/// Two implementations exist: [`DirectProvider`](crate::DirectProvider)
/// answers every query from the real filesystem, and
/// [`CatalogProvider`](crate::CatalogProvider) answers queries from a
/// manifest loaded once through a [`Transport`](crate::Transport). Which one
/// runs is decided once at startup; query code never branches on it.
///
/// # Queries
///
/// `file_exists`, `directory_exists` and `list_files` are synchronous and
/// never fail because of environment state: a provider that is not ready
/// answers `false` or an empty list. Only a malformed listing request (empty
/// path, uncompilable pattern) returns an error.
///
/// # Reads
///
/// `read_text`, `read_bytes` and `copy_to_file` return futures that resolve
/// to `None`/`false` on any failure, including cancellation through the
/// passed token. Reads do not consult the catalog.
///
/// # Path Contract
///
/// Query paths are root-relative and normalized by the provider (see
/// [`path::normalize`](crate::path::normalize)). Read paths are resolved
/// with [`resolve_full_path`](AssetsProvider::resolve_full_path), so already
/// rooted paths are accepted as well.
pub trait AssetsProvider: Send + Sync + 'static {
    /// Prepare the provider for the asset tree at `root`.
    ///
    /// Idempotent for the same root. Concurrent calls observe a single load.
    fn initialize(&self, root: &str) -> AssetFuture<()>;

    /// Whether queries are answered from a loaded state.
    fn is_initialized(&self) -> bool;

    /// The root recorded by the last [`initialize`](AssetsProvider::initialize).
    fn root(&self) -> String;

    /// Whether a file exists at the root-relative `path`.
    fn file_exists(&self, path: &str) -> bool;

    /// Whether a directory exists at the root-relative `path`.
    fn directory_exists(&self, path: &str) -> bool;

    /// List files under `path` whose name matches `pattern`.
    ///
    /// Returns root-relative `/`-separated paths. The root is `"/"`; an
    /// empty `path` is rejected with [`VfsError::InvalidArgument`].
    fn list_files(&self, path: &str, pattern: &str, recursive: bool) -> Result<Vec<String>, VfsError>;

    /// Read a file as UTF-8 text.
    fn read_text(&self, path: &str, cancel: &CancellationToken) -> AssetFuture<Option<String>>;

    /// Read a file's bytes.
    fn read_bytes(&self, path: &str, cancel: &CancellationToken) -> AssetFuture<Option<Vec<u8>>>;

    /// Copy a file to `output` without buffering it whole where possible.
    fn copy_to_file(&self, path: &str, output: &Path, cancel: &CancellationToken) -> AssetFuture<bool>;

    /// Location of `path` as handed to the storage layer.
    fn resolve_full_path(&self, path: &str) -> String {
        crate::path::resolve_full_path(&self.root(), path)
    }
}
