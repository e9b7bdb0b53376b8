use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use crate::VfsError;
use crate::catalog::{CATALOG_FILE_NAME, Catalog};
use crate::path;
use crate::provider::AssetsProvider;
use crate::transport::{AssetFuture, Transport, with_cancellation};
use crate::wildcard::WildcardPattern;

/// Provider for asset trees that cannot be enumerated.
///
/// On packaged web and mobile builds the asset tree is only reachable through
/// byte fetches. This provider fetches the `__catalog__.txt` manifest once
/// through its [`Transport`] and answers `file_exists`, `directory_exists`
/// and `list_files` from it. Reads go straight to the transport.
///
/// Until the manifest has loaded every query answers "nothing found".
///
/// # Loading
///
/// [`initialize`](AssetsProvider::initialize) holds a single async guard for
/// the whole load, so concurrent callers wait for the in-flight fetch instead
/// of issuing their own. Calling it again with the same root is a no-op;
/// calling it with another root reloads. A failed manifest fetch leaves the
/// provider not initialized so the caller can retry. An empty manifest is a
/// valid, empty catalog.
///
/// `Clone` is cheap (Arc internals).
pub struct CatalogProvider<T: Transport> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    transport: T,
    state: RwLock<LoadState>,
    load_guard: tokio::sync::Mutex<()>,
}

#[derive(Default)]
struct LoadState {
    root: String,
    catalog: Option<Arc<Catalog>>,
}

impl<T: Transport> CatalogProvider<T> {
    pub fn new(transport: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                state: RwLock::new(LoadState::default()),
                load_guard: tokio::sync::Mutex::new(()),
            }),
        }
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// The loaded catalog, if any.
    pub fn catalog(&self) -> Option<Arc<Catalog>> {
        self.inner.state.read().catalog.clone()
    }

    /// Run `query` against the loaded catalog, or answer `not_ready`.
    ///
    /// Query paths are catalog-relative and never have the root stripped: a
    /// top-level folder may share the root's name.
    fn query<R>(&self, not_ready: R, query: impl FnOnce(&Catalog) -> R) -> R {
        let catalog = self.inner.state.read().catalog.clone();
        match catalog {
            Some(catalog) => query(&catalog),
            None => not_ready,
        }
    }
}

impl<T: Transport> Clone for CatalogProvider<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Transport> Inner<T> {
    async fn load(self: Arc<Self>, root: String) {
        let _guard = self.load_guard.lock().await;

        {
            let mut state = self.state.write();
            if state.root == root && state.catalog.is_some() {
                return;
            }
            if state.catalog.is_some() {
                log::info!("Reloading asset catalog: {} -> {root}", state.root);
            }
            *state = LoadState {
                root: root.clone(),
                catalog: None,
            };
        }

        let manifest = path::resolve_full_path(&root, CATALOG_FILE_NAME);
        // Loads are never cancelled by callers; read tokens only abort reads.
        let fetched = self
            .transport
            .fetch_bytes(&manifest, &CancellationToken::new())
            .await;

        let Some(bytes) = fetched else {
            log::error!("Failed to load asset catalog from {manifest}");
            return;
        };

        let text = String::from_utf8_lossy(&bytes);
        let catalog = Catalog::parse(text.trim_start_matches('\u{feff}'));
        if catalog.is_empty() {
            log::warn!("Asset catalog {manifest} is empty");
        } else {
            log::info!("Loaded {} catalog entries for {root}", catalog.len());
        }

        let mut state = self.state.write();
        if state.root == root {
            state.catalog = Some(Arc::new(catalog));
        }
    }
}

impl<T: Transport> AssetsProvider for CatalogProvider<T> {
    fn initialize(&self, root: &str) -> AssetFuture<()> {
        Box::pin(self.inner.clone().load(root.to_owned()))
    }

    fn is_initialized(&self) -> bool {
        self.inner.state.read().catalog.is_some()
    }

    fn root(&self) -> String {
        self.inner.state.read().root.clone()
    }

    fn file_exists(&self, path: &str) -> bool {
        self.query(false, |catalog| catalog.file_exists(path))
    }

    fn directory_exists(&self, path: &str) -> bool {
        self.query(false, |catalog| catalog.directory_exists(path))
    }

    fn list_files(&self, path: &str, pattern: &str, recursive: bool) -> Result<Vec<String>, VfsError> {
        path::require_listing_path(path)?;
        let pattern = WildcardPattern::new(pattern)?;
        Ok(self.query(Vec::new(), |catalog| {
            catalog.list_files(path, &pattern, recursive)
        }))
    }

    fn read_text(&self, path: &str, cancel: &CancellationToken) -> AssetFuture<Option<String>> {
        let full_path = self.resolve_full_path(path);
        let fetch = self.inner.transport.fetch_text(&full_path, cancel);
        let cancel = cancel.clone();
        Box::pin(async move { with_cancellation(fetch, cancel, &full_path).await })
    }

    fn read_bytes(&self, path: &str, cancel: &CancellationToken) -> AssetFuture<Option<Vec<u8>>> {
        let full_path = self.resolve_full_path(path);
        let fetch = self.inner.transport.fetch_bytes(&full_path, cancel);
        let cancel = cancel.clone();
        Box::pin(async move { with_cancellation(fetch, cancel, &full_path).await })
    }

    fn copy_to_file(&self, path: &str, output: &Path, cancel: &CancellationToken) -> AssetFuture<bool> {
        let full_path = self.resolve_full_path(path);
        let copy = self.inner.transport.fetch_to_file(&full_path, output, cancel);
        let cancel = cancel.clone();
        Box::pin(async move {
            if cancel.is_cancelled() {
                log::debug!("Cancelled: copy {full_path}");
                return false;
            }
            copy.await
        })
    }
}
