use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use walkdir::WalkDir;

use crate::VfsError;
use crate::builder::to_catalog_path;
use crate::catalog::{CATALOG_FILE_NAME, SIDECAR_SUFFIX};
use crate::file::FileTransport;
use crate::path;
use crate::provider::AssetsProvider;
use crate::transport::{AssetFuture, Transport};
use crate::wildcard::WildcardPattern;

/// Provider that answers every query from the real filesystem.
///
/// Used wherever the asset tree is a plain directory (desktop builds, the
/// editor). No catalog is consulted; [`initialize`](AssetsProvider::initialize)
/// only records the root and is ready immediately. All I/O is blocking
/// (`std::fs`) inside the returned futures.
///
/// Listings never include the root manifest. In authoring mode, `.meta`
/// sidecar files written by the packaging tools are hidden as well.
///
/// # Example
///
/// ```ignore
/// let assets = StreamingAssets::new(DirectProvider::new().authoring(true));
/// assets.initialize("./StreamingAssets").await;
/// let levels = assets.list_files("levels", "*.json", false)?;
/// ```
#[derive(Default)]
pub struct DirectProvider {
    root: RwLock<String>,
    authoring: bool,
}

impl DirectProvider {
    /// Create a provider with no root recorded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider already rooted at `root`.
    pub fn with_root(root: impl Into<String>) -> Self {
        Self {
            root: RwLock::new(root.into()),
            authoring: false,
        }
    }

    /// Hide `.meta` sidecars from listings.
    pub fn authoring(mut self, authoring: bool) -> Self {
        self.authoring = authoring;
        self
    }

    /// Filesystem location of a root-relative query path, if a root is set.
    fn local(&self, path: &str) -> Option<PathBuf> {
        let root = self.root.read();
        if root.is_empty() {
            return None;
        }
        Some(Path::new(root.as_str()).join(path::key_form(path)))
    }

    fn is_hidden(&self, relative: &str, name: &str) -> bool {
        relative == CATALOG_FILE_NAME || (self.authoring && name.ends_with(SIDECAR_SUFFIX))
    }
}

impl AssetsProvider for DirectProvider {
    fn initialize(&self, root: &str) -> AssetFuture<()> {
        *self.root.write() = root.to_owned();
        log::info!("Streaming assets served directly from {root}");
        Box::pin(async {})
    }

    fn is_initialized(&self) -> bool {
        !self.root.read().is_empty()
    }

    fn root(&self) -> String {
        self.root.read().clone()
    }

    fn file_exists(&self, path: &str) -> bool {
        self.local(path).is_some_and(|p| p.is_file())
    }

    fn directory_exists(&self, path: &str) -> bool {
        self.local(path).is_some_and(|p| p.is_dir())
    }

    fn list_files(&self, path: &str, pattern: &str, recursive: bool) -> Result<Vec<String>, VfsError> {
        path::require_listing_path(path)?;
        let pattern = WildcardPattern::new(pattern)?;

        let root = PathBuf::from(self.root());
        let Some(dir) = self.local(path) else {
            return Ok(Vec::new());
        };
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut walker = WalkDir::new(&dir)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {e}", dir.display());
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let (Some(name), Some(relative)) = (
                entry.file_name().to_str(),
                to_catalog_path(&root, entry.path()),
            ) else {
                continue;
            };
            if self.is_hidden(&relative, name) || !pattern.matches(name) {
                continue;
            }
            files.push(relative);
        }
        Ok(files)
    }

    fn read_text(&self, path: &str, cancel: &CancellationToken) -> AssetFuture<Option<String>> {
        let full_path = self.resolve_full_path(path);
        let cancel = cancel.clone();
        Box::pin(async move {
            if cancel.is_cancelled() {
                log::debug!("Cancelled: {full_path}");
                return None;
            }
            if !Path::new(&full_path).is_file() {
                log::debug!("No such asset: {full_path}");
                return None;
            }
            match std::fs::read_to_string(&full_path) {
                Ok(text) => Some(text),
                Err(e) => {
                    log::warn!("Failed to read {full_path}: {e}");
                    None
                }
            }
        })
    }

    fn read_bytes(&self, path: &str, cancel: &CancellationToken) -> AssetFuture<Option<Vec<u8>>> {
        let full_path = self.resolve_full_path(path);
        let fetch = FileTransport.fetch_bytes(&full_path, cancel);
        Box::pin(async move {
            if !Path::new(&full_path).is_file() {
                log::debug!("No such asset: {full_path}");
                return None;
            }
            fetch.await
        })
    }

    fn copy_to_file(&self, path: &str, output: &Path, cancel: &CancellationToken) -> AssetFuture<bool> {
        FileTransport.fetch_to_file(&self.resolve_full_path(path), output, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poll_now;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("images/icons")).unwrap();
        std::fs::write(root.join("images/a.png"), b"a").unwrap();
        std::fs::write(root.join("images/b.png"), b"b").unwrap();
        std::fs::write(root.join("images/b.png.meta"), b"guid").unwrap();
        std::fs::write(root.join("images/icons/i.png"), b"i").unwrap();
        std::fs::write(root.join("notes.txt"), "hello").unwrap();
        std::fs::write(root.join(CATALOG_FILE_NAME), "notes.txt\n").unwrap();
        dir
    }

    fn provider(dir: &tempfile::TempDir) -> DirectProvider {
        DirectProvider::with_root(dir.path().to_str().unwrap())
    }

    #[test]
    fn initialize_records_root() {
        let dir = tree();
        let provider = DirectProvider::new();
        assert!(!provider.is_initialized());
        assert!(!provider.file_exists("notes.txt"));

        poll_now(provider.initialize(dir.path().to_str().unwrap()));
        assert!(provider.is_initialized());
        assert!(provider.file_exists("notes.txt"));
    }

    #[test]
    fn exists_checks() {
        let dir = tree();
        let provider = provider(&dir);
        assert!(provider.file_exists("images/a.png"));
        assert!(provider.file_exists("/images\\a.png"));
        assert!(!provider.file_exists("images"));
        assert!(provider.directory_exists("images"));
        assert!(provider.directory_exists("images/"));
        assert!(provider.directory_exists("/"));
        assert!(!provider.directory_exists("missing"));
    }

    #[test]
    fn folder_named_like_root_is_reachable() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("assets");
        std::fs::create_dir_all(root.join("assets")).unwrap();
        std::fs::write(root.join("assets/icon.png"), b"icon").unwrap();
        std::fs::write(root.join("other.txt"), b"other").unwrap();

        let provider = DirectProvider::with_root(root.to_str().unwrap());
        assert!(provider.file_exists("assets/icon.png"));
        assert!(!provider.file_exists("icon.png"));
        assert_eq!(
            provider.list_files("assets", "*", false).unwrap(),
            vec!["assets/icon.png"]
        );

        // Queries are never rebased: a full path is not an asset path.
        let full = root.join("other.txt");
        assert!(!provider.file_exists(full.to_str().unwrap()));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("plain.bin"), b"p").unwrap();
        std::os::unix::fs::symlink(dir.path().join("plain.bin"), dir.path().join("link.bin"))
            .unwrap();

        let provider = provider(&dir);
        assert!(provider.file_exists("link.bin"));
        assert_eq!(
            provider.list_files("/", "*.bin", false).unwrap(),
            vec!["link.bin", "plain.bin"]
        );
    }

    #[test]
    fn read_bytes_checks_existence_when_polled() {
        let dir = tree();
        let provider = provider(&dir);
        let read = provider.read_bytes("late.bin", &CancellationToken::new());
        std::fs::write(dir.path().join("late.bin"), b"late").unwrap();
        assert_eq!(poll_now(read).as_deref(), Some(&b"late"[..]));
    }

    #[test]
    fn list_non_recursive() {
        let dir = tree();
        let files = provider(&dir).list_files("images", "*.png", false).unwrap();
        assert_eq!(files, vec!["images/a.png", "images/b.png"]);
    }

    #[test]
    fn list_recursive_matches_file_name() {
        let dir = tree();
        let files = provider(&dir).list_files("/", "i*", true).unwrap();
        assert_eq!(files, vec!["images/icons/i.png"]);
    }

    #[test]
    fn list_hides_manifest() {
        let dir = tree();
        let files = provider(&dir).list_files("/", "*.txt", false).unwrap();
        assert_eq!(files, vec!["notes.txt"]);
    }

    #[test]
    fn sidecars_hidden_only_when_authoring() {
        let dir = tree();
        let plain = provider(&dir).list_files("images", "*", false).unwrap();
        assert!(plain.contains(&"images/b.png.meta".to_owned()));

        let authoring = provider(&dir).authoring(true);
        let files = authoring.list_files("images", "*", false).unwrap();
        assert_eq!(files, vec!["images/a.png", "images/b.png"]);
    }

    #[test]
    fn list_missing_directory_is_empty() {
        let dir = tree();
        assert!(provider(&dir).list_files("missing", "*", true).unwrap().is_empty());
    }

    #[test]
    fn list_empty_path_is_rejected() {
        let dir = tree();
        let result = provider(&dir).list_files("", "*", true);
        assert!(matches!(result, Err(VfsError::InvalidArgument(_))));
    }

    #[test]
    fn read_text_and_bytes() {
        let dir = tree();
        let provider = provider(&dir);
        let cancel = CancellationToken::new();
        assert_eq!(
            poll_now(provider.read_text("notes.txt", &cancel)).as_deref(),
            Some("hello")
        );
        assert_eq!(
            poll_now(provider.read_bytes("images/a.png", &cancel)).as_deref(),
            Some(&b"a"[..])
        );
        assert!(poll_now(provider.read_bytes("nope.bin", &cancel)).is_none());
    }

    #[test]
    fn read_accepts_rooted_paths() {
        let dir = tree();
        let provider = provider(&dir);
        let full = dir.path().join("notes.txt");
        let text = poll_now(provider.read_text(full.to_str().unwrap(), &CancellationToken::new()));
        assert_eq!(text.as_deref(), Some("hello"));
    }

    #[test]
    fn cancelled_read_is_none() {
        let dir = tree();
        let provider = provider(&dir);
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(poll_now(provider.read_text("notes.txt", &cancel)).is_none());
        assert!(poll_now(provider.read_bytes("notes.txt", &cancel)).is_none());
        assert!(provider.is_initialized());
    }

    #[test]
    fn copy_to_file() {
        let dir = tree();
        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("copied/notes.txt");
        let ok = poll_now(provider(&dir).copy_to_file(
            "notes.txt",
            &output,
            &CancellationToken::new(),
        ));
        assert!(ok);
        assert_eq!(std::fs::read_to_string(output).unwrap(), "hello");
    }
}
