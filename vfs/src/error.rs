use thiserror::Error;

/// Errors surfaced by streaming asset operations.
///
/// Most I/O-adjacent failures never reach callers as errors: reads resolve to
/// `None`, existence checks to `false`. This type covers the cases that indicate
/// programmer error or a broken build step.
#[derive(Debug, Error)]
pub enum VfsError {
    /// The requested path was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// An IO error occurred while accessing the asset tree.
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),
    /// A malformed request, e.g. an empty path passed to a listing.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A wildcard pattern could not be compiled.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    /// The configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
    /// The requested backend or transport is not available in this build.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl From<std::io::Error> for VfsError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            VfsError::NotFound(err.to_string())
        } else {
            VfsError::Io(err)
        }
    }
}
