//! Path canonicalization for catalog keys and directory prefixes.
//!
//! Every query goes through [`normalize`] first. Two derived shapes are used
//! for comparisons against catalog entries:
//!
//! - **key form** (`images/a.png`): no leading or trailing slash, used for
//!   exact file lookups.
//! - **prefix form** (`images/`): trailing slash, no leading slash, used for
//!   directory and listing queries. The root is the empty prefix.

use crate::VfsError;

/// Normalize an arbitrary path string.
///
/// - Collapses every run of `/` and `\` into a single `/`
/// - Ensures exactly one leading `/`
/// - Adds a trailing `/` when `trailing_slash` is set, strips it otherwise
/// - Empty or separator-only input becomes `/`
///
/// Total and idempotent: `normalize(&normalize(p, t), t) == normalize(p, t)`.
pub fn normalize(path: &str, trailing_slash: bool) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    out.push('/');

    for c in path.chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }

    if out.len() > 1 {
        if trailing_slash {
            if !out.ends_with('/') {
                out.push('/');
            }
        } else if out.ends_with('/') {
            out.pop();
        }
    }

    out
}

/// Normalize to key form: `"/images//a.png/"` → `"images/a.png"`.
///
/// The root yields an empty string.
pub fn key_form(path: &str) -> String {
    let mut normalized = normalize(path, false);
    normalized.remove(0);
    normalized
}

/// Normalize to prefix form: `"images"` → `"images/"`.
///
/// The root yields an empty string, which is a prefix of every entry.
pub fn prefix_form(path: &str) -> String {
    let mut normalized = normalize(path, true);
    normalized.remove(0);
    normalized
}

/// Reject paths that cannot name a directory to list.
pub(crate) fn require_listing_path(path: &str) -> Result<(), VfsError> {
    if path.is_empty() {
        return Err(VfsError::InvalidArgument(
            "listing path must not be empty, use \"/\" for the root".into(),
        ));
    }
    Ok(())
}

/// Returns the part of `path` after `root`, if `path` lies under `root`.
///
/// The match must end on a separator boundary, so `assets2/x` is not under
/// `assets`.
fn strip_root<'a>(root: &str, path: &'a str) -> Option<&'a str> {
    if root.is_empty() {
        return None;
    }
    let rest = path.strip_prefix(root)?;
    let on_boundary = rest.is_empty()
        || rest.starts_with(['/', '\\'])
        || root.ends_with(['/', '\\']);
    on_boundary.then_some(rest)
}

/// Join a root and an asset path into the location handed to the storage layer.
///
/// Paths that already start with `root` are returned unchanged. With an empty
/// root the path is returned as-is.
pub fn resolve_full_path(root: &str, path: &str) -> String {
    if root.is_empty() || strip_root(root, path).is_some() {
        return path.to_owned();
    }

    let base = root.trim_end_matches(['/', '\\']);
    let rel = path.trim_start_matches(['/', '\\']);
    if rel.is_empty() {
        return root.to_owned();
    }
    format!("{base}/{rel}")
}

/// Strip `root` from the front of `path`, leaving a root-relative path.
///
/// Paths outside `root` are returned unchanged.
pub fn relative_path(root: &str, path: &str) -> String {
    match strip_root(root, path) {
        Some(rest) => rest.trim_start_matches(['/', '\\']).to_owned(),
        None => path.to_owned(),
    }
}
