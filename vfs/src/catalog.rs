use crate::path;
use crate::wildcard::WildcardPattern;

/// Name of the manifest file written at the root of the asset tree.
pub const CATALOG_FILE_NAME: &str = "__catalog__.txt";

/// Suffix of packaging sidecar files that never appear in a catalog.
pub const SIDECAR_SUFFIX: &str = ".meta";

/// Flat, read-only list of every asset path under a root.
///
/// Entries are root-relative, `/`-separated and stored as written in the
/// manifest. All comparisons are case-insensitive. Duplicates are kept:
/// they are harmless for existence checks and show up twice in listings.
///
/// # Example
///
/// ```ignore
/// let catalog = Catalog::parse("images/a.png\nimages/b.png\ndata/x.txt\n");
/// assert!(catalog.directory_exists("images"));
/// assert_eq!(
///     catalog.list_files("", &WildcardPattern::new("*.txt")?, true),
///     vec!["data/x.txt"],
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<String>,
    /// Lowercased key form of each entry, index-aligned with `entries`.
    folded: Vec<String>,
}

impl Catalog {
    /// Build a catalog from root-relative paths, in the given order.
    pub fn new(entries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let entries: Vec<String> = entries
            .into_iter()
            .map(|e| {
                let e: String = e.into();
                e.trim_start_matches('/').to_owned()
            })
            .collect();
        let folded = entries
            .iter()
            .map(|e| path::key_form(e).to_lowercase())
            .collect();
        Self { entries, folded }
    }

    /// Parse manifest text: one path per line, lines trimmed, blank lines skipped.
    pub fn parse(text: &str) -> Self {
        Self::new(text.lines().map(str::trim).filter(|line| !line.is_empty()))
    }

    /// Render the catalog back to manifest text.
    pub fn to_manifest(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(entry);
            out.push('\n');
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Whether an entry equals `path` in key form.
    pub fn file_exists(&self, path: &str) -> bool {
        let key = path::key_form(path).to_lowercase();
        if key.is_empty() {
            return false;
        }
        self.folded.iter().any(|entry| *entry == key)
    }

    /// Whether any entry lies under `path` in prefix form.
    ///
    /// The root exists whenever the catalog is non-empty.
    pub fn directory_exists(&self, path: &str) -> bool {
        let prefix = path::prefix_form(path).to_lowercase();
        self.folded.iter().any(|entry| entry.starts_with(&prefix))
    }

    /// List entries under `path` whose file name matches `pattern`.
    ///
    /// Without `recursive`, entries in deeper subdirectories are skipped. The
    /// pattern is tested against the final path component only. Results keep
    /// catalog order and are returned as full catalog paths.
    pub fn list_files(&self, path: &str, pattern: &WildcardPattern, recursive: bool) -> Vec<String> {
        let prefix = path::prefix_form(path).to_lowercase();

        self.entries
            .iter()
            .zip(&self.folded)
            .filter_map(|(entry, folded)| {
                let remainder = folded.strip_prefix(&prefix)?;
                if remainder.is_empty() || (!recursive && remainder.contains('/')) {
                    return None;
                }
                let key = path::key_form(entry);
                let name = key.rsplit('/').next().unwrap_or(&key);
                pattern.matches(name).then(|| entry.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(["images/a.png", "images/b.png", "data/x.txt"])
    }

    fn pat(p: &str) -> WildcardPattern {
        WildcardPattern::new(p).unwrap()
    }

    #[test]
    fn parse_skips_blank_lines_and_trims() {
        let catalog = Catalog::parse("  images/a.png \r\n\n\t\ndata/x.txt\n");
        assert_eq!(catalog.entries(), ["images/a.png", "data/x.txt"]);
    }

    #[test]
    fn parse_empty_text() {
        assert!(Catalog::parse("").is_empty());
        assert!(Catalog::parse("\n \n").is_empty());
    }

    #[test]
    fn file_exists_case_insensitive() {
        let catalog = sample();
        assert!(catalog.file_exists("images/a.png"));
        assert!(catalog.file_exists("/IMAGES\\A.PNG"));
        assert!(!catalog.file_exists("images"));
        assert!(!catalog.file_exists("images/c.png"));
        assert!(!catalog.file_exists(""));
    }

    #[test]
    fn directory_exists() {
        let catalog = sample();
        assert!(catalog.directory_exists("images"));
        assert!(catalog.directory_exists("images/"));
        assert!(catalog.directory_exists("Images"));
        assert!(!catalog.directory_exists("missing"));
        assert!(!catalog.directory_exists("images/a.png"));
        assert!(!catalog.directory_exists("imag"));
    }

    #[test]
    fn root_directory_exists_only_when_non_empty() {
        assert!(sample().directory_exists(""));
        assert!(sample().directory_exists("/"));
        assert!(!Catalog::default().directory_exists("/"));
    }

    #[test]
    fn list_non_recursive_in_insertion_order() {
        let files = sample().list_files("images", &pat("*.png"), false);
        assert_eq!(files, vec!["images/a.png", "images/b.png"]);
    }

    #[test]
    fn list_recursive_from_root() {
        let files = sample().list_files("", &pat("*.txt"), true);
        assert_eq!(files, vec!["data/x.txt"]);
    }

    #[test]
    fn list_root_non_recursive_skips_subdirectories() {
        let catalog = Catalog::new(["top.txt", "data/x.txt"]);
        assert_eq!(catalog.list_files("/", &pat("*"), false), vec!["top.txt"]);
    }

    #[test]
    fn nested_entries_need_recursive() {
        let catalog = Catalog::new(["a/one.txt", "a/b/two.txt", "a/b/c/three.txt"]);
        assert_eq!(catalog.list_files("a", &pat("*"), false), vec!["a/one.txt"]);
        assert_eq!(
            catalog.list_files("a", &pat("*"), true),
            vec!["a/one.txt", "a/b/two.txt", "a/b/c/three.txt"]
        );
    }

    #[test]
    fn pattern_matches_final_component_only() {
        let catalog = Catalog::new(["a/txt/readme.md", "a/b/notes.txt"]);
        // The directory name "txt" must not satisfy the pattern.
        assert_eq!(catalog.list_files("a", &pat("*txt*"), true), vec!["a/b/notes.txt"]);
        assert_eq!(catalog.list_files("a", &pat("b*"), true), Vec::<String>::new());
    }

    #[test]
    fn prefix_boundary_is_a_full_segment() {
        let catalog = Catalog::new(["img/a.png", "images/b.png"]);
        assert_eq!(catalog.list_files("img", &pat("*"), true), vec!["img/a.png"]);
    }

    #[test]
    fn listing_is_case_insensitive_but_preserves_stored_case() {
        let catalog = Catalog::new(["Images/Icon.PNG"]);
        assert_eq!(
            catalog.list_files("IMAGES", &pat("icon.png"), false),
            vec!["Images/Icon.PNG"]
        );
    }

    #[test]
    fn duplicates_are_listed_twice() {
        let catalog = Catalog::new(["a/x.txt", "a/x.txt"]);
        assert!(catalog.file_exists("a/x.txt"));
        assert_eq!(catalog.list_files("a", &pat("*"), false).len(), 2);
    }

    #[test]
    fn leading_slash_entries_are_stripped() {
        let catalog = Catalog::parse("/a/x.txt\n");
        assert_eq!(catalog.entries(), ["a/x.txt"]);
        assert!(catalog.file_exists("a/x.txt"));
    }

    #[test]
    fn manifest_round_trip_keeps_order() {
        let catalog = sample();
        let text = catalog.to_manifest();
        assert_eq!(text, "images/a.png\nimages/b.png\ndata/x.txt\n");
        assert_eq!(Catalog::parse(&text).entries(), catalog.entries());
    }

    #[test]
    fn irregular_separators_match_on_the_file_name() {
        let catalog = Catalog::parse("images\\c.png\nimages//d.png\n");
        assert_eq!(
            catalog.list_files("images", &pat("c.png"), false),
            vec!["images\\c.png"]
        );
        assert_eq!(
            catalog.list_files("images", &pat("?.png"), false),
            vec!["images\\c.png", "images//d.png"]
        );
    }

    #[test]
    fn empty_catalog_answers_nothing() {
        let catalog = Catalog::default();
        assert!(!catalog.file_exists("a"));
        assert!(catalog.list_files("/", &pat("*"), true).is_empty());
    }
}
