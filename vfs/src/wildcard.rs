use regex::{Regex, RegexBuilder};

use crate::VfsError;

/// A compiled file name pattern with `*` and `?` wildcards.
///
/// Matching is case-insensitive and anchored to the whole candidate: `*.png`
/// matches `icon.PNG` but not `icon.png.bak`. Every other character is
/// literal, including regex metacharacters such as `.` or `(`.
///
/// Patterns without wildcards go through the same regex as globs so that
/// both use Unicode simple case folding (`ſ` matches `s`).
#[derive(Debug, Clone)]
pub enum WildcardPattern {
    /// Empty pattern or `*`: matches every name.
    Any,
    /// Anchored, case-insensitive regex translated from the pattern.
    Glob(Regex),
}

impl WildcardPattern {
    /// Compile a glob pattern.
    ///
    /// Only fails if the translated expression exceeds the regex size limit.
    pub fn new(pattern: &str) -> Result<Self, VfsError> {
        if pattern.is_empty() || pattern == "*" {
            return Ok(WildcardPattern::Any);
        }

        let mut expr = String::with_capacity(pattern.len() * 2 + 2);
        expr.push('^');
        let mut buf = [0u8; 4];
        for c in pattern.chars() {
            match c {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                other => expr.push_str(&regex::escape(other.encode_utf8(&mut buf))),
            }
        }
        expr.push('$');

        let regex = RegexBuilder::new(&expr)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| VfsError::InvalidPattern(format!("{pattern}: {e}")))?;
        Ok(WildcardPattern::Glob(regex))
    }

    /// Test a file name (not a full path) against the pattern.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            WildcardPattern::Any => true,
            WildcardPattern::Glob(regex) => regex.is_match(name),
        }
    }

    /// Whether this pattern accepts every name without inspecting it.
    pub fn is_any(&self) -> bool {
        matches!(self, WildcardPattern::Any)
    }
}
