//! Minimal path globs compiled to anchored regexes.
//!
//! Supported syntax:
//! - `**/` (leading or inner) matches one or more whole directories, so it
//!   always spans at least one separator
//! - a trailing `/**` matches at least one further path character, crossing `/`
//! - `**` anywhere else matches any run of characters, `/` included
//! - `*` matches within a single segment
//! - `?` matches exactly one non-separator character
//!
//! Everything else is literal. Patterns and paths are compared after
//! [`normalize_path`].

use regex::Regex;

use crate::error::{LintError, Result};

/// Treat platform separators as `/`.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    regex: Regex,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.trim().is_empty() {
            return Err(LintError::invalid_glob(pattern, "pattern is empty"));
        }

        let normalized = normalize_path(pattern);
        let regex = Regex::new(&glob_to_regex(&normalized))
            .map_err(|e| LintError::invalid_glob(pattern, e.to_string()))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as it was written.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Match an already-normalized path.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for GlobPattern {}

fn glob_to_regex(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2 + 2);
    out.push('^');

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                let mut end = i;
                while end < chars.len() && chars[end] == '*' {
                    end += 1;
                }
                let segment_start = i == 0 || chars[i - 1] == '/';
                let followed_by_separator = chars.get(end) == Some(&'/');

                if segment_start && followed_by_separator {
                    out.push_str("(?:[^/]*/)+");
                    i = end + 1;
                    continue;
                }
                if segment_start && end == chars.len() && i > 0 {
                    out.push_str(".+");
                } else {
                    out.push_str(".*");
                }
                i = end;
                continue;
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            c => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
            }
        }
        i += 1;
    }

    out.push('$');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, path: &str) -> bool {
        GlobPattern::new(pattern)
            .unwrap()
            .is_match(&normalize_path(path))
    }

    #[test]
    fn leading_double_star_matches_any_depth() {
        assert!(matches("**/workflows/**", "/src/workflows/order.ts"));
        assert!(matches("**/workflows/**", "a/b/c/workflows/nested/deep.ts"));
        assert!(!matches("**/workflows/**", "workflows/order.ts"));
        assert!(!matches("**/workflows/**", "/src/workflowsx/order.ts"));
    }

    #[test]
    fn trailing_double_star_needs_a_segment() {
        assert!(!matches("**/workflows/**", "/src/workflows/"));
        assert!(!matches("**/workflows/**", "/src/workflows"));
    }

    #[test]
    fn single_star_stays_within_segment() {
        assert!(matches("src/*.ts", "src/index.ts"));
        assert!(!matches("src/*.ts", "src/nested/index.ts"));
        assert!(matches("**/*.test.ts", "/repo/src/order.test.ts"));
        assert!(!matches("**/*.test.ts", "/repo/src/order.ts"));
    }

    #[test]
    fn question_mark_is_one_character() {
        assert!(matches("src/v?.ts", "src/v1.ts"));
        assert!(!matches("src/v?.ts", "src/v10.ts"));
        assert!(!matches("src?x.ts", "src/x.ts"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(matches("**/(legacy)/*.ts", "/app/(legacy)/a.ts"));
        assert!(!matches("**/a+b.ts", "/app/aab.ts"));
        assert!(matches("**/a+b.ts", "/app/a+b.ts"));
    }

    #[test]
    fn windows_separators_are_normalized() {
        assert!(matches("**/workflows/**", r"C:\repo\src\workflows\order.ts"));
        assert!(matches(r"**\activities\**", "/repo/activities/a.ts"));
    }

    #[test]
    fn inner_double_star_spans_at_least_one_directory() {
        assert!(!matches("src/**/client.ts", "src/client.ts"));
        assert!(matches("src/**/client.ts", "src/a/client.ts"));
        assert!(matches("src/**/client.ts", "src/a/b/client.ts"));
        assert!(!matches("src/**/client.ts", "lib/a/client.ts"));
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert!(matches!(
            GlobPattern::new(" "),
            Err(LintError::InvalidGlob { .. })
        ));
    }
}
