//! Traversal path lists and their validation
//!
//! A traversal path is a string of symbols read left to right:
//!
//! - `r`: stay on the current collection
//! - `c`: descend into the children (chunks) of every document
//! - `m`: descend into the matches of every document
//!
//! A path list is an ordered list of such paths, e.g. `["r", "c"]` for the root
//! documents followed by all children at granularity 1.

use crate::error::{Error, Result};
use crate::limits::{validate_path, validate_path_count};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One symbol of a traversal path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSymbol {
    /// `r`
    Root,
    /// `c`
    Children,
    /// `m`
    Matches,
}

impl PathSymbol {
    /// Parse a single path character. Unknown characters yield `None`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'r' => Some(Self::Root),
            'c' => Some(Self::Children),
            'm' => Some(Self::Matches),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Root => 'r',
            Self::Children => 'c',
            Self::Matches => 'm',
        }
    }
}

/// Check that `paths` is a usable path list.
///
/// The list must hold at least one path and every path must be non-empty.
/// Symbols are not checked here: an unknown symbol only fails once
/// traversal actually reaches it.
pub fn check_traversal_paths<S: AsRef<str>>(paths: &[S]) -> Result<()> {
    validate_path_count(paths.len())?;
    for (index, path) in paths.iter().enumerate() {
        validate_path(index, path.as_ref())?;
    }
    Ok(())
}

/// A validated, owned list of traversal paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct TraversalPaths(Vec<String>);

impl TraversalPaths {
    pub fn new<S: Into<String>>(paths: impl IntoIterator<Item = S>) -> Result<Self> {
        let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        check_traversal_paths(&paths)?;
        Ok(Self(paths))
    }

    /// The identity path list `["r"]`
    pub fn root() -> Self {
        Self(vec!["r".to_string()])
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// True for exactly `["r"]`
    pub fn is_root(&self) -> bool {
        self.0.len() == 1 && self.0[0] == "r"
    }
}

impl Default for TraversalPaths {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<[String]> for TraversalPaths {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl TryFrom<Vec<String>> for TraversalPaths {
    type Error = Error;

    fn try_from(paths: Vec<String>) -> Result<Self> {
        Self::new(paths)
    }
}

impl From<TraversalPaths> for Vec<String> {
    fn from(paths: TraversalPaths) -> Self {
        paths.0
    }
}

/// Parses comma-separated paths: `"r,cc,m"`. A lone `"rc"` is the single
/// path `rc`, never `["r", "c"]`.
impl FromStr for TraversalPaths {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.split(',').map(str::trim))
    }
}

impl std::fmt::Display for TraversalPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_accepts_path_lists() {
        assert!(check_traversal_paths(&["r"]).is_ok());
        assert!(check_traversal_paths(&["r", "c", "cm"]).is_ok());
        assert!(check_traversal_paths(&vec!["mm".to_string()]).is_ok());
    }

    #[test]
    fn test_check_rejects_empty_path_list() {
        let empty: [&str; 0] = [];
        let err = check_traversal_paths(&empty).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_check_rejects_empty_path() {
        let err = check_traversal_paths(&["r", ""]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_check_defers_symbol_errors() {
        // Unknown symbols are a traversal-time error, not a shape error
        assert!(check_traversal_paths(&["x"]).is_ok());
    }

    #[test]
    fn test_parse_comma_separated() {
        let paths: TraversalPaths = "r, cc,m".parse().unwrap();
        assert_eq!(paths.as_slice(), &["r", "cc", "m"]);
        assert_eq!(paths.to_string(), "r,cc,m");
    }

    #[test]
    fn test_parse_single_string_is_one_path() {
        let paths: TraversalPaths = "rc".parse().unwrap();
        assert_eq!(paths.as_slice(), &["rc"]);
        assert!(!paths.is_root());
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!("r,,c".parse::<TraversalPaths>().is_err());
        assert!("".parse::<TraversalPaths>().is_err());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(PathSymbol::from_char('c'), Some(PathSymbol::Children));
        assert_eq!(PathSymbol::from_char('x'), None);
        assert_eq!(PathSymbol::Matches.as_char(), 'm');
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let paths: TraversalPaths = serde_json::from_str(r#"["r","c"]"#).unwrap();
        assert_eq!(paths.as_slice(), &["r", "c"]);
        assert!(serde_json::from_str::<TraversalPaths>("[]").is_err());
    }
}
