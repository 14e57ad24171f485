//! Display names derived from executable paths.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_POSIX_BASENAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*/([^/]+)$").unwrap());
static RE_WINDOWS_BASENAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*\\([^\\]+)$").unwrap());

/// Separator convention of the paths stored in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    Posix,
    Windows,
}

impl PathStyle {
    /// Style of the platform this binary was built for.
    pub fn native() -> Self {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Posix
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            PathStyle::Posix => &*RE_POSIX_BASENAME,
            PathStyle::Windows => &*RE_WINDOWS_BASENAME,
        }
    }
}

/// Last path component, or `None` when the path has no separator or ends
/// with one.
pub fn derive_name(path: &str, style: PathStyle) -> Option<String> {
    style
        .pattern()
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
