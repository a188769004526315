//! File Utility Functions

use std::fs;
use std::path::{Path, PathBuf};
use std::result::Result;

/// Returns the absolute path after resolving the given path.
///
/// * `path` - The path.
pub fn absolute_path(path: &str) -> Result<String, String> {
    match PathBuf::from(path)
        .canonicalize()
        .map(PathBuf::into_os_string)
        .map(|s| s.into_string().ok())
    {
        Ok(Some(abs_path)) => Ok(abs_path),
        Ok(None) => Err(format!("invalid path {}", path)),
        Err(err) => Err(format!("invalid path {}. {}.", path, err)),
    }
}

/// Returns the directory containing the given path, if any.
///
/// * `path` - The path.
pub fn parent_path(path: &str) -> Option<String> {
    Path::new(path)
        .parent()
        .and_then(|p| p.to_str())
        .map(String::from)
}

/// Returns `true` if the given path is relative.
///
/// * `path` - The path.
pub fn is_relative_path(path: &str) -> bool {
    Path::new(path).is_relative()
}

/// Resolves `path` against `dir` unless it is already absolute.
///
/// * `dir`  - Directory used for relative paths.
/// * `path` - The path.
pub fn resolve_path(dir: &str, path: &str) -> String {
    if dir.is_empty() || !is_relative_path(path) {
        String::from(path)
    } else {
        Path::new(dir).join(path).to_string_lossy().into_owned()
    }
}

/// Read the entire file and return its contents as a String.
///
/// * `path` - Path to file.
pub fn file_to_string(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Error reading file '{}': {}", path, e))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_of_file() {
        assert_eq!(parent_path("/profiles/skin.ssp"), Some(String::from("/profiles")));
        assert_eq!(parent_path("/"), None);
    }

    #[test]
    fn resolve_relative_and_absolute() {
        assert_eq!(resolve_path("/profiles", "skin.ssp"), "/profiles/skin.ssp");
        assert_eq!(resolve_path("/profiles", "/other/skin.ssp"), "/other/skin.ssp");
        assert_eq!(resolve_path("", "skin.ssp"), "skin.ssp");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(file_to_string("/definitely/not/here.ssp").is_err());
        assert!(absolute_path("/definitely/not/here.ssp").is_err());
    }
}
