//! Path component sanitization.

use crate::error::{Error, Result};

/// Sanitize a path component (account name or folder), replacing problematic
/// characters and rejecting path traversal attempts.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    if name.contains("..") {
        return Err(Error::InvalidPath(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidPath(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidPath(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}
