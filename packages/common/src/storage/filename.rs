/// Reasons a file name is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameError {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Filename contains path separators (`/` or `\`).
    ContainsPathSeparator,
    /// Filename is `.` or `..`.
    PathTraversal,
    /// Filename contains null bytes.
    NullByte,
    /// Filename contains control characters (CR, LF, etc.).
    ControlCharacter,
}

impl FilenameError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::PathTraversal => "Invalid filename: '.' and '..' are not allowed",
            Self::NullByte => "Invalid filename: null bytes are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
        }
    }
}

/// Validates a flat filename (no directory components allowed).
///
/// The name is returned unchanged; surrounding whitespace only matters for the emptiness check.
pub fn validate_flat_filename(filename: &str) -> Result<&str, FilenameError> {
    if filename.trim().is_empty() {
        return Err(FilenameError::Empty);
    }

    if filename.contains('\0') {
        return Err(FilenameError::NullByte);
    }

    // Rejecting control characters also keeps CRLF out of response headers.
    if filename.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if filename.contains('/') || filename.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if filename == "." || filename == ".." {
        return Err(FilenameError::PathTraversal);
    }

    Ok(filename)
}

/// Reduces a client-supplied upload name to its final path component and validates it.
///
/// Some clients send the full local path (`C:\Users\me\a.png`), so everything up to the
/// last separator is dropped before validation.
pub fn sanitize_upload_name(original: &str) -> Result<&str, FilenameError> {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);
    validate_flat_filename(base)
}
