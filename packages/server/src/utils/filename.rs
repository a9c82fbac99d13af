/// Extensions accepted for uploaded OpenAPI documents.
pub const SPEC_EXTENSIONS: &[&str] = &["yaml", "yml"];

const MAX_FILENAME_LEN: usize = 255;

const URL_RESERVED: &[char] = &['#', '?', '%'];

/// Reasons an uploaded filename is rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum FilenameError {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Filename is longer than 255 bytes.
    TooLong,
    /// Filename contains path separators (`/` or `\`).
    ContainsPathSeparator,
    /// Filename is `..`.
    PathTraversal,
    /// Filename contains null bytes.
    NullByte,
    /// Filename starts with a dot (hidden file).
    Hidden,
    /// Filename contains control characters (CR, LF, etc.).
    ControlCharacter,
    /// Filename contains `#`, `?` or `%`, which would break the public URL.
    UrlReserved,
    /// Filename does not end in `.yaml` or `.yml`.
    UnsupportedExtension,
}

impl FilenameError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::TooLong => "Filename exceeds 255 bytes",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::PathTraversal => "Invalid filename: '..' is not allowed",
            Self::NullByte => "Invalid filename: null bytes are not allowed",
            Self::Hidden => "Invalid filename: hidden files (starting with '.') are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
            Self::UrlReserved => "Invalid filename: '#', '?' and '%' are not allowed",
            Self::UnsupportedExtension => "Only .yaml and .yml files are accepted",
        }
    }
}

/// Validates a flat filename (no directory components allowed).
pub fn validate_flat_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    if trimmed.len() > MAX_FILENAME_LEN {
        return Err(FilenameError::TooLong);
    }

    if trimmed.contains('\0') {
        return Err(FilenameError::NullByte);
    }

    // The name ends up in an object key and in rendered HTML.
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if trimmed == ".." {
        return Err(FilenameError::PathTraversal);
    }

    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    Ok(trimmed)
}

/// Validates an uploaded OpenAPI document name: a flat filename with a YAML extension.
pub fn validate_spec_filename(filename: &str) -> Result<&str, FilenameError> {
    let name = validate_flat_filename(filename)?;
    // The name is embedded verbatim in the object's public URL.
    if name.contains(URL_RESERVED) {
        return Err(FilenameError::UrlReserved);
    }
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or(FilenameError::UnsupportedExtension)?;

    if SPEC_EXTENSIONS.contains(&ext.as_str()) {
        Ok(name)
    } else {
        Err(FilenameError::UnsupportedExtension)
    }
}
