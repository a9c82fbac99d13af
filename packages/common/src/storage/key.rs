use std::fmt;

use uuid::Uuid;

use super::error::StorageError;

/// Host suffix of public S3 object URLs; everything after it is the key.
const PUBLIC_HOST_SUFFIX: &str = ".amazonaws.com/";

/// A validated object key within a bucket.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Wrap an existing key.
    pub fn new(key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        if key.is_empty() {
            return Err(StorageError::InvalidKey("key cannot be empty".into()));
        }
        if key.starts_with('/') {
            return Err(StorageError::InvalidKey(format!(
                "key must not start with '/': {key}"
            )));
        }
        if key.chars().any(|c| c.is_ascii_control()) {
            return Err(StorageError::InvalidKey(
                "key must not contain control characters".into(),
            ));
        }
        Ok(Self(key))
    }

    /// Build a fresh key `{prefix}/{uuid}_{filename}`.
    ///
    /// The random component keeps repeated uploads of the same filename apart.
    pub fn unique(prefix: &str, filename: &str) -> Self {
        let prefix = prefix.trim_matches('/');
        let id = Uuid::new_v4();
        if prefix.is_empty() {
            Self(format!("{id}_{filename}"))
        } else {
            Self(format!("{prefix}/{id}_{filename}"))
        }
    }

    /// Recover the key from a URL produced by [`public_url`].
    pub fn from_public_url(url: &str) -> Option<Self> {
        let (_, key) = url.split_once(PUBLIC_HOST_SUFFIX)?;
        Self::new(key).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({})", self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Public virtual-hosted URL of an object: `https://{bucket}.s3.amazonaws.com/{key}`.
pub fn public_url(bucket: &str, key: &ObjectKey) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{key}")
}
