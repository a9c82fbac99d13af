use async_trait::async_trait;

use super::error::StorageError;
use super::key::{ObjectKey, public_url};

/// Canned access control applied to a newly written object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectAcl {
    #[default]
    Private,
    PublicRead,
}

impl ObjectAcl {
    /// Value of the `x-amz-acl` request header.
    pub fn as_header_value(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
        }
    }
}

/// An object to be written, with its content type and ACL.
#[derive(Debug, Clone)]
pub struct PutObject {
    pub body: Vec<u8>,
    pub content_type: String,
    pub acl: ObjectAcl,
}

impl PutObject {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            content_type: "application/octet-stream".into(),
            acl: ObjectAcl::default(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_acl(mut self, acl: ObjectAcl) -> Self {
        self.acl = acl;
        self
    }
}

/// Key-addressed object storage within a single bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object, replacing any existing object at the same key.
    async fn put(&self, key: &ObjectKey, object: PutObject) -> Result<(), StorageError>;

    /// Read all bytes of an object.
    async fn get(&self, key: &ObjectKey) -> Result<Vec<u8>, StorageError>;

    /// Delete an object.
    ///
    /// Returns `true` if the object was deleted, `false` if the backend reports
    /// it did not exist.
    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Name of the bucket this store writes to.
    fn bucket(&self) -> &str;

    /// Publicly resolvable URL of an object. Pure; performs no request.
    fn public_url(&self, key: &ObjectKey) -> String {
        public_url(self.bucket(), key)
    }
}
