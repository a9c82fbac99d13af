mod error;
mod key;
mod traits;

pub mod memory;
#[cfg(feature = "object-storage")]
pub mod s3;

pub use error::StorageError;
pub use key::{ObjectKey, public_url};
pub use traits::{ObjectAcl, ObjectStore, PutObject};
