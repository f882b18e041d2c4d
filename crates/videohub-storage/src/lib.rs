//! Storage backends for uploaded videos.
//!
//! All backends implement the [`Storage`] trait: hand them a fully buffered
//! file and get back the stored name plus a retrieval URL. Backend selection
//! happens once at startup through [`create_storage`]; the upload pipeline
//! only ever sees `Arc<dyn Storage>`.

pub mod cloudinary;
pub mod factory;
pub mod local;
pub mod traits;

pub use cloudinary::CloudinaryStorage;
pub use factory::{create_storage, UnconfiguredStorage};
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};

pub use videohub_core::StorageBackend;
