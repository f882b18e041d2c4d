use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Which storage backend persists uploaded files. Resolved once at startup
/// from configuration; never re-evaluated per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Flat upload directory on the local filesystem, served statically.
    Local,
    /// Remote object store (Cloudinary unsigned video upload).
    Cloud,
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Cloud => write!(f, "cloud"),
        }
    }
}
