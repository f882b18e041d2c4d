//! Counting storage wrapper: asserts on how often the backend was reached.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use videohub_core::StorageBackend;
use videohub_storage::{Storage, StorageResult, StoredObject};

pub struct CountingStorage {
    inner: Arc<dyn Storage>,
    calls: Arc<AtomicUsize>,
}

impl CountingStorage {
    pub fn new(inner: Arc<dyn Storage>) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl Storage for CountingStorage {
    async fn store(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
    ) -> StorageResult<StoredObject> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.store(data, original_filename, content_type).await
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }
}
