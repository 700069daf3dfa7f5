//! Image vault: the object-storage collaborator seam.
//!
//! Medication rows never carry raw bytes; they hold an opaque [`Uuid`]
//! reference issued here. Swapping this for a real object store only
//! requires honoring the put/get contract.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored medication image blob.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// In-memory blob store keyed by opaque UUID references.
#[derive(Default)]
pub struct ImageVault {
    blobs: RwLock<HashMap<Uuid, StoredImage>>,
}

impl ImageVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an image and return its reference.
    pub async fn put(&self, image: StoredImage) -> Uuid {
        let id = Uuid::new_v4();
        self.blobs.write().await.insert(id, image);
        id
    }

    /// Fetch an image by reference.
    pub async fn get(&self, id: Uuid) -> Option<StoredImage> {
        self.blobs.read().await.get(&id).cloned()
    }

    /// Drop an image, e.g. when the load that uploaded it was refused.
    pub async fn remove(&self, id: Uuid) -> Option<StoredImage> {
        self.blobs.write().await.remove(&id)
    }
}
