//! File-backed storage for signature images.
//!
//! Images are received as opaque byte blobs already encoded by the capture
//! widget and are written under a configured directory. Callers only ever
//! see the returned path string.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::types::InterventionId;
use crate::services::ServiceError;

#[derive(Debug, Error)]
pub enum SignatureStoreError {
    #[error("signature storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SignatureStoreError> for ServiceError {
    fn from(err: SignatureStoreError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

pub trait SignatureStore {
    fn save_technician_signature(
        &self,
        intervention_id: InterventionId,
        image: &[u8],
    ) -> Result<String, SignatureStoreError>;

    fn save_customer_signature(
        &self,
        intervention_id: InterventionId,
        image: &[u8],
    ) -> Result<String, SignatureStoreError>;
}

/// Stores signature images as PNG files under a base directory.
pub struct FsSignatureStore {
    dir: PathBuf,
}

impl FsSignatureStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn save(
        &self,
        intervention_id: InterventionId,
        kind: &str,
        image: &[u8],
    ) -> Result<String, SignatureStoreError> {
        fs::create_dir_all(&self.dir)?;
        let file_name = format!("{intervention_id}-{kind}-{}.png", Uuid::new_v4());
        let path = self.dir.join(file_name);
        fs::write(&path, image)?;
        Ok(path.to_string_lossy().into_owned())
    }
}

impl SignatureStore for FsSignatureStore {
    fn save_technician_signature(
        &self,
        intervention_id: InterventionId,
        image: &[u8],
    ) -> Result<String, SignatureStoreError> {
        self.save(intervention_id, "technician", image)
    }

    fn save_customer_signature(
        &self,
        intervention_id: InterventionId,
        image: &[u8],
    ) -> Result<String, SignatureStoreError> {
        self.save(intervention_id, "customer", image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saves_image_and_returns_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSignatureStore::new(dir.path());
        let id = InterventionId::new(42).unwrap();

        let path = store.save_technician_signature(id, b"png-bytes").unwrap();
        assert!(path.contains("42-technician-"));
        assert_eq!(fs::read(&path).unwrap(), b"png-bytes");
    }

    #[test]
    fn technician_and_customer_paths_differ() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSignatureStore::new(dir.path());
        let id = InterventionId::new(1).unwrap();

        let technician = store.save_technician_signature(id, b"a").unwrap();
        let customer = store.save_customer_signature(id, b"b").unwrap();
        assert_ne!(technician, customer);
    }
}
