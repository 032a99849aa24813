//! The patient record service.
//!
//! Owns the CRUD contract over the patient aggregate: each operation
//! is one atomic store call, with field-presence validation applied
//! before writes and absent documents mapped onto
//! [`PatientError::NotFound`]. The store is injected, never ambient,
//! so tests run against [`crate::MemoryPatientStore`] and multiple
//! isolated instances can coexist.

use std::sync::Arc;

use crate::model::{Patient, PatientPatch, PatientRecord};
use crate::store::PatientStore;
use crate::{PatientError, PatientResult};

/// Patient CRUD over an injected document store.
#[derive(Clone)]
pub struct PatientService {
    store: Arc<dyn PatientStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self { store }
    }

    /// All patients, full documents.
    ///
    /// # Errors
    /// Returns a storage failure if the store is unreachable.
    pub async fn list(&self) -> PatientResult<Vec<Patient>> {
        self.store.list().await
    }

    /// One patient by id.
    ///
    /// A malformed id behaves like an unknown one.
    ///
    /// # Errors
    /// Returns `NotFound` when no document matches, or a storage
    /// failure if the store is unreachable.
    pub async fn get(&self, id: &str) -> PatientResult<Patient> {
        self.store.find(id).await?.ok_or(PatientError::NotFound)
    }

    /// Create a patient from client-supplied fields.
    ///
    /// The store assigns the id; it never changes afterwards.
    ///
    /// # Errors
    /// Returns `InvalidInput` when `nombre` is empty, or a storage
    /// failure if the store is unreachable.
    pub async fn create(&self, record: PatientRecord) -> PatientResult<Patient> {
        if record.nombre.trim().is_empty() {
            return Err(PatientError::InvalidInput("nombre is required".into()));
        }
        self.store.insert(record).await
    }

    /// Overwrite the fields present in `patch`, wholesale for
    /// collection fields, and return the merged document.
    ///
    /// # Errors
    /// Returns `NotFound` when no document matches, or a storage
    /// failure if the store is unreachable.
    pub async fn update(&self, id: &str, patch: PatientPatch) -> PatientResult<Patient> {
        self.store
            .update(id, patch)
            .await?
            .ok_or(PatientError::NotFound)
    }

    /// Remove a patient and everything embedded in it.
    ///
    /// # Errors
    /// Returns `NotFound` when no document matches, or a storage
    /// failure if the store is unreachable.
    pub async fn delete(&self, id: &str) -> PatientResult<()> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(PatientError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Treatment;
    use crate::store::MemoryPatientStore;

    fn service() -> PatientService {
        PatientService::new(Arc::new(MemoryPatientStore::new()))
    }

    fn ana() -> PatientRecord {
        PatientRecord {
            nombre: "Ana Ruiz".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_a_fresh_unique_id() {
        let service = service();

        let first = service.create(ana()).await.expect("create first");
        let second = service.create(ana()).await.expect("create second");

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(first.record.nombre, "Ana Ruiz");
        assert!(first.record.correo.is_none());
    }

    #[tokio::test]
    async fn create_rejects_missing_nombre() {
        let service = service();

        let err = service.create(PatientRecord::default()).await;
        assert!(matches!(err, Err(PatientError::InvalidInput(_))));

        let err = service
            .create(PatientRecord {
                nombre: "   ".into(),
                ..Default::default()
            })
            .await;
        assert!(matches!(err, Err(PatientError::InvalidInput(_))));

        // Nothing was stored.
        assert!(service.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn get_returns_the_created_document() {
        let service = service();
        let created = service.create(ana()).await.expect("create");

        let fetched = service.get(&created.id).await.expect("get");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_with_unknown_or_malformed_id_is_not_found() {
        let service = service();

        let err = service.get("no-such-patient").await;
        assert!(matches!(err, Err(PatientError::NotFound)));
    }

    #[tokio::test]
    async fn update_merges_supplied_fields_and_keeps_the_rest() {
        let service = service();
        let created = service
            .create(PatientRecord {
                nombre: "Ana Ruiz".into(),
                correo: Some("ana@example.com".into()),
                ..Default::default()
            })
            .await
            .expect("create");

        let patch = PatientPatch {
            celular: Some("5551234".into()),
            ..Default::default()
        };
        let updated = service.update(&created.id, patch).await.expect("update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.record.nombre, "Ana Ruiz");
        assert_eq!(updated.record.correo.as_deref(), Some("ana@example.com"));
        assert_eq!(updated.record.celular.as_deref(), Some("5551234"));

        // The stored document reflects the merge.
        let fetched = service.get(&created.id).await.expect("get");
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn update_replaces_treatment_list_wholesale() {
        let service = service();
        let created = service
            .create(PatientRecord {
                nombre: "Ana Ruiz".into(),
                tratamientos: vec![Treatment {
                    diente: Some("26".into()),
                    tratamiento: Some("Resina".into()),
                    precio: Some(800.0),
                }],
                ..Default::default()
            })
            .await
            .expect("create");

        let patch = PatientPatch {
            tratamientos: Some(vec![]),
            ..Default::default()
        };
        let updated = service.update(&created.id, patch).await.expect("update");
        assert!(updated.record.tratamientos.is_empty());
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let service = service();
        let err = service.update("missing", PatientPatch::default()).await;
        assert!(matches!(err, Err(PatientError::NotFound)));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let service = service();
        let created = service.create(ana()).await.expect("create");

        service.delete(&created.id).await.expect("delete");

        let err = service.get(&created.id).await;
        assert!(matches!(err, Err(PatientError::NotFound)));

        let err = service.delete(&created.id).await;
        assert!(matches!(err, Err(PatientError::NotFound)));
    }

    #[tokio::test]
    async fn list_on_an_empty_store_is_empty() {
        let service = service();
        let patients = service.list().await.expect("list");
        assert!(patients.is_empty());
    }
}
