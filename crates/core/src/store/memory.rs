//! In-memory patient store.
//!
//! The test double the service layer is written against, also usable
//! for isolated instances that need no external deployment. Documents
//! live in insertion order behind an async lock; ids are v4 UUIDs in
//! simple form, opaque to callers like any other id.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{Patient, PatientPatch, PatientRecord};
use crate::store::PatientStore;
use crate::PatientResult;

/// Patient store holding documents in process memory.
#[derive(Default)]
pub struct MemoryPatientStore {
    patients: RwLock<Vec<Patient>>,
}

impl MemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PatientStore for MemoryPatientStore {
    async fn list(&self) -> PatientResult<Vec<Patient>> {
        Ok(self.patients.read().await.clone())
    }

    async fn find(&self, id: &str) -> PatientResult<Option<Patient>> {
        let patients = self.patients.read().await;
        Ok(patients.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, record: PatientRecord) -> PatientResult<Patient> {
        let patient = Patient {
            id: Uuid::new_v4().simple().to_string(),
            record,
        };
        self.patients.write().await.push(patient.clone());
        Ok(patient)
    }

    async fn update(&self, id: &str, patch: PatientPatch) -> PatientResult<Option<Patient>> {
        let mut patients = self.patients.write().await;
        let Some(patient) = patients.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        patch.apply(&mut patient.record);
        Ok(Some(patient.clone()))
    }

    async fn delete(&self, id: &str) -> PatientResult<bool> {
        let mut patients = self.patients.write().await;
        let before = patients.len();
        patients.retain(|p| p.id != id);
        Ok(patients.len() < before)
    }
}
