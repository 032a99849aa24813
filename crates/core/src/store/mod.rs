//! Document-store boundary for the patient aggregate.
//!
//! The service layer depends on the [`PatientStore`] trait rather than
//! a concrete driver, so stores can be swapped and tests can run
//! against an in-memory double. Two implementations ship here:
//! [`MongoPatientStore`] for production and [`MemoryPatientStore`] for
//! tests and isolated instances.

mod memory;
mod mongo;

pub use memory::MemoryPatientStore;
pub use mongo::MongoPatientStore;

use crate::model::{Patient, PatientPatch, PatientRecord};
use crate::PatientResult;
use async_trait::async_trait;

/// Single-document CRUD over patient aggregates.
///
/// Every method maps to exactly one store call; there is no
/// cross-operation coordination. Identifiers are opaque strings; a
/// malformed identifier behaves like an unknown one (`Ok(None)` /
/// `Ok(false)`), never an error.
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// All patient documents, unfiltered and unpaginated.
    async fn list(&self) -> PatientResult<Vec<Patient>>;

    /// The patient with the given id, if any.
    async fn find(&self, id: &str) -> PatientResult<Option<Patient>>;

    /// Persist a new patient and return it with its assigned id.
    async fn insert(&self, record: PatientRecord) -> PatientResult<Patient>;

    /// Overwrite the fields present in `patch` and return the merged
    /// document, or `None` when the id matches nothing.
    async fn update(&self, id: &str, patch: PatientPatch) -> PatientResult<Option<Patient>>;

    /// Remove the patient document. Returns whether it existed.
    async fn delete(&self, id: &str) -> PatientResult<bool>;
}
