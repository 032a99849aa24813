//! # Odonto Core
//!
//! Core business logic for the dental patient record service.
//!
//! This crate contains the patient aggregate and its CRUD contract:
//! - Wire models for patients, treatments, and clinical histories
//! - The [`PatientStore`] document-store boundary with MongoDB and
//!   in-memory implementations
//! - The [`PatientService`] operations the transport layer calls
//!
//! **No API concerns**: HTTP routing, CORS, and serialization of
//! responses belong in `api-rest`.

pub mod config;
pub mod error;
pub mod model;
pub mod service;
pub mod store;

pub use config::CoreConfig;
pub use error::{PatientError, PatientResult};
pub use model::{
    ClinicalHistory, EvolutionEntry, Patient, PatientPatch, PatientRecord, Radiograph, Treatment,
};
pub use service::PatientService;
pub use store::{MemoryPatientStore, MongoPatientStore, PatientStore};
