//! MongoDB-backed patient store.
//!
//! One collection, one driver call per operation. The driver connects
//! lazily; an unreachable deployment surfaces as a storage failure on
//! the first operation rather than at construction time. A server
//! selection timeout bounds how long a request can wait on a dead
//! deployment.

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, from_document, oid::ObjectId, to_document, Document};
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection};

use crate::config::CoreConfig;
use crate::model::{Patient, PatientPatch, PatientRecord};
use crate::store::PatientStore;
use crate::PatientResult;

/// Collection name, kept from the original deployment's data.
pub const PATIENT_COLLECTION: &str = "pacientes";

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Patient store backed by a MongoDB collection.
///
/// The underlying [`Client`] is safe for concurrent use and is held
/// for the process lifetime.
#[derive(Clone)]
pub struct MongoPatientStore {
    client: Client,
    db_name: String,
    collection: Collection<Document>,
}

impl MongoPatientStore {
    /// Build a store from the resolved configuration.
    ///
    /// # Errors
    /// Returns a storage failure if the connection string cannot be
    /// parsed. Reachability is not checked here; see [`Self::ping`].
    pub async fn connect(cfg: &CoreConfig) -> PatientResult<Self> {
        let mut options = ClientOptions::parse(cfg.mongodb_uri()).await?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

        let client = Client::with_options(options)?;
        let collection = client.database(cfg.db_name()).collection(PATIENT_COLLECTION);

        Ok(Self {
            client,
            db_name: cfg.db_name().to_string(),
            collection,
        })
    }

    /// Round-trip to the deployment, for startup diagnostics.
    ///
    /// # Errors
    /// Returns a storage failure if the deployment is unreachable.
    pub async fn ping(&self) -> PatientResult<()> {
        self.client
            .database(&self.db_name)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    fn parse_id(id: &str) -> Option<ObjectId> {
        ObjectId::parse_str(id).ok()
    }

    fn to_patient(mut doc: Document) -> PatientResult<Patient> {
        let id = match doc.remove("_id").and_then(|id| id.as_object_id()) {
            Some(oid) => oid.to_hex(),
            None => {
                tracing::warn!("patient document without an ObjectId _id");
                String::new()
            }
        };
        let record: PatientRecord = from_document(doc)?;
        Ok(Patient { id, record })
    }
}

#[async_trait]
impl PatientStore for MongoPatientStore {
    async fn list(&self) -> PatientResult<Vec<Patient>> {
        let cursor = self.collection.find(doc! {}).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        docs.into_iter().map(Self::to_patient).collect()
    }

    async fn find(&self, id: &str) -> PatientResult<Option<Patient>> {
        let Some(oid) = Self::parse_id(id) else {
            return Ok(None);
        };
        let doc = self.collection.find_one(doc! { "_id": oid }).await?;
        doc.map(Self::to_patient).transpose()
    }

    async fn insert(&self, record: PatientRecord) -> PatientResult<Patient> {
        let doc = to_document(&record)?;
        let result = self.collection.insert_one(doc).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .unwrap_or_default();
        Ok(Patient { id, record })
    }

    async fn update(&self, id: &str, patch: PatientPatch) -> PatientResult<Option<Patient>> {
        let Some(oid) = Self::parse_id(id) else {
            return Ok(None);
        };

        // The server rejects an empty $set; an empty patch is a read.
        if patch.is_empty() {
            let doc = self.collection.find_one(doc! { "_id": oid }).await?;
            return doc.map(Self::to_patient).transpose();
        }

        let set = to_document(&patch)?;
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;
        updated.map(Self::to_patient).transpose()
    }

    async fn delete(&self, id: &str) -> PatientResult<bool> {
        let Some(oid) = Self::parse_id(id) else {
            return Ok(false);
        };
        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": oid })
            .await?;
        Ok(removed.is_some())
    }
}
