//! MongoDB-backed user store.
//!
//! Documents are stored schemaless. On the way out, `_id` is rendered as
//! its hex string and every other field is converted to relaxed extended
//! JSON (plain numbers/strings where possible).

use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde_json::Value;
use tracing::instrument;

use storegate_core::{StoreError, StoreResult, UserId};
use storegate_users::{User, UserFields};

use super::UserStore;
use crate::config::MongoConfig;

/// User store over one MongoDB collection.
///
/// The client is created once and shared; the driver pools connections
/// internally.
#[derive(Debug, Clone)]
pub struct MongoUserStore {
    client: Client,
    database: String,
    collection: Collection<Document>,
}

impl MongoUserStore {
    pub fn new(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection::<Document>(collection);
        Self {
            client,
            database: database.to_string(),
            collection,
        }
    }

    /// Parse the connection string and build the client. The driver does
    /// not open a connection until the first operation.
    pub async fn connect(config: &MongoConfig) -> StoreResult<Self> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| StoreError::backend("users.connect", e))?;
        Ok(Self::new(client, &config.database, &config.collection))
    }
}

fn map_mongo_error(operation: &'static str, err: mongodb::error::Error) -> StoreError {
    StoreError::backend(operation, err)
}

/// Ids that are not valid ObjectIds cannot match any document.
fn parse_object_id(id: &UserId) -> Option<ObjectId> {
    ObjectId::parse_str(id.as_str()).ok()
}

fn fields_to_document(fields: UserFields) -> StoreResult<Document> {
    bson::to_document(&fields.sanitized().into_inner())
        .map_err(|e| StoreError::invalid_input(format!("user fields cannot be stored: {e}")))
}

fn document_to_user(mut document: Document) -> StoreResult<User> {
    let id = match document.remove("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s,
        Some(other) => other.to_string(),
        None => return Err(StoreError::backend("users.decode", "document has no _id")),
    };

    let fields = match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => map,
        other => {
            return Err(StoreError::backend(
                "users.decode",
                format!("document decoded to non-object JSON: {other}"),
            ));
        }
    };

    Ok(User {
        id: UserId::new(id),
        fields,
    })
}

#[async_trait::async_trait]
impl UserStore for MongoUserStore {
    #[instrument(skip(self), fields(database = %self.database), err)]
    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| map_mongo_error("users.ping", e))?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> StoreResult<Vec<User>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| map_mongo_error("users.list", e))?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| map_mongo_error("users.list", e))?;

        documents.into_iter().map(document_to_user).collect()
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn get(&self, id: &UserId) -> StoreResult<Option<User>> {
        let Some(oid) = parse_object_id(id) else {
            return Ok(None);
        };

        let document = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| map_mongo_error("users.get", e))?;

        document.map(document_to_user).transpose()
    }

    #[instrument(skip(self, input), err)]
    async fn create(&self, input: UserFields) -> StoreResult<User> {
        let mut document = fields_to_document(input)?;

        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(|e| map_mongo_error("users.create", e))?;

        document.insert("_id", result.inserted_id);
        document_to_user(document)
    }

    #[instrument(skip(self, input), fields(id = %id), err)]
    async fn update(&self, id: &UserId, input: UserFields) -> StoreResult<User> {
        let Some(oid) = parse_object_id(id) else {
            return Err(StoreError::NotFound);
        };

        let input = input.sanitized();
        if input.is_empty() {
            // `$set: {}` is rejected by the server; an empty patch is a read.
            return self.get(id).await?.ok_or(StoreError::NotFound);
        }
        let patch = fields_to_document(input)?;

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": patch })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| map_mongo_error("users.update", e))?;

        match updated {
            Some(document) => document_to_user(document),
            None => Err(StoreError::NotFound),
        }
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn delete(&self, id: &UserId) -> StoreResult<()> {
        let Some(oid) = parse_object_id(id) else {
            return Err(StoreError::NotFound);
        };

        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|e| map_mongo_error("users.delete", e))?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
