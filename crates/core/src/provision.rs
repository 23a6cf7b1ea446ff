//! Plan execution against a live server.

use crate::plan::ProvisionPlan;
use crate::{ProvisionError, ProvisionResult};
use mongodb::Client;

/// Executes provisioning plans over a single client connection.
///
/// Operations are issued serially in plan order and awaited to completion;
/// the first failure aborts the run with the failing namespace attached.
#[derive(Clone)]
pub struct Provisioner {
    client: Client,
}

impl Provisioner {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create every collection in the plan, in order.
    ///
    /// There are no existence pre-checks and no retries: creating a collection
    /// that already exists surfaces as the engine's own error, and schema
    /// enforcement on the validated collection is left entirely to the server.
    pub async fn apply(&self, plan: &ProvisionPlan) -> ProvisionResult<()> {
        for database in plan.databases() {
            let db = self.client.database(database.name());

            for collection in database.collections() {
                tracing::info!(
                    database = database.name(),
                    collection = collection.name(),
                    validated = collection.validator().is_some(),
                    "creating collection"
                );

                let create = db.create_collection(collection.name());
                let create = match collection.validator() {
                    Some(validator) => create.with_options(validator.to_create_options()),
                    None => create,
                };

                create
                    .await
                    .map_err(|source| ProvisionError::CreateCollection {
                        database: database.name().to_string(),
                        collection: collection.name().to_string(),
                        source,
                    })?;
            }
        }

        Ok(())
    }

    /// Check that every collection named in the plan exists.
    ///
    /// Reads catalog metadata only; collection contents are never touched.
    /// Collections present on the server but absent from the plan are ignored.
    pub async fn verify(&self, plan: &ProvisionPlan) -> ProvisionResult<()> {
        for database in plan.databases() {
            let db = self.client.database(database.name());

            let existing = db.list_collection_names().await.map_err(|source| {
                ProvisionError::ListCollections {
                    database: database.name().to_string(),
                    source,
                }
            })?;

            let expected: Vec<&str> = database
                .collections()
                .iter()
                .map(|collection| collection.name())
                .collect();
            let missing = missing_collections(&expected, &existing);
            if !missing.is_empty() {
                return Err(ProvisionError::MissingCollections {
                    database: database.name().to_string(),
                    missing,
                });
            }

            tracing::info!(database = database.name(), "all collections present");
        }

        Ok(())
    }
}

/// Names from `expected` that do not appear in `existing`, in expected order.
fn missing_collections(expected: &[&str], existing: &[String]) -> Vec<String> {
    expected
        .iter()
        .filter(|name| !existing.iter().any(|have| have.as_str() == **name))
        .map(|name| name.to_string())
        .collect()
}
