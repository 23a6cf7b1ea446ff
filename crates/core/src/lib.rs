//! # fhir-init core
//!
//! Provisioning logic for the MongoDB backing store of the FHIR records API.
//!
//! This crate contains pure provisioning operations against a server connection:
//! - Startup-resolved connection configuration
//! - The declarative plan of databases and collections to create
//! - The strict JSON Schema validator attached to the encounters collection
//! - A provisioner that executes the plan serially against a live client
//!
//! **No API concerns**: this crate never reads or writes documents in the
//! collections it creates. Anything beyond catalog-level operations belongs to
//! the applications that consume the provisioned store.

pub mod client;
pub mod config;
pub mod constants;
pub mod encounter;
pub mod error;
pub mod plan;
pub mod provision;
pub mod schema;

pub use config::{BootstrapConfig, Credentials};
pub use encounter::{Encounter, EncounterClass, EncounterStatus, Period};
pub use error::{ProvisionError, ProvisionResult};
pub use plan::{CollectionSpec, DatabaseSpec, ProvisionPlan};
pub use provision::Provisioner;
pub use schema::{encounter_json_schema, CollectionValidator};
