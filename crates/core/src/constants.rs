//! Constants used throughout the provisioning core.
//!
//! Database and collection names are fixed: the downstream FHIR records API
//! addresses these namespaces by name, so they are not configurable here.

/// Primary clinical database; its `encounters` collection is schema-validated.
pub const PRIMARY_DATABASE: &str = "fhir_hca";

/// Secondary clinical database; all of its collections are created unvalidated.
pub const SECONDARY_DATABASE: &str = "fhir_hcb";

/// Collection holding encounter documents.
pub const ENCOUNTERS_COLLECTION: &str = "encounters";

/// Collection holding patient documents.
pub const PATIENTS_COLLECTION: &str = "patients";

/// Collection holding practitioner documents.
pub const PRACTITIONERS_COLLECTION: &str = "practitioners";

/// Application name reported in the MongoDB connection handshake.
pub const APP_NAME: &str = "fhir-init";

/// Default connection deadline in seconds when no override is configured.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
