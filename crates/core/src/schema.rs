//! Collection validator for the encounters collection.
//!
//! MongoDB evaluates the `$jsonSchema` document built here against every
//! insert and update on the validated collection. Validation is pinned to
//! `strict`/`error`: violating writes are rejected by the engine rather than
//! logged, and enforcement lives entirely server-side.

use crate::encounter::{EncounterClass, EncounterStatus};
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{CreateCollectionOptions, ValidationAction, ValidationLevel};

/// Validator configuration attached to a collection at creation time.
#[derive(Clone, Debug)]
pub struct CollectionValidator {
    schema: Document,
}

impl CollectionValidator {
    /// Strict validator for the encounters collection.
    pub fn encounters() -> Self {
        Self {
            schema: encounter_json_schema(),
        }
    }

    /// The `$jsonSchema` document the engine evaluates.
    pub fn schema(&self) -> &Document {
        &self.schema
    }

    /// Map onto the driver's collection-creation options.
    pub fn to_create_options(&self) -> CreateCollectionOptions {
        CreateCollectionOptions::builder()
            .validator(doc! { "$jsonSchema": self.schema.clone() })
            .validation_level(ValidationLevel::Strict)
            .validation_action(ValidationAction::Error)
            .build()
    }
}

/// JSON Schema evaluated against every encounter document.
///
/// The `enum` arrays are derived from the wire listings in
/// [`crate::encounter`], keeping the Rust model and the stored validator in
/// lockstep.
pub fn encounter_json_schema() -> Document {
    let status_values: Vec<Bson> = EncounterStatus::ALL
        .iter()
        .map(|status| Bson::from(status.to_wire()))
        .collect();
    let class_values: Vec<Bson> = EncounterClass::ALL
        .iter()
        .map(|class| Bson::from(class.to_wire()))
        .collect();

    doc! {
        "bsonType": "object",
        "required": ["fhirId", "fullUrl", "status", "class", "period"],
        "properties": {
            "fhirId": {
                "bsonType": "string",
                "description": "Resource id assigned by the upstream FHIR server",
            },
            "fullUrl": {
                "bsonType": "string",
                "description": "Absolute URL of the resource on the upstream FHIR server",
            },
            "status": {
                "enum": status_values,
                "description": "Encounter lifecycle status",
            },
            "class": {
                "enum": class_values,
                "description": "Encounter class code",
            },
            "period": {
                "bsonType": "object",
                "required": ["start"],
                "properties": {
                    "start": { "bsonType": "date" },
                    "end": { "bsonType": ["date", "null"] },
                },
            },
            "practitionerId": {
                "bsonType": "objectId",
                "description": "Internal reference to a practitioner document",
            },
            "patientId": {
                "bsonType": "objectId",
                "description": "Internal reference to a patient document",
            },
        },
    }
}
