//! Encounter domain model.
//!
//! Defines the shape the validated encounters collection enforces: wire enums
//! for `status` and `class`, the visit `period`, and a typed carrier that
//! renders to the BSON layout the collection validator accepts. The wire
//! listings here are the single source of truth for the validator's `enum`
//! arrays (see [`crate::schema`]), so the model and the stored validator
//! cannot drift apart.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};

/// Lifecycle state of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncounterStatus {
    /// Planned but not started.
    Planned,
    /// Currently underway.
    InProgress,
    /// Suspended, expected to resume.
    OnHold,
    /// Patient discharged, administrative closure pending.
    Discharged,
    /// Completed normally.
    Completed,
    /// Finished (legacy closure state kept for upstream compatibility).
    Finished,
    /// Cancelled before it started.
    Cancelled,
    /// Stopped after it started but before completion.
    Discontinued,
    /// Recorded in error.
    EnteredInError,
    /// Status cannot be determined.
    Unknown,
}

impl EncounterStatus {
    /// Every status the validator accepts, in wire order.
    pub const ALL: [EncounterStatus; 10] = [
        EncounterStatus::Planned,
        EncounterStatus::InProgress,
        EncounterStatus::OnHold,
        EncounterStatus::Discharged,
        EncounterStatus::Completed,
        EncounterStatus::Finished,
        EncounterStatus::Cancelled,
        EncounterStatus::Discontinued,
        EncounterStatus::EnteredInError,
        EncounterStatus::Unknown,
    ];

    /// Convert to FHIR wire format string.
    pub fn to_wire(self) -> &'static str {
        match self {
            EncounterStatus::Planned => "planned",
            EncounterStatus::InProgress => "in-progress",
            EncounterStatus::OnHold => "on-hold",
            EncounterStatus::Discharged => "discharged",
            EncounterStatus::Completed => "completed",
            EncounterStatus::Finished => "finished",
            EncounterStatus::Cancelled => "cancelled",
            EncounterStatus::Discontinued => "discontinued",
            EncounterStatus::EnteredInError => "entered-in-error",
            EncounterStatus::Unknown => "unknown",
        }
    }

    /// Parse from FHIR wire format string.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "planned" => Some(EncounterStatus::Planned),
            "in-progress" => Some(EncounterStatus::InProgress),
            "on-hold" => Some(EncounterStatus::OnHold),
            "discharged" => Some(EncounterStatus::Discharged),
            "completed" => Some(EncounterStatus::Completed),
            "finished" => Some(EncounterStatus::Finished),
            "cancelled" => Some(EncounterStatus::Cancelled),
            "discontinued" => Some(EncounterStatus::Discontinued),
            "entered-in-error" => Some(EncounterStatus::EnteredInError),
            "unknown" => Some(EncounterStatus::Unknown),
            _ => None,
        }
    }
}

/// Setting in which an encounter takes place, as an ActCode class code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncounterClass {
    /// Inpatient admission.
    Inpatient,
    /// Ambulatory/outpatient visit.
    Ambulatory,
    /// Observation encounter.
    Observation,
    /// Emergency visit.
    Emergency,
    /// Virtual/remote consultation.
    Virtual,
    /// Home health visit.
    HomeHealth,
}

impl EncounterClass {
    /// Every class the validator accepts, in wire order.
    pub const ALL: [EncounterClass; 6] = [
        EncounterClass::Inpatient,
        EncounterClass::Ambulatory,
        EncounterClass::Observation,
        EncounterClass::Emergency,
        EncounterClass::Virtual,
        EncounterClass::HomeHealth,
    ];

    /// Convert to the wire format class code.
    pub fn to_wire(self) -> &'static str {
        match self {
            EncounterClass::Inpatient => "IMP",
            EncounterClass::Ambulatory => "AMB",
            EncounterClass::Observation => "OBSENC",
            EncounterClass::Emergency => "EMER",
            EncounterClass::Virtual => "VR",
            EncounterClass::HomeHealth => "HH",
        }
    }

    /// Parse from the wire format class code.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "IMP" => Some(EncounterClass::Inpatient),
            "AMB" => Some(EncounterClass::Ambulatory),
            "OBSENC" => Some(EncounterClass::Observation),
            "EMER" => Some(EncounterClass::Emergency),
            "VR" => Some(EncounterClass::Virtual),
            "HH" => Some(EncounterClass::HomeHealth),
            _ => None,
        }
    }
}

/// Visit window for an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Period {
    /// When the encounter started.
    pub start: DateTime<Utc>,
    /// When the encounter ended; open encounters carry an explicit null.
    pub end: Option<DateTime<Utc>>,
}

impl Period {
    /// Render to the nested BSON layout stored inside an encounter document.
    pub fn to_document(&self) -> Document {
        let end = match self.end {
            Some(end) => Bson::DateTime(bson::DateTime::from_chrono(end)),
            None => Bson::Null,
        };

        doc! {
            "start": bson::DateTime::from_chrono(self.start),
            "end": end,
        }
    }
}

/// Typed carrier matching the layout the collection validator enforces.
#[derive(Clone, Debug)]
pub struct Encounter {
    /// Resource id assigned by the upstream FHIR server.
    pub fhir_id: String,
    /// Absolute URL of the resource on the upstream FHIR server.
    pub full_url: String,
    pub status: EncounterStatus,
    pub class: EncounterClass,
    pub period: Period,
    /// Internal reference to a practitioner document.
    pub practitioner_id: Option<ObjectId>,
    /// Internal reference to a patient document.
    pub patient_id: Option<ObjectId>,
}

impl Encounter {
    /// Render to the BSON document layout the validator accepts.
    ///
    /// Optional references are omitted entirely when absent rather than
    /// written as null, matching how the upstream API writes these documents.
    pub fn to_document(&self) -> Document {
        let mut document = doc! {
            "fhirId": self.fhir_id.as_str(),
            "fullUrl": self.full_url.as_str(),
            "status": self.status.to_wire(),
            "class": self.class.to_wire(),
            "period": self.period.to_document(),
        };

        if let Some(id) = self.practitioner_id {
            document.insert("practitionerId", id);
        }
        if let Some(id) = self.patient_id {
            document.insert("patientId", id);
        }

        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    fn sample_encounter() -> Encounter {
        Encounter {
            fhir_id: "1427".into(),
            full_url: "https://hapi.example.org/fhir/Encounter/1427".into(),
            status: EncounterStatus::InProgress,
            class: EncounterClass::Ambulatory,
            period: Period {
                start: sample_start(),
                end: None,
            },
            practitioner_id: None,
            patient_id: None,
        }
    }

    #[test]
    fn test_status_wire_round_trip() {
        for status in EncounterStatus::ALL {
            assert_eq!(EncounterStatus::from_wire(status.to_wire()), Some(status));
        }
    }

    #[test]
    fn test_status_rejects_unknown_wire_values() {
        assert_eq!(EncounterStatus::from_wire("archived"), None);
        assert_eq!(EncounterStatus::from_wire("In-Progress"), None);
        assert_eq!(EncounterStatus::from_wire(""), None);
    }

    #[test]
    fn test_class_wire_round_trip() {
        for class in EncounterClass::ALL {
            assert_eq!(EncounterClass::from_wire(class.to_wire()), Some(class));
        }
    }

    #[test]
    fn test_class_codes_are_case_sensitive() {
        assert_eq!(EncounterClass::from_wire("imp"), None);
        assert_eq!(EncounterClass::from_wire("ER"), None);
    }

    #[test]
    fn test_encounter_document_carries_required_fields() {
        let document = sample_encounter().to_document();
        for key in ["fhirId", "fullUrl", "status", "class", "period"] {
            assert!(document.contains_key(key), "missing required key {key}");
        }
        assert_eq!(document.get_str("status").unwrap(), "in-progress");
        assert_eq!(document.get_str("class").unwrap(), "AMB");
    }

    #[test]
    fn test_open_period_renders_explicit_null_end() {
        let period = Period {
            start: sample_start(),
            end: None,
        };
        let document = period.to_document();
        assert!(matches!(document.get("start"), Some(Bson::DateTime(_))));
        assert_eq!(document.get("end"), Some(&Bson::Null));
    }

    #[test]
    fn test_closed_period_renders_date_end() {
        let period = Period {
            start: sample_start(),
            end: Some(Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap()),
        };
        let document = period.to_document();
        assert!(matches!(document.get("end"), Some(Bson::DateTime(_))));
    }

    #[test]
    fn test_optional_references_render_as_object_ids() {
        let mut encounter = sample_encounter();
        assert!(!encounter.to_document().contains_key("practitionerId"));
        assert!(!encounter.to_document().contains_key("patientId"));

        encounter.practitioner_id = Some(ObjectId::new());
        encounter.patient_id = Some(ObjectId::new());
        let document = encounter.to_document();
        assert!(matches!(
            document.get("practitionerId"),
            Some(Bson::ObjectId(_))
        ));
        assert!(matches!(document.get("patientId"), Some(Bson::ObjectId(_))));
    }
}
