//! Declarative provisioning plan.
//!
//! The whole provisioning behaviour is data: an ordered list of databases,
//! each with an ordered list of collections and optional validators. The
//! provisioner executes the plan verbatim, which keeps ordering guarantees
//! and the validated/unvalidated split reviewable in one place.

use crate::constants::{
    ENCOUNTERS_COLLECTION, PATIENTS_COLLECTION, PRACTITIONERS_COLLECTION, PRIMARY_DATABASE,
    SECONDARY_DATABASE,
};
use crate::schema::CollectionValidator;
use std::fmt;

/// A collection to create, with an optional validator attached at creation.
#[derive(Clone, Debug)]
pub struct CollectionSpec {
    name: &'static str,
    validator: Option<CollectionValidator>,
}

impl CollectionSpec {
    fn plain(name: &'static str) -> Self {
        Self {
            name,
            validator: None,
        }
    }

    fn validated(name: &'static str, validator: CollectionValidator) -> Self {
        Self {
            name,
            validator: Some(validator),
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn validator(&self) -> Option<&CollectionValidator> {
        self.validator.as_ref()
    }
}

/// A database and the collections to create inside it, in order.
#[derive(Clone, Debug)]
pub struct DatabaseSpec {
    name: &'static str,
    collections: Vec<CollectionSpec>,
}

impl DatabaseSpec {
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn collections(&self) -> &[CollectionSpec] {
        &self.collections
    }
}

/// Ordered provisioning plan covering every database this tool manages.
#[derive(Clone, Debug)]
pub struct ProvisionPlan {
    databases: Vec<DatabaseSpec>,
}

impl ProvisionPlan {
    /// The standard two-database layout.
    ///
    /// The primary database gets a strictly validated encounters collection;
    /// the secondary database gets the same three collection names with no
    /// validators attached.
    pub fn standard() -> Self {
        Self {
            databases: vec![
                DatabaseSpec {
                    name: PRIMARY_DATABASE,
                    collections: vec![
                        CollectionSpec::validated(
                            ENCOUNTERS_COLLECTION,
                            CollectionValidator::encounters(),
                        ),
                        CollectionSpec::plain(PATIENTS_COLLECTION),
                        CollectionSpec::plain(PRACTITIONERS_COLLECTION),
                    ],
                },
                DatabaseSpec {
                    name: SECONDARY_DATABASE,
                    collections: vec![
                        CollectionSpec::plain(ENCOUNTERS_COLLECTION),
                        CollectionSpec::plain(PATIENTS_COLLECTION),
                        CollectionSpec::plain(PRACTITIONERS_COLLECTION),
                    ],
                },
            ],
        }
    }

    pub fn databases(&self) -> &[DatabaseSpec] {
        &self.databases
    }
}

impl fmt::Display for ProvisionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for database in &self.databases {
            writeln!(f, "{}", database.name)?;
            for collection in &database.collections {
                if collection.validator.is_some() {
                    writeln!(f, "  {} (strict validator)", collection.name)?;
                } else {
                    writeln!(f, "  {}", collection.name)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_plan_layout() {
        let plan = ProvisionPlan::standard();

        let names: Vec<&str> = plan.databases().iter().map(|d| d.name()).collect();
        assert_eq!(names, [PRIMARY_DATABASE, SECONDARY_DATABASE]);

        for database in plan.databases() {
            let collections: Vec<&str> =
                database.collections().iter().map(|c| c.name()).collect();
            assert_eq!(
                collections,
                [
                    ENCOUNTERS_COLLECTION,
                    PATIENTS_COLLECTION,
                    PRACTITIONERS_COLLECTION
                ]
            );
        }
    }

    #[test]
    fn test_only_primary_encounters_is_validated() {
        let plan = ProvisionPlan::standard();

        let validated: Vec<(&str, &str)> = plan
            .databases()
            .iter()
            .flat_map(|database| {
                database
                    .collections()
                    .iter()
                    .filter(|collection| collection.validator().is_some())
                    .map(move |collection| (database.name(), collection.name()))
            })
            .collect();

        assert_eq!(validated, [(PRIMARY_DATABASE, ENCOUNTERS_COLLECTION)]);
    }

    #[test]
    fn test_plan_rendering_marks_the_validator() {
        let rendered = ProvisionPlan::standard().to_string();

        assert!(rendered.contains(PRIMARY_DATABASE));
        assert!(rendered.contains(SECONDARY_DATABASE));
        assert!(rendered.contains("encounters (strict validator)"));
        assert_eq!(rendered.matches("strict validator").count(), 1);
    }
}
