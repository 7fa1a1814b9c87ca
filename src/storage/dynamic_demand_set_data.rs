// Storage layer data structure for dynamic demand sets.
//
// Raw field slots, exactly as they are read from and written to a document.
// Defaults and normalisation live in the domain layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DemandProfile;

/// The raw field slots backing a [`DynamicDemandSet`](crate::DynamicDemandSet).
///
/// Absent optional slots stay absent through a serialization round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct DynamicDemandSetData {
    /// Externally assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Opaque modification marker.
    pub mod_stamp: Option<String>,
    /// Text form of the CRUD action flag.
    pub crud_flag: Option<String>,
    /// Whether the set is locked against editing.
    pub locked_for_edit: bool,
    /// Whether the set is locked against history changes.
    pub locked_for_history: bool,
    /// Identifier of the estimation run that produced the set.
    pub app_run_id: i64,
    /// Simulation time at which the run produced the set.
    pub estimation_timestamp: Option<DateTime<Utc>>,
    /// The per-link demand profiles.
    pub profiles: Option<Vec<DemandProfile>>,
}

/// The serialized versions of a demand set.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        id: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mod_stamp: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        crud_flag: Option<String>,
        #[serde(default)]
        locked_for_edit: bool,
        #[serde(default)]
        locked_for_history: bool,
        #[serde(default)]
        app_run_id: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        estimation_timestamp: Option<DateTime<Utc>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        profiles: Option<Vec<DemandProfile>>,
    },
}

impl From<Versions> for DynamicDemandSetData {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                id,
                name,
                description,
                mod_stamp,
                crud_flag,
                locked_for_edit,
                locked_for_history,
                app_run_id,
                estimation_timestamp,
                profiles,
            } => Self {
                id,
                name,
                description,
                mod_stamp,
                crud_flag,
                locked_for_edit,
                locked_for_history,
                app_run_id,
                estimation_timestamp,
                profiles,
            },
        }
    }
}

impl From<DynamicDemandSetData> for Versions {
    fn from(data: DynamicDemandSetData) -> Self {
        let DynamicDemandSetData {
            id,
            name,
            description,
            mod_stamp,
            crud_flag,
            locked_for_edit,
            locked_for_history,
            app_run_id,
            estimation_timestamp,
            profiles,
        } = data;
        Self::V1 {
            id,
            name,
            description,
            mod_stamp,
            crud_flag,
            locked_for_edit,
            locked_for_history,
            app_run_id,
            estimation_timestamp,
            profiles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_document_leaves_slots_absent() {
        let data: DynamicDemandSetData = serde_yaml::from_str("_version: '1'\nid: 12\n").unwrap();
        assert_eq!(
            data,
            DynamicDemandSetData {
                id: 12,
                ..DynamicDemandSetData::default()
            }
        );
    }

    #[test]
    fn absent_slots_are_not_written() {
        let yaml = serde_yaml::to_string(&DynamicDemandSetData::default()).unwrap();
        assert!(yaml.contains("_version"));
        assert!(!yaml.contains("crud_flag"));
        assert!(!yaml.contains("profiles"));
        assert!(!yaml.contains("name"));
    }

    #[test]
    fn empty_profile_list_is_kept_distinct_from_absent() {
        let data = DynamicDemandSetData {
            profiles: Some(Vec::new()),
            ..DynamicDemandSetData::default()
        };
        let yaml = serde_yaml::to_string(&data).unwrap();
        let parsed: DynamicDemandSetData = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.profiles, Some(Vec::new()));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let result = serde_yaml::from_str::<DynamicDemandSetData>("_version: '9'\nid: 1\n");
        assert!(result.is_err());
    }
}
