//! Roster layout export/import.
//!
//! A disposition file captures the ordered roster and the form as they were
//! when the layout was saved, so a curated list can be restored later. The
//! JSON shape matches what the deployed application exchanges: camelCase
//! keys, group tags in their wire form, a version marker and a small
//! metadata block.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mission::MissionForm;

use super::group::Group;
use super::model::SelectedPerson;

/// Document format version written on export.
pub const DISPOSITION_VERSION: &str = "1.0";

/// An exported roster layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disposition {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub selected_names: Vec<SelectedPerson>,
    pub form_data: MissionForm,
    pub metadata: DispositionMetadata,
}

/// Summary block shown when the file is offered for import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispositionMetadata {
    pub total_technicians: usize,
    pub mission: String,
}

/// What an import recovered from a disposition document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispositionImport {
    pub selected_names: Vec<SelectedPerson>,
    /// Absent when the document predates form capture.
    pub form: Option<MissionForm>,
}

/// Raw entry shape used during import so a single bad group tag does not
/// fail the whole document.
#[derive(Debug, Deserialize)]
struct RawEntry {
    name: String,
    group: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDisposition {
    selected_names: Vec<RawEntry>,
    #[serde(default)]
    form_data: Option<MissionForm>,
}

impl Disposition {
    /// Captures the roster and form for export.
    pub fn new(
        selected_names: Vec<SelectedPerson>,
        form: MissionForm,
        export_date: DateTime<Utc>,
    ) -> Self {
        let mission = if form.motif.is_empty() {
            "Mission non définie".to_string()
        } else {
            form.motif.clone()
        };
        Self {
            version: DISPOSITION_VERSION.to_string(),
            export_date,
            metadata: DispositionMetadata {
                total_technicians: selected_names.len(),
                mission,
            },
            selected_names,
            form_data: form,
        }
    }

    /// Serializes to the pretty-printed JSON document format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a disposition document, tolerating partial mismatches.
    ///
    /// Entries with an unknown group tag are dropped and logged rather than
    /// failing the import; bulk restore stays resilient to stale files. The
    /// form is restored only when the document carries one.
    ///
    /// # Errors
    ///
    /// Returns an error only when the document itself is not valid JSON of
    /// the expected shape.
    pub fn parse(json: &str) -> Result<DispositionImport> {
        let raw: RawDisposition = serde_json::from_str(json)?;
        let mut entries = Vec::with_capacity(raw.selected_names.len());
        for entry in raw.selected_names {
            match entry.group.parse::<Group>() {
                Ok(group) => entries.push(SelectedPerson::new(entry.name, group)),
                Err(_) => {
                    tracing::warn!(
                        "dropping '{}': unknown group tag '{}'",
                        entry.name,
                        entry.group
                    );
                }
            }
        }
        Ok(DispositionImport {
            selected_names: entries,
            form: raw.form_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_order_and_form() {
        let entries = vec![
            SelectedPerson::new("Dupont Ali", Group::Hd2),
            SelectedPerson::new("Meziane Sara", Group::G7),
            SelectedPerson::new("Haddad Omar", Group::Fh),
        ];
        let form = MissionForm {
            motif: "Match amical".to_string(),
            destination: "Oran".to_string(),
            ..MissionForm::default()
        };
        let disposition = Disposition::new(entries.clone(), form.clone(), Utc::now());

        let json = disposition.to_json().unwrap();
        let imported = Disposition::parse(&json).unwrap();

        assert_eq!(imported.selected_names, entries);
        assert_eq!(imported.form, Some(form));
    }

    #[test]
    fn test_wire_format_matches_the_exchanged_documents() {
        let form = MissionForm::default();
        let disposition = Disposition::new(
            vec![SelectedPerson::new("Dupont Ali", Group::Chauffeurs)],
            form,
            Utc::now(),
        );
        let json = disposition.to_json().unwrap();

        assert!(json.contains("\"version\": \"1.0\""));
        assert!(json.contains("\"exportDate\""));
        assert!(json.contains("\"selectedNames\""));
        assert!(json.contains("\"Chauffeurs\""));
        assert!(json.contains("\"formData\""));
        assert!(json.contains("\"totalTechnicians\": 1"));
        assert!(json.contains("\"mission\": \"Mission non définie\""));
    }

    #[test]
    fn test_unknown_group_is_dropped_not_fatal() {
        let json = r#"{
            "selectedNames": [
                {"name": "Dupont Ali", "group": "HD1"},
                {"name": "Ancien Membre", "group": "G13"},
                {"name": "Meziane Sara", "group": "FH"}
            ]
        }"#;

        let imported = Disposition::parse(json).unwrap();

        assert_eq!(
            imported.selected_names,
            vec![
                SelectedPerson::new("Dupont Ali", Group::Hd1),
                SelectedPerson::new("Meziane Sara", Group::Fh),
            ]
        );
        // A document without form data leaves the current form alone
        assert_eq!(imported.form, None);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(Disposition::parse("not json").is_err());
        assert!(Disposition::parse("{\"wrongKey\": []}").is_err());
    }
}
