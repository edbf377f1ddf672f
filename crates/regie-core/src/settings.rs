//! Print and layout calibration settings.
//!
//! The settings document is persisted as JSON under camelCase keys. Every
//! field carries its own serde default so a partial document written by an
//! older revision merges onto the current defaults field by field instead of
//! failing to parse or zeroing anything out.

use serde::{Deserialize, Serialize};

/// The full calibration settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintSettings {
    #[serde(default = "d_font_family")]
    pub font_family: String,
    #[serde(default = "d_12")]
    pub font_size: u32,
    #[serde(default = "d_90")]
    pub nom_top: u32,
    #[serde(default = "d_40")]
    pub nom_left: u32,
    #[serde(default = "d_15")]
    pub field_spacing: u32,
    #[serde(default = "d_45")]
    pub date_bottom: u32,
    #[serde(default = "d_40")]
    pub date_right: u32,
    #[serde(default = "d_250")]
    pub signataire_pos_top: u32,
    #[serde(default = "d_40")]
    pub signataire_pos_left: u32,
    #[serde(default = "d_250")]
    pub date_pos_top: u32,
    #[serde(default = "d_150")]
    pub date_pos_left: u32,
    #[serde(default = "d_sans_family")]
    pub list_font_family: String,
    #[serde(default = "d_12")]
    pub list_font_size: u32,
    #[serde(default = "d_20")]
    pub list_margin_top: u32,
    #[serde(default = "d_20")]
    pub list_margin_left: u32,
    #[serde(default = "d_2")]
    pub list_line_spacing: u32,
    /// Deprecated, kept so older persisted documents round-trip.
    #[serde(default = "d_20")]
    pub list_column_spacing: u32,
    #[serde(default = "d_32")]
    pub interface_section_header_height: u32,
    #[serde(default = "d_14")]
    pub interface_section_title_size: u32,
    #[serde(default = "d_6")]
    pub interface_row_spacing: u32,
    #[serde(default = "d_24")]
    pub interface_column_gap: u32,
    #[serde(default = "d_32")]
    pub list_section_header_height: u32,
    #[serde(default = "d_14")]
    pub list_section_title_size: u32,
    #[serde(default = "d_6")]
    pub list_row_spacing: u32,
    #[serde(default = "d_24")]
    pub list_column_gap: u32,
    #[serde(default = "d_20")]
    pub list_signature_bottom: u32,
    #[serde(default = "d_20")]
    pub list_signature_right: u32,
    #[serde(default = "d_sans_family")]
    pub form_font_family: String,
    #[serde(default = "d_16")]
    pub form_font_size: u32,
    #[serde(default)]
    pub form_bold_enabled: bool,
    #[serde(default = "d_12")]
    pub form_horizontal_spacing: u32,
    #[serde(default = "d_8")]
    pub form_vertical_spacing: u32,
    #[serde(default = "d_sans_family")]
    pub history_font_family: String,
    #[serde(default = "d_14")]
    pub history_font_size: u32,
    #[serde(default)]
    pub om_bold_enabled: bool,
    #[serde(default)]
    pub list_bold_enabled: bool,
    #[serde(default = "d_true")]
    pub alternate_row_colors: bool,
    #[serde(default = "default_configs")]
    pub saved_configs: Vec<CalibrationConfig>,
}

fn d_font_family() -> String {
    "'Times New Roman', Times, serif".to_string()
}
fn d_sans_family() -> String {
    "Arial, sans-serif".to_string()
}
fn d_true() -> bool {
    true
}
fn d_2() -> u32 {
    2
}
fn d_6() -> u32 {
    6
}
fn d_8() -> u32 {
    8
}
fn d_12() -> u32 {
    12
}
fn d_14() -> u32 {
    14
}
fn d_15() -> u32 {
    15
}
fn d_16() -> u32 {
    16
}
fn d_20() -> u32 {
    20
}
fn d_24() -> u32 {
    24
}
fn d_32() -> u32 {
    32
}
fn d_40() -> u32 {
    40
}
fn d_45() -> u32 {
    45
}
fn d_90() -> u32 {
    90
}
fn d_150() -> u32 {
    150
}
fn d_250() -> u32 {
    250
}

impl Default for PrintSettings {
    fn default() -> Self {
        // Built from the same default functions serde uses, so the two
        // default paths cannot drift apart.
        Self {
            font_family: d_font_family(),
            font_size: d_12(),
            nom_top: d_90(),
            nom_left: d_40(),
            field_spacing: d_15(),
            date_bottom: d_45(),
            date_right: d_40(),
            signataire_pos_top: d_250(),
            signataire_pos_left: d_40(),
            date_pos_top: d_250(),
            date_pos_left: d_150(),
            list_font_family: d_sans_family(),
            list_font_size: d_12(),
            list_margin_top: d_20(),
            list_margin_left: d_20(),
            list_line_spacing: d_2(),
            list_column_spacing: d_20(),
            interface_section_header_height: d_32(),
            interface_section_title_size: d_14(),
            interface_row_spacing: d_6(),
            interface_column_gap: d_24(),
            list_section_header_height: d_32(),
            list_section_title_size: d_14(),
            list_row_spacing: d_6(),
            list_column_gap: d_24(),
            list_signature_bottom: d_20(),
            list_signature_right: d_20(),
            form_font_family: d_sans_family(),
            form_font_size: d_16(),
            form_bold_enabled: false,
            form_horizontal_spacing: d_12(),
            form_vertical_spacing: d_8(),
            history_font_family: d_sans_family(),
            history_font_size: d_14(),
            om_bold_enabled: false,
            list_bold_enabled: false,
            alternate_row_colors: d_true(),
            saved_configs: default_configs(),
        }
    }
}

impl PrintSettings {
    /// Parses a persisted document, merging it onto the defaults.
    ///
    /// Unknown fields are ignored, missing fields take their defaults; a
    /// document from any revision of the settings shape loads.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Applies a saved calibration preset by id. Unknown ids are ignored.
    pub fn apply_config(&mut self, id: &str) {
        if let Some(config) = self.saved_configs.iter().find(|c| c.id == id) {
            config.overrides.clone().apply(self);
        }
    }
}

/// A named calibration preset holding partial position overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "settings", default)]
    pub overrides: CalibrationOverrides,
}

/// Partial position overrides; absent fields leave the setting untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom_top: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom_left: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_spacing: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signataire_pos_top: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signataire_pos_left: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_pos_top: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_pos_left: Option<u32>,
}

impl CalibrationOverrides {
    /// Applies each present field onto `settings` individually.
    pub fn apply(self, settings: &mut PrintSettings) {
        if let Some(v) = self.nom_top {
            settings.nom_top = v;
        }
        if let Some(v) = self.nom_left {
            settings.nom_left = v;
        }
        if let Some(v) = self.field_spacing {
            settings.field_spacing = v;
        }
        if let Some(v) = self.signataire_pos_top {
            settings.signataire_pos_top = v;
        }
        if let Some(v) = self.signataire_pos_left {
            settings.signataire_pos_left = v;
        }
        if let Some(v) = self.date_pos_top {
            settings.date_pos_top = v;
        }
        if let Some(v) = self.date_pos_left {
            settings.date_pos_left = v;
        }
    }
}

/// The four built-in preset slots: two fixed layouts and two user slots.
fn default_configs() -> Vec<CalibrationConfig> {
    vec![
        CalibrationConfig {
            id: "standard".to_string(),
            name: "Standard A4".to_string(),
            description: "Configuration standard pour papier A4".to_string(),
            overrides: CalibrationOverrides {
                nom_top: Some(90),
                nom_left: Some(40),
                field_spacing: Some(15),
                signataire_pos_top: Some(250),
                signataire_pos_left: Some(40),
                date_pos_top: Some(250),
                date_pos_left: Some(150),
            },
        },
        CalibrationConfig {
            id: "compact".to_string(),
            name: "Format Compact".to_string(),
            description: "Configuration compacte pour économiser l'espace".to_string(),
            overrides: CalibrationOverrides {
                nom_top: Some(80),
                nom_left: Some(30),
                field_spacing: Some(12),
                signataire_pos_top: Some(240),
                signataire_pos_left: Some(30),
                date_pos_top: Some(240),
                date_pos_left: Some(130),
            },
        },
        CalibrationConfig {
            id: "custom1".to_string(),
            name: "Préselection personnalisée 1".to_string(),
            description: "Configuration personnalisable".to_string(),
            overrides: CalibrationOverrides::default(),
        },
        CalibrationConfig {
            id: "custom2".to_string(),
            name: "Préselection personnalisée 2".to_string(),
            description: "Configuration personnalisable".to_string(),
            overrides: CalibrationOverrides::default(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PrintSettings::default();
        assert_eq!(settings.font_family, "'Times New Roman', Times, serif");
        assert_eq!(settings.nom_top, 90);
        assert_eq!(settings.date_pos_left, 150);
        assert!(settings.alternate_row_colors);
        assert!(!settings.form_bold_enabled);
        assert_eq!(settings.saved_configs.len(), 4);
    }

    #[test]
    fn test_partial_document_merges_field_by_field() {
        let settings = PrintSettings::from_json(r#"{"nomTop": 120, "formBoldEnabled": true}"#).unwrap();
        assert_eq!(settings.nom_top, 120);
        assert!(settings.form_bold_enabled);
        // Untouched fields keep their defaults
        assert_eq!(settings.nom_left, 40);
        assert_eq!(settings.list_font_size, 12);
        assert_eq!(settings.saved_configs.len(), 4);
    }

    #[test]
    fn test_stale_document_with_unknown_fields_still_parses() {
        let settings =
            PrintSettings::from_json(r#"{"removedKnob": 7, "fontSize": 14}"#).unwrap();
        assert_eq!(settings.font_size, 14);
    }

    #[test]
    fn test_apply_config_overrides_positions_only() {
        let mut settings = PrintSettings::default();
        settings.font_size = 13;

        settings.apply_config("compact");

        assert_eq!(settings.nom_top, 80);
        assert_eq!(settings.nom_left, 30);
        assert_eq!(settings.date_pos_left, 130);
        // Non-position fields are untouched
        assert_eq!(settings.font_size, 13);
    }

    #[test]
    fn test_apply_empty_custom_slot_is_a_no_op() {
        let mut settings = PrintSettings::default();
        let before = settings.clone();
        settings.apply_config("custom1");
        assert_eq!(settings, before);

        settings.apply_config("does-not-exist");
        assert_eq!(settings, before);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_string(&PrintSettings::default()).unwrap();
        assert!(json.contains("\"nomTop\""));
        assert!(json.contains("\"savedConfigs\""));
        assert!(json.contains("\"alternateRowColors\""));
        assert!(json.contains("\"settings\""));
    }
}
