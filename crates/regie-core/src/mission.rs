//! Mission-order form data.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Default residence printed on every mission order.
pub const DEFAULT_RESIDENCE: &str = "EPTV, 21 BOULEVARD DES MARTYRS, ALGER";
/// Default means of transport.
pub const DEFAULT_TRANSPORT: &str = "Véhicule de service";
/// Default signing authority.
pub const DEFAULT_SIGNATAIRE: &str = "CHEF DE DÉPARTEMENT";

/// The mission-order form fields.
///
/// Field names match the JSON the deployed application exchanges (history
/// entries, list exports). Every field has a default so a stale persisted
/// entry still parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionForm {
    #[serde(default = "default_residence")]
    pub residence: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub motif: String,
    #[serde(default = "default_transport")]
    pub transport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matricule: Option<String>,
    #[serde(default)]
    pub date_depart: String,
    #[serde(default)]
    pub date_retour: String,
    #[serde(default = "default_signataire")]
    pub signataire: String,
    /// Issue date, ISO `YYYY-MM-DD`; defaults to today.
    #[serde(default = "today_iso")]
    pub date: String,
}

fn default_residence() -> String {
    DEFAULT_RESIDENCE.to_string()
}

fn default_transport() -> String {
    DEFAULT_TRANSPORT.to_string()
}

fn default_signataire() -> String {
    DEFAULT_SIGNATAIRE.to_string()
}

fn today_iso() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

impl Default for MissionForm {
    fn default() -> Self {
        Self {
            residence: default_residence(),
            destination: String::new(),
            motif: String::new(),
            transport: default_transport(),
            matricule: None,
            date_depart: String::new(),
            date_retour: String::new(),
            signataire: default_signataire(),
            date: today_iso(),
        }
    }
}
