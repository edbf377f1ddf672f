//! Organizational group tags.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::partition::Section;

/// The closed set of organizational groups used for selection browsing and
/// print/export sectioning.
///
/// The string forms are the wire format used in stored rosters, disposition
/// files, and directory imports.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Group {
    #[serde(rename = "HD1")]
    #[strum(serialize = "HD1")]
    Hd1,
    #[serde(rename = "HD2")]
    #[strum(serialize = "HD2")]
    Hd2,
    #[serde(rename = "HD3")]
    #[strum(serialize = "HD3")]
    Hd3,
    #[serde(rename = "HD4")]
    #[strum(serialize = "HD4")]
    Hd4,
    #[serde(rename = "HD5")]
    #[strum(serialize = "HD5")]
    Hd5,
    #[serde(rename = "G6")]
    #[strum(serialize = "G6")]
    G6,
    #[serde(rename = "G7")]
    #[strum(serialize = "G7")]
    G7,
    #[serde(rename = "G8")]
    #[strum(serialize = "G8")]
    G8,
    #[serde(rename = "G9")]
    #[strum(serialize = "G9")]
    G9,
    #[serde(rename = "G10")]
    #[strum(serialize = "G10")]
    G10,
    #[serde(rename = "G11")]
    #[strum(serialize = "G11")]
    G11,
    #[serde(rename = "G12")]
    #[strum(serialize = "G12")]
    G12,
    #[serde(rename = "FH")]
    #[strum(serialize = "FH")]
    Fh,
    #[serde(rename = "Chauffeurs")]
    #[strum(serialize = "Chauffeurs")]
    Chauffeurs,
    #[serde(rename = "DOP")]
    #[strum(serialize = "DOP")]
    Dop,
    #[serde(rename = "Machinistes")]
    #[strum(serialize = "Machinistes")]
    Machinistes,
    #[serde(rename = "Autres")]
    #[strum(serialize = "Autres")]
    Autres,
    #[serde(rename = "TDA")]
    #[strum(serialize = "TDA")]
    Tda,
    #[serde(rename = "Fixe")]
    #[strum(serialize = "Fixe")]
    Fixe,
}

impl Group {
    /// Classifies this group into its display/print section.
    ///
    /// Centralizing the membership tests here keeps the tag lists out of the
    /// display, print, and export paths.
    pub fn section(&self) -> Section {
        match self {
            Group::Hd1
            | Group::Hd2
            | Group::Hd3
            | Group::Hd4
            | Group::Hd5
            | Group::Dop
            | Group::Machinistes
            | Group::Autres => Section::Free,
            Group::G6
            | Group::G7
            | Group::G8
            | Group::G9
            | Group::G10
            | Group::G11
            | Group::G12 => Section::Lighting,
            Group::Fh => Section::Transmission,
            Group::Chauffeurs => Section::Drivers,
            Group::Tda => Section::Tda,
            Group::Fixe => Section::Fixe,
        }
    }
}
