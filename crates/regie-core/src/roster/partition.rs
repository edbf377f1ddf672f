//! Section classification and the derived roster partition.

use serde::{Deserialize, Serialize};

use super::model::SelectedPerson;

/// Display/print sections, in their fixed rendering order.
///
/// The free section collects the primary groups (HD1-HD5, DOP, Machinistes,
/// Autres) and renders without a header; the remaining sections each render
/// under their header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Free,
    Lighting,
    Transmission,
    Drivers,
    Tda,
    Fixe,
}

impl Section {
    /// Fixed bucket order for display, print, and numbering.
    pub const ORDER: [Section; 6] = [
        Section::Free,
        Section::Lighting,
        Section::Transmission,
        Section::Drivers,
        Section::Tda,
        Section::Fixe,
    ];

    /// The printed section header, `None` for the free section.
    pub fn header(&self) -> Option<&'static str> {
        match self {
            Section::Free => None,
            Section::Lighting => Some("ÉCLAIRAGE"),
            Section::Transmission => Some("TRANSMISSION"),
            Section::Drivers => Some("CHAUFFEURS"),
            Section::Tda => Some("TDA"),
            Section::Fixe => Some("FIXE"),
        }
    }
}

/// The selected roster split into display sections.
///
/// This is a pure, order-preserving view recomputed from the roster on every
/// read; the underlying ordered list stays the single source of truth. Since
/// the group set is closed, every entry lands in exactly one bucket and the
/// bucket sizes always sum to the roster length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterPartition {
    pub free: Vec<SelectedPerson>,
    pub lighting: Vec<SelectedPerson>,
    pub transmission: Vec<SelectedPerson>,
    pub drivers: Vec<SelectedPerson>,
    pub tda: Vec<SelectedPerson>,
    pub fixe: Vec<SelectedPerson>,
}

/// One entry with its 1-based positional index.
///
/// The index is recomputed on every read and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedPerson {
    pub index: usize,
    pub person: SelectedPerson,
    pub section: Section,
}

impl RosterPartition {
    /// Partitions `entries` by group tag, preserving their relative order
    /// within each bucket.
    pub fn from_entries(entries: &[SelectedPerson]) -> Self {
        let mut partition = Self::default();
        for person in entries {
            partition.bucket_mut(person.group.section()).push(person.clone());
        }
        partition
    }

    /// The bucket for a section, in roster order.
    pub fn bucket(&self, section: Section) -> &[SelectedPerson] {
        match section {
            Section::Free => &self.free,
            Section::Lighting => &self.lighting,
            Section::Transmission => &self.transmission,
            Section::Drivers => &self.drivers,
            Section::Tda => &self.tda,
            Section::Fixe => &self.fixe,
        }
    }

    fn bucket_mut(&mut self, section: Section) -> &mut Vec<SelectedPerson> {
        match section {
            Section::Free => &mut self.free,
            Section::Lighting => &mut self.lighting,
            Section::Transmission => &mut self.transmission,
            Section::Drivers => &mut self.drivers,
            Section::Tda => &mut self.tda,
            Section::Fixe => &mut self.fixe,
        }
    }

    /// Total number of entries across all buckets.
    pub fn len(&self) -> usize {
        Section::ORDER
            .iter()
            .map(|section| self.bucket(*section).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenates the buckets in fixed order, assigning 1-based indices.
    pub fn numbered(&self) -> Vec<NumberedPerson> {
        let mut numbered = Vec::with_capacity(self.len());
        let mut index = 1;
        for section in Section::ORDER {
            for person in self.bucket(section) {
                numbered.push(NumberedPerson {
                    index,
                    person: person.clone(),
                    section,
                });
                index += 1;
            }
        }
        numbered
    }
}
