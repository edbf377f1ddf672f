//! Numbered row building for display, print, and export.

use crate::directory::GroupDirectory;

use super::partition::{RosterPartition, Section};

/// One print/export row: positional number, split name, job title, section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    /// 1-based position over the buckets concatenated in fixed order.
    pub index: usize,
    pub last_name: String,
    pub first_name: String,
    pub employment: String,
    pub section: Section,
}

/// Splits a "Last First" full name into uppercase (last, first) halves.
///
/// A single-word name is all last name. Additional words all belong to the
/// first name ("Ben Salah Mohamed Amine" keeps "MOHAMED AMINE" together).
pub fn split_full_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.trim().split_whitespace();
    let last = parts.next().unwrap_or_default().to_uppercase();
    let first = parts.collect::<Vec<_>>().join(" ").to_uppercase();
    (last, first)
}

/// Builds the numbered rows for the current partition.
///
/// Row order and numbering follow the partition's fixed bucket order; the
/// job title comes from the directory lookup, empty when the person is not
/// in any imported group.
pub fn list_rows(partition: &RosterPartition, directory: &GroupDirectory) -> Vec<ListRow> {
    partition
        .numbered()
        .into_iter()
        .map(|numbered| {
            let (last_name, first_name) = split_full_name(&numbered.person.name);
            ListRow {
                index: numbered.index,
                last_name,
                first_name,
                employment: directory
                    .employment_for(&numbered.person.name)
                    .unwrap_or_default(),
                section: numbered.section,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Group, SelectedPerson};

    #[test]
    fn test_split_full_name() {
        assert_eq!(
            split_full_name("Dupont Ali"),
            ("DUPONT".to_string(), "ALI".to_string())
        );
        assert_eq!(
            split_full_name("Ben Salah Mohamed Amine"),
            ("BEN".to_string(), "SALAH MOHAMED AMINE".to_string())
        );
        assert_eq!(split_full_name("Madonna"), ("MADONNA".to_string(), String::new()));
        assert_eq!(split_full_name("  "), (String::new(), String::new()));
    }

    #[test]
    fn test_rows_carry_numbering_and_employment() {
        let mut directory = GroupDirectory::default();
        directory.insert_member(Group::Hd1, "Dupont Ali", "Ingénieur");
        directory.insert_member(Group::G6, "Meziane Sara", "Chef Éclairagiste");

        let entries = vec![
            SelectedPerson::new("Meziane Sara", Group::G6),
            SelectedPerson::new("Dupont Ali", Group::Hd1),
            SelectedPerson::new("Inconnu Untel", Group::Hd2),
        ];
        let rows = list_rows(&RosterPartition::from_entries(&entries), &directory);

        // Free bucket numbers first
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].last_name, "DUPONT");
        assert_eq!(rows[0].first_name, "ALI");
        assert_eq!(rows[0].employment, "INGÉNIEUR");
        assert_eq!(rows[0].section, Section::Free);

        // Missing directory entry renders an empty job title, not an error
        assert_eq!(rows[1].last_name, "INCONNU");
        assert_eq!(rows[1].employment, "");

        assert_eq!(rows[2].index, 3);
        assert_eq!(rows[2].section, Section::Lighting);
        assert_eq!(rows[2].employment, "CHEF ÉCLAIRAGISTE");
    }
}
