//! Spreadsheet import/export.
//!
//! The directory arrives as a spreadsheet with one technician per row
//! (columns `Nom`, `Équipe`, `Poste`); the personnel list leaves as a
//! spreadsheet with title rows, section headers, and one numbered row per
//! person. Row order is preserved both ways - the file's order is the
//! directory's order.

use std::io::Read;

use chrono::NaiveDate;
use regie_core::directory::GroupDirectory;
use regie_core::error::{RegieError, Result};
use regie_core::mission::MissionForm;
use regie_core::roster::{Group, ListRow, Section};

/// Accepted spellings per column, checked in order.
const NAME_COLUMNS: [&str; 2] = ["Nom", "NOM"];
const GROUP_COLUMNS: [&str; 4] = ["Équipe", "Equipe", "ÉQUIPE", "Groupe"];
const EMPLOYMENT_COLUMNS: [&str; 4] = ["Poste", "POSTE", "Fonction", "FONCTION"];

fn column_index(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|candidate| headers.iter().position(|h| h.trim() == *candidate))
}

/// Parses a directory spreadsheet.
///
/// Rows with an empty name are skipped; rows with an unknown group tag are
/// skipped and logged, never fatal - a partially stale file still imports
/// everything it can. Per-group member order is the file's row order.
///
/// # Errors
///
/// Returns an error when the document is not valid CSV or the `Nom` /
/// `Équipe` columns are missing entirely.
pub fn parse_directory<R: Read>(reader: R) -> Result<GroupDirectory> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|e| RegieError::serialization("CSV", e.to_string()))?
        .clone();

    let name_col = column_index(&headers, &NAME_COLUMNS)
        .ok_or_else(|| RegieError::serialization("CSV", "missing 'Nom' column"))?;
    let group_col = column_index(&headers, &GROUP_COLUMNS)
        .ok_or_else(|| RegieError::serialization("CSV", "missing 'Équipe' column"))?;
    let employment_col = column_index(&headers, &EMPLOYMENT_COLUMNS);

    let mut directory = GroupDirectory::new();
    let mut skipped = 0usize;

    for record in csv_reader.records() {
        let record = record.map_err(|e| RegieError::serialization("CSV", e.to_string()))?;
        let name = record.get(name_col).unwrap_or_default().trim();
        if name.is_empty() {
            continue;
        }
        let tag = record.get(group_col).unwrap_or_default().trim();
        let group = match tag.parse::<Group>() {
            Ok(group) => group,
            Err(_) => {
                tracing::warn!("skipping '{}': unknown group tag '{}'", name, tag);
                skipped += 1;
                continue;
            }
        };
        let employment = employment_col
            .and_then(|col| record.get(col))
            .unwrap_or_default()
            .trim();
        directory.insert_member(group, name, employment);
    }

    tracing::debug!(
        "directory import: {} members, {} rows skipped",
        directory.member_count(),
        skipped
    );
    Ok(directory)
}

/// ISO `YYYY-MM-DD` rendered as `DD/MM/YYYY`; anything else passes through.
fn format_date(iso: &str) -> String {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| iso.to_string())
}

fn write_record<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    record: &[&str],
) -> Result<()> {
    writer
        .write_record(record)
        .map_err(|e| RegieError::serialization("CSV", e.to_string()))
}

/// Renders the numbered personnel list as a CSV document.
///
/// Layout mirrors the printed list: a title block built from the form, then
/// each section's header followed by its rows in roster order.
pub fn export_list<W: std::io::Write>(
    writer: W,
    rows: &[ListRow],
    form: &MissionForm,
) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    let event = if form.motif.is_empty() {
        "ACTIVITÉ OFFICIELLE"
    } else {
        &form.motif
    };

    write_record(&mut csv_writer, &["LISTE DES TECHNICIENS"])?;
    write_record(&mut csv_writer, &[&format!("ÉVÉNEMENT : {}", event)])?;
    write_record(&mut csv_writer, &[&format!("LIEU : {}", form.destination)])?;
    write_record(
        &mut csv_writer,
        &[&format!(
            "DATE : DU {} AU {}",
            format_date(&form.date_depart),
            format_date(&form.date_retour)
        )],
    )?;

    let mut current_section: Option<Section> = None;
    for row in rows {
        if current_section != Some(row.section) {
            current_section = Some(row.section);
            if let Some(header) = row.section.header() {
                write_record(&mut csv_writer, &[header])?;
            }
        }
        write_record(
            &mut csv_writer,
            &[
                &row.index.to_string(),
                &row.last_name,
                &row.first_name,
                &row.employment,
            ],
        )?;
    }

    csv_writer
        .flush()
        .map_err(|e| RegieError::serialization("CSV", e.to_string()))?;
    Ok(())
}

/// [`export_list`] into a string.
pub fn export_list_string(rows: &[ListRow], form: &MissionForm) -> Result<String> {
    let mut buffer = Vec::new();
    export_list(&mut buffer, rows, form)?;
    String::from_utf8(buffer).map_err(|e| RegieError::serialization("CSV", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regie_core::roster::{RosterPartition, SelectedPerson, list_rows};

    const SAMPLE: &str = "\
Nom,Équipe,Poste
Dupont Ali,HD1,Ingénieur
Bensaid Karim,HD1,Technicien
Meziane Sara,G6,Chef Éclairagiste
Ancien Membre,G13,Fantôme
Haddad Omar,FH,IXM
";

    #[test]
    fn test_import_preserves_row_order_per_group() {
        let directory = parse_directory(SAMPLE.as_bytes()).unwrap();

        let hd1: Vec<&str> = directory
            .members(Group::Hd1)
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(hd1, vec!["Dupont Ali", "Bensaid Karim"]);
        assert_eq!(directory.members(Group::Fh).len(), 1);
    }

    #[test]
    fn test_import_skips_unknown_groups() {
        let directory = parse_directory(SAMPLE.as_bytes()).unwrap();
        // The G13 row is dropped, the other four import
        assert_eq!(directory.member_count(), 4);
        assert_eq!(directory.employment_for("Ancien Membre"), None);
    }

    #[test]
    fn test_import_accepts_alternate_headers() {
        let csv = "NOM,Equipe,Fonction\nDupont Ali,HD2,Opérateur\n";
        let directory = parse_directory(csv.as_bytes()).unwrap();
        assert_eq!(
            directory.employment_for("Dupont Ali"),
            Some("OPÉRATEUR".to_string())
        );
    }

    #[test]
    fn test_import_without_name_column_fails() {
        let csv = "Prénom,Équipe\nAli,HD1\n";
        assert!(parse_directory(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_export_layout() {
        let mut directory = GroupDirectory::new();
        directory.insert_member(Group::Hd1, "Dupont Ali", "Ingénieur");
        directory.insert_member(Group::G6, "Meziane Sara", "Chef Éclairagiste");

        let entries = vec![
            SelectedPerson::new("Dupont Ali", Group::Hd1),
            SelectedPerson::new("Meziane Sara", Group::G6),
        ];
        let rows = list_rows(&RosterPartition::from_entries(&entries), &directory);

        let form = MissionForm {
            motif: "Match amical".to_string(),
            destination: "Oran".to_string(),
            date_depart: "2024-03-01".to_string(),
            date_retour: "2024-03-03".to_string(),
            ..MissionForm::default()
        };

        let output = export_list_string(&rows, &form).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "LISTE DES TECHNICIENS");
        assert_eq!(lines[1], "ÉVÉNEMENT : Match amical");
        assert_eq!(lines[2], "LIEU : Oran");
        assert_eq!(lines[3], "DATE : DU 01/03/2024 AU 03/03/2024");
        // Free-bucket row has no section header before it
        assert_eq!(lines[4], "1,DUPONT,ALI,INGÉNIEUR");
        assert_eq!(lines[5], "ÉCLAIRAGE");
        assert_eq!(lines[6], "2,MEZIANE,SARA,CHEF ÉCLAIRAGISTE");
    }
}
