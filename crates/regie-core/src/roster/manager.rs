//! Ordered roster mutations.

use super::group::Group;
use super::model::SelectedPerson;
use super::partition::RosterPartition;

/// The single ordered source-of-truth list of selected people.
///
/// Order is user-controlled: entries append on toggle and move only through
/// explicit reorder operations or a wholesale replace. The manager never
/// sorts by name, role, or any other attribute - insertion and drag order
/// flow end-to-end through display, print, and export.
///
/// All operations are synchronous in-memory mutations; persistence is the
/// caller's concern.
#[derive(Debug, Clone, Default)]
pub struct RosterManager {
    entries: Vec<SelectedPerson>,
}

impl RosterManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current roster, in user order.
    pub fn entries(&self) -> &[SelectedPerson] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Toggles the exact (name, group) pair: present removes it, absent
    /// appends it at the end.
    ///
    /// This is the only add/remove path from group browsing, so a pair can
    /// occur at most once. The same name under two different groups is two
    /// distinct entries and stays that way.
    pub fn toggle(&mut self, name: &str, group: Group) {
        match self
            .entries
            .iter()
            .position(|p| p.name == name && p.group == group)
        {
            Some(index) => {
                self.entries.remove(index);
            }
            None => self.entries.push(SelectedPerson::new(name, group)),
        }
    }

    /// Removes the first entry matching `name`, regardless of group.
    pub fn remove(&mut self, name: &str) {
        if let Some(index) = self.entries.iter().position(|p| p.name == name) {
            self.entries.remove(index);
        }
    }

    /// Wholesale replace after a drag move, disposition import, or history
    /// recall.
    ///
    /// No validation that the new list is a permutation of the old one -
    /// callers constructing a relocation are responsible for preserving set
    /// membership.
    pub fn reorder(&mut self, new_order: Vec<SelectedPerson>) {
        self.entries = new_order;
    }

    /// Moves the entry at `from` to position `to`, shifting the entries in
    /// between. Out-of-range indices are ignored.
    pub fn relocate(&mut self, from: usize, to: usize) {
        if from >= self.entries.len() || to >= self.entries.len() || from == to {
            return;
        }
        let moved = self.entries.remove(from);
        self.entries.insert(to, moved);
    }

    /// Swaps the entry at `index` with its predecessor.
    pub fn move_up(&mut self, index: usize) {
        if index > 0 && index < self.entries.len() {
            self.entries.swap(index - 1, index);
        }
    }

    /// Swaps the entry at `index` with its successor.
    pub fn move_down(&mut self, index: usize) {
        if index + 1 < self.entries.len() {
            self.entries.swap(index, index + 1);
        }
    }

    /// Empties the roster. Confirmation is a presentation concern.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The derived section view of the current roster.
    ///
    /// Recomputed on every call; the ordered list above stays the source of
    /// truth.
    pub fn partition(&self) -> RosterPartition {
        RosterPartition::from_entries(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::partition::Section;

    fn person(name: &str, group: Group) -> SelectedPerson {
        SelectedPerson::new(name, group)
    }

    #[test]
    fn test_toggle_appends_then_removes() {
        let mut roster = RosterManager::new();
        roster.toggle("Dupont Ali", Group::Hd1);
        roster.toggle("Meziane Sara", Group::G6);

        assert_eq!(
            roster.entries(),
            &[
                person("Dupont Ali", Group::Hd1),
                person("Meziane Sara", Group::G6),
            ]
        );

        roster.toggle("Dupont Ali", Group::Hd1);
        assert_eq!(roster.entries(), &[person("Meziane Sara", Group::G6)]);
    }

    #[test]
    fn test_toggle_twice_restores_original_order() {
        let mut roster = RosterManager::new();
        roster.toggle("A", Group::Hd1);
        roster.toggle("B", Group::G6);
        roster.toggle("C", Group::Fh);
        let before = roster.entries().to_vec();

        roster.toggle("B", Group::G6);
        roster.toggle("B", Group::G6);

        // The re-added entry lands at the end, everyone else keeps their
        // relative order
        assert_eq!(
            roster.entries(),
            &[
                person("A", Group::Hd1),
                person("C", Group::Fh),
                person("B", Group::G6),
            ]
        );

        // A full round trip on the last entry is a true no-op
        roster.toggle("B", Group::G6);
        roster.toggle("B", Group::G6);
        assert_eq!(roster.entries().len(), before.len());
    }

    #[test]
    fn test_same_name_in_two_groups_is_two_entries() {
        let mut roster = RosterManager::new();
        roster.toggle("Haddad Omar", Group::Hd1);
        roster.toggle("Haddad Omar", Group::Fh);
        assert_eq!(roster.len(), 2);

        // Toggling one pair leaves the other alone
        roster.toggle("Haddad Omar", Group::Hd1);
        assert_eq!(roster.entries(), &[person("Haddad Omar", Group::Fh)]);
    }

    #[test]
    fn test_remove_matches_any_group() {
        let mut roster = RosterManager::new();
        roster.toggle("A", Group::Hd1);
        roster.toggle("B", Group::G6);
        roster.remove("B");
        assert_eq!(roster.entries(), &[person("A", Group::Hd1)]);

        // Removing an absent name is a no-op
        roster.remove("Z");
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_toggle_never_permutes_untouched_entries() {
        let mut roster = RosterManager::new();
        for (name, group) in [
            ("A", Group::Hd1),
            ("B", Group::G6),
            ("C", Group::Fh),
            ("D", Group::Chauffeurs),
            ("E", Group::Hd2),
        ] {
            roster.toggle(name, group);
        }

        roster.toggle("C", Group::Fh);

        let names: Vec<&str> = roster.entries().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "D", "E"]);
    }

    #[test]
    fn test_relocate_matches_drag_splice() {
        // Roster [{A,HD1},{B,HD1},{C,G6}]; move index 0 to index 2
        let mut roster = RosterManager::new();
        roster.toggle("A", Group::Hd1);
        roster.toggle("B", Group::Hd1);
        roster.toggle("C", Group::G6);

        roster.relocate(0, 2);

        assert_eq!(
            roster.entries(),
            &[
                person("B", Group::Hd1),
                person("C", Group::G6),
                person("A", Group::Hd1),
            ]
        );

        let partition = roster.partition();
        assert_eq!(
            partition.free,
            vec![person("B", Group::Hd1), person("A", Group::Hd1)]
        );
        assert_eq!(partition.lighting, vec![person("C", Group::G6)]);
    }

    #[test]
    fn test_relocate_out_of_range_is_ignored() {
        let mut roster = RosterManager::new();
        roster.toggle("A", Group::Hd1);
        roster.toggle("B", Group::G6);

        roster.relocate(0, 5);
        roster.relocate(7, 0);

        assert_eq!(
            roster.entries(),
            &[person("A", Group::Hd1), person("B", Group::G6)]
        );
    }

    #[test]
    fn test_move_up_and_down() {
        let mut roster = RosterManager::new();
        roster.toggle("A", Group::Hd1);
        roster.toggle("B", Group::Hd2);
        roster.toggle("C", Group::Hd3);

        roster.move_up(2);
        let names: Vec<&str> = roster.entries().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);

        roster.move_down(0);
        let names: Vec<&str> = roster.entries().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);

        // Edges are no-ops
        roster.move_up(0);
        roster.move_down(2);
        let names: Vec<&str> = roster.entries().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_reorder_replaces_wholesale() {
        let mut roster = RosterManager::new();
        roster.toggle("A", Group::Hd1);
        roster.toggle("B", Group::G6);
        roster.toggle("C", Group::Fh);

        let imported = vec![
            person("V", Group::Tda),
            person("W", Group::Hd4),
            person("X", Group::G9),
            person("Y", Group::Fixe),
            person("Z", Group::Chauffeurs),
        ];
        roster.reorder(imported.clone());

        // Exactly the imported five, in imported order, nothing retained
        assert_eq!(roster.entries(), imported.as_slice());
    }

    #[test]
    fn test_clear() {
        let mut roster = RosterManager::new();
        roster.toggle("A", Group::Hd1);
        roster.clear();
        assert!(roster.is_empty());
        assert!(roster.partition().is_empty());
    }

    #[test]
    fn test_partition_numbering_follows_user_order() {
        let mut roster = RosterManager::new();
        roster.toggle("Lum", Group::G6);
        roster.toggle("Cam", Group::Hd1);
        roster.toggle("Drv", Group::Chauffeurs);

        let numbered = roster.partition().numbered();
        // Free bucket numbers first even though it was selected second
        assert_eq!(numbered[0].person.name, "Cam");
        assert_eq!(numbered[0].section, Section::Free);
        assert_eq!(numbered[1].person.name, "Lum");
        assert_eq!(numbered[2].person.name, "Drv");
        assert_eq!(
            numbered.iter().map(|n| n.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }
}
