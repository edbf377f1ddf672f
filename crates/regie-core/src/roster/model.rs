//! Roster entry model.

use serde::{Deserialize, Serialize};

use super::group::Group;

/// One selected roster entry.
///
/// `name` is a "Last First" full name and acts as the key within the roster.
/// The same name may appear under two different groups when the person is
/// present in both group directories; that duplication is accepted, not
/// collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPerson {
    pub name: String,
    pub group: Group,
}

impl SelectedPerson {
    pub fn new(name: impl Into<String>, group: Group) -> Self {
        Self {
            name: name.into(),
            group,
        }
    }
}
