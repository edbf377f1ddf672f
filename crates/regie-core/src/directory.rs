//! Group directory: who belongs to which group, and with what job title.
//!
//! The directory is supplied externally (spreadsheet import) and is empty by
//! default. Member order within a group is the imported file's row order -
//! there is no alphabetical fallback anywhere. A per-group custom order can
//! be layered on top for the selection browsing views.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::roster::Group;

/// One directory member: full name plus job title as imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub employment: String,
}

impl Member {
    pub fn new(name: impl Into<String>, employment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            employment: employment.into(),
        }
    }
}

/// Per-group member lists, read-only from the roster's perspective.
///
/// Replaced wholesale by an import; never mutated by selection operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDirectory {
    groups: BTreeMap<Group, Vec<Member>>,
}

impl GroupDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(|members| members.is_empty())
    }

    /// Total member count across all groups.
    pub fn member_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Appends a member to `group`, preserving insertion order.
    pub fn insert_member(
        &mut self,
        group: Group,
        name: impl Into<String>,
        employment: impl Into<String>,
    ) {
        self.groups
            .entry(group)
            .or_default()
            .push(Member::new(name, employment));
    }

    /// Members of `group` in imported order.
    pub fn members(&self, group: Group) -> &[Member] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Groups that currently have members, in fixed tag order.
    pub fn groups(&self) -> impl Iterator<Item = (Group, &[Member])> {
        self.groups
            .iter()
            .filter(|(_, members)| !members.is_empty())
            .map(|(group, members)| (*group, members.as_slice()))
    }

    /// The job title of `name`, uppercased; first match across groups wins.
    pub fn employment_for(&self, name: &str) -> Option<String> {
        self.groups.values().find_map(|members| {
            members
                .iter()
                .find(|member| member.name == name)
                .map(|member| member.employment.to_uppercase())
        })
    }

    /// Member names of `group` with the custom order applied.
    ///
    /// Custom entries are filtered to names that still exist in the
    /// directory; names the custom order does not know yet are appended in
    /// directory order. Without a custom order the directory order stands.
    pub fn ordered_names(&self, group: Group, custom: &CustomGroupOrder) -> Vec<String> {
        let names: Vec<String> = self
            .members(group)
            .iter()
            .map(|member| member.name.clone())
            .collect();

        match custom.get(group) {
            Some(order) => {
                let mut ordered: Vec<String> = order
                    .iter()
                    .filter(|name| names.contains(name))
                    .cloned()
                    .collect();
                ordered.extend(
                    names
                        .iter()
                        .filter(|name| !order.contains(name))
                        .cloned(),
                );
                ordered
            }
            None => names,
        }
    }
}

/// User-curated member ordering, one list per group.
///
/// Persisted separately from the directory so a re-import keeps the curated
/// order for the names that survive it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomGroupOrder {
    orders: HashMap<Group, Vec<String>>,
}

impl CustomGroupOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, group: Group, order: Vec<String>) {
        self.orders.insert(group, order);
    }

    pub fn get(&self, group: Group) -> Option<&[String]> {
        self.orders.get(&group).map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        self.orders.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
