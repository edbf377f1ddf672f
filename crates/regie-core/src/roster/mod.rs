//! Roster selection domain module.
//!
//! Owns the single ordered list of selected people and its deterministic
//! views for display, print, and export.
//!
//! # Module Structure
//!
//! - `group`: The closed set of organizational group tags (`Group`)
//! - `model`: The roster entry (`SelectedPerson`)
//! - `partition`: Section classification and the derived partition
//! - `manager`: Ordered-list mutations (`RosterManager`)
//! - `disposition`: JSON export/import of the roster layout
//! - `rows`: Numbered print/export row building

mod disposition;
mod group;
mod manager;
mod model;
mod partition;
mod rows;

pub use disposition::{Disposition, DispositionImport};
pub use group::Group;
pub use manager::RosterManager;
pub use model::SelectedPerson;
pub use partition::{NumberedPerson, RosterPartition, Section};
pub use rows::{ListRow, list_rows, split_full_name};
