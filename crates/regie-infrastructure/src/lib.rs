//! Infrastructure adapters for the Régie toolkit.
//!
//! Concrete implementations of the seams `regie-core` defines: persistent
//! key-value stores with cross-handle change notification, auth providers
//! (remote REST and in-process static), spreadsheet import/export, and
//! default file locations.

pub mod auth;
pub mod paths;
pub mod spreadsheet;
pub mod store;

pub use crate::auth::{RestAuthProvider, StaticAuthProvider};
pub use crate::paths::RegiePaths;
pub use crate::store::{JsonFileStore, MemoryStore};
