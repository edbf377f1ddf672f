//! Application layer for the Régie toolkit.
//!
//! Use cases that coordinate the core managers with the infrastructure
//! adapters: screen gating from session state, and the mission-order
//! workspace wired to the persistent store.

pub mod mission_usecase;
pub mod screen;

pub use mission_usecase::MissionOrderUseCase;
pub use screen::{Screen, screen_for};
