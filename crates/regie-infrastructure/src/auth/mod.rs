//! Concrete [`AuthProvider`] implementations.
//!
//! [`AuthProvider`]: regie_core::auth::AuthProvider

mod rest;
mod static_provider;

pub use rest::RestAuthProvider;
pub use static_provider::StaticAuthProvider;
