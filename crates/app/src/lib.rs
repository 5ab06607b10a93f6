//! Shared application domain, persistence, and gateway modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod gateways;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
