//! Domain modules

pub mod categories;
pub mod orders;
pub mod products;
pub mod settings;
pub mod tickets;
pub mod users;
