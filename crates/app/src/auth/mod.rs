//! Authentication

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::{Actor, ApiTokenMetadata, IssuedApiToken, NewApiToken};
pub use service::*;
pub use token::*;
