//! Orders

pub mod code;
pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use code::RedemptionCode;
pub use errors::OrdersServiceError;
pub use service::*;
