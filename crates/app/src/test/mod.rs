//! Shared test infrastructure.

mod helpers;

pub(crate) use context::TestContext;
pub(crate) use helpers::make_new_product;
