//! Order Handlers

pub(crate) mod admin_index;
pub(crate) mod checkout;
pub(crate) mod index;
pub(crate) mod lookup_code;
pub(crate) mod redeem;
