//! Checkout input payloads.

use crate::domain::{orders::records::PaymentMethod, products::records::ProductUuid};

/// One cart line: a product and how many units of it to buy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// A complete checkout request. The whole batch succeeds or fails as
/// one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub payment_method: PaymentMethod,
    pub lines: Vec<CheckoutLine>,
}
