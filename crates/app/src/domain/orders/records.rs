//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        orders::code::RedemptionCode, products::records::ProductUuid, users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// One purchased unit. A checkout with quantity N produces N of these,
/// each carrying its own redemption code and a snapshot of the product
/// name and price at purchase time.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: Option<ProductUuid>,
    pub product_name: String,
    pub price: u64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub redemption_code: RedemptionCode,
    pub is_redeemed: bool,
    pub redeemed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Paypal,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Paypal => "paypal",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "card" => Ok(Self::Card),
            "paypal" => Ok(Self::Paypal),
            other => Err(UnknownPaymentValue(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Completed,
    Pending,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownPaymentValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            other => Err(UnknownPaymentValue(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown payment value: {0}")]
pub struct UnknownPaymentValue(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_round_trips_through_storage_form() {
        for method in [PaymentMethod::Card, PaymentMethod::Paypal] {
            assert_eq!(method.as_str().parse::<PaymentMethod>().ok(), Some(method));
        }
    }

    #[test]
    fn payment_status_rejects_unknown_values() {
        assert!("refunded".parse::<PaymentStatus>().is_err());
    }
}
