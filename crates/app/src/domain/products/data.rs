//! Product Data

use crate::domain::{categories::records::CategoryUuid, products::records::ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub original_price: Option<u64>,
    pub badge: Option<String>,
    pub image_url: Option<String>,
    pub stock: i64,
    pub is_new: bool,
    pub is_active: bool,
    pub category_uuid: Option<CategoryUuid>,
}

/// Product Update Data (whole-row replacement, as the admin form submits it)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub original_price: Option<u64>,
    pub badge: Option<String>,
    pub image_url: Option<String>,
    pub stock: i64,
    pub is_new: bool,
    pub is_active: bool,
    pub category_uuid: Option<CategoryUuid>,
}
