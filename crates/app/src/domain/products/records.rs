//! Product Records

use jiff::Timestamp;

use crate::{domain::categories::records::CategoryUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
///
/// Prices are stored in minor units (a 3-decimal currency: 5.000 is 5000).
#[derive(Debug, Clone)]
pub struct ProductRecord {
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
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
