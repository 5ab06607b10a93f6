//! Product Handlers

pub(crate) mod admin_index;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use glacier_app::domain::products::records::{ProductRecord, ProductUuid};

    pub(super) fn make_product(uuid: ProductUuid, name: &str, price: u64) -> ProductRecord {
        ProductRecord {
            uuid,
            name: name.to_string(),
            description: None,
            price,
            original_price: None,
            badge: None,
            image_url: None,
            stock: 100,
            is_new: false,
            is_active: true,
            category_uuid: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }
}
