//! Test Helpers

use crate::domain::products::{data::NewProduct, records::ProductUuid};

pub(crate) fn make_new_product(uuid: ProductUuid, name: &str, price: u64) -> NewProduct {
    NewProduct {
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
    }
}
