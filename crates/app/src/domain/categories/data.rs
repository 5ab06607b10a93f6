//! Category Data

use crate::domain::categories::records::CategoryUuid;

/// New Category Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i64,
    pub icon: Option<String>,
    pub is_active: bool,
}

/// Category Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub name: String,
    pub description: Option<String>,
    pub display_order: i64,
    pub icon: Option<String>,
    pub is_active: bool,
}
