//! User Data

use crate::domain::users::records::{Role, UserUuid};

/// New User Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// UUID to assign to the profile row.
    pub uuid: UserUuid,

    /// Login email, unique across the store.
    pub email: String,

    /// Display name.
    pub full_name: String,

    /// Optional phone number for OTP delivery.
    pub phone: Option<String>,

    /// Initial role.
    pub role: Role,
}
