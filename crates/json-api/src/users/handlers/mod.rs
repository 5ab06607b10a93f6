//! User Handlers

pub(crate) mod index;
pub(crate) mod set_role;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use glacier_app::domain::users::records::{Role, UserRecord, UserUuid};

    pub(super) fn make_user(uuid: UserUuid, email: &str, role: Role) -> UserRecord {
        UserRecord {
            uuid,
            email: email.to_owned(),
            full_name: "Test User".to_owned(),
            phone: None,
            role,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
