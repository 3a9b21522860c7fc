use chrono::{DateTime, Utc};

/// Identity recorded for every token issued by a password login.
pub const ADMIN_USER_ID: &str = "admin";

/// The identity a bearer token resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub issued_at: DateTime<Utc>,
}

impl Principal {
    pub fn admin() -> Self {
        Self {
            user_id: ADMIN_USER_ID.to_string(),
            issued_at: Utc::now(),
        }
    }
}
