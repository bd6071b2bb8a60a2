//! The caller of a request.

use super::id::UserId;

/// Who is asking. Anonymous viewers have no user id and no privileges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: Option<UserId>,
    pub is_admin: bool,
}

impl Viewer {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(UserId::new(user_id)),
            is_admin: false,
        }
    }

    #[must_use]
    pub fn admin(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(UserId::new(user_id)),
            is_admin: true,
        }
    }

    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }
}
