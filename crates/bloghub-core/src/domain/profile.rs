use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Extended profile information, one per user account.
///
/// Created empty at registration, or lazily on first profile-update access
/// for accounts that predate the profile table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub avatar: Option<String>,
    pub website: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create an empty profile for a user.
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            bio: String::new(),
            avatar: None,
            website: String::new(),
            location: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the modification timestamp before an update.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_is_empty() {
        let user_id = Uuid::new_v4();
        let profile = UserProfile::new(user_id);

        assert_eq!(profile.user_id, user_id);
        assert!(profile.bio.is_empty());
        assert!(profile.avatar.is_none());
        assert!(profile.website.is_empty());
        assert!(profile.location.is_empty());
    }
}
