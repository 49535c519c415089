use chrono::{DateTime, Utc};

use staffdir_core::{Entity, UserId};

/// Registered account that can log in and receive tokens.
///
/// Holds a bcrypt hash, never the password itself. Not `Serialize`: the hash
/// must never reach a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for UserAccount {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
