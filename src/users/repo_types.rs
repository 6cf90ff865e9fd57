use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::users::dto::PublicUser;

/// Columns every entity table carries.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Model {
    pub id: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>, // soft-delete marker
}

/// Username/password pair, as submitted by a client and as stored.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, FromRow)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String, // plaintext, never hashed
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    #[sqlx(flatten)]
    pub model: Model,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[sqlx(flatten)]
    pub credentials: Credentials,
}

impl User {
    pub fn to_public(&self) -> PublicUser {
        PublicUser::from(self)
    }
}

// Only the wire shape is ever serialized, so the password can't leak.
impl Serialize for User {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_public().serialize(serializer)
    }
}
