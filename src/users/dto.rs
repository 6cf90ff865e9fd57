use serde::Serialize;
use time::OffsetDateTime;

use crate::users::repo_types::User;

/// Public shape of a user. The password is always blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deleted_at: Option<OffsetDateTime>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.model.id,
            created_at: u.model.created_at,
            updated_at: u.model.updated_at,
            deleted_at: u.model.deleted_at,
            email: u.email.clone(),
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
            username: u.credentials.username.clone(),
            password: String::new(),
        }
    }
}

/// Body returned by `POST /login`: a bare JSON string.
pub fn login_message(username: &str) -> String {
    format!("Logged in {}", username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo_types::{Credentials, Model};
    use time::macros::datetime;

    fn sample_user(password: &str) -> User {
        User {
            model: Model {
                id: 42,
                created_at: datetime!(2024-01-02 03:04:05 UTC),
                updated_at: datetime!(2024-01-02 03:04:05 UTC),
                deleted_at: None,
            },
            email: "jane@example.com".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            credentials: Credentials {
                username: "jane".into(),
                password: password.into(),
            },
        }
    }

    #[test]
    fn public_user_blanks_password_and_keeps_identity() {
        let user = sample_user("s3cret");
        let public = user.to_public();
        assert_eq!(public.password, "");
        assert_eq!(public.id, 42);
        assert_eq!(public.email, "jane@example.com");
        assert_eq!(public.first_name, "Jane");
        assert_eq!(public.last_name, "Doe");
        assert_eq!(public.username, "jane");
        // the source value is untouched
        assert_eq!(user.credentials.password, "s3cret");
    }

    #[test]
    fn serializing_user_never_emits_password() {
        for pw in ["s3cret", "", "\"quoted\"", "hunter2"] {
            let json = serde_json::to_value(sample_user(pw)).unwrap();
            assert_eq!(json["password"], "");
            assert_eq!(json["username"], "jane");
            assert_eq!(json["email"], "jane@example.com");
            assert_eq!(json["id"], 42);
            if !pw.is_empty() {
                assert!(!json.to_string().contains(pw));
            }
        }
    }

    #[test]
    fn timestamps_are_rfc3339_and_live_rows_omit_deleted_at() {
        let json = serde_json::to_value(sample_user("x")).unwrap();
        assert_eq!(json["created_at"], "2024-01-02T03:04:05Z");
        assert!(json.get("deleted_at").is_none());

        let mut user = sample_user("x");
        user.model.deleted_at = Some(datetime!(2024-02-01 00:00:00 UTC));
        let json = serde_json::to_value(user).unwrap();
        assert_eq!(json["deleted_at"], "2024-02-01T00:00:00Z");
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = Credentials {
            username: "user".into(),
            password: "password123".into(),
        };
        let dbg = format!("{:?}", creds);
        assert!(dbg.contains("user"));
        assert!(!dbg.contains("password123"));
    }

    #[test]
    fn credentials_missing_fields_default_to_empty() {
        let creds: Credentials = serde_json::from_str("{}").unwrap();
        assert_eq!(creds, Credentials::default());
        assert_eq!(login_message(&creds.username), "Logged in ");
    }
}
