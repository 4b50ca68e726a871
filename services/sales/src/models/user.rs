//! User model

use serde::{Deserialize, Serialize};

/// Internal user representation. Carries the password digest and must never
/// be serialized into a client response; handlers return [`UserProfile`] or
/// a token instead.
///
/// The digest field keeps the wire/storage name `password` for compatibility
/// with existing records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub username: String,
    #[serde(rename = "password")]
    pub password_digest: String,
    pub email: String,
}

/// Public projection of a user, without the digest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_field_uses_the_password_wire_name() {
        let user = User {
            id: "1".to_string(),
            username: "anna".to_string(),
            password_digest: "digest".to_string(),
            email: "anna@example.com".to_string(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["password"], "digest");
        assert!(value.get("password_digest").is_none());
    }

    #[test]
    fn profile_has_no_digest_field() {
        let profile = UserProfile {
            id: "1".to_string(),
            username: "anna".to_string(),
            email: "anna@example.com".to_string(),
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("password").is_none());
    }
}
