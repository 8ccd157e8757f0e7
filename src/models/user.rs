//! Session user

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// The logged-in user; owner key for expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

impl User {
    /// Build a user whose id is derived from the email
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        let email = email.into().trim().to_string();
        Self {
            id: UserId::for_email(&email),
            email,
            name: name.into().trim().to_string(),
        }
    }

    /// Display name derived from the local part of an email
    pub fn name_from_email(email: &str) -> String {
        email
            .trim()
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new(" jane@example.com ", "Jane");
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.id, UserId::for_email("jane@example.com"));
        assert_eq!(user.to_string(), "Jane <jane@example.com>");
    }

    #[test]
    fn test_name_from_email() {
        assert_eq!(User::name_from_email("jane.doe@example.com"), "jane.doe");
        assert_eq!(User::name_from_email("plain"), "plain");
    }
}
