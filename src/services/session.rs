//! Session service
//!
//! Local login state. There is no credential store: any well-formed email
//! and password open a session, and the user id is derived from the email.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::User;
use crate::storage::{SessionStore, Storage};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));

/// Service for the logged-in session
pub struct SessionService<'a> {
    storage: &'a Storage,
}

impl<'a> SessionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Log in; the display name defaults to the email's local part
    pub fn login(&self, email: &str, password: &str) -> ExpenseResult<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ExpenseError::Auth("Email and password are required".into()));
        }
        validate_credentials(email, password)?;

        self.start(User::new(email, User::name_from_email(email)))
    }

    /// Register and log in with an explicit display name
    pub fn register(&self, email: &str, password: &str, name: &str) -> ExpenseResult<User> {
        if email.trim().is_empty() || password.is_empty() || name.trim().is_empty() {
            return Err(ExpenseError::Auth(
                "Email, password, and name are required".into(),
            ));
        }
        validate_credentials(email, password)?;

        self.start(User::new(email, name))
    }

    /// End the session; returns the user that was logged in, if any
    pub fn logout(&self) -> ExpenseResult<Option<User>> {
        let user = self.storage.session.current_user()?;
        self.storage.session.clear()?;

        if let Some(user) = &user {
            self.storage
                .log_delete(EntityType::Session, user.id.to_string(), Some(user.email.clone()), user)?;
            info!(user = %user.id, "logged out");
        }
        Ok(user)
    }

    pub fn current_user(&self) -> ExpenseResult<Option<User>> {
        self.storage.session.current_user()
    }

    /// The logged-in user, or an authentication error
    pub fn require_user(&self) -> ExpenseResult<User> {
        self.current_user()?.ok_or_else(ExpenseError::not_logged_in)
    }

    fn start(&self, user: User) -> ExpenseResult<User> {
        self.storage.session.set_user(user.clone())?;
        self.storage
            .log_create(EntityType::Session, user.id.to_string(), Some(user.email.clone()), &user)?;

        info!(user = %user.id, "logged in");
        Ok(user)
    }
}

fn validate_credentials(email: &str, password: &str) -> ExpenseResult<()> {
    if !EMAIL.is_match(email.trim()) {
        return Err(ExpenseError::Validation(format!(
            "'{}' is not a valid email address",
            email.trim()
        )));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ExpenseError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::UserId;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_login_derives_name_and_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SessionService::new(&storage);

        let user = service.login("jamie@example.com", "secret1").unwrap();
        assert_eq!(user.name, "jamie");
        assert_eq!(user.id, UserId::for_email("jamie@example.com"));
        assert_eq!(service.require_user().unwrap(), user);
    }

    #[test]
    fn test_login_requires_credentials() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SessionService::new(&storage);

        assert!(matches!(
            service.login("", "secret1").unwrap_err(),
            ExpenseError::Auth(_)
        ));
        assert!(service.login("not-an-email", "secret1").unwrap_err().is_validation());
        assert!(service.login("jamie@example.com", "short").unwrap_err().is_validation());
        assert!(service.current_user().unwrap().is_none());
    }

    #[test]
    fn test_register_uses_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SessionService::new(&storage);

        assert!(service.register("jamie@example.com", "secret1", " ").is_err());

        let user = service
            .register("jamie@example.com", "secret1", "Jamie Doe")
            .unwrap();
        assert_eq!(user.name, "Jamie Doe");
    }

    #[test]
    fn test_logout() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SessionService::new(&storage);

        assert!(service.logout().unwrap().is_none());

        service.login("jamie@example.com", "secret1").unwrap();
        let previous = service.logout().unwrap();
        assert_eq!(previous.map(|u| u.email), Some("jamie@example.com".to_string()));
        assert!(matches!(
            service.require_user().unwrap_err(),
            ExpenseError::Auth(_)
        ));
        assert_eq!(storage.audit().entry_count().unwrap(), 2);
    }

    #[test]
    fn test_session_survives_reload() {
        let (temp_dir, storage) = create_test_storage();
        SessionService::new(&storage)
            .login("jamie@example.com", "secret1")
            .unwrap();

        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();

        let user = SessionService::new(&reloaded).require_user().unwrap();
        assert_eq!(user.email, "jamie@example.com");
    }
}
