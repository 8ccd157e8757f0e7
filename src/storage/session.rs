//! Session repository for JSON storage
//!
//! Holds the logged-in user in session.json

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::User;

use super::file_io::{read_json, write_json_atomic};
use super::traits::SessionStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    #[serde(default)]
    user: Option<User>,
}

/// Repository for the persisted session
pub struct SessionRepository {
    path: PathBuf,
    user: RwLock<Option<User>>,
}

impl SessionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            user: RwLock::new(None),
        }
    }

    /// Load the session from disk
    pub fn load(&self) -> ExpenseResult<()> {
        let file_data: SessionData = read_json(&self.path)?;

        let mut user = self
            .user
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *user = file_data.user;

        Ok(())
    }

    /// Save the session to disk
    pub fn save(&self) -> ExpenseResult<()> {
        let user = self
            .user
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &SessionData { user: user.clone() })
    }
}

impl SessionStore for SessionRepository {
    fn current_user(&self) -> ExpenseResult<Option<User>> {
        let user = self
            .user
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(user.clone())
    }

    fn set_user(&self, new_user: User) -> ExpenseResult<()> {
        {
            let mut user = self.user.write().map_err(|e| {
                ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            *user = Some(new_user);
        }
        self.save()
    }

    fn clear(&self) -> ExpenseResult<()> {
        {
            let mut user = self.user.write().map_err(|e| {
                ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            *user = None;
        }
        self.save()
    }
}
