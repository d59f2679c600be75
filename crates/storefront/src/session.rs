//! Demo session layer over the `user` document.
//!
//! There is no real authentication here: the admin credential pair is a
//! public source constant and any other email/password combination signs
//! in as a regular user. The session exists so the admin layer has a
//! `User` to gate on and so the `user` document round-trips.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use fenestra_core::{Email, EmailError, UserId};

use crate::notify::{LogNotifier, Notifier};
use crate::storage::{KvStore, StorageError, read_json, write_json};

/// Storage key for the session document.
const USER_KEY: &str = "user";

/// Demo admin credentials. Public constants, checked client-side; they
/// carry no security value.
pub const ADMIN_EMAIL: &str = "admin@example.com";
/// See [`ADMIN_EMAIL`].
pub const ADMIN_PASSWORD: &str = "admin123";

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub is_admin: bool,
}

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Signup attempted with the reserved admin email.
    #[error("this email is not available")]
    EmailNotAvailable,

    /// Storage failure reading or writing the session document.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Session repository over a [`KvStore`]. Cheap to clone.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KvStore>,
    notifier: Arc<dyn Notifier>,
}

impl SessionStore {
    /// Create a session handle over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_notifier(store, Arc::new(LogNotifier))
    }

    /// Create a session handle with an explicit notification sink.
    #[must_use]
    pub fn with_notifier(store: Arc<dyn KvStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// The currently signed-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError::Storage`] if the store fails.
    pub fn current(&self) -> Result<Option<User>, AuthError> {
        Ok(read_json(self.store.as_ref(), USER_KEY)?)
    }

    /// Sign in. The admin constant pair yields the admin user; any other
    /// email signs in as a regular user regardless of password (demo
    /// semantics).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] for a malformed email, or
    /// [`AuthError::Storage`] if the store fails.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        let is_admin = email.as_str() == ADMIN_EMAIL && password == ADMIN_PASSWORD;
        let user = if is_admin {
            User {
                id: UserId::new("1"),
                email,
                is_admin: true,
            }
        } else {
            User {
                id: UserId::new(Uuid::new_v4().to_string()),
                email,
                is_admin: false,
            }
        };
        write_json(self.store.as_ref(), USER_KEY, &user)?;

        info!(user = %user.id, admin = user.is_admin, "logged in");
        if user.is_admin {
            self.notifier
                .notify("Admin Login Successful", "Welcome back, Admin!");
        } else {
            self.notifier.notify("Login Successful", "Welcome back!");
        }
        Ok(user)
    }

    /// Create an account and sign in. The admin email is reserved.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailNotAvailable`] for the admin email,
    /// [`AuthError::InvalidEmail`] for a malformed email, or
    /// [`AuthError::Storage`] if the store fails.
    pub fn signup(&self, email: &str, _password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        if email.as_str() == ADMIN_EMAIL {
            return Err(AuthError::EmailNotAvailable);
        }
        let user = User {
            id: UserId::new(Uuid::new_v4().to_string()),
            email,
            is_admin: false,
        };
        write_json(self.store.as_ref(), USER_KEY, &user)?;

        info!(user = %user.id, "signed up");
        self.notifier
            .notify("Sign Up Successful", "Your account has been created");
        Ok(user)
    }

    /// Sign out, removing the session document.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError::Storage`] if the store fails.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(USER_KEY)?;
        self.notifier
            .notify("Logged Out", "You have been logged out successfully");
        Ok(())
    }
}
