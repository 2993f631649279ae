/// User model
///
/// This module provides the User record as persisted by the credential store
/// and the public view that is safe to hand back to clients.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Emails are compared exactly as stored (no case folding).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User record as stored by the credential store
///
/// Never serialized outward: it carries the password hash. Convert to
/// [`PublicUser`] before returning it from any handler.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Store-assigned identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address (unique)
    pub email: String,

    /// Argon2id password hash (PHC string)
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Already-hashed password (NOT plaintext)
    pub password_hash: String,
}

/// The subset of a user record that may leave the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
