//! User identity management
//!
//! This module handles:
//! - The User struct representing a registered identity
//! - Default avatar derivation from the display name
//! - The reserved administrative account matched by a fixed name/secret pair

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name of the reserved administrative account
pub const ADMIN_NAME: &str = "XAwebadminlogin";

/// Secret of the reserved administrative account
pub const ADMIN_SECRET: &str =
    "121221212122484384304084304803084348430804834823048230483084";

/// Background color used for generated user avatars
const AVATAR_BACKGROUND: &str = "1D503A";

/// Represents a registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: String,
    /// Display name, unique across all registered users
    pub name: String,
    /// Credential secret (stored in plain form, auth is simulated)
    pub secret: Option<String>,
    /// Avatar URL
    pub avatar: Option<String>,
    /// Profile text
    pub about: Option<String>,
    /// Whether this user is currently online
    pub is_online: bool,
}

impl User {
    /// Create a new user with a generated id and a default avatar
    pub fn new(name: &str, secret: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            secret: secret.map(|s| s.to_string()),
            avatar: Some(default_avatar(name)),
            about: None,
            is_online: true,
        }
    }

    /// Check whether the given credentials match this user
    pub fn matches_credentials(&self, name: &str, secret: Option<&str>) -> bool {
        self.name == name && self.secret.as_deref() == secret
    }

    /// Mark this user as online
    pub fn set_online(&mut self) {
        self.is_online = true;
    }

    /// Mark this user as offline
    pub fn set_offline(&mut self) {
        self.is_online = false;
    }
}

/// Derive the default avatar URL for a display name
pub fn default_avatar(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background={}&color=fff",
        name, AVATAR_BACKGROUND
    )
}
