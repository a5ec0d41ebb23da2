//! User input schemas.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::EntityId;

use super::Patch;
use super::rules::{Checker, Mode};

pub const LOGIN_ID_MAX: usize = 64;
pub const PASSWORD_MAX: usize = 128;

/// New-user form input.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDraft {
    pub login_id: Patch<String>,
    pub password: Patch<String>,
    pub email: Patch<String>,
}

/// A validated user registration.
///
/// Serializes with the field names the backend expects
/// (`passwordDigest`, `newEmail`).
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub login_id: String,
    #[serde(rename = "passwordDigest")]
    pub password: String,
    #[serde(rename = "newEmail")]
    pub email: String,
}

// Hide the password in Debug output
impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("login_id", &self.login_id)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .finish()
    }
}

impl UserDraft {
    pub fn validate_create(self) -> Result<NewUser, ValidationError> {
        let mut c = Checker::new();
        let mode = Mode::Create;
        let login_id = c.check("loginId", self.login_id, mode.required(), |c, f, v| {
            c.text(f, v, 1, LOGIN_ID_MAX)
        });
        let password = c.check("password", self.password, mode.required(), |c, f, v| {
            c.text(f, v, 1, PASSWORD_MAX)
        });
        let email = c.check("email", self.email, mode.required(), Checker::email);
        match (login_id, password, email) {
            (Patch::Value(login_id), Patch::Value(password), Patch::Value(email)) if c.is_clean() => Ok(NewUser {
                login_id,
                password,
                email,
            }),
            _ => Err(c.into_error()),
        }
    }
}

/// Body for bulk enable, disable and delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkUserIds {
    pub ids: Vec<EntityId>,
}

impl BulkUserIds {
    /// Validate a selection of user ids: at least one, all UUIDs.
    pub fn parse<S: AsRef<str>>(ids: &[S]) -> Result<Self, ValidationError> {
        let mut c = Checker::new();
        let ids = c.uuid_list("ids", ids.iter().map(|s| s.as_ref().to_string()).collect());
        match ids {
            Some(ids) if c.is_clean() => Ok(Self { ids }),
            _ => Err(c.into_error()),
        }
    }
}
