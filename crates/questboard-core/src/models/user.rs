//! User resource models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Constraint, ValidationError};
use crate::schema::rules::Checker;
use crate::types::EntityId;

/// Public profile of a user, as listed by `/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: EntityId,
    #[serde(default)]
    pub login_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(default)]
    pub guild_staff: Option<bool>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl UserPublic {
    /// Validate one raw list item. Violations are reported as
    /// `items[index].field`; unknown keys are ignored.
    pub fn from_item(value: Value, index: usize) -> Result<Self, ValidationError> {
        let prefix = format!("items[{index}]");
        let Value::Object(map) = value else {
            return Err(ValidationError::field(prefix, Constraint::Type { expected: "an object" }));
        };

        let mut c = Checker::new();
        let field = |name: &str| format!("{prefix}.{name}");

        let id = match map.get("id") {
            Some(Value::String(s)) => c.uuid(&field("id"), s.clone()),
            Some(Value::Null) | None => {
                c.fail(&field("id"), Constraint::Required);
                None
            }
            Some(_) => {
                c.fail(&field("id"), Constraint::Type { expected: "a string" });
                None
            }
        };
        let login_id = optional_string(&mut c, &map, "loginId", &field("loginId"));
        let nickname = optional_string(&mut c, &map, "nickname", &field("nickname"));
        let rank = match map.get("rank") {
            Some(Value::Number(n)) => n.as_f64().and_then(|n| c.int(&field("rank"), n, 0, i64::from(u16::MAX))),
            Some(Value::Null) | None => None,
            Some(_) => {
                c.fail(&field("rank"), Constraint::Integer);
                None
            }
        };
        let guild_staff = optional_bool(&mut c, &map, "guildStaff", &field("guildStaff"));
        let enabled = optional_bool(&mut c, &map, "enabled", &field("enabled"));

        match id {
            Some(id) if c.is_clean() => Ok(Self {
                id,
                login_id,
                nickname,
                rank,
                guild_staff,
                enabled,
            }),
            _ => Err(c.into_error()),
        }
    }

    /// The name to show for this user: nickname, else login id, else the id.
    pub fn display_name(&self) -> String {
        [self.nickname.as_deref(), self.login_id.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }
}

fn optional_string(c: &mut Checker, map: &Map<String, Value>, key: &str, field: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(_) => {
            c.fail(field, Constraint::Type { expected: "a string" });
            None
        }
    }
}

fn optional_bool(c: &mut Checker, map: &Map<String, Value>, key: &str, field: &str) -> Option<bool> {
    match map.get(key) {
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::Null) | None => None,
        Some(_) => {
            c.fail(field, Constraint::Type { expected: "a boolean" });
            None
        }
    }
}

/// A user reduced to what a picker needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOption {
    pub id: EntityId,
    pub name: String,
}

impl From<UserPublic> for UserOption {
    fn from(user: UserPublic) -> Self {
        Self {
            name: user.display_name(),
            id: user.id,
        }
    }
}

/// The signed-in user, from `/user/login-session-info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: EntityId,
    #[serde(default)]
    pub login_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(default)]
    pub guild_staff: bool,
}

/// Wrapper the session endpoint uses: `{ user }`.
#[derive(Debug, Deserialize)]
pub struct SessionEnvelope {
    pub user: SessionUser,
}
