//! Announcement input schemas.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::Importance;
use crate::types::Timestamp;

use super::Patch;
use super::quest::{TEXT_MAX, TITLE_MAX, patch_timestamp};
use super::rules::{Checker, Mode, Presence};

/// Announcement form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnouncementDraft {
    pub title: Patch<String>,
    pub message: Patch<String>,
    pub importance: Patch<String>,
    pub expires_at: Patch<String>,
    pub notified_by_mail: Patch<bool>,
    pub notified_by_push: Patch<bool>,
}

/// A validated announcement.
///
/// `expires_at: Null` is sent explicitly so that an edit clears a previously
/// set expiry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncement {
    pub title: String,
    pub message: String,
    pub importance: Importance,
    #[serde(serialize_with = "patch_timestamp")]
    pub expires_at: Patch<Timestamp>,
    pub notified_by_mail: bool,
    pub notified_by_push: bool,
}

/// A validated partial announcement update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementPatch {
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub title: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub message: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub importance: Patch<Importance>,
    #[serde(skip_serializing_if = "Patch::is_absent", serialize_with = "patch_timestamp")]
    pub expires_at: Patch<Timestamp>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub notified_by_mail: Patch<bool>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub notified_by_push: Patch<bool>,
}

impl AnnouncementDraft {
    /// Validate a full announcement. An omitted expiry means "never expires"
    /// and is sent as null.
    pub fn validate_create(self) -> Result<NewAnnouncement, ValidationError> {
        let mut c = Checker::new();
        let p = self.check(Mode::Create, &mut c);
        match (p.title, p.message) {
            (Patch::Value(title), Patch::Value(message)) if c.is_clean() => Ok(NewAnnouncement {
                title,
                message,
                importance: p.importance.into_value().unwrap_or_default(),
                expires_at: match p.expires_at {
                    Patch::Value(ts) => Patch::Value(ts),
                    Patch::Absent | Patch::Null => Patch::Null,
                },
                notified_by_mail: p.notified_by_mail.into_value().unwrap_or(false),
                notified_by_push: p.notified_by_push.into_value().unwrap_or(false),
            }),
            _ => Err(c.into_error()),
        }
    }

    pub fn validate_partial(self) -> Result<AnnouncementPatch, ValidationError> {
        let mut c = Checker::new();
        let patch = self.check(Mode::Partial, &mut c);
        c.finish()?;
        Ok(patch)
    }

    fn check(self, mode: Mode, c: &mut Checker) -> AnnouncementPatch {
        AnnouncementPatch {
            title: c.check("title", self.title, mode.required(), |c, f, v| {
                // whitespace-only titles count as empty
                if v.trim().is_empty() {
                    c.text(f, String::new(), 1, TITLE_MAX)
                } else {
                    c.text(f, v, 1, TITLE_MAX)
                }
            }),
            message: c.check("message", self.message, mode.required(), |c, f, v| {
                if v.trim().is_empty() {
                    c.text(f, String::new(), 1, TEXT_MAX)
                } else {
                    c.text(f, v, 1, TEXT_MAX)
                }
            }),
            importance: c.check("importance", self.importance, Presence::Optional, Checker::choice::<Importance>),
            expires_at: c.check("expiresAt", self.expires_at, Presence::Nullable, Checker::timestamp),
            notified_by_mail: c.check("notifiedByMail", self.notified_by_mail, Presence::Optional, |_, _, v| {
                Some(v)
            }),
            notified_by_push: c.check("notifiedByPush", self.notified_by_push, Presence::Optional, |_, _, v| {
                Some(v)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_for_new_announcement() {
        let a = AnnouncementDraft {
            title: "Festival".into(),
            message: "The harvest festival starts at noon.".into(),
            ..Default::default()
        }
        .validate_create()
        .unwrap();
        assert_eq!(a.importance, Importance::Normal);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            json!({
                "title": "Festival",
                "message": "The harvest festival starts at noon.",
                "importance": "normal",
                "expiresAt": null,
                "notifiedByMail": false,
                "notifiedByPush": false
            })
        );
    }

    #[test]
    fn blank_title_rejected() {
        let err = AnnouncementDraft {
            title: "   ".into(),
            message: "m".into(),
            ..Default::default()
        }
        .validate_create()
        .unwrap_err();
        assert_eq!(err.fields(), vec!["title"]);
    }

    #[test]
    fn clearing_expiry_differs_from_omitting_it() {
        let cleared = AnnouncementDraft {
            expires_at: Patch::Null,
            ..Default::default()
        }
        .validate_partial()
        .unwrap();
        assert_eq!(serde_json::to_value(&cleared).unwrap(), json!({"expiresAt": null}));

        let untouched = AnnouncementDraft {
            importance: "high".into(),
            ..Default::default()
        }
        .validate_partial()
        .unwrap();
        assert_eq!(serde_json::to_value(&untouched).unwrap(), json!({"importance": "high"}));
    }

    #[test]
    fn unknown_importance_rejected() {
        let err = AnnouncementDraft {
            importance: "urgent".into(),
            ..Default::default()
        }
        .validate_partial()
        .unwrap_err();
        assert!(err.has_field("importance"));
    }
}
