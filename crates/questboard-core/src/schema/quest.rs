//! Quest, comment and contractor input schemas.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::UnitType;
use crate::types::{EntityId, Timestamp, timestamp};

use super::Patch;
use super::rules::{Checker, Mode, Presence};

pub const TITLE_MAX: usize = 255;
pub const TEXT_MAX: usize = 5120;
pub const RANK_MAX: i64 = 16;
pub const REWORD_POINT_MAX: i64 = 1_073_741_824;
pub const REWORD_ITEM_MAX: usize = 128;
pub const MEDIA_URL_MAX: usize = 256;

/// Quest form input as entered by a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestDraft {
    pub quest_owner_id: Patch<String>,
    pub title: Patch<String>,
    pub rank: Patch<f64>,
    pub description: Patch<String>,
    pub party_required: Patch<bool>,
    pub limit_date: Patch<String>,
    pub open_call_start_date: Patch<String>,
    pub open_call_end_date: Patch<String>,
    pub reword_point: Patch<f64>,
    pub reword_items: Patch<Vec<String>>,
    pub videos: Patch<Vec<String>>,
    pub photos: Patch<Vec<String>>,
}

/// A validated quest ready to be created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuest {
    pub quest_owner_id: EntityId,
    pub title: String,
    #[serde(serialize_with = "number")]
    pub rank: f64,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
    pub party_required: bool,
    #[serde(with = "timestamp")]
    pub limit_date: Timestamp,
    #[serde(skip_serializing_if = "Patch::is_absent", serialize_with = "patch_timestamp")]
    pub open_call_start_date: Patch<Timestamp>,
    #[serde(skip_serializing_if = "Patch::is_absent", serialize_with = "patch_timestamp")]
    pub open_call_end_date: Patch<Timestamp>,
    #[serde(serialize_with = "number")]
    pub reword_point: f64,
    pub reword_items: Vec<String>,
    pub videos: Vec<String>,
    pub photos: Vec<String>,
}

/// A validated partial quest update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestPatch {
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub quest_owner_id: Patch<EntityId>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub title: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_absent", serialize_with = "patch_number")]
    pub rank: Patch<f64>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub party_required: Patch<bool>,
    #[serde(skip_serializing_if = "Patch::is_absent", serialize_with = "patch_timestamp")]
    pub limit_date: Patch<Timestamp>,
    #[serde(skip_serializing_if = "Patch::is_absent", serialize_with = "patch_timestamp")]
    pub open_call_start_date: Patch<Timestamp>,
    #[serde(skip_serializing_if = "Patch::is_absent", serialize_with = "patch_timestamp")]
    pub open_call_end_date: Patch<Timestamp>,
    #[serde(skip_serializing_if = "Patch::is_absent", serialize_with = "patch_number")]
    pub reword_point: Patch<f64>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub reword_items: Patch<Vec<String>>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub videos: Patch<Vec<String>>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub photos: Patch<Vec<String>>,
}

impl QuestPatch {
    /// Returns true if the update would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == QuestPatch::default()
    }
}

pub(crate) fn patch_timestamp<S>(value: &Patch<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Patch::Value(ts) => timestamp::serialize(ts, serializer),
        Patch::Absent | Patch::Null => serializer.serialize_none(),
    }
}

/// Whole numbers go out as JSON integers, anything else as a float.
fn number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if value.fract() == 0.0 && value.abs() <= REWORD_POINT_MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn patch_number<S>(value: &Patch<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Patch::Value(n) => number(n, serializer),
        Patch::Absent | Patch::Null => serializer.serialize_none(),
    }
}

impl QuestDraft {
    /// Validate as a full quest, applying defaults to omitted optional fields.
    pub fn validate_create(self) -> Result<NewQuest, ValidationError> {
        let mut c = Checker::new();
        let p = self.check(Mode::Create, &mut c);
        match (p.quest_owner_id, p.title, p.rank, p.limit_date) {
            (Patch::Value(quest_owner_id), Patch::Value(title), Patch::Value(rank), Patch::Value(limit_date))
                if c.is_clean() =>
            {
                Ok(NewQuest {
                    quest_owner_id,
                    title,
                    rank,
                    description: p.description,
                    party_required: p.party_required.into_value().unwrap_or(false),
                    limit_date,
                    open_call_start_date: p.open_call_start_date,
                    open_call_end_date: p.open_call_end_date,
                    reword_point: p.reword_point.into_value().unwrap_or(0.0),
                    reword_items: p.reword_items.into_value().unwrap_or_default(),
                    videos: p.videos.into_value().unwrap_or_default(),
                    photos: p.photos.into_value().unwrap_or_default(),
                })
            }
            _ => Err(c.into_error()),
        }
    }

    /// Validate as a partial update: every field optional, no defaults.
    pub fn validate_partial(self) -> Result<QuestPatch, ValidationError> {
        let mut c = Checker::new();
        let patch = self.check(Mode::Partial, &mut c);
        c.finish()?;
        Ok(patch)
    }

    fn check(self, mode: Mode, c: &mut Checker) -> QuestPatch {
        QuestPatch {
            quest_owner_id: c.check("questOwnerId", self.quest_owner_id, mode.required(), Checker::uuid),
            title: c.check("title", self.title, mode.required(), |c, f, v| c.text(f, v, 1, TITLE_MAX)),
            rank: c.check("rank", self.rank, mode.required(), |c, f, v| {
                c.number(f, v, 0, RANK_MAX)
            }),
            description: c.check("description", self.description, Presence::Nullable, |c, f, v| {
                c.text(f, v, 0, TEXT_MAX)
            }),
            party_required: c.check("partyRequired", self.party_required, Presence::Optional, |_, _, v| Some(v)),
            limit_date: c.check("limitDate", self.limit_date, mode.required(), Checker::timestamp),
            open_call_start_date: c.check(
                "openCallStartDate",
                self.open_call_start_date,
                Presence::Nullable,
                Checker::timestamp,
            ),
            open_call_end_date: c.check(
                "openCallEndDate",
                self.open_call_end_date,
                Presence::Nullable,
                Checker::timestamp,
            ),
            reword_point: c.check("rewordPoint", self.reword_point, Presence::Optional, |c, f, v| {
                c.number(f, v, 0, REWORD_POINT_MAX)
            }),
            reword_items: c.check("rewordItems", self.reword_items, Presence::Optional, |c, f, v| {
                c.string_list(f, v, REWORD_ITEM_MAX)
            }),
            videos: c.check("videos", self.videos, Presence::Optional, |c, f, v| {
                c.string_list(f, v, MEDIA_URL_MAX)
            }),
            photos: c.check("photos", self.photos, Presence::Optional, |c, f, v| {
                c.string_list(f, v, MEDIA_URL_MAX)
            }),
        }
    }
}

/// Comment form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentDraft {
    pub comment_owner_id: Patch<String>,
    pub comment: Patch<String>,
}

/// A validated comment ready to be posted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub comment_owner_id: EntityId,
    pub comment: String,
}

/// A validated partial comment update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPatch {
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub comment_owner_id: Patch<EntityId>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub comment: Patch<String>,
}

impl CommentDraft {
    pub fn validate_create(self) -> Result<NewComment, ValidationError> {
        let mut c = Checker::new();
        let p = self.check(Mode::Create, &mut c);
        match (p.comment_owner_id, p.comment) {
            (Patch::Value(comment_owner_id), Patch::Value(comment)) if c.is_clean() => Ok(NewComment {
                comment_owner_id,
                comment,
            }),
            _ => Err(c.into_error()),
        }
    }

    pub fn validate_partial(self) -> Result<CommentPatch, ValidationError> {
        let mut c = Checker::new();
        let patch = self.check(Mode::Partial, &mut c);
        c.finish()?;
        Ok(patch)
    }

    fn check(self, mode: Mode, c: &mut Checker) -> CommentPatch {
        CommentPatch {
            comment_owner_id: c.check("commentOwnerId", self.comment_owner_id, mode.required(), Checker::uuid),
            comment: c.check("comment", self.comment, mode.required(), |c, f, v| c.text(f, v, 0, TEXT_MAX)),
        }
    }
}

/// Contractor application input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractorDraft {
    pub contractor_unit_id: Patch<String>,
    pub contractor_unit_type: Patch<String>,
    pub comment: Patch<String>,
}

/// A validated contractor application.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContractor {
    pub contractor_unit_id: EntityId,
    pub contractor_unit_type: UnitType,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub comment: Patch<String>,
}

/// A validated partial contractor update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorPatch {
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub contractor_unit_id: Patch<EntityId>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub contractor_unit_type: Patch<UnitType>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub comment: Patch<String>,
}

impl ContractorDraft {
    pub fn validate_create(self) -> Result<NewContractor, ValidationError> {
        let mut c = Checker::new();
        let p = self.check(Mode::Create, &mut c);
        match (p.contractor_unit_id, p.contractor_unit_type) {
            (Patch::Value(contractor_unit_id), Patch::Value(contractor_unit_type)) if c.is_clean() => {
                Ok(NewContractor {
                    contractor_unit_id,
                    contractor_unit_type,
                    comment: p.comment,
                })
            }
            _ => Err(c.into_error()),
        }
    }

    pub fn validate_partial(self) -> Result<ContractorPatch, ValidationError> {
        let mut c = Checker::new();
        let patch = self.check(Mode::Partial, &mut c);
        c.finish()?;
        Ok(patch)
    }

    fn check(self, mode: Mode, c: &mut Checker) -> ContractorPatch {
        ContractorPatch {
            contractor_unit_id: c.check("contractorUnitId", self.contractor_unit_id, mode.required(), Checker::uuid),
            contractor_unit_type: c.check(
                "contractorUnitType",
                self.contractor_unit_type,
                mode.required(),
                Checker::choice::<UnitType>,
            ),
            comment: c.check("comment", self.comment, Presence::Nullable, |c, f, v| c.text(f, v, 0, TEXT_MAX)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const OWNER: &str = "3b241101-e2bb-4255-8caf-4136c566a962";

    fn draft(value: serde_json::Value) -> QuestDraft {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn create_quest_applies_defaults() {
        let quest = draft(json!({
            "questOwnerId": OWNER,
            "title": "Slay the dragon",
            "rank": 5,
            "limitDate": "2025-01-01T00:00:00.000Z"
        }))
        .validate_create()
        .unwrap();

        assert!(!quest.party_required);
        assert_eq!(quest.reword_point, 0.0);
        assert!(quest.reword_items.is_empty());
        assert!(quest.videos.is_empty());
        assert!(quest.photos.is_empty());
        assert_eq!(quest.rank, 5.0);

        let body = serde_json::to_value(&quest).unwrap();
        assert_eq!(body["rank"], json!(5));
        assert_eq!(body["rewordPoint"], json!(0));
        assert_eq!(body["limitDate"], "2025-01-01T00:00:00.000Z");
        assert_eq!(body["partyRequired"], false);
        assert_eq!(body["rewordItems"], json!([]));
        assert!(body.get("description").is_none());
    }

    #[test]
    fn fractional_rank_and_points_are_accepted() {
        let quest = draft(json!({
            "questOwnerId": OWNER,
            "title": "Gather herbs",
            "rank": 2.5,
            "rewordPoint": 10.5,
            "limitDate": "2025-01-01T00:00:00.000Z"
        }))
        .validate_create()
        .unwrap();
        assert_eq!(quest.rank, 2.5);

        let body = serde_json::to_value(&quest).unwrap();
        assert_eq!(body["rank"], json!(2.5));
        assert_eq!(body["rewordPoint"], json!(10.5));

        let err = draft(json!({"rank": 16.5})).validate_partial().unwrap_err();
        assert!(err.has_field("rank"));
    }

    #[test]
    fn empty_title_is_rejected() {
        let err = draft(json!({
            "questOwnerId": OWNER,
            "title": "",
            "rank": 5,
            "limitDate": "2025-01-01T00:00:00.000Z"
        }))
        .validate_create()
        .unwrap_err();
        assert_eq!(err.fields(), vec!["title"]);
    }

    #[test]
    fn create_reports_every_violation() {
        let err = draft(json!({
            "questOwnerId": "nope",
            "rank": 17,
            "limitDate": "tomorrow",
            "rewordPoint": -1,
            "photos": ["ok", "x".repeat(257)]
        }))
        .validate_create()
        .unwrap_err();
        for field in ["questOwnerId", "title", "rank", "limitDate", "rewordPoint", "photos[1]"] {
            assert!(err.has_field(field), "missing {field} in {err}");
        }
    }

    #[test]
    fn over_length_description_is_rejected() {
        let err = draft(json!({
            "questOwnerId": OWNER,
            "title": "t",
            "rank": 0,
            "limitDate": "2025-01-01T00:00:00Z",
            "description": "d".repeat(TEXT_MAX + 1)
        }))
        .validate_create()
        .unwrap_err();
        assert!(err.has_field("description"));
    }

    #[test]
    fn create_output_revalidates_as_partial() {
        let quest = draft(json!({
            "questOwnerId": OWNER,
            "title": "Escort the caravan",
            "rank": 16,
            "description": null,
            "partyRequired": true,
            "limitDate": "2025-06-30T12:00:00+09:00",
            "openCallStartDate": "2025-06-01T00:00:00Z",
            "rewordPoint": 1073741824,
            "rewordItems": ["potion"],
            "videos": [],
            "photos": ["https://img.example/1.png"]
        }))
        .validate_create()
        .unwrap();

        let echoed: QuestDraft = serde_json::from_value(serde_json::to_value(&quest).unwrap()).unwrap();
        let patch = echoed.validate_partial().unwrap();
        assert_eq!(patch.title.value().map(String::as_str), Some("Escort the caravan"));
        assert!(patch.description.is_null());
        assert!(patch.open_call_end_date.is_absent());
    }

    #[test]
    fn partial_omits_absent_fields_and_applies_no_defaults() {
        let patch = draft(json!({"rank": 3})).validate_partial().unwrap();
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, json!({"rank": 3}));
    }

    #[test]
    fn partial_validates_present_fields() {
        let err = draft(json!({"title": "x".repeat(256)})).validate_partial().unwrap_err();
        assert_eq!(err.fields(), vec!["title"]);
    }

    #[test]
    fn partial_null_clears_nullable_but_not_required() {
        let patch = draft(json!({"openCallEndDate": null})).validate_partial().unwrap();
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"openCallEndDate": null}));

        let err = draft(json!({"title": null})).validate_partial().unwrap_err();
        assert!(err.has_field("title"));
    }

    #[test]
    fn empty_partial_is_empty() {
        assert!(QuestDraft::default().validate_partial().unwrap().is_empty());
    }

    #[test]
    fn comment_requires_owner_and_text() {
        let err = CommentDraft::default().validate_create().unwrap_err();
        assert_eq!(err.fields(), vec!["commentOwnerId", "comment"]);

        let comment = CommentDraft {
            comment_owner_id: OWNER.into(),
            comment: "On my way".into(),
        }
        .validate_create()
        .unwrap();
        assert_eq!(comment.comment, "On my way");
    }

    #[test]
    fn comment_partial_length_checked() {
        let err = CommentDraft {
            comment: "c".repeat(TEXT_MAX + 1).as_str().into(),
            ..Default::default()
        }
        .validate_partial()
        .unwrap_err();
        assert!(err.has_field("comment"));
    }

    #[test]
    fn contractor_unit_type_restricted() {
        let err = ContractorDraft {
            contractor_unit_id: OWNER.into(),
            contractor_unit_type: "unit".into(),
            comment: Patch::Absent,
        }
        .validate_create()
        .unwrap_err();
        assert!(err.has_field("contractorUnitType"));

        let ok = ContractorDraft {
            contractor_unit_id: OWNER.into(),
            contractor_unit_type: "party".into(),
            comment: Patch::Null,
        }
        .validate_create()
        .unwrap();
        assert_eq!(ok.contractor_unit_type, UnitType::Party);
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"contractorUnitId": OWNER, "contractorUnitType": "party", "comment": null})
        );
    }
}
