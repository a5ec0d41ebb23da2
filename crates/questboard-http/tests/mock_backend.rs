//! Mock backend tests for the Quest Board client.
//!
//! These tests use wiremock to stand in for the REST backend and check the
//! client's wire behavior without a real server.

use std::sync::Arc;

use questboard_core::page::ListFormat;
use questboard_core::models::UnitKind;
use questboard_core::schema::{AnnouncementDraft, BulkUserIds, PageQuery, PartyQuery, QuestDraft};
use questboard_core::{BaseUrl, EntityId, Error, NetworkError, QueryCache};
use questboard_http::{ApiClient, ClientConfig, QuestBoard};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUEST_ID: &str = "0b6c3a4e-53c4-4a9e-8d2c-0b1a5e9f3c11";
const OWNER_ID: &str = "3b241101-e2bb-4255-8caf-4136c566a962";
const ANNOUNCEMENT_ID: &str = "9d2f6c1a-7b3e-4f0a-a1c2-5e8d7f6b4a30";

/// Helper to create a client for a mock server mounted at the default prefix.
fn mock_client(server: &MockServer) -> ApiClient {
    let base = BaseUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    ApiClient::new(ClientConfig::new(base)).unwrap()
}

fn api(path: &str) -> String {
    format!("/quest-board/api/v1{path}")
}

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "code": "ok",
        "message": "",
        "data": data
    }))
}

fn quest_json(title: &str) -> Value {
    json!({
        "id": QUEST_ID,
        "questOwnerId": OWNER_ID,
        "title": title,
        "rank": 5,
        "status": "new_quest",
        "partyRequired": false,
        "limitDate": "2025-01-01T00:00:00.000Z",
        "rewordPoint": 0,
        "rewordItems": [],
        "videos": [],
        "photos": [],
        "createdAt": "2024-12-01T00:00:00.000Z",
        "updatedAt": "2024-12-01T00:00:00.000Z"
    })
}

fn quest_page(titles: &[&str]) -> Value {
    json!({
        "from": 0,
        "count": 20,
        "total": titles.len(),
        "items": titles.iter().map(|t| quest_json(t)).collect::<Vec<_>>()
    })
}

fn announcement_json() -> Value {
    json!({
        "id": ANNOUNCEMENT_ID,
        "title": "Guild hall closed",
        "message": "Closed for repairs until Friday.",
        "importance": "high",
        "expiresAt": null,
        "notifiedByMail": false,
        "notifiedByPush": true,
        "createdAt": "2024-12-01T00:00:00.000Z",
        "updatedAt": "2024-12-01T00:00:00.000Z"
    })
}

fn user_id(index: usize) -> String {
    format!("00000000-0000-4000-8000-{index:012}")
}

/// User `i` has a nickname if divisible by 3, else a login id if even,
/// else neither.
fn user_json(index: usize) -> Value {
    let mut user = json!({ "id": user_id(index), "enabled": true });
    if index % 3 == 0 {
        user["nickname"] = json!(format!("Hero {index}"));
    } else if index % 2 == 0 {
        user["loginId"] = json!(format!("hero{index}"));
    }
    user
}

// ============================================================================
// Envelope Tests
// ============================================================================

#[tokio::test]
async fn test_remote_failure_surfaces_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/system/database/backups")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "code": "no_permission",
            "message": "Guild staff permission required.",
            "data": null
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.list_backups().await.unwrap_err();

    assert_eq!(err.remote_code(), Some("no_permission"));
    assert_eq!(err.user_message(), "Guild staff permission required.");
}

#[tokio::test]
async fn test_non_envelope_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/quests")))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.list_quests(PageQuery::default()).await.unwrap_err();

    assert!(matches!(err, Error::MalformedResponse(_)));
    assert!(err.to_string().contains("502"));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    drop(server);

    let err = client.list_quests(PageQuery::default()).await.unwrap_err();
    assert!(matches!(err, Error::Network(NetworkError::Connection { .. })));
}

#[tokio::test]
async fn test_detail_wrapper_is_unwrapped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api(&format!("/quests/{QUEST_ID}"))))
        .respond_with(ok(json!({ "quest": quest_json("Slay the dragon") })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let quest = client.get_quest(EntityId::parse(QUEST_ID).unwrap()).await.unwrap();
    assert_eq!(quest.title, "Slay the dragon");
}

#[tokio::test]
async fn test_announcement_detail_is_unwrapped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api(&format!("/announcements/{ANNOUNCEMENT_ID}"))))
        .respond_with(ok(json!({ "announcement": announcement_json() })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let announcement = client
        .get_announcement(EntityId::parse(ANNOUNCEMENT_ID).unwrap())
        .await
        .unwrap();
    assert_eq!(announcement.title, "Guild hall closed");
    assert!(announcement.notified_by_push);
}

#[tokio::test]
async fn test_announcement_create_returns_new_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("/announcements")))
        .and(body_json(json!({
            "title": "Guild hall closed",
            "message": "Closed for repairs until Friday.",
            "importance": "normal",
            "expiresAt": null,
            "notifiedByMail": false,
            "notifiedByPush": false
        })))
        .respond_with(ok(json!({ "announcementId": ANNOUNCEMENT_ID })))
        .expect(1)
        .mount(&server)
        .await;

    let announcement = AnnouncementDraft {
        title: "Guild hall closed".into(),
        message: "Closed for repairs until Friday.".into(),
        ..Default::default()
    }
    .validate_create()
    .unwrap();

    let client = mock_client(&server);
    let created = client.create_announcement(&announcement).await.unwrap();
    assert_eq!(created.announcement_id.to_string(), ANNOUNCEMENT_ID);
}

#[tokio::test]
async fn test_unknown_unit_kind_keeps_listing() {
    let server = MockServer::start().await;

    let mut quest = quest_json("Guard the gate");
    quest["assignedTargetId"] = json!(OWNER_ID);
    quest["assignedTargetType"] = json!("unit");
    Mock::given(method("GET"))
        .and(path(api("/quests")))
        .respond_with(ok(json!({ "from": 0, "count": 20, "total": 1, "items": [quest] })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let page = client.list_quests(PageQuery::default()).await.unwrap();
    assert_eq!(page.items[0].assigned_target_type, Some(UnitKind::Unit));
}

// ============================================================================
// Request Shape Tests
// ============================================================================

#[tokio::test]
async fn test_absent_filters_are_omitted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/parties")))
        .and(query_param("from", "0"))
        .and(query_param("count", "20"))
        .and(query_param_is_missing("leaderIdFilter"))
        .and(query_param_is_missing("memberIdFilter"))
        .respond_with(ok(json!({ "from": 0, "count": 20, "total": 0, "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let page = client.list_parties(&PartyQuery::default()).await.unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_validated_quest_is_posted_with_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("/quests")))
        .and(body_json(json!({
            "questOwnerId": OWNER_ID,
            "title": "Slay the dragon",
            "rank": 5,
            "partyRequired": false,
            "limitDate": "2025-01-01T00:00:00.000Z",
            "rewordPoint": 0,
            "rewordItems": [],
            "videos": [],
            "photos": []
        })))
        .respond_with(ok(quest_json("Slay the dragon")))
        .expect(1)
        .mount(&server)
        .await;

    let draft: QuestDraft = serde_json::from_value(json!({
        "questOwnerId": OWNER_ID,
        "title": "Slay the dragon",
        "rank": 5,
        "limitDate": "2025-01-01T00:00:00.000Z"
    }))
    .unwrap();
    let quest = draft.validate_create().unwrap();

    let client = mock_client(&server);
    let created = client.create_quest(&quest).await.unwrap();
    assert_eq!(created.id.to_string(), QUEST_ID);
}

#[tokio::test]
async fn test_close_sends_outcome_as_query() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(api(&format!("/quests/{QUEST_ID}/close"))))
        .and(query_param("success", "false"))
        .and(body_json(json!({})))
        .respond_with(ok(quest_json("Slay the dragon")))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    client
        .close_quest(EntityId::parse(QUEST_ID).unwrap(), false)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_bulk_delete_sends_ids_in_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(api("/users")))
        .and(body_json(json!({ "ids": [OWNER_ID] })))
        .respond_with(ok(json!({ "deleted": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let ids = BulkUserIds::parse(&[OWNER_ID]).unwrap();
    client.delete_users(&ids).await.unwrap();
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_sign_in_keeps_session_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/auth/csrf")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "csrfToken": "csrf-123" })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(api("/auth/callback/credentials")))
        .and(body_json(json!({
            "loginId": "aria",
            "passwordDigest": "hunter2",
            "callbackUrl": "/quest-board/user/summary",
            "csrfToken": "csrf-123"
        })))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/quest-board/user/summary")
                .insert_header("set-cookie", "session-token=abc; Path=/; HttpOnly"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(api("/user/login-session-info")))
        .and(header("cookie", "session-token=abc"))
        .respond_with(ok(json!({
            "user": { "id": OWNER_ID, "loginId": "aria", "guildStaff": true }
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let user = client.sign_in("aria", "hunter2").await.unwrap();

    assert_eq!(user.login_id.as_deref(), Some("aria"));
    assert!(user.guild_staff);
    assert_eq!(client.export_cookies().as_deref(), Some("session-token=abc"));
}

#[tokio::test]
async fn test_restored_cookies_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/user/login-session-info")))
        .and(header("cookie", "session-token=restored"))
        .respond_with(ok(json!({ "user": { "id": OWNER_ID } })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    client.restore_cookies("session-token=restored");
    let user = client.session_info().await.unwrap();
    assert_eq!(user.id.to_string(), OWNER_ID);
}

// ============================================================================
// Paging Tests
// ============================================================================

#[tokio::test]
async fn test_all_users_drained_in_three_pages() {
    let server = MockServer::start().await;
    let total = 2500;

    for from in [0usize, 1000, 2000] {
        let items: Vec<Value> = (from..(from + 1000).min(total)).map(user_json).collect();
        Mock::given(method("GET"))
            .and(path(api("/users")))
            .and(query_param("from", from.to_string()))
            .and(query_param("count", "1000"))
            .respond_with(ok(json!({
                "from": from,
                "count": 1000,
                "total": total,
                "items": items
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = mock_client(&server);
    let users = client.fetch_all_users(1000).await.unwrap();

    assert_eq!(users.len(), total);
    assert_eq!(users[0].name, "Hero 0");
    assert_eq!(users[2].name, "hero2");
    assert_eq!(users[1].name, user_id(1));
    assert_eq!(users[2499].name, user_id(2499));
}

#[tokio::test]
async fn test_bad_user_item_aborts_with_index() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/users")))
        .respond_with(ok(json!({
            "from": 0,
            "count": 1000,
            "total": 2,
            "items": [user_json(0), { "id": "not-a-uuid" }]
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    match client.fetch_all_users(1000).await.unwrap_err() {
        Error::Validation(err) => assert!(err.has_field("items[1].id")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_negative_count_stops_with_items_so_far() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/users")))
        .and(query_param("from", "0"))
        .respond_with(ok(json!({
            "from": 0,
            "count": 3,
            "total": 10,
            "items": [user_json(0), user_json(1), user_json(2)]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("/users")))
        .and(query_param("from", "3"))
        .respond_with(ok(json!({ "from": 3, "count": -1, "total": 10, "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let users = client.fetch_all_users(3).await.unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0].name, "Hero 0");
}

#[tokio::test]
async fn test_legacy_user_list_format() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/users")))
        .respond_with(ok(json!({ "users": [user_json(3)], "totalCount": 41 })))
        .mount(&server)
        .await;

    let base = BaseUrl::new(server.uri()).unwrap();
    let config = ClientConfig::new(base).with_user_list_format(ListFormat::LegacyUsers);
    let client = ApiClient::new(config).unwrap();

    let page = client.list_users(PageQuery { from: 40, count: 20 }).await.unwrap();
    assert_eq!(page.total, 41);
    assert_eq!(page.from, 40);
    assert_eq!(page.items[0].nickname.as_deref(), Some("Hero 3"));
}

// ============================================================================
// Cache Tests
// ============================================================================

#[tokio::test]
async fn test_mutation_invalidates_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/quests")))
        .respond_with(ok(quest_page(&["Slay the dragon"])))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(api(&format!("/quests/{QUEST_ID}"))))
        .and(body_json(json!({ "title": "Befriend the dragon" })))
        .respond_with(ok(quest_json("Befriend the dragon")))
        .expect(1)
        .mount(&server)
        .await;

    let board = QuestBoard::new(mock_client(&server), Arc::new(QueryCache::default()));
    let page = PageQuery::default();

    board.quests(page).await.unwrap();
    board.quests(page).await.unwrap();

    let patch: QuestDraft = serde_json::from_value(json!({ "title": "Befriend the dragon" })).unwrap();
    let patch = patch.validate_partial().unwrap();
    board
        .update_quest(EntityId::parse(QUEST_ID).unwrap(), &patch)
        .await
        .unwrap();

    board.quests(page).await.unwrap();
}

#[tokio::test]
async fn test_failed_mutation_keeps_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/quests")))
        .respond_with(ok(quest_page(&["Slay the dragon"])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(api(&format!("/quests/{QUEST_ID}"))))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "code": "no_permission",
            "message": "Only the owner can delete this quest.",
            "data": null
        })))
        .mount(&server)
        .await;

    let board = QuestBoard::new(mock_client(&server), Arc::new(QueryCache::default()));
    let page = PageQuery::default();

    board.quests(page).await.unwrap();
    let err = board
        .delete_quest(EntityId::parse(QUEST_ID).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.remote_code(), Some("no_permission"));

    board.quests(page).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_reads_share_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/system/database/backups")))
        .respond_with(
            ok(json!({ "items": [
                { "filename": "backup.sql", "size": 1024, "createdAt": "2025-01-01T00:00:00.000Z" }
            ] }))
            .set_delay(std::time::Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let board = QuestBoard::new(mock_client(&server), Arc::new(QueryCache::default()));
    let (a, b) = tokio::join!(board.backups(), board.backups());

    assert_eq!(a.unwrap(), b.unwrap());
}
