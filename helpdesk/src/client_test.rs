use super::*;
use crate::error::{SessionError, TransportError};
use crate::fake::FakeApi;
use crate::grouping::group_by_type;
use crate::session::MemorySessionStore;
use crate::types::{Role, TicketStatus};

const ADMIN_EMAIL: &str = "admin@school.test";
const STUDENT_EMAIL: &str = "student@school.test";
const PASSWORD: &str = "hunter22";

type TestClient = ApiClient<FakeApi, MemorySessionStore>;

fn client(api: &FakeApi) -> TestClient {
    ApiClient::new(api.clone(), MemorySessionStore::new(), ClientConfig::default())
}

async fn logged_in(api: &FakeApi, email: &str) -> TestClient {
    let client = client(api);
    client
        .login(&LoginRequest {
            email: email.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .await
        .expect("login");
    client
}

fn seeded() -> (FakeApi, Id, Id) {
    let api = FakeApi::new();
    let admin = api.seed_user(ADMIN_EMAIL, PASSWORD, Role::Admin);
    let student = api.seed_user(STUDENT_EMAIL, PASSWORD, Role::Student);
    (api, admin, student)
}

fn type_input(name: &str) -> TicketTypeInput {
    TicketTypeInput {
        name: name.to_owned(),
        description: None,
    }
}

fn ticket_input(title: &str, type_id: Option<Id>) -> TicketInput {
    TicketInput {
        title: title.to_owned(),
        description: String::new(),
        status: TicketStatus::Open,
        type_id,
    }
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn valid_login_stores_token_and_refresh_token() {
    let (api, admin, _) = seeded();
    let client = logged_in(&api, ADMIN_EMAIL).await;

    assert!(client.is_logged_in());
    assert!(client.session().refresh_token().is_some());
    let claims = client.unverified_claims().expect("claims");
    assert!(claims.is_admin());
    assert_eq!(claims.user_id.as_deref(), Some(admin.to_string().as_str()));
}

#[tokio::test]
async fn invalid_login_stores_nothing_and_surfaces_message() {
    let (api, _, _) = seeded();
    let client = client(&api);

    let err = client
        .login(&LoginRequest {
            email: ADMIN_EMAIL.to_owned(),
            password: "wrong".to_owned(),
        })
        .await
        .expect_err("bad password");

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.user_message("Login failed."), "Invalid email or password");
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn failed_login_clears_previous_session() {
    let (api, _, _) = seeded();
    let client = logged_in(&api, STUDENT_EMAIL).await;

    let _ = client
        .login(&LoginRequest {
            email: STUDENT_EMAIL.to_owned(),
            password: "nope".to_owned(),
        })
        .await;

    assert!(!client.is_logged_in());
}

/// Session store whose removal always fails.
#[derive(Clone, Debug, Default)]
struct StickyStore(MemorySessionStore);

impl SessionStore for StickyStore {
    fn load(&self) -> Option<crate::session::Session> {
        self.0.load()
    }

    fn save(&self, session: &crate::session::Session) -> Result<(), SessionError> {
        self.0.save(session)
    }

    fn clear(&self) -> Result<(), SessionError> {
        Err(SessionError::Unavailable)
    }
}

#[tokio::test]
async fn failed_login_reports_session_that_could_not_be_cleared() {
    let (api, _, _) = seeded();
    let store = StickyStore::default();
    store.set_token("stale.token.value", None).expect("seed token");
    let client = ApiClient::new(api.clone(), store, ClientConfig::default());

    let err = client
        .login(&LoginRequest {
            email: STUDENT_EMAIL.to_owned(),
            password: "nope".to_owned(),
        })
        .await
        .expect_err("bad password");

    assert!(matches!(err, ApiError::Session(SessionError::Unavailable)), "{err:?}");
    assert!(client.is_logged_in());
}

#[tokio::test]
async fn register_then_login_as_new_user() {
    let (api, _, _) = seeded();
    let client = client(&api);

    let response = client
        .register(&RegisterRequest {
            email: "new@school.test".to_owned(),
            password: PASSWORD.to_owned(),
            role: Role::Student,
        })
        .await
        .expect("register");
    assert_eq!(response.message.as_deref(), Some("User registered successfully"));

    let new_client = logged_in(&api, "new@school.test").await;
    let me = new_client.me().await.expect("me");
    assert_eq!(me.email, "new@school.test");
    assert_eq!(me.role, Role::Student);
}

#[tokio::test]
async fn duplicate_register_reports_server_message() {
    let (api, _, _) = seeded();
    let err = client(&api)
        .register(&RegisterRequest {
            email: STUDENT_EMAIL.to_owned(),
            password: PASSWORD.to_owned(),
            role: Role::Student,
        })
        .await
        .expect_err("duplicate");
    assert_eq!(err.user_message("Registration failed."), "User already exists");
}

#[tokio::test]
async fn logout_forgets_token() {
    let (api, _, _) = seeded();
    let client = logged_in(&api, STUDENT_EMAIL).await;
    client.logout().expect("logout");
    assert!(!client.is_logged_in());
    assert!(matches!(client.me().await, Err(ApiError::NotLoggedIn)));
}

// =============================================================================
// Request shaping
// =============================================================================

#[tokio::test]
async fn authenticated_call_without_session_never_reaches_transport() {
    let (api, _, _) = seeded();
    let err = client(&api).list_tickets(None).await.expect_err("no session");
    assert!(matches!(err, ApiError::NotLoggedIn));
    assert_eq!(err.user_message("x"), "Please log in first.");
    assert!(api.requests().is_empty());
}

#[tokio::test]
async fn bearer_token_is_attached_after_login() {
    let (api, _, _) = seeded();
    let client = logged_in(&api, STUDENT_EMAIL).await;
    client.list_ticket_types().await.expect("types");

    let requests = api.requests();
    let last = requests.last().expect("request");
    assert_eq!(last.bearer, client.session().token());
    assert_eq!(last.url, format!("{DEFAULT_BASE_URL}/TicketType"));
    assert!(requests[0].bearer.is_none(), "login carries no bearer");
}

#[tokio::test]
async fn type_filter_is_sent_as_query_parameter() {
    let (api, _, _) = seeded();
    let client = logged_in(&api, ADMIN_EMAIL).await;
    client.list_tickets(Some(7)).await.expect("tickets");
    let last = api.requests().pop().expect("request");
    assert!(last.url.ends_with("/Ticket?typeId=7"), "{}", last.url);
}

#[tokio::test]
async fn comment_delete_uses_flat_route_by_default() {
    let (api, _, _) = seeded();
    let admin = logged_in(&api, ADMIN_EMAIL).await;
    let ticket = admin.create_ticket(&ticket_input("Projector", None)).await.expect("ticket");
    let comment = admin.create_comment(ticket.id, "first").await.expect("comment");

    admin.delete_comment(ticket.id, comment.id).await.expect("delete");

    let last = api.requests().pop().expect("request");
    assert_eq!(last.url, format!("{DEFAULT_BASE_URL}/Comment/{}", comment.id));
}

#[tokio::test]
async fn nested_comment_routes_change_item_url_only() {
    let (api, _, _) = seeded();
    let admin = logged_in(&api, ADMIN_EMAIL).await;
    let ticket = admin.create_ticket(&ticket_input("Projector", None)).await.expect("ticket");
    let comment = admin.create_comment(ticket.id, "first").await.expect("comment");

    let nested = ApiClient::new(
        api.clone(),
        admin.session().clone(),
        ClientConfig {
            base_url: "http://localhost:5000/api/".to_owned(),
            comment_routes: CommentRoutes::Nested,
        },
    );
    nested.delete_comment(ticket.id, comment.id).await.expect("delete");

    let last = api.requests().pop().expect("request");
    assert_eq!(
        last.url,
        format!("http://localhost:5000/api/tickets/{}/Comment/{}", ticket.id, comment.id)
    );
}

#[tokio::test]
async fn transport_failure_uses_fallback_message() {
    let (api, _, _) = seeded();
    let client = logged_in(&api, STUDENT_EMAIL).await;
    api.fail_next_request(TransportError::Network("connection refused".to_owned()));

    let err = client.list_tickets(None).await.expect_err("network");
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.user_message("Failed to load tickets."), "Failed to load tickets.");
}

#[tokio::test]
async fn student_cannot_manage_ticket_types() {
    let (api, _, _) = seeded();
    let student = logged_in(&api, STUDENT_EMAIL).await;
    let err = student
        .create_ticket_type(&type_input("Hardware"))
        .await
        .expect_err("forbidden");
    assert_eq!(err.status(), Some(403));
}

// =============================================================================
// Ticket types and grouping
// =============================================================================

#[tokio::test]
async fn first_type_gets_id_one_and_filter_is_empty_until_ticket_created() {
    let (api, _, _) = seeded();
    let admin = logged_in(&api, ADMIN_EMAIL).await;

    let hardware = admin.create_ticket_type(&type_input("Hardware")).await.expect("type");
    assert_eq!(hardware.id, 1);
    assert_eq!(hardware.name, "Hardware");
    assert!(admin.list_tickets(Some(1)).await.expect("list").is_empty());

    let ticket = admin
        .create_ticket(&ticket_input("Broken mouse", Some(1)))
        .await
        .expect("ticket");
    let filtered = admin.list_tickets(Some(1)).await.expect("list");
    assert_eq!(filtered, vec![ticket]);
}

#[tokio::test]
async fn created_type_appears_exactly_once() {
    let (api, _, _) = seeded();
    let admin = logged_in(&api, ADMIN_EMAIL).await;
    admin.create_ticket_type(&type_input("Network")).await.expect("type");
    admin.create_ticket_type(&type_input("Hardware")).await.expect("type");

    let types = admin.list_ticket_types().await.expect("types");
    assert_eq!(types.iter().filter(|t| t.name == "Hardware").count(), 1);
}

#[tokio::test]
async fn update_ticket_type_renames_in_place() {
    let (api, _, _) = seeded();
    let admin = logged_in(&api, ADMIN_EMAIL).await;
    let created = admin.create_ticket_type(&type_input("Hardwre")).await.expect("type");
    admin
        .update_ticket_type(created.id, &type_input("Hardware"))
        .await
        .expect("update");
    let types = admin.list_ticket_types().await.expect("types");
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].name, "Hardware");
}

#[tokio::test]
async fn deleting_type_leaves_tickets_uncategorized() {
    let (api, _, _) = seeded();
    let admin = logged_in(&api, ADMIN_EMAIL).await;
    let printers = admin.create_ticket_type(&type_input("Printers")).await.expect("type");
    let ticket = admin
        .create_ticket(&ticket_input("Paper jam", Some(printers.id)))
        .await
        .expect("ticket");

    admin.delete_ticket_type(printers.id).await.expect("delete type");

    let fetched = admin.get_ticket(ticket.id).await.expect("still fetchable");
    assert!(fetched.is_uncategorized());

    let types = admin.list_ticket_types().await.expect("types");
    let tickets = admin.list_tickets(None).await.expect("tickets");
    let groups = group_by_type(&types, &tickets);
    assert_eq!(groups.len(), 1);
    assert!(groups[0].is_uncategorized());
    assert_eq!(groups[0].tickets[0].id, ticket.id);
}

#[tokio::test]
async fn ticket_without_type_is_grouped_as_uncategorized() {
    let (api, _, _) = seeded();
    let admin = logged_in(&api, ADMIN_EMAIL).await;
    let hardware = admin.create_ticket_type(&type_input("Hardware")).await.expect("type");
    admin
        .create_ticket(&ticket_input("Mouse", Some(hardware.id)))
        .await
        .expect("typed");
    let loose = admin.create_ticket(&ticket_input("Login help", None)).await.expect("loose");

    let types = admin.list_ticket_types().await.expect("types");
    let tickets = admin.list_tickets(None).await.expect("tickets");
    let groups = group_by_type(&types, &tickets);

    assert_eq!(groups[0].label(), "Hardware");
    assert_eq!(groups[0].len(), 1);
    assert_eq!(groups[1].label(), "Uncategorized");
    assert_eq!(groups[1].tickets, vec![loose]);
}

// =============================================================================
// Tickets
// =============================================================================

#[tokio::test]
async fn list_my_tickets_filters_by_owner() {
    let (api, _, student_id) = seeded();
    let admin = logged_in(&api, ADMIN_EMAIL).await;
    let student = logged_in(&api, STUDENT_EMAIL).await;
    admin.create_ticket(&ticket_input("Admin's", None)).await.expect("admin ticket");
    let mine = student.create_ticket(&ticket_input("Mine", None)).await.expect("student ticket");

    let listed = student.list_my_tickets().await.expect("mine");
    assert_eq!(listed, vec![mine]);
    assert!(listed.iter().all(|t| t.user_id == Some(student_id)));
}

#[tokio::test]
async fn list_my_tickets_reads_owner_from_token_without_me_route() {
    let (api, _, student_id) = seeded();
    api.remove_me_route();
    let student = logged_in(&api, STUDENT_EMAIL).await;
    let mine = student.create_ticket(&ticket_input("Wi-Fi down", None)).await.expect("ticket");

    assert_eq!(student.me().await.expect_err("no /me").status(), Some(404));
    let listed = student.list_my_tickets().await.expect("mine");
    assert_eq!(listed, vec![mine]);
    assert_eq!(listed[0].user_id, Some(student_id));
}

#[tokio::test]
async fn list_my_tickets_asks_me_route_first() {
    let (api, _, _) = seeded();
    let student = logged_in(&api, STUDENT_EMAIL).await;
    student.list_my_tickets().await.expect("mine");
    let endpoints: Vec<Endpoint> = api.requests().iter().map(|r| r.endpoint).collect();
    assert_eq!(&endpoints[1..], &[Endpoint::Me, Endpoint::Tickets { type_id: None }]);
}

#[tokio::test]
async fn list_my_tickets_surfaces_me_errors_other_than_missing_route() {
    let (api, _, _) = seeded();
    let student = logged_in(&api, STUDENT_EMAIL).await;
    api.fail_next_request(TransportError::Network("offline".to_owned()));
    let err = student.list_my_tickets().await.expect_err("offline");
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn list_my_tickets_requires_session() {
    let (api, _, _) = seeded();
    let err = client(&api).list_my_tickets().await.expect_err("logged out");
    assert!(matches!(err, ApiError::NotLoggedIn));
    assert!(api.requests().is_empty());
}

#[tokio::test]
async fn update_ticket_sends_full_shape() {
    let (api, _, _) = seeded();
    let student = logged_in(&api, STUDENT_EMAIL).await;
    let mut ticket = student.create_ticket(&ticket_input("Wifi", None)).await.expect("ticket");

    ticket.status = TicketStatus::Closed;
    ticket.description = "Fixed by rebooting".to_owned();
    student.update_ticket(&ticket).await.expect("update");

    let fetched = student.get_ticket(ticket.id).await.expect("get");
    assert_eq!(fetched, ticket);
}

#[tokio::test]
async fn missing_ticket_reports_not_found() {
    let (api, _, _) = seeded();
    let admin = logged_in(&api, ADMIN_EMAIL).await;
    let err = admin.get_ticket(99).await.expect_err("missing");
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_message("x"), "Ticket not found");
}

#[tokio::test]
async fn deleting_ticket_removes_it() {
    let (api, _, _) = seeded();
    let admin = logged_in(&api, ADMIN_EMAIL).await;
    let ticket = admin.create_ticket(&ticket_input("Old", None)).await.expect("ticket");
    admin.delete_ticket(ticket.id).await.expect("delete");
    assert!(admin.list_tickets(None).await.expect("list").is_empty());
}

// =============================================================================
// Comments
// =============================================================================

#[tokio::test]
async fn comments_are_listed_oldest_first_with_text() {
    let (api, _, _) = seeded();
    let student = logged_in(&api, STUDENT_EMAIL).await;
    let ticket = student.create_ticket(&ticket_input("Printer", None)).await.expect("ticket");

    for text in ["one", "two", "three"] {
        student.create_comment(ticket.id, text).await.expect("comment");
    }

    let comments = student.list_comments(ticket.id).await.expect("comments");
    let bodies: Vec<&str> = comments.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, ["one", "two", "three"]);
    assert!(comments.windows(2).all(|pair| pair[0].created_at <= pair[1].created_at));
}

#[tokio::test]
async fn deleting_one_comment_keeps_the_rest() {
    let (api, _, _) = seeded();
    let student = logged_in(&api, STUDENT_EMAIL).await;
    let ticket = student.create_ticket(&ticket_input("Laptop", None)).await.expect("ticket");
    let first = student.create_comment(ticket.id, "first").await.expect("c1");
    let second = student.create_comment(ticket.id, "second").await.expect("c2");

    student.delete_comment(ticket.id, first.id).await.expect("delete");

    let remaining = student.list_comments(ticket.id).await.expect("comments");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);
    assert_eq!(remaining[0].body, "second");
}

#[tokio::test]
async fn edited_comment_keeps_position() {
    let (api, _, _) = seeded();
    let student = logged_in(&api, STUDENT_EMAIL).await;
    let ticket = student.create_ticket(&ticket_input("Tablet", None)).await.expect("ticket");
    let first = student.create_comment(ticket.id, "frist").await.expect("c1");
    student.create_comment(ticket.id, "second").await.expect("c2");

    student
        .update_comment(ticket.id, first.id, "first")
        .await
        .expect("edit");

    let comments = student.list_comments(ticket.id).await.expect("comments");
    assert_eq!(comments[0].id, first.id);
    assert_eq!(comments[0].body, "first");
}

#[tokio::test]
async fn other_students_cannot_delete_comment() {
    let (api, _, _) = seeded();
    api.seed_user("other@school.test", PASSWORD, Role::Student);
    let owner = logged_in(&api, STUDENT_EMAIL).await;
    let other = logged_in(&api, "other@school.test").await;
    let ticket = owner.create_ticket(&ticket_input("Desk", None)).await.expect("ticket");
    let comment = owner.create_comment(ticket.id, "mine").await.expect("comment");

    let err = other
        .delete_comment(ticket.id, comment.id)
        .await
        .expect_err("forbidden");
    assert_eq!(err.status(), Some(403));
    assert_eq!(api.comments().len(), 1);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn admin_can_promote_and_delete_users() {
    let (api, _, student_id) = seeded();
    let admin = logged_in(&api, ADMIN_EMAIL).await;

    admin
        .update_user(
            student_id,
            &UserUpdate {
                role: Some(Role::Admin),
                ..UserUpdate::default()
            },
        )
        .await
        .expect("promote");
    let users = admin.list_users().await.expect("users");
    let promoted = users.iter().find(|u| u.id == student_id).expect("student");
    assert_eq!(promoted.role, Role::Admin);

    admin.delete_user(student_id).await.expect("delete");
    assert_eq!(admin.list_users().await.expect("users").len(), 1);
}

// =============================================================================
// Body decoding
// =============================================================================

#[test]
fn error_message_prefers_json_message() {
    assert_eq!(
        error_message(r#"{"message":"Title is required"}"#).as_deref(),
        Some("Title is required")
    );
    assert_eq!(error_message(r#"{"message":"  "}"#), None);
    assert_eq!(error_message("Bad Request").as_deref(), Some("Bad Request"));
    assert_eq!(error_message("<html>502</html>"), None);
    assert_eq!(error_message(""), None);
}

#[test]
fn empty_body_decodes_as_null() {
    let value: Option<User> = decode("  ").expect("null");
    assert_eq!(value, None);
}
