use super::*;
use serde_json::json;

// =============================================================
// Ticket typeId leniency
// =============================================================

fn ticket_with_type(type_id: serde_json::Value) -> Ticket {
    serde_json::from_value(json!({
        "id": 7,
        "userId": 3,
        "typeId": type_id,
        "title": "Printer jam",
        "description": "Room 12",
        "status": "Open"
    }))
    .expect("ticket")
}

#[test]
fn ticket_type_id_null_zero_and_empty_are_uncategorized() {
    assert_eq!(ticket_with_type(json!(null)).type_id, None);
    assert_eq!(ticket_with_type(json!(0)).type_id, None);
    assert_eq!(ticket_with_type(json!("")).type_id, None);
    assert_eq!(ticket_with_type(json!("0")).type_id, None);
}

#[test]
fn ticket_type_id_accepts_numbers_and_numeric_strings() {
    assert_eq!(ticket_with_type(json!(4)).type_id, Some(4));
    assert_eq!(ticket_with_type(json!("4")).type_id, Some(4));
}

#[test]
fn ticket_type_id_absent_is_uncategorized() {
    let ticket: Ticket = serde_json::from_value(json!({ "id": 1, "title": "No type" })).expect("ticket");
    assert!(ticket.is_uncategorized());
    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.description, "");
}

#[test]
fn ticket_type_id_rejects_non_numeric_string() {
    let result = serde_json::from_value::<Ticket>(json!({ "id": 1, "title": "t", "typeId": "abc" }));
    assert!(result.is_err());
}

#[test]
fn ticket_null_description_reads_as_empty() {
    let ticket: Ticket =
        serde_json::from_value(json!({ "id": 1, "title": "t", "description": null })).expect("ticket");
    assert_eq!(ticket.description, "");
}

#[test]
fn ticket_serializes_uncategorized_as_null_and_omits_unknown_owner() {
    let ticket = Ticket {
        id: 2,
        user_id: None,
        type_id: None,
        title: "Wifi".to_owned(),
        description: String::new(),
        status: TicketStatus::Closed,
    };
    assert_eq!(
        serde_json::to_value(&ticket).expect("json"),
        json!({ "id": 2, "typeId": null, "title": "Wifi", "description": "", "status": "Closed" })
    );
}

// =============================================================
// Comments
// =============================================================

#[test]
fn comment_reads_body_field() {
    let comment: Comment = serde_json::from_value(json!({
        "id": 1, "ticketId": 9, "userId": 2, "body": "hello", "createdAt": "2025-03-01T10:00:00Z"
    }))
    .expect("comment");
    assert_eq!(comment.body, "hello");
    assert_eq!(comment.ticket_id, 9);
    assert_eq!(comment.created_at, "2025-03-01T10:00:00Z");
}

#[test]
fn comment_reads_content_field() {
    let comment: Comment =
        serde_json::from_value(json!({ "id": 1, "ticketId": 9, "content": "hi there" })).expect("comment");
    assert_eq!(comment.body, "hi there");
    assert_eq!(comment.user_id, None);
    assert_eq!(comment.created_at, "");
}

#[test]
fn comment_prefers_body_when_both_fields_present() {
    let comment: Comment =
        serde_json::from_value(json!({ "id": 1, "body": "b", "content": "c" })).expect("comment");
    assert_eq!(comment.body, "b");
}

#[test]
fn comment_input_writes_content_and_accepts_body_alias() {
    let input = CommentInput {
        ticket_id: 5,
        content: "Any update?".to_owned(),
    };
    assert_eq!(
        serde_json::to_value(&input).expect("json"),
        json!({ "ticketId": 5, "content": "Any update?" })
    );
    let parsed: CommentInput = serde_json::from_value(json!({ "ticketId": 5, "body": "x" })).expect("input");
    assert_eq!(parsed.content, "x");
}

// =============================================================
// Enums and auth payloads
// =============================================================

#[test]
fn role_and_status_parse_case_insensitively() {
    assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
    assert_eq!(" Student ".parse::<Role>(), Ok(Role::Student));
    assert_eq!("CLOSED".parse::<TicketStatus>(), Ok(TicketStatus::Closed));
    let err = "janitor".parse::<Role>().expect_err("unknown role");
    assert_eq!(err.to_string(), "unknown role: janitor");
}

#[test]
fn role_deserializes_lowercase_alias() {
    let user: User = serde_json::from_value(json!({ "id": 1, "email": "a@b.c", "role": "admin" })).expect("user");
    assert_eq!(user.role, Role::Admin);
}

#[test]
fn user_without_role_defaults_to_student() {
    let user: User = serde_json::from_value(json!({ "id": 1, "email": "a@b.c" })).expect("user");
    assert_eq!(user.role, Role::Student);
}

#[test]
fn login_response_reads_refresh_token() {
    let resp: LoginResponse =
        serde_json::from_value(json!({ "token": "t", "refreshToken": "r" })).expect("login response");
    assert_eq!(resp.token, "t");
    assert_eq!(resp.refresh_token.as_deref(), Some("r"));
}

#[test]
fn user_update_omits_unset_fields() {
    let update = UserUpdate {
        role: Some(Role::Admin),
        ..UserUpdate::default()
    };
    assert_eq!(serde_json::to_value(&update).expect("json"), json!({ "role": "Admin" }));
    assert!(!update.is_empty());
    assert!(UserUpdate::default().is_empty());
}

#[test]
fn ticket_input_into_ticket_keeps_fields() {
    let input = TicketInput {
        title: "Projector".to_owned(),
        description: "No signal".to_owned(),
        status: TicketStatus::Open,
        type_id: Some(2),
    };
    let ticket = input.into_ticket(11, Some(4));
    assert_eq!(ticket.id, 11);
    assert_eq!(ticket.user_id, Some(4));
    assert_eq!(ticket.type_id, Some(2));
    assert_eq!(ticket.title, "Projector");
}
