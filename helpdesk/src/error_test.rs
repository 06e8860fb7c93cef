use super::*;

#[test]
fn user_message_prefers_server_message() {
    let err = ApiError::Status {
        status: 400,
        message: Some("User already exists".to_owned()),
    };
    assert_eq!(err.user_message("Registration failed!"), "User already exists");
}

#[test]
fn user_message_falls_back_when_message_missing_or_blank() {
    let missing = ApiError::Status {
        status: 500,
        message: None,
    };
    let blank = ApiError::Status {
        status: 500,
        message: Some("  ".to_owned()),
    };
    assert_eq!(missing.user_message("Login failed!"), "Login failed!");
    assert_eq!(blank.user_message("Login failed!"), "Login failed!");
}

#[test]
fn user_message_uses_fallback_for_transport_errors() {
    let err = ApiError::from(TransportError::Network("connection refused".to_owned()));
    assert_eq!(err.user_message("Failed to fetch users"), "Failed to fetch users");
}

#[test]
fn user_message_asks_for_login_without_session() {
    assert_eq!(ApiError::NotLoggedIn.user_message("x"), "Please log in first.");
}

#[test]
fn status_is_only_reported_for_server_errors() {
    let err = ApiError::Status {
        status: 404,
        message: None,
    };
    assert_eq!(err.status(), Some(404));
    assert_eq!(ApiError::NotLoggedIn.status(), None);
    assert!(ApiError::Cancelled.is_cancelled());
}

#[test]
fn status_display_includes_message() {
    let err = ApiError::Status {
        status: 403,
        message: Some("Forbidden".to_owned()),
    };
    assert_eq!(err.to_string(), "server returned 403: Forbidden");
}
