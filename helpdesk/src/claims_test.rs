use super::*;
use base64::Engine as _;
use serde_json::json;

fn token_with(payload: &serde_json::Value) -> String {
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("eyJhbGciOiJIUzI1NiJ9.{body}.signature")
}

#[test]
fn decodes_plain_claims() {
    let token = token_with(&json!({ "id": 12, "email": "a@school.test", "role": "Admin", "exp": 100 }));
    let claims = UnverifiedClaims::decode(&token).expect("claims");
    assert_eq!(claims.user_id.as_deref(), Some("12"));
    assert_eq!(claims.email.as_deref(), Some("a@school.test"));
    assert!(claims.is_admin());
    assert_eq!(claims.expires_at, Some(100));
}

#[test]
fn decodes_dotnet_claim_uris() {
    let token = token_with(&json!({
        "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier": "7",
        "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": "Student"
    }));
    let claims = UnverifiedClaims::decode(&token).expect("claims");
    assert_eq!(claims.user_id.as_deref(), Some("7"));
    assert_eq!(claims.role, Some(Role::Student));
    assert!(!claims.is_admin());
}

#[test]
fn role_array_prefers_admin() {
    let token = token_with(&json!({ "sub": "1", "role": ["Student", "Admin"] }));
    let claims = UnverifiedClaims::decode(&token).expect("claims");
    assert_eq!(claims.role, Some(Role::Admin));
}

#[test]
fn padded_payload_is_accepted() {
    let body = base64::engine::general_purpose::URL_SAFE.encode(json!({ "id": "x" }).to_string());
    let token = format!("h.{body}.s");
    let claims = UnverifiedClaims::decode(&token).expect("claims");
    assert_eq!(claims.user_id.as_deref(), Some("x"));
}

#[test]
fn opaque_token_is_malformed() {
    let err = UnverifiedClaims::decode("not-a-jwt").expect_err("malformed");
    assert!(matches!(err, ClaimsError::Malformed));
}

#[test]
fn non_object_payload_is_rejected() {
    let body = URL_SAFE_NO_PAD.encode("[1,2]");
    let err = UnverifiedClaims::decode(&format!("h.{body}.s")).expect_err("array payload");
    assert!(matches!(err, ClaimsError::NotAnObject));
}

#[test]
fn expiry_check() {
    let claims = UnverifiedClaims {
        expires_at: Some(50),
        ..UnverifiedClaims::default()
    };
    assert!(claims.is_expired_at(50));
    assert!(!claims.is_expired_at(49));
    assert!(!UnverifiedClaims::default().is_expired_at(i64::MAX));
}
