use super::*;

// =============================================================================
// AuthError::user_message
// =============================================================================

#[test]
fn user_message_prefers_authority_text() {
    let err = AuthError::Rejected { status: 400, message: Some("Email already registered".into()) };
    assert_eq!(err.user_message(), "Email already registered");
}

#[test]
fn user_message_falls_back_when_message_missing_or_blank() {
    let missing = AuthError::Rejected { status: 500, message: None };
    let blank = AuthError::Rejected { status: 401, message: Some("  ".into()) };
    assert_eq!(missing.user_message(), FALLBACK_ERROR_MESSAGE);
    assert_eq!(blank.user_message(), FALLBACK_ERROR_MESSAGE);
}

#[test]
fn user_message_hides_transport_details() {
    let err = AuthError::Network("connection refused".into());
    assert_eq!(err.user_message(), "Authentication failed");
}

#[test]
fn user_message_for_store_failure_is_not_an_auth_failure() {
    let io = std::io::Error::other("disk full");
    let err = AuthError::Store(StoreError::Io(io));
    assert_eq!(err.user_message(), STORE_ERROR_MESSAGE);
    assert_ne!(err.user_message(), FALLBACK_ERROR_MESSAGE);
}

#[test]
fn is_rejection_only_for_rejected() {
    assert!(AuthError::Rejected { status: 401, message: None }.is_rejection());
    assert!(!AuthError::Malformed("x".into()).is_rejection());
    assert!(!AuthError::Network("x".into()).is_rejection());
}

// =============================================================================
// User
// =============================================================================

#[test]
fn user_deserializes_backend_id_field() {
    let user: User = serde_json::from_value(serde_json::json!({
        "_id": "64ab",
        "username": "alice",
        "email": "alice@example.com",
        "phone": "5551234567"
    }))
    .unwrap();
    assert_eq!(user.id.as_deref(), Some("64ab"));
    assert_eq!(user.phone.as_deref(), Some("5551234567"));
}

#[test]
fn user_accepts_plain_id_and_missing_optionals() {
    let user: User = serde_json::from_value(serde_json::json!({ "id": "7", "username": "bob" })).unwrap();
    assert_eq!(user.id.as_deref(), Some("7"));
    assert_eq!(user.email, None);
}

#[test]
fn user_serializes_with_underscore_id() {
    let user = User { id: Some("1".into()), username: "carol".into(), email: None, phone: None };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json, serde_json::json!({ "_id": "1", "username": "carol" }));
}

#[test]
fn user_accepts_both_id_keys_and_prefers_object_id() {
    let user: User = serde_json::from_str(r#"{"_id":"1","id":"virtual","username":"alice"}"#).unwrap();
    assert_eq!(user.id.as_deref(), Some("1"));
    assert_eq!(user.username, "alice");
}

#[test]
fn check_auth_body_with_both_id_keys_keeps_user() {
    let body: CheckAuthResponse =
        serde_json::from_str(r#"{"success":true,"user":{"_id":"1","id":"1","username":"alice"}}"#).unwrap();
    assert!(body.success);
    assert_eq!(body.user.map(|u| u.username), Some("alice".to_owned()));
}

#[test]
fn user_without_username_is_rejected() {
    let parsed = serde_json::from_value::<User>(serde_json::json!({ "_id": "1" }));
    assert!(parsed.is_err());
}

// =============================================================================
// Credentials
// =============================================================================

#[test]
fn credentials_require_token() {
    let raw: CredentialsResponse = serde_json::from_value(serde_json::json!({ "userId": "1" })).unwrap();
    let err = Credentials::try_from(raw).unwrap_err();
    assert!(matches!(err, AuthError::Malformed(_)));
}

#[test]
fn credentials_parse_full_body() {
    let raw: CredentialsResponse = serde_json::from_value(serde_json::json!({
        "token": "tok",
        "userId": "u1",
        "data": { "username": "alice", "email": "a@x.io", "phone": "123" }
    }))
    .unwrap();
    let creds = Credentials::try_from(raw).unwrap();
    assert_eq!(creds.token, "tok");
    assert_eq!(creds.user_id.as_deref(), Some("u1"));
    assert_eq!(creds.profile.username.as_deref(), Some("alice"));
}

#[test]
fn user_with_fallback_fills_missing_fields_from_typed_input() {
    let creds = Credentials {
        token: "tok".into(),
        user_id: Some("u1".into()),
        profile: ProfileData { username: None, email: Some("server@x.io".into()), phone: Some(String::new()) },
    };
    let typed = User {
        id: None,
        username: "typed-name".into(),
        email: Some("typed@x.io".into()),
        phone: Some("5551234567".into()),
    };
    let user = creds.user_with_fallback(&typed);
    assert_eq!(user.id.as_deref(), Some("u1"));
    assert_eq!(user.username, "typed-name");
    assert_eq!(user.email.as_deref(), Some("server@x.io"));
    assert_eq!(user.phone.as_deref(), Some("5551234567"));
}
