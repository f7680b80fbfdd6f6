use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

mod support;
use support::{bearer, build_test_server};

fn extract_handle(body: &serde_json::Value) -> String {
    body["session_handle"]
        .as_str()
        .expect("session_handle present")
        .to_string()
}

#[tokio::test]
async fn sign_up_succeeds_then_duplicate_conflicts() -> Result<()> {
    let server = build_test_server()?;

    let first = server
        .post("/users/sign-up")
        .json(&json!({
            "identifier": "u1",
            "password": "password1",
            "display_name": "First"
        }))
        .await;
    first.assert_status(StatusCode::CREATED);

    let second = server
        .post("/users/sign-up")
        .json(&json!({
            "identifier": "u1",
            "password": "password2",
            "display_name": "Second"
        }))
        .await;
    second.assert_status(StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
async fn sign_up_rejects_malformed_input() -> Result<()> {
    let server = build_test_server()?;

    let short_password = server
        .post("/users/sign-up")
        .json(&json!({
            "identifier": "alice",
            "password": "short",
            "display_name": "Alice"
        }))
        .await;
    short_password.assert_status(StatusCode::BAD_REQUEST);

    let bad_identifier = server
        .post("/users/sign-up")
        .json(&json!({
            "identifier": "a",
            "password": "password1",
            "display_name": "Alice"
        }))
        .await;
    bad_identifier.assert_status(StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn password_change_rotates_the_accepted_credential() -> Result<()> {
    let server = build_test_server()?;

    server
        .post("/users/sign-up")
        .json(&json!({
            "identifier": "u1",
            "password": "password1",
            "display_name": "Change Tester"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let sign_in = server
        .post("/users/sign-in")
        .json(&json!({ "identifier": "u1", "password": "password1" }))
        .await;
    sign_in.assert_status_ok();
    let body: serde_json::Value = sign_in.json();
    let handle = extract_handle(&body);
    assert_eq!(body["profile"]["identifier"], "u1");

    let update = server
        .patch("/users/password")
        .add_header("Authorization", bearer(&handle))
        .json(&json!({
            "current_password": "password1",
            "new_password": "password3"
        }))
        .await;
    update.assert_status(StatusCode::NO_CONTENT);

    // The old credential no longer signs in; the new one does.
    let old_login = server
        .post("/users/sign-in")
        .json(&json!({ "identifier": "u1", "password": "password1" }))
        .await;
    old_login.assert_status(StatusCode::UNAUTHORIZED);

    let new_login = server
        .post("/users/sign-in")
        .json(&json!({ "identifier": "u1", "password": "password3" }))
        .await;
    new_login.assert_status_ok();

    Ok(())
}

#[tokio::test]
async fn password_change_with_wrong_current_password_is_rejected() -> Result<()> {
    let server = build_test_server()?;

    server
        .post("/users/sign-up")
        .json(&json!({
            "identifier": "u1",
            "password": "password1",
            "display_name": "User"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let sign_in = server
        .post("/users/sign-in")
        .json(&json!({ "identifier": "u1", "password": "password1" }))
        .await;
    sign_in.assert_status_ok();
    let body: serde_json::Value = sign_in.json();
    let handle = extract_handle(&body);

    let update = server
        .patch("/users/password")
        .add_header("Authorization", bearer(&handle))
        .json(&json!({
            "current_password": "not_the_password",
            "new_password": "password3"
        }))
        .await;
    update.assert_status(StatusCode::BAD_REQUEST);

    // The stored record is unchanged.
    let old_login = server
        .post("/users/sign-in")
        .json(&json!({ "identifier": "u1", "password": "password1" }))
        .await;
    old_login.assert_status_ok();

    Ok(())
}

#[tokio::test]
async fn my_info_returns_the_profile_without_credentials() -> Result<()> {
    let server = build_test_server()?;

    server
        .post("/users/sign-up")
        .json(&json!({
            "identifier": "alice",
            "password": "secure_password",
            "display_name": "Alice Smith",
            "phone": "010-1234-5678"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let sign_in = server
        .post("/users/sign-in")
        .json(&json!({ "identifier": "alice", "password": "secure_password" }))
        .await;
    sign_in.assert_status_ok();
    let handle = extract_handle(&sign_in.json());

    let my_info = server
        .get("/users/my-info")
        .add_header("Authorization", bearer(&handle))
        .await;
    my_info.assert_status_ok();
    let profile: serde_json::Value = my_info.json();
    assert_eq!(profile["identifier"], "alice");
    assert_eq!(profile["display_name"], "Alice Smith");
    assert_eq!(profile["phone"], "010-1234-5678");
    assert_eq!(profile["role"], "member");
    assert!(profile.get("password_digest").is_none());

    Ok(())
}

#[tokio::test]
async fn deletion_requires_the_correct_password() -> Result<()> {
    let server = build_test_server()?;

    server
        .post("/users/sign-up")
        .json(&json!({
            "identifier": "u1",
            "password": "password1",
            "display_name": "User"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let sign_in = server
        .post("/users/sign-in")
        .json(&json!({ "identifier": "u1", "password": "password1" }))
        .await;
    sign_in.assert_status_ok();
    let handle = extract_handle(&sign_in.json());

    let wrong = server
        .delete("/users")
        .add_header("Authorization", bearer(&handle))
        .json(&json!({ "password": "wrong_password" }))
        .await;
    wrong.assert_status(StatusCode::BAD_REQUEST);

    // Record still present and usable.
    server
        .get("/users/my-info")
        .add_header("Authorization", bearer(&handle))
        .await
        .assert_status_ok();

    let removed = server
        .delete("/users")
        .add_header("Authorization", bearer(&handle))
        .json(&json!({ "password": "password1" }))
        .await;
    removed.assert_status(StatusCode::NO_CONTENT);

    // The session was cleared along with the account.
    server
        .get("/users/my-info")
        .add_header("Authorization", bearer(&handle))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let sign_in_again = server
        .post("/users/sign-in")
        .json(&json!({ "identifier": "u1", "password": "password1" }))
        .await;
    sign_in_again.assert_status(StatusCode::UNAUTHORIZED);

    Ok(())
}
