//! Login form tests

use garage::Storage;
use serde_json::json;
use warp::http::{Method, StatusCode};

use crate::model::auth::Credentials;
use crate::service::login::{CONNECTION_ERROR, LoginForm, UNKNOWN_ERROR};
use crate::service::tests::{Backend, app, closed_port, token};

#[tokio::test]
async fn valid_credentials_log_in() {
    let backend = Backend::start();
    let token = token();
    backend.respond(
        Method::POST,
        "/api/auth/login",
        StatusCode::OK,
        json!({ "access_token": token, "token_type": "bearer" }),
    );
    let (storage, app) = app(&backend.url()).await;

    let mut form = LoginForm::new();
    let to = form
        .submit(app.api(), app.session(), &Credentials::new("ana", "secret"))
        .await;

    assert_eq!(to, Some("/dashboard"));
    assert!(form.errors().is_empty());
    assert!(app.session().is_authenticated());
    assert_eq!(app.session().user().unwrap().display_name, "Ana");
    assert_eq!(storage.get("token").await.unwrap(), Some(token));
    assert_eq!(
        storage.get("isAuthorized").await.unwrap().as_deref(),
        Some("true")
    );

    let request = backend.last_request();
    assert_eq!(request.body, "username=ana&password=secret");
    assert_eq!(request.authorization, None);
}

#[tokio::test]
async fn backend_detail_shown_verbatim() {
    let backend = Backend::start();
    backend.respond(
        Method::POST,
        "/api/auth/login",
        StatusCode::UNAUTHORIZED,
        json!({ "detail": "Invalid credentials" }),
    );
    let (storage, app) = app(&backend.url()).await;

    let mut form = LoginForm::new();
    let to = form
        .submit(app.api(), app.session(), &Credentials::new("ana", "wrong"))
        .await;

    assert_eq!(to, None);
    assert_eq!(form.errors(), ["Invalid credentials"]);
    assert!(!app.session().is_authenticated());
    assert!(storage.is_empty().await);
}

#[tokio::test]
async fn backend_failure_without_detail() {
    let backend = Backend::start();
    backend.respond(
        Method::POST,
        "/api/auth/login",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({}),
    );
    let (_, app) = app(&backend.url()).await;

    let mut form = LoginForm::new();
    form.submit(app.api(), app.session(), &Credentials::new("ana", "secret"))
        .await;

    assert_eq!(form.errors(), [UNKNOWN_ERROR]);
    assert!(!app.session().is_authenticated());
}

#[tokio::test]
async fn empty_detail_falls_back_to_unknown_error() {
    let backend = Backend::start();
    backend.respond(
        Method::POST,
        "/api/auth/login",
        StatusCode::UNAUTHORIZED,
        json!({ "detail": "" }),
    );
    let (_, app) = app(&backend.url()).await;

    let mut form = LoginForm::new();
    form.submit(app.api(), app.session(), &Credentials::new("ana", "wrong"))
        .await;

    assert_eq!(form.errors(), [UNKNOWN_ERROR]);
}

#[tokio::test]
async fn backend_behind_path_prefix() {
    let backend = Backend::start();
    backend.respond(
        Method::POST,
        "/proxy/api/auth/login",
        StatusCode::OK,
        json!({ "access_token": token() }),
    );

    for base in [
        format!("{}/proxy", backend.url()),
        format!("{}/proxy/", backend.url()),
    ] {
        let (_, app) = app(&base).await;

        let mut form = LoginForm::new();
        let to = form
            .submit(app.api(), app.session(), &Credentials::new("ana", "secret"))
            .await;

        assert_eq!(to, Some("/dashboard"), "{base}");
        assert_eq!(backend.last_request().path, "/proxy/api/auth/login");
    }
}

#[tokio::test]
async fn unreachable_backend() {
    let (_, app) = app(&closed_port()).await;

    let mut form = LoginForm::new();
    let to = form
        .submit(app.api(), app.session(), &Credentials::new("ana", "secret"))
        .await;

    assert_eq!(to, None);
    assert_eq!(form.errors(), [CONNECTION_ERROR]);
    assert!(!app.session().is_authenticated());
}

#[tokio::test]
async fn malformed_token_is_a_connection_error() {
    let backend = Backend::start();
    backend.respond(
        Method::POST,
        "/api/auth/login",
        StatusCode::OK,
        json!({ "access_token": "not-a-token" }),
    );
    let (storage, app) = app(&backend.url()).await;

    let mut form = LoginForm::new();
    form.submit(app.api(), app.session(), &Credentials::new("ana", "secret"))
        .await;

    assert_eq!(form.errors(), [CONNECTION_ERROR]);
    assert!(!app.session().is_authenticated());
    assert!(storage.is_empty().await);
}

#[tokio::test]
async fn errors_reset_on_next_attempt() {
    let backend = Backend::start();
    backend.respond(
        Method::POST,
        "/api/auth/login",
        StatusCode::UNAUTHORIZED,
        json!({ "detail": "Invalid credentials" }),
    );
    let (_, app) = app(&backend.url()).await;
    let mut form = LoginForm::new();

    form.submit(app.api(), app.session(), &Credentials::new("ana", "wrong"))
        .await;
    assert_eq!(form.errors().len(), 1);

    backend.respond(
        Method::POST,
        "/api/auth/login",
        StatusCode::OK,
        json!({ "access_token": token() }),
    );
    let to = form
        .submit(app.api(), app.session(), &Credentials::new("ana", "secret"))
        .await;

    assert_eq!(to, Some("/dashboard"));
    assert!(form.errors().is_empty());
}
