use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use workforce_auth::{Guarded, Route};
use workforce_client::ApiError;
use workforce_console::{AdminConsole, ConsoleConfig, ConsoleError, NotificationKind};

const TOKEN: &str = "tok-admin-1";

#[derive(Default)]
struct Backend {
    roles: Vec<Value>,
    workers: Vec<Value>,
    next_id: i64,
    deletes: usize,
}

type Shared = Arc<Mutex<Backend>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Not authenticated"}))).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == "admin" && body["password"] == "s3cret" {
        Json(json!({"access_token": TOKEN, "user": {"username": "admin", "role": "admin"}})).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Invalid credentials"}))).into_response()
    }
}

fn collection<'a>(backend: &'a mut Backend, name: &str) -> &'a mut Vec<Value> {
    if name == "roles" { &mut backend.roles } else { &mut backend.workers }
}

async fn list(State(db): State<Shared>, name: &'static str, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut backend = db.lock().unwrap();
    Json(collection(&mut backend, name).clone()).into_response()
}

async fn create(
    State(db): State<Shared>,
    name: &'static str,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if body["name"].as_str().is_none_or(|n| n.trim().is_empty()) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [{"loc": ["body", "name"], "msg": "Field required", "type": "missing"}]})),
        )
            .into_response();
    }
    let mut backend = db.lock().unwrap();
    backend.next_id += 1;
    body["id"] = json!(backend.next_id);
    collection(&mut backend, name).push(body.clone());
    Json(body).into_response()
}

async fn update(
    State(db): State<Shared>,
    name: &'static str,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut backend = db.lock().unwrap();
    let Some(slot) = collection(&mut backend, name).iter_mut().find(|e| e["id"] == id) else {
        return not_found();
    };
    body["id"] = json!(id);
    *slot = body.clone();
    Json(body).into_response()
}

async fn remove(State(db): State<Shared>, name: &'static str, Path(id): Path<i64>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut backend = db.lock().unwrap();
    backend.deletes += 1;
    let items = collection(&mut backend, name);
    let before = items.len();
    items.retain(|e| e["id"] != id);
    if items.len() == before {
        return not_found();
    }
    Json(json!({"message": "deleted"})).into_response()
}

async fn verify(Json(body): Json<Value>) -> Response {
    let matched = body["cc"] == 1020 && body["photo"].as_str().is_some_and(|p| p.starts_with("data:image/jpeg"));
    let message = if matched { "identity confirmed" } else { "face does not match" };
    Json(json!({"match": matched, "message": message})).into_response()
}

fn collection_routes(name: &'static str) -> Router<Shared> {
    Router::new()
        .route(
            &format!("/{name}/"),
            get(move |db: State<Shared>, headers: HeaderMap| list(db, name, headers)).post(
                move |db: State<Shared>, headers: HeaderMap, body: Json<Value>| create(db, name, headers, body),
            ),
        )
        .route(
            &format!("/{name}/:id"),
            put(move |db: State<Shared>, id: Path<i64>, headers: HeaderMap, body: Json<Value>| {
                update(db, name, id, headers, body)
            })
            .delete(move |db: State<Shared>, id: Path<i64>, headers: HeaderMap| remove(db, name, id, headers)),
        )
}

struct TestServer {
    base_url: String,
    db: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let db: Shared = Arc::new(Mutex::new(Backend::default()));
        let app = Router::new()
            .route("/admin/login", post(login))
            .route("/workers/verify", post(verify))
            .merge(collection_routes("roles"))
            .merge(collection_routes("workers"))
            .with_state(db.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, db, handle }
    }

    fn console(&self) -> AdminConsole {
        let config = ConsoleConfig::default()
            .with_api_url(&self.base_url)
            .with_request_timeout(Duration::from_secs(5));
        AdminConsole::new(&config).unwrap()
    }

    fn deletes(&self) -> usize {
        self.db.lock().unwrap().deletes
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn signed_in(srv: &TestServer) -> AdminConsole {
    let console = srv.console();
    console.login().set_username("admin");
    console.login().set_password("s3cret");
    assert_eq!(console.login().submit().await, Some(Route::Monitoring));
    console
}

async fn create_role(console: &AdminConsole, name: &str, color: &str) {
    console.roles().request_create().unwrap();
    console
        .roles()
        .edit_form(|form| {
            form.name = name.to_string();
            form.color = color.to_string();
        })
        .unwrap();
    console.roles().submit().await.unwrap();
}

async fn create_worker(console: &AdminConsole, name: &str, document: &str, role: &str) -> Result<(), ConsoleError> {
    console.workers().request_create().unwrap();
    console
        .workers()
        .edit_form(|form| {
            form.name = name.to_string();
            form.document_id = document.to_string();
            form.role = role.to_string();
            form.photo = Some("data:image/jpeg;base64,AAAA".to_string());
        })
        .unwrap();
    console.workers().submit().await.map(|_| ())
}

#[tokio::test]
async fn anonymous_console_is_redirected_and_rejected() {
    let srv = TestServer::spawn().await;
    let console = srv.console();

    assert_eq!(console.navigate("/workers"), Guarded::Redirect(Route::Login));
    assert_eq!(console.navigate("/nowhere"), Guarded::Redirect(Route::Login));

    let err = console.roles().load().await.unwrap_err();
    assert_eq!(err, ConsoleError::Api(ApiError::Unauthorized("Not authenticated".to_string())));
    let live = console.notifications().current().unwrap();
    assert_eq!(live.notification.kind, NotificationKind::Error);
}

#[tokio::test]
async fn wrong_password_leaves_session_signed_out() {
    let srv = TestServer::spawn().await;
    let console = srv.console();
    console.login().set_username("admin");
    console.login().set_password("nope");

    assert_eq!(console.login().submit().await, None);
    let session = console.store().snapshot();
    assert!(!session.is_authenticated());
    assert_eq!(session.error(), Some("invalid credentials"));
}

#[tokio::test]
async fn worker_listing_shows_role_name() {
    let srv = TestServer::spawn().await;
    let console = signed_in(&srv).await;
    assert_eq!(console.navigate("/workers"), Guarded::Render(Route::Workers));

    create_role(&console, "Supervisor", "#112233").await;
    let supervisor = console.roles().items()[0].clone();
    assert_eq!(supervisor.name, "Supervisor");

    create_worker(&console, "Ana Gómez", "1020", &supervisor.id.to_string())
        .await
        .unwrap();
    console.load().await.unwrap();

    let rows = console.worker_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].worker.document, "1020");
    assert_eq!(rows[0].worker.role, supervisor.id);
    assert_eq!(rows[0].role.to_string(), "Supervisor");
}

#[tokio::test]
async fn failed_worker_creation_keeps_modal_open_with_one_error() {
    let srv = TestServer::spawn().await;
    let console = signed_in(&srv).await;
    create_role(&console, "Operator", "#0A0").await;
    let role_id = console.roles().items()[0].id.to_string();
    let before = console.notifications().current().map_or(0, |live| live.id);

    let err = create_worker(&console, "", "3040", &role_id).await.unwrap_err();

    assert!(matches!(err, ConsoleError::Api(ApiError::Validation(_))));
    assert!(console.workers().modal().visibility().form);
    assert!(console.workers().items().is_empty());

    let live = console.notifications().current().unwrap();
    assert_eq!(live.id, before + 1);
    assert_eq!(live.notification.kind, NotificationKind::Error);
    assert!(live.notification.content.contains("body.name: Field required"));
}

#[tokio::test]
async fn delete_only_after_matching_name() {
    let srv = TestServer::spawn().await;
    let console = signed_in(&srv).await;
    create_role(&console, "Night Shift", "#112233").await;
    let role = console.roles().items()[0].clone();

    console.roles().request_delete(&role).unwrap();
    console.roles().type_delete_confirmation("Night").unwrap();
    assert_eq!(console.roles().confirm_delete().await, Err(ConsoleError::NotConfirmable));
    assert_eq!(srv.deletes(), 0);

    console.roles().type_delete_confirmation("night shift").unwrap();
    console.roles().confirm_delete().await.unwrap();

    assert_eq!(srv.deletes(), 1);
    assert!(console.roles().modal().is_closed());
    assert!(console.roles().items().is_empty());
}

#[tokio::test]
async fn role_rename_reaches_worker_rows() {
    let srv = TestServer::spawn().await;
    let console = signed_in(&srv).await;
    create_role(&console, "Guard", "#112233").await;
    let role = console.roles().items()[0].clone();
    create_worker(&console, "Luis", "5060", &role.id.to_string()).await.unwrap();

    console.roles().request_edit(&role).unwrap();
    console.roles().edit_form(|form| form.name = "head guard".to_string()).unwrap();
    console.roles().submit().await.unwrap();

    let rows = console.worker_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].role.to_string(), "Head Guard");
}

#[tokio::test]
async fn logout_drops_the_bearer_token() {
    let srv = TestServer::spawn().await;
    let console = signed_in(&srv).await;
    console.load().await.unwrap();

    assert_eq!(console.logout(), Route::Login);
    assert_eq!(console.navigate("/monitoring"), Guarded::Redirect(Route::Login));
    let err = console.workers().load().await.unwrap_err();
    assert!(matches!(err, ConsoleError::Api(ApiError::Unauthorized(_))));
}

#[tokio::test]
async fn worker_verification_reports_verdict() {
    let srv = TestServer::spawn().await;
    let console = signed_in(&srv).await;
    let verification = console.verification();

    assert!(verification.set_document("1020"));
    verification.capture("data:image/jpeg;base64,AAAA");
    let result = verification.submit().await.unwrap();
    assert!(result.matched);
    assert_eq!(
        console.notifications().current().map(|l| l.notification.kind),
        Some(NotificationKind::Success)
    );

    verification.set_document("9999");
    let result = verification.submit().await.unwrap();
    assert!(!result.matched);
    assert_eq!(result.message, "face does not match");
}
