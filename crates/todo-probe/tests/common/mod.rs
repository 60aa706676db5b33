//! In-process stand-in for the to-do service.
//!
//! Implements the behaviour the suites expect from a correct deployment, so
//! the API tests run without network access. Each test gets its own server on
//! an ephemeral port.

#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use todo_probe::{ApiFixture, ProbeConfig};

/// Longest title or tag the service accepts
const MAX_LEN: usize = 20;

/// Lifetime of issued tokens
pub const TOKEN_LIFETIME: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
struct IssuedToken {
    owner: String,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
struct StoredTask {
    id: u64,
    title: String,
    tags: Vec<usize>,
    username: String,
    date: String,
    done: bool,
}

#[derive(Debug, Default)]
struct Service {
    users: BTreeMap<String, String>,
    tokens: BTreeMap<String, IssuedToken>,
    tasks: Vec<StoredTask>,
    tags: Vec<String>,
    next_id: u64,
    token_lifetime: Duration,
}

impl Service {
    fn new(token_lifetime: Duration) -> Self {
        let mut service = Self {
            token_lifetime,
            ..Self::default()
        };
        service.reset();
        service
    }

    fn reset(&mut self) {
        *self = Self {
            token_lifetime: self.token_lifetime,
            ..Self::default()
        };
        let _ = self.users.insert("QA".into(), "willWin".into());
        self.next_id = 1;
    }

    fn caller(&self, headers: &HeaderMap) -> Option<String> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let encoded = value.strip_prefix("Basic ")?;
        let decoded = base64::engine::general_purpose::STANDARD.decode(encoded).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (user, password) = decoded.split_once(':')?;
        if password.is_empty() {
            if let Some(issued) = self.tokens.get(user) {
                return (Instant::now() < issued.expires_at).then(|| issued.owner.clone());
            }
        }
        (self.users.get(user)? == password).then(|| user.to_string())
    }

    fn intern(&mut self, name: &str) -> usize {
        if let Some(pos) = self.tags.iter().position(|t| t == name) {
            return pos;
        }
        self.tags.push(name.to_string());
        self.tags.len() - 1
    }

    fn render(&self, task: &StoredTask) -> Value {
        let tags: Vec<Value> = task
            .tags
            .iter()
            .map(|t| json!({ "name": self.tags[*t], "url": format!("/tags/{}", t + 1) }))
            .collect();
        json!({
            "id": task.id,
            "title": task.title,
            "tags": tags,
            "username": task.username,
            "date": task.date,
            "done": task.done,
        })
    }
}

type Shared = Arc<Mutex<Service>>;

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn error(status: StatusCode, message: &str) -> Response {
    reply(status, json!({ "error": message }))
}

fn valid_title(value: Option<&Value>) -> Option<String> {
    let title = value?.as_str()?;
    (!title.is_empty() && title.chars().count() <= MAX_LEN).then(|| title.to_string())
}

/// Tag names from a request, empty names dropped and duplicates merged
fn valid_tags(value: Option<&Value>) -> Result<Vec<String>, &'static str> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let list = value.as_array().ok_or("tags must be a list")?;
    let mut tags: Vec<String> = Vec::new();
    for tag in list {
        let tag = tag.as_str().ok_or("tags must be strings")?;
        if tag.chars().count() > MAX_LEN {
            return Err("tag too long");
        }
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    Ok(tags)
}

async fn list_tasks(State(svc): State<Shared>) -> Response {
    let svc = svc.lock().unwrap();
    let tasks: Vec<Value> = svc.tasks.iter().map(|t| svc.render(t)).collect();
    reply(StatusCode::OK, Value::Array(tasks))
}

async fn create_task(State(svc): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let mut svc = svc.lock().unwrap();
    let Some(username) = svc.caller(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "authentication required");
    };
    let Some(title) = valid_title(body.get("title")) else {
        return error(StatusCode::BAD_REQUEST, "invalid title");
    };
    let tags = match valid_tags(body.get("tags")) {
        Ok(tags) => tags,
        Err(message) => return error(StatusCode::BAD_REQUEST, message),
    };
    if svc.tasks.iter().any(|t| t.title == title) {
        return error(StatusCode::CONFLICT, "duplicate title");
    }

    let tags = tags.iter().map(|t| svc.intern(t)).collect();
    let task = StoredTask {
        id: svc.next_id,
        title,
        tags,
        username,
        date: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
        done: false,
    };
    svc.next_id += 1;
    let rendered = svc.render(&task);
    svc.tasks.push(task);
    reply(StatusCode::OK, rendered)
}

fn task_index(svc: &Service, id: &str) -> Option<usize> {
    let id: u64 = id.parse().ok()?;
    svc.tasks.iter().position(|t| t.id == id)
}

async fn task_detail(State(svc): State<Shared>, Path(id): Path<String>) -> Response {
    let svc = svc.lock().unwrap();
    match task_index(&svc, &id) {
        Some(pos) => reply(StatusCode::OK, svc.render(&svc.tasks[pos])),
        None => error(StatusCode::NOT_FOUND, "no such task"),
    }
}

async fn modify_task(
    State(svc): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut svc = svc.lock().unwrap();
    let Some(username) = svc.caller(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "authentication required");
    };
    let Some(pos) = task_index(&svc, &id) else {
        return error(StatusCode::NOT_FOUND, "no such task");
    };
    if svc.tasks[pos].username != username {
        return error(StatusCode::FORBIDDEN, "not the owner");
    }

    let title = match body.get("title") {
        Some(value) => match valid_title(Some(value)) {
            Some(title) => Some(title),
            None => return error(StatusCode::BAD_REQUEST, "invalid title"),
        },
        None => None,
    };
    let tags = match body.get("tags") {
        Some(value) => match valid_tags(Some(value)) {
            Ok(tags) => Some(tags),
            Err(message) => return error(StatusCode::BAD_REQUEST, message),
        },
        None => None,
    };

    // id, username and date are read-only; non-boolean done is ignored
    if let Some(title) = title {
        svc.tasks[pos].title = title;
    }
    if let Some(tags) = tags {
        let ids = tags.iter().map(|t| svc.intern(t)).collect();
        svc.tasks[pos].tags = ids;
    }
    if let Some(done) = body.get("done").and_then(Value::as_bool) {
        svc.tasks[pos].done = done;
    }
    reply(StatusCode::OK, svc.render(&svc.tasks[pos]))
}

async fn delete_task(State(svc): State<Shared>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    let mut svc = svc.lock().unwrap();
    let Some(username) = svc.caller(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "authentication required");
    };
    let Some(pos) = task_index(&svc, &id) else {
        return error(StatusCode::NOT_FOUND, "no such task");
    };
    if svc.tasks[pos].username != username {
        return error(StatusCode::FORBIDDEN, "not the owner");
    }
    let _ = svc.tasks.remove(pos);
    reply(StatusCode::OK, json!({}))
}

async fn list_tags(State(svc): State<Shared>) -> Response {
    let svc = svc.lock().unwrap();
    let tags: Map<String, Value> = svc
        .tags
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), json!({ "url": format!("/tags/{}", i + 1) })))
        .collect();
    reply(StatusCode::OK, Value::Object(tags))
}

async fn tag_detail(State(svc): State<Shared>, Path(id): Path<String>) -> Response {
    let svc = svc.lock().unwrap();
    let found = id
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| svc.tags.get(i).map(|name| (i, name)));
    let Some((index, name)) = found else {
        return error(StatusCode::NOT_FOUND, "no such tag");
    };
    let titles: Vec<&str> = svc
        .tasks
        .iter()
        .filter(|t| t.tags.contains(&index))
        .map(|t| t.title.as_str())
        .collect();
    reply(StatusCode::OK, json!({ "tag": name, "tasks": titles }))
}

fn credentials(body: &Value) -> Option<(String, String)> {
    let username = body.get("username")?.as_str()?;
    let password = body.get("password")?.as_str()?;
    (!username.is_empty()).then(|| (username.to_string(), password.to_string()))
}

async fn create_user(State(svc): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut svc = svc.lock().unwrap();
    let Some((username, password)) = credentials(&body) else {
        return error(StatusCode::BAD_REQUEST, "username and password required");
    };
    if svc.users.contains_key(&username) {
        return error(StatusCode::CONFLICT, "user exists");
    }
    let _ = svc.users.insert(username.clone(), password);
    reply(StatusCode::OK, json!({ "username": username }))
}

async fn authenticate(State(svc): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut svc = svc.lock().unwrap();
    let Some((username, password)) = credentials(&body) else {
        return error(StatusCode::BAD_REQUEST, "username and password required");
    };
    if svc.users.get(&username) != Some(&password) {
        return error(StatusCode::UNAUTHORIZED, "invalid credentials");
    }
    let token = uuid::Uuid::new_v4().simple().to_string();
    let issued = IssuedToken {
        owner: username,
        expires_at: Instant::now() + svc.token_lifetime,
    };
    let _ = svc.tokens.insert(token.clone(), issued);
    reply(
        StatusCode::OK,
        json!({ "token": token, "expires": svc.token_lifetime.as_secs() }),
    )
}

async fn reset(State(svc): State<Shared>) -> Response {
    svc.lock().unwrap().reset();
    reply(StatusCode::OK, json!({}))
}

fn router(token_lifetime: Duration) -> Router {
    Router::new()
        .route("/", get(list_tasks).put(create_task))
        .route("/{id}", get(task_detail).patch(modify_task).delete(delete_task))
        .route("/tags", get(list_tags))
        .route("/tags/{id}", get(tag_detail))
        .route("/users", post(create_user))
        .route("/authenticate", post(authenticate))
        .route("/reset", get(reset))
        .with_state(Arc::new(Mutex::new(Service::new(token_lifetime))))
}

/// Start a fresh service and return its base URL
pub async fn spawn_service() -> String {
    spawn_service_with(TOKEN_LIFETIME).await
}

/// [`spawn_service`] issuing tokens that expire after `token_lifetime`
pub async fn spawn_service_with(token_lifetime: Duration) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let _server = tokio::spawn(async move {
        axum::serve(listener, router(token_lifetime)).await.unwrap();
    });
    format!("http://{addr}/")
}

/// Start a fresh service and set up a fixture against it
pub async fn fixture(name: &str) -> ApiFixture {
    fixture_with(name, TOKEN_LIFETIME).await
}

/// [`fixture`] against a service with a custom token lifetime
pub async fn fixture_with(name: &str, token_lifetime: Duration) -> ApiFixture {
    let base_url = spawn_service_with(token_lifetime).await;
    ApiFixture::setup(name, ProbeConfig::for_base_url(&base_url))
        .await
        .expect("fixture setup against the local service")
}
