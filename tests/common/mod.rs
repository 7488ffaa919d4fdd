// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: an in-process Orbitah backend and client builders.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use orbitah_client::config::Config;
use orbitah_client::services::{Geolocator, RegionMap, Unavailable};
use orbitah_client::storage::{KeyValueStore, MemoryStore};
use orbitah_client::ClientContext;
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Token lifetime reported by `/auth/login`.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// How long `/auth/me` hangs for a stalled token before failing.
pub const STALL: Duration = Duration::from_millis(300);

#[derive(Default)]
struct Account {
    password: String,
    user: Value,
}

#[derive(Default)]
pub struct MockState {
    accounts: Mutex<Vec<Account>>,
    tokens: Mutex<HashMap<String, String>>,
    collections: Mutex<HashMap<String, Vec<Value>>>,
    next_id: AtomicUsize,
    requests: AtomicUsize,
    me_unavailable: AtomicBool,
    stalled_tokens: Mutex<HashSet<String>>,
}

impl MockState {
    fn fresh_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn user_for(&self, headers: &HeaderMap) -> Option<Value> {
        let token = bearer(headers)?;
        let user_id = self.tokens.lock().unwrap().get(token).cloned()?;
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user["id"] == user_id.as_str())
            .map(|a| a.user.clone())
    }
}

/// A running mock backend bound to an ephemeral localhost port.
pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Create an account directly, bypassing `/auth/register`.
    pub fn seed_user(&self, username: &str, email: &str, password: &str) -> Value {
        let user = json!({
            "id": self.state.fresh_id("user"),
            "username": username,
            "email": email,
            "experience_points": 120,
            "rank": "Explorer",
            "streak_days": 3,
        });
        self.state.accounts.lock().unwrap().push(Account {
            password: password.to_string(),
            user: user.clone(),
        });
        user
    }

    /// Merge `fields` into an existing user.
    pub fn update_user(&self, user_id: &str, fields: Value) {
        let mut accounts = self.state.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| a.user["id"] == user_id)
            .expect("Unknown user");
        merge(&mut account.user, fields);
    }

    /// Mint a valid token for `user_id` without a login call.
    pub fn issue_token(&self, user_id: &str) -> String {
        let token = self.state.fresh_id("token");
        self.state
            .tokens
            .lock()
            .unwrap()
            .insert(token.clone(), user_id.to_string());
        token
    }

    /// Invalidate every token server-side.
    pub fn revoke_tokens(&self) {
        self.state.tokens.lock().unwrap().clear();
    }

    /// Make `/auth/me` answer 500 until reset.
    pub fn set_me_unavailable(&self, unavailable: bool) {
        self.state.me_unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make `/auth/me` with `token` hang for [`STALL`], then answer 500.
    pub fn stall_token(&self, token: &str) {
        self.state
            .stalled_tokens
            .lock()
            .unwrap()
            .insert(token.to_string());
    }

    pub fn account_count(&self) -> usize {
        self.state.accounts.lock().unwrap().len()
    }

    /// Add a document to a collection, returning it with its id.
    pub fn insert(&self, collection: &str, mut item: Value) -> Value {
        let key = id_field(collection);
        if item.get(key).is_none() {
            item[key] = Value::String(self.state.fresh_id(collection));
        }
        self.state
            .collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(item.clone());
        item
    }

    pub fn count(&self, collection: &str) -> usize {
        self.state
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Requests served so far.
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/{collection}", get(list_items).post(create_item))
        .route(
            "/{collection}/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .layer(middleware::from_fn_with_state(state.clone(), count_requests))
        .with_state(state)
}

async fn count_requests(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn unauthorized() -> Response {
    detail(StatusCode::UNAUTHORIZED, "Could not validate credentials")
}

fn id_field(collection: &str) -> &'static str {
    if collection == "exploration" {
        "user_id"
    } else {
        "id"
    }
}

fn merge(target: &mut Value, fields: Value) {
    if let (Some(target), Value::Object(fields)) = (target.as_object_mut(), fields) {
        for (k, v) in fields {
            target.insert(k, v);
        }
    }
}

async fn register(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let mut accounts = state.accounts.lock().unwrap();
    if accounts.iter().any(|a| a.user["email"] == email.as_str()) {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }

    let mut user = Map::new();
    user.insert("id".into(), Value::String(state.fresh_id("user")));
    user.insert("username".into(), body["username"].clone());
    user.insert("email".into(), Value::String(email));
    user.insert("experience_points".into(), json!(0));
    let user = Value::Object(user);

    accounts.push(Account {
        password: body["password"].as_str().unwrap_or_default().to_string(),
        user: user.clone(),
    });
    Json(user).into_response()
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let user_id = state
        .accounts
        .lock()
        .unwrap()
        .iter()
        .find(|a| a.user["email"] == body["email"] && a.password == body["password"].as_str().unwrap_or_default())
        .map(|a| a.user["id"].as_str().unwrap_or_default().to_string());

    let Some(user_id) = user_id else {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect email or password");
    };

    let token = state.fresh_id("token");
    state.tokens.lock().unwrap().insert(token.clone(), user_id);
    Json(json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": TOKEN_TTL_SECS,
    }))
    .into_response()
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    let stalled = bearer(&headers)
        .is_some_and(|token| state.stalled_tokens.lock().unwrap().contains(token));
    if stalled {
        tokio::time::sleep(STALL).await;
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
    }
    if state.me_unavailable.load(Ordering::SeqCst) {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
    }
    match state.user_for(&headers) {
        Some(user) => Json(user).into_response(),
        None => unauthorized(),
    }
}

async fn list_items(
    State(state): State<Arc<MockState>>,
    Path(collection): Path<String>,
    Query(query): Query<HashMap<String, usize>>,
    headers: HeaderMap,
) -> Response {
    if collection == "users" {
        if state.user_for(&headers).is_none() {
            return unauthorized();
        }
        let users: Vec<Value> = state.accounts.lock().unwrap().iter().map(|a| a.user.clone()).collect();
        return Json(users).into_response();
    }
    if state.user_for(&headers).is_none() {
        return unauthorized();
    }

    let skip = query.get("skip").copied().unwrap_or(0);
    let limit = query.get("limit").copied().unwrap_or(100);
    let items: Vec<Value> = state
        .collections
        .lock()
        .unwrap()
        .get(&collection)
        .map(|items| items.iter().skip(skip).take(limit).cloned().collect())
        .unwrap_or_default();
    Json(items).into_response()
}

async fn create_item(
    State(state): State<Arc<MockState>>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if state.user_for(&headers).is_none() {
        return unauthorized();
    }
    let key = id_field(&collection);
    if body.get(key).is_none() {
        body[key] = Value::String(state.fresh_id(&collection));
    }
    state
        .collections
        .lock()
        .unwrap()
        .entry(collection)
        .or_default()
        .push(body.clone());
    Json(body).into_response()
}

async fn get_item(
    State(state): State<Arc<MockState>>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if state.user_for(&headers).is_none() {
        return unauthorized();
    }
    if collection == "users" {
        let accounts = state.accounts.lock().unwrap();
        return match accounts.iter().find(|a| a.user["id"] == id.as_str()) {
            Some(account) => Json(account.user.clone()).into_response(),
            None => detail(StatusCode::NOT_FOUND, "User not found"),
        };
    }

    let key = id_field(&collection);
    let collections = state.collections.lock().unwrap();
    match collections
        .get(&collection)
        .and_then(|items| items.iter().find(|i| i[key] == id.as_str()))
    {
        Some(item) => Json(item.clone()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn update_item(
    State(state): State<Arc<MockState>>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if state.user_for(&headers).is_none() {
        return unauthorized();
    }
    let key = id_field(&collection);
    let mut collections = state.collections.lock().unwrap();
    let items = collections.entry(collection.clone()).or_default();

    if let Some(item) = items.iter_mut().find(|i| i[key] == id.as_str()) {
        merge(item, body);
        return Json(item.clone()).into_response();
    }

    // Exploration state is created on first update
    if collection == "exploration" {
        let mut item = json!({ "user_id": id });
        merge(&mut item, body);
        items.push(item.clone());
        return Json(item).into_response();
    }
    detail(StatusCode::NOT_FOUND, "Not found")
}

async fn delete_item(
    State(state): State<Arc<MockState>>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if state.user_for(&headers).is_none() {
        return unauthorized();
    }
    let key = id_field(&collection);
    let mut collections = state.collections.lock().unwrap();
    let items = collections.entry(collection).or_default();
    match items.iter().position(|i| i[key] == id.as_str()) {
        Some(index) => Json(items.remove(index)).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Not found"),
    }
}

/// Build a client against `base_url` over `storage`, with no geolocation.
pub fn client(base_url: &str, storage: &MemoryStore) -> ClientContext {
    client_with(base_url, storage, None, Arc::new(Unavailable))
}

/// Build a client with a runtime language and geolocator.
pub fn client_with(
    base_url: &str,
    storage: &MemoryStore,
    runtime_language: Option<&str>,
    geolocator: Arc<dyn Geolocator>,
) -> ClientContext {
    let config = Config {
        api_base_url: base_url.to_string(),
        runtime_language: runtime_language.map(str::to_string),
        ..Config::default()
    };
    ClientContext::with_parts(
        config,
        Arc::new(storage.clone()),
        geolocator,
        RegionMap::builtin(),
    )
}

/// Build a client over any storage backend.
pub fn client_over(base_url: &str, storage: Arc<dyn KeyValueStore>) -> ClientContext {
    let config = Config {
        api_base_url: base_url.to_string(),
        ..Config::default()
    };
    ClientContext::with_parts(config, storage, Arc::new(Unavailable), RegionMap::builtin())
}

/// An address nothing listens on.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9";
