//! In-memory mock of the todos REST backend.
//!
//! Serves every route the client consumes under `/api/v1`. Failures use the
//! backend's two error shapes: `{"message": ...}` for 401/404/409 and
//! `{"detail": [{"loc": [...], "msg": ...}]}` for 422.

mod auth;
pub mod models;
mod todo;
mod user;

use std::{collections::HashMap, sync::Arc};

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

pub use models::{AuthToken, ServerResponse, Todo, TodoList, User};

/// Minimum accepted password length.
pub const PASSWORD_MIN_LENGTH: usize = 4;

pub(crate) struct UserRecord {
    pub user: User,
    pub password: String,
}

pub(crate) struct ListRecord {
    pub owner: String,
    pub list: TodoList,
}

pub(crate) struct TodoRecord {
    pub owner: String,
    pub todo: Todo,
}

/// Backend state. Lists and todos keep insertion order.
#[derive(Default)]
pub struct Store {
    pub(crate) users: HashMap<String, UserRecord>,
    pub(crate) access_tokens: HashMap<String, String>,
    pub(crate) refresh_tokens: HashMap<String, String>,
    pub(crate) lists: Vec<ListRecord>,
    pub(crate) todos: Vec<TodoRecord>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/auth/login/", post(auth::login))
        .route("/auth/logout/", post(auth::logout))
        .route("/auth/refresh/", post(auth::refresh))
        .route("/user/", get(user::read_user).post(user::register).put(user::update_user))
        .route("/todo/list/", get(todo::list_todo_lists).post(todo::create_todo_list))
        .route(
            "/todo/list/{id}",
            put(todo::update_todo_list).delete(todo::delete_todo_list),
        )
        .route("/todo/task/", get(todo::list_todos).post(todo::create_todo))
        .route("/todo/task/{id}", put(todo::update_todo).delete(todo::delete_todo))
        .with_state(db);
    Router::new().nest("/api/v1", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Error response in one of the backend's error shapes.
#[derive(Debug)]
pub(crate) struct Failure {
    status: StatusCode,
    body: serde_json::Value,
}

impl Failure {
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "message": message.into() }),
        }
    }

    pub fn invalid(field: &str, msg: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: json!({
                "detail": [{ "loc": ["body", field], "msg": msg, "type": "value_error" }]
            }),
        }
    }

    pub fn unauthorized() -> Self {
        Self::message(StatusCode::UNAUTHORIZED, "Could not validate credentials")
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Resolve the bearer token in `headers` to a username.
pub(crate) fn authenticate(store: &Store, headers: &HeaderMap) -> Result<String, Failure> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(Failure::unauthorized)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(Failure::unauthorized)?;
    store
        .access_tokens
        .get(token)
        .cloned()
        .ok_or_else(Failure::unauthorized)
}

pub(crate) fn validate_password(password: &str, password_match: Option<&str>) -> Result<(), Failure> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(Failure::invalid(
            "password",
            &format!("password needs to be at least {PASSWORD_MIN_LENGTH} characters"),
        ));
    }
    if password_match != Some(password) {
        return Err(Failure::invalid("password", "passwords don't match"));
    }
    Ok(())
}
