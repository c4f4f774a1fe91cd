//! Domain DTOs for the todos API.
//!
//! # Design
//! Every type serializes in camelCase, the client-side representation. The
//! `case` module translates keys to and from the snake_case wire format, so
//! these types never spell out wire names. Ids for new lists and todos are
//! generated client-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user as returned by `GET /user/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub verified_email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub disabled: bool,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub date_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Access/refresh token pair issued by `POST /auth/login/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub access_token: String,
    #[serde(default)]
    pub access_token_expires_at: Option<DateTime<Utc>>,
    pub refresh_token: String,
    #[serde(default)]
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
}

impl AuthToken {
    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserLogin {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_match: String,
}

/// Profile edit; omitted fields stay unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub password: String,
    pub password_match: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    pub todo_list_id: Uuid,
    pub list_name: String,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub date_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoListCreate {
    pub todo_list_id: Uuid,
    pub list_name: String,
}

impl TodoListCreate {
    /// New list with a freshly generated id.
    pub fn new(list_name: impl Into<String>) -> Self {
        Self {
            todo_list_id: Uuid::new_v4(),
            list_name: list_name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoListUpdate {
    pub list_name: String,
}

/// A single task belonging to a todo list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub todo_id: Uuid,
    pub todo_list_id: Uuid,
    pub description: String,
    pub completed: bool,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub date_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoCreate {
    pub todo_id: Uuid,
    pub todo_list_id: Uuid,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoCreate {
    /// New todo with a freshly generated id.
    pub fn new(todo_list_id: Uuid, description: impl Into<String>, completed: bool) -> Self {
        Self {
            todo_id: Uuid::new_v4(),
            todo_list_id,
            description: description.into(),
            completed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    pub todo_list_id: Uuid,
    pub description: String,
    pub completed: bool,
}

/// Generic acknowledgement body, also the shape of non-422 error bodies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerMessage {
    pub message: String,
}
