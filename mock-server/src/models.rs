//! Wire-format bodies of the mock backend, in snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub verified_email: Option<String>,
    pub roles: Vec<String>,
    pub disabled: bool,
    pub date_created: DateTime<Utc>,
    pub date_modified: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_match: String,
}

#[derive(Deserialize, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_match: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthToken {
    pub token_type: String,
    pub access_token: String,
    pub access_token_expires_at: Option<DateTime<Utc>>,
    pub refresh_token: String,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerResponse {
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoList {
    pub todo_list_id: Uuid,
    pub list_name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct TodoListCreate {
    pub todo_list_id: Uuid,
    pub list_name: String,
}

#[derive(Deserialize)]
pub struct TodoListUpdate {
    pub list_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub todo_id: Uuid,
    pub todo_list_id: Uuid,
    pub description: String,
    pub completed: bool,
    pub date_created: DateTime<Utc>,
    pub date_modified: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct TodoCreate {
    pub todo_id: Uuid,
    pub todo_list_id: Uuid,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize, Default)]
pub struct TodoUpdate {
    pub todo_list_id: Option<Uuid>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Query string of `GET /todo/task/`.
#[derive(Deserialize, Default)]
pub struct TaskFilter {
    pub todo_list_id: Option<Uuid>,
    #[serde(default)]
    pub incomplete_only: bool,
}
