//! Stateless HTTP request builder and response parser for the todos API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Generic `get` / `post` / `put` / `delete` builders translate
//! request bodies to snake_case and attach the bearer token; endpoint
//! builders (`build_*`) pin the method, path and encoding of each backend
//! route. `parse` classifies any response into data or an `ApiError`. The
//! caller executes the HTTP round-trip in between.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::case::{keys_to_camel, keys_to_snake};
use crate::error::{ApiError, SERVER_ERROR};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    AuthToken, PasswordChange, TodoCreate, TodoListCreate, TodoListUpdate, TodoUpdate, UserCreate,
    UserLogin, UserUpdate,
};

/// Backend location used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// How a request body is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Json,
    Form,
}

/// Synchronous, stateless client for the todos API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // -----------------------------------------------------------------------
    // Generic builders
    // -----------------------------------------------------------------------

    pub fn get(&self, url: String, token: Option<&AuthToken>) -> HttpRequest {
        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if let Some(token) = token {
            headers.push(("authorization".to_string(), token.authorization()));
        }
        tracing::debug!(path = %url, "built GET request");
        HttpRequest {
            method: HttpMethod::Get,
            path: url,
            headers,
            body: None,
        }
    }

    pub fn post<B: Serialize>(
        &self,
        url: String,
        body: Option<&B>,
        encoding: BodyEncoding,
        token: Option<&AuthToken>,
    ) -> Result<HttpRequest, ApiError> {
        self.mutate(HttpMethod::Post, url, body, encoding, token)
    }

    pub fn put<B: Serialize>(
        &self,
        url: String,
        body: Option<&B>,
        encoding: BodyEncoding,
        token: Option<&AuthToken>,
    ) -> Result<HttpRequest, ApiError> {
        self.mutate(HttpMethod::Put, url, body, encoding, token)
    }

    pub fn delete(&self, url: String, token: Option<&AuthToken>) -> HttpRequest {
        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if let Some(token) = token {
            headers.push(("authorization".to_string(), token.authorization()));
        }
        tracing::debug!(path = %url, "built DELETE request");
        HttpRequest {
            method: HttpMethod::Delete,
            path: url,
            headers,
            body: None,
        }
    }

    fn mutate<B: Serialize>(
        &self,
        method: HttpMethod,
        url: String,
        body: Option<&B>,
        encoding: BodyEncoding,
        token: Option<&AuthToken>,
    ) -> Result<HttpRequest, ApiError> {
        let mut headers = vec![("accept".to_string(), "application/json".to_string())];

        let body = match body {
            Some(body) => {
                let value = serde_json::to_value(body)
                    .map_err(|e| ApiError::Serialization(e.to_string()))?;
                let encoded = encode_body(keys_to_snake(value), encoding)?;
                let content_type = match encoding {
                    BodyEncoding::Json => JSON_CONTENT_TYPE,
                    BodyEncoding::Form => FORM_CONTENT_TYPE,
                };
                headers.push(("content-type".to_string(), content_type.to_string()));
                Some(encoded)
            }
            None => None,
        };

        if let Some(token) = token {
            headers.push(("authorization".to_string(), token.authorization()));
        }

        tracing::debug!(method = method.as_str(), path = %url, "built request");
        Ok(HttpRequest {
            method,
            path: url,
            headers,
            body,
        })
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    pub fn build_login(&self, login: &UserLogin) -> Result<HttpRequest, ApiError> {
        self.post(self.url("/auth/login/"), Some(login), BodyEncoding::Form, None)
    }

    pub fn build_logout(&self, token: &AuthToken) -> Result<HttpRequest, ApiError> {
        self.post(self.url("/auth/logout/"), Some(token), BodyEncoding::Json, Some(token))
    }

    pub fn build_refresh(&self, token: &AuthToken) -> Result<HttpRequest, ApiError> {
        self.post(self.url("/auth/refresh/"), Some(token), BodyEncoding::Json, None)
    }

    // -----------------------------------------------------------------------
    // User
    // -----------------------------------------------------------------------

    pub fn build_register(&self, user: &UserCreate) -> Result<HttpRequest, ApiError> {
        self.post(self.url("/user/"), Some(user), BodyEncoding::Json, None)
    }

    pub fn build_fetch_profile(&self, token: &AuthToken) -> HttpRequest {
        self.get(self.url("/user/"), Some(token))
    }

    pub fn build_update_profile(
        &self,
        update: &UserUpdate,
        token: &AuthToken,
    ) -> Result<HttpRequest, ApiError> {
        self.put(self.url("/user/"), Some(update), BodyEncoding::Json, Some(token))
    }

    pub fn build_change_password(
        &self,
        change: &PasswordChange,
        token: &AuthToken,
    ) -> Result<HttpRequest, ApiError> {
        self.put(self.url("/user/"), Some(change), BodyEncoding::Json, Some(token))
    }

    // -----------------------------------------------------------------------
    // Todo lists
    // -----------------------------------------------------------------------

    pub fn build_fetch_todo_lists(&self, token: &AuthToken) -> HttpRequest {
        self.get(self.url("/todo/list/"), Some(token))
    }

    pub fn build_create_todo_list(
        &self,
        create: &TodoListCreate,
        token: &AuthToken,
    ) -> Result<HttpRequest, ApiError> {
        self.post(self.url("/todo/list/"), Some(create), BodyEncoding::Json, Some(token))
    }

    pub fn build_update_todo_list(
        &self,
        todo_list_id: Uuid,
        update: &TodoListUpdate,
        token: &AuthToken,
    ) -> Result<HttpRequest, ApiError> {
        let url = self.url(&format!("/todo/list/{todo_list_id}"));
        self.put(url, Some(update), BodyEncoding::Json, Some(token))
    }

    pub fn build_delete_todo_list(&self, todo_list_id: Uuid, token: &AuthToken) -> HttpRequest {
        self.delete(self.url(&format!("/todo/list/{todo_list_id}")), Some(token))
    }

    // -----------------------------------------------------------------------
    // Todo tasks
    // -----------------------------------------------------------------------

    pub fn build_fetch_all_todos(&self, incomplete_only: bool, token: &AuthToken) -> HttpRequest {
        let url = self.url(&format!("/todo/task/?incomplete_only={incomplete_only}"));
        self.get(url, Some(token))
    }

    pub fn build_fetch_todos(&self, todo_list_id: Uuid, token: &AuthToken) -> HttpRequest {
        let url = self.url(&format!("/todo/task/?todo_list_id={todo_list_id}"));
        self.get(url, Some(token))
    }

    pub fn build_create_todo(
        &self,
        create: &TodoCreate,
        token: &AuthToken,
    ) -> Result<HttpRequest, ApiError> {
        self.post(self.url("/todo/task/"), Some(create), BodyEncoding::Json, Some(token))
    }

    pub fn build_update_todo(
        &self,
        todo_id: Uuid,
        update: &TodoUpdate,
        token: &AuthToken,
    ) -> Result<HttpRequest, ApiError> {
        let url = self.url(&format!("/todo/task/{todo_id}"));
        self.put(url, Some(update), BodyEncoding::Json, Some(token))
    }

    pub fn build_delete_todo(&self, todo_id: Uuid, token: &AuthToken) -> HttpRequest {
        self.delete(self.url(&format!("/todo/task/{todo_id}")), Some(token))
    }

    // -----------------------------------------------------------------------
    // Responses
    // -----------------------------------------------------------------------

    /// Classify a response: 2xx bodies are translated to camelCase and
    /// deserialized, 422 becomes `Validation`, anything else `Request`.
    pub fn parse<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        let value: Value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;

        if response.is_success() {
            return serde_json::from_value(keys_to_camel(value))
                .map_err(|e| ApiError::Deserialization(e.to_string()));
        }

        if response.status == 422 {
            tracing::debug!(body = %response.body, "422 response");
            return Err(ApiError::Validation(validation_messages(&value)?));
        }

        tracing::debug!(status = response.status, body = %response.body, "non ok response");
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(SERVER_ERROR)
            .to_string();
        Err(ApiError::Request {
            status: response.status,
            message,
        })
    }
}

fn encode_body(value: Value, encoding: BodyEncoding) -> Result<String, ApiError> {
    match encoding {
        BodyEncoding::Json => {
            serde_json::to_string(&value).map_err(|e| ApiError::Serialization(e.to_string()))
        }
        BodyEncoding::Form => match value {
            Value::Object(map) => Ok(form_encode(&map)),
            _ => Err(ApiError::Serialization(
                "form bodies must be objects".to_string(),
            )),
        },
    }
}

fn form_encode(map: &Map<String, Value>) -> String {
    map.iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("{}={}", urlencoding::encode(key), urlencoding::encode(&text))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Render `{"detail": [{"loc": [...], "msg": "..."}]}` as `"<field>: <msg>"`.
fn validation_messages(value: &Value) -> Result<Vec<String>, ApiError> {
    let detail = value
        .get("detail")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::Deserialization("422 body has no detail list".to_string()))?;

    Ok(detail
        .iter()
        .map(|entry| {
            let msg = entry.get("msg").and_then(Value::as_str).unwrap_or_default();
            let loc = entry
                .get("loc")
                .and_then(Value::as_array)
                .map(|loc| field_name(loc))
                .unwrap_or_default();
            format!("{loc}: {msg}")
        })
        .collect())
}

fn field_name(loc: &[Value]) -> String {
    let render = |v: &Value| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    match loc {
        [_, field, ..] => render(field),
        [only] => render(only),
        [] => String::new(),
    }
}
