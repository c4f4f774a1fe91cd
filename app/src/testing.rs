//! Scripted transport for feature tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::{json, Value};
use todos_core::{
    ApiClient, AuthToken, Backend, HttpRequest, HttpResponse, Transport, TransportError,
};

use crate::controls::{AlertQueue, Spinner};
use crate::features::Context;

pub const LIST_A: &str = "00000000-0000-0000-0000-00000000000a";
pub const LIST_B: &str = "00000000-0000-0000-0000-00000000000b";
pub const LIST_C: &str = "00000000-0000-0000-0000-00000000000c";

/// Replays responses in order and records every request. Running out of
/// script is a connection failure.
#[derive(Default)]
pub struct Script {
    outcomes: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

impl Script {
    pub fn ok(self, body: Value) -> Self {
        self.respond(200, body)
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.outcomes.borrow_mut().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(self) -> Self {
        self.outcomes
            .borrow_mut()
            .push_back(Err(TransportError::Connection("refused".to_string())));
        self
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method.as_str(), r.path))
            .collect()
    }
}

impl Transport for Script {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connection("script exhausted".to_string())))
    }
}

pub fn backend(script: &Script) -> Backend<&Script> {
    Backend::new(ApiClient::new("http://api.test/api/v1"), script)
}

/// Owned alerts and spinner for building a `Context` in tests.
#[derive(Default)]
pub struct Harness {
    pub alerts: AlertQueue,
    pub spinner: Spinner,
}

impl Harness {
    pub fn ctx<'a, 's>(&'a mut self, backend: &'a Backend<&'s Script>) -> Context<'a, &'s Script> {
        Context::new(backend, &mut self.alerts, &mut self.spinner)
    }

    pub fn messages(&self) -> Vec<String> {
        self.alerts.iter().map(|(_, a)| a.message.clone()).collect()
    }
}

pub fn token() -> AuthToken {
    AuthToken {
        token_type: "Bearer".to_string(),
        access_token: "access".to_string(),
        access_token_expires_at: None,
        refresh_token: "refresh".to_string(),
        refresh_token_expires_at: None,
    }
}

pub fn token_json() -> Value {
    json!({
        "token_type": "Bearer",
        "access_token": "access",
        "refresh_token": "refresh"
    })
}

pub fn list_json(id: &str, name: &str) -> Value {
    json!({
        "todo_list_id": id,
        "list_name": name,
        "date_created": "2024-01-01T00:00:00Z",
        "date_modified": null
    })
}

pub fn todo_json(id: &str, list_id: &str, description: &str, completed: bool) -> Value {
    json!({
        "todo_id": id,
        "todo_list_id": list_id,
        "description": description,
        "completed": completed,
        "date_created": "2024-01-01T00:00:00Z",
        "date_modified": null
    })
}

pub fn user_json(username: &str) -> Value {
    json!({
        "username": username,
        "first_name": "Jane",
        "last_name": "Doe",
        "email": "jane@example.com",
        "verified_email": null,
        "roles": ["USER"],
        "disabled": false,
        "date_created": "2024-01-01T00:00:00Z",
        "date_modified": null,
        "last_login": null
    })
}
