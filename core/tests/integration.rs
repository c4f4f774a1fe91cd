//! End-to-end lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port and runs every `Backend`
//! operation over real HTTP through a small ureq transport. Catches drift
//! between the client DTOs and the server's wire models.

use todos_core::{
    ApiClient, ApiError, AuthToken, Backend, HttpMethod, HttpRequest, HttpResponse,
    PasswordChange, TodoCreate, TodoListCreate, TodoListUpdate, TodoUpdate, Transport,
    TransportError, UserCreate, UserLogin, UserUpdate,
};

/// ureq with status-as-error disabled, so 4xx/5xx stay data for `parse`.
struct Ureq(ureq::Agent);

impl Ureq {
    fn new() -> Self {
        Self(
            ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent(),
        )
    }
}

impl Transport for Ureq {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let content_type = req.header("content-type").unwrap_or("application/json").to_string();
        let authorization = req.header("authorization").map(str::to_string);

        let result = match req.method {
            HttpMethod::Get => {
                let mut r = self.0.get(&req.path);
                if let Some(auth) = &authorization {
                    r = r.header("authorization", auth.as_str());
                }
                r.call()
            }
            HttpMethod::Delete => {
                let mut r = self.0.delete(&req.path);
                if let Some(auth) = &authorization {
                    r = r.header("authorization", auth.as_str());
                }
                r.call()
            }
            HttpMethod::Post | HttpMethod::Put => {
                let mut r = if req.method == HttpMethod::Post {
                    self.0.post(&req.path)
                } else {
                    self.0.put(&req.path)
                };
                if let Some(auth) = &authorization {
                    r = r.header("authorization", auth.as_str());
                }
                match &req.body {
                    Some(body) => r.content_type(content_type.as_str()).send(body.as_bytes()),
                    None => r.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| TransportError::Connection(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/api/v1")
}

fn register_and_login(backend: &Backend<Ureq>, username: &str) -> AuthToken {
    let user = backend
        .register_user(&UserCreate {
            username: username.to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: format!("{username}@example.com"),
            password: "secret".to_string(),
            password_match: "secret".to_string(),
        })
        .unwrap();
    assert_eq!(user.username, username);
    assert_eq!(user.first_name, "Jane");

    backend
        .login_user(&UserLogin {
            username: username.to_string(),
            password: "secret".to_string(),
        })
        .unwrap()
}

#[test]
fn full_lifecycle() {
    let backend = Backend::new(ApiClient::new(&start_server()), Ureq::new());

    // Step 1: register and log in.
    let token = register_and_login(&backend, "jane");
    assert_eq!(token.token_type, "Bearer");
    assert!(token.access_token_expires_at.is_some());

    // Step 2: profile.
    let profile = backend.fetch_profile(&token).unwrap();
    assert_eq!(profile.email, "jane@example.com");
    assert!(profile.last_login.is_some());

    let updated = backend
        .update_profile(
            &UserUpdate {
                first_name: Some("Janet".to_string()),
                ..UserUpdate::default()
            },
            &token,
        )
        .unwrap();
    assert_eq!(updated.first_name, "Janet");
    assert_eq!(updated.last_name, "Doe");

    backend
        .change_password(
            &PasswordChange {
                password: "hunter2".to_string(),
                password_match: "hunter2".to_string(),
            },
            &token,
        )
        .unwrap();

    // Step 3: lists start empty.
    assert!(backend.fetch_todo_lists(&token).unwrap().is_empty());

    let groceries = backend
        .create_todo_list(&TodoListCreate::new("groceries"), &token)
        .unwrap();
    let chores = backend
        .create_todo_list(&TodoListCreate::new("chores"), &token)
        .unwrap();
    assert_eq!(backend.fetch_todo_lists(&token).unwrap().len(), 2);

    let renamed = backend
        .update_todo_list(
            chores.todo_list_id,
            &TodoListUpdate {
                list_name: "house".to_string(),
            },
            &token,
        )
        .unwrap();
    assert_eq!(renamed.list_name, "house");
    assert!(renamed.date_modified.is_some());

    // Step 4: tasks.
    let milk = backend
        .create_todo(&TodoCreate::new(groceries.todo_list_id, "milk", false), &token)
        .unwrap();
    let sweep = backend
        .create_todo(&TodoCreate::new(chores.todo_list_id, "sweep", true), &token)
        .unwrap();
    assert_eq!(milk.description, "milk");

    assert_eq!(backend.fetch_all_todos(false, &token).unwrap().len(), 2);
    let open = backend.fetch_all_todos(true, &token).unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].todo_id, milk.todo_id);

    let in_chores = backend.fetch_todos(chores.todo_list_id, &token).unwrap();
    assert_eq!(in_chores.len(), 1);
    assert_eq!(in_chores[0].todo_id, sweep.todo_id);

    let done = backend
        .update_todo(
            milk.todo_id,
            &TodoUpdate {
                todo_list_id: groceries.todo_list_id,
                description: "oat milk".to_string(),
                completed: true,
            },
            &token,
        )
        .unwrap();
    assert!(done.completed);
    assert_eq!(done.description, "oat milk");

    let deleted = backend.delete_todo(sweep.todo_id, &token).unwrap();
    assert_eq!(deleted.todo_id, sweep.todo_id);

    // Step 5: a second delete reports the server's message.
    let err = backend.delete_todo(sweep.todo_id, &token).unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(
        err.to_string(),
        format!("Issue occurred during request: Todo resource not found with id '{}'", sweep.todo_id)
    );

    // Step 6: deleting a list removes its tasks.
    backend.delete_todo_list(groceries.todo_list_id, &token).unwrap();
    assert!(backend.fetch_all_todos(false, &token).unwrap().is_empty());

    // Step 7: refresh, then log out; the old access token stops working.
    let refreshed = backend.refresh_session(&token).unwrap();
    assert_ne!(refreshed.access_token, token.access_token);

    let ack = backend.logout_user(&refreshed).unwrap();
    assert_eq!(ack.message, "access_token revoked: true, refresh_token revoked: true");

    let err = backend.fetch_todo_lists(&refreshed).unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[test]
fn validation_failures_become_field_messages() {
    let backend = Backend::new(ApiClient::new(&start_server()), Ureq::new());

    let err = backend
        .register_user(&UserCreate {
            username: "bob".to_string(),
            first_name: "Bob".to_string(),
            last_name: "B".to_string(),
            email: "bob@example.com".to_string(),
            password: "abc".to_string(),
            password_match: "abc".to_string(),
        })
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Validation(vec![
            "password: password needs to be at least 4 characters".to_string()
        ])
    );
}

#[test]
fn wrong_password_keeps_server_message() {
    let backend = Backend::new(ApiClient::new(&start_server()), Ureq::new());
    register_and_login(&backend, "sam");

    let err = backend
        .login_user(&UserLogin {
            username: "sam".to_string(),
            password: "nope".to_string(),
        })
        .unwrap_err();
    assert_eq!(
        err.messages(),
        vec!["Issue occurred during request: Invalid credentials provided for username 'sam'"]
    );
}

#[test]
fn unreachable_server_uses_fixed_message() {
    // Bind then drop to get a port with nothing listening.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let backend = Backend::new(
        ApiClient::new(&format!("http://{addr}/api/v1")),
        Ureq::new(),
    );

    let err = backend
        .login_user(&UserLogin {
            username: "x".to_string(),
            password: "y".to_string(),
        })
        .unwrap_err();
    assert_eq!(err, ApiError::Network(todos_core::api::LOGIN_FAILED.to_string()));
}
