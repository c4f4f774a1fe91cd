use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, AuthToken, ServerResponse, Todo, TodoList, User};
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body.to_string()).unwrap()
}

fn empty_request(method: &str, uri: &str, token: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(String::new())
        .unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(body.to_string())
        .unwrap()
}

async fn send(app: &mut axum::routing::RouterIntoService<String>, req: Request<String>) -> axum::response::Response {
    ServiceExt::ready(app).await.unwrap().call(req).await.unwrap()
}

const REGISTER_JANE: &str = r#"{"username":"jane","first_name":"Jane","last_name":"Doe","email":"jane@example.com","password":"secret","password_match":"secret"}"#;

async fn login_jane(app: &mut axum::routing::RouterIntoService<String>) -> AuthToken {
    let resp = send(app, json_request("POST", "/api/v1/user/", None, REGISTER_JANE)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(app, form_request("/api/v1/auth/login/", "username=jane&password=secret")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

fn service() -> axum::routing::RouterIntoService<String> {
    let router: Router = app();
    router.into_service()
}

// --- auth ---

#[tokio::test]
async fn login_unknown_user_returns_401_message() {
    let resp = app()
        .oneshot(form_request("/api/v1/auth/login/", "username=ghost&password=boo"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ServerResponse = body_json(resp).await;
    assert_eq!(body.message, "Invalid credentials provided for username 'ghost'");
}

#[tokio::test]
async fn todo_lists_require_token() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/todo/list/")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_access_token() {
    let mut app = service();
    let token = login_jane(&mut app).await;

    let body = serde_json::to_string(&token).unwrap();
    let resp = send(&mut app, json_request("POST", "/api/v1/auth/logout/", Some(&token.access_token), &body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ack: ServerResponse = body_json(resp).await;
    assert_eq!(ack.message, "access_token revoked: true, refresh_token revoked: true");

    let resp = send(&mut app, empty_request("GET", "/api/v1/user/", &token.access_token)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_issues_new_access_token() {
    let mut app = service();
    let token = login_jane(&mut app).await;

    let body = serde_json::to_string(&token).unwrap();
    let resp = send(&mut app, json_request("POST", "/api/v1/auth/refresh/", None, &body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let refreshed: AuthToken = body_json(resp).await;
    assert_ne!(refreshed.access_token, token.access_token);
    assert_eq!(refreshed.refresh_token, token.refresh_token);

    let resp = send(&mut app, empty_request("GET", "/api/v1/user/", &refreshed.access_token)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- user ---

#[tokio::test]
async fn register_short_password_returns_422_detail() {
    let body = r#"{"username":"jane","first_name":"Jane","last_name":"Doe","email":"jane@example.com","password":"abc","password_match":"abc"}"#;
    let resp = app()
        .oneshot(json_request("POST", "/api/v1/user/", None, body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let detail: serde_json::Value = body_json(resp).await;
    assert_eq!(detail["detail"][0]["loc"], serde_json::json!(["body", "password"]));
    assert_eq!(detail["detail"][0]["msg"], "password needs to be at least 4 characters");
}

#[tokio::test]
async fn register_twice_conflicts() {
    let mut app = service();
    let resp = send(&mut app, json_request("POST", "/api/v1/user/", None, REGISTER_JANE)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(&mut app, json_request("POST", "/api/v1/user/", None, REGISTER_JANE)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn profile_update_changes_only_given_fields() {
    let mut app = service();
    let token = login_jane(&mut app).await;

    let resp = send(
        &mut app,
        json_request("PUT", "/api/v1/user/", Some(&token.access_token), r#"{"email":"jd@example.com"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.email, "jd@example.com");
    assert_eq!(user.first_name, "Jane");
    assert!(user.date_modified.is_some());
    assert!(user.last_login.is_some());
}

// --- todo lists and tasks ---

#[tokio::test]
async fn update_unknown_list_returns_404() {
    let mut app = service();
    let token = login_jane(&mut app).await;

    let resp = send(
        &mut app,
        json_request(
            "PUT",
            "/api/v1/todo/list/00000000-0000-0000-0000-000000000000",
            Some(&token.access_token),
            r#"{"list_name":"nope"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn todo_for_unknown_list_conflicts() {
    let mut app = service();
    let token = login_jane(&mut app).await;

    let resp = send(
        &mut app,
        json_request(
            "POST",
            "/api/v1/todo/task/",
            Some(&token.access_token),
            r#"{"todo_id":"00000000-0000-0000-0000-000000000001","todo_list_id":"00000000-0000-0000-0000-000000000002","description":"apples","completed":false}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn list_and_task_lifecycle() {
    let mut app = service();
    let token = login_jane(&mut app).await;
    let access = token.access_token.as_str();

    let home = "66135916-4fba-4551-b989-8e5f5dac540c";
    let work = "8ba3da17-fae8-4481-bcff-c3b2380bc957";

    // create two lists
    for (id, name) in [(home, "home"), (work, "work")] {
        let body = format!(r#"{{"todo_list_id":"{id}","list_name":"{name}"}}"#);
        let resp = send(&mut app, json_request("POST", "/api/v1/todo/list/", Some(access), &body)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let list: TodoList = body_json(resp).await;
        assert_eq!(list.list_name, name);
        assert!(list.date_modified.is_none());
    }

    // one open todo in home, one completed todo in work
    let tasks = [
        ("50c1c9b8-1804-4e6f-a477-de7b3ae28c0e", home, "mow lawn", false),
        ("04828c69-5f57-4656-a01c-589a26228157", work, "quarterly earnings", true),
    ];
    for (id, list, description, completed) in tasks {
        let body = format!(
            r#"{{"todo_id":"{id}","todo_list_id":"{list}","description":"{description}","completed":{completed}}}"#
        );
        let resp = send(&mut app, json_request("POST", "/api/v1/todo/task/", Some(access), &body)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // all tasks
    let resp = send(&mut app, empty_request("GET", "/api/v1/todo/task/?incomplete_only=false", access)).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 2);

    // incomplete only
    let resp = send(&mut app, empty_request("GET", "/api/v1/todo/task/?incomplete_only=true", access)).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].description, "mow lawn");

    // by list
    let uri = format!("/api/v1/todo/task/?todo_list_id={work}");
    let resp = send(&mut app, empty_request("GET", &uri, access)).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].description, "quarterly earnings");

    // move the home todo to work and complete it
    let uri = format!("/api/v1/todo/task/{}", tasks[0].0);
    let body = format!(r#"{{"todo_list_id":"{work}","description":"mow lawn","completed":true}}"#);
    let resp = send(&mut app, json_request("PUT", &uri, Some(access), &body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let moved: Todo = body_json(resp).await;
    assert!(moved.completed);
    assert_eq!(moved.todo_list_id.to_string(), work);

    // deleting work removes its todos too
    let uri = format!("/api/v1/todo/list/{work}");
    let resp = send(&mut app, empty_request("DELETE", &uri, access)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: TodoList = body_json(resp).await;
    assert_eq!(deleted.list_name, "work");

    let resp = send(&mut app, empty_request("GET", "/api/v1/todo/task/", access)).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());

    let resp = send(&mut app, empty_request("GET", "/api/v1/todo/list/", access)).await;
    let lists: Vec<TodoList> = body_json(resp).await;
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].list_name, "home");

    // deleting an unknown todo is 404
    let uri = format!("/api/v1/todo/task/{}", tasks[1].0);
    let resp = send(&mut app, empty_request("DELETE", &uri, access)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
