use axum::{extract::State, http::StatusCode, Form, Json};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::{AuthToken, LoginForm, ServerResponse};
use crate::{Db, Failure, Store};

const ACCESS_TOKEN_EXPIRE_MIN: i64 = 1440;
const REFRESH_TOKEN_EXPIRE_MIN: i64 = 10080;

fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}

fn issue_access(store: &mut Store, username: &str) -> (String, chrono::DateTime<Utc>) {
    let token = new_token();
    store.access_tokens.insert(token.clone(), username.to_string());
    (token, Utc::now() + Duration::minutes(ACCESS_TOKEN_EXPIRE_MIN))
}

pub async fn login(
    State(db): State<Db>,
    Form(form): Form<LoginForm>,
) -> Result<Json<AuthToken>, Failure> {
    let mut store = db.write().await;
    let record = store
        .users
        .get_mut(&form.username)
        .filter(|r| r.password == form.password)
        .ok_or_else(|| {
            Failure::message(
                StatusCode::UNAUTHORIZED,
                format!("Invalid credentials provided for username '{}'", form.username),
            )
        })?;
    if record.user.disabled {
        return Err(Failure::message(
            StatusCode::FORBIDDEN,
            format!("User '{}' has been disabled", form.username),
        ));
    }
    record.user.last_login = Some(Utc::now());

    let (access_token, access_expires) = issue_access(&mut store, &form.username);
    let refresh_token = new_token();
    store
        .refresh_tokens
        .insert(refresh_token.clone(), form.username.clone());
    tracing::debug!(username = %form.username, "issued tokens");

    Ok(Json(AuthToken {
        token_type: "Bearer".to_string(),
        access_token,
        access_token_expires_at: Some(access_expires),
        refresh_token,
        refresh_token_expires_at: Some(Utc::now() + Duration::minutes(REFRESH_TOKEN_EXPIRE_MIN)),
    }))
}

pub async fn logout(State(db): State<Db>, Json(token): Json<AuthToken>) -> Json<ServerResponse> {
    let mut store = db.write().await;
    let access_revoked = store.access_tokens.remove(&token.access_token).is_some();
    let refresh_revoked = store.refresh_tokens.remove(&token.refresh_token).is_some();
    Json(ServerResponse {
        message: format!(
            "access_token revoked: {access_revoked}, refresh_token revoked: {refresh_revoked}"
        ),
    })
}

pub async fn refresh(
    State(db): State<Db>,
    Json(token): Json<AuthToken>,
) -> Result<Json<AuthToken>, Failure> {
    let mut store = db.write().await;
    let username = store
        .refresh_tokens
        .get(&token.refresh_token)
        .cloned()
        .ok_or_else(|| Failure::message(StatusCode::UNAUTHORIZED, "Invalid refresh token"))?;
    let (access_token, access_expires) = issue_access(&mut store, &username);
    Ok(Json(AuthToken {
        token_type: "Bearer".to_string(),
        access_token,
        access_token_expires_at: Some(access_expires),
        refresh_token: token.refresh_token,
        refresh_token_expires_at: token.refresh_token_expires_at,
    }))
}
