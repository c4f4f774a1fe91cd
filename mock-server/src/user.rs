use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use chrono::Utc;

use crate::models::{User, UserCreate, UserUpdate};
use crate::{authenticate, validate_password, Db, Failure, UserRecord};

pub async fn register(
    State(db): State<Db>,
    Json(input): Json<UserCreate>,
) -> Result<Json<User>, Failure> {
    if input.username.is_empty() {
        return Err(Failure::invalid("username", "ensure this value has at least 1 characters"));
    }
    validate_password(&input.password, Some(&input.password_match))?;

    let mut store = db.write().await;
    if store.users.contains_key(&input.username) {
        return Err(Failure::message(
            StatusCode::CONFLICT,
            format!("User already exists with username '{}'", input.username),
        ));
    }

    let user = User {
        username: input.username.clone(),
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        verified_email: None,
        roles: vec!["USER".to_string()],
        disabled: false,
        date_created: Utc::now(),
        date_modified: None,
        last_login: None,
    };
    store.users.insert(
        input.username,
        UserRecord {
            user: user.clone(),
            password: input.password,
        },
    );
    tracing::debug!(username = %user.username, "registered user");
    Ok(Json(user))
}

pub async fn read_user(State(db): State<Db>, headers: HeaderMap) -> Result<Json<User>, Failure> {
    let store = db.read().await;
    let username = authenticate(&store, &headers)?;
    store
        .users
        .get(&username)
        .map(|r| Json(r.user.clone()))
        .ok_or_else(Failure::unauthorized)
}

pub async fn update_user(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UserUpdate>,
) -> Result<Json<User>, Failure> {
    let mut store = db.write().await;
    let username = authenticate(&store, &headers)?;
    if let Some(password) = &input.password {
        validate_password(password, input.password_match.as_deref())?;
    }

    let record = store
        .users
        .get_mut(&username)
        .ok_or_else(Failure::unauthorized)?;
    if let Some(first_name) = input.first_name {
        record.user.first_name = first_name;
    }
    if let Some(last_name) = input.last_name {
        record.user.last_name = last_name;
    }
    if let Some(email) = input.email {
        record.user.email = email;
    }
    if let Some(password) = input.password {
        record.password = password;
    }
    record.user.date_modified = Some(Utc::now());
    Ok(Json(record.user.clone()))
}
