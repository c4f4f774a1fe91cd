//! Per-resource API operations.
//!
//! # Design
//! `Backend` pairs the stateless `ApiClient` with a `Transport`. Each
//! resource module adds one method per backend route: build the request,
//! execute it, parse the response. Failures that never produced a readable
//! response (transport errors, bodies that are not JSON) are replaced with a
//! fixed message naming the operation; HTTP error responses keep the
//! server's classification.

mod auth;
mod todo_list;
mod todo_task;
mod user;

pub use auth::{LOGIN_FAILED, LOGOUT_FAILED, REFRESH_FAILED};
pub use todo_list::{
    CREATE_TODO_LIST_FAILED, DELETE_TODO_LIST_FAILED, FETCH_TODO_LISTS_FAILED,
    UPDATE_TODO_LIST_FAILED,
};
pub use todo_task::{CREATE_TODO_FAILED, DELETE_TODO_FAILED, FETCH_TODOS_FAILED, UPDATE_TODO_FAILED};
pub use user::{
    CHANGE_PASSWORD_FAILED, FETCH_PROFILE_FAILED, REGISTER_FAILED, UPDATE_PROFILE_FAILED,
};

use serde::de::DeserializeOwned;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::transport::Transport;

/// API client bound to a transport.
#[derive(Debug, Clone)]
pub struct Backend<T> {
    client: ApiClient,
    transport: T,
}

impl<T: Transport> Backend<T> {
    pub fn new(client: ApiClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn call<R: DeserializeOwned>(
        &self,
        request: Result<HttpRequest, ApiError>,
        failure: &'static str,
    ) -> Result<R, ApiError> {
        let request = request.map_err(|e| {
            tracing::warn!(error = %e, "{failure}");
            ApiError::Network(failure.to_string())
        })?;

        let response = self.transport.execute(request).map_err(|e| {
            tracing::warn!(error = %e, "{failure}");
            ApiError::Network(failure.to_string())
        })?;

        match self.client.parse(response) {
            Err(ApiError::Deserialization(e)) => {
                tracing::warn!(error = %e, "{failure}");
                Err(ApiError::Network(failure.to_string()))
            }
            other => other,
        }
    }
}
