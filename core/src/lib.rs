//! Synchronous API client core for the todos service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `Backend` runs the
//! per-resource operations (auth, user, todo lists, todo tasks) through any
//! `Transport`.
//!
//! # Design
//! - `ApiClient` is stateless; it holds only `base_url`.
//! - DTOs use the camelCase client representation; `case` translates keys
//!   to and from the snake_case wire format.
//! - Response classification is uniform: data, per-field validation
//!   messages (422), or a single request failure message.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod case;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::Backend;
pub use client::{ApiClient, BodyEncoding, DEFAULT_BASE_URL};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
pub use types::{
    AuthToken, PasswordChange, ServerMessage, Todo, TodoCreate, TodoList, TodoListCreate,
    TodoListUpdate, TodoUpdate, User, UserCreate, UserLogin, UserUpdate,
};
