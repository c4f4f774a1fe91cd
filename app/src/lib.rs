//! Terminal client for the todos service.
//!
//! # Overview
//! `App` is the state machine behind the `todos` binary: pages, session,
//! alerts and the per-page feature state. All backend traffic goes through
//! `todos_core::Backend`, so the whole app runs against any `Transport`;
//! `UreqTransport` is the real one.

pub mod app;
pub mod config;
pub mod controls;
pub mod features;
pub mod form;
pub mod transport;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{App, Page, PageState, Session};
pub use config::{Config, ConfigError};
pub use controls::{Alert, AlertQueue, ItemId, ListControl, Severity, Spinner};
pub use form::{Field, FieldKind, FieldValue, Form, InputType, SelectOption};
pub use transport::UreqTransport;
pub use view::render;
