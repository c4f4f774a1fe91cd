//! Page-level feature state.
//!
//! Each feature owns its own form and list state. Operations take a
//! `Context` for the API calls they make; failures become alerts and the
//! feature's state is left as it was.

pub mod login;
pub mod nav;
pub mod profile;
pub mod register;
pub mod todo;

use todos_core::{ApiError, Backend, Transport};

use crate::controls::{AlertQueue, Severity, Spinner};

/// What a feature needs to talk to the backend and report outcomes.
pub struct Context<'a, T> {
    pub backend: &'a Backend<T>,
    pub alerts: &'a mut AlertQueue,
    pub spinner: &'a mut Spinner,
}

impl<'a, T: Transport> Context<'a, T> {
    pub fn new(backend: &'a Backend<T>, alerts: &'a mut AlertQueue, spinner: &'a mut Spinner) -> Self {
        Self {
            backend,
            alerts,
            spinner,
        }
    }

    /// Runs one call while holding a spinner token. An error pushes one
    /// alert per message and yields `None`.
    pub fn run<R>(&mut self, call: impl FnOnce(&Backend<T>) -> Result<R, ApiError>) -> Option<R> {
        let token = self.spinner.create();
        let result = call(self.backend);
        self.spinner.remove(token);

        match result {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::debug!(%error, "call failed");
                self.alerts.push_errors(&error);
                None
            }
        }
    }

    pub fn success(&mut self, message: &str) {
        self.alerts.push(Severity::Success, message);
    }
}
