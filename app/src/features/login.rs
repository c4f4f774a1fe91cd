use todos_core::{Transport, UserLogin};

use super::Context;
use crate::form::{Field, Form};
use crate::Session;

pub const USERNAME: &str = "Username";
pub const PASSWORD: &str = "Password";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPage {
    pub form: Form,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginPage {
    pub fn new() -> Self {
        Self {
            form: Form::new("Login")
                .field(Field::text(USERNAME).required())
                .field(Field::password(PASSWORD).required())
                .cta("Login"),
        }
    }

    /// Logs in with the form's credentials. Returns the new session on
    /// success; an invalid form sends nothing.
    pub fn submit<T: Transport>(&mut self, ctx: &mut Context<'_, T>) -> Option<Session> {
        if self.form.submit_disabled() {
            return None;
        }
        let login = UserLogin {
            username: self.form.text(USERNAME).to_string(),
            password: self.form.text(PASSWORD).to_string(),
        };

        let token = ctx.run(|api| api.login_user(&login))?;
        Some(Session {
            username: login.username,
            token,
        })
    }
}
