use todos_core::{Transport, UserCreate};

use super::Context;
use crate::form::{Field, Form};

pub const REGISTERED: &str = "User registered successfully";

pub const USERNAME: &str = "Username";
pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const EMAIL: &str = "Email";
pub const PASSWORD: &str = "Password";
pub const CONFIRM_PASSWORD: &str = "Confirm Password";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterPage {
    pub form: Form,
}

impl Default for RegisterPage {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterPage {
    pub fn new() -> Self {
        Self {
            form: Form::new("Register")
                .field(Field::text(USERNAME).required())
                .field(Field::text(FIRST_NAME).required())
                .field(Field::text(LAST_NAME).required())
                .field(Field::email(EMAIL).required())
                .field(Field::password(PASSWORD).required())
                .field(Field::password(CONFIRM_PASSWORD).required())
                .cta("Register"),
        }
    }

    /// Creates the account. On success a confirmation alert is pushed and
    /// `true` is returned; the caller moves on to the login page.
    pub fn submit<T: Transport>(&mut self, ctx: &mut Context<'_, T>) -> bool {
        if self.form.submit_disabled() {
            return false;
        }
        let create = UserCreate {
            username: self.form.text(USERNAME).to_string(),
            first_name: self.form.text(FIRST_NAME).to_string(),
            last_name: self.form.text(LAST_NAME).to_string(),
            email: self.form.text(EMAIL).to_string(),
            password: self.form.text(PASSWORD).to_string(),
            password_match: self.form.text(CONFIRM_PASSWORD).to_string(),
        };

        match ctx.run(|api| api.register_user(&create)) {
            Some(user) => {
                tracing::info!(username = %user.username, "registered");
                ctx.success(REGISTERED);
                true
            }
            None => false,
        }
    }
}
