//! Profile page: view and edit the signed-in user.

use todos_core::{AuthToken, PasswordChange, Transport, User, UserUpdate};

use super::Context;
use crate::form::{Field, Form};

pub const PROFILE_UPDATED: &str = "Profile updated successfully";
pub const PASSWORD_CHANGED: &str = "Password has been changed";

pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const EMAIL: &str = "Email";
pub const PASSWORD: &str = "Password";
pub const CONFIRM_PASSWORD: &str = "Confirm Password";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileMode {
    #[default]
    View,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePage {
    mode: ProfileMode,
    user: Option<User>,
    pub edit_form: Form,
    pub password_form: Form,
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self::new()
    }
}

fn edit_form(user: Option<&User>) -> Form {
    let (first_name, last_name, email) = match user {
        Some(u) => (u.first_name.as_str(), u.last_name.as_str(), u.email.as_str()),
        None => ("", "", ""),
    };
    Form::new("Edit Profile")
        .field(Field::text(FIRST_NAME).required().with_text(first_name))
        .field(Field::text(LAST_NAME).required().with_text(last_name))
        .field(Field::email(EMAIL).required().with_text(email))
        .cta("Update")
}

fn password_form() -> Form {
    Form::new("Change Password")
        .field(Field::password(PASSWORD).required())
        .field(Field::password(CONFIRM_PASSWORD).required())
        .cta("Change Password")
}

impl ProfilePage {
    pub fn new() -> Self {
        Self {
            mode: ProfileMode::View,
            user: None,
            edit_form: edit_form(None),
            password_form: password_form(),
        }
    }

    pub fn mode(&self) -> ProfileMode {
        self.mode
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Fetches the profile and resets the edit form from it.
    pub fn load<T: Transport>(&mut self, ctx: &mut Context<'_, T>, token: &AuthToken) -> bool {
        let Some(user) = ctx.run(|api| api.fetch_profile(token)) else {
            return false;
        };
        self.edit_form = edit_form(Some(&user));
        self.user = Some(user);
        true
    }

    /// Every mode change re-fetches the profile.
    pub fn set_mode<T: Transport>(
        &mut self,
        mode: ProfileMode,
        ctx: &mut Context<'_, T>,
        token: &AuthToken,
    ) {
        self.mode = mode;
        self.password_form = password_form();
        self.load(ctx, token);
    }

    /// Read-only rendering of the fetched profile.
    pub fn view_form(&self) -> Form {
        let mut form = edit_form(self.user.as_ref());
        form.title = "Profile".to_string();
        form.cta = None;
        for field in &mut form.fields {
            field.read_only = true;
            field.required = false;
        }
        form
    }

    pub fn update_info<T: Transport>(&mut self, ctx: &mut Context<'_, T>, token: &AuthToken) -> bool {
        if self.mode != ProfileMode::Edit || self.edit_form.submit_disabled() {
            return false;
        }
        let update = UserUpdate {
            first_name: Some(self.edit_form.text(FIRST_NAME).to_string()),
            last_name: Some(self.edit_form.text(LAST_NAME).to_string()),
            email: Some(self.edit_form.text(EMAIL).to_string()),
        };

        let Some(user) = ctx.run(|api| api.update_profile(&update, token)) else {
            return false;
        };
        ctx.success(PROFILE_UPDATED);
        self.edit_form = edit_form(Some(&user));
        self.user = Some(user);
        true
    }

    pub fn change_password<T: Transport>(
        &mut self,
        ctx: &mut Context<'_, T>,
        token: &AuthToken,
    ) -> bool {
        if self.mode != ProfileMode::Edit || self.password_form.submit_disabled() {
            return false;
        }
        let change = PasswordChange {
            password: self.password_form.text(PASSWORD).to_string(),
            password_match: self.password_form.text(CONFIRM_PASSWORD).to_string(),
        };

        if ctx.run(|api| api.change_password(&change, token)).is_none() {
            return false;
        }
        ctx.success(PASSWORD_CHANGED);
        self.password_form = password_form();
        true
    }
}
