use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{AuthToken, PasswordChange, User, UserCreate, UserUpdate};

use super::Backend;

pub const REGISTER_FAILED: &str = "Error occurred during registration.";
pub const FETCH_PROFILE_FAILED: &str = "Error occurred fetching profile.";
pub const UPDATE_PROFILE_FAILED: &str = "Error occurred during profile update.";
pub const CHANGE_PASSWORD_FAILED: &str = "Error occurred during password change.";

impl<T: Transport> Backend<T> {
    pub fn register_user(&self, user: &UserCreate) -> Result<User, ApiError> {
        self.call(self.client.build_register(user), REGISTER_FAILED)
    }

    pub fn fetch_profile(&self, token: &AuthToken) -> Result<User, ApiError> {
        self.call(Ok(self.client.build_fetch_profile(token)), FETCH_PROFILE_FAILED)
    }

    pub fn update_profile(&self, update: &UserUpdate, token: &AuthToken) -> Result<User, ApiError> {
        self.call(self.client.build_update_profile(update, token), UPDATE_PROFILE_FAILED)
    }

    pub fn change_password(
        &self,
        change: &PasswordChange,
        token: &AuthToken,
    ) -> Result<User, ApiError> {
        self.call(self.client.build_change_password(change, token), CHANGE_PASSWORD_FAILED)
    }
}
