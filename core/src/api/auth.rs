use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{AuthToken, ServerMessage, UserLogin};

use super::Backend;

pub const LOGIN_FAILED: &str = "Error occurred during login.";
pub const LOGOUT_FAILED: &str = "Error occurred during logout.";
pub const REFRESH_FAILED: &str = "Error occurred refreshing session.";

impl<T: Transport> Backend<T> {
    pub fn login_user(&self, login: &UserLogin) -> Result<AuthToken, ApiError> {
        self.call(self.client.build_login(login), LOGIN_FAILED)
    }

    /// Revoke both tokens of the session.
    pub fn logout_user(&self, token: &AuthToken) -> Result<ServerMessage, ApiError> {
        self.call(self.client.build_logout(token), LOGOUT_FAILED)
    }

    /// Trade the refresh token for a new access token.
    pub fn refresh_session(&self, token: &AuthToken) -> Result<AuthToken, ApiError> {
        self.call(self.client.build_refresh(token), REFRESH_FAILED)
    }
}
