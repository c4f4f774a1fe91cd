//! Header and navigation bar.

use todos_core::{AuthToken, Transport};

use super::Context;
use crate::Page;

pub const APP_TITLE: &str = "Todos App";

/// The navigation bar is hidden while signed out.
pub fn nav_visible(page: Page) -> bool {
    !matches!(page, Page::Login | Page::Register)
}

/// Pages reachable from the navigation bar.
pub fn nav_links() -> [Page; 2] {
    [Page::Todo, Page::Profile]
}

/// Revokes the session's tokens. Returns `true` once the backend has
/// acknowledged; the caller then clears its session.
pub fn logout<T: Transport>(ctx: &mut Context<'_, T>, token: &AuthToken) -> bool {
    match ctx.run(|api| api.logout_user(token)) {
        Some(ack) => {
            tracing::debug!(message = %ack.message, "logout acknowledged");
            true
        }
        None => false,
    }
}
