//! Application root: current page, session, alerts and spinner.
//!
//! # Design
//! Navigating builds a fresh state for the target page and mounts it, so
//! form contents never leak between visits. Profile and Todo need a session;
//! without one navigation lands on Login. Feature operations are reached
//! through `with_*` accessors that hand the feature a `Context` and the
//! session token.

use std::fmt;
use std::str::FromStr;

use todos_core::{AuthToken, Backend, Transport};

use crate::controls::{AlertQueue, ItemId, Spinner};
use crate::features::login::LoginPage;
use crate::features::nav;
use crate::features::profile::ProfilePage;
use crate::features::register::RegisterPage;
use crate::features::todo::TodoPage;
use crate::features::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
    Profile,
    Todo,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Login, Page::Register, Page::Profile, Page::Todo];

    pub fn hash(&self) -> &'static str {
        match self {
            Page::Login => "#login",
            Page::Register => "#register",
            Page::Profile => "#profile",
            Page::Todo => "#todo",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Login => "Login",
            Page::Register => "Register",
            Page::Profile => "Profile",
            Page::Todo => "Todos",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    /// Accepts the hash fragment with or without the leading `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix('#').unwrap_or(s);
        Page::ALL
            .into_iter()
            .find(|p| &p.hash()[1..] == name)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// The signed-in user and their tokens; present exactly while logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub token: AuthToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Login(LoginPage),
    Register(RegisterPage),
    Profile(ProfilePage),
    Todo(TodoPage),
}

impl PageState {
    pub fn page(&self) -> Page {
        match self {
            PageState::Login(_) => Page::Login,
            PageState::Register(_) => Page::Register,
            PageState::Profile(_) => Page::Profile,
            PageState::Todo(_) => Page::Todo,
        }
    }
}

pub struct App<T> {
    backend: Backend<T>,
    page: PageState,
    session: Option<Session>,
    alerts: AlertQueue,
    spinner: Spinner,
}

impl<T: Transport> App<T> {
    pub fn new(backend: Backend<T>) -> Self {
        Self {
            backend,
            page: PageState::Login(LoginPage::new()),
            session: None,
            alerts: AlertQueue::new(),
            spinner: Spinner::new(),
        }
    }

    pub fn backend(&self) -> &Backend<T> {
        &self.backend
    }

    pub fn page(&self) -> Page {
        self.page.page()
    }

    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn alerts(&self) -> &AlertQueue {
        &self.alerts
    }

    pub fn dismiss_alert(&mut self, id: ItemId) -> bool {
        self.alerts.remove(id).is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.spinner.is_loading()
    }

    pub fn nav_visible(&self) -> bool {
        nav::nav_visible(self.page())
    }

    /// Switches to `page` with fresh state and mounts it. Re-selecting the
    /// current page keeps its state.
    pub fn navigate(&mut self, page: Page) {
        let page = match page {
            Page::Profile | Page::Todo if self.session.is_none() => Page::Login,
            other => other,
        };
        if page == self.page() {
            return;
        }
        tracing::info!(from = %self.page(), to = %page, "navigate");

        self.page = match page {
            Page::Login => PageState::Login(LoginPage::new()),
            Page::Register => PageState::Register(RegisterPage::new()),
            Page::Profile => PageState::Profile(ProfilePage::new()),
            Page::Todo => PageState::Todo(TodoPage::new()),
        };
        match page {
            Page::Profile => {
                self.with_profile(|profile, ctx, token| profile.load(ctx, token));
            }
            Page::Todo => {
                self.with_todo(|todo, ctx, token| todo.refresh(ctx, token));
            }
            Page::Login | Page::Register => {}
        }
    }

    /// Navigates by hash fragment; unknown fragments are ignored.
    pub fn navigate_hash(&mut self, hash: &str) -> bool {
        match hash.parse::<Page>() {
            Ok(page) => {
                self.navigate(page);
                true
            }
            Err(UnknownPage(hash)) => {
                tracing::debug!(%hash, "unknown page");
                false
            }
        }
    }

    pub fn login_form_mut(&mut self) -> Option<&mut LoginPage> {
        match &mut self.page {
            PageState::Login(page) => Some(page),
            _ => None,
        }
    }

    pub fn register_form_mut(&mut self) -> Option<&mut RegisterPage> {
        match &mut self.page {
            PageState::Register(page) => Some(page),
            _ => None,
        }
    }

    pub fn submit_login(&mut self) -> bool {
        let PageState::Login(page) = &mut self.page else {
            return false;
        };
        let mut ctx = Context::new(&self.backend, &mut self.alerts, &mut self.spinner);
        let Some(session) = page.submit(&mut ctx) else {
            return false;
        };
        tracing::info!(username = %session.username, "logged in");
        self.session = Some(session);
        self.navigate(Page::Todo);
        true
    }

    pub fn submit_register(&mut self) -> bool {
        let PageState::Register(page) = &mut self.page else {
            return false;
        };
        let mut ctx = Context::new(&self.backend, &mut self.alerts, &mut self.spinner);
        if !page.submit(&mut ctx) {
            return false;
        }
        self.navigate(Page::Login);
        true
    }

    pub fn logout(&mut self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let mut ctx = Context::new(&self.backend, &mut self.alerts, &mut self.spinner);
        if !nav::logout(&mut ctx, &session.token) {
            return false;
        }
        tracing::info!(username = %session.username, "logged out");
        self.session = None;
        self.navigate(Page::Login);
        true
    }

    /// Exchanges the refresh token for a new access token.
    pub fn refresh_session(&mut self) -> bool {
        let Some(session) = &mut self.session else {
            return false;
        };
        let mut ctx = Context::new(&self.backend, &mut self.alerts, &mut self.spinner);
        match ctx.run(|api| api.refresh_session(&session.token)) {
            Some(token) => {
                session.token = token;
                true
            }
            None => false,
        }
    }

    pub fn with_todo<R>(
        &mut self,
        f: impl FnOnce(&mut TodoPage, &mut Context<'_, T>, &AuthToken) -> R,
    ) -> Option<R> {
        let PageState::Todo(page) = &mut self.page else {
            return None;
        };
        let session = self.session.as_ref()?;
        let mut ctx = Context::new(&self.backend, &mut self.alerts, &mut self.spinner);
        Some(f(page, &mut ctx, &session.token))
    }

    pub fn with_profile<R>(
        &mut self,
        f: impl FnOnce(&mut ProfilePage, &mut Context<'_, T>, &AuthToken) -> R,
    ) -> Option<R> {
        let PageState::Profile(page) = &mut self.page else {
            return None;
        };
        let session = self.session.as_ref()?;
        let mut ctx = Context::new(&self.backend, &mut self.alerts, &mut self.spinner);
        Some(f(page, &mut ctx, &session.token))
    }
}
