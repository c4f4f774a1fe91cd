//! Plain-text rendering of the application state.

use todos_core::Transport;

use crate::app::{App, PageState};
use crate::features::nav::{nav_links, APP_TITLE};
use crate::features::profile::{ProfileMode, ProfilePage};
use crate::features::todo::TodoPage;
use crate::form::{FieldKind, FieldValue, Form, InputType};

pub fn render<T: Transport>(app: &App<T>) -> String {
    let mut out = String::new();

    out.push_str(&format!("== {APP_TITLE} =="));
    if app.is_loading() {
        out.push_str(" (loading)");
    }
    out.push('\n');

    if app.nav_visible() {
        let links: Vec<&str> = nav_links().iter().map(|p| p.title()).collect();
        let user = app.session().map(|s| s.username.as_str()).unwrap_or_default();
        out.push_str(&format!("{} | {user} | Logout\n", links.join(" | ")));
    }

    for (id, alert) in app.alerts().iter() {
        out.push_str(&format!("[{}] {} (#{id})\n", alert.severity.as_str(), alert.message));
    }
    out.push('\n');

    match app.page_state() {
        PageState::Login(page) => render_form(&mut out, &page.form),
        PageState::Register(page) => render_form(&mut out, &page.form),
        PageState::Profile(page) => render_profile(&mut out, page),
        PageState::Todo(page) => render_todo(&mut out, page),
    }
    out
}

pub fn render_form(out: &mut String, form: &Form) {
    out.push_str(&format!("-- {} --\n", form.title));
    for field in &form.fields {
        let value = match (&field.kind, &field.value) {
            (FieldKind::Input(InputType::Password), FieldValue::Text(text)) => "*".repeat(text.len()),
            (FieldKind::Select(options), FieldValue::Text(text)) => options
                .iter()
                .find(|o| &o.value == text)
                .map(|o| o.name.clone())
                .unwrap_or_default(),
            (_, FieldValue::Text(text)) => text.clone(),
            (_, FieldValue::Checked(true)) => "[x]".to_string(),
            (_, FieldValue::Checked(false)) => "[ ]".to_string(),
        };
        out.push_str(&format!("{}: {value}\n", field.label()));
    }
    if form.has_required() {
        out.push_str(&form.required_message);
        out.push('\n');
    }
    if let Some(cta) = &form.cta {
        let state = if form.submit_disabled() { " (disabled)" } else { "" };
        out.push_str(&format!("[{cta}]{state}\n"));
    }
}

fn render_profile(out: &mut String, page: &ProfilePage) {
    match page.mode() {
        ProfileMode::View => {
            render_form(out, &page.view_form());
            out.push_str("[Edit]\n");
        }
        ProfileMode::Edit => {
            render_form(out, &page.edit_form);
            out.push('\n');
            render_form(out, &page.password_form);
            out.push_str("[Done]\n");
        }
    }
}

fn render_todo(out: &mut String, page: &TodoPage) {
    out.push_str("-- Lists --\n");
    for entry in page.menu() {
        let marker = if page.is_active(&entry) { ">" } else { " " };
        out.push_str(&format!("{marker} {}\n", entry.label()));
    }

    let hide = if page.hide_completed() { "[x]" } else { "[ ]" };
    out.push_str(&format!("\n-- Todos -- hide completed {hide}\n"));
    if page.active().todos.is_empty() {
        out.push_str("(none)\n");
    }
    for (n, todo) in page.active().todos.iter().enumerate() {
        let done = if todo.completed { "[x]" } else { "[ ]" };
        let list = page.list_name(todo.todo_list_id).unwrap_or_default();
        out.push_str(&format!("{:>2}. {done} {} ({list})\n", n + 1, todo.description));
    }

    if let Some(list) = page.active_list().filter(|_| page.editing_list()) {
        out.push('\n');
        render_form(out, &crate::features::todo::list_form("Edit List", &list.list_name));
    }
    if let Some(todo) = page.editing_todo() {
        out.push('\n');
        render_form(
            out,
            &page.todo_form(
                "Update Todo",
                Some(todo.todo_list_id),
                &todo.description,
                todo.completed,
            ),
        );
    }
}
