//! Todo page: lists, tasks and the active view over them.
//!
//! # Design
//! The page keeps the last fetched lists and tasks plus an active view
//! derived from them. A refresh fetches lists, then tasks, and commits both
//! only when both calls succeed. Picking a list from the menu recomputes
//! the active view from held state without fetching.

use todos_core::{AuthToken, Todo, TodoCreate, TodoList, TodoListCreate, TodoListUpdate, TodoUpdate, Transport};
use uuid::Uuid;

use super::Context;
use crate::form::{Field, Form, SelectOption};

pub const ALL_ENTRY: &str = "[All]";
pub const NO_LISTS: &str = "No Lists";

pub const LIST_NAME: &str = "List Name";
pub const DESCRIPTION: &str = "Description";
pub const COMPLETED: &str = "Completed";

/// Which lists the task table shows. `All` is the aggregate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSelection {
    All,
    List(Uuid),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveTodoList {
    pub selection: Option<ListSelection>,
    pub todos: Vec<Todo>,
}

/// Selection after a refresh: `All` sticks, a concrete list sticks while it
/// still exists, anything else falls back to the first list.
pub fn resolve_selection(
    previous: Option<ListSelection>,
    lists: &[TodoList],
) -> Option<ListSelection> {
    match previous {
        Some(ListSelection::All) => previous,
        Some(ListSelection::List(id)) if lists.iter().any(|l| l.todo_list_id == id) => previous,
        _ => lists.first().map(|l| ListSelection::List(l.todo_list_id)),
    }
}

pub fn visible_todos(selection: Option<ListSelection>, todos: &[Todo]) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| match selection {
            Some(ListSelection::All) => true,
            Some(ListSelection::List(id)) => todo.todo_list_id == id,
            None => false,
        })
        .cloned()
        .collect()
}

pub fn reconcile(
    previous: Option<ListSelection>,
    lists: &[TodoList],
    todos: &[Todo],
) -> ActiveTodoList {
    let selection = resolve_selection(previous, lists);
    ActiveTodoList {
        selection,
        todos: visible_todos(selection, todos),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    All,
    List { id: Uuid, name: String },
    NoLists,
}

impl MenuEntry {
    pub fn label(&self) -> &str {
        match self {
            MenuEntry::All => ALL_ENTRY,
            MenuEntry::List { name, .. } => name,
            MenuEntry::NoLists => NO_LISTS,
        }
    }

    pub fn selection(&self) -> Option<ListSelection> {
        match self {
            MenuEntry::All => Some(ListSelection::All),
            MenuEntry::List { id, .. } => Some(ListSelection::List(*id)),
            MenuEntry::NoLists => None,
        }
    }
}

/// Create/rename form for a list.
pub fn list_form(title: &str, list_name: &str) -> Form {
    Form::new(title)
        .field(Field::text(LIST_NAME).required().with_text(list_name))
        .cta(title)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPage {
    todo_lists: Vec<TodoList>,
    todos: Vec<Todo>,
    active: ActiveTodoList,
    hide_completed: bool,
    edit_list: bool,
    edit_todo: Option<Todo>,
}

impl TodoPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todo_lists(&self) -> &[TodoList] {
        &self.todo_lists
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn active(&self) -> &ActiveTodoList {
        &self.active
    }

    pub fn hide_completed(&self) -> bool {
        self.hide_completed
    }

    pub fn editing_list(&self) -> bool {
        self.edit_list
    }

    pub fn editing_todo(&self) -> Option<&Todo> {
        self.edit_todo.as_ref()
    }

    /// The active list when a concrete one is selected.
    pub fn active_list(&self) -> Option<&TodoList> {
        match self.active.selection {
            Some(ListSelection::List(id)) => self.todo_lists.iter().find(|l| l.todo_list_id == id),
            _ => None,
        }
    }

    pub fn list_name(&self, id: Uuid) -> Option<&str> {
        self.todo_lists
            .iter()
            .find(|l| l.todo_list_id == id)
            .map(|l| l.list_name.as_str())
    }

    pub fn menu(&self) -> Vec<MenuEntry> {
        if self.todo_lists.is_empty() {
            return vec![MenuEntry::NoLists];
        }
        std::iter::once(MenuEntry::All)
            .chain(self.todo_lists.iter().map(|l| MenuEntry::List {
                id: l.todo_list_id,
                name: l.list_name.clone(),
            }))
            .collect()
    }

    pub fn is_active(&self, entry: &MenuEntry) -> bool {
        entry.selection().is_some() && entry.selection() == self.active.selection
    }

    /// Refetches lists and tasks and re-derives the active view. On any
    /// failure nothing is committed.
    pub fn refresh<T: Transport>(&mut self, ctx: &mut Context<'_, T>, token: &AuthToken) -> bool {
        let Some(lists) = ctx.run(|api| api.fetch_todo_lists(token)) else {
            return false;
        };
        let hide_completed = self.hide_completed;
        let Some(todos) = ctx.run(|api| api.fetch_all_todos(hide_completed, token)) else {
            return false;
        };

        let active = reconcile(self.active.selection, &lists, &todos);
        tracing::debug!(
            lists = lists.len(),
            todos = todos.len(),
            selection = ?active.selection,
            "refreshed"
        );
        self.todo_lists = lists;
        self.todos = todos;
        self.active = active;
        true
    }

    /// Menu selection. Picking the already active list opens its editor.
    /// Unknown lists and `All` without any lists are ignored.
    pub fn select(&mut self, selection: ListSelection) -> bool {
        match selection {
            ListSelection::List(id) if !self.todo_lists.iter().any(|l| l.todo_list_id == id) => {
                return false;
            }
            ListSelection::All if self.todo_lists.is_empty() => return false,
            ListSelection::List(_) if self.active.selection == Some(selection) => {
                self.edit_list = true;
            }
            _ => self.edit_list = false,
        }
        self.active = ActiveTodoList {
            selection: Some(selection),
            todos: visible_todos(Some(selection), &self.todos),
        };
        true
    }

    pub fn set_hide_completed<T: Transport>(
        &mut self,
        hide: bool,
        ctx: &mut Context<'_, T>,
        token: &AuthToken,
    ) -> bool {
        if self.hide_completed == hide {
            return false;
        }
        self.hide_completed = hide;
        if !self.refresh(ctx, token) {
            self.hide_completed = !hide;
            return false;
        }
        true
    }

    pub fn create_list<T: Transport>(
        &mut self,
        list_name: &str,
        ctx: &mut Context<'_, T>,
        token: &AuthToken,
    ) -> bool {
        if list_form("Create List", list_name).submit_disabled() {
            return false;
        }
        let create = TodoListCreate::new(list_name);
        if ctx.run(|api| api.create_todo_list(&create, token)).is_none() {
            return false;
        }
        self.refresh(ctx, token);
        true
    }

    /// Renames the active list.
    pub fn update_list<T: Transport>(
        &mut self,
        list_name: &str,
        ctx: &mut Context<'_, T>,
        token: &AuthToken,
    ) -> bool {
        let Some(id) = self.active_list().map(|l| l.todo_list_id) else {
            return false;
        };
        if list_form("Edit List", list_name).submit_disabled() {
            return false;
        }
        let update = TodoListUpdate {
            list_name: list_name.to_string(),
        };
        if ctx.run(|api| api.update_todo_list(id, &update, token)).is_none() {
            return false;
        }
        self.edit_list = false;
        self.refresh(ctx, token);
        true
    }

    /// Deletes the active list; its tasks go with it.
    pub fn delete_list<T: Transport>(&mut self, ctx: &mut Context<'_, T>, token: &AuthToken) -> bool {
        let Some(id) = self.active_list().map(|l| l.todo_list_id) else {
            return false;
        };
        if ctx.run(|api| api.delete_todo_list(id, token)).is_none() {
            return false;
        }
        self.edit_list = false;
        self.refresh(ctx, token);
        true
    }

    pub fn close_list_editor(&mut self) {
        self.edit_list = false;
    }

    /// List preselected for a new todo: the active one, or the first list
    /// while the aggregate view is active.
    pub fn default_list_for_new_todo(&self) -> Option<Uuid> {
        match self.active.selection {
            Some(ListSelection::List(id)) => Some(id),
            _ => self.todo_lists.first().map(|l| l.todo_list_id),
        }
    }

    pub fn todo_form(
        &self,
        title: &str,
        list_id: Option<Uuid>,
        description: &str,
        completed: bool,
    ) -> Form {
        let options = self
            .todo_lists
            .iter()
            .map(|l| SelectOption {
                value: l.todo_list_id.to_string(),
                name: l.list_name.clone(),
            })
            .collect();
        let list_value = list_id.map(|id| id.to_string()).unwrap_or_default();
        Form::new(title)
            .field(Field::select(LIST_NAME, options).required().with_text(list_value))
            .field(Field::text(DESCRIPTION).required().with_text(description))
            .field(Field::checkbox(COMPLETED).with_checked(completed))
            .cta(title)
    }

    pub fn create_todo<T: Transport>(
        &mut self,
        list_id: Uuid,
        description: &str,
        completed: bool,
        ctx: &mut Context<'_, T>,
        token: &AuthToken,
    ) -> bool {
        if self.list_name(list_id).is_none()
            || self
                .todo_form("Create Todo", Some(list_id), description, completed)
                .submit_disabled()
        {
            return false;
        }
        let create = TodoCreate::new(list_id, description, completed);
        if ctx.run(|api| api.create_todo(&create, token)).is_none() {
            return false;
        }
        self.refresh(ctx, token);
        true
    }

    /// Opens the editor for a held todo.
    pub fn open_todo(&mut self, todo_id: Uuid) -> bool {
        match self.todos.iter().find(|t| t.todo_id == todo_id) {
            Some(todo) => {
                self.edit_todo = Some(todo.clone());
                true
            }
            None => false,
        }
    }

    pub fn close_todo_editor(&mut self) {
        self.edit_todo = None;
    }

    pub fn update_todo<T: Transport>(
        &mut self,
        todo_id: Uuid,
        update: TodoUpdate,
        ctx: &mut Context<'_, T>,
        token: &AuthToken,
    ) -> bool {
        let form = self.todo_form(
            "Update Todo",
            Some(update.todo_list_id),
            &update.description,
            update.completed,
        );
        if self.list_name(update.todo_list_id).is_none() || form.submit_disabled() {
            return false;
        }
        if ctx.run(|api| api.update_todo(todo_id, &update, token)).is_none() {
            return false;
        }
        self.edit_todo = None;
        self.refresh(ctx, token);
        true
    }

    pub fn delete_todo<T: Transport>(
        &mut self,
        todo_id: Uuid,
        ctx: &mut Context<'_, T>,
        token: &AuthToken,
    ) -> bool {
        if ctx.run(|api| api.delete_todo(todo_id, token)).is_none() {
            return false;
        }
        self.edit_todo = None;
        self.refresh(ctx, token);
        true
    }
}
