use uuid::Uuid;

use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{AuthToken, TodoList, TodoListCreate, TodoListUpdate};

use super::Backend;

pub const FETCH_TODO_LISTS_FAILED: &str = "Error occurred fetching todo lists.";
pub const CREATE_TODO_LIST_FAILED: &str = "Error occurred creating todo list.";
pub const UPDATE_TODO_LIST_FAILED: &str = "Error occurred updating todo list.";
pub const DELETE_TODO_LIST_FAILED: &str = "Error occurred deleting todo list.";

impl<T: Transport> Backend<T> {
    pub fn fetch_todo_lists(&self, token: &AuthToken) -> Result<Vec<TodoList>, ApiError> {
        self.call(Ok(self.client.build_fetch_todo_lists(token)), FETCH_TODO_LISTS_FAILED)
    }

    pub fn create_todo_list(
        &self,
        create: &TodoListCreate,
        token: &AuthToken,
    ) -> Result<TodoList, ApiError> {
        self.call(self.client.build_create_todo_list(create, token), CREATE_TODO_LIST_FAILED)
    }

    pub fn update_todo_list(
        &self,
        todo_list_id: Uuid,
        update: &TodoListUpdate,
        token: &AuthToken,
    ) -> Result<TodoList, ApiError> {
        let request = self.client.build_update_todo_list(todo_list_id, update, token);
        self.call(request, UPDATE_TODO_LIST_FAILED)
    }

    /// Delete a list; the backend removes its todos with it.
    pub fn delete_todo_list(&self, todo_list_id: Uuid, token: &AuthToken) -> Result<TodoList, ApiError> {
        let request = self.client.build_delete_todo_list(todo_list_id, token);
        self.call(Ok(request), DELETE_TODO_LIST_FAILED)
    }
}
