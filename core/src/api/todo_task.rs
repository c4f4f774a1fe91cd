use uuid::Uuid;

use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{AuthToken, Todo, TodoCreate, TodoUpdate};

use super::Backend;

pub const FETCH_TODOS_FAILED: &str = "Error occurred fetching todos.";
pub const CREATE_TODO_FAILED: &str = "Error occurred creating todo.";
pub const UPDATE_TODO_FAILED: &str = "Error occurred updating todo.";
pub const DELETE_TODO_FAILED: &str = "Error occurred deleting todo.";

impl<T: Transport> Backend<T> {
    /// Every todo of the user, optionally without completed ones.
    pub fn fetch_all_todos(
        &self,
        incomplete_only: bool,
        token: &AuthToken,
    ) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.build_fetch_all_todos(incomplete_only, token);
        self.call(Ok(request), FETCH_TODOS_FAILED)
    }

    pub fn fetch_todos(&self, todo_list_id: Uuid, token: &AuthToken) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.build_fetch_todos(todo_list_id, token);
        self.call(Ok(request), FETCH_TODOS_FAILED)
    }

    pub fn create_todo(&self, create: &TodoCreate, token: &AuthToken) -> Result<Todo, ApiError> {
        self.call(self.client.build_create_todo(create, token), CREATE_TODO_FAILED)
    }

    pub fn update_todo(
        &self,
        todo_id: Uuid,
        update: &TodoUpdate,
        token: &AuthToken,
    ) -> Result<Todo, ApiError> {
        self.call(self.client.build_update_todo(todo_id, update, token), UPDATE_TODO_FAILED)
    }

    pub fn delete_todo(&self, todo_id: Uuid, token: &AuthToken) -> Result<Todo, ApiError> {
        self.call(Ok(self.client.build_delete_todo(todo_id, token)), DELETE_TODO_FAILED)
    }
}
