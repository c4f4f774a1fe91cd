use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::models::{
    TaskFilter, Todo, TodoCreate, TodoList, TodoListCreate, TodoListUpdate, TodoUpdate,
};
use crate::{authenticate, Db, Failure, ListRecord, Store, TodoRecord};

fn list_not_found(id: Uuid) -> Failure {
    Failure::message(
        StatusCode::NOT_FOUND,
        format!("Todo list resource not found with id '{id}'"),
    )
}

fn todo_not_found(id: Uuid) -> Failure {
    Failure::message(
        StatusCode::NOT_FOUND,
        format!("Todo resource not found with id '{id}'"),
    )
}

/// A todo may only point at a list its owner has.
fn ensure_list(store: &Store, owner: &str, id: Uuid) -> Result<(), Failure> {
    if store
        .lists
        .iter()
        .any(|r| r.owner == owner && r.list.todo_list_id == id)
    {
        Ok(())
    } else {
        Err(Failure::message(
            StatusCode::CONFLICT,
            format!("Todo list resource not found with id '{id}'"),
        ))
    }
}

pub async fn list_todo_lists(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<TodoList>>, Failure> {
    let store = db.read().await;
    let owner = authenticate(&store, &headers)?;
    Ok(Json(
        store
            .lists
            .iter()
            .filter(|r| r.owner == owner)
            .map(|r| r.list.clone())
            .collect(),
    ))
}

pub async fn create_todo_list(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<TodoListCreate>,
) -> Result<Json<TodoList>, Failure> {
    let mut store = db.write().await;
    let owner = authenticate(&store, &headers)?;
    if store
        .lists
        .iter()
        .any(|r| r.list.todo_list_id == input.todo_list_id)
    {
        return Err(Failure::message(
            StatusCode::CONFLICT,
            format!(
                "Todo list resource already exists with id '{}'",
                input.todo_list_id
            ),
        ));
    }
    let list = TodoList {
        todo_list_id: input.todo_list_id,
        list_name: input.list_name,
        date_created: Utc::now(),
        date_modified: None,
    };
    store.lists.push(ListRecord {
        owner,
        list: list.clone(),
    });
    Ok(Json(list))
}

pub async fn update_todo_list(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(input): Json<TodoListUpdate>,
) -> Result<Json<TodoList>, Failure> {
    let mut store = db.write().await;
    let owner = authenticate(&store, &headers)?;
    let record = store
        .lists
        .iter_mut()
        .find(|r| r.owner == owner && r.list.todo_list_id == id)
        .ok_or_else(|| list_not_found(id))?;
    record.list.list_name = input.list_name;
    record.list.date_modified = Some(Utc::now());
    Ok(Json(record.list.clone()))
}

/// Removes the list and every todo in it.
pub async fn delete_todo_list(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<TodoList>, Failure> {
    let mut store = db.write().await;
    let owner = authenticate(&store, &headers)?;
    let index = store
        .lists
        .iter()
        .position(|r| r.owner == owner && r.list.todo_list_id == id)
        .ok_or_else(|| list_not_found(id))?;
    store
        .todos
        .retain(|r| !(r.owner == owner && r.todo.todo_list_id == id));
    let removed = store.lists.remove(index);
    Ok(Json(removed.list))
}

pub async fn list_todos(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(filter): Query<TaskFilter>,
) -> Result<Json<Vec<Todo>>, Failure> {
    let store = db.read().await;
    let owner = authenticate(&store, &headers)?;
    Ok(Json(
        store
            .todos
            .iter()
            .filter(|r| r.owner == owner)
            .filter(|r| filter.todo_list_id.map_or(true, |id| r.todo.todo_list_id == id))
            .filter(|r| !(filter.incomplete_only && r.todo.completed))
            .map(|r| r.todo.clone())
            .collect(),
    ))
}

pub async fn create_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<TodoCreate>,
) -> Result<Json<Todo>, Failure> {
    let mut store = db.write().await;
    let owner = authenticate(&store, &headers)?;
    ensure_list(&store, &owner, input.todo_list_id)?;
    if store.todos.iter().any(|r| r.todo.todo_id == input.todo_id) {
        return Err(Failure::message(
            StatusCode::CONFLICT,
            format!("Todo resource already exists with id '{}'", input.todo_id),
        ));
    }
    let todo = Todo {
        todo_id: input.todo_id,
        todo_list_id: input.todo_list_id,
        description: input.description,
        completed: input.completed,
        date_created: Utc::now(),
        date_modified: None,
    };
    store.todos.push(TodoRecord {
        owner,
        todo: todo.clone(),
    });
    Ok(Json(todo))
}

pub async fn update_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(input): Json<TodoUpdate>,
) -> Result<Json<Todo>, Failure> {
    let mut store = db.write().await;
    let owner = authenticate(&store, &headers)?;
    if !store
        .todos
        .iter()
        .any(|r| r.owner == owner && r.todo.todo_id == id)
    {
        return Err(todo_not_found(id));
    }
    if let Some(list_id) = input.todo_list_id {
        ensure_list(&store, &owner, list_id)?;
    }

    let record = store
        .todos
        .iter_mut()
        .find(|r| r.owner == owner && r.todo.todo_id == id)
        .ok_or_else(|| todo_not_found(id))?;
    if let Some(list_id) = input.todo_list_id {
        record.todo.todo_list_id = list_id;
    }
    if let Some(description) = input.description.filter(|d| !d.is_empty()) {
        record.todo.description = description;
    }
    if let Some(completed) = input.completed {
        record.todo.completed = completed;
    }
    record.todo.date_modified = Some(Utc::now());
    Ok(Json(record.todo.clone()))
}

pub async fn delete_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, Failure> {
    let mut store = db.write().await;
    let owner = authenticate(&store, &headers)?;
    let index = store
        .todos
        .iter()
        .position(|r| r.owner == owner && r.todo.todo_id == id)
        .ok_or_else(|| todo_not_found(id))?;
    Ok(Json(store.todos.remove(index).todo))
}
