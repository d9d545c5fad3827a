use crate::error::ApiError;
use crate::models::DataResponse;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use todos::Todo;
use tracing::info;

/// GET /api/todos
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Todo>>>, ApiError> {
    info!("GET: todos");

    let todos = state.todos.list_todos().await?;
    Ok(Json(DataResponse::new(todos)))
}

/// GET /api/todos/:id
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Todo>>, ApiError> {
    info!("GET: todo id={}", id);

    let todo = state.todos.get_todo(&id).await?;
    Ok(Json(DataResponse::new(todo)))
}
