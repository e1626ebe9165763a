use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Todo, TodoInput, TodoPatch},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// All todos owned by the caller, newest first. An empty list is a normal
/// answer, not an error.
#[get("")]
pub async fn list_todos(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let todos = sqlx::query_as::<_, Todo>(
        "SELECT id, title, description, completed, user_id, created_at, updated_at
         FROM todos WHERE user_id = $1
         ORDER BY created_at DESC",
    )
    .bind(user.0.id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": todos,
    })))
}

/// Create a todo owned by the caller. Title and description are stored
/// trimmed; `completed` and the timestamps are set by the store.
#[post("")]
pub async fn create_todo(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    payload: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let todo = sqlx::query_as::<_, Todo>(
        "INSERT INTO todos (id, title, description, user_id)
         VALUES ($1, $2, $3, $4)
         RETURNING id, title, description, completed, user_id, created_at, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(payload.title.trim())
    .bind(payload.description.as_deref().map(str::trim))
    .bind(user.0.id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": todo,
    })))
}

/// Partial update of an owned todo.
///
/// One statement, scoped to `id AND user_id`: `COALESCE` keeps absent
/// fields at their stored values and `updated_at` is bumped. Zero rows
/// means the todo does not exist or belongs to someone else; both look the
/// same to the caller.
#[put("/{id}")]
pub async fn update_todo(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    todo_id: web::Path<Uuid>,
    payload: web::Json<TodoPatch>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let todo = sqlx::query_as::<_, Todo>(
        "UPDATE todos
         SET title = COALESCE($1, title),
             description = COALESCE($2, description),
             completed = COALESCE($3, completed),
             updated_at = now()
         WHERE id = $4 AND user_id = $5
         RETURNING id, title, description, completed, user_id, created_at, updated_at",
    )
    .bind(payload.title.as_deref().map(str::trim))
    .bind(payload.description.as_deref().map(str::trim))
    .bind(payload.completed)
    .bind(todo_id.into_inner())
    .bind(user.0.id)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Todo not found".into()))?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": todo,
    })))
}

/// Delete an owned todo: a single find-and-remove scoped to the owner.
#[delete("/{id}")]
pub async fn delete_todo(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
        .bind(todo_id.into_inner())
        .bind(user.0.id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Todo not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Todo deleted successfully",
    })))
}
