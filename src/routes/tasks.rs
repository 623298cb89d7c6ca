use crate::{
    auth::AuthUser,
    error::ApiError,
    models::{Task, TaskPayload},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

const TASK_COLUMNS: &str = "id, title, description, status, user_id, created_at, updated_at";

/// Lists the authenticated user's tasks, newest first.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    user: AuthUser,
) -> Result<impl Responder, ApiError> {
    let sql =
        format!("SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC");
    let tasks = sqlx::query_as::<_, Task>(&sql)
        .bind(user.id())
        .fetch_all(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the authenticated user.
///
/// The status defaults to `PENDING` when omitted.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    user: AuthUser,
    payload: web::Json<TaskPayload>,
) -> Result<impl Responder, ApiError> {
    let task = payload.validated()?;

    let sql = format!(
        "INSERT INTO tasks (title, description, status, user_id) \
         VALUES ($1, $2, $3, $4) RETURNING {TASK_COLUMNS}"
    );
    let created = sqlx::query_as::<_, Task>(&sql)
        .bind(task.title)
        .bind(task.description)
        .bind(task.status)
        .bind(user.id())
        .fetch_one(&**pool)
        .await?;

    Ok(HttpResponse::Created().json(created))
}

/// Updates a task owned by the authenticated user.
///
/// The statement filters by task id AND owner in one go: a task owned by
/// someone else updates zero rows and reads as 404, exactly like a task
/// that does not exist.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    user: AuthUser,
    task_id: web::Path<i32>,
    payload: web::Json<TaskPayload>,
) -> Result<impl Responder, ApiError> {
    let task = payload.validated()?;

    let sql = format!(
        "UPDATE tasks SET title = $1, description = $2, status = $3, updated_at = NOW() \
         WHERE id = $4 AND user_id = $5 RETURNING {TASK_COLUMNS}"
    );
    let updated = sqlx::query_as::<_, Task>(&sql)
        .bind(task.title)
        .bind(task.description)
        .bind(task.status)
        .bind(task_id.into_inner())
        .bind(user.id())
        .fetch_optional(&**pool)
        .await?;

    match updated {
        Some(updated) => Ok(HttpResponse::Ok().json(updated)),
        None => Err(ApiError::NotFound("Task not found".into())),
    }
}

/// Deletes a task owned by the authenticated user.
///
/// Same ownership-as-filter rule as updates: zero rows affected is a 404.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    user: AuthUser,
    task_id: web::Path<i32>,
) -> Result<impl Responder, ApiError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id.into_inner())
        .bind(user.id())
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted successfully"
    })))
}
