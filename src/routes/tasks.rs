use crate::{
    error::AppError,
    models::{Task, TaskInput, TaskUpdate},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use log::info;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const TASK_COLUMNS: &str =
    "id, title, description, creation_date, ending_date, actual_end_date, priority";

async fn find_task(pool: &PgPool, id: Uuid) -> Result<Task, AppError> {
    sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1",
        TASK_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Task with {} does not exist.", id)))
}

/// Retrieves all tasks, newest first.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[get("")]
pub async fn get_tasks(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks ORDER BY creation_date DESC",
        TASK_COLUMNS
    ))
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task.
///
/// ## Request Body:
/// A JSON object matching the `TaskInput` struct, including:
/// - `title`: The title of the task (required).
/// - `description` (optional): A description of the task.
/// - `creation_date`: When the task was created (required, ISO 8601).
/// - `ending_date` (optional): The planned end date.
/// - `actual_end_date` (optional): When the task actually ended.
/// - `priority`: One of "low", "normal", "urgent".
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `422 Unprocessable Entity`: If input validation on `TaskInput` fails (e.g., empty title).
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = Task::new(task_data.into_inner());

    let result = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (id, title, description, creation_date, ending_date, actual_end_date, priority) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.creation_date)
    .bind(task.ending_date)
    .bind(task.actual_end_date)
    .bind(&task.priority)
    .fetch_one(&**pool)
    .await?;

    info!("Task with \"{}\" title was created.", result.title);

    Ok(HttpResponse::Created().json(result))
}

/// Retrieves a specific task by its ID.
///
/// ## Path Parameters:
/// - `id`: The UUID of the task to retrieve.
///
/// ## Responses:
/// - `200 OK`: Returns the `Task` object as JSON if found.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task with the given ID does not exist.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = find_task(&pool, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates an existing task.
///
/// Fields absent from the payload keep their stored value; the task is loaded,
/// merged with the payload, and written back.
///
/// ## Path Parameters:
/// - `id`: The UUID of the task to update.
///
/// ## Request Body:
/// A JSON object matching the `TaskUpdate` struct: any of `title`,
/// `description`, `ending_date`, `actual_end_date`, `priority`.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task with the given ID does not exist.
/// - `422 Unprocessable Entity`: If input validation on `TaskUpdate` fails.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[patch("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let task_uuid = task_id.into_inner();

    let mut task = find_task(&pool, task_uuid).await?;
    task.apply(task_data.into_inner());

    let result = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks \
         SET title = $1, description = $2, ending_date = $3, actual_end_date = $4, priority = $5 \
         WHERE id = $6 \
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.ending_date)
    .bind(task.actual_end_date)
    .bind(&task.priority)
    .bind(task_uuid)
    .fetch_one(&**pool)
    .await?;

    info!("Task with {} id was updated.", result.id);

    Ok(HttpResponse::Ok().json(result))
}

/// Deletes a task by its ID and returns the removed entity.
///
/// ## Path Parameters:
/// - `id`: The UUID of the task to delete.
///
/// ## Responses:
/// - `200 OK`: Returns the removed `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task with the given ID does not exist.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task_uuid = task_id.into_inner();

    let task = find_task(&pool, task_uuid).await?;

    sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task_uuid)
        .execute(&**pool)
        .await?;

    info!("Task with {} id was removed.", task.id);

    Ok(HttpResponse::Ok().json(task))
}
