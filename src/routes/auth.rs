use crate::{
    auth::{
        extractors::AuthenticatedUser, generate_token, hash_password, verify_password,
        AuthResponse, ChangePasswordRequest, CredentialsRequest, DeleteAccountRequest,
        MessageResponse,
    },
    error::AppError,
    models::User,
};
use actix_web::{delete, patch, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Fetches a user by id and checks the supplied password against the stored
/// `salt.hash` value. Shared by the password-update and account-deletion flows.
async fn validate_user_by_id(
    pool: &PgPool,
    user_id: Uuid,
    password: &str,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password, created_at, updated_at FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User with such id does not exist.".into()))?;

    if !verify_password(password, &user.password)? {
        return Err(AppError::Unauthorized("Wrong password.".into()));
    }

    Ok(user)
}

/// Register a new user
///
/// Creates a new user account and returns a bearer token.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    credentials: web::Json<CredentialsRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    credentials.validate()?;

    // Check if email already exists
    let existing_user: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(&credentials.email)
            .fetch_optional(&**pool)
            .await?;

    if existing_user.is_some() {
        return Err(AppError::Conflict(
            "User with such email already exist.".into(),
        ));
    }

    // Hash password as salt.hash
    let password = hash_password(&credentials.password)?;

    // Insert new user
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, password) VALUES ($1, $2, $3) \
         RETURNING id, email, password, created_at, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(&credentials.email)
    .bind(&password)
    .fetch_one(&**pool)
    .await?;

    // Generate token
    let access_token = generate_token(user.id, &user.email)?;

    Ok(HttpResponse::Created().json(AuthResponse { access_token }))
}

/// Login user
///
/// Authenticates a user and returns a bearer token.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    credentials: web::Json<CredentialsRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    credentials.validate()?;

    // Get user from database
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password, created_at, updated_at FROM users WHERE email = $1",
    )
    .bind(&credentials.email)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User with such email does not exist.".into()))?;

    // Verify password
    if !verify_password(&credentials.password, &user.password)? {
        return Err(AppError::Unauthorized("Wrong password.".into()));
    }

    let access_token = generate_token(user.id, &user.email)?;

    Ok(HttpResponse::Ok().json(AuthResponse { access_token }))
}

/// Update the authenticated user's password
///
/// Verifies the current password, stores a freshly salted hash of the new one,
/// and returns a new bearer token.
#[patch("/me")]
pub async fn change_password(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    validate_user_by_id(&pool, auth.user_id, &payload.password).await?;

    let password = hash_password(&payload.new_password)?;

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET password = $1, updated_at = now() WHERE id = $2 \
         RETURNING id, email, password, created_at, updated_at",
    )
    .bind(&password)
    .bind(auth.user_id)
    .fetch_one(&**pool)
    .await?;

    let access_token = generate_token(user.id, &user.email)?;

    Ok(HttpResponse::Ok().json(AuthResponse { access_token }))
}

/// Delete the authenticated user's account
///
/// The current password is required as confirmation.
#[delete("/me")]
pub async fn delete_account(
    pool: web::Data<PgPool>,
    auth: AuthenticatedUser,
    payload: web::Json<DeleteAccountRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    validate_user_by_id(&pool, auth.user_id, &payload.password).await?;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(auth.user_id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User deleted successfully.".into(),
    }))
}
