use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    Pagination, PaginationQuery, UuidPath, ValidatedJson,
    ErrorResponse,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::{OpenApi, ToResponse};

use crate::error::UserResult;
use crate::models::{
    CreateUser, MessageResponse, UpdateUser, UserEnvelope, UserListResponse, UserResponse,
};
use crate::service::UserOperations;

pub const TAG: &str = "users";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(
        schemas(
            UserResponse,
            CreateUser,
            UpdateUser,
            UserEnvelope,
            UserListResponse,
            MessageResponse
        ),
        responses(
            UserNotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UserExistsResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

#[derive(ToResponse)]
#[response(
    description = "No active user has this id",
    content_type = "application/json",
    example = json!({
        "error": "user_not_found",
        "message": "User not found"
    })
)]
pub struct UserNotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Another active user already has this email",
    content_type = "application/json",
    example = json!({
        "error": "user_exists",
        "message": "User with this email already exists"
    })
)]
pub struct UserExistsResponse(pub ErrorResponse);

/// Create the users router with all HTTP endpoints
pub fn router<S: UserOperations>(service: S) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users::<S>).post(create_user::<S>))
        .route(
            "/{id}",
            get(get_user::<S>)
                .put(update_user::<S>)
                .delete(delete_user::<S>),
        )
        .with_state(shared_service)
}

/// List active users, oldest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of users", body = UserListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<S: UserOperations>(
    State(service): State<Arc<S>>,
    pagination: Pagination,
) -> UserResult<Json<UserListResponse>> {
    let page = service.list(pagination.page, pagination.per_page).await?;
    Ok(Json(page))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully", body = UserEnvelope),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = UserExistsResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<S: UserOperations>(
    State(service): State<Arc<S>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope::new(user).with_message("User created successfully")),
    ))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserEnvelope),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = UserNotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<S: UserOperations>(
    State(service): State<Arc<S>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserEnvelope>> {
    let user = service.get(id).await?;
    Ok(Json(UserEnvelope::new(user)))
}

/// Partially update a user
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = UserEnvelope),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = UserNotFoundResponse),
        (status = 409, response = UserExistsResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<S: UserOperations>(
    State(service): State<Arc<S>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UserEnvelope>> {
    let user = service.update(id, input).await?;
    Ok(Json(
        UserEnvelope::new(user).with_message("User updated successfully"),
    ))
}

/// Soft-delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = UserNotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<S: UserOperations>(
    State(service): State<Arc<S>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<MessageResponse>> {
    service.delete(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
