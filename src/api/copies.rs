//! Book copy (instance) endpoints, including the borrower's loan view

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::book_instance::{BookInstanceDetails, CreateBookInstance, UpdateBookInstance},
};

use super::AuthenticatedUser;

/// List all copies, ordered by due date
#[utoipa::path(
    get,
    path = "/copies",
    tag = "copies",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of copies", body = Vec<BookInstanceDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_copies(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BookInstanceDetails>>> {
    let copies = state.services.circulation.list_copies().await?;
    Ok(Json(copies))
}

/// Get copy details by ID
#[utoipa::path(
    get,
    path = "/copies/{id}",
    tag = "copies",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Copy details", body = BookInstanceDetails),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_copy(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookInstanceDetails>> {
    let copy = state.services.circulation.get_copy(id).await?;
    Ok(Json(copy))
}

/// Copies on loan to the current caller, ascending by due date
#[utoipa::path(
    get,
    path = "/my/loans",
    tag = "copies",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Copies borrowed by the caller", body = Vec<BookInstanceDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_my_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BookInstanceDetails>>> {
    let copies = state
        .services
        .circulation
        .borrowed_by(claims.user_id)
        .await?;
    Ok(Json(copies))
}

/// Create a new copy
#[utoipa::path(
    post,
    path = "/copies",
    tag = "copies",
    security(("bearer_auth" = [])),
    request_body = CreateBookInstance,
    responses(
        (status = 201, description = "Copy created", body = BookInstanceDetails),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn create_copy(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateBookInstance>,
) -> AppResult<(StatusCode, Json<BookInstanceDetails>)> {
    claims.require_staff()?;
    data.validate()?;

    let created = state.services.circulation.create_copy(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing copy
#[utoipa::path(
    put,
    path = "/copies/{id}",
    tag = "copies",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    request_body = UpdateBookInstance,
    responses(
        (status = 200, description = "Copy updated", body = BookInstanceDetails),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn update_copy(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateBookInstance>,
) -> AppResult<Json<BookInstanceDetails>> {
    claims.require_staff()?;
    data.validate()?;

    let updated = state.services.circulation.update_copy(id, data).await?;
    Ok(Json(updated))
}

/// Mark a copy returned: available again, due date and borrower cleared
#[utoipa::path(
    post,
    path = "/copies/{id}/return",
    tag = "copies",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Copy returned", body = BookInstanceDetails),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn return_copy(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookInstanceDetails>> {
    claims.require_staff()?;

    let returned = state.services.circulation.mark_returned(id).await?;
    Ok(Json(returned))
}

/// Delete a copy
#[utoipa::path(
    delete,
    path = "/copies/{id}",
    tag = "copies",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    responses(
        (status = 204, description = "Copy deleted"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn delete_copy(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;

    state.services.circulation.delete_copy(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
