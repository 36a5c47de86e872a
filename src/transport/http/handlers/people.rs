//! Actor and producer endpoints.
//!
//! Both collections share one record shape and one set of behaviors, so a
//! single implementation serves them, parameterized by [`PersonRole`]. Note
//! the deliberate asymmetry with movies: deleting a person does NOT clean up
//! movie records that reference it — those references go dangling and stop
//! resolving in expanded reads.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::domain::catalog::{Person, PersonDetail, PersonPayload, PersonRole};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, MessageResponse, ValidationErrorResponse};

async fn list_people(
    state: AppState,
    role: PersonRole,
) -> Result<Json<Vec<PersonDetail>>, ApiError> {
    let people = state
        .catalog
        .list_people(role)
        .await
        .map_err(ApiError::from_read)?;
    Ok(Json(people))
}

async fn get_person(
    state: AppState,
    role: PersonRole,
    id: Uuid,
) -> Result<Json<PersonDetail>, ApiError> {
    let person = state
        .catalog
        .get_person(role, id)
        .await
        .map_err(ApiError::from_read)?;
    Ok(Json(person))
}

async fn create_person(
    state: AppState,
    role: PersonRole,
    request: Result<Json<PersonPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Person>), ApiError> {
    let Json(payload) = request.map_err(|err| ApiError::bad_body(err))?;
    let person = state
        .catalog
        .create_person(role, &payload)
        .await
        .map_err(ApiError::from_write)?;
    Ok((StatusCode::CREATED, Json(person)))
}

async fn update_person(
    state: AppState,
    role: PersonRole,
    id: Uuid,
    request: Result<Json<PersonPayload>, JsonRejection>,
) -> Result<Json<Person>, ApiError> {
    let Json(payload) = request.map_err(|err| ApiError::bad_body(err))?;
    let person = state
        .catalog
        .update_person(role, id, &payload)
        .await
        .map_err(ApiError::from_write)?;
    Ok(Json(person))
}

async fn delete_person(
    state: AppState,
    role: PersonRole,
    id: Uuid,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .catalog
        .delete_person(role, id)
        .await
        .map_err(ApiError::from_read)?;
    Ok(Json(MessageResponse::new(format!(
        "{} deleted successfully",
        role.entity_name()
    ))))
}

#[utoipa::path(
    get,
    path = "/api/actors",
    responses(
        (status = 200, description = "All actors, movies expanded to name and release year", body = Vec<PersonDetail>),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn list_actors_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<PersonDetail>>, ApiError> {
    list_people(state, PersonRole::Actor).await
}

#[utoipa::path(
    get,
    path = "/api/actors/{id}",
    params(("id" = Uuid, Path, description = "Actor id")),
    responses(
        (status = 200, description = "Actor with movies expanded", body = PersonDetail),
        (status = 404, description = "No actor with that id", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn get_actor_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PersonDetail>, ApiError> {
    get_person(state, PersonRole::Actor, id).await
}

#[utoipa::path(
    post,
    path = "/api/actors",
    request_body = PersonPayload,
    responses(
        (status = 201, description = "Actor created with an empty movies list", body = Person),
        (status = 400, description = "Validation or storage failure", body = ValidationErrorResponse)
    )
)]
pub async fn create_actor_handler(
    State(state): State<AppState>,
    request: Result<Json<PersonPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Person>), ApiError> {
    create_person(state, PersonRole::Actor, request).await
}

#[utoipa::path(
    put,
    path = "/api/actors/{id}",
    params(("id" = Uuid, Path, description = "Actor id")),
    request_body = PersonPayload,
    responses(
        (status = 200, description = "Updated actor (movies list untouched)", body = Person),
        (status = 404, description = "No actor with that id", body = MessageResponse),
        (status = 400, description = "Validation or storage failure", body = ValidationErrorResponse)
    )
)]
pub async fn update_actor_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Result<Json<PersonPayload>, JsonRejection>,
) -> Result<Json<Person>, ApiError> {
    update_person(state, PersonRole::Actor, id, request).await
}

#[utoipa::path(
    delete,
    path = "/api/actors/{id}",
    params(("id" = Uuid, Path, description = "Actor id")),
    responses(
        (status = 200, description = "Actor deleted; movie references are left dangling", body = MessageResponse),
        (status = 404, description = "No actor with that id", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn delete_actor_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    delete_person(state, PersonRole::Actor, id).await
}

#[utoipa::path(
    get,
    path = "/api/producers",
    responses(
        (status = 200, description = "All producers, movies expanded to name and release year", body = Vec<PersonDetail>),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn list_producers_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<PersonDetail>>, ApiError> {
    list_people(state, PersonRole::Producer).await
}

#[utoipa::path(
    get,
    path = "/api/producers/{id}",
    params(("id" = Uuid, Path, description = "Producer id")),
    responses(
        (status = 200, description = "Producer with movies expanded", body = PersonDetail),
        (status = 404, description = "No producer with that id", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn get_producer_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PersonDetail>, ApiError> {
    get_person(state, PersonRole::Producer, id).await
}

#[utoipa::path(
    post,
    path = "/api/producers",
    request_body = PersonPayload,
    responses(
        (status = 201, description = "Producer created with an empty movies list", body = Person),
        (status = 400, description = "Validation or storage failure", body = ValidationErrorResponse)
    )
)]
pub async fn create_producer_handler(
    State(state): State<AppState>,
    request: Result<Json<PersonPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Person>), ApiError> {
    create_person(state, PersonRole::Producer, request).await
}

#[utoipa::path(
    put,
    path = "/api/producers/{id}",
    params(("id" = Uuid, Path, description = "Producer id")),
    request_body = PersonPayload,
    responses(
        (status = 200, description = "Updated producer (movies list untouched)", body = Person),
        (status = 404, description = "No producer with that id", body = MessageResponse),
        (status = 400, description = "Validation or storage failure", body = ValidationErrorResponse)
    )
)]
pub async fn update_producer_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Result<Json<PersonPayload>, JsonRejection>,
) -> Result<Json<Person>, ApiError> {
    update_person(state, PersonRole::Producer, id, request).await
}

#[utoipa::path(
    delete,
    path = "/api/producers/{id}",
    params(("id" = Uuid, Path, description = "Producer id")),
    responses(
        (status = 200, description = "Producer deleted; movie references are left dangling", body = MessageResponse),
        (status = 404, description = "No producer with that id", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn delete_producer_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    delete_person(state, PersonRole::Producer, id).await
}
