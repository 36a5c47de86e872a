//! Movie endpoints.
//!
//! The write handlers here are the only place in the API where one request
//! mutates more than one record: the service reconciles the derived
//! `movies` lists on producers and actors after every movie write.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::domain::catalog::{Movie, MovieDetail, MoviePayload};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, MessageResponse, ValidationErrorResponse};

#[utoipa::path(
    get,
    path = "/api/movies",
    responses(
        (status = 200, description = "All movies, references expanded to names", body = Vec<MovieDetail>),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn list_movies_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<MovieDetail>>, ApiError> {
    let movies = state.catalog.list_movies().await.map_err(ApiError::from_read)?;
    Ok(Json(movies))
}

#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    params(("id" = Uuid, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie with references expanded", body = MovieDetail),
        (status = 404, description = "No movie with that id", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn get_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MovieDetail>, ApiError> {
    let movie = state.catalog.get_movie(id).await.map_err(ApiError::from_read)?;
    Ok(Json(movie))
}

#[utoipa::path(
    post,
    path = "/api/movies",
    request_body = MoviePayload,
    responses(
        (status = 201, description = "Movie created and registered with its producer and actors", body = Movie),
        (status = 400, description = "Validation or storage failure", body = ValidationErrorResponse)
    )
)]
pub async fn create_movie_handler(
    State(state): State<AppState>,
    request: Result<Json<MoviePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let Json(payload) = request.map_err(|err| ApiError::bad_body(err))?;
    let movie = state
        .catalog
        .create_movie(&payload)
        .await
        .map_err(ApiError::from_write)?;
    Ok((StatusCode::CREATED, Json(movie)))
}

#[utoipa::path(
    put,
    path = "/api/movies/{id}",
    params(("id" = Uuid, Path, description = "Movie id")),
    request_body = MoviePayload,
    responses(
        (status = 200, description = "Updated movie with references expanded", body = MovieDetail),
        (status = 404, description = "No movie with that id", body = MessageResponse),
        (status = 400, description = "Validation or storage failure", body = ValidationErrorResponse)
    )
)]
pub async fn update_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Result<Json<MoviePayload>, JsonRejection>,
) -> Result<Json<MovieDetail>, ApiError> {
    let Json(payload) = request.map_err(|err| ApiError::bad_body(err))?;
    let movie = state
        .catalog
        .update_movie(id, &payload)
        .await
        .map_err(ApiError::from_write)?;
    Ok(Json(movie))
}

#[utoipa::path(
    delete,
    path = "/api/movies/{id}",
    params(("id" = Uuid, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie deleted and withdrawn from all derived lists", body = MessageResponse),
        (status = 404, description = "No movie with that id", body = MessageResponse),
        (status = 400, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn delete_movie_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .catalog
        .delete_movie(id)
        .await
        .map_err(ApiError::from_write)?;
    Ok(Json(MessageResponse::new("Movie deleted successfully")))
}
