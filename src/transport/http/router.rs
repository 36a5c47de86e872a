use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use utoipa::OpenApi;

use crate::domain::catalog::validation::FieldError;
use crate::domain::catalog::{
    Gender, Movie, MovieDetail, MoviePayload, MovieRef, Person, PersonDetail, PersonPayload,
    PersonRef,
};
use crate::infra::config::MAX_UPLOAD_BYTES;
use crate::transport::http::handlers::{health, movies, people, upload};
use crate::transport::http::types::{
    AppState, HealthResponse, MessageResponse, UploadResponse, ValidationErrorResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        movies::list_movies_handler,
        movies::get_movie_handler,
        movies::create_movie_handler,
        movies::update_movie_handler,
        movies::delete_movie_handler,
        people::list_actors_handler,
        people::get_actor_handler,
        people::create_actor_handler,
        people::update_actor_handler,
        people::delete_actor_handler,
        people::list_producers_handler,
        people::get_producer_handler,
        people::create_producer_handler,
        people::update_producer_handler,
        people::delete_producer_handler,
        upload::upload_poster_handler
    ),
    components(schemas(
        Movie,
        MovieDetail,
        MoviePayload,
        MovieRef,
        Person,
        PersonDetail,
        PersonPayload,
        PersonRef,
        Gender,
        FieldError,
        MessageResponse,
        UploadResponse,
        ValidationErrorResponse,
        HealthResponse
    ))
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.upload_dir.clone());

    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/movies",
            get(movies::list_movies_handler).post(movies::create_movie_handler),
        )
        .route(
            "/api/movies/:id",
            get(movies::get_movie_handler)
                .put(movies::update_movie_handler)
                .delete(movies::delete_movie_handler),
        )
        .route(
            "/api/actors",
            get(people::list_actors_handler).post(people::create_actor_handler),
        )
        .route(
            "/api/actors/:id",
            get(people::get_actor_handler)
                .put(people::update_actor_handler)
                .delete(people::delete_actor_handler),
        )
        .route(
            "/api/producers",
            get(people::list_producers_handler).post(people::create_producer_handler),
        )
        .route(
            "/api/producers/:id",
            get(people::get_producer_handler)
                .put(people::update_producer_handler)
                .delete(people::delete_producer_handler),
        )
        .route(
            "/api/upload",
            post(upload::upload_poster_handler)
                // Headroom over the file cap for multipart framing; the
                // handler enforces the exact byte limit.
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024)),
        )
        .nest_service("/uploads", uploads)
        .with_state(state)
}
