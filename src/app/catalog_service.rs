//! The catalog service.
//!
//! This module sits between the HTTP transport and the store. For every
//! write it validates the payload first (no storage call happens on a
//! validation failure), persists the owning movie record, then applies the
//! computed [`BackRefPlan`] to the derived lists on the person collections.
//!
//! The back-reference writes are independent of each other and of the movie
//! write: there is no surrounding transaction, nothing is rolled back, and a
//! failure part-way leaves the earlier writes in place with the error
//! surfaced to the caller. Concurrent requests against the same records race
//! with last-write-wins per record.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::catalog::validation::{self, FieldError};
use crate::domain::catalog::{
    BackRefPlan, Movie, MovieDetail, MoviePayload, MovieRef, Person, PersonDetail, PersonPayload,
    PersonRef, PersonRole,
};
use crate::storage::{CatalogStore, StoreError};

#[derive(Debug, Error)]
pub enum CatalogError {
    /// One or more fields failed validation; all failures are carried.
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    /// The addressed record does not exist. Carries the entity name for the
    /// API message.
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        CatalogService { store }
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    // --- movies ---

    pub async fn list_movies(&self) -> Result<Vec<MovieDetail>, CatalogError> {
        let movies = self.store.list_movies().await?;
        self.expand_movies(movies).await
    }

    pub async fn get_movie(&self, id: Uuid) -> Result<MovieDetail, CatalogError> {
        let movie = self
            .store
            .get_movie(id)
            .await?
            .ok_or(CatalogError::NotFound("Movie"))?;
        let mut expanded = self.expand_movies(vec![movie]).await?;
        expanded.pop().ok_or(CatalogError::NotFound("Movie"))
    }

    /// Persists a new movie and registers it with its producer and actors.
    /// The two back-reference writes go out concurrently; each is its own
    /// failure domain.
    pub async fn create_movie(&self, payload: &MoviePayload) -> Result<Movie, CatalogError> {
        let input = validation::validate_new_movie(payload).map_err(CatalogError::Validation)?;
        let movie = Movie::new(input);
        self.store.insert_movie(&movie).await?;

        let plan = BackRefPlan::for_create(&movie);
        self.apply_back_refs(&plan, movie.id).await?;

        Ok(movie)
    }

    /// Applies a partial update and reconciles the derived lists: a producer
    /// swap moves the id between the two producers, an actors change touches
    /// only the actors entering or leaving the list.
    pub async fn update_movie(
        &self,
        id: Uuid,
        payload: &MoviePayload,
    ) -> Result<MovieDetail, CatalogError> {
        let existing = self
            .store
            .get_movie(id)
            .await?
            .ok_or(CatalogError::NotFound("Movie"))?;

        let updated =
            validation::merge_movie_patch(&existing, payload).map_err(CatalogError::Validation)?;
        self.store.replace_movie(&updated).await?;

        let plan = BackRefPlan::for_update(&existing, &updated);
        self.apply_back_refs(&plan, updated.id).await?;

        let mut expanded = self.expand_movies(vec![updated]).await?;
        expanded.pop().ok_or(CatalogError::NotFound("Movie"))
    }

    /// Withdraws the movie from every derived list, then deletes the record.
    pub async fn delete_movie(&self, id: Uuid) -> Result<(), CatalogError> {
        let movie = self
            .store
            .get_movie(id)
            .await?
            .ok_or(CatalogError::NotFound("Movie"))?;

        let plan = BackRefPlan::for_delete(&movie);
        self.apply_back_refs(&plan, movie.id).await?;

        self.store.delete_movie(id).await?;
        Ok(())
    }

    // --- actors / producers ---

    pub async fn list_people(&self, role: PersonRole) -> Result<Vec<PersonDetail>, CatalogError> {
        let people = self.store.list_people(role).await?;
        self.expand_people(people).await
    }

    pub async fn get_person(
        &self,
        role: PersonRole,
        id: Uuid,
    ) -> Result<PersonDetail, CatalogError> {
        let person = self
            .store
            .get_person(role, id)
            .await?
            .ok_or(CatalogError::NotFound(role.entity_name()))?;
        let mut expanded = self.expand_people(vec![person]).await?;
        expanded.pop().ok_or(CatalogError::NotFound(role.entity_name()))
    }

    pub async fn create_person(
        &self,
        role: PersonRole,
        payload: &PersonPayload,
    ) -> Result<Person, CatalogError> {
        let input = validation::validate_new_person(payload).map_err(CatalogError::Validation)?;
        let person = Person::new(input);
        self.store.insert_person(role, &person).await?;
        Ok(person)
    }

    pub async fn update_person(
        &self,
        role: PersonRole,
        id: Uuid,
        payload: &PersonPayload,
    ) -> Result<Person, CatalogError> {
        let existing = self
            .store
            .get_person(role, id)
            .await?
            .ok_or(CatalogError::NotFound(role.entity_name()))?;

        let updated =
            validation::merge_person_patch(&existing, payload).map_err(CatalogError::Validation)?;
        self.store.replace_person(role, &updated).await?;
        Ok(updated)
    }

    /// Deletes the person record only. Movies referencing it keep their
    /// (now dangling) reference; expanded reads simply stop resolving it.
    pub async fn delete_person(&self, role: PersonRole, id: Uuid) -> Result<(), CatalogError> {
        let deleted = self.store.delete_person(role, id).await?;
        if !deleted {
            return Err(CatalogError::NotFound(role.entity_name()));
        }
        Ok(())
    }

    // --- internals ---

    /// Applies a back-reference plan: removals first, then additions, each
    /// phase hitting the producer and actor collections concurrently. All
    /// targets within a phase are distinct records, so the writes never
    /// contend.
    async fn apply_back_refs(&self, plan: &BackRefPlan, movie_id: Uuid) -> Result<(), StoreError> {
        let producer_removes: Vec<Uuid> = plan.producer_remove.into_iter().collect();
        let producer_adds: Vec<Uuid> = plan.producer_add.into_iter().collect();

        let (producers, actors) = tokio::join!(
            self.store
                .remove_movie_ref(PersonRole::Producer, &producer_removes, movie_id),
            self.store
                .remove_movie_ref(PersonRole::Actor, &plan.actor_removes, movie_id),
        );
        producers?;
        actors?;

        let (producers, actors) = tokio::join!(
            self.store
                .add_movie_ref(PersonRole::Producer, &producer_adds, movie_id),
            self.store
                .add_movie_ref(PersonRole::Actor, &plan.actor_adds, movie_id),
        );
        producers?;
        actors?;

        Ok(())
    }

    /// Expands producer/actor references to `{id, name}`, one bulk lookup
    /// per collection. References whose target is gone expand to null (for
    /// the producer) or drop out of the list (for actors).
    async fn expand_movies(&self, movies: Vec<Movie>) -> Result<Vec<MovieDetail>, CatalogError> {
        let mut producer_ids: Vec<Uuid> = movies.iter().map(|m| m.producer).collect();
        producer_ids.sort_unstable();
        producer_ids.dedup();

        let mut actor_ids: Vec<Uuid> =
            movies.iter().flat_map(|m| m.actors.iter().copied()).collect();
        actor_ids.sort_unstable();
        actor_ids.dedup();

        let (producers, actors) = tokio::join!(
            self.store.get_people_by_ids(PersonRole::Producer, &producer_ids),
            self.store.get_people_by_ids(PersonRole::Actor, &actor_ids),
        );
        let producers: HashMap<Uuid, String> =
            producers?.into_iter().map(|p| (p.id, p.name)).collect();
        let actors: HashMap<Uuid, String> = actors?.into_iter().map(|p| (p.id, p.name)).collect();

        Ok(movies
            .into_iter()
            .map(|movie| MovieDetail {
                producer: producers.get(&movie.producer).map(|name| PersonRef {
                    id: movie.producer,
                    name: name.clone(),
                }),
                actors: movie
                    .actors
                    .iter()
                    .filter_map(|id| {
                        actors.get(id).map(|name| PersonRef {
                            id: *id,
                            name: name.clone(),
                        })
                    })
                    .collect(),
                id: movie.id,
                name: movie.name,
                year_of_release: movie.year_of_release,
                plot: movie.plot,
                poster: movie.poster,
                created_at: movie.created_at,
                updated_at: movie.updated_at,
            })
            .collect())
    }

    /// Expands the derived movies lists to `{id, name, yearOfRelease}` with
    /// one bulk lookup across all listed people.
    async fn expand_people(&self, people: Vec<Person>) -> Result<Vec<PersonDetail>, CatalogError> {
        let mut movie_ids: Vec<Uuid> =
            people.iter().flat_map(|p| p.movies.iter().copied()).collect();
        movie_ids.sort_unstable();
        movie_ids.dedup();

        let movies: HashMap<Uuid, MovieRef> = self
            .store
            .get_movies_by_ids(&movie_ids)
            .await?
            .into_iter()
            .map(|m| {
                (
                    m.id,
                    MovieRef {
                        id: m.id,
                        name: m.name,
                        year_of_release: m.year_of_release,
                    },
                )
            })
            .collect();

        Ok(people
            .into_iter()
            .map(|person| PersonDetail {
                movies: person
                    .movies
                    .iter()
                    .filter_map(|id| movies.get(id).cloned())
                    .collect(),
                id: person.id,
                name: person.name,
                gender: person.gender,
                date_of_birth: person.date_of_birth,
                bio: person.bio,
                created_at: person.created_at,
                updated_at: person.updated_at,
            })
            .collect())
    }
}
