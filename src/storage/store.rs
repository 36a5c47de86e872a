//! The persistence seam.
//!
//! `CatalogStore` is the explicitly constructed handle the rest of the crate
//! works against: opened once at process start, passed into the service, and
//! dropped on shutdown. Implementations must preserve the observable list
//! semantics the relationship logic depends on: back-reference additions
//! append without deduplication, and removals drop every occurrence of the
//! movie id.
//!
//! No method spans more than one collection; multi-record consistency is the
//! caller's orchestration, and a failure in one call leaves the effects of
//! earlier calls in place.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalog::{Movie, Person, PersonRole};
use crate::storage::StoreError;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Cheap liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    // --- movies ---

    async fn insert_movie(&self, movie: &Movie) -> Result<(), StoreError>;

    async fn get_movie(&self, id: Uuid) -> Result<Option<Movie>, StoreError>;

    /// Full collection, insertion-ordered. No pagination is offered anywhere.
    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError>;

    async fn get_movies_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Movie>, StoreError>;

    /// Overwrites every mutable field of an existing record.
    async fn replace_movie(&self, movie: &Movie) -> Result<(), StoreError>;

    /// Returns false when no record had the id.
    async fn delete_movie(&self, id: Uuid) -> Result<bool, StoreError>;

    // --- actors / producers (one shape, two collections) ---

    async fn insert_person(&self, role: PersonRole, person: &Person) -> Result<(), StoreError>;

    async fn get_person(&self, role: PersonRole, id: Uuid) -> Result<Option<Person>, StoreError>;

    async fn list_people(&self, role: PersonRole) -> Result<Vec<Person>, StoreError>;

    async fn get_people_by_ids(
        &self,
        role: PersonRole,
        ids: &[Uuid],
    ) -> Result<Vec<Person>, StoreError>;

    async fn replace_person(&self, role: PersonRole, person: &Person) -> Result<(), StoreError>;

    async fn delete_person(&self, role: PersonRole, id: Uuid) -> Result<bool, StoreError>;

    // --- derived back-references ---

    /// Appends `movie_id` to the `movies` list of every listed person, one
    /// round trip per call. Ids without a matching record are skipped, and an
    /// id already present is appended again.
    async fn add_movie_ref(
        &self,
        role: PersonRole,
        person_ids: &[Uuid],
        movie_id: Uuid,
    ) -> Result<(), StoreError>;

    /// Removes every occurrence of `movie_id` from the `movies` list of every
    /// listed person, one round trip per call.
    async fn remove_movie_ref(
        &self,
        role: PersonRole,
        person_ids: &[Uuid],
        movie_id: Uuid,
    ) -> Result<(), StoreError>;
}
