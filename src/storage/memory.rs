//! In-process catalog store.
//!
//! Mirrors the Postgres store's observable behavior, including the
//! duplicate-preserving append and remove-every-occurrence semantics of the
//! back-reference lists. The integration suite runs the full HTTP surface
//! against this store; it also backs local demos where no database is at
//! hand.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::catalog::{Movie, Person, PersonRole};
use crate::storage::{CatalogStore, StoreError};

#[derive(Default)]
struct Collections {
    movies: HashMap<Uuid, Movie>,
    actors: HashMap<Uuid, Person>,
    producers: HashMap<Uuid, Person>,
}

impl Collections {
    fn people(&self, role: PersonRole) -> &HashMap<Uuid, Person> {
        match role {
            PersonRole::Actor => &self.actors,
            PersonRole::Producer => &self.producers,
        }
    }

    fn people_mut(&mut self, role: PersonRole) -> &mut HashMap<Uuid, Person> {
        match role {
            PersonRole::Actor => &mut self.actors,
            PersonRole::Producer => &mut self.producers,
        }
    }
}

#[derive(Default)]
pub struct MemoryCatalogStore {
    inner: RwLock<Collections>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_movie(&self, movie: &Movie) -> Result<(), StoreError> {
        self.inner.write().await.movies.insert(movie.id, movie.clone());
        Ok(())
    }

    async fn get_movie(&self, id: Uuid) -> Result<Option<Movie>, StoreError> {
        Ok(self.inner.read().await.movies.get(&id).cloned())
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        let guard = self.inner.read().await;
        let mut movies: Vec<Movie> = guard.movies.values().cloned().collect();
        movies.sort_by_key(|m| (m.created_at, m.id));
        Ok(movies)
    }

    async fn get_movies_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Movie>, StoreError> {
        let guard = self.inner.read().await;
        Ok(ids.iter().filter_map(|id| guard.movies.get(id).cloned()).collect())
    }

    async fn replace_movie(&self, movie: &Movie) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        if let Some(slot) = guard.movies.get_mut(&movie.id) {
            *slot = movie.clone();
        }
        Ok(())
    }

    async fn delete_movie(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.movies.remove(&id).is_some())
    }

    async fn insert_person(&self, role: PersonRole, person: &Person) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .people_mut(role)
            .insert(person.id, person.clone());
        Ok(())
    }

    async fn get_person(&self, role: PersonRole, id: Uuid) -> Result<Option<Person>, StoreError> {
        Ok(self.inner.read().await.people(role).get(&id).cloned())
    }

    async fn list_people(&self, role: PersonRole) -> Result<Vec<Person>, StoreError> {
        let guard = self.inner.read().await;
        let mut people: Vec<Person> = guard.people(role).values().cloned().collect();
        people.sort_by_key(|p| (p.created_at, p.id));
        Ok(people)
    }

    async fn get_people_by_ids(
        &self,
        role: PersonRole,
        ids: &[Uuid],
    ) -> Result<Vec<Person>, StoreError> {
        let guard = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| guard.people(role).get(id).cloned())
            .collect())
    }

    async fn replace_person(&self, role: PersonRole, person: &Person) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        if let Some(slot) = guard.people_mut(role).get_mut(&person.id) {
            *slot = person.clone();
        }
        Ok(())
    }

    async fn delete_person(&self, role: PersonRole, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.people_mut(role).remove(&id).is_some())
    }

    async fn add_movie_ref(
        &self,
        role: PersonRole,
        person_ids: &[Uuid],
        movie_id: Uuid,
    ) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        for person_id in person_ids {
            // Unknown ids are skipped, as the bulk SQL update skips them.
            if let Some(person) = guard.people_mut(role).get_mut(person_id) {
                person.movies.push(movie_id);
                person.updated_at = Utc::now();
            }
        }
        Ok(())
    }

    async fn remove_movie_ref(
        &self,
        role: PersonRole,
        person_ids: &[Uuid],
        movie_id: Uuid,
    ) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        for person_id in person_ids {
            if let Some(person) = guard.people_mut(role).get_mut(person_id) {
                person.movies.retain(|m| *m != movie_id);
                person.updated_at = Utc::now();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Gender, NewPerson, Person};
    use chrono::NaiveDate;

    fn person(name: &str) -> Person {
        Person::new(NewPerson {
            name: name.to_string(),
            gender: Gender::Other,
            date_of_birth: NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid date"),
            bio: "Test subject.".to_string(),
        })
    }

    #[tokio::test]
    async fn add_movie_ref_appends_without_deduplication() {
        let store = MemoryCatalogStore::new();
        let p = person("dup");
        store.insert_person(PersonRole::Producer, &p).await.unwrap();

        let movie_id = Uuid::new_v4();
        store
            .add_movie_ref(PersonRole::Producer, &[p.id], movie_id)
            .await
            .unwrap();
        store
            .add_movie_ref(PersonRole::Producer, &[p.id], movie_id)
            .await
            .unwrap();

        let stored = store
            .get_person(PersonRole::Producer, p.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.movies, vec![movie_id, movie_id]);
    }

    #[tokio::test]
    async fn remove_movie_ref_drops_every_occurrence() {
        let store = MemoryCatalogStore::new();
        let p = person("pull");
        store.insert_person(PersonRole::Actor, &p).await.unwrap();

        let movie_id = Uuid::new_v4();
        let other = Uuid::new_v4();
        for id in [movie_id, other, movie_id] {
            store.add_movie_ref(PersonRole::Actor, &[p.id], id).await.unwrap();
        }
        store
            .remove_movie_ref(PersonRole::Actor, &[p.id], movie_id)
            .await
            .unwrap();

        let stored = store.get_person(PersonRole::Actor, p.id).await.unwrap().unwrap();
        assert_eq!(stored.movies, vec![other]);
    }

    #[tokio::test]
    async fn ref_updates_to_unknown_ids_are_skipped() {
        let store = MemoryCatalogStore::new();
        let p = person("known");
        store.insert_person(PersonRole::Actor, &p).await.unwrap();

        let movie_id = Uuid::new_v4();
        store
            .add_movie_ref(PersonRole::Actor, &[Uuid::new_v4(), p.id], movie_id)
            .await
            .unwrap();

        let stored = store.get_person(PersonRole::Actor, p.id).await.unwrap().unwrap();
        assert_eq!(stored.movies, vec![movie_id]);
    }
}
