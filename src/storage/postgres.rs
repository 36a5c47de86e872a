//! Postgres-backed catalog store.
//!
//! Each collection is one table; reference lists live in `UUID[]` columns.
//! `array_append` / `array_remove` give the exact list semantics the
//! relationship logic expects: append keeps duplicates, remove drops every
//! occurrence. The schema is ensured with idempotent DDL when the store is
//! constructed.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::catalog::{Gender, Movie, Person, PersonRole};
use crate::storage::{CatalogStore, StoreError};

pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Connects and ensures the catalog tables exist.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS movies (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                year_of_release INTEGER NOT NULL,
                plot TEXT NOT NULL,
                poster TEXT NOT NULL,
                producer_id UUID NOT NULL,
                actor_ids UUID[] NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        for table in ["actors", "producers"] {
            sqlx::query(&format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id UUID PRIMARY KEY,
                    name TEXT NOT NULL,
                    gender TEXT NOT NULL,
                    date_of_birth DATE NOT NULL,
                    bio TEXT NOT NULL,
                    movie_ids UUID[] NOT NULL DEFAULT '{{}}',
                    created_at TIMESTAMPTZ NOT NULL,
                    updated_at TIMESTAMPTZ NOT NULL
                )",
                table
            ))
            .execute(&pool)
            .await?;
        }

        Ok(PgCatalogStore { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn movie_from_row(row: &PgRow) -> Result<Movie, StoreError> {
    Ok(Movie {
        id: row.try_get("id").map_err(StoreError::Database)?,
        name: row.try_get("name").map_err(StoreError::Database)?,
        year_of_release: row.try_get("year_of_release").map_err(StoreError::Database)?,
        plot: row.try_get("plot").map_err(StoreError::Database)?,
        poster: row.try_get("poster").map_err(StoreError::Database)?,
        producer: row.try_get("producer_id").map_err(StoreError::Database)?,
        actors: row.try_get("actor_ids").map_err(StoreError::Database)?,
        created_at: row.try_get("created_at").map_err(StoreError::Database)?,
        updated_at: row.try_get("updated_at").map_err(StoreError::Database)?,
    })
}

fn person_from_row(row: &PgRow) -> Result<Person, StoreError> {
    let gender: String = row.try_get("gender").map_err(StoreError::Database)?;
    let gender = Gender::parse(&gender)
        .ok_or_else(|| StoreError::Backend(format!("unrecognized gender value '{}'", gender)))?;
    Ok(Person {
        id: row.try_get("id").map_err(StoreError::Database)?,
        name: row.try_get("name").map_err(StoreError::Database)?,
        gender,
        date_of_birth: row.try_get("date_of_birth").map_err(StoreError::Database)?,
        bio: row.try_get("bio").map_err(StoreError::Database)?,
        movies: row.try_get("movie_ids").map_err(StoreError::Database)?,
        created_at: row.try_get("created_at").map_err(StoreError::Database)?,
        updated_at: row.try_get("updated_at").map_err(StoreError::Database)?,
    })
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_movie(&self, movie: &Movie) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO movies
                (id, name, year_of_release, plot, poster, producer_id, actor_ids, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(movie.id)
        .bind(&movie.name)
        .bind(movie.year_of_release)
        .bind(&movie.plot)
        .bind(&movie.poster)
        .bind(movie.producer)
        .bind(&movie.actors)
        .bind(movie.created_at)
        .bind(movie.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_movie(&self, id: Uuid) -> Result<Option<Movie>, StoreError> {
        let row = sqlx::query("SELECT * FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(movie_from_row).transpose()
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        let rows = sqlx::query("SELECT * FROM movies ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(movie_from_row).collect()
    }

    async fn get_movies_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Movie>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query("SELECT * FROM movies WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(movie_from_row).collect()
    }

    async fn replace_movie(&self, movie: &Movie) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE movies
             SET name = $2, year_of_release = $3, plot = $4, poster = $5,
                 producer_id = $6, actor_ids = $7, updated_at = $8
             WHERE id = $1",
        )
        .bind(movie.id)
        .bind(&movie.name)
        .bind(movie.year_of_release)
        .bind(&movie.plot)
        .bind(&movie.poster)
        .bind(movie.producer)
        .bind(&movie.actors)
        .bind(movie.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_movie(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_person(&self, role: PersonRole, person: &Person) -> Result<(), StoreError> {
        sqlx::query(&format!(
            "INSERT INTO {}
                (id, name, gender, date_of_birth, bio, movie_ids, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            role.table_name()
        ))
        .bind(person.id)
        .bind(&person.name)
        .bind(person.gender.as_str())
        .bind(person.date_of_birth)
        .bind(&person.bio)
        .bind(&person.movies)
        .bind(person.created_at)
        .bind(person.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_person(&self, role: PersonRole, id: Uuid) -> Result<Option<Person>, StoreError> {
        let row = sqlx::query(&format!("SELECT * FROM {} WHERE id = $1", role.table_name()))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(person_from_row).transpose()
    }

    async fn list_people(&self, role: PersonRole) -> Result<Vec<Person>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT * FROM {} ORDER BY created_at, id",
            role.table_name()
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(person_from_row).collect()
    }

    async fn get_people_by_ids(
        &self,
        role: PersonRole,
        ids: &[Uuid],
    ) -> Result<Vec<Person>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(&format!(
            "SELECT * FROM {} WHERE id = ANY($1)",
            role.table_name()
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(person_from_row).collect()
    }

    async fn replace_person(&self, role: PersonRole, person: &Person) -> Result<(), StoreError> {
        sqlx::query(&format!(
            "UPDATE {}
             SET name = $2, gender = $3, date_of_birth = $4, bio = $5,
                 movie_ids = $6, updated_at = $7
             WHERE id = $1",
            role.table_name()
        ))
        .bind(person.id)
        .bind(&person.name)
        .bind(person.gender.as_str())
        .bind(person.date_of_birth)
        .bind(&person.bio)
        .bind(&person.movies)
        .bind(person.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_person(&self, role: PersonRole, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", role.table_name()))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_movie_ref(
        &self,
        role: PersonRole,
        person_ids: &[Uuid],
        movie_id: Uuid,
    ) -> Result<(), StoreError> {
        if person_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(&format!(
            "UPDATE {}
             SET movie_ids = array_append(movie_ids, $1), updated_at = now()
             WHERE id = ANY($2)",
            role.table_name()
        ))
        .bind(movie_id)
        .bind(person_ids)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_movie_ref(
        &self,
        role: PersonRole,
        person_ids: &[Uuid],
        movie_id: Uuid,
    ) -> Result<(), StoreError> {
        if person_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(&format!(
            "UPDATE {}
             SET movie_ids = array_remove(movie_ids, $1), updated_at = now()
             WHERE id = ANY($2)",
            role.table_name()
        ))
        .bind(movie_id)
        .bind(person_ids)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
