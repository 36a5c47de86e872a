//! Catalog entities and their wire shapes.
//!
//! A `Movie` owns its `producer` and `actors` references. The `movies` lists
//! on actor/producer records are derived back-references: they are rewritten
//! by movie writes (see [`relations`]) and are never settable by clients.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod relations;
pub mod validation;

pub use relations::BackRefPlan;

/// The two person collections. Actors and producers share one record shape;
/// the role selects which collection a storage call addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonRole {
    Actor,
    Producer,
}

impl PersonRole {
    pub fn table_name(&self) -> &'static str {
        match self {
            PersonRole::Actor => "actors",
            PersonRole::Producer => "producers",
        }
    }

    /// Entity name as it appears in API messages ("Actor not found").
    pub fn entity_name(&self) -> &'static str {
        match self {
            PersonRole::Actor => "Actor",
            PersonRole::Producer => "Producer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Other" => Some(Gender::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: Uuid,
    pub name: String,
    pub year_of_release: i32,
    pub plot: String,
    pub poster: String,
    pub producer: Uuid,
    pub actors: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Movie {
    /// Builds a fresh record from validated creation input.
    pub fn new(input: NewMovie) -> Self {
        let now = Utc::now();
        Movie {
            id: Uuid::new_v4(),
            name: input.name,
            year_of_release: input.year_of_release,
            plot: input.plot,
            poster: input.poster,
            producer: input.producer,
            actors: input.actors,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub bio: String,
    /// Derived: ids of movies referencing this person. Maintained by movie
    /// writes only.
    pub movies: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    /// Builds a fresh record from validated creation input. The derived
    /// `movies` list starts empty.
    pub fn new(input: NewPerson) -> Self {
        let now = Utc::now();
        Person {
            id: Uuid::new_v4(),
            name: input.name,
            gender: input.gender,
            date_of_birth: input.date_of_birth,
            bio: input.bio,
            movies: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated movie creation input (see [`validation::validate_new_movie`]).
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub name: String,
    pub year_of_release: i32,
    pub plot: String,
    pub poster: String,
    pub producer: Uuid,
    pub actors: Vec<Uuid>,
}

/// Validated person creation input.
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub bio: String,
}

/// Request body for movie create and update. Every field is optional so the
/// same shape serves both; create requires the full set during validation.
/// Reference fields arrive as strings and are format-checked, not
/// existence-checked.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoviePayload {
    pub name: Option<String>,
    pub year_of_release: Option<i32>,
    pub plot: Option<String>,
    pub poster: Option<String>,
    pub producer: Option<String>,
    pub actors: Option<Vec<String>>,
}

/// Request body for actor/producer create and update. The derived `movies`
/// list is deliberately absent.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonPayload {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub bio: Option<String>,
}

/// `{id, name}` reference as embedded in expanded movie reads.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    pub id: Uuid,
    pub name: String,
}

/// `{id, name, yearOfRelease}` reference as embedded in expanded person reads.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieRef {
    pub id: Uuid,
    pub name: String,
    pub year_of_release: i32,
}

/// Movie read shape with references expanded. A reference whose target no
/// longer exists expands to null / is omitted rather than failing the read.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    pub id: Uuid,
    pub name: String,
    pub year_of_release: i32,
    pub plot: String,
    pub poster: String,
    pub producer: Option<PersonRef>,
    pub actors: Vec<PersonRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Person read shape with the derived movies list expanded.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetail {
    pub id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub bio: String,
    pub movies: Vec<MovieRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
