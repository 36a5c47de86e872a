//! Field-level validation for catalog writes.
//!
//! All checks on a payload run to completion and the errors are reported
//! together; nothing is persisted when any field fails. Updates validate the
//! merged record, so a patch cannot blank out a required field or push the
//! release year outside its window. Reference ids are format-checked only —
//! whether the target exists is the storage layer's concern.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Gender, Movie, MoviePayload, NewMovie, NewPerson, Person, PersonPayload};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub fn validate_new_movie(payload: &MoviePayload) -> Result<NewMovie, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = required_text(payload.name.as_deref(), "name", "Name is required", &mut errors);
    let year = match payload.year_of_release {
        Some(y) => check_year(y, &mut errors),
        None => {
            errors.push(FieldError::new("yearOfRelease", "Year of release is required"));
            None
        }
    };
    let plot = required_text(payload.plot.as_deref(), "plot", "Plot is required", &mut errors);
    let poster = required_text(
        payload.poster.as_deref(),
        "poster",
        "Poster URL is required",
        &mut errors,
    );
    let producer = match payload.producer.as_deref() {
        Some(s) => parse_id(s, "producer", &mut errors),
        None => {
            errors.push(FieldError::new("producer", "Producer is required"));
            None
        }
    };
    let actors = match &payload.actors {
        Some(list) => parse_actor_ids(list, &mut errors),
        None => {
            errors.push(FieldError::new("actors", "At least one actor is required"));
            None
        }
    };

    match (name, year, plot, poster, producer, actors) {
        (Some(name), Some(year), Some(plot), Some(poster), Some(producer), Some(actors))
            if errors.is_empty() =>
        {
            Ok(NewMovie {
                name,
                year_of_release: year,
                plot,
                poster,
                producer,
                actors,
            })
        }
        _ => Err(errors),
    }
}

/// Merges a patch into the stored record, each supplied field fully replacing
/// its counterpart, and validates the result. Returns the merged record with
/// `updated_at` refreshed.
pub fn merge_movie_patch(existing: &Movie, payload: &MoviePayload) -> Result<Movie, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = match payload.name.as_deref() {
        Some(s) => required_text(Some(s), "name", "Name is required", &mut errors),
        None => Some(existing.name.clone()),
    };
    let year = check_year(
        payload.year_of_release.unwrap_or(existing.year_of_release),
        &mut errors,
    );
    let plot = match payload.plot.as_deref() {
        Some(s) => required_text(Some(s), "plot", "Plot is required", &mut errors),
        None => Some(existing.plot.clone()),
    };
    let poster = match payload.poster.as_deref() {
        Some(s) => required_text(Some(s), "poster", "Poster URL is required", &mut errors),
        None => Some(existing.poster.clone()),
    };
    let producer = match payload.producer.as_deref() {
        Some(s) => parse_id(s, "producer", &mut errors),
        None => Some(existing.producer),
    };
    let actors = match &payload.actors {
        Some(list) => parse_actor_ids(list, &mut errors),
        None => Some(existing.actors.clone()),
    };

    match (name, year, plot, poster, producer, actors) {
        (Some(name), Some(year), Some(plot), Some(poster), Some(producer), Some(actors))
            if errors.is_empty() =>
        {
            Ok(Movie {
                id: existing.id,
                name,
                year_of_release: year,
                plot,
                poster,
                producer,
                actors,
                created_at: existing.created_at,
                updated_at: Utc::now(),
            })
        }
        _ => Err(errors),
    }
}

pub fn validate_new_person(payload: &PersonPayload) -> Result<NewPerson, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = required_text(payload.name.as_deref(), "name", "Name is required", &mut errors);
    let gender = match payload.gender.as_deref() {
        Some(s) => parse_gender(s, &mut errors),
        None => {
            errors.push(FieldError::new("gender", "Gender is required"));
            None
        }
    };
    let date_of_birth = match payload.date_of_birth.as_deref() {
        Some(s) => parse_date(s, &mut errors),
        None => {
            errors.push(FieldError::new("dateOfBirth", "Date of birth is required"));
            None
        }
    };
    let bio = required_text(payload.bio.as_deref(), "bio", "Bio is required", &mut errors);

    match (name, gender, date_of_birth, bio) {
        (Some(name), Some(gender), Some(date_of_birth), Some(bio)) if errors.is_empty() => {
            Ok(NewPerson {
                name,
                gender,
                date_of_birth,
                bio,
            })
        }
        _ => Err(errors),
    }
}

/// Person counterpart of [`merge_movie_patch`]. The derived `movies` list is
/// carried over untouched — it is not client-settable.
pub fn merge_person_patch(
    existing: &Person,
    payload: &PersonPayload,
) -> Result<Person, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = match payload.name.as_deref() {
        Some(s) => required_text(Some(s), "name", "Name is required", &mut errors),
        None => Some(existing.name.clone()),
    };
    let gender = match payload.gender.as_deref() {
        Some(s) => parse_gender(s, &mut errors),
        None => Some(existing.gender),
    };
    let date_of_birth = match payload.date_of_birth.as_deref() {
        Some(s) => parse_date(s, &mut errors),
        None => Some(existing.date_of_birth),
    };
    let bio = match payload.bio.as_deref() {
        Some(s) => required_text(Some(s), "bio", "Bio is required", &mut errors),
        None => Some(existing.bio.clone()),
    };

    match (name, gender, date_of_birth, bio) {
        (Some(name), Some(gender), Some(date_of_birth), Some(bio)) if errors.is_empty() => {
            Ok(Person {
                id: existing.id,
                name,
                gender,
                date_of_birth,
                bio,
                movies: existing.movies.clone(),
                created_at: existing.created_at,
                updated_at: Utc::now(),
            })
        }
        _ => Err(errors),
    }
}

fn required_text(
    value: Option<&str>,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

/// The window is 1888..=current calendar year, the ceiling taken at request
/// time.
fn check_year(year: i32, errors: &mut Vec<FieldError>) -> Option<i32> {
    if year < 1888 {
        errors.push(FieldError::new(
            "yearOfRelease",
            "First movie was released in 1888",
        ));
        return None;
    }
    if year > Utc::now().year() {
        errors.push(FieldError::new("yearOfRelease", "Year cannot be in the future"));
        return None;
    }
    Some(year)
}

fn parse_id(s: &str, field: &str, errors: &mut Vec<FieldError>) -> Option<Uuid> {
    match Uuid::parse_str(s.trim()) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(FieldError::new(
                field,
                format!("{} must be a valid id", capitalize(field)),
            ));
            None
        }
    }
}

fn parse_actor_ids(list: &[String], errors: &mut Vec<FieldError>) -> Option<Vec<Uuid>> {
    if list.is_empty() {
        errors.push(FieldError::new("actors", "At least one actor is required"));
        return None;
    }
    let mut ids = Vec::with_capacity(list.len());
    let mut ok = true;
    for (idx, raw) in list.iter().enumerate() {
        match Uuid::parse_str(raw.trim()) {
            Ok(id) => ids.push(id),
            Err(_) => {
                errors.push(FieldError::new(
                    format!("actors[{}]", idx),
                    "Actor id must be a valid id",
                ));
                ok = false;
            }
        }
    }
    ok.then_some(ids)
}

fn parse_gender(s: &str, errors: &mut Vec<FieldError>) -> Option<Gender> {
    match Gender::parse(s.trim()) {
        Some(g) => Some(g),
        None => {
            errors.push(FieldError::new(
                "gender",
                "Gender must be one of Male, Female or Other",
            ));
            None
        }
    }
}

/// Accepts a plain ISO-8601 date or a full RFC 3339 timestamp (the browser
/// client historically sent either).
fn parse_date(s: &str, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    errors.push(FieldError::new(
        "dateOfBirth",
        "Date of birth must be an ISO-8601 date",
    ));
    None
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_movie_payload() -> MoviePayload {
        MoviePayload {
            name: Some("Solaris".to_string()),
            year_of_release: Some(1972),
            plot: Some("A psychologist visits a haunted space station.".to_string()),
            poster: Some("/uploads/solaris.jpg".to_string()),
            producer: Some(Uuid::new_v4().to_string()),
            actors: Some(vec![Uuid::new_v4().to_string()]),
        }
    }

    #[test]
    fn accepts_a_complete_payload() {
        assert!(validate_new_movie(&full_movie_payload()).is_ok());
    }

    #[test]
    fn year_window_boundaries() {
        let mut payload = full_movie_payload();

        payload.year_of_release = Some(1887);
        let errors = validate_new_movie(&payload).unwrap_err();
        assert_eq!(errors[0].field, "yearOfRelease");
        assert_eq!(errors[0].message, "First movie was released in 1888");

        payload.year_of_release = Some(1888);
        assert!(validate_new_movie(&payload).is_ok());

        payload.year_of_release = Some(Utc::now().year());
        assert!(validate_new_movie(&payload).is_ok());

        payload.year_of_release = Some(Utc::now().year() + 1);
        let errors = validate_new_movie(&payload).unwrap_err();
        assert_eq!(errors[0].message, "Year cannot be in the future");
    }

    #[test]
    fn empty_actor_list_is_rejected() {
        let mut payload = full_movie_payload();
        payload.actors = Some(vec![]);
        let errors = validate_new_movie(&payload).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("actors", "At least one actor is required")]);
    }

    #[test]
    fn all_field_errors_are_reported_together() {
        let payload = MoviePayload::default();
        let errors = validate_new_movie(&payload).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["name", "yearOfRelease", "plot", "poster", "producer", "actors"]
        );
    }

    #[test]
    fn malformed_reference_ids_are_field_errors() {
        let mut payload = full_movie_payload();
        payload.producer = Some("not-an-id".to_string());
        payload.actors = Some(vec!["also-not-an-id".to_string()]);
        let errors = validate_new_movie(&payload).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["producer", "actors[0]"]);
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        let mut payload = full_movie_payload();
        payload.name = Some("   ".to_string());
        let errors = validate_new_movie(&payload).unwrap_err();
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn patch_merge_replaces_only_supplied_fields() {
        let movie = Movie::new(validate_new_movie(&full_movie_payload()).unwrap());
        let patch = MoviePayload {
            plot: Some("Re-cut synopsis.".to_string()),
            ..Default::default()
        };

        let merged = merge_movie_patch(&movie, &patch).unwrap();
        assert_eq!(merged.plot, "Re-cut synopsis.");
        assert_eq!(merged.name, movie.name);
        assert_eq!(merged.producer, movie.producer);
        assert_eq!(merged.actors, movie.actors);
        assert_eq!(merged.created_at, movie.created_at);
    }

    #[test]
    fn patch_cannot_blank_a_required_field() {
        let movie = Movie::new(validate_new_movie(&full_movie_payload()).unwrap());
        let patch = MoviePayload {
            name: Some("".to_string()),
            ..Default::default()
        };
        let errors = merge_movie_patch(&movie, &patch).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("name", "Name is required")]);
    }

    #[test]
    fn patch_cannot_empty_the_actor_list() {
        let movie = Movie::new(validate_new_movie(&full_movie_payload()).unwrap());
        let patch = MoviePayload {
            actors: Some(vec![]),
            ..Default::default()
        };
        assert!(merge_movie_patch(&movie, &patch).is_err());
    }

    #[test]
    fn person_requires_known_gender_and_parseable_date() {
        let payload = PersonPayload {
            name: Some("Andrei Tarkovsky".to_string()),
            gender: Some("Unknown".to_string()),
            date_of_birth: Some("not-a-date".to_string()),
            bio: Some("Director and writer.".to_string()),
        };
        let errors = validate_new_person(&payload).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["gender", "dateOfBirth"]);
    }

    #[test]
    fn person_accepts_date_and_rfc3339_timestamp() {
        let mut payload = PersonPayload {
            name: Some("Natalya Bondarchuk".to_string()),
            gender: Some("Female".to_string()),
            date_of_birth: Some("1950-05-10".to_string()),
            bio: Some("Actress.".to_string()),
        };
        assert!(validate_new_person(&payload).is_ok());

        payload.date_of_birth = Some("1950-05-10T00:00:00Z".to_string());
        let person = validate_new_person(&payload).unwrap();
        assert_eq!(person.date_of_birth.to_string(), "1950-05-10");
    }

    #[test]
    fn person_patch_preserves_derived_movies() {
        let person = Person::new(
            validate_new_person(&PersonPayload {
                name: Some("Donatas Banionis".to_string()),
                gender: Some("Male".to_string()),
                date_of_birth: Some("1924-04-28".to_string()),
                bio: Some("Actor.".to_string()),
            })
            .unwrap(),
        );
        let mut with_refs = person.clone();
        with_refs.movies = vec![Uuid::new_v4(), Uuid::new_v4()];

        let patch = PersonPayload {
            bio: Some("Lithuanian stage and film actor.".to_string()),
            ..Default::default()
        };
        let merged = merge_person_patch(&with_refs, &patch).unwrap();
        assert_eq!(merged.movies, with_refs.movies);
        assert_eq!(merged.bio, "Lithuanian stage and film actor.");
    }
}
