//! Black-box coverage of the back-reference bookkeeping: every movie write
//! must leave the derived `movies` lists on producers and actors consistent,
//! and person deletion must NOT clean up the movie side.

mod support;

use serde_json::json;
use uuid::Uuid;

use support::spawn_app;

#[tokio::test]
async fn creating_a_movie_registers_it_with_producer_and_actors() {
    let app = spawn_app().await;
    let producer = app.create_person("producers", "Sydney Pollack").await;
    let actor_a = app.create_person("actors", "Meryl Streep").await;
    let actor_b = app.create_person("actors", "Robert Redford").await;

    let movie = app
        .create_movie("Out of Africa", &producer, &[&actor_a, &actor_b])
        .await;

    assert_eq!(app.person_movie_ids("producers", &producer).await, vec![movie.clone()]);
    assert_eq!(app.person_movie_ids("actors", &actor_a).await, vec![movie.clone()]);
    assert_eq!(app.person_movie_ids("actors", &actor_b).await, vec![movie.clone()]);

    // The expanded movie points back at them by name.
    let (status, body) = app.get_json(&format!("/api/movies/{}", movie)).await;
    assert_eq!(status, 200);
    assert_eq!(body["producer"]["name"], "Sydney Pollack");
    let actor_names: Vec<&str> = body["actors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(actor_names, vec!["Meryl Streep", "Robert Redford"]);
}

#[tokio::test]
async fn changing_the_producer_moves_the_back_reference() {
    let app = spawn_app().await;
    let old_producer = app.create_person("producers", "Old Hand").await;
    let new_producer = app.create_person("producers", "New Blood").await;
    let actor = app.create_person("actors", "Lead").await;
    let movie = app.create_movie("Handover", &old_producer, &[&actor]).await;

    let (status, _) = app
        .put_json(
            &format!("/api/movies/{}", movie),
            &json!({ "producer": new_producer }),
        )
        .await;
    assert_eq!(status, 200);

    assert!(app.person_movie_ids("producers", &old_producer).await.is_empty());
    assert_eq!(app.person_movie_ids("producers", &new_producer).await, vec![movie.clone()]);
    // The actor list was not part of the patch and is untouched.
    assert_eq!(app.person_movie_ids("actors", &actor).await, vec![movie]);
}

#[tokio::test]
async fn reasserting_the_same_producer_touches_no_list() {
    let app = spawn_app().await;
    let producer = app.create_person("producers", "Steady").await;
    let actor = app.create_person("actors", "Lead").await;
    let movie = app.create_movie("No Change", &producer, &[&actor]).await;

    let (status, _) = app
        .put_json(
            &format!("/api/movies/{}", movie),
            &json!({ "producer": producer, "plot": "A fresh synopsis." }),
        )
        .await;
    assert_eq!(status, 200);

    // Exactly one occurrence: a re-asserted producer must not be re-pushed.
    assert_eq!(app.person_movie_ids("producers", &producer).await, vec![movie]);
}

#[tokio::test]
async fn actor_changes_touch_only_entering_and_leaving_actors() {
    let app = spawn_app().await;
    let producer = app.create_person("producers", "P").await;
    let a1 = app.create_person("actors", "Leaving").await;
    let a2 = app.create_person("actors", "Staying").await;
    let a3 = app.create_person("actors", "Joining").await;
    let movie = app.create_movie("Recast", &producer, &[&a1, &a2]).await;

    let (status, _) = app
        .put_json(
            &format!("/api/movies/{}", movie),
            &json!({ "actors": [a2, a3] }),
        )
        .await;
    assert_eq!(status, 200);

    assert!(app.person_movie_ids("actors", &a1).await.is_empty());
    assert_eq!(app.person_movie_ids("actors", &a2).await, vec![movie.clone()]);
    assert_eq!(app.person_movie_ids("actors", &a3).await, vec![movie]);
}

#[tokio::test]
async fn deleting_a_movie_withdraws_every_back_reference() {
    let app = spawn_app().await;
    let producer = app.create_person("producers", "P").await;
    let a1 = app.create_person("actors", "A1").await;
    let a2 = app.create_person("actors", "A2").await;
    let movie = app.create_movie("Short Lived", &producer, &[&a1, &a2]).await;

    let (status, body) = app.delete_json(&format!("/api/movies/{}", movie)).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Movie deleted successfully");

    assert!(app.person_movie_ids("producers", &producer).await.is_empty());
    assert!(app.person_movie_ids("actors", &a1).await.is_empty());
    assert!(app.person_movie_ids("actors", &a2).await.is_empty());

    let (status, _) = app.get_json(&format!("/api/movies/{}", movie)).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn deleting_a_person_leaves_the_movie_reference_dangling() {
    let app = spawn_app().await;
    let producer = app.create_person("producers", "Gone Soon").await;
    let actor = app.create_person("actors", "Also Gone").await;
    let kept_actor = app.create_person("actors", "Kept").await;
    let movie = app
        .create_movie("Orphaned", &producer, &[&actor, &kept_actor])
        .await;

    let (status, _) = app.delete_json(&format!("/api/actors/{}", actor)).await;
    assert_eq!(status, 200);
    let (status, _) = app.delete_json(&format!("/api/producers/{}", producer)).await;
    assert_eq!(status, 200);

    // The stored record still carries both references; no cascade ran.
    let movie_id = Uuid::parse_str(&movie).unwrap();
    let stored = app
        .catalog
        .store()
        .get_movie(movie_id)
        .await
        .unwrap()
        .expect("movie still exists");
    assert_eq!(stored.producer, Uuid::parse_str(&producer).unwrap());
    assert!(stored.actors.contains(&Uuid::parse_str(&actor).unwrap()));

    // Expanded reads stop resolving the dangling references.
    let (status, body) = app.get_json(&format!("/api/movies/{}", movie)).await;
    assert_eq!(status, 200);
    assert!(body["producer"].is_null());
    let actor_names: Vec<&str> = body["actors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(actor_names, vec!["Kept"]);
}

#[tokio::test]
async fn movies_accumulate_on_shared_producer_and_actors() {
    let app = spawn_app().await;
    let producer = app.create_person("producers", "Prolific").await;
    let actor = app.create_person("actors", "Regular").await;

    let first = app.create_movie("First", &producer, &[&actor]).await;
    let second = app.create_movie("Second", &producer, &[&actor]).await;

    assert_eq!(
        app.person_movie_ids("producers", &producer).await,
        vec![first.clone(), second.clone()]
    );
    assert_eq!(app.person_movie_ids("actors", &actor).await, vec![first, second]);
}

#[tokio::test]
async fn person_expansion_carries_name_and_release_year() {
    let app = spawn_app().await;
    let producer = app.create_person("producers", "P").await;
    let actor = app.create_person("actors", "A").await;
    let movie = app.create_movie("Dated", &producer, &[&actor]).await;

    let (status, body) = app.get_json(&format!("/api/actors/{}", actor)).await;
    assert_eq!(status, 200);
    assert_eq!(body["movies"][0]["id"], movie.as_str());
    assert_eq!(body["movies"][0]["name"], "Dated");
    assert_eq!(body["movies"][0]["yearOfRelease"], 1979);
}
