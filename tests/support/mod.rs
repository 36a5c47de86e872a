//! Shared harness: boots the API over the in-process store on an ephemeral
//! port and exposes a few request helpers.

use std::path::PathBuf;
use std::sync::Arc;

use movie_catalog_api::transport::http::{create_router, AppState};
use movie_catalog_api::{CatalogService, CatalogStore, MemoryCatalogStore};
use serde_json::{json, Value};

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub catalog: Arc<CatalogService>,
    pub upload_dir: PathBuf,
    // Held so the upload directory outlives the test.
    _upload_dir_guard: tempfile::TempDir,
}

pub async fn spawn_app() -> TestApp {
    let store: Arc<dyn CatalogStore> = Arc::new(MemoryCatalogStore::new());
    let catalog = Arc::new(CatalogService::new(store));

    let upload_dir_guard = tempfile::tempdir().expect("create upload dir");
    let upload_dir = upload_dir_guard.path().to_path_buf();

    let state = AppState {
        catalog: catalog.clone(),
        upload_dir: upload_dir.clone(),
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });

    TestApp {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
        catalog,
        upload_dir,
        _upload_dir_guard: upload_dir_guard,
    }
}

impl TestApp {
    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("request");
        let status = response.status();
        (status, response.json().await.expect("json body"))
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (reqwest::StatusCode, Value) {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .expect("request");
        let status = response.status();
        (status, response.json().await.expect("json body"))
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> (reqwest::StatusCode, Value) {
        let response = self
            .client
            .put(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .expect("request");
        let status = response.status();
        (status, response.json().await.expect("json body"))
    }

    pub async fn delete_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let response = self
            .client
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("request");
        let status = response.status();
        (status, response.json().await.expect("json body"))
    }

    /// Creates an actor or producer and returns its id.
    pub async fn create_person(&self, collection: &str, name: &str) -> String {
        let (status, body) = self
            .post_json(
                &format!("/api/{}", collection),
                &json!({
                    "name": name,
                    "gender": "Other",
                    "dateOfBirth": "1970-01-01",
                    "bio": format!("{} — biography on file.", name),
                }),
            )
            .await;
        assert_eq!(status, 201, "create {}: {}", collection, body);
        body["id"].as_str().expect("person id").to_string()
    }

    /// Creates a movie and returns its id.
    pub async fn create_movie(&self, name: &str, producer: &str, actors: &[&str]) -> String {
        let (status, body) = self
            .post_json(
                "/api/movies",
                &json!({
                    "name": name,
                    "yearOfRelease": 1979,
                    "plot": format!("Plot of {}.", name),
                    "poster": "/uploads/poster-default.jpg",
                    "producer": producer,
                    "actors": actors,
                }),
            )
            .await;
        assert_eq!(status, 201, "create movie: {}", body);
        body["id"].as_str().expect("movie id").to_string()
    }

    /// Ids in a person's expanded movies list.
    pub async fn person_movie_ids(&self, collection: &str, id: &str) -> Vec<String> {
        let (status, body) = self.get_json(&format!("/api/{}/{}", collection, id)).await;
        assert_eq!(status, 200, "get {}: {}", collection, body);
        body["movies"]
            .as_array()
            .expect("movies array")
            .iter()
            .map(|m| m["id"].as_str().expect("movie ref id").to_string())
            .collect()
    }
}
