//! Router-level tests for the listing crate
//!
//! Drives the real router against in-memory repository and media store.

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::config::ListingConfig;
    use crate::domain::entities::{Listing, ListingPatch};
    use crate::domain::repository::{ListingRepository, MediaStore};
    use crate::domain::value_objects::{ListingId, MediaPath, UploadedFile};
    use crate::error::ListingResult;
    use crate::infra::media::server_file_name;
    use crate::presentation::router::listing_router_generic;

    #[derive(Clone, Default)]
    pub struct InMemoryListingRepository {
        listings: Arc<Mutex<Vec<Listing>>>,
    }

    impl InMemoryListingRepository {
        pub fn len(&self) -> usize {
            self.listings.lock().unwrap().len()
        }

        pub fn first(&self) -> Listing {
            self.listings.lock().unwrap()[0].clone()
        }
    }

    impl ListingRepository for InMemoryListingRepository {
        async fn list_newest_first(&self) -> ListingResult<Vec<Listing>> {
            Ok(self.listings.lock().unwrap().iter().rev().cloned().collect())
        }

        async fn find_by_id(&self, listing_id: &ListingId) -> ListingResult<Option<Listing>> {
            let listings = self.listings.lock().unwrap();
            Ok(listings.iter().find(|l| &l.listing_id == listing_id).cloned())
        }

        async fn create(&self, listing: &Listing) -> ListingResult<()> {
            self.listings.lock().unwrap().push(listing.clone());
            Ok(())
        }

        async fn update(
            &self,
            listing_id: &ListingId,
            patch: &ListingPatch,
        ) -> ListingResult<Option<Listing>> {
            let mut listings = self.listings.lock().unwrap();
            let Some(listing) = listings.iter_mut().find(|l| &l.listing_id == listing_id) else {
                return Ok(None);
            };
            listing.apply(patch.clone());
            Ok(Some(listing.clone()))
        }

        async fn delete(&self, listing_id: &ListingId) -> ListingResult<bool> {
            let mut listings = self.listings.lock().unwrap();
            let before = listings.len();
            listings.retain(|l| &l.listing_id != listing_id);
            Ok(listings.len() != before)
        }
    }

    /// Records saved files instead of writing them
    #[derive(Clone, Default)]
    pub struct InMemoryMediaStore {
        saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    }

    impl InMemoryMediaStore {
        pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
            self.saved.lock().unwrap().clone()
        }
    }

    impl MediaStore for InMemoryMediaStore {
        async fn save(&self, file: &UploadedFile) -> ListingResult<MediaPath> {
            let name = server_file_name(file);
            self.saved
                .lock()
                .unwrap()
                .push((name.clone(), file.data.to_vec()));
            Ok(MediaPath::uploaded(&name))
        }
    }

    pub struct TestApp {
        pub router: Router,
        pub repo: InMemoryListingRepository,
        pub media: InMemoryMediaStore,
    }

    pub fn app_with(config: ListingConfig) -> TestApp {
        let repo = InMemoryListingRepository::default();
        let media = InMemoryMediaStore::default();
        TestApp {
            router: listing_router_generic(repo.clone(), media.clone(), config),
            repo,
            media,
        }
    }

    pub fn app() -> TestApp {
        app_with(ListingConfig::default())
    }

    pub const BOUNDARY: &str = "listing-test-boundary";

    /// A multipart part: `(name, Some(file_name), bytes)` or `(name, None, text)`
    pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

    pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, file_name, data) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file_name {
                Some(file_name) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                }
                None => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn dispatch(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn send_multipart(
        router: &Router,
        method: &str,
        uri: &str,
        parts: &[Part<'_>],
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        dispatch(router, request).await
    }

    pub async fn send_raw(
        router: &Router,
        method: &str,
        uri: &str,
        content_type: Option<&str>,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        dispatch(router, builder.body(Body::from(body)).unwrap()).await
    }

    pub async fn send_json(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        dispatch(router, request).await
    }
}

#[cfg(test)]
mod create_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::support::*;
    use crate::application::config::ListingConfig;

    #[tokio::test]
    async fn test_multipart_create_with_uploads() {
        let t = app();

        let (status, body) = send_multipart(
            &t.router,
            "POST",
            "/",
            &[
                ("title", None, b"Harbour Loft"),
                ("price", None, b"250000"),
                ("beds", None, b"3"),
                ("baths", None, b"2"),
                ("livingArea", None, b"120.5"),
                ("imageFiles", Some("front.jpg"), b"front-bytes"),
                ("imageFiles[]", Some("back.JPG"), b"back-bytes"),
                ("agentPhotoFile", Some("agent.png"), b"agent-bytes"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["title"], "Harbour Loft");
        assert_eq!(body["price"], json!(250000));
        assert_eq!(body["beds"], json!(3));
        assert_eq!(body["livingArea"], json!(120.5));
        assert_eq!(body["status"], "active");

        let images = body["images"].as_array().unwrap();
        assert_eq!(images.len(), 2);
        assert!(images.iter().all(|i| i.as_str().unwrap().starts_with("/uploads/")));
        assert!(images[1].as_str().unwrap().ends_with(".jpg"));
        assert!(body["agentPhoto"].as_str().unwrap().starts_with("/uploads/"));

        let saved = t.media.saved();
        assert_eq!(saved.len(), 3);
        assert_eq!(saved[0].1, b"front-bytes");

        // Stored form stays relative.
        let stored = t.repo.first();
        assert!(stored.images[0].as_str().starts_with("/uploads/"));
    }

    #[tokio::test]
    async fn test_responses_use_site_base() {
        let t = app_with(ListingConfig::default().with_site_base("https://api.example.com/"));

        let (status, body) = send_multipart(
            &t.router,
            "POST",
            "/",
            &[
                ("title", None, b"Loft"),
                ("price", None, b"100"),
                ("imageFiles", Some("a.jpg"), b"a"),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let image = body["images"][0].as_str().unwrap();
        assert!(image.starts_with("https://api.example.com/uploads/"));

        let (_, list) = send_json(&t.router, "GET", "/", None).await;
        assert_eq!(list[0]["images"][0], image);

        let stored = t.repo.first();
        assert!(stored.images[0].as_str().starts_with("/uploads/"));
    }

    #[tokio::test]
    async fn test_invalid_status_writes_no_files() {
        let t = app();

        let (status, body) = send_multipart(
            &t.router,
            "POST",
            "/",
            &[
                ("title", None, b"Loft"),
                ("price", None, b"100"),
                ("status", None, b"leased"),
                ("imageFiles", Some("a.jpg"), b"a"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "status must be one of: active, under-contract, sold"
        );
        assert!(t.media.saved().is_empty());
        assert_eq!(t.repo.len(), 0);
    }

    #[tokio::test]
    async fn test_json_create_normalizes_media_references() {
        let t = app();

        let (status, body) = send_json(
            &t.router,
            "POST",
            "/",
            Some(json!({
                "title": "Cabin",
                "price": "99000",
                "status": "under-contract",
                "images": [
                    "http://old-host:5000/uploads/legacy.jpg",
                    "https://images.example.com/remote.jpg"
                ],
                "agentPhoto": "https://old-host/uploads/agent.png"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["price"], json!(99000));
        assert_eq!(body["beds"], json!(0));
        assert_eq!(body["status"], "under-contract");
        assert_eq!(body["images"][0], "/uploads/legacy.jpg");
        assert_eq!(body["images"][1], "https://images.example.com/remote.jpg");
        assert_eq!(body["agentPhoto"], "/uploads/agent.png");
    }

    #[tokio::test]
    async fn test_create_validation_errors() {
        let t = app();

        let cases = [
            (json!({"price": 1}), "title is required"),
            (json!({"title": "x"}), "price is required"),
            (json!({"title": "x", "price": "abc"}), "price must be a number"),
            (
                json!({"title": "x", "price": 1, "beds": -2}),
                "beds must be a non-negative integer",
            ),
            (json!({"title": 12, "price": 1}), "title has an invalid type"),
        ];

        for (payload, message) in cases {
            let (status, body) = send_json(&t.router, "POST", "/", Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], message);
        }
        assert_eq!(t.repo.len(), 0);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let t = app_with(ListingConfig::default().with_max_upload_bytes(64));

        let big = vec![b'x'; 4096];
        let (status, _) = send_multipart(
            &t.router,
            "POST",
            "/",
            &[
                ("title", None, b"Loft"),
                ("price", None, b"1"),
                ("imageFiles", Some("big.jpg"), &big),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(t.media.saved().is_empty());
    }
}

#[cfg(test)]
mod read_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::support::*;
    use crate::domain::value_objects::ListingId;

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let t = app();
        for title in ["First", "Second"] {
            send_json(
                &t.router,
                "POST",
                "/",
                Some(json!({"title": title, "price": 1})),
            )
            .await;
        }

        let (status, body) = send_json(&t.router, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "Second");
        assert_eq!(body[1]["title"], "First");
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let t = app();
        let (_, created) = send_json(
            &t.router,
            "POST",
            "/",
            Some(json!({"title": "Loft", "price": 1})),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send_json(&t.router, "GET", &format!("/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Loft");

        let (status, body) = send_json(&t.router, "GET", "/not-an-id", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid id");

        let (status, body) =
            send_json(&t.router, "GET", &format!("/{}", ListingId::new()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }
}

#[cfg(test)]
mod update_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::support::*;
    use crate::domain::value_objects::ListingId;

    async fn seed(t: &TestApp) -> String {
        let (_, created) = send_json(
            &t.router,
            "POST",
            "/",
            Some(json!({
                "title": "Loft",
                "price": 100,
                "beds": 2,
                "images": ["/uploads/original.jpg"]
            })),
        )
        .await;
        created["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let t = app();
        let id = seed(&t).await;

        let (status, body) = send_json(
            &t.router,
            "PUT",
            &format!("/{id}"),
            Some(json!({"status": "sold", "price": "120"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "sold");
        assert_eq!(body["price"], json!(120));
        assert_eq!(body["title"], "Loft");
        assert_eq!(body["beds"], json!(2));
        assert_eq!(body["images"], json!(["/uploads/original.jpg"]));
    }

    #[tokio::test]
    async fn test_uploaded_images_replace_list() {
        let t = app();
        let id = seed(&t).await;

        let (status, body) = send_multipart(
            &t.router,
            "PUT",
            &format!("/{id}"),
            &[
                ("images", None, b"/uploads/ignored.jpg"),
                ("imageFiles", Some("new.webp"), b"new"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let images = body["images"].as_array().unwrap();
        assert_eq!(images.len(), 1);
        assert!(images[0].as_str().unwrap().ends_with(".webp"));
    }

    #[tokio::test]
    async fn test_images_text_field_replaces_list() {
        let t = app();
        let id = seed(&t).await;

        let (status, body) = send_multipart(
            &t.router,
            "PUT",
            &format!("/{id}"),
            &[("images", None, br#"["/uploads/a.jpg","/uploads/b.jpg"]"#)],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["images"], json!(["/uploads/a.jpg", "/uploads/b.jpg"]));
    }

    #[tokio::test]
    async fn test_blank_validated_fields_are_rejected() {
        let t = app();
        let id = seed(&t).await;

        let (status, body) = send_json(
            &t.router,
            "PUT",
            &format!("/{id}"),
            Some(json!({"title": "", "price": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "title must not be empty");

        let (status, body) = send_multipart(
            &t.router,
            "PUT",
            &format!("/{id}"),
            &[("price", None, b"")],
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "price must be a number");

        let (_, listing) = send_json(&t.router, "GET", &format!("/{id}"), None).await;
        assert_eq!(listing["title"], "Loft");
    }

    #[tokio::test]
    async fn test_whole_float_counts_are_accepted() {
        let t = app();
        let id = seed(&t).await;

        let (status, body) = send_json(
            &t.router,
            "PUT",
            &format!("/{id}"),
            Some(json!({"beds": 4.0, "baths": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["beds"], json!(4));
        assert_eq!(body["baths"], json!(2));
    }

    #[tokio::test]
    async fn test_empty_body_is_an_empty_update() {
        let t = app();
        let id = seed(&t).await;

        let (status, body) = send_raw(&t.router, "PUT", &format!("/{id}"), None, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Loft");
        assert_eq!(body["beds"], json!(2));
    }

    #[tokio::test]
    async fn test_urlencoded_update() {
        let t = app();
        let id = seed(&t).await;

        let (status, body) = send_raw(
            &t.router,
            "PUT",
            &format!("/{id}"),
            Some("application/x-www-form-urlencoded"),
            "status=sold&price=125000",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "sold");
        assert_eq!(body["price"], json!(125000));
    }

    #[tokio::test]
    async fn test_update_errors() {
        let t = app();
        let id = seed(&t).await;

        let (status, body) = send_json(
            &t.router,
            "PUT",
            &format!("/{}", ListingId::new()),
            Some(json!({"title": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");

        let (status, body) =
            send_json(&t.router, "PUT", "/bogus", Some(json!({"title": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid id");

        let (status, _) = send_json(
            &t.router,
            "PUT",
            &format!("/{id}"),
            Some(json!({"status": "leased"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod remove_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::support::*;

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let t = app();
        let (_, created) = send_json(
            &t.router,
            "POST",
            "/",
            Some(json!({"title": "Loft", "price": 1})),
        )
        .await;
        let uri = format!("/{}", created["id"].as_str().unwrap());

        let (status, body) = send_json(&t.router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true}));
        assert_eq!(t.repo.len(), 0);

        let (status, body) = send_json(&t.router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);

        let (status, body) = send_json(&t.router, "DELETE", "/nope", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid id");
    }
}
