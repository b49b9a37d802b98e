//! Image upload pipeline against a mock object store

use wiremock::matchers::{header, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gatherly::config::StorageConfig;
use gatherly::services::storage::StorageService;

fn storage_config(endpoint: &str) -> StorageConfig {
    StorageConfig {
        endpoint: endpoint.to_string(),
        public_base_url: "https://cdn.example.com".to_string(),
        api_key: "test-key".to_string(),
        bucket: "event-images".to_string(),
        max_width: 640,
        max_height: 640,
        jpeg_quality: 80,
    }
}

fn sample_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(800, 600, image::Rgb([120, 90, 60]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
    bytes
}

#[tokio::test]
async fn upload_returns_public_url() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path_regex(r"^/event-images/events/[0-9a-f-]+\.jpg$"))
        .and(header("content-type", "image/jpeg"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let service = StorageService::new(storage_config(&server.uri()));
    let url = service.upload_image(&sample_png(), "events").await.unwrap();

    assert!(url.starts_with("https://cdn.example.com/event-images/events/"));
    assert!(url.ends_with(".jpg"));
}

#[tokio::test]
async fn upload_failure_yields_error_and_no_url() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = StorageService::new(storage_config(&server.uri()));
    let result = service.upload_image(&sample_png(), "events").await;

    assert!(result.is_err());
}

#[tokio::test]
async fn unreadable_image_fails_before_any_upload() {
    let server = MockServer::start().await;

    // No mock mounted: any request would fail the test on assertion below
    let service = StorageService::new(storage_config(&server.uri()));
    let result = service.upload_image(b"not an image", "events").await;

    assert!(result.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_resolves_object_path_from_public_url() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path_regex(r"^/event-images/events/abc\.jpg$"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let service = StorageService::new(storage_config(&server.uri()));
    service
        .delete_image("https://cdn.example.com/event-images/events/abc.jpg")
        .await
        .unwrap();
}
