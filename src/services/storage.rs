//! Object storage service implementation
//!
//! Image upload pipeline: decode the picked image, resize it to the
//! configured bounds, re-encode as JPEG, and upload it under a random
//! filename to the object store. Failure at any stage aborts the pipeline;
//! no retry is attempted.

use image::codecs::jpeg::JpegEncoder;
use tracing::debug;
use url::Url;

use crate::config::StorageConfig;
use crate::utils::errors::{Result, StorageError, StorageResult};
use crate::utils::helpers;
use crate::utils::logging::log_storage_operation;

/// Object storage service
#[derive(Clone)]
pub struct StorageService {
    client: reqwest::Client,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new StorageService instance
    pub fn new(config: StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Process and upload an image; returns its public URL.
    ///
    /// `path` is the folder inside the bucket (e.g. "events" or "avatars").
    pub async fn upload_image(&self, data: &[u8], path: &str) -> Result<String> {
        let encoded = self.process_image(data)?;

        let filename = format!("{}.jpg", helpers::generate_uuid());
        let object_path = format!(
            "{}/{}/{}",
            self.config.bucket,
            path.trim_matches('/'),
            filename
        );

        let upload_url = format!(
            "{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            object_path
        );

        let mut request = self
            .client
            .put(&upload_url)
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(encoded);

        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            log_storage_operation("upload", &object_path, false);
            return Err(StorageError::UploadFailed(format!(
                "object store returned status {}",
                response.status()
            ))
            .into());
        }

        log_storage_operation("upload", &object_path, true);

        Ok(format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            object_path
        ))
    }

    /// Delete an object previously uploaded, addressed by its public URL
    pub async fn delete_image(&self, public_url: &str) -> Result<()> {
        let object_path = self.object_path_from_url(public_url)?;

        let delete_url = format!(
            "{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            object_path
        );

        let mut request = self.client.delete(&delete_url);
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            log_storage_operation("delete", &object_path, false);
            return Err(StorageError::UploadFailed(format!(
                "object store returned status {}",
                response.status()
            ))
            .into());
        }

        log_storage_operation("delete", &object_path, true);
        Ok(())
    }

    /// Resolve the bucket-relative object path from a public URL
    pub fn object_path_from_url(&self, public_url: &str) -> StorageResult<String> {
        let url = Url::parse(public_url)
            .map_err(|e| StorageError::InvalidObjectUrl(e.to_string()))?;

        let path = url.path().trim_start_matches('/');
        if path.is_empty() {
            return Err(StorageError::InvalidObjectUrl(
                "URL has no object path".to_string(),
            ));
        }

        Ok(path.to_string())
    }

    /// Decode, bound and re-encode the image as JPEG
    fn process_image(&self, data: &[u8]) -> StorageResult<Vec<u8>> {
        let img = image::load_from_memory(data)
            .map_err(|e| StorageError::InvalidImage(e.to_string()))?;

        let bounded = if img.width() > self.config.max_width || img.height() > self.config.max_height
        {
            img.thumbnail(self.config.max_width, self.config.max_height)
        } else {
            img
        };

        debug!(
            width = bounded.width(),
            height = bounded.height(),
            quality = self.config.jpeg_quality,
            "Re-encoding image"
        );

        // JPEG has no alpha channel
        let rgb = bounded.to_rgb8();

        let mut encoded = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut encoded, self.config.jpeg_quality);
        encoder
            .encode_image(&rgb)
            .map_err(|e| StorageError::EncodeFailed(e.to_string()))?;

        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> StorageService {
        StorageService::new(StorageConfig {
            endpoint: "http://localhost:9000".to_string(),
            public_base_url: "https://cdn.example.com".to_string(),
            api_key: String::new(),
            bucket: "event-images".to_string(),
            max_width: 64,
            max_height: 64,
            jpeg_quality: 80,
        })
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
        bytes
    }

    #[test]
    fn test_process_image_bounds_dimensions() {
        let service = service();
        let encoded = service.process_image(&png_bytes(256, 128)).unwrap();

        let reloaded = image::load_from_memory(&encoded).unwrap();
        assert!(reloaded.width() <= 64);
        assert!(reloaded.height() <= 64);
        // Aspect ratio is preserved
        assert_eq!(reloaded.width(), 64);
        assert_eq!(reloaded.height(), 32);
    }

    #[test]
    fn test_process_image_outputs_jpeg() {
        let service = service();
        let encoded = service.process_image(&png_bytes(16, 16)).unwrap();

        assert_eq!(
            image::guess_format(&encoded).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_small_images_are_not_upscaled() {
        let service = service();
        let encoded = service.process_image(&png_bytes(16, 16)).unwrap();

        let reloaded = image::load_from_memory(&encoded).unwrap();
        assert_eq!(reloaded.width(), 16);
        assert_eq!(reloaded.height(), 16);
    }

    #[test]
    fn test_garbage_input_is_rejected() {
        let service = service();
        let result = service.process_image(b"definitely not an image");
        assert!(matches!(result, Err(StorageError::InvalidImage(_))));
    }

    #[test]
    fn test_object_path_from_url() {
        let service = service();
        let path = service
            .object_path_from_url("https://cdn.example.com/event-images/events/abc.jpg")
            .unwrap();
        assert_eq!(path, "event-images/events/abc.jpg");
    }

    #[test]
    fn test_object_path_rejects_invalid_urls() {
        let service = service();
        assert!(service.object_path_from_url("not a url").is_err());
    }
}
