//! Object storage uploads.

use std::path::Path;

use tracing::debug;

use super::RestClient;
use crate::endpoints::{public_object_url, upload_url};
use crate::error::RestResult;
use crate::http::{HttpBackend, RestRequest};

/// Content type sent with an upload, from the file extension.
fn content_type_for(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

impl<B: HttpBackend> RestClient<B> {
    /// Upload into the configured bucket and return the public URL.
    pub async fn upload_object(&self, bytes: Vec<u8>, path: &str) -> RestResult<String> {
        let url = upload_url(&self.base_url, &self.bucket, path);
        let size = bytes.len();
        self.backend
            .execute(RestRequest::upload(url, bytes, content_type_for(path)))
            .await?;
        debug!(bucket = %self.bucket, path, size, "Uploaded object");
        Ok(public_object_url(&self.base_url, &self.bucket, path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::fake_client;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use crate::http::{Body, Method};
    use serde_json::json;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("portfolio/a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("tour/b.webp"), "image/webp");
        assert_eq!(content_type_for("timeline/c.bin"), "application/octet-stream");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_upload_object() {
        let client = fake_client(FakeBackend::new().with_response(
            Method::Post,
            "/storage/v1/object/mark_images/",
            CannedResponse::Json(json!({ "Key": "mark_images/portfolio/a.png" })),
        ));

        let url = client
            .upload_object(vec![9, 9], "portfolio/a.png")
            .await
            .unwrap();
        assert_eq!(
            url,
            "https://abc.supabase.co/storage/v1/object/public/mark_images/portfolio/a.png"
        );

        let requests = client.backend.requests();
        assert_eq!(
            requests[0].body,
            Body::Bytes {
                bytes: vec![9, 9],
                content_type: "image/png".to_string(),
            }
        );
    }
}
