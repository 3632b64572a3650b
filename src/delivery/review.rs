//! Multipart uploader for the packet-review service.

use std::time::Duration;

use log::{info, warn};
use reqwest::multipart;

use crate::capture::types::CaptureResult;
use crate::configuration::types::ReviewConfig;
use crate::error_handling::types::UploadError;

/// Builds `scheme://host[:port]/api/v1/{token}/upload`, leaving the port
/// segment out for the implicit defaults (80/443).
fn upload_url(scheme: &str, host: &str, port: u16, token: &str) -> String {
    if port != 80 && port != 443 {
        format!("{}://{}:{}/api/v1/{}/upload", scheme, host, port, token)
    } else {
        format!("{}://{}/api/v1/{}/upload", scheme, host, token)
    }
}

pub struct ReviewUploader {
    client: reqwest::Client,
    url: String,
}

impl ReviewUploader {
    /// The review service is typically self-signed on internal networks, so
    /// certificate verification stays disabled. Do not tighten this without
    /// a deployment-wide certificate story.
    pub fn new(
        scheme: &str,
        host: &str,
        port: u16,
        token: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: upload_url(scheme, host, port, token),
        })
    }

    pub fn from_config(config: &ReviewConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.scheme,
            &config.host,
            config.port,
            &config.token,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Posts the capture as a multipart form: one binary `file` part plus
    /// the `additional_tags` field. Response status and body are logged on
    /// every outcome; a non-2xx response is logged, not retried.
    pub async fn upload(&self, result: &CaptureResult) -> Result<(), UploadError> {
        let part = multipart::Part::bytes(result.data.clone())
            .file_name(result.filename.clone())
            .mime_str("application/octet-stream")
            .map_err(|e| UploadError::Unclassified(e.to_string()))?;
        let form = multipart::Form::new()
            .text("additional_tags", result.tag.clone())
            .part("file", part);

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Unclassified(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        println!("{}", status.as_u16());
        println!("{}", body);
        if status.is_success() {
            info!(
                "review upload of {}: status {}, body: {}",
                result.filename, status, body
            );
        } else {
            warn!(
                "review upload of {} rejected: status {}, body: {}",
                result.filename, status, body
            );
        }

        Ok(())
    }
}
