//! Fan-out of a completed capture to its configured destinations.
//!
//! Each destination is attempted independently: a failing upload is logged
//! with its classification and never prevents the remaining destinations
//! from being tried. Nothing here retries; that belongs to an outer layer.

pub mod local;
pub mod review;
pub mod s3;

pub use local::LocalWriter;
pub use review::ReviewUploader;
pub use s3::S3Uploader;

use log::{error, info};

use crate::capture::types::CaptureResult;
use crate::configuration::Config;
use crate::error_handling::types::UploadError;

pub struct Delivery {
    review: Option<ReviewUploader>,
    store: Option<S3Uploader>,
    local: Option<LocalWriter>,
}

impl Delivery {
    pub fn new(
        review: Option<ReviewUploader>,
        store: Option<S3Uploader>,
        local: Option<LocalWriter>,
    ) -> Self {
        Self { review, store, local }
    }

    /// Builds the enabled sinks once at startup. Assumes a validated,
    /// defaulted configuration.
    pub async fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let review = if config.review.upload {
            Some(ReviewUploader::from_config(&config.review)?)
        } else {
            None
        };
        let store = if config.s3.upload {
            Some(S3Uploader::from_config(&config.s3).await)
        } else {
            None
        };
        let local = if config.general.write_local {
            Some(LocalWriter::new(&config.general.local_dir))
        } else {
            None
        };
        Ok(Self { review, store, local })
    }

    /// Hands the capture to every enabled destination in turn.
    pub async fn dispatch(&self, result: &CaptureResult) {
        if let Some(ref review) = self.review {
            if let Err(e) = review.upload(result).await {
                error!("review upload failed for {}: {}", result.filename, e);
            }
        }

        if let Some(ref store) = self.store {
            match store.upload(result).await {
                Ok(()) => {}
                Err(UploadError::RequestFailure {
                    code,
                    message,
                    status,
                    request_id,
                }) => {
                    println!(
                        "S3 error: {} {} (status {}, request id {})",
                        code,
                        message,
                        status,
                        request_id.as_deref().unwrap_or("unknown")
                    );
                    error!(
                        "S3 error uploading {}: {} {} (status {}, request id {})",
                        result.filename,
                        code,
                        message,
                        status,
                        request_id.as_deref().unwrap_or("unknown")
                    );
                }
                Err(UploadError::Generic { code, message, cause }) => {
                    println!("S3 error: {} {}", code, message);
                    error!(
                        "S3 error uploading {}: {} {} (caused by: {})",
                        result.filename,
                        code,
                        message,
                        cause.as_deref().unwrap_or("none")
                    );
                }
                Err(UploadError::Unclassified(message)) => {
                    error!("S3 error uploading {}: {}", result.filename, message);
                }
            }
        }

        if let Some(ref local) = self.local {
            match local.write(result) {
                Ok(path) => info!("wrote {} byte(s) to {}", result.size, path.display()),
                Err(e) => error!("local write of {} failed: {}", result.filename, e),
            }
        }
    }
}
