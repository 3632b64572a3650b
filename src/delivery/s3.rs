//! Object-store uploader.
//!
//! The SDK's open error hierarchy is flattened into the crate's closed
//! [`UploadError`] set right here, so the dispatch layer pattern-matches
//! three shapes instead of probing error traits.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::operation::RequestId;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{ObjectCannedAcl, ServerSideEncryption};
use log::info;

use crate::capture::types::CaptureResult;
use crate::configuration::types::S3Config;
use crate::error_handling::types::UploadError;

/// Content type from the buffer's leading bytes, falling back to the
/// filename extension. Capture files normally hit the magic-number path.
fn detect_content_type(data: &[u8], filename: &str) -> String {
    const PCAP_MAGICS: [[u8; 4]; 4] = [
        [0xa1, 0xb2, 0xc3, 0xd4],
        [0xd4, 0xc3, 0xb2, 0xa1],
        [0xa1, 0xb2, 0x3c, 0x4d],
        [0x4d, 0x3c, 0xb2, 0xa1],
    ];
    const PCAPNG_MAGIC: [u8; 4] = [0x0a, 0x0d, 0x0d, 0x0a];

    if data.len() >= 4 {
        let head = &data[..4];
        if PCAP_MAGICS.iter().any(|m| m == head) || head == PCAPNG_MAGIC {
            return "application/vnd.tcpdump.pcap".to_string();
        }
    }
    mime_guess::from_path(filename)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}

fn classify_error(err: SdkError<PutObjectError>) -> UploadError {
    match err {
        SdkError::ServiceError(ctx) => {
            let status = ctx.raw().status().as_u16();
            let err = ctx.into_err();
            UploadError::RequestFailure {
                code: err.code().unwrap_or("Unknown").to_string(),
                message: err.message().unwrap_or_default().to_string(),
                status,
                request_id: err.request_id().map(str::to_string),
            }
        }
        other => match other.code().map(str::to_string) {
            Some(code) => {
                let message = other.message().unwrap_or_default().to_string();
                let cause = std::error::Error::source(&other).map(|c| c.to_string());
                UploadError::Generic { code, message, cause }
            }
            None => UploadError::Unclassified(DisplayErrorContext(&other).to_string()),
        },
    }
}

pub struct S3Uploader {
    client: aws_sdk_s3::Client,
    bucket: String,
    folder: String,
    acl: String,
    encryption: bool,
}

impl S3Uploader {
    /// Assumes a validated, defaulted `[s3]` section. Path-style addressing
    /// is forced so non-AWS endpoints work.
    pub async fn from_config(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(ref region) = config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared).force_path_style(true);
        if let Some(ref endpoint) = config.endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }
        let client = aws_sdk_s3::Client::from_conf(builder.build());

        Self {
            client,
            bucket: config.bucket.clone().unwrap_or_default(),
            folder: config.folder.clone().unwrap_or_default(),
            acl: config.acl.clone().unwrap_or_default(),
            encryption: config.encryption.unwrap_or(false),
        }
    }

    pub async fn upload(&self, result: &CaptureResult) -> Result<(), UploadError> {
        let key = format!("/{}/{}", self.folder, result.filename);
        let content_type = detect_content_type(&result.data, &result.filename);

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .acl(ObjectCannedAcl::from(self.acl.as_str()))
            .body(ByteStream::from(result.data.clone()))
            .content_length(result.size as i64)
            .content_type(content_type)
            .metadata("tags", &result.tag);
        if self.encryption {
            request = request.server_side_encryption(ServerSideEncryption::Aes256);
        }

        request.send().await.map_err(classify_error)?;

        println!("S3 upload successful: {}", result.filename);
        info!(
            "S3 upload successful: {} ({} bytes to {}{})",
            result.filename, result.size, self.bucket, key
        );
        Ok(())
    }
}
