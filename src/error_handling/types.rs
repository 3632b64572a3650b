use std::fmt;

/// Fatal startup errors produced by configuration validation.
///
/// Any of these terminates the process before a listener starts.
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    NoDestination,
    NoTriggerSource,
    MissingField(&'static str, &'static str),
    MissingInterface(String),
    MissingDirectory(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::NoDestination => write!(
                f,
                "you must enable at least one of: review upload, s3 upload or write_local"
            ),
            ConfigError::NoTriggerSource => {
                write!(f, "you must enable at least one listener: kafka, redis or sqs")
            }
            ConfigError::MissingField(section, field) => {
                write!(f, "[{}] requires `{}` to be set", section, field)
            }
            ConfigError::MissingInterface(name) => {
                write!(f, "interface {} does not exist on host", name)
            }
            ConfigError::MissingDirectory(dir) => write!(f, "local_dir {} does not exist", dir),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

/// Per-message alias lookup failures. Recoverable: the owning worker drops
/// the trigger and keeps its receive loop running.
#[derive(Debug, PartialEq)]
pub enum ResolveError {
    NotFound(String),
    Ambiguous(String, Vec<String>),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NotFound(name) => {
                write!(f, "no interface or alias named {}", name)
            }
            ResolveError::Ambiguous(alias, devices) => write!(
                f,
                "alias {} is ambiguous, maps to [{}]",
                alias,
                devices.join(", ")
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

#[derive(Debug)]
pub enum CaptureError {
    PcapError(pcap::Error),
    IoError(std::io::Error),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::PcapError(e) => write!(f, "pcap error: {}", e),
            CaptureError::IoError(e) => write!(f, "capture IO error: {}", e),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<pcap::Error> for CaptureError {
    fn from(err: pcap::Error) -> Self {
        CaptureError::PcapError(err)
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::IoError(err)
    }
}

/// Closed error set for the object-store uploader.
///
/// The SDK's open error hierarchy is mapped into these three shapes at the
/// uploader boundary so callers pattern-match instead of probing error traits.
#[derive(Debug)]
pub enum UploadError {
    /// Structured service error: machine-readable code, message, optional cause.
    Generic {
        code: String,
        message: String,
        cause: Option<String>,
    },
    /// Service error with HTTP response context attached.
    RequestFailure {
        code: String,
        message: String,
        status: u16,
        request_id: Option<String>,
    },
    /// Anything that did not match the structured error shape.
    Unclassified(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Generic { code, message, cause } => match cause {
                Some(cause) => write!(f, "{}: {} (caused by: {})", code, message, cause),
                None => write!(f, "{}: {}", code, message),
            },
            UploadError::RequestFailure {
                code,
                message,
                status,
                request_id,
            } => write!(
                f,
                "{}: {} (status {}, request id {})",
                code,
                message,
                status,
                request_id.as_deref().unwrap_or("unknown")
            ),
            UploadError::Unclassified(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for UploadError {}

/// Transport-level failures that end a listener's receive loop.
#[derive(Debug)]
pub enum TransportError {
    RedisError(redis::RedisError),
    KafkaError(rdkafka::error::KafkaError),
    SqsError(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::RedisError(e) => write!(f, "redis transport error: {}", e),
            TransportError::KafkaError(e) => write!(f, "kafka transport error: {}", e),
            TransportError::SqsError(e) => write!(f, "sqs transport error: {}", e),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<redis::RedisError> for TransportError {
    fn from(err: redis::RedisError) -> Self {
        TransportError::RedisError(err)
    }
}

impl From<rdkafka::error::KafkaError> for TransportError {
    fn from(err: rdkafka::error::KafkaError) -> Self {
        TransportError::KafkaError(err)
    }
}
