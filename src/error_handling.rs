pub mod types;

pub use types::{CaptureError, ConfigError, ResolveError, TransportError, UploadError};
