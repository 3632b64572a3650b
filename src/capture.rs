pub mod engine;
pub mod types;

pub use engine::PcapEngine;
pub use types::{CaptureEngine, CaptureOutput, CaptureResult, CaptureSpec};
