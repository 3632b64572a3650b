use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::capture::types::CaptureResult;

/// Writes completed captures into the configured local directory. The
/// directory's existence was checked at validation time.
pub struct LocalWriter {
    dir: PathBuf,
}

impl LocalWriter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn write(&self, result: &CaptureResult) -> Result<PathBuf, std::io::Error> {
        let path = self.dir.join(&result.filename);
        fs::write(&path, &result.data)?;
        debug!("wrote capture {} to {}", result.filename, path.display());
        Ok(path)
    }
}
