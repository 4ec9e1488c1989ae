use std::path::PathBuf;
use tracing::{info, warn};

/// Holds the PID file for the life of the process and removes it on drop.
pub struct PidFile {
    path: Option<PathBuf>,
}

impl PidFile {
    pub fn create(path: Option<&str>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self { path: None });
        };

        let path = PathBuf::from(path);
        std::fs::write(&path, format!("{}\n", std::process::id())).map_err(|e| {
            anyhow::anyhow!("Failed to write PID file {}: {}", path.display(), e)
        })?;
        info!(path = %path.display(), pid = std::process::id(), "PID file written");

        Ok(Self { path: Some(path) })
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        if let Some(path) = &self.path {
            if let Err(e) = std::fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "Failed to remove PID file");
            }
        }
    }
}
