use crate::category::Category;
use crate::error::Result;
use crate::event::AnalyticsEvent;
use crate::plugin::{AnalyticsPlugin, CategoryPlugin, PluginDescriptor};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Appends events to a file, one JSON document per line
pub struct FileAnalyticsPlugin {
    descriptor: PluginDescriptor,
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileAnalyticsPlugin {
    /// Open `path` for appending, creating it and its parent directories
    pub fn open(key: &str, path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing::debug!("File analytics plugin '{}' writing to {}", key, path.display());

        Ok(Self {
            descriptor: PluginDescriptor::new(
                key,
                "JSON lines file analytics",
                Category::Analytics,
            ),
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, BufWriter<File>> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CategoryPlugin for FileAnalyticsPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }
}

impl AnalyticsPlugin for FileAnalyticsPlugin {
    fn record(&self, event: AnalyticsEvent) -> Result<()> {
        // Each event goes out whole, terminator included.
        let mut line = serde_json::to_vec(&event)?;
        line.push(b'\n');
        self.lock().write_all(&line)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.lock().flush()?;
        Ok(())
    }
}

impl Drop for FileAnalyticsPlugin {
    fn drop(&mut self) {
        if let Err(e) = self.lock().flush() {
            tracing::error!("Failed to flush {}: {}", self.path.display(), e);
        }
    }
}
