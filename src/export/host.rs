//! Host side effects: offering a file for download and alerting the user.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// The environment an export reports to.
pub trait Host: Send + Sync {
    /// Offer a file to the user.
    fn download(&self, filename: &str, bytes: &[u8]) -> Result<()>;

    /// Show a message to the user.
    fn alert(&self, message: &str);
}

/// Host that saves downloads into a directory.
///
/// Alerts are logged at error level.
#[derive(Debug, Clone)]
pub struct DirectoryHost {
    dir: PathBuf,
}

impl DirectoryHost {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a download with this filename is written to.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl Host for DirectoryHost {
    fn download(&self, filename: &str, bytes: &[u8]) -> Result<()> {
        if filename.is_empty() || filename.contains(['/', '\\']) || filename == ".." {
            return Err(Error::Host(format!("refusing filename {:?}", filename)));
        }
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(filename);
        std::fs::write(&path, bytes)?;
        log::info!("saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    fn alert(&self, message: &str) {
        log::error!("{}", message);
    }
}

/// A download recorded by [`MemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Host that records side effects in memory.
#[derive(Debug, Default)]
pub struct MemoryHost {
    downloads: Mutex<Vec<Download>>,
    alerts: Mutex<Vec<String>>,
    reject_downloads: bool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host whose downloads always fail.
    pub fn rejecting_downloads() -> Self {
        Self {
            reject_downloads: true,
            ..Self::default()
        }
    }

    /// Downloads received so far.
    pub fn downloads(&self) -> Vec<Download> {
        lock(&self.downloads).clone()
    }

    /// Alerts received so far.
    pub fn alerts(&self) -> Vec<String> {
        lock(&self.alerts).clone()
    }

    /// Total number of side effects (downloads plus alerts).
    pub fn side_effects(&self) -> usize {
        lock(&self.downloads).len() + lock(&self.alerts).len()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        lock(&self.downloads).clear();
        lock(&self.alerts).clear();
    }
}

impl Host for MemoryHost {
    fn download(&self, filename: &str, bytes: &[u8]) -> Result<()> {
        if self.reject_downloads {
            return Err(Error::Host("downloads are disabled".into()));
        }
        lock(&self.downloads).push(Download {
            filename: filename.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }

    fn alert(&self, message: &str) {
        lock(&self.alerts).push(message.to_string());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
