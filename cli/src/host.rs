//! Terminal host: saves downloads to a directory and prints alerts.

use colored::Colorize;
use std::path::Path;
use ticketpdf::{DirectoryHost, Host};

pub struct CliHost {
    inner: DirectoryHost,
}

impl CliHost {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            inner: DirectoryHost::new(dir),
        }
    }
}

impl Host for CliHost {
    fn download(&self, filename: &str, bytes: &[u8]) -> ticketpdf::Result<()> {
        self.inner.download(filename, bytes)?;
        let path = self.inner.path_for(filename);
        println!("{} {}", "Saved to".green(), path.display());
        Ok(())
    }

    fn alert(&self, message: &str) {
        eprintln!("{}: {}", "Alert".red().bold(), message);
    }
}
