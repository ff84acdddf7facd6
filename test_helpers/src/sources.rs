//! Scratch directories holding configuration source files.
//!
//! ```
//! use blendconf_test_helpers::SourceDir;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dir = SourceDir::new()?;
//! let path = dir.write("base.yaml", "db:\n  host: a\n")?;
//! assert!(path.ends_with("base.yaml"));
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary directory removed on drop.
#[derive(Debug)]
pub struct SourceDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl SourceDir {
    /// Create an empty scratch directory.
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created or its path is not UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create scratch directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("non UTF-8 temp path: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Directory root.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Path of `name` inside the directory, whether or not it exists.
    #[must_use]
    pub fn join(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write `contents` to `name` and return the full path.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be written.
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> Result<Utf8PathBuf> {
        let path = self.join(name);
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Read `name` back as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing or not UTF-8.
    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.join(name);
        std::fs::read_to_string(&path).with_context(|| format!("read {path}"))
    }
}
