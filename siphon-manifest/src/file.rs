use std::path::{Path, PathBuf};

use siphon_store::SqliteOptions;

use crate::{Error, Manifest, Result};

/// Represents a siphon.toml file with both raw content and parsed manifest.
///
/// Relative paths in the manifest (database file, introspection dump) are
/// resolved against the directory holding the file.
pub struct SiphonToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl SiphonToml {
    /// Open and parse a siphon.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory that relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            self.base_dir().join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Store options for the `[database]` table.
    pub fn database_options(&self) -> Result<SqliteOptions> {
        self.manifest.sqlite().to_options(self.base_dir())
    }

    /// The configured introspection dump path, resolved.
    pub fn dump_path(&self) -> Option<PathBuf> {
        self.manifest
            .introspection
            .dump
            .as_deref()
            .map(|path| self.resolve(path))
    }
}
