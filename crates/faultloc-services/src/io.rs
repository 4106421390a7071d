//! Document IO. Writes go through a temp file in the same directory followed
//! by a rename, so readers never observe a half-written catalogue file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use faultloc_core::Result;
use faultloc_domain::FaultDocument;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path} as a fault document")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn load_document(path: &Path) -> std::result::Result<FaultDocument, DocumentError> {
    let raw = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a sync target. A file that does not exist yet, or that exists but is
/// unreadable, becomes an empty document to fill rather than an abort; the
/// boolean says whether the document will be newly created on disk.
pub fn load_target(path: &Path) -> (FaultDocument, bool) {
    if !path.exists() {
        return (FaultDocument::default(), true);
    }
    match load_document(path) {
        Ok(doc) => (doc, false),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "target unreadable, starting from empty");
            (FaultDocument::default(), false)
        }
    }
}

/// Atomically replace `path` with the serialized document. With `backup` set
/// and an existing file, a `.json.bak` copy of the previous contents is kept
/// next to it first.
pub fn save_document(path: &Path, doc: &FaultDocument, backup: bool) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if backup && path.exists() {
        let bak = path.with_extension("json.bak");
        fs::copy(path, &bak)?;
        tracing::debug!(path = %bak.display(), "wrote backup");
    }
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    let body = serde_json::to_string_pretty(doc)?;
    tmp.write_all(body.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.persist(path)?;
    Ok(())
}
