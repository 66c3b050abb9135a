//! JSONL trail writer.
//!
//! Appends `TrailOperation` records to per-day `{trail_dir}/{YYYY-MM-DD}.jsonl`
//! files, keyed by the operation's own timestamp. Uses
//! `serde_jsonlines::append_json_lines` for per-line appends.

use std::path::{Path, PathBuf};

use canopy_core::enums::TrailOp;
use canopy_core::trail::TrailOperation;
use canopy_schema::SchemaRegistry;

use crate::error::StoreError;
use crate::store::parse_ts;

pub struct TrailWriter {
    trail_dir: PathBuf,
}

impl TrailWriter {
    /// Create a writer for `trail_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Trail` if the directory cannot be created.
    pub fn new(trail_dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&trail_dir).map_err(|e| {
            StoreError::Trail(format!("cannot create {}: {e}", trail_dir.display()))
        })?;
        Ok(Self { trail_dir })
    }

    /// File an operation lands in.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Trail` if the operation timestamp is not RFC 3339.
    pub fn path_for(&self, op: &TrailOperation) -> Result<PathBuf, StoreError> {
        let day = parse_ts(&op.ts)?.date_naive();
        Ok(self.trail_dir.join(format!("{day}.jsonl")))
    }

    /// Append one operation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Trail` if the file write fails.
    pub fn append(&self, op: &TrailOperation) -> Result<(), StoreError> {
        let path = self.path_for(op)?;
        serde_jsonlines::append_json_lines(&path, [op])
            .map_err(|e| StoreError::Trail(format!("append to {}: {e}", path.display())))
    }

    /// Append with a schema check of the `data` field.
    ///
    /// Only `Create` bodies are checked; update payloads are partial and would
    /// fail required-field checks. Failures are logged and the line is still
    /// written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Trail` if the file write fails.
    pub fn append_validated(
        &self,
        op: &TrailOperation,
        schema: &SchemaRegistry,
    ) -> Result<(), StoreError> {
        if op.op == TrailOp::Create {
            if let Err(e) = schema.validate(op.entity.as_str(), &op.data) {
                tracing::warn!(entity = %op.entity, id = %op.id, error = %e, "trail body failed schema validation");
            }
        }
        self.append(op)
    }

    #[must_use]
    pub fn trail_dir(&self) -> &Path {
        &self.trail_dir
    }
}

/// `.jsonl` files in `trail_dir`, sorted by name. A missing directory has none.
///
/// # Errors
///
/// Returns `StoreError::Trail` if the directory exists but cannot be read.
pub fn trail_files(trail_dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    if !trail_dir.exists() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(trail_dir)
        .map_err(|e| StoreError::Trail(format!("read {}: {e}", trail_dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| StoreError::Trail(format!("read {}: {e}", trail_dir.display())))?
            .path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("jsonl") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
