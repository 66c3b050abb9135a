//! Persistence seam for the node store.
//!
//! A repository hands back every recorded operation in replay order and
//! durably records new ones. The store itself is always rebuilt by replay, so
//! a repository never needs to understand tree structure.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use canopy_core::trail::TrailOperation;
use canopy_schema::SchemaRegistry;

use crate::error::StoreError;
use crate::trail::writer::{TrailWriter, trail_files};

/// Every recorded operation, ready for replay.
#[derive(Debug, Clone, Default)]
pub struct TrailSnapshot {
    pub operations: Vec<TrailOperation>,
    /// Number of backing files read (0 for in-memory repositories).
    pub files: u32,
}

pub trait TreeRepository: Send {
    /// Load every recorded operation in replay order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Trail` if the backing data cannot be read.
    fn load(&self) -> Result<TrailSnapshot, StoreError>;

    /// Durably record one operation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Trail` if the write fails.
    fn record(&mut self, op: &TrailOperation) -> Result<(), StoreError>;
}

/// JSONL trail directory.
pub struct TrailRepository {
    writer: TrailWriter,
    schema: Option<SchemaRegistry>,
}

impl TrailRepository {
    /// Open (creating if needed) the trail at `trail_dir`. With `validate`,
    /// create bodies are schema-checked before they are appended.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Trail` if the directory cannot be created.
    pub fn open(trail_dir: PathBuf, validate: bool) -> Result<Self, StoreError> {
        Ok(Self {
            writer: TrailWriter::new(trail_dir)?,
            schema: validate.then(SchemaRegistry::new),
        })
    }

    #[must_use]
    pub fn trail_dir(&self) -> &Path {
        self.writer.trail_dir()
    }
}

impl TreeRepository for TrailRepository {
    /// Files in name order, lines in append order, then a stable sort by
    /// `seq`. Timestamps are never compared: a clock that stepped back puts a
    /// later operation in an earlier day file, and `seq` still places it.
    fn load(&self) -> Result<TrailSnapshot, StoreError> {
        let files = trail_files(self.writer.trail_dir())?;
        let mut operations: Vec<TrailOperation> = Vec::new();
        for path in &files {
            let ops: Vec<TrailOperation> = serde_jsonlines::json_lines(path)
                .map_err(|e| StoreError::Trail(format!("open {}: {e}", path.display())))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| StoreError::Trail(format!("parse {}: {e}", path.display())))?;
            operations.extend(ops);
        }
        operations.sort_by_key(|op| op.seq);

        Ok(TrailSnapshot {
            operations,
            files: u32::try_from(files.len()).unwrap_or(u32::MAX),
        })
    }

    fn record(&mut self, op: &TrailOperation) -> Result<(), StoreError> {
        match &self.schema {
            Some(schema) => self.writer.append_validated(op, schema),
            None => self.writer.append(op),
        }
    }
}

/// In-memory operation log. Clones share the same log, so a second service
/// can be opened over what a first one recorded.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    operations: Arc<Mutex<Vec<TrailOperation>>>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the recorded operations.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidState` if the log lock is poisoned.
    pub fn operations(&self) -> Result<Vec<TrailOperation>, StoreError> {
        self.operations
            .lock()
            .map(|ops| ops.clone())
            .map_err(|_| StoreError::InvalidState("memory trail lock poisoned".into()))
    }
}

impl TreeRepository for MemoryRepository {
    fn load(&self) -> Result<TrailSnapshot, StoreError> {
        Ok(TrailSnapshot {
            operations: self.operations()?,
            files: 0,
        })
    }

    fn record(&mut self, op: &TrailOperation) -> Result<(), StoreError> {
        self.operations
            .lock()
            .map_err(|_| StoreError::InvalidState("memory trail lock poisoned".into()))?
            .push(op.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::enums::{NodeKind, TrailOp};

    fn op(seq: u64, ts: &str, id: &str) -> TrailOperation {
        TrailOperation {
            v: 1,
            seq,
            ts: ts.into(),
            op: TrailOp::Delete,
            entity: NodeKind::Evidence,
            id: id.into(),
            parent: None,
            data: serde_json::Value::Null,
        }
    }

    #[test]
    fn trail_load_follows_sequence_when_the_clock_steps_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = TrailRepository::open(dir.path().to_path_buf(), false).unwrap();
        repo.record(&op(1, "2026-03-02T10:00:00.000000Z", "evd-a")).unwrap();
        repo.record(&op(2, "2026-03-01T23:59:00.000000Z", "evd-b")).unwrap();
        repo.record(&op(3, "2026-03-02T09:00:00.000000Z", "evd-c")).unwrap();

        let snapshot = repo.load().unwrap();
        assert_eq!(snapshot.files, 2);
        let ids: Vec<&str> = snapshot.operations.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["evd-a", "evd-b", "evd-c"]);
    }

    #[test]
    fn unsequenced_lines_keep_file_and_line_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = TrailRepository::open(dir.path().to_path_buf(), false).unwrap();
        repo.record(&op(0, "2026-03-02T10:00:00.000000Z", "evd-c")).unwrap();
        repo.record(&op(0, "2026-03-01T10:00:00.000000Z", "evd-a")).unwrap();
        repo.record(&op(0, "2026-03-02T09:00:00.000000Z", "evd-d")).unwrap();

        let ids: Vec<String> = repo.load().unwrap().operations.into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["evd-a", "evd-c", "evd-d"]);
    }

    #[test]
    fn memory_clones_share_the_log() {
        let mut first = MemoryRepository::new();
        let second = first.clone();
        first.record(&op(1, "2026-03-01T10:00:00.000000Z", "evd-1")).unwrap();
        assert_eq!(second.load().unwrap().operations.len(), 1);
    }

    #[test]
    fn empty_trail_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = TrailRepository::open(dir.path().join("trail"), true).unwrap();
        let snapshot = repo.load().unwrap();
        assert!(snapshot.operations.is_empty());
        assert_eq!(snapshot.files, 0);
    }
}
