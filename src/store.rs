// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Agora Platform

//! Durable comment storage.
//!
//! One JSON document per comment under `<data_dir>/comments/`. Writes are
//! staged in a temp file and renamed into place, so a record file on disk is
//! always a complete document. Absence is reported distinctly from
//! infrastructure failure everywhere: a missing record is `Ok(None)` or
//! `Ok(false)`, never an error. A corrupt record, on the other hand, is an
//! error and is never silently skipped.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for comment store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A persisted comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Store-assigned identifier (UUID v4), immutable.
    pub id: String,
    /// Comment body text, mutable through update.
    pub content: String,
    /// Campaign the comment is attached to, immutable.
    pub campaign_id: i64,
    /// Authoring citizen, bound at creation from a verified identity.
    pub citizen_id: i64,
    /// Creation time, immutable.
    pub publication_date: DateTime<Utc>,
    /// `None` until the first update, then the time of the latest update.
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// A comment about to be inserted; the store assigns the id and initializes
/// the modification timestamp.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub campaign_id: i64,
    pub citizen_id: i64,
    pub publication_date: DateTime<Utc>,
}

/// File-backed comment collection.
#[derive(Debug, Clone)]
pub struct CommentStore {
    dir: PathBuf,
}

impl CommentStore {
    /// Open the store under `data_dir`, creating the comments directory if
    /// needed. Safe to call on every startup.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = data_dir.as_ref().join("comments");
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Whether the backing directory is still reachable.
    pub fn is_ready(&self) -> bool {
        self.dir.is_dir()
    }

    /// Insert a new comment, assigning a fresh id. The record starts with no
    /// modification timestamp.
    pub fn insert(&self, new: NewComment) -> Result<Comment, StoreError> {
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            content: new.content,
            campaign_id: new.campaign_id,
            citizen_id: new.citizen_id,
            publication_date: new.publication_date,
            last_modified_date: None,
        };
        self.write_record(&comment.id, &comment)?;
        Ok(comment)
    }

    /// Look up a comment by id. Absence is `Ok(None)`.
    pub fn find_by_id(&self, id: &str) -> Result<Option<Comment>, StoreError> {
        if !is_valid_id(id) {
            return Ok(None);
        }
        match fs::read(self.record_path(id)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All stored comments, in directory iteration order.
    pub fn find_all(&self) -> Result<Vec<Comment>, StoreError> {
        let mut comments = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let bytes = fs::read(&path)?;
            comments.push(serde_json::from_slice(&bytes)?);
        }
        Ok(comments)
    }

    /// All comments attached to one campaign.
    pub fn find_by_campaign(&self, campaign_id: i64) -> Result<Vec<Comment>, StoreError> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|comment| comment.campaign_id == campaign_id)
            .collect())
    }

    /// Replace the record stored under `id`. Returns `Ok(false)` when no
    /// such record exists.
    pub fn replace(&self, id: &str, comment: &Comment) -> Result<bool, StoreError> {
        if !is_valid_id(id) || !self.record_path(id).is_file() {
            return Ok(false);
        }
        self.write_record(id, comment)?;
        Ok(true)
    }

    /// Remove the record stored under `id`. Returns `Ok(false)` when no such
    /// record exists.
    pub fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        if !is_valid_id(id) {
            return Ok(false);
        }
        match fs::remove_file(self.record_path(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn write_record(&self, id: &str, comment: &Comment) -> Result<(), StoreError> {
        let path = self.record_path(id);
        // Stage the document in a temp file and rename it into place;
        // readers see either the old record or the new one, never a torn one.
        let temp_path = path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, comment)?;
            writer.flush()?;
        }
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

/// Ids are store-assigned UUIDs; anything outside that alphabet is treated
/// as absent so a crafted id cannot name a path outside the comments
/// directory.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
