use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::slots::transport::{check_index, SlotTransport, TransportError};

#[derive(Debug, Serialize, Deserialize)]
struct SlotFile {
    payload: String,
    expires_at: DateTime<Utc>,
}

/// One JSON file per slot under a root directory: `<root>/<prefix><index>.json`.
///
/// Expiry removes the file; reads treat a past `expires_at` as absent.
#[derive(Debug, Clone)]
pub struct DirSlots {
    root: PathBuf,
    prefix: String,
}

impl DirSlots {
    pub fn open(root: &Path, prefix: impl Into<String>) -> Result<Self, TransportError> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            prefix: prefix.into(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, index: usize) -> PathBuf {
        self.root.join(format!("{}{index}.json", self.prefix))
    }
}

impl SlotTransport for DirSlots {
    fn read_slot(&self, index: usize) -> Result<Option<String>, TransportError> {
        check_index(index)?;
        let path = self.slot_path(index);
        if !path.exists() {
            return Ok(None);
        }

        let f = fs::File::open(&path)?;
        let slot: SlotFile = serde_json::from_reader(f)?;
        if slot.expires_at <= Utc::now() {
            return Ok(None);
        }
        Ok(Some(slot.payload))
    }

    fn write_slot(
        &mut self,
        index: usize,
        payload: &str,
        ttl: Duration,
    ) -> Result<(), TransportError> {
        check_index(index)?;
        let Some(expires_at) = Utc::now().checked_add_signed(ttl) else {
            return Err(TransportError::TtlOutOfRange(ttl));
        };

        let slot = SlotFile {
            payload: payload.to_string(),
            expires_at,
        };

        // Write-then-rename so a reader never sees a half-written slot.
        let path = self.slot_path(index);
        let temp = path.with_extension("json.tmp");
        let f = fs::File::create(&temp)?;
        serde_json::to_writer(&f, &slot)?;
        f.sync_all()?;
        fs::rename(&temp, &path)?;
        Ok(())
    }

    fn expire_slot(&mut self, index: usize) -> Result<(), TransportError> {
        check_index(index)?;
        let path = self.slot_path(index);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
