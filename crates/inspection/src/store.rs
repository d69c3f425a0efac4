//! File-backed persistence for sessions and results, one JSON document each.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::aggregate::InspectionResult;
use crate::sample::SessionInfo;
use crate::{EngineError, Result};

const SESSION_PREFIX: &str = "session_";
const RESULT_PREFIX: &str = "result_";

/// Durable store keyed by session id. Sessions are append-only and
/// historical; results are overwritten whole on each save. Concurrent saves
/// to the same session id are last-writer-wins, there is no locking.
#[derive(Clone, Debug)]
pub struct InspectionStore {
    dir: PathBuf,
}

impl InspectionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn session_path(&self, session_id: &str) -> PathBuf {
        self.dir.join(format!("{SESSION_PREFIX}{session_id}.json"))
    }

    fn result_path(&self, session_id: &str) -> PathBuf {
        self.dir.join(format!("{RESULT_PREFIX}{session_id}.json"))
    }

    pub fn save_session(&self, session: &SessionInfo) -> Result<()> {
        self.write_atomic(&self.session_path(&session.session_id), session)
    }

    pub fn load_session(&self, session_id: &str) -> Result<SessionInfo> {
        let path = self.session_path(session_id);
        if !path.exists() {
            return Err(EngineError::NotFound(format!("session {session_id}")));
        }
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// All sessions, newest first.
    pub fn list_sessions(&self) -> Result<Vec<SessionInfo>> {
        let mut sessions: Vec<SessionInfo> = self.load_all(SESSION_PREFIX)?;
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    /// Full overwrite of any prior result for the same session id.
    pub fn save_result(&self, result: &InspectionResult) -> Result<()> {
        self.write_atomic(&self.result_path(&result.session_id), result)
    }

    pub fn load_result(&self, session_id: &str) -> Result<InspectionResult> {
        let path = self.result_path(session_id);
        if !path.exists() {
            return Err(EngineError::NotFound(format!("result {session_id}")));
        }
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn list_results(&self) -> Result<Vec<InspectionResult>> {
        self.load_all(RESULT_PREFIX)
    }

    fn load_all<T: DeserializeOwned>(&self, prefix: &str) -> Result<Vec<T>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with(prefix) || !name.ends_with(".json") {
                continue;
            }
            let bytes = fs::read(entry.path())?;
            out.push(serde_json::from_slice(&bytes)?);
        }
        Ok(out)
    }

    // Write-to-temp-then-rename so a crash mid-write never leaves a corrupt
    // document behind.
    fn write_atomic<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let tmp = self
            .dir
            .join(format!(".tmp_{}", Uuid::new_v4().simple()));
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
