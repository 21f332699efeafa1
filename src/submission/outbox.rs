use super::{SubmissionError, SubmissionId, SubmissionService};
use crate::intake::payload::BugReportPayload;
use crate::shared::fs_atomic::atomic_write_file;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

const OUTBOX_ID_PREFIX: &str = "bug-";

fn io_error(path: &Path, source: std::io::Error) -> SubmissionError {
    SubmissionError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn json_error(path: &Path, source: serde_json::Error) -> SubmissionError {
    SubmissionError::Json {
        path: path.display().to_string(),
        source,
    }
}

/// Captures reports as JSON files in a local directory instead of sending
/// them anywhere. Useful offline and as a stand-in backend.
#[derive(Debug, Clone)]
pub struct OutboxSubmissionService {
    dir: PathBuf,
}

impl OutboxSubmissionService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

pub fn outbox_id_for(body: &[u8]) -> SubmissionId {
    let digest = Sha256::digest(body);
    let hash = digest[..6]
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<String>();
    SubmissionId::new(format!("{OUTBOX_ID_PREFIX}{hash}"))
}

impl OutboxSubmissionService {
    /// First unused id for `body`. The capture time and an attempt counter are
    /// hashed with it, so identical reports never share a file.
    fn unused_id_for(&self, body: &[u8]) -> (SubmissionId, PathBuf) {
        let received_at = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default();
        let mut attempt: u32 = 0;
        loop {
            let mut input = body.to_vec();
            input.extend_from_slice(format!("\n{received_at}:{attempt}").as_bytes());
            let id = outbox_id_for(&input);
            let path = self.dir.join(format!("{id}.json"));
            if !path.exists() {
                return (id, path);
            }
            attempt += 1;
        }
    }
}

impl SubmissionService for OutboxSubmissionService {
    fn create(&self, payload: &BugReportPayload) -> Result<SubmissionId, SubmissionError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        let body = serde_json::to_vec_pretty(payload).map_err(|e| json_error(&self.dir, e))?;
        let (id, path) = self.unused_id_for(&body);
        atomic_write_file(&path, &body).map_err(|e| io_error(&path, e))?;
        Ok(id)
    }
}

/// Reports captured in `dir`, ordered by id. A missing directory is empty.
pub fn list_outbox_reports(
    dir: &Path,
) -> Result<Vec<(SubmissionId, BugReportPayload)>, SubmissionError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(io_error(dir, err)),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        let Some(name) = path.file_name().and_then(|v| v.to_str()) else {
            continue;
        };
        if name.starts_with(OUTBOX_ID_PREFIX) && name.ends_with(".json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        let raw = fs::read(&path).map_err(|e| io_error(&path, e))?;
        let payload: BugReportPayload =
            serde_json::from_slice(&raw).map_err(|e| json_error(&path, e))?;
        let id = path
            .file_stem()
            .and_then(|v| v.to_str())
            .map(SubmissionId::new)
            .unwrap_or_else(|| outbox_id_for(&raw));
        reports.push((id, payload));
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::{list_outbox_reports, outbox_id_for};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn outbox_ids_are_stable_per_body() {
        assert_eq!(outbox_id_for(b"same"), outbox_id_for(b"same"));
        assert_ne!(outbox_id_for(b"one"), outbox_id_for(b"two"));
        assert_eq!(outbox_id_for(b"x").as_str().len(), "bug-".len() + 12);
    }

    #[test]
    fn listing_a_missing_outbox_is_empty() {
        let dir = tempdir().expect("tempdir");
        let reports = list_outbox_reports(&dir.path().join("absent")).expect("list");
        assert!(reports.is_empty());
    }

    #[test]
    fn listing_ignores_unrelated_files() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("notes.txt"), "hello").expect("write");
        fs::write(dir.path().join(".bug-1.json.tmp-1-2"), "{}").expect("write");
        assert!(list_outbox_reports(dir.path()).expect("list").is_empty());
    }
}
