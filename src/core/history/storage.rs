//! Index and conversation file persistence (index.json, conv_*.json).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::paths;
use crate::core::session::ChatEntry;

use super::ConversationMeta;

fn index_path() -> Option<PathBuf> {
    paths::data_dir().map(|d| d.join("index.json"))
}

fn conv_path(id: &str) -> Option<PathBuf> {
    paths::data_dir().map(|d| d.join(format!("conv_{}.json", id)))
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct IndexFile {
    pub(super) conversations: Vec<ConversationMeta>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConvFile {
    entries: Vec<ChatEntry>,
}

pub(super) fn ensure_data_dir() -> io::Result<PathBuf> {
    let dir = paths::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No data directory"))?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Write through a sibling tmp file so readers never see a partial file.
fn write_atomic(path: &Path, json: String) -> io::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)
}

/// Load the conversation index. Returns empty index when no data dir or file not found (first run).
/// Propagates IO errors (permission, disk) and JSON parse errors.
pub(super) fn load_index() -> io::Result<IndexFile> {
    let Some(path) = index_path() else {
        return Ok(IndexFile::default());
    };
    let data = match fs::read_to_string(&path) {
        Ok(d) => d,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(IndexFile::default()),
        Err(e) => return Err(e),
    };
    serde_json::from_str(&data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}

pub(super) fn save_index(index: &IndexFile) -> io::Result<()> {
    ensure_data_dir()?;
    let path =
        index_path().ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No index path"))?;
    let json = serde_json::to_string_pretty(index)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    write_atomic(&path, json)
}

pub(super) fn read_conv_entries(id: &str) -> Option<Vec<ChatEntry>> {
    let path = conv_path(id)?;
    let data = fs::read_to_string(&path).ok()?;
    match serde_json::from_str::<ConvFile>(&data) {
        Ok(file) => Some(file.entries),
        Err(e) => {
            log::warn!("Unreadable conversation file {}: {}", path.display(), e);
            None
        }
    }
}

pub(super) fn write_conv_file(id: &str, entries: &[ChatEntry]) -> io::Result<()> {
    let path =
        conv_path(id).ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No conv path"))?;
    let file = ConvFile {
        entries: entries.to_vec(),
    };
    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    write_atomic(&path, json)
}

/// Remove a conversation file. A missing file is not an error.
pub(super) fn remove_conv_file(id: &str) -> io::Result<()> {
    let Some(path) = conv_path(id) else {
        return Ok(());
    };
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
