use crate::entry::Entry;
use crate::error::RegistryError;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const MEETINGS_FILE: &str = "meetings.json";

/// Persistence provider for the registry. `read` returns `None` when there is
/// nothing stored yet.
pub trait Store {
    fn read(&self, path: &Path) -> Result<Option<Vec<Entry>>, RegistryError>;
    fn write(&self, path: &Path, entries: &[Entry]) -> Result<(), RegistryError>;
}

/// `path` with `suffix` appended to its file name, e.g. `meetings.json.bak`.
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from(MEETINGS_FILE));
    name.push(suffix);
    path.with_file_name(name)
}

fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// Stores the registry as a single JSON array.
#[derive(Debug, Clone, Copy)]
pub struct JsonFileStore {
    pub pretty: bool,
    /// Copy the previous file to `<name>.bak` before replacing it.
    pub backup: bool,
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self {
            pretty: true,
            backup: false,
        }
    }
}

impl Store for JsonFileStore {
    fn read(&self, path: &Path) -> Result<Option<Vec<Entry>>, RegistryError> {
        let corrupt = |reason: String| RegistryError::ConfigCorrupt {
            path: path.to_path_buf(),
            reason,
        };
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(corrupt(e.to_string())),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        let list: Vec<Entry> = serde_json::from_str(&content).map_err(|e| corrupt(e.to_string()))?;
        Ok(Some(list))
    }

    fn write(&self, path: &Path, entries: &[Entry]) -> Result<(), RegistryError> {
        let persist = |source: io::Error| RegistryError::Persist {
            path: path.to_path_buf(),
            source,
        };
        let json = if self.pretty {
            serde_json::to_string_pretty(entries)
        } else {
            serde_json::to_string(entries)
        }
        .map_err(|e| persist(e.into()))?;
        if self.backup && path.exists() {
            fs::copy(path, sibling_path(path, ".bak")).map_err(persist)?;
        }
        atomic_write(path, json.as_bytes()).map_err(persist)
    }
}

/// The ordered list of meetings, tied to the file it is loaded from and saved
/// to.
pub struct Registry<S = JsonFileStore> {
    store: S,
    path: PathBuf,
    entries: Vec<Entry>,
}

impl<S: Store> Registry<S> {
    /// An empty registry backed by `path`. Nothing is read until [`load`].
    ///
    /// [`load`]: Registry::load
    pub fn new(store: S, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            path: path.into(),
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory entries with the stored ones. A missing file
    /// gives an empty registry. On `ConfigCorrupt` the current entries are
    /// left untouched.
    pub fn load(&mut self) -> Result<usize, RegistryError> {
        let entries = self.store.read(&self.path)?.unwrap_or_default();
        tracing::info!(count = entries.len(), path = %self.path.display(), "loaded meetings");
        self.entries = entries;
        Ok(self.entries.len())
    }

    pub fn save(&self) -> Result<(), RegistryError> {
        self.store.write(&self.path, &self.entries)?;
        tracing::info!(count = self.entries.len(), path = %self.path.display(), "saved meetings");
        Ok(())
    }

    /// Add `entry` at the end. A separator directly after another separator
    /// is rejected and the registry is left unchanged.
    pub fn append(&mut self, entry: Entry) -> Result<(), RegistryError> {
        if entry.is_separator() && self.entries.last().is_some_and(Entry::is_separator) {
            return Err(RegistryError::AdjacentSeparator);
        }
        tracing::debug!(label = entry.display_label(), "append entry");
        self.entries.push(entry);
        Ok(())
    }

    /// Remove the first entry matching the picker row (`title_text`,
    /// `sub_text`). Returns whether anything was removed.
    pub fn remove_matching(&mut self, title_text: &str, sub_text: &str) -> bool {
        let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.matches(title_text, sub_text))
        else {
            return false;
        };
        let removed = self.entries.remove(pos);
        let remaining = self.entries[pos..]
            .iter()
            .filter(|e| e.matches(title_text, sub_text))
            .count();
        if remaining > 0 {
            tracing::debug!(remaining, "removed first of several identical entries");
        }
        tracing::debug!(label = removed.display_label(), index = pos, "removed entry");
        true
    }

    /// Drop every entry. Nothing is written until the next [`save`].
    ///
    /// [`save`]: Registry::save
    pub fn clear(&mut self) {
        tracing::debug!(count = self.entries.len(), "cleared entries");
        self.entries.clear();
    }

    pub fn all(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
