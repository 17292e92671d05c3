use crate::error::EntryError;
use serde::{Deserialize, Serialize};

/// Title stored on separator records and typed at the prompt to request one.
pub const SEPARATOR_MARKER: &str = "-";

/// On-disk shape of a registry entry. Every field is optional; which ones are
/// present decides what kind of entry the record describes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Url,
    Id,
    Separator,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl EntryRecord {
    /// Decide which kind of entry this record is. An empty url counts as
    /// absent, but any `id` field makes the record an id meeting, even an
    /// empty one. A record carrying both a url and an id is rejected.
    pub fn classify(&self) -> Result<EntryKind, EntryError> {
        let has_url = self.url.as_deref().is_some_and(|u| !u.is_empty());
        let has_id = self.id.is_some();
        match (has_url, has_id) {
            (true, true) => Err(EntryError::InvalidEntry {
                label: self
                    .title
                    .clone()
                    .or_else(|| self.url.clone())
                    .unwrap_or_default(),
            }),
            (true, false) => Ok(EntryKind::Url),
            (false, true) => Ok(EntryKind::Id),
            (false, false) => Ok(EntryKind::Separator),
        }
    }
}

/// A registry entry: a meeting joined by URL, a meeting joined by id, or a
/// separator that partitions the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord", into = "EntryRecord")]
pub enum Entry {
    Url {
        title: Option<String>,
        url: String,
    },
    Id {
        title: Option<String>,
        id: String,
        password: Option<String>,
    },
    Separator {
        section: Option<String>,
    },
}

impl TryFrom<EntryRecord> for Entry {
    type Error = EntryError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let kind = record.classify()?;
        let title = non_empty(record.title);
        Ok(match kind {
            EntryKind::Url => Entry::Url {
                title,
                url: record.url.unwrap_or_default(),
            },
            EntryKind::Id => Entry::Id {
                title,
                id: record.id.unwrap_or_default(),
                password: non_empty(record.password),
            },
            EntryKind::Separator => Entry::Separator {
                section: non_empty(record.section),
            },
        })
    }
}

impl From<Entry> for EntryRecord {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Url { title, url } => EntryRecord {
                title,
                url: Some(url),
                ..Default::default()
            },
            Entry::Id {
                title,
                id,
                password,
            } => EntryRecord {
                title,
                id: Some(id),
                password,
                ..Default::default()
            },
            Entry::Separator { section } => EntryRecord {
                title: Some(SEPARATOR_MARKER.into()),
                section,
                ..Default::default()
            },
        }
    }
}

impl Entry {
    pub fn url(title: Option<&str>, url: &str) -> Self {
        Entry::Url {
            title: title.filter(|t| !t.is_empty()).map(str::to_string),
            url: url.to_string(),
        }
    }

    pub fn id(title: Option<&str>, id: &str, password: Option<&str>) -> Self {
        Entry::Id {
            title: title.filter(|t| !t.is_empty()).map(str::to_string),
            id: id.to_string(),
            password: password.filter(|p| !p.is_empty()).map(str::to_string),
        }
    }

    pub fn separator(section: Option<&str>) -> Self {
        Entry::Separator {
            section: section.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Url { .. } => EntryKind::Url,
            Entry::Id { .. } => EntryKind::Id,
            Entry::Separator { .. } => EntryKind::Separator,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, Entry::Separator { .. })
    }

    /// The raw join identifier: the url or the meeting id.
    pub fn target(&self) -> Option<&str> {
        match self {
            Entry::Url { url, .. } => Some(url),
            Entry::Id { id, .. } => Some(id),
            Entry::Separator { .. } => None,
        }
    }

    pub fn section(&self) -> Option<&str> {
        match self {
            Entry::Separator { section } => section.as_deref(),
            _ => None,
        }
    }

    /// Text shown for the entry: title, else url, else id.
    pub fn display_label(&self) -> &str {
        match self {
            Entry::Url { title, url } => title.as_deref().unwrap_or(url),
            Entry::Id { title, id, .. } => title.as_deref().unwrap_or(id),
            Entry::Separator { .. } => SEPARATOR_MARKER,
        }
    }

    /// Whether this entry is the one a picker row with `title_text` and
    /// `sub_text` was built from. Reloaded entries are fresh values, so the
    /// comparison is by content.
    pub fn matches(&self, title_text: &str, sub_text: &str) -> bool {
        match self.target() {
            Some(target) => self.display_label() == title_text && target == sub_text,
            None => false,
        }
    }
}
