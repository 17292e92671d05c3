use crate::common::config_files::resolve_config_path;
use crate::launch::LaunchTarget;
use crate::picker::PickerConfig;
use crate::registry::{JsonFileStore, MEETINGS_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Meetings file. Relative paths are resolved next to the settings file.
    #[serde(default = "default_registry_path")]
    pub registry_path: PathBuf,
    /// Save after every add or remove. When off, "Save Meetings" is offered.
    #[serde(default = "default_true")]
    pub autosave: bool,
    /// Keep a `.bak` copy of the previous meetings file on save.
    #[serde(default)]
    pub backup_on_save: bool,
    #[serde(default = "default_true")]
    pub pretty_json: bool,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write logs to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_bundle_id")]
    pub app_bundle_id: String,
    /// Input starting with this is stored as a join URL, anything else as an id.
    #[serde(default = "default_url_prefix")]
    pub url_scheme_prefix: String,
    #[serde(default = "default_web_join_base")]
    pub web_join_base: String,
    #[serde(default = "default_picker_rows")]
    pub picker_rows: usize,
    #[serde(default = "default_picker_width")]
    pub picker_width: usize,
    #[serde(default = "default_placeholder")]
    pub picker_placeholder: String,
    #[serde(default = "default_true")]
    pub picker_search_sub_text: bool,
}

fn default_true() -> bool {
    true
}

fn default_registry_path() -> PathBuf {
    PathBuf::from(MEETINGS_FILE)
}

fn default_app_name() -> String {
    LaunchTarget::default().app_name
}

fn default_bundle_id() -> String {
    LaunchTarget::default().bundle_id
}

fn default_url_prefix() -> String {
    "https://".into()
}

fn default_web_join_base() -> String {
    LaunchTarget::default().web_join_base
}

fn default_picker_rows() -> usize {
    PickerConfig::default().rows
}

fn default_picker_width() -> usize {
    PickerConfig::default().width
}

fn default_placeholder() -> String {
    PickerConfig::default().placeholder
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_path: default_registry_path(),
            autosave: true,
            backup_on_save: false,
            pretty_json: true,
            debug_logging: false,
            log_file: None,
            app_name: default_app_name(),
            app_bundle_id: default_bundle_id(),
            url_scheme_prefix: default_url_prefix(),
            web_join_base: default_web_join_base(),
            picker_rows: default_picker_rows(),
            picker_width: default_picker_width(),
            picker_placeholder: default_placeholder(),
            picker_search_sub_text: true,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "could not read settings, using defaults: {e}");
                String::new()
            }
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Meetings file location, resolved against the settings file.
    pub fn registry_path(&self, settings_path: &Path) -> PathBuf {
        resolve_config_path(settings_path, &self.registry_path)
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore {
            pretty: self.pretty_json,
            backup: self.backup_on_save,
        }
    }

    pub fn launch_target(&self) -> LaunchTarget {
        LaunchTarget {
            app_name: self.app_name.clone(),
            bundle_id: self.app_bundle_id.clone(),
            web_join_base: self.web_join_base.clone(),
        }
    }

    pub fn picker_config(&self) -> PickerConfig {
        PickerConfig {
            rows: self.picker_rows.max(1),
            width: self.picker_width.max(1),
            placeholder: self.picker_placeholder.clone(),
            search_sub_text: self.picker_search_sub_text,
        }
    }
}
