use std::path::{Path, PathBuf};

/// Directory holding settings and meetings for the current user.
pub fn config_dir() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("meeting_launcher")
}

/// Resolve `relative` against the directory containing `settings_path`.
/// Absolute paths are returned unchanged.
pub fn resolve_config_path(settings_path: &Path, relative: &Path) -> PathBuf {
    if relative.is_absolute() {
        return relative.to_path_buf();
    }
    let base_dir = settings_path.parent().unwrap_or_else(|| Path::new("."));
    base_dir.join(relative)
}

/// Write `default_contents` to `path` unless the file already exists.
/// Returns `true` when the file was created.
pub fn ensure_config_file(path: &Path, default_contents: &str) -> anyhow::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, default_contents)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::{ensure_config_file, resolve_config_path};
    use std::path::Path;

    #[test]
    fn resolves_path_relative_to_settings_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings_path = dir.path().join("settings.json");
        let resolved = resolve_config_path(&settings_path, Path::new("data/meetings.json"));
        assert_eq!(
            resolved,
            dir.path().join(Path::new("data").join("meetings.json"))
        );
    }

    #[test]
    fn absolute_path_is_kept() {
        let dir = tempfile::tempdir().expect("tempdir");
        let abs = dir.path().join("elsewhere.json");
        let resolved = resolve_config_path(Path::new("settings.json"), &abs);
        assert_eq!(resolved, abs);
    }

    #[test]
    fn first_run_writes_defaults_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("settings.json");

        assert!(ensure_config_file(&path, "{}").expect("create file"));
        assert_eq!(std::fs::read_to_string(&path).expect("read file"), "{}");

        std::fs::write(&path, r#"{"autosave":false}"#).expect("edit file");
        assert!(!ensure_config_file(&path, "{}").expect("reuse file"));
        assert_eq!(
            std::fs::read_to_string(&path).expect("read file"),
            r#"{"autosave":false}"#
        );
    }
}
