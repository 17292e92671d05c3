use meeting_launcher::entry::Entry;
use meeting_launcher::error::RegistryError;
use meeting_launcher::registry::{JsonFileStore, Registry, MEETINGS_FILE};
use meeting_launcher::view::Projection;
use tempfile::tempdir;

fn mixed() -> Vec<Entry> {
    vec![
        Entry::url(Some("Review"), "https://zoom.us/j/111"),
        Entry::separator(Some("Team")),
        Entry::id(Some("Standup"), "222", Some("p")),
        Entry::id(None, "333", None),
        Entry::separator(None),
        Entry::url(None, "https://zoom.us/j/444"),
    ]
}

#[test]
fn save_then_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(MEETINGS_FILE);
    let mut reg = Registry::new(JsonFileStore::default(), &path);
    for e in mixed() {
        reg.append(e).unwrap();
    }
    reg.save().unwrap();

    let mut fresh = Registry::new(JsonFileStore::default(), &path);
    assert_eq!(fresh.load().unwrap(), 6);
    assert_eq!(fresh.all(), mixed().as_slice());
    assert_eq!(Projection::build(fresh.all()), Projection::build(reg.all()));
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempdir().unwrap();
    let mut reg = Registry::new(JsonFileStore::default(), dir.path().join("none.json"));
    assert_eq!(reg.load().unwrap(), 0);
    assert!(reg.is_empty());
}

#[test]
fn empty_file_loads_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(MEETINGS_FILE);
    std::fs::write(&path, "  \n").unwrap();
    let mut reg = Registry::new(JsonFileStore::default(), &path);
    assert_eq!(reg.load().unwrap(), 0);
}

#[test]
fn malformed_file_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(MEETINGS_FILE);
    std::fs::write(&path, b"not json").unwrap();
    let mut reg = Registry::new(JsonFileStore::default(), &path);
    reg.append(Entry::id(None, "1", None)).unwrap();
    let err = reg.load().unwrap_err();
    assert!(matches!(err, RegistryError::ConfigCorrupt { .. }));
    assert_eq!(reg.len(), 1);
}

#[test]
fn url_and_id_together_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(MEETINGS_FILE);
    std::fs::write(&path, r#"[{"url":"https://zoom.us/j/1","id":"1"}]"#).unwrap();
    let mut reg = Registry::new(JsonFileStore::default(), &path);
    assert!(matches!(reg.load(), Err(RegistryError::ConfigCorrupt { .. })));
}

#[test]
fn load_trusts_adjacent_separators() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(MEETINGS_FILE);
    std::fs::write(&path, r#"[{"title":"-"},{"title":"-","section":"B"}]"#).unwrap();
    let mut reg = Registry::new(JsonFileStore::default(), &path);
    assert_eq!(reg.load().unwrap(), 2);
    assert!(matches!(
        reg.append(Entry::separator(None)),
        Err(RegistryError::AdjacentSeparator)
    ));
}

#[test]
fn file_is_a_plain_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(MEETINGS_FILE);
    let mut reg = Registry::new(
        JsonFileStore {
            pretty: false,
            backup: false,
        },
        &path,
    );
    reg.append(Entry::id(None, "222", Some("p"))).unwrap();
    reg.append(Entry::separator(Some("Team"))).unwrap();
    reg.save().unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        r#"[{"id":"222","password":"p"},{"title":"-","section":"Team"}]"#
    );
}

#[test]
fn backup_keeps_previous_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(MEETINGS_FILE);
    let store = JsonFileStore {
        pretty: true,
        backup: true,
    };
    let mut reg = Registry::new(store, &path);
    reg.append(Entry::id(None, "1", None)).unwrap();
    reg.save().unwrap();
    assert!(!dir.path().join("meetings.json.bak").exists());
    reg.append(Entry::id(None, "2", None)).unwrap();
    reg.save().unwrap();

    let mut old = Registry::new(JsonFileStore::default(), dir.path().join("meetings.json.bak"));
    assert_eq!(old.load().unwrap(), 1);
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join(MEETINGS_FILE);
    let mut reg = Registry::new(JsonFileStore::default(), &path);
    reg.append(Entry::id(None, "1", None)).unwrap();
    reg.save().unwrap();
    assert!(path.exists());
}

#[test]
fn failed_save_reports_persist_error() {
    let dir = tempdir().unwrap();
    // A directory where the file should be makes the final rename fail.
    let path = dir.path().join(MEETINGS_FILE);
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep"), "x").unwrap();
    let mut reg = Registry::new(JsonFileStore::default(), &path);
    reg.append(Entry::id(None, "1", None)).unwrap();
    assert!(matches!(reg.save(), Err(RegistryError::Persist { .. })));
    assert_eq!(reg.len(), 1);
}

#[test]
fn empty_id_survives_load_and_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(MEETINGS_FILE);
    std::fs::write(&path, r#"[{"title":"Standup","id":""}]"#).unwrap();
    let mut reg = Registry::new(
        JsonFileStore {
            pretty: false,
            backup: false,
        },
        &path,
    );
    assert_eq!(reg.load().unwrap(), 1);
    assert_eq!(reg.all(), &[Entry::id(Some("Standup"), "", None)]);

    reg.save().unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        r#"[{"title":"Standup","id":""}]"#
    );
}
