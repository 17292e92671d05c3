use meeting_launcher::app::App;
use meeting_launcher::entry::Entry;
use meeting_launcher::launch::LaunchSink;
use meeting_launcher::registry::{JsonFileStore, Registry, MEETINGS_FILE};
use meeting_launcher::settings::Settings;
use meeting_launcher::terminal::{self, TerminalUi};
use std::io::{self, Cursor};
use tempfile::tempdir;

#[derive(Default)]
struct RecordingSink {
    opened: Vec<String>,
}

impl LaunchSink for RecordingSink {
    fn launch_or_focus(&mut self, _app_name: &str) -> io::Result<()> {
        Ok(())
    }

    fn open(&mut self, url: &str, _bundle_id: &str) -> io::Result<()> {
        self.opened.push(url.to_string());
        Ok(())
    }
}

fn session(input: &str, dir: &std::path::Path) -> (String, RecordingSink, Vec<Entry>) {
    let path = dir.join(MEETINGS_FILE);
    let settings = Settings::default();
    let mut app = App::new(Registry::new(JsonFileStore::default(), &path), &settings);
    let mut ui = TerminalUi::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    let mut sink = RecordingSink::default();
    app.reload(&mut ui);
    terminal::run(&mut app, &mut ui, &mut sink);
    let out = String::from_utf8(ui.output().clone()).unwrap();
    (out, sink, app.registry().all().to_vec())
}

#[test]
fn add_then_join_by_number() {
    let dir = tempdir().unwrap();
    // add: id, no password, keep default title; then click row 1.
    let (out, sink, entries) = session("add\n222\n\n\n1\nquit\n", dir.path());
    assert_eq!(entries, vec![Entry::id(Some("222"), "222", None)]);
    assert_eq!(sink.opened, ["https://zoom.us/j/222"]);
    assert!(out.contains("Add a new meeting"));
    assert!(out.contains("Meeting title"));
}

#[test]
fn separator_with_section_renders_label() {
    let dir = tempdir().unwrap();
    let (out, _, entries) = session("add\n-\nTeam\nmenu\n", dir.path());
    assert_eq!(entries, vec![Entry::separator(Some("Team"))]);
    assert!(out.contains("      Team"));
}

#[test]
fn cancel_keyword_aborts_add() {
    let dir = tempdir().unwrap();
    let (_, _, entries) = session("add\n333\n:cancel\n", dir.path());
    assert!(entries.is_empty());
    assert!(!dir.path().join(MEETINGS_FILE).exists());
}

#[test]
fn picker_filters_then_removes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(MEETINGS_FILE);
    let seeded = vec![
        Entry::id(Some("Standup"), "1", None),
        Entry::id(Some("Retro"), "2", None),
    ];
    std::fs::write(&path, serde_json::to_string(&seeded).unwrap()).unwrap();

    let (out, sink, entries) = session("rm\nretro\n1\n", dir.path());
    assert!(out.contains("Remove meeting"));
    assert!(sink.opened.is_empty());
    assert_eq!(entries, vec![Entry::id(Some("Standup"), "1", None)]);
}

#[test]
fn password_meeting_warns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(MEETINGS_FILE);
    std::fs::write(&path, r#"[{"title":"Board","id":"9","password":"x"}]"#).unwrap();
    let (out, sink, _) = session("1\n", dir.path());
    assert!(sink.opened.is_empty());
    assert!(out.contains("[warning]"));
}

#[test]
fn unknown_command_hints_help() {
    let dir = tempdir().unwrap();
    let (out, _, _) = session("dance\n", dir.path());
    assert!(out.contains("type 'help'"));
}

#[test]
fn picker_highlight_navigation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(MEETINGS_FILE);
    let seeded = vec![Entry::id(None, "1", None), Entry::id(None, "2", None)];
    std::fs::write(&path, serde_json::to_string(&seeded).unwrap()).unwrap();

    let (out, sink, _) = session("join\n+\n.\n", dir.path());
    assert!(out.contains(">  2. 2"));
    assert_eq!(sink.opened, ["https://zoom.us/j/2"]);
}
