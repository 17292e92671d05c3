use crate::common::strip_prefix_ci;

/// User-triggerable control points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add,
    /// Open the picker to remove a meeting, optionally pre-filtered.
    Remove(Option<String>),
    /// Open the picker to join a meeting, optionally pre-filtered.
    Join(Option<String>),
    Save,
    Reload,
    Menu,
    /// Click the numbered menu item (1-based).
    Select(usize),
    Help,
    Quit,
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::Add => "Add Meeting",
            Command::Remove(_) => "Remove Meeting",
            Command::Join(_) => "Join Meeting",
            Command::Save => "Save Meetings",
            Command::Reload => "Reload",
            Command::Menu => "Show Menu",
            Command::Select(_) => "Select",
            Command::Help => "Help",
            Command::Quit => "Quit",
        }
    }
}

fn filter_arg(rest: &str) -> Option<String> {
    let rest = rest.trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

/// Parse one line of user input. Unknown input yields `None`.
pub fn parse_command(input: &str) -> Option<Command> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<usize>() {
        return Some(Command::Select(n));
    }
    for prefix in ["remove", "rm"] {
        if let Some(rest) = strip_prefix_ci(s, prefix) {
            if rest.is_empty() || rest.starts_with(' ') {
                return Some(Command::Remove(filter_arg(rest)));
            }
        }
    }
    for prefix in ["join", "j"] {
        if let Some(rest) = strip_prefix_ci(s, prefix) {
            if rest.is_empty() || rest.starts_with(' ') {
                return Some(Command::Join(filter_arg(rest)));
            }
        }
    }
    match s.to_ascii_lowercase().as_str() {
        "add" | "a" => Some(Command::Add),
        "save" | "s" => Some(Command::Save),
        "reload" | "r" => Some(Command::Reload),
        "menu" | "m" | "ls" => Some(Command::Menu),
        "help" | "?" => Some(Command::Help),
        "quit" | "q" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

pub const HELP: &str = "\
commands:
  <n>            join the numbered menu item
  add            add a meeting or separator
  join [query]   pick a meeting to join
  rm [query]     pick a meeting to remove
                 (in the picker: a number or '.' picks, '+'/'-' move,
                  other text filters, empty input closes)
  save           write meetings to disk (when autosave is off)
  reload         re-read meetings from disk
  menu           show the menu
  quit";
