use crate::commands::Command;
use crate::entry::Entry;
use crate::view::{MenuItem, MenuSurface};

/// A clickable row of the menu bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuRow<'a> {
    Meeting(&'a Entry),
    Command(Command),
}

/// Persistent menu: the projected meeting items followed by the fixed
/// commands. Selectable rows are numbered from 1 in display order.
#[derive(Debug, Clone, Default)]
pub struct MenuBar {
    items: Vec<MenuItem>,
    commands: Vec<Command>,
}

impl MenuBar {
    pub fn new(autosave: bool) -> Self {
        let mut bar = Self::default();
        bar.set_autosave(autosave);
        bar
    }

    /// "Save Meetings" is only offered while autosave is off.
    pub fn set_autosave(&mut self, autosave: bool) {
        self.commands = vec![Command::Add, Command::Remove(None), Command::Join(None)];
        if !autosave {
            self.commands.push(Command::Save);
        }
        self.commands.push(Command::Reload);
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn selectable_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_selectable()).count() + self.commands.len()
    }

    /// The selectable row numbered `n` (1-based).
    pub fn row(&self, n: usize) -> Option<MenuRow<'_>> {
        let index = n.checked_sub(1)?;
        let mut meetings = self.items.iter().filter_map(MenuItem::entry);
        let meeting_count = meetings.clone().count();
        if index < meeting_count {
            return meetings.nth(index).map(MenuRow::Meeting);
        }
        self.commands
            .get(index - meeting_count)
            .cloned()
            .map(MenuRow::Command)
    }
}

impl MenuSurface for MenuBar {
    fn set_items(&mut self, items: Vec<MenuItem>) {
        self.items = items;
    }
}
