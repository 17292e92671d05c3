use crate::commands::Command;
use crate::entry::Entry;
use crate::error::{LaunchError, RegistryError};
use crate::launch::{launch, LaunchSink, LaunchTarget};
use crate::menu::{MenuBar, MenuRow};
use crate::picker::Picker;
use crate::prompt::{PromptFlow, Prompter};
use crate::registry::{sibling_path, JsonFileStore, Registry, Store};
use crate::settings::Settings;
use crate::view::{ChoiceItem, Projection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Shows a message to the user once.
pub trait Notifier {
    fn notify(&mut self, level: NoticeLevel, message: &str);
}

/// Everything the controller needs from the front end.
pub trait Ui: Prompter + Notifier {
    /// Let the user pick from the open picker. `None` means dismissed.
    fn pick(&mut self, picker: &mut Picker, mode: PickerMode) -> Option<ChoiceItem>;
    fn show_menu(&mut self, menu: &MenuBar);
    fn show_help(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Join,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the registry and keeps the menu and picker in step with it.
pub struct App<S = JsonFileStore> {
    registry: Registry<S>,
    projection: Projection,
    menu: MenuBar,
    picker: Picker,
    picker_mode: PickerMode,
    autosave: bool,
    /// Set while a corrupt meetings file could not be moved aside; saving
    /// would overwrite it.
    save_held: bool,
    url_prefix: String,
    target: LaunchTarget,
}

impl<S: Store> App<S> {
    pub fn new(registry: Registry<S>, settings: &Settings) -> Self {
        let mut app = Self {
            registry,
            projection: Projection::default(),
            menu: MenuBar::new(settings.autosave),
            picker: Picker::new(settings.picker_config()),
            picker_mode: PickerMode::Join,
            autosave: settings.autosave,
            save_held: false,
            url_prefix: settings.url_scheme_prefix.clone(),
            target: settings.launch_target(),
        };
        app.refresh();
        app
    }

    pub fn registry(&self) -> &Registry<S> {
        &self.registry
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn menu(&self) -> &MenuBar {
        &self.menu
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn picker_mode(&self) -> PickerMode {
        self.picker_mode
    }

    /// Rebuild both projections from the registry and replace the menu and
    /// picker contents with them.
    fn refresh(&mut self) {
        self.projection = Projection::build(self.registry.all());
        self.projection.publish(&mut self.menu, &mut self.picker);
    }

    /// Whether autosave is paused because a corrupt file is still in place.
    pub fn save_held(&self) -> bool {
        self.save_held
    }

    fn after_mutation<N: Notifier + ?Sized>(&mut self, notifier: &mut N) {
        self.refresh();
        if !self.autosave {
            return;
        }
        if self.save_held {
            let msg = format!(
                "Autosave paused: {} is corrupt; fix or remove it, then reload",
                self.registry.path().display()
            );
            tracing::warn!("{msg}");
            notifier.notify(NoticeLevel::Warning, &msg);
            return;
        }
        self.save(notifier);
    }

    pub fn execute(&mut self, command: Command, ui: &mut dyn Ui, sink: &mut dyn LaunchSink) -> Flow {
        tracing::debug!(?command, "execute");
        match command {
            Command::Add => {
                self.add(ui);
            }
            Command::Remove(query) => self.pick(PickerMode::Remove, query.as_deref(), ui, sink),
            Command::Join(query) => self.pick(PickerMode::Join, query.as_deref(), ui, sink),
            Command::Save if self.autosave && !self.save_held => {
                ui.notify(NoticeLevel::Info, "Autosave is on; meetings are already saved");
            }
            Command::Save => {
                if self.save(ui) {
                    ui.notify(NoticeLevel::Info, "Meetings saved");
                }
            }
            Command::Reload => self.reload(ui),
            Command::Menu => ui.show_menu(&self.menu),
            Command::Select(n) => {
                let row = match self.menu.row(n) {
                    Some(MenuRow::Meeting(entry)) => Ok(entry.clone()),
                    Some(MenuRow::Command(command)) => Err(Some(command)),
                    None => Err(None),
                };
                match row {
                    Ok(entry) => {
                        self.join(&entry, ui, sink);
                    }
                    Err(Some(command)) => return self.execute(command, ui, sink),
                    Err(None) => ui.notify(NoticeLevel::Warning, &format!("No menu item {n}")),
                }
            }
            Command::Help => ui.show_help(),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Re-read the meetings file. A corrupt file empties the registry and is
    /// moved aside so a later save cannot overwrite it. If it cannot be moved,
    /// autosave is held until a reload succeeds.
    pub fn reload<N: Notifier + ?Sized>(&mut self, notifier: &mut N) {
        match self.registry.load() {
            Ok(_) => self.save_held = false,
            Err(e @ RegistryError::ConfigCorrupt { .. }) => {
                tracing::error!("{e}");
                self.registry.clear();
                let path = self.registry.path().to_path_buf();
                let aside = sibling_path(&path, ".corrupt");
                let msg = match std::fs::rename(&path, &aside) {
                    Ok(()) => {
                        self.save_held = false;
                        format!("{e}; moved to {}", aside.display())
                    }
                    Err(rename_err) => {
                        tracing::warn!(path = %path.display(), "could not move corrupt file aside: {rename_err}");
                        self.save_held = true;
                        format!("{e}; could not move it aside ({rename_err}), autosave paused")
                    }
                };
                notifier.notify(NoticeLevel::Error, &msg);
            }
            Err(e) => {
                tracing::error!("{e}");
                notifier.notify(NoticeLevel::Error, &e.to_string());
            }
        }
        self.refresh();
    }

    /// Run the add-meeting prompts and append the result. Returns whether an
    /// entry was added.
    pub fn add<U: Ui + ?Sized>(&mut self, ui: &mut U) -> bool {
        let Some(entry) = PromptFlow::new(self.url_prefix.clone()).run(ui) else {
            return false;
        };
        if let Err(e) = self.registry.append(entry) {
            tracing::warn!("{e}");
            ui.notify(NoticeLevel::Warning, &e.to_string());
            return false;
        }
        self.after_mutation(ui);
        true
    }

    /// Remove the registry entry a picker row was built from.
    pub fn remove<N: Notifier + ?Sized>(&mut self, choice: &ChoiceItem, notifier: &mut N) -> bool {
        if !self.registry.remove_matching(&choice.text, choice.target()) {
            tracing::debug!(text = %choice.text, "nothing to remove");
            return false;
        }
        self.after_mutation(notifier);
        true
    }

    pub fn save<N: Notifier + ?Sized>(&mut self, notifier: &mut N) -> bool {
        match self.registry.save() {
            Ok(()) => {
                self.save_held = false;
                true
            }
            Err(e) => {
                tracing::error!("{e}");
                notifier.notify(NoticeLevel::Error, &e.to_string());
                false
            }
        }
    }

    pub fn join<N: Notifier + ?Sized>(
        &mut self,
        entry: &Entry,
        notifier: &mut N,
        sink: &mut dyn LaunchSink,
    ) -> Option<String> {
        match launch(entry, &self.target, sink) {
            Ok(link) => Some(link),
            Err(e) => {
                let level = match e {
                    LaunchError::Sink { .. } => NoticeLevel::Error,
                    _ => NoticeLevel::Warning,
                };
                tracing::warn!("{e}");
                notifier.notify(level, &e.to_string());
                None
            }
        }
    }

    fn pick(
        &mut self,
        mode: PickerMode,
        query: Option<&str>,
        ui: &mut dyn Ui,
        sink: &mut dyn LaunchSink,
    ) {
        self.picker_mode = mode;
        self.picker.show();
        self.picker.set_query(query.unwrap_or_default());
        let chosen = ui.pick(&mut self.picker, mode);
        self.picker.dismiss();
        let Some(choice) = chosen else {
            return;
        };
        match mode {
            PickerMode::Join => {
                self.join(&choice.entry, ui, sink);
            }
            PickerMode::Remove => {
                self.remove(&choice, ui);
            }
        }
    }
}
