use crate::app::{App, Flow, NoticeLevel, Notifier, PickerMode, Ui};
use crate::commands::{parse_command, Command, HELP};
use crate::launch::LaunchSink;
use crate::menu::MenuBar;
use crate::notice_log::append_notice_log;
use crate::picker::Picker;
use crate::prompt::{PromptRequest, PromptResponse, Prompter};
use crate::registry::Store;
use crate::view::{ChoiceItem, MenuItem};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Line typed at any prompt to press its cancel button.
pub const CANCEL_INPUT: &str = ":cancel";

/// Line-oriented front end: prompts, menu and picker on a text stream.
pub struct TerminalUi<R, W> {
    input: R,
    output: W,
    notice_log: Option<PathBuf>,
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            notice_log: None,
        }
    }

    /// Also append warnings and errors to the log file at `path`.
    pub fn with_notice_log(mut self, path: PathBuf) -> Self {
        self.notice_log = Some(path);
        self
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Next input line without its line ending. `None` at end of input.
    pub fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn ask(&mut self, text: &str) -> Option<String> {
        let _ = write!(self.output, "{text}");
        let _ = self.output.flush();
        self.read_line()
    }

    fn render_choice(&mut self, n: usize, choice: &ChoiceItem, picker: &Picker) {
        let text = picker.fit(&choice.text);
        let mark = if n == picker.selected() + 1 { '>' } else { ' ' };
        match &choice.sub_text {
            Some(sub) => {
                let _ = writeln!(self.output, "{mark} {n:>2}. {text}  ({})", picker.fit(sub));
            }
            None => {
                let _ = writeln!(self.output, "{mark} {n:>2}. {text}");
            }
        }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalUi<R, W> {
    fn text_prompt(&mut self, request: &PromptRequest<'_>) -> PromptResponse {
        let _ = writeln!(self.output, "\n{}", request.title);
        if !request.subtitle.is_empty() {
            let _ = writeln!(self.output, "  {}", request.subtitle);
        }
        if let Some(cancel) = request.cancel_label {
            let _ = writeln!(self.output, "  ({CANCEL_INPUT} to {})", cancel.to_lowercase());
        }
        let prompt = if request.default.is_empty() {
            format!("{}> ", request.confirm_label)
        } else {
            format!("{} [{}]> ", request.confirm_label, request.default)
        };
        match self.ask(&prompt) {
            None => PromptResponse::cancel(),
            Some(line) if line.trim() == CANCEL_INPUT => PromptResponse::cancel(),
            Some(line) if line.trim().is_empty() => PromptResponse::confirm(request.default),
            Some(line) => PromptResponse::confirm(line.trim()),
        }
    }
}

impl<R: BufRead, W: Write> Notifier for TerminalUi<R, W> {
    fn notify(&mut self, level: NoticeLevel, message: &str) {
        let tag = match level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        let _ = writeln!(self.output, "[{tag}] {message}");
        if level != NoticeLevel::Info {
            if let Some(path) = &self.notice_log {
                append_notice_log(path, &format!("{tag}: {message}"));
            }
        }
    }
}

impl<R: BufRead, W: Write> Ui for TerminalUi<R, W> {
    fn pick(&mut self, picker: &mut Picker, mode: PickerMode) -> Option<ChoiceItem> {
        let title = match mode {
            PickerMode::Join => "Join meeting",
            PickerMode::Remove => "Remove meeting",
        };
        loop {
            let _ = writeln!(self.output, "\n{title}");
            let rows: Vec<ChoiceItem> = picker.visible_choices().into_iter().cloned().collect();
            if rows.is_empty() {
                let _ = writeln!(self.output, "  (no matches)");
            }
            for (i, choice) in rows.iter().enumerate() {
                self.render_choice(i + 1, choice, picker);
            }
            let prompt = if picker.query().is_empty() {
                format!("{}> ", picker.config().placeholder)
            } else {
                format!("{} [{}]> ", picker.config().placeholder, picker.query())
            };
            let line = self.ask(&prompt)?;
            let line = line.trim();
            match line {
                "" | CANCEL_INPUT => {
                    picker.dismiss();
                    return None;
                }
                "+" => {
                    picker.select_next();
                    continue;
                }
                "-" => {
                    picker.select_prev();
                    continue;
                }
                "." => return picker.choose_selected(),
                _ => {}
            }
            if let Ok(n) = line.parse::<usize>() {
                if (1..=rows.len()).contains(&n) {
                    return picker.choose(n - 1);
                }
            }
            picker.set_query(line);
        }
    }

    fn show_menu(&mut self, menu: &MenuBar) {
        let mut n = 0;
        let _ = writeln!(self.output);
        for item in menu.items() {
            match item {
                MenuItem::Meeting { label, tooltip, .. } => {
                    n += 1;
                    match tooltip {
                        Some(tip) => {
                            let _ = writeln!(self.output, "  {n:>2}. {label}  ({tip})");
                        }
                        None => {
                            let _ = writeln!(self.output, "  {n:>2}. {label}");
                        }
                    }
                }
                MenuItem::Divider => {
                    let _ = writeln!(self.output, "  ----------------");
                }
                MenuItem::SectionLabel(text) => {
                    let _ = writeln!(self.output, "      {text}");
                }
            }
        }
        let _ = writeln!(self.output, "  ----------------");
        for command in menu.commands() {
            n += 1;
            let _ = writeln!(self.output, "  {n:>2}. {}", command.label());
        }
    }

    fn show_help(&mut self) {
        let _ = writeln!(self.output, "{HELP}");
    }
}

/// Read commands until `quit` or end of input.
pub fn run<S, R, W>(app: &mut App<S>, ui: &mut TerminalUi<R, W>, sink: &mut dyn LaunchSink)
where
    S: Store,
    R: BufRead,
    W: Write,
{
    ui.show_menu(app.menu());
    while let Some(line) = ui.ask("\n> ") {
        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                ui.notify(NoticeLevel::Info, "Unknown command; type 'help'");
            }
            continue;
        };
        let redraw = matches!(
            command,
            Command::Add | Command::Remove(_) | Command::Reload | Command::Select(_)
        );
        if app.execute(command, ui, sink) == Flow::Quit {
            break;
        }
        if redraw {
            ui.show_menu(app.menu());
        }
    }
}
