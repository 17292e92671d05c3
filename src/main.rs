use meeting_launcher::app::App;
use meeting_launcher::common::config_files::{config_dir, ensure_config_file};
use meeting_launcher::launch::SystemLaunchSink;
use meeting_launcher::notice_log::NOTICE_LOG_FILE;
use meeting_launcher::registry::Registry;
use meeting_launcher::settings::{Settings, SETTINGS_FILE};
use meeting_launcher::terminal::{self, TerminalUi};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let settings_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config_dir().join(SETTINGS_FILE));
    let first_run = if settings_path.file_name().is_some_and(|n| n == SETTINGS_FILE) {
        let default_settings = serde_json::to_string_pretty(&Settings::default())?;
        ensure_config_file(&settings_path, &default_settings)?
    } else {
        false
    };
    let settings = Settings::load(&settings_path)?;
    meeting_launcher::logging::init(settings.debug_logging, settings.log_file.clone());
    if first_run {
        tracing::info!(path = %settings_path.display(), "first run; wrote default settings");
        println!("Created default settings at {}", settings_path.display());
    }

    let registry_path = settings.registry_path(&settings_path);
    tracing::info!(settings = %settings_path.display(), meetings = %registry_path.display(), "starting");
    let registry = Registry::new(settings.store(), registry_path);

    let stdin = std::io::stdin();
    let mut ui = TerminalUi::new(stdin.lock(), std::io::stdout())
        .with_notice_log(settings_path.with_file_name(NOTICE_LOG_FILE));
    let mut app = App::new(registry, &settings);
    app.reload(&mut ui);
    terminal::run(&mut app, &mut ui, &mut SystemLaunchSink);
    Ok(())
}
