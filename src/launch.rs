use crate::entry::Entry;
use crate::error::LaunchError;
use std::io;

/// The meeting application deep links are handed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget {
    pub app_name: String,
    pub bundle_id: String,
    /// Prefix an id is appended to for a password-less web join.
    pub web_join_base: String,
}

impl Default for LaunchTarget {
    fn default() -> Self {
        Self {
            app_name: "zoom.us".into(),
            bundle_id: "us.zoom.xos".into(),
            web_join_base: "https://zoom.us/j/".into(),
        }
    }
}

/// Where deep links end up. Calls return once the request is handed off;
/// nothing waits for the meeting to actually start.
pub trait LaunchSink {
    fn launch_or_focus(&mut self, app_name: &str) -> io::Result<()>;
    fn open(&mut self, url: &str, bundle_id: &str) -> io::Result<()>;
}

/// Start `cmd` and wait for it on a background thread so the finished
/// process is reaped.
#[cfg(target_os = "macos")]
fn spawn_detached(cmd: &mut std::process::Command) -> io::Result<()> {
    let mut child = cmd.spawn()?;
    std::thread::spawn(move || {
        if let Err(e) = child.wait() {
            tracing::debug!("open helper did not finish cleanly: {e}");
        }
    });
    Ok(())
}

/// Opens links through the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLaunchSink;

impl LaunchSink for SystemLaunchSink {
    #[cfg(target_os = "macos")]
    fn launch_or_focus(&mut self, app_name: &str) -> io::Result<()> {
        spawn_detached(std::process::Command::new("open").args(["-a", app_name]))
    }

    #[cfg(not(target_os = "macos"))]
    fn launch_or_focus(&mut self, app_name: &str) -> io::Result<()> {
        tracing::debug!(app_name, "launch-or-focus not supported here; relying on link handler");
        Ok(())
    }

    #[cfg(target_os = "macos")]
    fn open(&mut self, url: &str, bundle_id: &str) -> io::Result<()> {
        spawn_detached(std::process::Command::new("open").args(["-b", bundle_id, url]))
    }

    #[cfg(not(target_os = "macos"))]
    fn open(&mut self, url: &str, _bundle_id: &str) -> io::Result<()> {
        open::that(url)
    }
}

/// The deep link `entry` would be joined through.
pub fn join_link(entry: &Entry, target: &LaunchTarget) -> Result<String, LaunchError> {
    match entry {
        Entry::Url { url, .. } => Ok(url.clone()),
        Entry::Id {
            id, password: None, ..
        } => Ok(format!("{}{}", target.web_join_base, id)),
        Entry::Id {
            password: Some(_), ..
        } => Err(LaunchError::PasswordJoinUnsupported(
            entry.display_label().to_string(),
        )),
        Entry::Separator { .. } => Err(LaunchError::NotLaunchable(
            entry.display_label().to_string(),
        )),
    }
}

/// Join the meeting described by `entry`, returning the link that was opened.
pub fn launch(
    entry: &Entry,
    target: &LaunchTarget,
    sink: &mut dyn LaunchSink,
) -> Result<String, LaunchError> {
    let link = join_link(entry, target)?;
    let sink_err = |source: io::Error| LaunchError::Sink {
        link: link.clone(),
        source,
    };
    if matches!(entry, Entry::Url { .. }) {
        sink.launch_or_focus(&target.app_name).map_err(sink_err)?;
    }
    sink.open(&link, &target.bundle_id).map_err(sink_err)?;
    tracing::info!(label = entry.display_label(), link = %link, "joined meeting");
    Ok(link)
}
