//! Terminal output formatting utilities.

use std::io::IsTerminal;

use colored::Colorize;
use gitja_core::TrackingMap;

/// Whether colors should be emitted: stdout is a terminal and `NO_COLOR`
/// is unset.
#[must_use]
pub fn color_enabled() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message (stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message (stderr).
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print an info message.
pub fn info(msg: &str) {
    println!("{} {}", "→".blue(), msg);
}

/// Print a line without prefix.
pub fn detail(msg: &str) {
    println!("{msg}");
}

/// Print a `*` marked header.
pub fn header(msg: &str) {
    println!("{} {}", "*".magenta(), msg);
}

/// Render the tracking map, one `local : remote` line per branch.
///
/// With `current`, the current branch is marked with `+ ` and every other
/// branch with `- `.
#[must_use]
pub fn tracking_lines(map: &TrackingMap, current: Option<&str>) -> Vec<String> {
    let local_width = map.widest_local();
    let remote_width = map.widest_remote();

    map.iter()
        .map(|(local, remote)| {
            let ward = match current {
                Some(current) if local == current => "+ ",
                Some(_) => "- ",
                None => "",
            };
            format!(
                "{ward}{:<local_width$} : {:>remote_width$}",
                local.as_str(),
                remote.as_str()
            )
        })
        .collect()
}
