use std::io::IsTerminal;
use std::time::Duration;

use anstyle::{AnsiColor, Style};
use indicatif::ProgressBar;
use stackmate_core::{Catalog, Manifest, Role};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum OutputStyle {
    Plain,
    Rich,
}

fn current_output_style() -> OutputStyle {
    if std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal() {
        OutputStyle::Rich
    } else {
        OutputStyle::Plain
    }
}

fn colorize(style: Style, text: &str) -> String {
    format!("{style}{text}{}", style.render_reset())
}

pub(crate) fn status_line(status: &str, message: &str) -> String {
    match current_output_style() {
        OutputStyle::Plain => format!("[{status}] {message}"),
        OutputStyle::Rich => {
            let label = Style::new().bold().fg_color(Some(AnsiColor::Cyan.into()));
            format!("{} {message}", colorize(label, &format!("[{status}]")))
        }
    }
}

pub(crate) fn warning_line(message: &str) -> String {
    match current_output_style() {
        OutputStyle::Plain => format!("warning: {message}"),
        OutputStyle::Rich => {
            let label = Style::new().bold().fg_color(Some(AnsiColor::Yellow.into()));
            format!("{} {message}", colorize(label, "warning:"))
        }
    }
}

/// Spinner shown while the blocking model call runs; suppressed for plain
/// output.
pub(crate) fn analysis_spinner() -> Option<ProgressBar> {
    if current_output_style() == OutputStyle::Plain {
        return None;
    }
    let spinner = ProgressBar::new_spinner().with_message("analyzing project requirements");
    spinner.enable_steady_tick(Duration::from_millis(120));
    Some(spinner)
}

pub(crate) fn format_manifest_lines(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("stack:".to_string());
    for flag in &manifest.stack {
        lines.push(format!("  {}: {} {}", flag.role, flag.entry, flag.version));
    }

    lines.push("dependencies:".to_string());
    for dep in &manifest.dependencies {
        lines.push(format!("  {} {}", dep.name, dep.version));
    }

    if !manifest.dev_dependencies.is_empty() {
        lines.push("dev dependencies:".to_string());
        for dep in &manifest.dev_dependencies {
            lines.push(format!("  {} {}", dep.name, dep.version));
        }
    }

    if !manifest.env.is_empty() {
        lines.push("environment:".to_string());
        for name in &manifest.env {
            lines.push(format!("  {name}"));
        }
    }

    lines
}

pub(crate) fn format_catalog_lines(catalog: &Catalog, role: Option<Role>) -> Vec<String> {
    let mut lines = Vec::new();
    for current in Role::ORDER {
        if role.is_some_and(|wanted| wanted != current) {
            continue;
        }
        let entries = catalog.entries_for_role(current);
        if entries.is_empty() {
            continue;
        }
        lines.push(format!("{current}:"));
        for entry in entries {
            lines.push(format!("  {} ({}) {}", entry.id, entry.package, entry.window()));
        }
    }
    lines
}
