//! Output formatting: table, JSON, plain.
//!
//! Table uses `tabled`, JSON formats serialize the original data via serde,
//! plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Render an on/off flag, colored when `color` is set.
pub fn flag(enabled: bool, color: bool) -> String {
    match (enabled, color) {
        (true, true) => "yes".green().to_string(),
        (false, true) => "no".red().to_string(),
        (true, false) => "yes".into(),
        (false, false) => "no".into(),
    }
}

/// Render a device/subsystem state, colored when `color` is set.
pub fn state(value: Option<&str>, color: bool) -> String {
    let text = value.unwrap_or("-");
    if !color {
        return text.to_owned();
    }
    match text.to_ascii_lowercase().as_str() {
        "online" | "ok" | "connected" => text.green().to_string(),
        "offline" | "error" | "disconnected" | "expired" => text.red().to_string(),
        "-" | "unknown" => text.dimmed().to_string(),
        _ => text.yellow().to_string(),
    }
}

pub fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list in the chosen format. `to_row` builds the table row,
/// `id_fn` the plain-mode identifier.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    Ok(match format {
        OutputFormat::Table => table(data.iter().map(to_row)),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Plain => data.iter().map(id_fn).collect::<Vec<_>>().join("\n"),
    })
}

/// Render one item. Table mode shows `field: value` lines from `detail_fn`.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> Vec<(&'static str, String)>,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    Ok(match format {
        OutputFormat::Table => {
            let lines = detail_fn(data);
            let width = lines.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
            lines
                .into_iter()
                .map(|(k, v)| format!("{k:<width$}  {v}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Plain => id_fn(data),
    })
}

pub fn table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Confirmation line for mutating commands. Suppressed by `--quiet` and
/// in machine-readable formats.
pub fn print_done(message: &str, format: OutputFormat, quiet: bool) {
    if matches!(format, OutputFormat::Table | OutputFormat::Plain) {
        print_output(message, quiet);
    }
}

/// Like [`print_done`], but JSON formats print the updated resource.
pub fn print_updated<T: serde::Serialize>(
    data: &T,
    message: &str,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => print_output(&serde_json::to_string_pretty(data)?, quiet),
        OutputFormat::JsonCompact => print_output(&serde_json::to_string(data)?, quiet),
        OutputFormat::Table | OutputFormat::Plain => print_output(message, quiet),
    }
    Ok(())
}
