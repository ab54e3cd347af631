//! Output rendering for the `--output` formats.
//!
//! Offer lists get a `tabled` table or one id per line; single values
//! (activation report, config) take a caller-supplied text form. The
//! serde formats pass the original data through unchanged.

use std::io::{self, IsTerminal, Write};

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Render a list of offers in the chosen format.
///
/// `table` builds rows via `row`; `plain` emits `id` per item, one per
/// line, for scripting.
pub fn offers<T, R>(
    format: &OutputFormat,
    items: &[T],
    row: impl Fn(&T) -> R,
    id: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => Table::new(items.iter().map(row))
            .with(Style::rounded())
            .to_string(),
        OutputFormat::Plain => items.iter().map(id).collect::<Vec<_>>().join("\n"),
        structured => serialize(items, structured),
    }
}

/// Render a single value in the chosen format.
///
/// `table` uses the caller's text form; `plain` emits compact JSON so
/// scripts always get one parseable line.
pub fn value<T: Serialize>(
    format: &OutputFormat,
    data: &T,
    text: impl Fn(&T) -> String,
) -> String {
    match format {
        OutputFormat::Table => text(data),
        OutputFormat::Plain => serialize(data, &OutputFormat::JsonCompact),
        structured => serialize(data, structured),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn serialize<T: Serialize + ?Sized>(data: &T, format: &OutputFormat) -> String {
    let rendered = match format {
        OutputFormat::JsonCompact => serde_json::to_string(data).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(data).map_err(|e| e.to_string()),
        // Json, plus the fallthroughs that can't reach here
        _ => serde_json::to_string_pretty(data).map_err(|e| e.to_string()),
    };
    rendered.unwrap_or_else(|e| format!("serialization failed: {e}"))
}
