//! Output: state JSON on stdout, diagnostics on stderr, tables for listings.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use sonarr_core::{BlockKind, Diagnostic, Diagnostics, Schema, Severity};

use crate::cli::ColorMode;

/// Whether stderr gets color.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

// ── State ────────────────────────────────────────────────────────────

/// Pretty JSON state to stdout; an absent state prints `null`.
pub fn print_state(state: Option<&Value>) -> Result<(), serde_json::Error> {
    let rendered = serde_json::to_string_pretty(&state)?;
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{rendered}");
    Ok(())
}

// ── Diagnostics ──────────────────────────────────────────────────────

fn render_diagnostic(diagnostic: &Diagnostic, color: bool) -> String {
    let label = match diagnostic.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    let label = match (color, diagnostic.severity) {
        (false, _) => label.to_owned(),
        (true, Severity::Error) => label.red().bold().to_string(),
        (true, Severity::Warning) => label.yellow().bold().to_string(),
    };

    let mut line = format!("{label}: {}", diagnostic.summary);
    if let Some(ref attribute) = diagnostic.attribute {
        let attribute = if color {
            attribute.cyan().to_string()
        } else {
            attribute.clone()
        };
        line.push_str(&format!(" [{attribute}]"));
    }
    line.push_str(&format!("\n  {}", diagnostic.detail));
    line
}

/// Every diagnostic to stderr, one block each.
pub fn print_diagnostics(diagnostics: &Diagnostics, color: bool) {
    let mut stderr = io::stderr().lock();
    for diagnostic in diagnostics {
        let _ = writeln!(stderr, "{}", render_diagnostic(diagnostic, color));
    }
}

// ── Type listing ─────────────────────────────────────────────────────

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "Type")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Singleton")]
    singleton: String,
    #[tabled(rename = "Import by")]
    import_key: String,
}

impl From<&Schema> for TypeRow {
    fn from(s: &Schema) -> Self {
        Self {
            name: s.type_name.clone(),
            kind: s.block.to_string(),
            singleton: if s.singleton { "yes" } else { "no" }.into(),
            import_key: match (s.block, s.import_key) {
                (BlockKind::DataSource, _) => "-".into(),
                (BlockKind::Resource, Some(key)) => format!("id, {key}"),
                (BlockKind::Resource, None) => "id".into(),
            },
        }
    }
}

pub fn render_types(schemas: &[Schema]) -> String {
    let rows: Vec<TypeRow> = schemas.iter().map(TypeRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use sonarr_core::DiagnosticKind;

    use super::*;

    #[test]
    fn plain_diagnostic_carries_attribute() {
        let diagnostic =
            Diagnostic::warning(DiagnosticKind::Deprecated, "use initial_state").with_attribute("intial_state");
        let text = render_diagnostic(&diagnostic, false);
        assert_eq!(
            text,
            "warning: Deprecated Attribute [intial_state]\n  use initial_state"
        );
    }
}
