//! Output formatting for bindings and option registries.

use docmatch_core::{Bindings, OptionLeaf, OptionRegistry, Value};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Formats match bindings in the requested output format.
pub fn format_bindings(bindings: &Bindings, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(bindings)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(bindings).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(bindings_to_table(bindings)),
    }
}

/// Formats an option registry in the requested output format.
pub fn format_registry(registry: &OptionRegistry, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(registry)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(registry).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(registry_to_table(registry)),
    }
}

/// Renders a value the way it reads on a command line: bare strings,
/// space-joined lists, `-` for absent values.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Count(n) => n.to_string(),
        Value::List(items) => format!("[{}]", items.join(", ")),
    }
}

fn bindings_to_table(bindings: &Bindings) -> String {
    let mut out = String::new();
    let max_name = bindings.iter().map(|(name, _)| name.len()).max().unwrap_or(4);

    for (name, value) in bindings.iter() {
        out.push_str(&format!(
            "{:<width$}  {}\n",
            name,
            render_value(value),
            width = max_name
        ));
    }

    out
}

fn forms(option: &OptionLeaf) -> String {
    match (&option.short, &option.long) {
        (Some(s), Some(l)) => format!("{s}, {l}"),
        (Some(s), None) => s.clone(),
        (None, Some(l)) => l.clone(),
        _ => "?".to_string(),
    }
}

fn registry_to_table(registry: &OptionRegistry) -> String {
    let mut out = String::new();
    if registry.is_empty() {
        out.push_str("No options declared.\n");
        return out;
    }

    let max_name = registry.iter().map(|o| forms(o).len()).max().unwrap_or(4);
    for option in registry.iter() {
        let kind = if option.takes_value { "value" } else { "flag" };
        let line = format!("  {:<width$}  {kind:<5}", forms(option), width = max_name);
        if option.takes_value && option.value != Value::Null {
            out.push_str(&format!(
                "{line}  default: {}\n",
                render_value(&option.value)
            ));
        } else {
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    out
}
