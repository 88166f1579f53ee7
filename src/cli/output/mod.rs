//! Output formatting utilities for the CLI.

pub mod progress;

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use console::{style, StyledObject};
use serde::Serialize;

use crate::domain::models::Outcome;

/// Trait for types that can be rendered as human-readable or JSON output.
pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Dispatch output based on JSON mode flag.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
        );
    } else {
        println!("{}", result.to_human());
    }
}

/// Create a borderless table with the given headers.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Outcome name colored by how interesting it is to the researcher.
///
/// Respects `NO_COLOR` through console's terminal detection.
pub fn colorize_outcome(outcome: Outcome) -> StyledObject<&'static str> {
    let name = style(outcome.as_str());
    match outcome {
        Outcome::Complete => name.green().bold(),
        Outcome::Partial => name.green(),
        Outcome::Overflow => name.yellow().bold(),
        Outcome::Failure => name.dim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_table_uppercases_headers() {
        let mut table = list_table(&["outcome", "runs"]);
        table.add_row(vec!["failure", "30"]);
        let rendered = table.to_string();
        assert!(rendered.contains("OUTCOME"));
        assert!(rendered.contains("failure"));
    }

    #[test]
    fn test_colorize_keeps_outcome_text() {
        let rendered = colorize_outcome(Outcome::Overflow).force_styling(false).to_string();
        assert_eq!(rendered, "overflow");
    }
}
