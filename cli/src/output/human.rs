//! Human-readable terminal renderer.
//!
//! Layout: lists as `  - item`, maps as `  = key: value`, nested values
//! indented one more level. Keys and list items are always sorted.

use owo_colors::OwoColorize as _;

use crate::domain::{DisplayValue, Displayable};
use crate::output::OutputContext;

/// Renders display mappings as styled terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Print an object. Suppressed when `quiet`.
    pub fn render(&self, obj: &Displayable) {
        self.print_lines(&format_object(obj));
    }

    /// Print pre-laid-out lines, styling headers, info labels and map keys.
    /// Suppressed when `quiet`.
    pub fn print_lines(&self, lines: &[String]) {
        if self.ctx.quiet {
            return;
        }
        let styles = &self.ctx.styles;
        for line in lines {
            if line.starts_with("=== ") {
                println!("{}", line.style(styles.header));
            } else if let Some(label) = line.strip_prefix("+ ") {
                println!("{} {label}", "+".style(styles.info));
            } else if let Some((key, value)) =
                line.strip_prefix("  = ").and_then(|rest| rest.split_once(": "))
            {
                println!("  = {}: {value}", key.style(styles.dim));
            } else {
                println!("{line}");
            }
        }
    }
}

/// Lay out the app listing: the header, then either both ownership
/// sections or a note that there are no apps.
#[must_use]
pub fn format_app_listing(user: &str, owned: &[String], shared: &[String]) -> Vec<String> {
    let mut lines = vec![format!("=== {user} Apps")];
    if owned.is_empty() && shared.is_empty() {
        lines.push("You have no apps.".to_string());
        return lines;
    }
    lines.push("+ Owned by Me: ".to_string());
    lines.extend(format_object(&Displayable::List(owned.to_vec())));
    lines.push("+ Shared with Me: ".to_string());
    lines.extend(format_object(&Displayable::List(shared.to_vec())));
    lines
}

/// Lay out an object as lines without styling.
#[must_use]
pub fn format_object(obj: &Displayable) -> Vec<String> {
    match obj {
        Displayable::Text(s) => vec![s.clone()],
        Displayable::List(items) => sorted(items)
            .into_iter()
            .map(|item| format!("  - {item}"))
            .collect(),
        Displayable::Map(map) => {
            let mut lines = Vec::new();
            for (key, value) in map {
                match value {
                    DisplayValue::Text(v) => lines.push(format!("  = {key}: {v}")),
                    DisplayValue::List(items) => {
                        lines.push(format!("  = {key}: "));
                        lines.extend(sorted(items).into_iter().map(|i| format!("    - {i}")));
                    }
                    DisplayValue::Map(rows) => {
                        lines.push(format!("  = {key}: "));
                        lines.extend(rows.iter().map(|(k, v)| format!("    = {k}: {v}")));
                    }
                }
            }
            lines
        }
    }
}

fn sorted(items: &[String]) -> Vec<&String> {
    let mut items: Vec<&String> = items.iter().collect();
    items.sort();
    items
}
