//! Raw `key=value` renderer for scripting.

use crate::domain::{DisplayValue, Displayable};

/// Lay out an object as `key=value` lines.
///
/// Lists are joined with `,`; nested maps flatten to `key.sub=value`.
#[must_use]
pub fn format_raw(obj: &Displayable) -> Vec<String> {
    match obj {
        Displayable::Text(s) => vec![s.clone()],
        Displayable::List(items) => {
            let mut items = items.clone();
            items.sort();
            items
        }
        Displayable::Map(map) => {
            let mut lines = Vec::new();
            for (key, value) in map {
                match value {
                    DisplayValue::Text(v) => lines.push(format!("{key}={v}")),
                    DisplayValue::List(items) => {
                        let mut items = items.clone();
                        items.sort();
                        lines.push(format!("{key}={}", items.join(",")));
                    }
                    DisplayValue::Map(rows) => {
                        lines.extend(rows.iter().map(|(k, v)| format!("{key}.{k}={v}")));
                    }
                }
            }
            lines
        }
    }
}

/// Print an object in raw form.
pub fn render(obj: &Displayable) {
    for line in format_raw(obj) {
        println!("{line}");
    }
}
