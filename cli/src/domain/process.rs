//! Process records and argument parsing for the `ps` commands.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::display::{DisplayMap, DisplayValue};
use crate::domain::format::time_ago;

static SCALE_ARG: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // pattern is a compile-time constant
    Regex::new(r"^([a-zA-Z0-9_]+)([=+-]\d+)$").expect("valid scale pattern")
});

/// One running process from `GET /apps/{app}/ps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Process name, e.g. `web.1`.
    pub process: String,
    /// Command line the process was started with.
    pub command: String,
    /// State reported by the platform, e.g. `up`, `crashed`.
    pub state: String,
    /// Seconds since the process entered `state`.
    #[serde(default)]
    pub elapsed: u64,
}

/// Which processes a restart or stop applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessTarget {
    All,
    /// A single process such as `web.1`.
    Process(String),
    /// Every process of a type such as `web`.
    Type(String),
}

impl ProcessTarget {
    /// Classify a command-line argument: `web.1` names one process, `web`
    /// names a type, and no argument means every process.
    #[must_use]
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => Self::All,
            Some(a) if names_single_process(a) => Self::Process(a.to_string()),
            Some(a) => Self::Type(a.to_string()),
        }
    }

    /// Form field sent to the API, if any: `("ps", name)` or `("type", name)`.
    #[must_use]
    pub fn param(&self) -> Option<(&'static str, &str)> {
        match self {
            Self::All => None,
            Self::Process(p) => Some(("ps", p)),
            Self::Type(t) => Some(("type", t)),
        }
    }

    /// Progress label such as `web.1 process` or `web processes`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::All => "processes".to_string(),
            Self::Process(p) => format!("{p} process"),
            Self::Type(t) => format!("{t} processes"),
        }
    }
}

fn names_single_process(arg: &str) -> bool {
    arg.char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < arg.len())
}

/// One requested scale change, e.g. `web=3` or `worker+1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleChange {
    pub process_type: String,
    /// Quantity as sent to the API: absolute (`3`) or relative (`+1`, `-2`).
    pub amount: String,
}

/// Parse `TYPE=N`, `TYPE+N`, `TYPE-N` arguments.
///
/// Non-matching arguments are ignored. A repeated type keeps the position
/// of its first occurrence and the amount of its last.
#[must_use]
pub fn parse_scale_args<S: AsRef<str>>(args: &[S]) -> Vec<ScaleChange> {
    let mut changes: Vec<ScaleChange> = Vec::new();
    for arg in args {
        let Some(caps) = SCALE_ARG.captures(arg.as_ref()) else {
            continue;
        };
        let process_type = caps[1].to_string();
        let amount = caps[2].trim_start_matches('=').to_string();
        match changes.iter_mut().find(|c| c.process_type == process_type) {
            Some(existing) => existing.amount = amount,
            None => changes.push(ScaleChange {
                process_type,
                amount,
            }),
        }
    }
    changes
}

/// Group processes by command: `` `cmd` `` → { process → "state for 3m" }.
#[must_use]
pub fn processes_by_command(processes: &[Process], now: DateTime<Utc>) -> DisplayMap {
    let mut grouped: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for p in processes {
        let age = time_ago(p.elapsed, now).replace(" ago", "");
        grouped
            .entry(format!("`{}`", p.command))
            .or_default()
            .insert(p.process.clone(), format!("{} for {age}", p.state));
    }
    grouped
        .into_iter()
        .map(|(cmd, rows)| (cmd, DisplayValue::Map(rows)))
        .collect()
}
